pub mod base;
pub mod search;

pub use base::BasePage;
pub use search::{is_captcha_url, is_detail_page_url, SearchPage};
