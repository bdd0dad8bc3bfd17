pub mod api;
pub mod browser;
pub mod cases;
pub mod config;
pub mod errors;
pub mod pages;
pub mod runner;
pub mod test_data;
pub mod testing;
pub mod types;

pub use api::{ApiResponse, KinopoiskApiClient};
pub use browser::{BrowserDriver, ChromeBrowser, Wait};
pub use cases::{ApiCase, CaseOutcome, Suite, UiCase};
pub use config::SuiteConfig;
pub use errors::{Result, SuiteError};
pub use pages::{BasePage, SearchPage};
pub use runner::{RunReport, SuiteRunner};
pub use types::*;
