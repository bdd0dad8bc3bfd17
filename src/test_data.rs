//! Fixed inputs shared by the API and UI cases.

pub const DIGIT_QUERY: &str = "11";
pub const CYRILLIC_QUERY: &str = "Нэчжа";
pub const GENRE_FANTASY: &str = "фэнтези";
pub const SYMBOL_QUERY: &str = "_%%??";

pub const INVALID_TOKEN: &str = "invalid_token_value";
pub const EMPTY_QUERY: &str = "";
