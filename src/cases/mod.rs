//! The suite's test cases.
//!
//! A case returns `Ok(CaseOutcome::Passed)` when every expectation holds,
//! `Ok(CaseOutcome::Skipped(_))` when it could not meaningfully run, and
//! `Err(_)` for a failed expectation or an infrastructure error.

pub mod api;
pub mod expect;
pub mod ui;

pub use api::ApiCase;
pub use ui::UiCase;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Skipped(String),
}

/// Which cases a run selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    Api,
    Ui,
    All,
}

impl Suite {
    pub fn includes_api(self) -> bool {
        matches!(self, Suite::Api | Suite::All)
    }

    pub fn includes_ui(self) -> bool {
        matches!(self, Suite::Ui | Suite::All)
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suite::Api => write!(f, "api"),
            Suite::Ui => write!(f, "ui"),
            Suite::All => write!(f, "all"),
        }
    }
}

impl FromStr for Suite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "api" => Ok(Suite::Api),
            "ui" => Ok(Suite::Ui),
            "all" => Ok(Suite::All),
            other => Err(format!("unknown suite '{}', expected api, ui or all", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_parsing() {
        assert_eq!("api".parse::<Suite>().unwrap(), Suite::Api);
        assert_eq!("UI".parse::<Suite>().unwrap(), Suite::Ui);
        assert_eq!("all".parse::<Suite>().unwrap(), Suite::All);
        assert!("smoke".parse::<Suite>().is_err());
    }

    #[test]
    fn test_suite_selection() {
        assert!(Suite::All.includes_api() && Suite::All.includes_ui());
        assert!(Suite::Api.includes_api() && !Suite::Api.includes_ui());
        assert!(!Suite::Ui.includes_api() && Suite::Ui.includes_ui());
    }
}
