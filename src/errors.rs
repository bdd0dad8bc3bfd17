use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status code {actual}, expected one of {expected:?}")]
    UnexpectedStatus { expected: Vec<u16>, actual: u16 },

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Browser not launched")]
    BrowserNotLaunched,

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("JavaScript execution failed: {0}")]
    JavaScriptFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SuiteError>;

impl SuiteError {
    pub fn assertion(message: impl Into<String>) -> Self {
        SuiteError::Assertion(message.into())
    }

    /// Whether the error came from an exhausted element wait.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SuiteError::Timeout(_))
    }
}

/// Fails with `Assertion(message)` unless `condition` holds.
pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(SuiteError::Assertion(message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message() {
        let err = SuiteError::UnexpectedStatus {
            expected: vec![200, 404],
            actual: 500,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status code 500, expected one of [200, 404]"
        );
    }

    #[test]
    fn test_ensure() {
        assert!(ensure(true, || "never built".to_string()).is_ok());

        let err = ensure(false, || "count was 0".to_string()).unwrap_err();
        assert!(matches!(err, SuiteError::Assertion(ref m) if m == "count was 0"));
        assert!(!err.is_timeout());
        assert!(SuiteError::Timeout("input".into()).is_timeout());
    }
}
