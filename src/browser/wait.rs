use crate::errors::{Result, SuiteError};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Bounded polling wait.
///
/// The predicate is evaluated at least once, then every `poll_interval`
/// until it yields `true` or `timeout` elapses. Predicate errors do not end
/// the wait; the last one is reported if the wait times out.
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for Wait {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl Wait {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(100),
        }
    }

    pub fn from_millis(timeout_ms: u64) -> Self {
        Self::new(Duration::from_millis(timeout_ms))
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub async fn until<F, Fut>(&self, description: &str, mut predicate: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        // `None` when the timeout is too large to represent: wait indefinitely.
        let deadline = Instant::now().checked_add(self.timeout);
        let mut last_error: Option<SuiteError> = None;

        loop {
            match predicate().await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) => {
                    debug!("Wait for {} polled an error: {}", description, e);
                    last_error = Some(e);
                }
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break;
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        let mut message = format!("{} after {} ms", description, self.timeout.as_millis());
        if let Some(e) = last_error {
            message.push_str(&format!(" (last error: {})", e));
        }
        Err(SuiteError::Timeout(message))
    }
}
