use crate::browser::{BrowserDriver, Wait};
use crate::errors::{Result, SuiteError};
use crate::types::{ElementState, Locator};
use std::time::Duration;
use tracing::debug;

/// Element-interaction primitives shared by every page object.
///
/// Waiting operations block until their condition holds or the wait times
/// out with [`SuiteError::Timeout`](crate::errors::SuiteError::Timeout).
pub struct BasePage<'d> {
    driver: &'d dyn BrowserDriver,
    wait: Wait,
}

impl<'d> BasePage<'d> {
    pub fn new(driver: &'d dyn BrowserDriver) -> Self {
        Self::with_wait(driver, Wait::default())
    }

    pub fn with_wait(driver: &'d dyn BrowserDriver, wait: Wait) -> Self {
        Self { driver, wait }
    }

    pub fn wait(&self) -> Wait {
        self.wait
    }

    pub async fn open(&self, url: &str) -> Result<()> {
        debug!("Opening {}", url);
        self.driver.navigate(url).await
    }

    pub async fn current_url(&self) -> Result<String> {
        self.driver.current_url().await
    }

    /// Waits until the element is clickable, then clicks it.
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        self.wait_for(&self.wait, locator, ElementState::Clickable).await?;
        debug!("Clicking {}", locator);
        self.driver.click(locator).await
    }

    /// Waits until the element is visible, optionally clears it, then types `value`.
    pub async fn type_text(&self, locator: &Locator, value: &str, clear: bool) -> Result<()> {
        self.wait_for(&self.wait, locator, ElementState::Visible).await?;
        if clear {
            self.driver.clear(locator).await?;
        }
        debug!("Typing {} chars into {}", value.chars().count(), locator);
        self.driver.send_keys(locator, value).await
    }

    /// Waits until the element is visible and returns its text.
    pub async fn get_text(&self, locator: &Locator, timeout: Option<Duration>) -> Result<String> {
        let wait = match timeout {
            Some(timeout) => Wait::new(timeout).with_poll_interval(self.wait.poll_interval),
            None => self.wait,
        };
        self.wait_for(&wait, locator, ElementState::Visible).await?;
        self.driver.text(locator).await
    }

    /// Waits until the browser has left `from` and returns the new URL.
    ///
    /// A click only dispatches input events; the navigation it starts commits later.
    pub async fn wait_for_url_change(&self, from: &str) -> Result<String> {
        let driver = self.driver;
        let description = format!("navigation away from {}", from);
        self.wait
            .until(&description, || async move {
                Ok::<bool, SuiteError>(driver.current_url().await? != from)
            })
            .await?;
        self.driver.current_url().await
    }

    /// Snapshot count, no waiting.
    pub async fn elements_count(&self, locator: &Locator) -> Result<usize> {
        self.driver.count(locator).await
    }

    /// Like a visibility wait, but a timeout yields `false`.
    pub async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        match self.wait_for(&self.wait, locator, ElementState::Visible).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_timeout() => {
                debug!("{}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn wait_for(&self, wait: &Wait, locator: &Locator, state: ElementState) -> Result<()> {
        let description = format!("{} to be {}", locator, state);
        let driver = self.driver;
        wait.until(&description, || driver.check(locator, state)).await
    }
}
