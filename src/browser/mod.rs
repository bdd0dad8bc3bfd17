pub mod chrome;
pub mod scripts;
pub mod wait;

pub use chrome::ChromeBrowser;
pub use wait::Wait;

use crate::errors::Result;
use crate::types::{ElementState, Locator};
use async_trait::async_trait;

/// A single browser-automation session the page objects drive.
///
/// Element operations act on the first element matched by the locator.
/// Nothing here waits implicitly; callers poll with [`Wait`].
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate to a URL and wait for the navigation to settle
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Get current URL
    async fn current_url(&self) -> Result<String>;

    /// Number of elements currently matching `locator`
    async fn count(&self, locator: &Locator) -> Result<usize>;

    /// Whether the first match is in `state`; `false` when nothing matches
    async fn check(&self, locator: &Locator, state: ElementState) -> Result<bool>;

    async fn click(&self, locator: &Locator) -> Result<()>;

    async fn clear(&self, locator: &Locator) -> Result<()>;

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()>;

    async fn text(&self, locator: &Locator) -> Result<String>;

    /// Close the browser
    async fn close(&mut self) -> Result<()>;
}
