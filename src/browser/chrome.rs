use crate::browser::{scripts, BrowserDriver};
use crate::errors::{Result, SuiteError};
use crate::types::{BrowserConfig, By, ElementState, Locator};
use async_trait::async_trait;
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use serde_json::Value;
use std::ffi::OsStr;
use std::sync::Arc;
use tracing::{debug, info};

/// Chrome session driven over the DevTools protocol.
pub struct ChromeBrowser {
    browser: Option<Browser>,
    tab: Option<Arc<Tab>>,
}

impl ChromeBrowser {
    pub fn launch(config: &BrowserConfig) -> Result<Self> {
        let window_size_arg = format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        );

        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-gpu"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&window_size_arg),
        ];

        if let Some(ref ua_arg) = user_agent_arg {
            args.push(OsStr::new(ua_arg));
        }

        for arg in &config.args {
            args.push(OsStr::new(arg));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.viewport.width, config.viewport.height)))
            .args(args)
            .build()
            .map_err(|e| SuiteError::LaunchFailed(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| SuiteError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| SuiteError::LaunchFailed(e.to_string()))?;

        info!(
            "Launched Chrome (headless: {}, {}x{})",
            config.headless, config.viewport.width, config.viewport.height
        );

        Ok(Self {
            browser: Some(browser),
            tab: Some(tab),
        })
    }

    fn tab(&self) -> Result<&Arc<Tab>> {
        self.tab.as_ref().ok_or(SuiteError::BrowserNotLaunched)
    }

    /// Runs a DevTools call on the blocking pool; `headless_chrome` waits synchronously.
    async fn with_tab<T, F>(&self, call: F) -> Result<T>
    where
        F: FnOnce(&Tab) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let tab = Arc::clone(self.tab()?);
        tokio::task::spawn_blocking(move || call(&*tab))
            .await
            .map_err(std::io::Error::from)?
    }

    async fn evaluate(&self, script: String) -> Result<Value> {
        self.with_tab(move |tab| {
            let result = tab
                .evaluate(&script, false)
                .map_err(|e| SuiteError::JavaScriptFailed(e.to_string()))?;
            Ok(result.value.unwrap_or(Value::Null))
        })
        .await
    }

    fn find_first<'a>(tab: &'a Tab, locator: &Locator) -> Result<Element<'a>> {
        let found = match locator.by {
            By::Css => tab.find_element(&locator.selector),
            By::XPath => tab.find_element_by_xpath(&locator.selector),
        };
        found.map_err(|e| SuiteError::ElementNotFound(format!("{}: {}", locator, e)))
    }
}

#[async_trait]
impl BrowserDriver for ChromeBrowser {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        let url = url.to_string();
        self.with_tab(move |tab| {
            tab.navigate_to(&url)
                .map_err(|e| SuiteError::NavigationFailed(e.to_string()))?;

            tab.wait_until_navigated()
                .map_err(|e| SuiteError::NavigationFailed(e.to_string()))?;

            Ok(())
        })
        .await
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.tab()?.get_url())
    }

    async fn count(&self, locator: &Locator) -> Result<usize> {
        let value = self.evaluate(scripts::count(locator)).await?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    async fn check(&self, locator: &Locator, state: ElementState) -> Result<bool> {
        let value = self.evaluate(scripts::check_state(locator, state)).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let locator = locator.clone();
        self.with_tab(move |tab| {
            Self::find_first(tab, &locator)?
                .click()
                .map_err(|e| SuiteError::JavaScriptFailed(e.to_string()))?;
            Ok(())
        })
        .await
    }

    async fn clear(&self, locator: &Locator) -> Result<()> {
        let cleared = self.evaluate(scripts::clear(locator)).await?;
        if cleared.as_bool() == Some(true) {
            return Ok(());
        }

        Err(SuiteError::ElementNotFound(locator.to_string()))
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
        let locator = locator.clone();
        let text = text.to_string();
        self.with_tab(move |tab| {
            let element = Self::find_first(tab, &locator)?;

            element
                .click()
                .map_err(|e| SuiteError::JavaScriptFailed(e.to_string()))?;

            element
                .type_into(&text)
                .map_err(|e| SuiteError::JavaScriptFailed(e.to_string()))?;

            Ok(())
        })
        .await
    }

    async fn text(&self, locator: &Locator) -> Result<String> {
        match self.evaluate(scripts::text(locator)).await? {
            Value::String(text) => Ok(text),
            _ => Err(SuiteError::ElementNotFound(locator.to_string())),
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(tab) = self.tab.take() {
            if let Err(e) = tab.close(false) {
                debug!("Tab close failed: {}", e);
            }
        }
        // Dropping the Browser terminates the Chrome process.
        if self.browser.take().is_some() {
            info!("Chrome session closed");
        }
        Ok(())
    }
}
