//! In-memory [`BrowserDriver`] for exercising page objects and UI cases
//! without a real browser.

use crate::browser::BrowserDriver;
use crate::errors::{Result, SuiteError};
use crate::types::{ElementState, Locator};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub visible: bool,
    pub enabled: bool,
    pub text: String,
    pub value: String,
    /// Clicking navigates here, like following a link.
    pub href: Option<String>,
    /// Number of state checks that report the element hidden before it shows up.
    pub hidden_for_checks: usize,
}

impl Default for FakeElement {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
            text: String::new(),
            value: String::new(),
            href: None,
            hidden_for_checks: 0,
        }
    }
}

impl FakeElement {
    pub fn link(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Default::default()
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakePage {
    elements: Vec<(Locator, Vec<FakeElement>)>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: Locator, elements: Vec<FakeElement>) -> Self {
        self.elements.push((locator, elements));
        self
    }

    fn matches_mut(&mut self, locator: &Locator) -> Option<&mut Vec<FakeElement>> {
        self.elements
            .iter_mut()
            .find(|(l, _)| l == locator)
            .map(|(_, elements)| elements)
    }
}

#[derive(Debug, Default)]
struct FakeState {
    pages: HashMap<String, FakePage>,
    fallback: FakePage,
    redirects: HashMap<String, String>,
    current_url: String,
    /// URL a click is navigating to, and how many URL reads still see the old page.
    pending: Option<(String, usize)>,
    navigation_lag: usize,
    navigations: Vec<String>,
    clicks: Vec<String>,
    typed: Vec<(String, String)>,
    closed: bool,
}

impl FakeState {
    fn page_mut(&mut self) -> &mut FakePage {
        let FakeState {
            pages,
            fallback,
            current_url,
            ..
        } = self;
        pages.get_mut(current_url.as_str()).unwrap_or(fallback)
    }

    fn first_mut(&mut self, locator: &Locator) -> Result<&mut FakeElement> {
        self.page_mut()
            .matches_mut(locator)
            .and_then(|elements| elements.first_mut())
            .ok_or_else(|| SuiteError::ElementNotFound(locator.to_string()))
    }

    fn resolve(&mut self, url: &str) -> String {
        self.navigations.push(url.to_string());
        self.redirects.get(url).cloned().unwrap_or_else(|| url.to_string())
    }

    fn go(&mut self, url: &str) {
        self.pending = None;
        self.current_url = self.resolve(url);
    }

    fn follow_link(&mut self, href: &str) {
        if self.navigation_lag == 0 {
            self.go(href);
        } else {
            let target = self.resolve(href);
            self.pending = Some((target, self.navigation_lag));
        }
    }

    fn read_url(&mut self) -> String {
        if let Some((target, remaining)) = self.pending.as_mut() {
            if *remaining == 0 {
                self.current_url = std::mem::take(target);
                self.pending = None;
            } else {
                *remaining -= 1;
            }
        }
        self.current_url.clone()
    }
}

/// Scripted browser: pages are looked up by exact URL, anything else gets the fallback page.
#[derive(Debug, Default)]
pub struct FakeBrowser {
    state: Mutex<FakeState>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: impl Into<String>, page: FakePage) -> Self {
        self.lock().pages.insert(url.into(), page);
        self
    }

    pub fn with_fallback(self, page: FakePage) -> Self {
        self.lock().fallback = page;
        self
    }

    /// Navigating to `from` lands on `to`.
    pub fn with_redirect(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.lock().redirects.insert(from.into(), to.into());
        self
    }

    /// Clicked links commit only after `reads` further `current_url` calls
    /// have returned the old URL.
    pub fn with_late_navigation(self, reads: usize) -> Self {
        self.lock().navigation_lag = reads;
        self
    }

    /// URLs passed to `navigate` or followed by clicks, before redirects.
    pub fn navigations(&self) -> Vec<String> {
        self.lock().navigations.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.lock().clicks.clone()
    }

    pub fn typed(&self) -> Vec<(String, String)> {
        self.lock().typed.clone()
    }

    /// Current `value` of the first element matching `locator`.
    pub fn value_of(&self, locator: &Locator) -> Option<String> {
        self.lock().first_mut(locator).ok().map(|e| e.value.clone())
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn open_state(&self) -> Result<MutexGuard<'_, FakeState>> {
        let state = self.lock();
        if state.closed {
            return Err(SuiteError::BrowserNotLaunched);
        }
        Ok(state)
    }
}

#[async_trait]
impl BrowserDriver for FakeBrowser {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.open_state()?.go(url);
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.open_state()?.read_url())
    }

    async fn count(&self, locator: &Locator) -> Result<usize> {
        let mut state = self.open_state()?;
        Ok(state.page_mut().matches_mut(locator).map_or(0, |e| e.len()))
    }

    async fn check(&self, locator: &Locator, element_state: ElementState) -> Result<bool> {
        let mut state = self.open_state()?;
        let element = match state.first_mut(locator) {
            Ok(element) => element,
            Err(_) => return Ok(false),
        };

        if element.hidden_for_checks > 0 {
            element.hidden_for_checks -= 1;
            return Ok(false);
        }

        Ok(match element_state {
            ElementState::Present => true,
            ElementState::Visible => element.visible,
            ElementState::Clickable => element.visible && element.enabled,
        })
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let mut state = self.open_state()?;
        let href = state.first_mut(locator)?.href.clone();
        state.clicks.push(locator.to_string());
        if let Some(href) = href {
            state.follow_link(&href);
        }
        Ok(())
    }

    async fn clear(&self, locator: &Locator) -> Result<()> {
        self.open_state()?.first_mut(locator)?.value.clear();
        Ok(())
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
        let mut state = self.open_state()?;
        state.first_mut(locator)?.value.push_str(text);
        state.typed.push((locator.to_string(), text.to_string()));
        Ok(())
    }

    async fn text(&self, locator: &Locator) -> Result<String> {
        Ok(self.open_state()?.first_mut(locator)?.text.clone())
    }

    async fn close(&mut self) -> Result<()> {
        self.lock().closed = true;
        Ok(())
    }
}
