use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub headless: bool,
    pub viewport: Viewport,
    pub user_agent: Option<String>,
    pub args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport {
                width: 1920,
                height: 1080,
            },
            user_agent: None,
            args: vec![],
        }
    }
}

/// Strategy used to resolve a [`Locator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum By {
    Css,
    XPath,
}

/// A strategy + selector pair identifying zero or more elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub by: By,
    pub selector: Cow<'static, str>,
}

impl Locator {
    pub const fn css(selector: &'static str) -> Self {
        Self {
            by: By::Css,
            selector: Cow::Borrowed(selector),
        }
    }

    pub const fn xpath(selector: &'static str) -> Self {
        Self {
            by: By::XPath,
            selector: Cow::Borrowed(selector),
        }
    }

    pub fn new(by: By, selector: impl Into<String>) -> Self {
        Self {
            by,
            selector: Cow::Owned(selector.into()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self.by {
            By::Css => "css",
            By::XPath => "xpath",
        };
        write!(f, "{}={}", strategy, self.selector)
    }
}

/// Element condition a wait can poll for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Present,
    Visible,
    Clickable,
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementState::Present => write!(f, "present"),
            ElementState::Visible => write!(f, "visible"),
            ElementState::Clickable => write!(f, "clickable"),
        }
    }
}
