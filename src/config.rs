use crate::errors::{Result, SuiteError};
use crate::types::BrowserConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.kinopoisk.dev/v1.4";
pub const DEFAULT_UI_URL: &str = "https://www.kinopoisk.ru/";

pub const API_KEY_HEADER: &str = "x-api-key";

pub const API_KEY_VAR: &str = "KINOPOISK_API_KEY";
pub const API_URL_VAR: &str = "KINOPOISK_API_URL";
pub const UI_URL_VAR: &str = "KINOPOISK_UI_URL";
pub const HEADLESS_VAR: &str = "KINOPOISK_HEADLESS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// API base without a trailing slash.
    pub api_base_url: String,
    /// Site home page, always ending with `/`.
    pub ui_base_url: String,
    pub api_key: Option<String>,
    pub api_timeout_ms: u64,
    pub element_timeout_ms: u64,
    pub browser: BrowserConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            ui_base_url: DEFAULT_UI_URL.to_string(),
            api_key: None,
            api_timeout_ms: 15_000,
            element_timeout_ms: 10_000,
            browser: BrowserConfig::default(),
        }
    }
}

impl SuiteConfig {
    /// Loads `.env` from the working directory (if any), then reads the process environment.
    pub fn from_env() -> Result<Self> {
        Self::load_dotenv(Path::new(".env"));
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn load_dotenv(path: &Path) {
        match dotenvy::from_path(path) {
            Ok(()) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => debug!("No {} file, using process environment", path.display()),
            Err(e) => warn!("Ignoring unreadable {}: {}", path.display(), e),
        }
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if let Some(api_url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = normalize_api_url(&api_url)?;
        }

        if let Some(ui_url) = lookup(UI_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.ui_base_url = normalize_ui_url(&ui_url)?;
        }

        if let Some(headless) = lookup(HEADLESS_VAR) {
            config.browser.headless = !matches!(
                headless.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }

        if config.api_key.is_none() {
            warn!("{} is not set, API requests will be unauthenticated", API_KEY_VAR);
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base_url(mut self, url: &str) -> Result<Self> {
        self.api_base_url = normalize_api_url(url)?;
        Ok(self)
    }

    /// `Accept: application/json` plus `x-api-key` when a key is configured.
    pub fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.api_key {
            headers.insert(API_KEY_HEADER, header_value(key)?);
        }
        Ok(headers)
    }

    /// Same as [`auth_headers`](Self::auth_headers) but with `token` as the key.
    pub fn auth_headers_with_token(&self, token: &str) -> Result<HeaderMap> {
        let mut headers = self.auth_headers()?;
        headers.insert(API_KEY_HEADER, header_value(token)?);
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| SuiteError::Config(format!("invalid {} header value: {}", API_KEY_HEADER, e)))
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).map_err(|e| SuiteError::Config(format!("invalid URL '{}': {}", raw, e)))
}

fn normalize_api_url(raw: &str) -> Result<String> {
    let url = parse_url(raw)?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn normalize_ui_url(raw: &str) -> Result<String> {
    let url = parse_url(raw)?;
    let mut home = url.as_str().to_string();
    if !home.ends_with('/') {
        home.push('/');
    }
    Ok(home)
}
