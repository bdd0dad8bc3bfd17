use crate::browser::{BrowserDriver, Wait};
use crate::config::DEFAULT_UI_URL;
use crate::errors::Result;
use crate::pages::base::BasePage;
use crate::types::Locator;
use tracing::info;

/// Any input on the page; the site does not expose a stable search field selector.
pub const SEARCH_INPUT: Locator = Locator::xpath("//input");

/// Links to movie or series cards in the search results.
pub const RESULT_LINKS: Locator = Locator::css(r#"a[href*="/film/"], a[href*="/series/"]"#);

/// Home page and search results of kinopoisk.ru.
pub struct SearchPage<'d> {
    base: BasePage<'d>,
    home_url: String,
}

impl<'d> SearchPage<'d> {
    pub fn new(driver: &'d dyn BrowserDriver) -> Self {
        Self {
            base: BasePage::new(driver),
            home_url: DEFAULT_UI_URL.to_string(),
        }
    }

    /// `home_url` must end with `/`.
    pub fn with_home(driver: &'d dyn BrowserDriver, home_url: impl Into<String>, wait: Wait) -> Self {
        Self {
            base: BasePage::with_wait(driver, wait),
            home_url: home_url.into(),
        }
    }

    pub fn base(&self) -> &BasePage<'d> {
        &self.base
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    /// Results URL with the query embedded verbatim.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}index.php?kp_query={}", self.home_url, query)
    }

    pub async fn open_main_page(&self) -> Result<()> {
        info!("Opening main page {}", self.home_url);
        self.base.open(&self.home_url).await
    }

    /// Goes straight to the results page instead of typing into the search field.
    pub async fn search(&self, query: &str) -> Result<()> {
        info!("Searching for \"{}\"", query);
        self.base.open(&self.search_url(query)).await
    }

    pub async fn get_results_count(&self) -> Result<usize> {
        let count = self.base.elements_count(&RESULT_LINKS).await?;
        info!("Search results on page: {}", count);
        Ok(count)
    }

    pub async fn is_search_input_visible(&self) -> Result<bool> {
        let visible = self.base.is_visible(&SEARCH_INPUT).await?;
        info!("Search input visible: {}", visible);
        Ok(visible)
    }

    /// Clicks the first result and waits for the browser to leave the results page.
    pub async fn open_first_result(&self) -> Result<()> {
        info!("Opening first search result");
        let results_url = self.base.current_url().await?;
        self.base.click(&RESULT_LINKS).await?;
        let opened = self.base.wait_for_url_change(&results_url).await?;
        info!("Opened {}", opened);
        Ok(())
    }

    pub async fn current_url(&self) -> Result<String> {
        self.base.current_url().await
    }
}

/// The site's anti-bot interstitial.
pub fn is_captcha_url(url: &str) -> bool {
    url.contains("showcaptcha")
}

/// A movie or series card.
pub fn is_detail_page_url(url: &str) -> bool {
    url.contains("film") || url.contains("series")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::{CYRILLIC_QUERY, DIGIT_QUERY};
    use crate::testing::{FakeBrowser, FakeElement, FakePage};
    use std::time::Duration;

    const HOME: &str = "https://www.kinopoisk.ru/";

    fn quick_wait() -> Wait {
        Wait::from_millis(50).with_poll_interval(Duration::from_millis(5))
    }

    fn results_page(count: usize) -> FakePage {
        let links = (0..count)
            .map(|i| FakeElement::link(format!("https://www.kinopoisk.ru/film/{}/", 1000 + i)))
            .collect();
        FakePage::new().with(RESULT_LINKS, links)
    }

    #[test]
    fn test_search_url_embeds_raw_query() {
        let driver = FakeBrowser::new();
        let page = SearchPage::new(&driver);
        assert_eq!(page.home_url(), HOME);
        assert_eq!(
            page.search_url(CYRILLIC_QUERY),
            "https://www.kinopoisk.ru/index.php?kp_query=Нэчжа"
        );
        assert_eq!(
            page.search_url(DIGIT_QUERY),
            "https://www.kinopoisk.ru/index.php?kp_query=11"
        );
    }

    #[tokio::test]
    async fn test_search_and_count() {
        let driver = FakeBrowser::new()
            .with_page(format!("{}index.php?kp_query=11", HOME), results_page(7));
        let page = SearchPage::with_home(&driver, HOME, quick_wait());

        page.open_main_page().await.unwrap();
        assert_eq!(page.get_results_count().await.unwrap(), 0);

        page.search(DIGIT_QUERY).await.unwrap();
        assert_eq!(page.get_results_count().await.unwrap(), 7);
        assert_eq!(
            driver.navigations(),
            vec![HOME.to_string(), format!("{}index.php?kp_query=11", HOME)]
        );
    }

    #[tokio::test]
    async fn test_search_input_visibility() {
        let driver = FakeBrowser::new()
            .with_page(HOME, FakePage::new().with(SEARCH_INPUT, vec![FakeElement::default()]));
        let page = SearchPage::with_home(&driver, HOME, quick_wait());
        page.open_main_page().await.unwrap();
        assert!(page.is_search_input_visible().await.unwrap());

        let driver = FakeBrowser::new();
        let page = SearchPage::with_home(&driver, HOME, quick_wait());
        page.open_main_page().await.unwrap();
        assert!(!page.is_search_input_visible().await.unwrap());
    }

    #[tokio::test]
    async fn test_open_first_result_follows_link() {
        let driver = FakeBrowser::new()
            .with_page(format!("{}index.php?kp_query=11", HOME), results_page(2));
        let page = SearchPage::with_home(&driver, HOME, quick_wait());

        page.search(DIGIT_QUERY).await.unwrap();
        page.open_first_result().await.unwrap();
        assert_eq!(
            page.current_url().await.unwrap(),
            "https://www.kinopoisk.ru/film/1000/"
        );
    }

    #[tokio::test]
    async fn test_open_first_result_waits_for_navigation_to_commit() {
        let driver = FakeBrowser::new()
            .with_page(format!("{}index.php?kp_query=11", HOME), results_page(2))
            .with_late_navigation(3);
        let page = SearchPage::with_home(&driver, HOME, quick_wait());

        page.search(DIGIT_QUERY).await.unwrap();
        page.open_first_result().await.unwrap();
        assert_eq!(
            page.current_url().await.unwrap(),
            "https://www.kinopoisk.ru/film/1000/"
        );
    }

    #[tokio::test]
    async fn test_open_first_result_without_results_times_out() {
        let driver = FakeBrowser::new();
        let page = SearchPage::with_home(&driver, HOME, quick_wait());
        page.search(DIGIT_QUERY).await.unwrap();
        assert!(page.open_first_result().await.unwrap_err().is_timeout());
    }

    #[test]
    fn test_url_classification() {
        assert!(is_captcha_url("https://www.kinopoisk.ru/showcaptcha?cc=1&retpath=x"));
        assert!(!is_captcha_url("https://www.kinopoisk.ru/film/1234/"));
        assert!(is_detail_page_url("https://www.kinopoisk.ru/film/1234/"));
        assert!(is_detail_page_url("https://www.kinopoisk.ru/series/77044/"));
        assert!(!is_detail_page_url("https://www.kinopoisk.ru/index.php?kp_query=11"));
    }
}
