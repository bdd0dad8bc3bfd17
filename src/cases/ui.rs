use crate::browser::{BrowserDriver, Wait};
use crate::cases::CaseOutcome;
use crate::config::SuiteConfig;
use crate::errors::{ensure, Result};
use crate::pages::{is_captcha_url, is_detail_page_url, SearchPage};
use crate::test_data::{CYRILLIC_QUERY, DIGIT_QUERY};
use tracing::warn;

/// UI cases against the kinopoisk.ru home page and search results.
///
/// All cases share one browser session and must run one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCase {
    SearchByCyrillic,
    SearchByDigits,
    OpenFirstResult,
    SearchInputVisible,
    TwoSearchesInRow,
}

impl UiCase {
    pub const ALL: [UiCase; 5] = [
        UiCase::SearchByCyrillic,
        UiCase::SearchByDigits,
        UiCase::OpenFirstResult,
        UiCase::SearchInputVisible,
        UiCase::TwoSearchesInRow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UiCase::SearchByCyrillic => "search_by_cyrillic",
            UiCase::SearchByDigits => "search_by_digits",
            UiCase::OpenFirstResult => "open_first_result",
            UiCase::SearchInputVisible => "search_input_visible",
            UiCase::TwoSearchesInRow => "two_searches_in_row",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            UiCase::SearchByCyrillic => "Searching 'Нэчжа' shows at least one result",
            UiCase::SearchByDigits => "Searching '11' shows at least one result",
            UiCase::OpenFirstResult => "Clicking the first result opens a movie or series card",
            UiCase::SearchInputVisible => "The home page shows a search input",
            UiCase::TwoSearchesInRow => "Two searches in a row both show results",
        }
    }

    pub async fn run(self, driver: &dyn BrowserDriver, config: &SuiteConfig) -> Result<CaseOutcome> {
        let page = SearchPage::with_home(
            driver,
            config.ui_base_url.clone(),
            Wait::from_millis(config.element_timeout_ms),
        );
        page.open_main_page().await?;

        match self {
            UiCase::SearchByCyrillic => {
                page.search(CYRILLIC_QUERY).await?;
                expect_results(page.get_results_count().await?, CYRILLIC_QUERY)?;
            }
            UiCase::SearchByDigits => {
                page.search(DIGIT_QUERY).await?;
                expect_results(page.get_results_count().await?, DIGIT_QUERY)?;
            }
            UiCase::OpenFirstResult => {
                page.search(CYRILLIC_QUERY).await?;
                page.open_first_result().await?;

                let current_url = page.current_url().await?;
                if is_captcha_url(&current_url) {
                    warn!("Redirected to the anti-bot page: {}", current_url);
                    return Ok(CaseOutcome::Skipped(
                        "site answered with showcaptcha, blocked by bot protection".to_string(),
                    ));
                }
                ensure(is_detail_page_url(&current_url), || {
                    format!("expected a film or series page, got {}", current_url)
                })?;
            }
            UiCase::SearchInputVisible => {
                ensure(page.is_search_input_visible().await?, || {
                    "no visible search input on the home page".to_string()
                })?;
            }
            UiCase::TwoSearchesInRow => {
                page.search(CYRILLIC_QUERY).await?;
                let first_count = page.get_results_count().await?;

                page.search(DIGIT_QUERY).await?;
                let second_count = page.get_results_count().await?;

                expect_results(first_count, CYRILLIC_QUERY)?;
                expect_results(second_count, DIGIT_QUERY)?;
            }
        }
        Ok(CaseOutcome::Passed)
    }
}

fn expect_results(count: usize, query: &str) -> Result<()> {
    ensure(count > 0, || format!("search for '{}' returned no results", query))
}
