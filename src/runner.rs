//! Runs the selected cases and collects a pass/fail/skip report.

use crate::api::KinopoiskApiClient;
use crate::browser::{BrowserDriver, ChromeBrowser};
use crate::cases::{ApiCase, CaseOutcome, Suite, UiCase};
use crate::config::SuiteConfig;
use crate::errors::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Failed,
    Skipped,
}

/// Result of running a single case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    pub suite: Suite,
    pub name: String,
    pub title: String,
    pub status: CaseStatus,
    pub message: Option<String>,
    pub duration_ms: u64,
}

/// Result of a whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub cases: Vec<CaseReport>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            duration_ms: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
            cases: Vec::new(),
        }
    }

    fn record(&mut self, report: CaseReport) {
        match report.status {
            CaseStatus::Passed => self.passed += 1,
            CaseStatus::Failed => self.failed += 1,
            CaseStatus::Skipped => self.skipped += 1,
        }
        self.cases.push(report);
    }

    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Every case of `suite` whose name contains `filter`, as `(suite, name, title)`.
pub fn list_cases(suite: Suite, filter: Option<&str>) -> Vec<(Suite, &'static str, &'static str)> {
    let mut cases = Vec::new();
    if suite.includes_api() {
        cases.extend(
            selected_api_cases(filter)
                .into_iter()
                .map(|c| (Suite::Api, c.name(), c.title())),
        );
    }
    if suite.includes_ui() {
        cases.extend(
            selected_ui_cases(filter)
                .into_iter()
                .map(|c| (Suite::Ui, c.name(), c.title())),
        );
    }
    cases
}

fn matches_filter(name: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |f| name.contains(f))
}

fn selected_api_cases(filter: Option<&str>) -> Vec<ApiCase> {
    ApiCase::ALL
        .into_iter()
        .filter(|c| matches_filter(c.name(), filter))
        .collect()
}

fn selected_ui_cases(filter: Option<&str>) -> Vec<UiCase> {
    UiCase::ALL
        .into_iter()
        .filter(|c| matches_filter(c.name(), filter))
        .collect()
}

pub struct SuiteRunner {
    config: SuiteConfig,
}

impl SuiteRunner {
    pub fn new(config: SuiteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Runs the API cases, then the UI cases in one Chrome session.
    pub async fn run(&self, suite: Suite, filter: Option<&str>) -> RunReport {
        let start = Instant::now();
        let mut report = RunReport::new();
        info!("Run {} started (suite: {})", report.run_id, suite);

        if suite.includes_api() {
            self.run_api(&selected_api_cases(filter), &mut report).await;
        }

        if suite.includes_ui() {
            let cases = selected_ui_cases(filter);
            if !cases.is_empty() {
                match ChromeBrowser::launch(&self.config.browser) {
                    Ok(mut browser) => self.run_ui_session(&mut browser, &cases, &mut report).await,
                    Err(e) => {
                        error!("Cannot run UI cases: {}", e);
                        for case in cases {
                            report.record(CaseReport {
                                suite: Suite::Ui,
                                name: case.name().to_string(),
                                title: case.title().to_string(),
                                status: CaseStatus::Failed,
                                message: Some(e.to_string()),
                                duration_ms: 0,
                            });
                        }
                    }
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Test Results: {} passed, {} failed, {} skipped ({} ms)",
            report.passed, report.failed, report.skipped, report.duration_ms
        );
        report
    }

    pub async fn run_api(&self, cases: &[ApiCase], report: &mut RunReport) {
        let client = match KinopoiskApiClient::new(&self.config) {
            Ok(client) => client,
            Err(e) => {
                error!("Cannot build API client: {}", e);
                for case in cases {
                    report.record(CaseReport {
                        suite: Suite::Api,
                        name: case.name().to_string(),
                        title: case.title().to_string(),
                        status: CaseStatus::Failed,
                        message: Some(e.to_string()),
                        duration_ms: 0,
                    });
                }
                return;
            }
        };

        for case in cases {
            let result = run_case(Suite::Api, case.name(), case.title(), case.run(&client)).await;
            report.record(result);
        }
    }

    /// Runs the UI cases on `driver`, then releases it.
    pub async fn run_ui_session<D: BrowserDriver>(
        &self,
        driver: &mut D,
        cases: &[UiCase],
        report: &mut RunReport,
    ) {
        self.run_ui(&*driver, cases, report).await;
        if let Err(e) = driver.close().await {
            warn!("Failed to close browser: {}", e);
        }
    }

    /// Runs UI cases sequentially against one shared driver.
    pub async fn run_ui(&self, driver: &dyn BrowserDriver, cases: &[UiCase], report: &mut RunReport) {
        for case in cases {
            let result = run_case(
                Suite::Ui,
                case.name(),
                case.title(),
                case.run(driver, &self.config),
            )
            .await;
            report.record(result);
        }
    }
}

async fn run_case<F>(suite: Suite, name: &str, title: &str, case: F) -> CaseReport
where
    F: Future<Output = Result<CaseOutcome>>,
{
    let span = info_span!("case", %suite, name);
    let start = Instant::now();
    let outcome = case.instrument(span.clone()).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    let _entered = span.enter();
    let (status, message) = match outcome {
        Ok(CaseOutcome::Passed) => {
            info!("✓ {}::{} ({} ms)", suite, name, duration_ms);
            (CaseStatus::Passed, None)
        }
        Ok(CaseOutcome::Skipped(reason)) => {
            warn!("- {}::{} skipped: {}", suite, name, reason);
            (CaseStatus::Skipped, Some(reason))
        }
        Err(e) => {
            error!("✗ {}::{} - {}", suite, name, e);
            (CaseStatus::Failed, Some(e.to_string()))
        }
    };

    CaseReport {
        suite,
        name: name.to_string(),
        title: title.to_string(),
        status,
        message,
        duration_ms,
    }
}
