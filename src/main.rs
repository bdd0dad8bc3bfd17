use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use kinopoisk_suite::runner::list_cases;
use kinopoisk_suite::{Suite, SuiteConfig, SuiteRunner};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("kinopoisk-suite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Runs the Kinopoisk API and UI test cases")
        .arg(
            Arg::new("suite")
                .long("suite")
                .short('s')
                .value_name("SUITE")
                .value_parser(["api", "ui", "all"])
                .default_value("all")
                .help("Which cases to run"),
        )
        .arg(
            Arg::new("case")
                .long("case")
                .short('c')
                .value_name("NAME")
                .help("Only run cases whose name contains NAME"),
        )
        .arg(
            Arg::new("headed")
                .long("headed")
                .help("Show the browser window")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write a JSON report to PATH"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List the selected cases and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log at debug level")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kinopoisk_suite={},warn", default_level)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let suite: Suite = matches
        .get_one::<String>("suite")
        .map(String::as_str)
        .unwrap_or("all")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let filter = matches.get_one::<String>("case").map(String::as_str);

    if matches.get_flag("list") {
        for (case_suite, name, title) in list_cases(suite, filter) {
            println!("{}::{}  {}", case_suite, name, title);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = SuiteConfig::from_env().context("failed to load configuration")?;
    if matches.get_flag("headed") {
        config.browser.headless = false;
    }

    info!(
        "API: {} | site: {} | key: {}",
        config.api_base_url,
        config.ui_base_url,
        if config.api_key.is_some() { "set" } else { "missing" }
    );

    let report = SuiteRunner::new(config).run(suite, filter).await;

    if let Some(path) = matches.get_one::<PathBuf>("report") {
        report
            .write_json(path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    println!(
        "{} passed, {} failed, {} skipped of {} ({} ms)",
        report.passed,
        report.failed,
        report.skipped,
        report.total(),
        report.duration_ms
    );

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
