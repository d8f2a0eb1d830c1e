use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

use crate::check::{run_check, CHECK_NAME};
use crate::cli::args::Cli;
use crate::config::load::{load_file_config, resolve_config};
use crate::config::model::{CheckConfig, FileConfig};
use crate::types::{OverallResult, Status};

pub mod args;

/// Parse arguments, run the check once and return the plugin exit code.
pub fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => Status::Unknown.exit_code(),
            };
        }
    };
    init_tracing(cli.verbose);

    let overall = match build_config(&cli) {
        Ok(config) => run_check(&config),
        Err(err) => OverallResult::unknown(format!("{:#}", err)),
    };
    print_result(&overall);
    overall.status.exit_code()
}

fn build_config(cli: &Cli) -> Result<CheckConfig> {
    let file = match &cli.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };
    Ok(resolve_config(file, cli.overrides())?)
}

pub fn format_result(overall: &OverallResult) -> String {
    // UNKNOWN only comes from fatal errors, which carry a one-line reason.
    if overall.status == Status::Unknown {
        format!("{} {}: {}", CHECK_NAME, overall.status, overall.report)
    } else if overall.report.is_empty() {
        format!("{} {}:", CHECK_NAME, overall.status)
    } else {
        format!("{} {}: \n\n{}", CHECK_NAME, overall.status, overall.report)
    }
}

fn print_result(overall: &OverallResult) {
    println!("{}", format_result(overall));
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
