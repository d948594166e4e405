// Main application entry point.
// Parses the command line, sets up logging, then runs the two pre-build
// procedures in order: stamp the build header, seed default data files.

use colored::*;
use std::process::exit;
use std::time::Instant;

use incubator_prebuild::config::Config;
use incubator_prebuild::util::{format_duration, status};
use incubator_prebuild::{cli, seed, stamp, telemetry};
use tracing::{debug, info};

/// Exit code when the build header cannot be written.
const EXIT_STAMP_FAILED: i32 = 2;
/// Exit code when at least one seed file could not be created.
const EXIT_SEED_FAILED: i32 = 3;

fn report_error(what: &str, err: &anyhow::Error) {
    eprintln!("{} {what}: {err:#}", "error:".red().bold());
}

fn main() {
    let args = cli::parse_args();
    let cfg = Config::from(&args);
    telemetry::init_tracing(&cfg);

    let started = Instant::now();

    // --- Version Stamper ---
    // A missing header breaks compilation, so any failure aborts the step.
    match stamp::stamp(cfg.project_root()) {
        Ok(record) => status(format!("Build info updated: {record}")),
        Err(e) => {
            report_error("failed to stamp build info", &e);
            exit(EXIT_STAMP_FAILED);
        }
    }

    // --- Default Asset Seeder ---
    let report = match seed::seed_defaults(cfg.project_root()) {
        Ok(report) => report,
        Err(e) => {
            report_error("failed to prepare data directory", &e);
            exit(EXIT_SEED_FAILED);
        }
    };
    for entry in report.created() {
        status(format!(
            "Created default {} file: {}",
            entry.seed.kind,
            entry.path.display()
        ));
    }
    debug!(
        present = report.entries().len() - report.created().count() - report.failures().count(),
        "Seed files already present"
    );
    if let Err(e) = report.into_result() {
        report_error("failed to seed default files", &e);
        exit(EXIT_SEED_FAILED);
    }

    info!(elapsed = %format_duration(started.elapsed()), "Pre-build step finished");
}
