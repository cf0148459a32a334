//! Mezzanine CLI entry point.

use std::{fmt::Write as _, fs, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use mezzanine_cli::{Args, error_adapter::to_reportables};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting mezzanine");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = mezzanine_cli::run(&args) {
        // Decode errors point into the input document
        let source = fs::read_to_string(args.command.input()).ok();
        let reporter = miette::GraphicalReportHandler::new();

        for reportable in to_reportables(&err, source.as_deref()) {
            let mut writer = String::new();
            if reporter.render_report(&mut writer, &reportable).is_err() {
                writer.clear();
                let _ = write!(writer, "{reportable}");
            }

            error!("{writer}");
        }

        process::exit(1);
    }

    info!("Completed successfully");
}
