mod commands;
mod logging;

use std::process;

use bisync_core::{SyncEngine, SyncReport, TracingSink};
use clap::Parser;
use colored::*;
use commands::Cli;
use dotenv::dotenv;
use tracing::{error, info};

const LOGGING_SETUP_FAILED: i32 = 9;

fn main() {
    dotenv().ok();

    let args = Cli::parse();

    let guard = match logging::init_logger(args.logfile.as_deref(), args.rolling_logfile, args.debug)
    {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error configuring logging: {}", err);
            process::exit(LOGGING_SETUP_FAILED);
        }
    };

    info!("Starting bisync version {}", env!("CARGO_PKG_VERSION"));

    let code = match run(&args) {
        Ok(report) => {
            info!(
                "Synchronized {} with {} in {}",
                report.source_root.display(),
                report.destination_root.display(),
                format!("{:.2}s", report.duration.as_secs_f64()).green(),
            );
            info!(
                "{} copied, {} deleted",
                format!("{}", report.stats.copied().total()).cyan(),
                format!("{}", report.stats.deleted().total()).red(),
            );
            0
        }
        Err(err) => {
            error!("Error: {:#}", err);
            err.downcast_ref::<bisync_core::Error>()
                .map(|e| e.exit_code())
                .unwrap_or(1)
        }
    };

    // process::exit skips destructors; flush the file writer first.
    drop(guard);
    process::exit(code);
}

fn run(args: &Cli) -> anyhow::Result<SyncReport> {
    let config =
        bisync_core::config::load_configuration().map_err(bisync_core::Error::from)?;

    let mut options = config.sync;
    options.dry_run |= args.dry_run;
    options.hashing |= args.hashing;
    options.ignore_directory_attributes |= args.ignore_directory_attributes;
    options.silent |= args.silent;
    options.ignore_paths.extend(args.ignore.iter().cloned());
    if args.check_file.is_some() {
        options.require_path = args.check_file.clone();
    }

    if options.silent {
        info!("Silent logging");
    }
    if options.ignore_directory_attributes {
        info!("Ignoring directory attributes");
    }
    if options.hashing {
        info!("Using MD5 hashes to compare files");
    }

    let db_path = args
        .database_file
        .clone()
        .unwrap_or(config.database_path);

    let engine = SyncEngine::new(options).with_db_path(&db_path);
    let report = engine.sync(&args.source, &args.destination, &TracingSink)?;
    Ok(report)
}
