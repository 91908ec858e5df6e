//! sqlmigrate - one-shot transactional SQL migration runner for SQLite.
//!
//! Applies either a blank-line separated migration file or the embedded
//! schema inside a single transaction, then exits.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use sqlmigrate_common::Error;
use sqlmigrate_config::{ConfigLoader, MigrateConfig};
use sqlmigrate_db::{
    ConnectionOptions, EmbeddedSource, FileSource, Migrator, StatementSource, open_database, plan,
};
use tracing::error;

mod banner;
mod cli;
mod telemetry;

use cli::{Cli, Target};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging is not up yet, so config problems go straight to stderr.
    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sqlmigrate: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init(&config.log, cli.log_format, cli.verbose) {
        eprintln!("sqlmigrate: failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &MigrateConfig) -> Result<()> {
    let target = cli.target(config);
    let source: Box<dyn StatementSource> = match &target {
        Target::File { migration, .. } => Box::new(FileSource::new(migration)),
        Target::Embedded { .. } => Box::new(EmbeddedSource),
    };

    if cli.dry_run {
        let statements = plan(&*source)?;
        banner::print_plan(&source.describe(), target.database(), &statements);
        return Ok(());
    }

    let options = ConnectionOptions {
        foreign_keys: config.foreign_keys,
        journal_mode: config.journal_mode.clone(),
    };
    let mut conn = open_database(target.database(), &options)?;

    Migrator::new(&mut conn, source).migrate()?;
    Ok(())
}

/// The single log line reported for a failed run.
///
/// Only a failed statement is known to have been rolled back; after a failed
/// commit the outcome is up to the engine.
fn failure_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<Error>() {
        Some(Error::Statement { .. }) => format!("migration aborted, changes rolled back: {e:#}"),
        Some(Error::Commit(_)) => format!("migration aborted at commit: {e:#}"),
        _ => format!("{e:#}"),
    }
}
