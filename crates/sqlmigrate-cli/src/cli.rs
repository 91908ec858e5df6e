use std::path::{Path, PathBuf};

use clap::Parser;
use sqlmigrate_config::{LogFormat, MigrateConfig};

#[derive(Parser, Debug)]
#[command(
    name = "sqlmigrate",
    version,
    about = "Apply SQL statements to a SQLite database inside a single transaction",
    long_about = "Apply SQL statements to a SQLite database inside a single transaction.\n\n\
                  With MIGRATION_FILE and DATABASE_FILE, statements are read from the file, \
                  separated by blank lines. With no arguments, the embedded schema is applied \
                  to the default database."
)]
pub struct Cli {
    /// Migration file; statements are separated by a blank line
    #[arg(value_name = "MIGRATION_FILE", requires = "database_file")]
    pub migration_file: Option<PathBuf>,

    /// SQLite database file, created if absent
    #[arg(value_name = "DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Config file (.toml, .yml or .yaml)
    #[arg(long, env = "SQLMIGRATE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database the embedded schema is applied to
    #[arg(long, value_name = "PATH", conflicts_with = "migration_file")]
    pub database: Option<PathBuf>,

    /// Print the statements that would run and exit without opening the database
    #[arg(long)]
    pub dry_run: bool,

    /// Log output format: pretty or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a run applies, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File {
        migration: PathBuf,
        database: PathBuf,
    },
    Embedded {
        database: PathBuf,
    },
}

impl Target {
    pub fn database(&self) -> &Path {
        match self {
            Target::File { database, .. } | Target::Embedded { database } => database,
        }
    }
}

impl Cli {
    pub fn target(&self, config: &MigrateConfig) -> Target {
        match (&self.migration_file, &self.database_file) {
            (Some(migration), Some(database)) => Target::File {
                migration: migration.clone(),
                database: database.clone(),
            },
            _ => Target::Embedded {
                database: self
                    .database
                    .clone()
                    .unwrap_or_else(|| config.default_database.clone()),
            },
        }
    }
}
