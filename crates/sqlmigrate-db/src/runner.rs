use std::time::{Duration, Instant};

use rusqlite::{Connection, Transaction};
use sqlmigrate_common::{Error, Result};
use tracing::{debug, info, warn};

use crate::source::StatementSource;
use crate::statement::Statement;

/// Outcome of a committed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub statements_applied: usize,
    pub elapsed: Duration,
}

/// Applies every statement of a source inside one transaction.
///
/// A run is single-pass: either every statement commits or the transaction is
/// rolled back and an error describing the first failure is returned. Exiting
/// the process on failure is left to the caller.
pub struct Migrator<'c, S> {
    conn: &'c mut Connection,
    source: S,
}

impl<'c, S: StatementSource> Migrator<'c, S> {
    pub fn new(conn: &'c mut Connection, source: S) -> Self {
        Self { conn, source }
    }

    pub fn migrate(self) -> Result<MigrationReport> {
        let started = Instant::now();
        debug!("applying {}", self.source.describe());

        let tx = self
            .conn
            .transaction()
            .map_err(|e| Error::Begin(e.to_string()))?;

        let statements = match self.source.statements() {
            Ok(statements) => statements,
            Err(e) => {
                rollback_quietly(tx);
                return Err(e);
            }
        };

        let total = statements.len();
        for (i, statement) in statements.iter().enumerate() {
            let index = i + 1;
            info!("Running statement {index}/{total}:\n{statement}\n");

            if let Err(e) = tx.execute_batch(statement.as_str()) {
                debug!("statement {index}/{total} failed: {e}");
                rollback_quietly(tx);
                return Err(Error::Statement {
                    index,
                    reason: e.to_string(),
                });
            }
        }

        // A failed COMMIT drops the guard, which rolls back what is still open.
        tx.commit().map_err(|e| {
            debug!("commit failed: {e}");
            Error::Commit(e.to_string())
        })?;

        let report = MigrationReport {
            statements_applied: total,
            elapsed: started.elapsed(),
        };
        debug!(
            "committed {} statements from {} in {:?}",
            report.statements_applied,
            self.source.describe(),
            report.elapsed
        );
        info!("Migration successfully applied.");
        Ok(report)
    }
}

/// The statements a run would apply, without touching any database.
pub fn plan<S: StatementSource + ?Sized>(source: &S) -> Result<Vec<Statement>> {
    let statements = source.statements()?;
    debug!(
        "planned {} statements from {}",
        statements.len(),
        source.describe()
    );
    Ok(statements)
}

/// Roll back on a failure path. A rollback error must not mask the original
/// failure, so it is only logged.
fn rollback_quietly(tx: Transaction<'_>) {
    if let Err(e) = tx.rollback() {
        warn!("rollback failed: {e}");
    }
}
