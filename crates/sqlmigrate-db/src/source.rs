use std::path::PathBuf;

use sqlmigrate_common::{Error, Result};
use tracing::debug;

use crate::schema::{embedded_schema, schema_version};
use crate::statement::Statement;

/// Separator between statements in a migration file: one blank line.
pub const STATEMENT_DELIMITER: &str = "\n\n";

/// Produces the ordered statements a migration run applies.
pub trait StatementSource {
    fn statements(&self) -> Result<Vec<Statement>>;

    /// Short human-readable origin, used in log lines.
    fn describe(&self) -> String;
}

impl<T: StatementSource + ?Sized> StatementSource for &T {
    fn statements(&self) -> Result<Vec<Statement>> {
        (**self).statements()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: StatementSource + ?Sized> StatementSource for Box<T> {
    fn statements(&self) -> Result<Vec<Statement>> {
        (**self).statements()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Split migration file content on blank lines.
///
/// No trimming or SQL awareness: a blank line inside a string literal or a
/// comment splits too, and a trailing delimiter yields a trailing empty
/// statement.
pub fn split_statements(content: &str) -> Vec<Statement> {
    content.split(STATEMENT_DELIMITER).map(Statement::from).collect()
}

/// Statements read from a migration file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatementSource for FileSource {
    fn statements(&self) -> Result<Vec<Statement>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::Source(format!("failed to read {}: {e}", self.path.display())))?;

        let statements = split_statements(&content);
        debug!(
            "read {} statements from {}",
            statements.len(),
            self.path.display()
        );
        Ok(statements)
    }

    fn describe(&self) -> String {
        format!("migration file {}", self.path.display())
    }
}

/// The schema compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl StatementSource for EmbeddedSource {
    fn statements(&self) -> Result<Vec<Statement>> {
        Ok(embedded_schema()
            .iter()
            .map(|def| Statement::from(def.sql))
            .collect())
    }

    fn describe(&self) -> String {
        format!("embedded schema v{}", schema_version())
    }
}
