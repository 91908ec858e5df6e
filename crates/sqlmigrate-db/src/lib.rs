pub mod database;
pub mod runner;
pub mod schema;
pub mod source;
pub mod statement;

pub use database::{ConnectionOptions, open_database, open_in_memory};
pub use runner::{MigrationReport, Migrator, plan};
pub use schema::{ObjectKind, SchemaStatement, embedded_schema, schema_version};
pub use source::{EmbeddedSource, FileSource, STATEMENT_DELIMITER, StatementSource, split_statements};
pub use statement::Statement;
