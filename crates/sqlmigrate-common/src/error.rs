use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("failed to begin transaction: {0}")]
    Begin(String),

    #[error("statement source error: {0}")]
    Source(String),

    /// A statement failed while the run's transaction was open. `index` is 1-based.
    #[error("statement {index} failed: {reason}")]
    Statement { index: usize, reason: String },

    #[error("commit failed: {0}")]
    Commit(String),

}

impl Error {
    /// Whether the error happened after statements started applying.
    ///
    /// Setup errors (config, open, begin, source) leave the database untouched;
    /// fatal errors abort a run that was already mutating the transaction.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Statement { .. } | Error::Commit(_))
    }
}
