//! Error type for `marquee-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] marquee_core::Error),

  /// The database could not be opened, or the liveness probe failed and
  /// reconnecting did not help.
  #[error("connection error: {0}")]
  Connection(rusqlite::Error),

  /// SQLite rejected a statement; carries the statement for diagnosis.
  #[error("statement failed ({statement}): {source}")]
  Query {
    statement: String,
    source:    rusqlite::Error,
  },
}

impl Error {
  pub(crate) fn query(statement: impl Into<String>) -> impl FnOnce(rusqlite::Error) -> Error {
    let statement = statement.into();
    move |source| Error::Query { statement, source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
