//! Error types for `marquee-ingest`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot open source file: {0}")]
  Io(#[from] std::io::Error),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  /// Required source fields are absent from the header line.
  /// Raised at stream-open time, before any table mutation.
  #[error(transparent)]
  Schema(marquee_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
