//! Error types for `marquee-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The source's header line lacks fields the field map requires.
  /// Raised at stream-open time, before any row is read.
  #[error("source is missing expected fields: {0:?}")]
  MissingFields(Vec<String>),

  #[error("unknown column key: {0:?}")]
  UnknownColumnKey(String),

  #[error("unknown search mode: {0:?}")]
  UnknownSearchMode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
