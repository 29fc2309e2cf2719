//! The [`CatalogStore`] trait — the storage boundary.
//!
//! Implemented by backends (e.g. `marquee-store-sqlite`). Higher layers
//! depend on this abstraction, not on any concrete backend. Methods
//! take `&mut self` so a backend can re-establish its connection on
//! demand; access is serialized by the single-threaded caller.

use crate::{grid::ResultGrid, query::QueryPlan, record::MovieRecord};

pub trait CatalogStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Idempotently create the movie table. Never alters the shape of an
  /// existing table.
  fn ensure_table(&mut self) -> Result<(), Self::Error>;

  /// Remove every row. Irreversible; callers opt in explicitly.
  fn clear(&mut self) -> Result<(), Self::Error>;

  /// Write `records` in one multi-row statement and commit.
  /// Returns the number of rows written.
  fn insert_batch(&mut self, records: &[MovieRecord]) -> Result<usize, Self::Error>;

  /// Execute a query plan and return the display grid.
  fn select(&mut self, plan: &QueryPlan) -> Result<ResultGrid, Self::Error>;
}
