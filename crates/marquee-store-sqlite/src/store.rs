//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::path::PathBuf;

use marquee_core::{
  grid::ResultGrid, query::QueryPlan, record::MovieRecord, store::CatalogStore,
};
use rusqlite::Connection;

use crate::{Error, Result, schema::SCHEMA, sql};

enum Location {
  Disk(PathBuf),
  Memory,
}

impl Location {
  fn connect(&self) -> rusqlite::Result<Connection> {
    match self {
      Location::Disk(path) => Connection::open(path),
      Location::Memory => Connection::open_in_memory(),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A movie catalog backed by a single SQLite database.
///
/// The connection is opened lazily on first use, probed before every
/// operation, and transparently re-established if the probe fails. The
/// store itself never retries a failed statement — callers re-invoke
/// the operation if they want another attempt.
pub struct SqliteStore {
  location: Location,
  conn:     Option<Connection>,
}

impl SqliteStore {
  /// Point the store at `path`. No I/O happens until the first
  /// operation.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    Self { location: Location::Disk(path.into()), conn: None }
  }

  /// An in-memory store — useful for testing. Reconnecting an
  /// in-memory store starts from an empty database.
  pub fn open_in_memory() -> Self {
    Self { location: Location::Memory, conn: None }
  }

  /// Return a live connection, reconnecting on a failed probe.
  fn connection(&mut self) -> Result<&Connection> {
    let conn = match self.conn.take() {
      Some(conn) if conn.query_row("SELECT 1", [], |_| Ok(())).is_ok() => conn,
      _ => {
        tracing::debug!("opening database connection");
        self.location.connect().map_err(Error::Connection)?
      }
    };
    Ok(self.conn.insert(conn))
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  fn ensure_table(&mut self) -> Result<()> {
    self
      .connection()?
      .execute_batch(SCHEMA)
      .map_err(Error::query("schema DDL"))
  }

  fn clear(&mut self) -> Result<()> {
    let deleted = self
      .connection()?
      .execute("DELETE FROM movies", [])
      .map_err(Error::query("DELETE FROM movies"))?;
    tracing::debug!(deleted, "cleared movie table");
    Ok(())
  }

  fn insert_batch(&mut self, records: &[MovieRecord]) -> Result<usize> {
    if records.is_empty() {
      return Ok(0);
    }

    // A batch larger than the per-statement variable cap is written in
    // several statements; each commits on its own.
    for chunk in records.chunks(sql::MAX_ROWS_PER_STATEMENT) {
      let statement = sql::render_insert(chunk.len());
      let params: Vec<rusqlite::types::Value> =
        chunk.iter().flat_map(sql::record_params).collect();

      self
        .connection()?
        .execute(&statement, rusqlite::params_from_iter(params))
        .map_err(Error::query(statement.as_str()))?;
    }

    Ok(records.len())
  }

  fn select(&mut self, plan: &QueryPlan) -> Result<ResultGrid> {
    let (statement, params) = sql::render_select(plan);
    let width = plan.columns.len();

    let conn = self.connection()?;
    let mut stmt = conn
      .prepare(&statement)
      .map_err(Error::query(statement.as_str()))?;

    let rows = stmt
      .query_map(rusqlite::params_from_iter(params), |row| {
        (0..width)
          .map(|i| row.get_ref(i).map(sql::display_value))
          .collect::<rusqlite::Result<Vec<String>>>()
      })
      .map_err(Error::query(statement.as_str()))?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(Error::query(statement.as_str()))?;

    let mut grid =
      ResultGrid::new(plan.columns.iter().map(|c| c.as_sql().to_owned()).collect());
    for row in rows {
      grid.push_row(row);
    }

    tracing::debug!(rows = grid.rows.len(), %statement, "executed select");
    Ok(grid)
  }
}
