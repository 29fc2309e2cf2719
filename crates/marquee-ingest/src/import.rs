//! The end-to-end import driver: CSV file in, committed batches out.

use std::path::Path;

use marquee_core::{
  loader::{BatchLoader, DEFAULT_BATCH_SIZE},
  record::FieldMap,
  store::CatalogStore,
};

use crate::{Error, Result, source::CsvSource};

/// Policy knobs for one import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
  /// Clear existing rows before loading. Never implied.
  pub truncate:   bool,
  /// Records per insert round-trip.
  pub batch_size: usize,
}

impl Default for ImportOptions {
  fn default() -> Self {
    Self { truncate: false, batch_size: DEFAULT_BATCH_SIZE }
  }
}

/// Progress summary for a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
  pub rows_read:    usize,
  pub rows_written: usize,
  pub batches:      usize,
}

/// Load the CSV file at `path` into `store`.
///
/// The header check runs before any table mutation. A failed flush
/// aborts the run; rows committed by earlier batches stay committed,
/// and the loader's total is the authoritative checkpoint.
pub fn run_import<S: CatalogStore>(
  store: &mut S,
  path: &Path,
  map: &FieldMap,
  options: &ImportOptions,
) -> Result<ImportReport> {
  let mut source = CsvSource::open(path, map)?;

  store.ensure_table().map_err(Error::store)?;
  if options.truncate {
    store.clear().map_err(Error::store)?;
    tracing::info!("cleared existing rows");
  }

  let mut loader = BatchLoader::with_capacity(store, options.batch_size);
  let mut rows_read = 0usize;
  let mut batches = 0usize;

  for record in source.records() {
    let record = record?;
    rows_read += 1;
    if let Some(written) = loader.push(record).map_err(Error::store)? {
      batches += 1;
      tracing::info!(written, total = loader.total(), "flushed batch");
    }
  }

  let written = loader.flush().map_err(Error::store)?;
  if written > 0 {
    batches += 1;
    tracing::info!(written, total = loader.total(), "flushed final batch");
  }

  Ok(ImportReport {
    rows_read,
    rows_written: loader.total(),
    batches,
  })
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use marquee_core::{grid::ResultGrid, query::QueryPlan, record::MovieRecord};

  use super::*;

  /// Logs every call so tests can assert ordering and batch shape.
  #[derive(Default)]
  struct RecordingStore {
    ensured:   bool,
    cleared:   bool,
    batches:   Vec<usize>,
    fail_from: Option<usize>,
  }

  impl CatalogStore for RecordingStore {
    type Error = std::io::Error;

    fn ensure_table(&mut self) -> Result<(), Self::Error> {
      self.ensured = true;
      Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
      self.cleared = true;
      Ok(())
    }

    fn insert_batch(&mut self, records: &[MovieRecord]) -> Result<usize, Self::Error> {
      if self.fail_from.is_some_and(|n| self.batches.len() >= n) {
        return Err(std::io::Error::other("batch refused"));
      }
      self.batches.push(records.len());
      Ok(records.len())
    }

    fn select(&mut self, _plan: &QueryPlan) -> Result<ResultGrid, Self::Error> {
      Ok(ResultGrid::default())
    }
  }

  fn csv_file(rows: usize) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
      file,
      "Series_Title,Released_Year,Genre,IMDB_Rating,Director,Star1,Star2,Star3"
    )
    .unwrap();
    for i in 0..rows {
      writeln!(file, "Movie {i},2000,Drama,7.5,Someone,Lead,,").unwrap();
    }
    file.flush().unwrap();
    file
  }

  #[test]
  fn batches_are_sized_and_counted() {
    let file = csv_file(2_500);
    let mut store = RecordingStore::default();
    let options = ImportOptions { truncate: false, batch_size: 1_000 };

    let report =
      run_import(&mut store, file.path(), &FieldMap::default(), &options).unwrap();

    assert_eq!(store.batches, vec![1_000, 1_000, 500]);
    assert_eq!(
      report,
      ImportReport { rows_read: 2_500, rows_written: 2_500, batches: 3 }
    );
  }

  #[test]
  fn truncate_is_explicit() {
    let file = csv_file(1);
    let mut store = RecordingStore::default();

    run_import(&mut store, file.path(), &FieldMap::default(), &ImportOptions::default())
      .unwrap();
    assert!(store.ensured);
    assert!(!store.cleared);

    let mut store = RecordingStore::default();
    let options = ImportOptions { truncate: true, ..Default::default() };
    run_import(&mut store, file.path(), &FieldMap::default(), &options).unwrap();
    assert!(store.cleared);
  }

  #[test]
  fn bad_headers_abort_before_any_mutation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Title,Year\nHeat,1995").unwrap();
    file.flush().unwrap();

    let mut store = RecordingStore::default();
    let err = run_import(
      &mut store,
      file.path(),
      &FieldMap::default(),
      &ImportOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Schema(_)));
    assert!(!store.ensured);
    assert!(!store.cleared);
    assert!(store.batches.is_empty());
  }

  #[test]
  fn flush_failure_aborts_but_keeps_prior_batches() {
    let file = csv_file(250);
    let mut store = RecordingStore {
      fail_from: Some(2),
      ..Default::default()
    };
    let options = ImportOptions { truncate: false, batch_size: 100 };

    let err =
      run_import(&mut store, file.path(), &FieldMap::default(), &options).unwrap_err();

    assert!(matches!(err, Error::Store(_)));
    assert_eq!(store.batches, vec![100, 100]);
  }
}
