//! [`BatchLoader`] — buffered, batched writes into a [`CatalogStore`].

use crate::{record::MovieRecord, store::CatalogStore};

/// Records per insert round-trip unless the caller says otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Buffers prepared records and flushes them in fixed-size batches.
///
/// Each flush is one multi-row insert, committed before the next batch
/// starts; the committed total is the only checkpoint granularity. A
/// flush failure aborts the run — earlier batches stay committed, and
/// the failed batch stays buffered.
pub struct BatchLoader<'a, S: CatalogStore> {
  store:    &'a mut S,
  buffer:   Vec<MovieRecord>,
  capacity: usize,
  total:    usize,
}

impl<'a, S: CatalogStore> BatchLoader<'a, S> {
  pub fn new(store: &'a mut S) -> Self {
    Self::with_capacity(store, DEFAULT_BATCH_SIZE)
  }

  pub fn with_capacity(store: &'a mut S, capacity: usize) -> Self {
    let capacity = capacity.max(1);
    Self {
      store,
      buffer: Vec::with_capacity(capacity),
      capacity,
      total: 0,
    }
  }

  /// Buffer one record, flushing automatically at capacity.
  ///
  /// Returns `Some(rows_written)` when a flush was triggered.
  pub fn push(&mut self, record: MovieRecord) -> Result<Option<usize>, S::Error> {
    self.buffer.push(record);
    if self.buffer.len() >= self.capacity {
      self.flush().map(Some)
    } else {
      Ok(None)
    }
  }

  /// Drain the buffer in one insert round-trip.
  ///
  /// Must be called once more at end-of-run to write any partial batch.
  /// Returns the number of rows written (0 for an empty buffer).
  pub fn flush(&mut self) -> Result<usize, S::Error> {
    if self.buffer.is_empty() {
      return Ok(0);
    }
    let written = self.store.insert_batch(&self.buffer)?;
    self.buffer.clear();
    self.total += written;
    Ok(written)
  }

  /// Rows committed so far — the authoritative progress checkpoint.
  pub fn total(&self) -> usize {
    self.total
  }

  /// Records currently buffered and not yet written.
  pub fn buffered(&self) -> usize {
    self.buffer.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{grid::ResultGrid, query::QueryPlan};

  /// Records the size of every batch it receives; can be told to fail.
  #[derive(Default)]
  struct RecordingStore {
    batches: Vec<usize>,
    fail:    bool,
  }

  impl CatalogStore for RecordingStore {
    type Error = std::io::Error;

    fn ensure_table(&mut self) -> Result<(), Self::Error> {
      Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
      Ok(())
    }

    fn insert_batch(&mut self, records: &[MovieRecord]) -> Result<usize, Self::Error> {
      if self.fail {
        return Err(std::io::Error::other("flush refused"));
      }
      self.batches.push(records.len());
      Ok(records.len())
    }

    fn select(&mut self, _plan: &QueryPlan) -> Result<ResultGrid, Self::Error> {
      Ok(ResultGrid::default())
    }
  }

  #[test]
  fn auto_flush_at_capacity_and_final_drain() {
    let mut store = RecordingStore::default();
    {
      let mut loader = BatchLoader::with_capacity(&mut store, 1_000);
      for _ in 0..2_500 {
        loader.push(MovieRecord::default()).unwrap();
      }
      assert_eq!(loader.buffered(), 500);
      assert_eq!(loader.flush().unwrap(), 500);
      assert_eq!(loader.total(), 2_500);
    }
    assert_eq!(store.batches, vec![1_000, 1_000, 500]);
  }

  #[test]
  fn push_reports_flushes() {
    let mut store = RecordingStore::default();
    let mut loader = BatchLoader::with_capacity(&mut store, 2);

    assert_eq!(loader.push(MovieRecord::default()).unwrap(), None);
    assert_eq!(loader.push(MovieRecord::default()).unwrap(), Some(2));
    assert_eq!(loader.buffered(), 0);
  }

  #[test]
  fn flush_on_empty_buffer_writes_nothing() {
    let mut store = RecordingStore::default();
    {
      let mut loader = BatchLoader::with_capacity(&mut store, 10);
      assert_eq!(loader.flush().unwrap(), 0);
    }
    assert!(store.batches.is_empty());
  }

  #[test]
  fn failed_flush_keeps_buffer_and_total() {
    let mut store = RecordingStore { fail: true, ..Default::default() };
    let mut loader = BatchLoader::with_capacity(&mut store, 10);
    loader.push(MovieRecord::default()).unwrap();

    assert!(loader.flush().is_err());
    assert_eq!(loader.buffered(), 1);
    assert_eq!(loader.total(), 0);
  }

  #[test]
  fn zero_capacity_is_clamped() {
    let mut store = RecordingStore::default();
    let mut loader = BatchLoader::with_capacity(&mut store, 0);
    // Capacity 1: every push flushes immediately.
    assert_eq!(loader.push(MovieRecord::default()).unwrap(), Some(1));
  }
}
