//! [`CsvSource`] — a header-verified CSV record stream.

use std::{fs::File, io::Read, path::Path};

use csv::StringRecord;
use marquee_core::record::{FieldMap, MovieRecord, prepare};

use crate::{Error, Result};

/// A CSV stream whose header line has been checked against a field map.
///
/// Construction fails fast with [`Error::Schema`] if any mapped source
/// field is absent — before a single data row is read.
#[derive(Debug)]
pub struct CsvSource<R: Read> {
  reader:  csv::Reader<R>,
  headers: StringRecord,
  map:     FieldMap,
}

impl CsvSource<File> {
  pub fn open(path: impl AsRef<Path>, map: &FieldMap) -> Result<Self> {
    Self::from_reader(File::open(path)?, map)
  }
}

impl<R: Read> CsvSource<R> {
  pub fn from_reader(reader: R, map: &FieldMap) -> Result<Self> {
    // Flexible: a short row reads as absent trailing fields, a long
    // row's extras are ignored. Rows are never rejected for shape.
    let mut reader = csv::ReaderBuilder::new()
      .has_headers(true)
      .flexible(true)
      .from_reader(reader);
    let headers = reader.headers()?.clone();

    let missing = map.missing_from(headers.iter());
    if !missing.is_empty() {
      return Err(Error::Schema(marquee_core::Error::MissingFields(missing)));
    }

    Ok(Self { reader, headers, map: map.clone() })
  }

  /// Stream prepared records.
  ///
  /// Fields are looked up by header name, not position, so column order
  /// in the file does not matter.
  pub fn records(&mut self) -> impl Iterator<Item = Result<MovieRecord, csv::Error>> + '_ {
    let headers = &self.headers;
    let map = &self.map;
    self.reader.records().map(move |raw| {
      raw.map(|raw| {
        prepare(
          |field| {
            headers
              .iter()
              .position(|h| h == field)
              .and_then(|i| raw.get(i))
          },
          map,
        )
      })
    })
  }
}
