//! Display-ready result grids and CSV export.

use std::io::Write;

/// A query result shaped for display: a header row plus string cells.
///
/// Every row has exactly `headers.len()` cells. NULL database values
/// render as the empty string, never as a literal "None".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultGrid {
  pub headers: Vec<String>,
  pub rows:    Vec<Vec<String>>,
}

impl ResultGrid {
  pub fn new(headers: Vec<String>) -> Self {
    Self { headers, rows: Vec::new() }
  }

  /// Append a row; it must have one cell per header.
  pub fn push_row(&mut self, row: Vec<String>) {
    debug_assert_eq!(row.len(), self.headers.len());
    self.rows.push(row);
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Write the grid as CSV: the header line first, then one line per
  /// row. Quoting and escaping are handled by the writer.
  pub fn write_csv<W: Write>(&self, sink: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(&self.headers)?;
    for row in &self.rows {
      writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> ResultGrid {
    let mut grid = ResultGrid::new(vec!["title".into(), "rating".into()]);
    grid.push_row(vec!["Heat".into(), "8.3".into()]);
    grid.push_row(vec!["Comma, The Movie".into(), "".into()]);
    grid.push_row(vec!["Say \"hi\"".into(), "7\n.5".into()]);
    grid
  }

  #[test]
  fn csv_round_trips_awkward_cells() {
    let grid = sample();
    let mut buffer = Vec::new();
    grid.write_csv(&mut buffer).unwrap();

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers: Vec<String> =
      reader.headers().unwrap().iter().map(str::to_owned).collect();
    assert_eq!(headers, grid.headers);

    let rows: Vec<Vec<String>> = reader
      .records()
      .map(|r| r.unwrap().iter().map(str::to_owned).collect())
      .collect();
    assert_eq!(rows, grid.rows);
  }

  #[test]
  fn csv_header_line_comes_first() {
    let grid = ResultGrid::new(vec!["year".into()]);
    let mut buffer = Vec::new();
    grid.write_csv(&mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "year\n");
  }

  #[test]
  fn empty_cells_stay_empty() {
    let mut grid = ResultGrid::new(vec!["a".into(), "b".into()]);
    grid.push_row(vec!["".into(), "x".into()]);
    let mut buffer = Vec::new();
    grid.write_csv(&mut buffer).unwrap();

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(row.get(0), Some(""));
    assert_eq!(row.get(1), Some("x"));
  }
}
