//! The movie record, its destination columns, and the source field map.

use crate::normalize;

// ─── Columns ─────────────────────────────────────────────────────────────────

/// A typed column of the `movies` table.
///
/// The set is closed; SQL statement text only ever contains names from
/// this enum, never caller-supplied strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
  Title,
  Year,
  Genre,
  Rating,
  Director,
  Star1,
  Star2,
  Star3,
}

impl Column {
  /// All destination columns, in insert order.
  pub const ALL: [Column; 8] = [
    Column::Title,
    Column::Year,
    Column::Genre,
    Column::Rating,
    Column::Director,
    Column::Star1,
    Column::Star2,
    Column::Star3,
  ];

  /// The column's name in SQL statements.
  pub fn as_sql(self) -> &'static str {
    match self {
      Column::Title => "title",
      Column::Year => "year",
      Column::Genre => "genre",
      Column::Rating => "rating",
      Column::Director => "director",
      Column::Star1 => "star1",
      Column::Star2 => "star2",
      Column::Star3 => "star3",
    }
  }

  /// Year and rating take numeric predicates; everything else is text.
  pub fn is_numeric(self) -> bool {
    matches!(self, Column::Year | Column::Rating)
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One fully-typed catalog entry.
///
/// Every field is optional: a malformed or missing source value degrades
/// to `None`, it never rejects the row. The row id is assigned by the
/// store and is opaque to this crate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieRecord {
  pub title:    Option<String>,
  pub year:     Option<i64>,
  pub genre:    Option<String>,
  pub rating:   Option<f64>,
  pub director: Option<String>,
  pub star1:    Option<String>,
  pub star2:    Option<String>,
  pub star3:    Option<String>,
}

// ─── Field map ───────────────────────────────────────────────────────────────

/// Ordered mapping from source field names (the CSV header line) to
/// destination columns. Source names need not match column names.
#[derive(Debug, Clone)]
pub struct FieldMap {
  entries: Vec<(String, Column)>,
}

impl Default for FieldMap {
  /// The IMDB-style export headers the stock catalog file ships with.
  fn default() -> Self {
    Self::new([
      ("Series_Title", Column::Title),
      ("Released_Year", Column::Year),
      ("Genre", Column::Genre),
      ("IMDB_Rating", Column::Rating),
      ("Director", Column::Director),
      ("Star1", Column::Star1),
      ("Star2", Column::Star2),
      ("Star3", Column::Star3),
    ])
  }
}

impl FieldMap {
  pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, Column)>) -> Self {
    Self {
      entries: entries.into_iter().map(|(s, c)| (s.into(), c)).collect(),
    }
  }

  pub fn entries(&self) -> &[(String, Column)] {
    &self.entries
  }

  /// Source fields required by this map but absent from `headers`.
  pub fn missing_from<'a>(&self, headers: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let present: Vec<&str> = headers.into_iter().collect();
    self
      .entries
      .iter()
      .map(|(source, _)| source)
      .filter(|source| !present.contains(&source.as_str()))
      .cloned()
      .collect()
  }
}

// ─── Preparation ─────────────────────────────────────────────────────────────

/// Map a raw source row to a typed record.
///
/// `get` looks a raw value up by source field name. A missing field or a
/// malformed scalar becomes `None`. Pure — safe to call concurrently on
/// independent rows.
pub fn prepare<'a>(get: impl Fn(&str) -> Option<&'a str>, map: &FieldMap) -> MovieRecord {
  let mut record = MovieRecord::default();
  for (source, column) in &map.entries {
    let raw = get(source);
    match column {
      Column::Title => record.title = raw.and_then(normalize::text),
      Column::Year => record.year = raw.and_then(normalize::int),
      Column::Genre => record.genre = raw.and_then(normalize::text),
      Column::Rating => record.rating = raw.and_then(normalize::decimal),
      Column::Director => record.director = raw.and_then(normalize::text),
      Column::Star1 => record.star1 = raw.and_then(normalize::text),
      Column::Star2 => record.star2 = raw.and_then(normalize::text),
      Column::Star3 => record.star3 = raw.and_then(normalize::text),
    }
  }
  record
}
