//! Query planning: translate a [`SearchSpec`] into a [`QueryPlan`].
//!
//! The plan is abstract — a storage backend renders it into SQL text.
//! Filter values travel as data and must be bound as parameters by the
//! backend, never interpolated into statement text.

use std::str::FromStr;

use crate::{error::Error, record::Column};

/// Hard cap on result size, applied to every plan.
pub const RESULT_LIMIT: u32 = 500;

/// Columns returned when the caller selects none.
pub const DEFAULT_COLUMNS: [Column; 5] = [
  Column::Title,
  Column::Year,
  Column::Genre,
  Column::Rating,
  Column::Director,
];

// ─── Caller-facing selectors ─────────────────────────────────────────────────

/// Which column a free-text search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
  Genre,
  Year,
  Rating,
  Director,
  Actor,
}

impl SearchMode {
  /// Fixed mode-to-column lookup. Actor searches match the lead star.
  pub fn column(self) -> Column {
    match self {
      SearchMode::Genre => Column::Genre,
      SearchMode::Year => Column::Year,
      SearchMode::Rating => Column::Rating,
      SearchMode::Director => Column::Director,
      SearchMode::Actor => Column::Star1,
    }
  }
}

impl FromStr for SearchMode {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "genre" => Ok(SearchMode::Genre),
      "year" => Ok(SearchMode::Year),
      "rating" => Ok(SearchMode::Rating),
      "director" => Ok(SearchMode::Director),
      "actor" => Ok(SearchMode::Actor),
      other => Err(Error::UnknownSearchMode(other.to_owned())),
    }
  }
}

/// A caller-facing output-column selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey {
  Title,
  Year,
  Genre,
  Rating,
  Director,
  Stars,
}

impl ColumnKey {
  /// Fixed key-to-column lookup. `Stars` selects the lead star column.
  pub fn column(self) -> Column {
    match self {
      ColumnKey::Title => Column::Title,
      ColumnKey::Year => Column::Year,
      ColumnKey::Genre => Column::Genre,
      ColumnKey::Rating => Column::Rating,
      ColumnKey::Director => Column::Director,
      ColumnKey::Stars => Column::Star1,
    }
  }
}

impl FromStr for ColumnKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "title" => Ok(ColumnKey::Title),
      "year" => Ok(ColumnKey::Year),
      "genre" => Ok(ColumnKey::Genre),
      "rating" => Ok(ColumnKey::Rating),
      "director" => Ok(ColumnKey::Director),
      "stars" => Ok(ColumnKey::Stars),
      other => Err(Error::UnknownColumnKey(other.to_owned())),
    }
  }
}

/// What the caller asked for — an explicit value, never ambient state.
#[derive(Debug, Clone, Default)]
pub struct SearchSpec {
  /// `None` falls back to matching on the title.
  pub mode:    Option<SearchMode>,
  /// Free text; empty means "no predicate".
  pub term:    String,
  /// Selected output columns; empty means "use the default set".
  pub columns: Vec<ColumnKey>,
}

// ─── Plan ────────────────────────────────────────────────────────────────────

/// The single comparison a filter applies.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmp {
  Equals(i64),
  AtLeast(i64),
  /// SQL LIKE pattern, wildcard markers already applied.
  Contains(String),
}

/// One (column, comparison) predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
  pub column: Column,
  pub cmp:    Cmp,
}

/// An executable description of a catalog query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
  /// Non-empty, in selection order.
  pub columns:  Vec<Column>,
  pub filter:   Option<Filter>,
  /// Sort column, always descending.
  pub order_by: Option<Column>,
  pub limit:    u32,
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Build the query plan for a search request.
pub fn build(spec: &SearchSpec) -> QueryPlan {
  let columns = resolve_columns(&spec.columns);

  let term = spec.term.trim();
  let filter = if term.is_empty() {
    None
  } else {
    let column = spec.mode.map_or(Column::Title, SearchMode::column);
    Some(Filter { column, cmp: classify(column, term) })
  };

  let order_by = if columns.contains(&Column::Rating) {
    Some(Column::Rating)
  } else if columns.contains(&Column::Year) {
    Some(Column::Year)
  } else {
    None
  };

  QueryPlan { columns, filter, order_by, limit: RESULT_LIMIT }
}

fn resolve_columns(keys: &[ColumnKey]) -> Vec<Column> {
  if keys.is_empty() {
    return DEFAULT_COLUMNS.to_vec();
  }
  let mut columns = Vec::with_capacity(keys.len());
  for key in keys {
    let column = key.column();
    if !columns.contains(&column) {
      columns.push(column);
    }
  }
  columns
}

/// Pick the comparison form for a term against a target column.
///
/// Numeric columns get range/equality treatment when the term looks
/// numeric; everything else — including non-numeric terms against
/// numeric columns — is a substring match.
fn classify(column: Column, term: &str) -> Cmp {
  if column.is_numeric() {
    if let Some(prefix) = term.strip_suffix('+') {
      if is_digits(prefix) {
        if let Ok(n) = prefix.parse() {
          return Cmp::AtLeast(n);
        }
      }
    }
    if is_digits(term) {
      if let Ok(n) = term.parse() {
        return Cmp::Equals(n);
      }
    }
  }
  Cmp::Contains(format!("%{term}%"))
}

fn is_digits(s: &str) -> bool {
  !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
