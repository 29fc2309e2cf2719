//! Rendering query plans and records into SQL text plus bound values.
//!
//! Column names only ever come from the fixed [`Column`] enum; every
//! caller-supplied value is bound as a parameter, never spliced into
//! statement text.

use marquee_core::{
  query::{Cmp, QueryPlan},
  record::MovieRecord,
};
use rusqlite::types::{Value, ValueRef};

/// Render a plan into a SELECT statement and its parameters.
pub fn render_select(plan: &QueryPlan) -> (String, Vec<Value>) {
  let columns = plan
    .columns
    .iter()
    .map(|c| c.as_sql())
    .collect::<Vec<_>>()
    .join(", ");

  let mut sql = format!("SELECT {columns} FROM movies");
  let mut params = Vec::new();

  if let Some(filter) = &plan.filter {
    let column = filter.column.as_sql();
    match &filter.cmp {
      Cmp::Equals(n) => {
        sql.push_str(&format!(" WHERE {column} = ?1"));
        params.push(Value::Integer(*n));
      }
      Cmp::AtLeast(n) => {
        sql.push_str(&format!(" WHERE {column} >= ?1"));
        params.push(Value::Integer(*n));
      }
      Cmp::Contains(pattern) => {
        sql.push_str(&format!(" WHERE {column} LIKE ?1"));
        params.push(Value::Text(pattern.clone()));
      }
    }
  }

  if let Some(column) = plan.order_by {
    sql.push_str(&format!(" ORDER BY {} DESC", column.as_sql()));
  }
  sql.push_str(&format!(" LIMIT {}", plan.limit));

  (sql, params)
}

/// Rows per INSERT statement. SQLite caps bound variables at 32766 per
/// statement by default; at 8 values per row this stays just under it.
pub const MAX_ROWS_PER_STATEMENT: usize = 4_095;

/// Render a multi-row INSERT for `count` records, all values bound.
pub fn render_insert(count: usize) -> String {
  let rows = vec!["(?, ?, ?, ?, ?, ?, ?, ?)"; count].join(", ");
  format!(
    "INSERT INTO movies (title, year, genre, rating, director, star1, star2, star3) VALUES {rows}"
  )
}

/// A record's bound values, in insert-column order.
pub fn record_params(record: &MovieRecord) -> [Value; 8] {
  [
    Value::from(record.title.clone()),
    Value::from(record.year),
    Value::from(record.genre.clone()),
    Value::from(record.rating),
    Value::from(record.director.clone()),
    Value::from(record.star1.clone()),
    Value::from(record.star2.clone()),
    Value::from(record.star3.clone()),
  ]
}

/// One SQLite cell as its display string; NULL becomes the empty string.
pub fn display_value(value: ValueRef<'_>) -> String {
  match value {
    ValueRef::Null => String::new(),
    ValueRef::Integer(n) => n.to_string(),
    ValueRef::Real(r) => r.to_string(),
    ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
  }
}

#[cfg(test)]
mod tests {
  use marquee_core::{
    query::{Cmp, Filter, QueryPlan},
    record::Column,
  };

  use super::*;

  fn plan(filter: Option<Filter>, order_by: Option<Column>) -> QueryPlan {
    QueryPlan {
      columns: vec![Column::Title, Column::Year],
      filter,
      order_by,
      limit: 500,
    }
  }

  #[test]
  fn bare_select_has_limit_only() {
    let (sql, params) = render_select(&plan(None, None));
    assert_eq!(sql, "SELECT title, year FROM movies LIMIT 500");
    assert!(params.is_empty());
  }

  #[test]
  fn at_least_filter_binds_integer() {
    let filter = Filter { column: Column::Year, cmp: Cmp::AtLeast(2000) };
    let (sql, params) = render_select(&plan(Some(filter), Some(Column::Year)));
    assert_eq!(
      sql,
      "SELECT title, year FROM movies WHERE year >= ?1 ORDER BY year DESC LIMIT 500"
    );
    assert_eq!(params, vec![Value::Integer(2000)]);
  }

  #[test]
  fn contains_filter_binds_pattern_verbatim() {
    // Wildcards live in the bound value, not in the statement text.
    let filter = Filter {
      column: Column::Genre,
      cmp:    Cmp::Contains("%Drama%".to_owned()),
    };
    let (sql, params) = render_select(&plan(Some(filter), None));
    assert_eq!(
      sql,
      "SELECT title, year FROM movies WHERE genre LIKE ?1 LIMIT 500"
    );
    assert_eq!(params, vec![Value::Text("%Drama%".to_owned())]);
  }

  #[test]
  fn hostile_term_never_reaches_statement_text() {
    let filter = Filter {
      column: Column::Title,
      cmp:    Cmp::Contains("%'; DROP TABLE movies; --%".to_owned()),
    };
    let (sql, _) = render_select(&plan(Some(filter), None));
    assert!(!sql.contains("DROP"));
  }

  #[test]
  fn insert_statement_repeats_row_placeholders() {
    let sql = render_insert(2);
    assert_eq!(
      sql,
      "INSERT INTO movies (title, year, genre, rating, director, star1, star2, star3) \
       VALUES (?, ?, ?, ?, ?, ?, ?, ?), (?, ?, ?, ?, ?, ?, ?, ?)"
    );
  }

  #[test]
  fn absent_fields_bind_null() {
    let record = MovieRecord { title: Some("Heat".into()), ..Default::default() };
    let params = record_params(&record);
    assert_eq!(params[0], Value::Text("Heat".into()));
    assert_eq!(params[1], Value::Null);
    assert_eq!(params[3], Value::Null);
  }

  #[test]
  fn null_displays_as_empty_string() {
    assert_eq!(display_value(ValueRef::Null), "");
    assert_eq!(display_value(ValueRef::Integer(1999)), "1999");
    assert_eq!(display_value(ValueRef::Real(8.5)), "8.5");
  }
}
