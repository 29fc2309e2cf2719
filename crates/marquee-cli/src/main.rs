//! `marquee` — movie catalog importer and search CLI.
//!
//! # Usage
//!
//! ```
//! marquee import movies.csv --truncate
//! marquee search --by year --term 2000+ --columns title,year,rating
//! marquee search --by genre --term Drama --export drama.csv
//! ```

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use marquee_core::{
  grid::ResultGrid,
  query::{self, ColumnKey, SearchMode, SearchSpec},
  record::FieldMap,
  store::CatalogStore,
};
use marquee_ingest::{ImportOptions, run_import};
use marquee_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "marquee", about = "Movie catalog import and search")]
struct Args {
  /// Path to a TOML config file (db_path).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Path to the SQLite database file.
  #[arg(long, env = "MARQUEE_DB")]
  db: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Bulk-load a CSV file into the catalog.
  Import {
    /// CSV file with the expected header fields.
    file: PathBuf,

    /// Clear existing rows before loading.
    #[arg(long)]
    truncate: bool,

    /// Records per insert round-trip. Batches beyond SQLite's
    /// per-statement limit (4095 rows) are split automatically.
    #[arg(long, default_value_t = marquee_core::loader::DEFAULT_BATCH_SIZE)]
    batch_size: usize,
  },

  /// Query the catalog and print (or export) the results.
  Search {
    /// Search field: genre, year, rating, director or actor.
    /// Omit to match on the title.
    #[arg(long)]
    by: Option<String>,

    /// Search term. `1990` matches a numeric field exactly, `1990+`
    /// means at-least; anything else is a substring match.
    #[arg(long, default_value = "")]
    term: String,

    /// Output columns (title, year, genre, rating, director, stars).
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Also write the results to a CSV file.
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  db_path: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override the config file, which overrides the default.
  let db_path = args
    .db
    .or(file_cfg.db_path)
    .unwrap_or_else(|| PathBuf::from("marquee.db"));

  let mut store = SqliteStore::open(&db_path);

  match args.command {
    Command::Import { file, truncate, batch_size } => {
      let options = ImportOptions { truncate, batch_size };
      let report = run_import(&mut store, &file, &FieldMap::default(), &options)
        .with_context(|| format!("importing {}", file.display()))?;
      println!(
        "Imported {} of {} rows in {} batches into {}",
        report.rows_written,
        report.rows_read,
        report.batches,
        db_path.display()
      );
    }

    Command::Search { by, term, columns, export } => {
      let spec = parse_spec(by.as_deref(), term, &columns)?;
      let plan = query::build(&spec);
      let grid = store.select(&plan).context("executing search")?;

      println!("{}", render(&grid));
      println!("Found {} rows", grid.rows.len());

      if let Some(path) = export {
        let file = File::create(&path)
          .with_context(|| format!("creating {}", path.display()))?;
        grid
          .write_csv(file)
          .with_context(|| format!("exporting to {}", path.display()))?;
        println!("Exported {} rows to {}", grid.rows.len(), path.display());
      }
    }
  }

  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn parse_spec(by: Option<&str>, term: String, columns: &[String]) -> Result<SearchSpec> {
  let mode = by.map(str::parse::<SearchMode>).transpose()?;
  let columns = columns
    .iter()
    .map(|key| key.parse::<ColumnKey>())
    .collect::<marquee_core::Result<Vec<_>>>()?;
  Ok(SearchSpec { mode, term, columns })
}

fn render(grid: &ResultGrid) -> Table {
  let mut table = Table::new();
  table
    .load_preset(UTF8_FULL_CONDENSED)
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_header(&grid.headers);
  for row in &grid.rows {
    table.add_row(row);
  }
  table
}
