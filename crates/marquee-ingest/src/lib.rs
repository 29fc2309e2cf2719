//! CSV ingestion for the Marquee movie catalog.
//!
//! Opens a header-mapped CSV source, prepares typed records, and
//! streams them into a [`marquee_core::store::CatalogStore`] in
//! batches.

mod import;
mod source;

pub mod error;

pub use error::{Error, Result};
pub use import::{ImportOptions, ImportReport, run_import};
pub use source::CsvSource;
