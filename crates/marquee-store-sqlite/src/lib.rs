//! SQLite backend for the Marquee movie catalog.
//!
//! Synchronous by design: every operation runs to completion on the
//! caller's thread, and the single connection is lazily opened and
//! re-established on demand.

mod schema;
mod sql;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
