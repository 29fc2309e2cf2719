//! Core types and logic for the Marquee movie catalog.
//!
//! This crate is deliberately free of database and filesystem
//! dependencies. It owns the domain model, the scalar normalizers, the
//! query planner, the result grid, and the batch loader; storage
//! backends implement [`store::CatalogStore`].

pub mod error;
pub mod grid;
pub mod loader;
pub mod normalize;
pub mod query;
pub mod record;
pub mod store;

pub use error::{Error, Result};
