//! Data-driven content definitions and loaders.
//!
//! This crate houses the built-in modifier catalog and the startup config
//! loaders:
//! - Events, skills and reserved slots ([`catalog`])
//! - Round settings, weight tables and slot flags (TOML or JSON)
//!
//! Content is handed to the runtime builder once at startup.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentConfig, LoadResult, WeightTables};
