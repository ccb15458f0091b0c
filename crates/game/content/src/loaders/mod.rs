//! Content loaders for reading startup configuration from files.
//!
//! Config files are either TOML or JSON; the format is picked from the file
//! extension. Loaders only parse. Applying weights and slot flags to the
//! runtime happens in the runtime builder, which logs unknown names.

pub mod config;

pub use config::{ConfigLoader, ContentConfig, WeightTables};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
