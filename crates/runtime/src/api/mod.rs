//! Public runtime API surface.
//!
//! Types exposed to the host adapter and the admin command layer, kept apart
//! from the orchestration internals.

pub mod errors;
pub mod summary;

pub use errors::{Result, RuntimeError};
pub use summary::{RoundSummary, TickReport};
