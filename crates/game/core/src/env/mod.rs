//! Boundary traits toward the host.
//!
//! [`EngineHandle`] is the only way modifiers reach the game world, and
//! [`RngOracle`] is the only source of randomness for selection. Both are
//! injected so the orchestration core stays testable without a server.
mod engine;
mod error;
mod rng;

pub use engine::{Audience, EngineHandle};
pub use error::EngineError;
pub use rng::{PcgRng, RngOracle, compute_seed};
