//! Identity and clock newtypes shared by every layer.
mod common;

pub use common::{PlayerId, RoundId, RoundPhase, Tick};
