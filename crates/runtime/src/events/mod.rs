//! Topic-based event bus for runtime events.
//!
//! Every apply, revert, fault, and skill assignment is published here so
//! hosts, tests, and announcers can observe orchestration without hooking
//! into it.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::{LifecyclePhase, RuntimeEvent};
