//! Round orchestration for the roulette core.
//!
//! This crate drives the modifier building blocks from `game-core` through
//! the round lifecycle. Hosts embed [`Runtime`] and forward their round
//! clock to it (`on_round_start`, `on_round_end`, `on_tick`, `on_damage`,
//! player connects and disconnects).
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides a topic-based event bus for observers
//! - [`coordinator`], [`slots`] and [`skills`] run Apply/Revert cycles
//! - [`damage`] folds damage contributions
//! - [`scheduler`] and [`roster`] model deferred work and player identity
pub mod api;
pub mod coordinator;
pub mod damage;
pub mod events;
pub mod roster;
pub mod runtime;
pub mod scheduler;
pub mod skills;
pub mod slots;

mod lifecycle;

#[cfg(test)]
mod testing;

pub use api::{Result, RoundSummary, RuntimeError, TickReport};
pub use coordinator::{LifecycleCoordinator, Selection};
pub use damage::DamageCompositionPipeline;
pub use events::{EventBus, LifecyclePhase, RuntimeEvent, Topic};
pub use roster::PlayerRoster;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scheduler::{Deferred, DueCallback, Scheduler};
pub use skills::PerPlayerSkillAssigner;
pub use slots::SlotRegistry;
