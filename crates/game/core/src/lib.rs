//! Deterministic building blocks for round-based modifier orchestration.
//!
//! `game-core` defines the modifier capability traits, the registry and
//! no-repeat window, the weighted selector, and the multiplicative damage
//! fold. Everything here is pure and single-threaded; the `runtime` crate
//! drives these pieces through the round lifecycle.
pub mod admin;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod modifier;
pub mod selector;
pub mod state;

pub use admin::AdminCommand;
pub use combat::{DamageEvent, compose_multipliers, is_valid_multiplier};
pub use config::RoundConfig;
pub use env::{Audience, EngineError, EngineHandle, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError, ModifierFault, RegistryError};
pub use modifier::{
    DamageContributor, HistoryWindow, Modifier, ModifierId, ModifierKind, ModifierListing,
    ModifierRegistry, RoundContext, Scope, SkillDirectives, Target, WeightReport,
};
pub use selector::{SERVER_STREAM, WeightedSelector, pick_weighted};
pub use state::{PlayerId, RoundId, RoundPhase, Tick};
