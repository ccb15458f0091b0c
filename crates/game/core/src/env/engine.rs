//! Narrow engine boundary consumed by modifiers.

use crate::state::PlayerId;

use super::EngineError;

/// Recipient of a presentation message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Every connected player.
    All,
    /// A single player.
    Player(PlayerId),
}

/// Host adapter exposing the few engine capabilities modifiers rely on.
///
/// Implementations live outside the core (the live server bindings, or an
/// in-memory engine for simulation and tests). All methods return options or
/// results; adapters are responsible for turning native nulls into `None`.
pub trait EngineHandle {
    /// Reads the current value of a console variable.
    fn convar(&self, name: &str) -> Option<String>;

    /// Writes a console variable.
    fn set_convar(&mut self, name: &str, value: &str) -> Result<(), EngineError>;

    /// Returns true if the player currently has a live pawn.
    fn is_alive(&self, player: PlayerId) -> bool;

    /// Sets the player's health, returning an error if the pawn is gone.
    fn set_health(&mut self, player: PlayerId, health: i32) -> Result<(), EngineError>;

    /// Sends a best-effort chat message. Delivery failures are ignored.
    fn notify(&mut self, audience: Audience, message: &str);
}
