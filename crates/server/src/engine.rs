//! In-memory engine adapter.
//!
//! Stands in for the game engine bindings: convars, player health and chat
//! notices live in a shared [`World`] so the host loop can inspect and
//! mutate the same state the runtime's modifiers touch.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use game_core::{Audience, EngineError, EngineHandle, PlayerId};
use tracing::info;

pub const SPAWN_HEALTH: i32 = 100;

/// Simulated world state.
#[derive(Debug, Default)]
pub struct World {
    pub convars: HashMap<String, String>,
    pub health: HashMap<PlayerId, i32>,
}

impl World {
    pub fn with_defaults() -> Self {
        let mut world = Self::default();
        for (name, value) in [("sv_gravity", "800"), ("mp_afterroundmoney", "0")] {
            world.convars.insert(name.to_owned(), value.to_owned());
        }
        world
    }

    /// Respawns every listed player at full health.
    pub fn respawn(&mut self, players: &[PlayerId]) {
        self.health.clear();
        for &player in players {
            self.health.insert(player, SPAWN_HEALTH);
        }
    }

    /// Applies committed damage. Returns true if the hit was lethal.
    pub fn damage(&mut self, player: PlayerId, amount: f32) -> bool {
        let Some(health) = self.health.get_mut(&player) else {
            return false;
        };
        if *health <= 0 {
            return false;
        }
        *health -= amount.round() as i32;
        *health <= 0
    }

    pub fn alive(&self) -> Vec<PlayerId> {
        let mut alive: Vec<_> = self
            .health
            .iter()
            .filter(|(_, hp)| **hp > 0)
            .map(|(player, _)| *player)
            .collect();
        alive.sort_unstable();
        alive
    }
}

/// [`EngineHandle`] over a shared [`World`].
#[derive(Clone)]
pub struct SimulatedEngine {
    world: Rc<RefCell<World>>,
}

impl SimulatedEngine {
    pub fn new(world: Rc<RefCell<World>>) -> Self {
        Self { world }
    }
}

impl EngineHandle for SimulatedEngine {
    fn convar(&self, name: &str) -> Option<String> {
        self.world.borrow().convars.get(name).cloned()
    }

    fn set_convar(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        let mut world = self.world.borrow_mut();
        let Some(slot) = world.convars.get_mut(name) else {
            return Err(EngineError::ConVarNotFound(name.to_owned()));
        };
        *slot = value.to_owned();
        Ok(())
    }

    fn is_alive(&self, player: PlayerId) -> bool {
        self.world
            .borrow()
            .health
            .get(&player)
            .is_some_and(|hp| *hp > 0)
    }

    fn set_health(&mut self, player: PlayerId, health: i32) -> Result<(), EngineError> {
        let mut world = self.world.borrow_mut();
        let Some(slot) = world.health.get_mut(&player) else {
            return Err(EngineError::InvalidPlayer(player));
        };
        *slot = health;
        Ok(())
    }

    fn notify(&mut self, audience: Audience, message: &str) {
        info!(target: "server::chat", ?audience, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_convars_and_players_are_errors() {
        let world = Rc::new(RefCell::new(World::with_defaults()));
        let mut engine = SimulatedEngine::new(Rc::clone(&world));

        assert!(engine.set_convar("sv_gravity", "200").is_ok());
        assert_eq!(engine.convar("sv_gravity").as_deref(), Some("200"));
        assert!(matches!(
            engine.set_convar("sv_cheats", "1"),
            Err(EngineError::ConVarNotFound(_))
        ));
        assert!(matches!(
            engine.set_health(PlayerId(1), 150),
            Err(EngineError::InvalidPlayer(_))
        ));
    }

    #[test]
    fn lethal_damage_kills_once() {
        let mut world = World::with_defaults();
        world.respawn(&[PlayerId(1), PlayerId(2)]);

        assert!(!world.damage(PlayerId(1), 60.0));
        assert!(world.damage(PlayerId(1), 60.0));
        assert!(!world.damage(PlayerId(1), 60.0));
        assert_eq!(world.alive(), [PlayerId(2)]);
    }
}
