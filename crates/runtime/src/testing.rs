//! Shared doubles for the unit tests in this crate.

use std::cell::Cell;
use std::rc::Rc;

use game_core::{
    AdminCommand, Audience, DamageContributor, DamageEvent, EngineError, EngineHandle, Modifier,
    ModifierFault, PlayerId, RoundContext, RoundId, Scope, SkillDirectives, Tick,
};

use crate::events::EventBus;
use crate::lifecycle::RoundEnv;

/// Engine adapter that accepts everything and remembers nothing.
pub(crate) struct NullEngine;

impl EngineHandle for NullEngine {
    fn convar(&self, _name: &str) -> Option<String> {
        None
    }

    fn set_convar(&mut self, _name: &str, _value: &str) -> Result<(), EngineError> {
        Ok(())
    }

    fn is_alive(&self, _player: PlayerId) -> bool {
        true
    }

    fn set_health(&mut self, _player: PlayerId, _health: i32) -> Result<(), EngineError> {
        Ok(())
    }

    fn notify(&mut self, _audience: Audience, _message: &str) {}
}

/// Owns everything a [`RoundEnv`] borrows.
pub(crate) struct Harness {
    pub engine: NullEngine,
    pub directives: SkillDirectives,
    pub commands: Vec<AdminCommand>,
    pub bus: EventBus,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            engine: NullEngine,
            directives: SkillDirectives::new(1),
            commands: Vec::new(),
            bus: EventBus::new(),
        }
    }

    pub fn env(&mut self, round: u64) -> RoundEnv<'_> {
        RoundEnv {
            round: RoundId(round),
            now: Tick::ZERO,
            engine: &mut self.engine,
            directives: &mut self.directives,
            commands: &mut self.commands,
            bus: &self.bus,
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct Calls {
    applies: Rc<Cell<u32>>,
    reverts: Rc<Cell<u32>>,
}

impl Calls {
    pub fn applies(&self) -> u32 {
        self.applies.get()
    }

    pub fn reverts(&self) -> u32 {
        self.reverts.get()
    }
}

/// Modifier that counts its lifecycle calls.
pub(crate) struct Counted {
    name: &'static str,
    weight: u32,
    calls: Calls,
    panic_on_revert: bool,
    multiplier: Option<f32>,
}

impl Counted {
    pub fn new(name: &'static str, weight: u32) -> Self {
        Self {
            name,
            weight,
            calls: Calls::default(),
            panic_on_revert: false,
            multiplier: None,
        }
    }

    pub fn panicking_revert(mut self) -> Self {
        self.panic_on_revert = true;
        self
    }

    pub fn contributing(mut self, multiplier: f32) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.clone()
    }
}

impl Modifier for Counted {
    fn name(&self) -> &str {
        self.name
    }

    fn default_weight(&self) -> u32 {
        self.weight
    }

    fn apply(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        self.calls.applies.set(self.calls.applies() + 1);
        Ok(())
    }

    fn revert(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        self.calls.reverts.set(self.calls.reverts() + 1);
        if self.panic_on_revert {
            panic!("{} failed to revert", self.name);
        }
        Ok(())
    }

    fn as_damage_contributor(&self) -> Option<&dyn DamageContributor> {
        self.multiplier.map(|_| self as &dyn DamageContributor)
    }
}

impl DamageContributor for Counted {
    fn damage_multiplier(
        &self,
        _event: &DamageEvent,
        _scope: Scope,
    ) -> Result<Option<f32>, ModifierFault> {
        Ok(self.multiplier)
    }
}
