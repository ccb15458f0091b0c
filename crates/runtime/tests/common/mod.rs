//! Shared doubles for runtime integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use game_core::{
    Audience, DamageContributor, DamageEvent, EngineError, EngineHandle, Modifier, ModifierFault,
    PlayerId, RoundConfig, RoundContext, Scope,
};
use runtime::{Runtime, RuntimeBuilder};

/// Engine adapter that records every call.
#[derive(Clone, Default)]
pub struct RecordingEngine {
    pub convars: Rc<RefCell<HashMap<String, String>>>,
    pub notices: Rc<RefCell<Vec<String>>>,
    pub dead: Rc<RefCell<Vec<PlayerId>>>,
}

impl EngineHandle for RecordingEngine {
    fn convar(&self, name: &str) -> Option<String> {
        self.convars.borrow().get(name).cloned()
    }

    fn set_convar(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        self.convars
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn is_alive(&self, player: PlayerId) -> bool {
        !self.dead.borrow().contains(&player)
    }

    fn set_health(&mut self, _player: PlayerId, _health: i32) -> Result<(), EngineError> {
        Ok(())
    }

    fn notify(&mut self, _audience: Audience, message: &str) {
        self.notices.borrow_mut().push(message.to_owned());
    }
}

/// Shared counters for one modifier instance.
#[derive(Clone, Default)]
pub struct Calls {
    pub applies: Rc<Cell<u32>>,
    pub reverts: Rc<Cell<u32>>,
    /// Global order of lifecycle calls, e.g. `apply:NoEvent`.
    pub log: Rc<RefCell<Vec<String>>>,
}

impl Calls {
    pub fn applies(&self) -> u32 {
        self.applies.get()
    }

    pub fn reverts(&self) -> u32 {
        self.reverts.get()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    None,
    RevertErr,
    RevertPanic,
    ApplyPanic,
}

/// Modifier that records its lifecycle calls.
pub struct Recording {
    name: &'static str,
    weight: u32,
    calls: Calls,
    failure: Failure,
    multiplier: Option<(Scope, f32)>,
    excluded_with: Option<&'static str>,
    force_count: Option<usize>,
}

impl Recording {
    pub fn new(name: &'static str, weight: u32) -> Self {
        Self {
            name,
            weight,
            calls: Calls::default(),
            failure: Failure::None,
            multiplier: None,
            excluded_with: None,
            force_count: None,
        }
    }

    /// Shares a call log across several modifiers.
    pub fn with_log(mut self, log: &Rc<RefCell<Vec<String>>>) -> Self {
        self.calls.log = Rc::clone(log);
        self
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = failure;
        self
    }

    pub fn contributing(mut self, scope: Scope, multiplier: f32) -> Self {
        self.multiplier = Some((scope, multiplier));
        self
    }

    pub fn excluded_with(mut self, event: &'static str) -> Self {
        self.excluded_with = Some(event);
        self
    }

    pub fn setting_skill_count(mut self, count: usize) -> Self {
        self.force_count = Some(count);
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.clone()
    }
}

impl Modifier for Recording {
    fn name(&self) -> &str {
        self.name
    }

    fn default_weight(&self) -> u32 {
        self.weight
    }

    fn apply(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        self.calls.applies.set(self.calls.applies() + 1);
        self.calls
            .log
            .borrow_mut()
            .push(format!("apply:{}", self.name));
        if let Some(count) = self.force_count {
            ctx.directives.set_count_per_player(count);
        }
        if self.failure == Failure::ApplyPanic {
            panic!("{} exploded during apply", self.name);
        }
        Ok(())
    }

    fn revert(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        self.calls.reverts.set(self.calls.reverts() + 1);
        self.calls
            .log
            .borrow_mut()
            .push(format!("revert:{}", self.name));
        match self.failure {
            Failure::RevertErr => Err(ModifierFault::new("entity handle went stale")),
            Failure::RevertPanic => panic!("{} exploded during revert", self.name),
            _ => Ok(()),
        }
    }

    fn allows_with(&self, event: Option<&str>) -> bool {
        self.excluded_with.is_none() || event != self.excluded_with
    }

    fn as_damage_contributor(&self) -> Option<&dyn DamageContributor> {
        self.multiplier.map(|_| self as &dyn DamageContributor)
    }
}

impl DamageContributor for Recording {
    fn damage_multiplier(
        &self,
        _event: &DamageEvent,
        scope: Scope,
    ) -> Result<Option<f32>, ModifierFault> {
        Ok(self
            .multiplier
            .and_then(|(wanted, value)| (wanted == scope).then_some(value)))
    }
}

/// Seeded config with no skill delay.
pub fn config(seed: u64) -> RoundConfig {
    RoundConfig {
        skill_assign_delay: 0,
        ..RoundConfig::default().with_seed(seed)
    }
}

pub fn builder(seed: u64) -> RuntimeBuilder {
    Runtime::builder()
        .round_config(config(seed))
        .engine(RecordingEngine::default())
}
