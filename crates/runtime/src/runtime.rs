//! High-level runtime orchestrator.
//!
//! The runtime owns every orchestration component and exposes the host
//! callbacks (`on_round_start`, `on_tick`, `on_damage`, ...) plus the admin
//! surface. All entry points take `&mut self` and are expected to be called
//! serially from one driving loop, so nothing here locks.

use game_core::{
    AdminCommand, DamageEvent, EngineHandle, HistoryWindow, Modifier, ModifierKind,
    ModifierListing, ModifierRegistry, PlayerId, RoundConfig, RoundId, RoundPhase, Scope,
    SkillDirectives, Tick, compute_seed,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::api::{Result, RoundSummary, RuntimeError, TickReport};
use crate::coordinator::LifecycleCoordinator;
use crate::damage::DamageCompositionPipeline;
use crate::events::{EventBus, RuntimeEvent, Topic};
use crate::lifecycle::RoundEnv;
use crate::roster::PlayerRoster;
use crate::scheduler::{Deferred, Scheduler};
use crate::skills::PerPlayerSkillAssigner;
use crate::slots::SlotRegistry;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub round: RoundConfig,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            round: RoundConfig::default(),
            event_buffer_size: 100,
        }
    }
}

/// State every lifecycle call borrows, kept apart from the components that
/// drive those calls so both can be borrowed at once.
struct Host {
    engine: Box<dyn EngineHandle>,
    directives: SkillDirectives,
    commands: Vec<AdminCommand>,
    bus: EventBus,
}

impl Host {
    fn env(&mut self, round: RoundId, now: Tick) -> RoundEnv<'_> {
        RoundEnv {
            round,
            now,
            engine: self.engine.as_mut(),
            directives: &mut self.directives,
            commands: &mut self.commands,
            bus: &self.bus,
        }
    }
}

/// Main runtime that orchestrates events, skills and reserved slots.
pub struct Runtime {
    config: RoundConfig,
    host: Host,
    slots: SlotRegistry,
    events: LifecycleCoordinator,
    skills: PerPlayerSkillAssigner,
    damage: DamageCompositionPipeline,
    scheduler: Scheduler,
    roster: PlayerRoster,
    /// Admin-forced skills waiting for the next assignment.
    forced_skills: Option<Vec<String>>,
    /// Last issued round generation.
    round: RoundId,
    /// Round currently in progress.
    active: Option<RoundId>,
    now: Tick,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    // ------------------------------------------------------------------
    // Host callbacks
    // ------------------------------------------------------------------

    /// Starts a round: reserved slots, then the event cycle, then schedules
    /// skill assignment after the configured delay.
    pub fn on_round_start(&mut self) -> RoundSummary {
        if let Some(stale) = self.active {
            warn!(
                target: "runtime::coordinator",
                round = stale.0,
                "round start without round end, ending it first"
            );
            self.on_round_end();
        }

        let round = self.round.next();
        self.round = round;
        self.active = Some(round);
        self.host.directives.reset(self.config.skills_per_player);

        let mut env = self.host.env(round, self.now);
        let reserved = self.slots.cycle(&mut env);
        let selection = self.events.start_round(&mut env);

        let event = self.events.current().map(str::to_owned);
        let forced = selection.is_some_and(|s| s.forced);

        let due = self.now + self.config.skill_assign_delay;
        self.scheduler.schedule(due, round, Deferred::AssignSkills);

        info!(
            target: "runtime::coordinator",
            round = round.0,
            event = event.as_deref().unwrap_or("-"),
            forced,
            reserved = reserved.len(),
            skills_due = due.0,
            "round started"
        );
        self.host.bus.publish(RuntimeEvent::RoundStarted {
            round,
            event: event.clone(),
            forced,
        });

        RoundSummary {
            round,
            reserved,
            event,
            forced,
        }
    }

    /// Ends the active round: strips every player's skills and parks the
    /// event for revert at the next round start.
    pub fn on_round_end(&mut self) {
        let Some(round) = self.active.take() else {
            debug!(target: "runtime::coordinator", "round end without active round");
            return;
        };

        let mut env = self.host.env(round, self.now);
        self.skills.remove_everyone(&mut env);
        self.events.end_round();

        info!(target: "runtime::coordinator", round = round.0, "round ended");
        self.host.bus.publish(RuntimeEvent::RoundEnded { round });
    }

    /// Advances the clock: queued admin commands first, then every due
    /// deferred callback.
    pub fn on_tick(&mut self, now: Tick) -> TickReport {
        self.now = now;
        let mut report = TickReport::default();

        for command in std::mem::take(&mut self.host.commands) {
            self.execute(command);
            report.commands += 1;
        }

        for callback in self.scheduler.drain_due(now) {
            if self.active != Some(callback.round) {
                debug!(
                    target: "runtime::scheduler",
                    round = callback.round.0,
                    task = ?callback.task,
                    "dropping callback for finished round"
                );
                continue;
            }
            match callback.task {
                Deferred::AssignSkills => {
                    report.assigned.extend(self.assign_skills(callback.round));
                }
            }
        }

        report
    }

    fn assign_skills(&mut self, round: RoundId) -> Vec<(PlayerId, Vec<String>)> {
        if let Some(names) = self.forced_skills.take() {
            self.host.directives.force(names);
        }

        let count = self
            .config
            .clamp_skill_count(self.host.directives.count_per_player());
        let players = self.roster.players();
        let mut env = self.host.env(round, self.now);
        self.skills
            .assign_all(&players, self.events.current(), count, &mut env)
    }

    /// Routes one damage instance through the composition pipeline.
    ///
    /// Contributors are the applied reserved slots and the current event
    /// (server scope) plus the attacker's and victim's skills. On self
    /// damage the player's skills are asked in both roles.
    pub fn on_damage(&self, mut event: DamageEvent) -> DamageEvent {
        let mut contributors: Vec<(Scope, &dyn Modifier)> = self
            .slots
            .active()
            .chain(self.events.current_modifier())
            .map(|modifier| (Scope::Server, modifier))
            .collect();
        if let Some(attacker) = event.attacker {
            contributors.extend(
                self.skills
                    .contributors(attacker)
                    .map(|modifier| (Scope::Attacker, modifier)),
            );
        }
        contributors.extend(
            self.skills
                .contributors(event.victim)
                .map(|modifier| (Scope::Victim, modifier)),
        );

        let multiplier = self.damage.apply(&mut event, contributors);
        debug!(
            target: "runtime::damage",
            victim = event.victim.0,
            attacker = event.attacker.map(|p| p.0),
            base = event.base_amount,
            multiplier,
            "damage resolved"
        );
        event
    }

    /// Registers a connection and returns its token.
    pub fn on_player_connect(&mut self, slot: u32) -> PlayerId {
        let (player, replaced) = self.roster.connect(slot);
        if let Some(stale) = replaced {
            self.release(stale);
        }
        info!(target: "runtime::roster", slot, player = player.0, "player joined");
        player
    }

    /// Reverts the player's skills and forgets them.
    pub fn on_player_disconnect(&mut self, player: PlayerId) {
        if !self.roster.disconnect(player) {
            debug!(target: "runtime::roster", player = player.0, "unknown player left");
        }
        self.release(player);
    }

    fn release(&mut self, player: PlayerId) {
        let round = self.active.unwrap_or(self.round);
        let mut env = self.host.env(round, self.now);
        let removed = self.skills.remove_all(player, &mut env);
        self.skills.forget(player);
        if !removed.is_empty() {
            info!(
                target: "runtime::skills",
                player = player.0,
                skills = ?removed,
                "skills removed on disconnect"
            );
        }
    }

    // ------------------------------------------------------------------
    // Admin surface
    // ------------------------------------------------------------------

    fn registry(&self, kind: ModifierKind) -> Result<&ModifierRegistry> {
        match kind {
            ModifierKind::Event => Ok(self.events.registry()),
            ModifierKind::Skill => Ok(self.skills.registry()),
            ModifierKind::Reserved => Err(RuntimeError::Unweighted(kind)),
        }
    }

    fn registry_mut(&mut self, kind: ModifierKind) -> Result<&mut ModifierRegistry> {
        match kind {
            ModifierKind::Event => Ok(self.events.registry_mut()),
            ModifierKind::Skill => Ok(self.skills.registry_mut()),
            ModifierKind::Reserved => Err(RuntimeError::Unweighted(kind)),
        }
    }

    pub fn weight(&self, kind: ModifierKind, name: &str) -> Result<u32> {
        Ok(self.registry(kind)?.weight(name)?)
    }

    /// Changes a weight, returning the previous value.
    pub fn set_weight(&mut self, kind: ModifierKind, name: &str, weight: i64) -> Result<u32> {
        let previous = self.registry_mut(kind)?.set_weight(name, weight)?;
        info!(
            target: "runtime::admin",
            kind = %kind,
            modifier = name,
            previous,
            weight,
            "weight changed"
        );
        Ok(previous)
    }

    /// Every modifier of `kind` with its weight, ordered by name.
    pub fn list_modifiers(&self, kind: ModifierKind) -> Result<Vec<ModifierListing>> {
        Ok(self.registry(kind)?.list_all())
    }

    /// Forces `name` as the next round's event.
    pub fn force_next(&mut self, name: &str) -> Result<()> {
        self.events.force_next(name)?;
        Ok(())
    }

    pub fn clear_history(&mut self) {
        self.events.clear_history();
    }

    /// Enables or disables a reserved slot from the next round start.
    pub fn set_slot_enabled(&mut self, name: &str, enabled: bool) -> Result<bool> {
        let previous = self.slots.set_enabled(name, enabled)?;
        info!(target: "runtime::admin", slot = name, enabled, "slot toggled");
        Ok(previous)
    }

    /// Hands every player exactly these skills at the next assignment.
    pub fn force_skills(&mut self, names: Vec<String>) -> Result<()> {
        if names.is_empty() {
            return Err(RuntimeError::EmptySkillList);
        }
        for name in &names {
            self.skills.registry().id_of(name)?;
        }
        info!(target: "runtime::admin", skills = ?names, "skills forced");
        self.forced_skills = Some(names);
        Ok(())
    }

    /// Queues a command for the next tick.
    pub fn submit(&mut self, command: AdminCommand) {
        debug!(target: "runtime::admin", command = command.label(), "command queued");
        self.host.commands.push(command);
    }

    fn execute(&mut self, command: AdminCommand) {
        let label = command.label();
        let result = match command {
            AdminCommand::SetWeight { kind, name, weight } => {
                self.set_weight(kind, &name, weight).map(|_| ())
            }
            AdminCommand::ForceNext(name) => self.force_next(&name),
            AdminCommand::ClearHistory => {
                self.clear_history();
                Ok(())
            }
            AdminCommand::SetSlotEnabled { name, enabled } => {
                self.set_slot_enabled(&name, enabled).map(|_| ())
            }
            AdminCommand::ForceSkills(names) => self.force_skills(names),
        };

        let event = match result {
            Ok(()) => RuntimeEvent::AdminExecuted {
                command: label.to_owned(),
            },
            Err(err) => {
                warn!(
                    target: "runtime::admin",
                    command = label,
                    error = %err,
                    "queued command rejected"
                );
                RuntimeEvent::AdminRejected {
                    command: label.to_owned(),
                    reason: err.to_string(),
                }
            }
        };
        self.host.bus.publish(event);
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Event active in the current round.
    pub fn current_event(&self) -> Option<&str> {
        self.events.current()
    }

    pub fn skills_of(&self, player: PlayerId) -> Vec<&str> {
        self.skills.skills_of(player)
    }

    pub fn history(&self) -> &HistoryWindow {
        self.events.history()
    }

    pub fn phase(&self) -> RoundPhase {
        self.events.phase()
    }

    pub fn players(&self) -> Vec<PlayerId> {
        self.roster.players()
    }

    pub fn active_round(&self) -> Option<RoundId> {
        self.active
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    /// Admin commands waiting for the next tick.
    pub fn pending_commands(&self) -> usize {
        self.host.commands.len()
    }

    pub fn slot_enabled(&self, name: &str) -> Option<bool> {
        self.slots.is_enabled(name)
    }

    /// Subscribe to a topic of runtime events.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RuntimeEvent> {
        self.host.bus.subscribe(topic)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.host.bus
    }

    pub fn engine(&self) -> &dyn EngineHandle {
        self.host.engine.as_ref()
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    engine: Option<Box<dyn EngineHandle>>,
    events: Vec<Box<dyn Modifier>>,
    skills: Vec<Box<dyn Modifier>>,
    slots: Vec<(Box<dyn Modifier>, i32, bool)>,
    event_weights: Vec<(String, i64)>,
    skill_weights: Vec<(String, i64)>,
    slot_flags: Vec<(String, bool)>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            engine: None,
            events: Vec::new(),
            skills: Vec::new(),
            slots: Vec::new(),
            event_weights: Vec::new(),
            skill_weights: Vec::new(),
            slot_flags: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override round settings only
    pub fn round_config(mut self, round: RoundConfig) -> Self {
        self.config.round = round;
        self
    }

    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.config.event_buffer_size = size;
        self
    }

    /// Set the required engine adapter
    pub fn engine(mut self, engine: impl EngineHandle + 'static) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    pub fn event(mut self, modifier: impl Modifier + 'static) -> Self {
        self.events.push(Box::new(modifier));
        self
    }

    pub fn events(mut self, modifiers: impl IntoIterator<Item = Box<dyn Modifier>>) -> Self {
        self.events.extend(modifiers);
        self
    }

    pub fn skill(mut self, modifier: impl Modifier + 'static) -> Self {
        self.skills.push(Box::new(modifier));
        self
    }

    pub fn skills(mut self, modifiers: impl IntoIterator<Item = Box<dyn Modifier>>) -> Self {
        self.skills.extend(modifiers);
        self
    }

    /// Adds a reserved slot; lower priorities run first.
    pub fn reserved_slot(
        mut self,
        modifier: impl Modifier + 'static,
        priority: i32,
        enabled: bool,
    ) -> Self {
        self.slots.push((Box::new(modifier), priority, enabled));
        self
    }

    pub fn reserved_slots(
        mut self,
        slots: impl IntoIterator<Item = (Box<dyn Modifier>, i32, bool)>,
    ) -> Self {
        self.slots.extend(slots);
        self
    }

    /// Startup weight table for events. Unknown names are logged and ignored.
    pub fn event_weights<I, S>(mut self, table: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        self.event_weights
            .extend(table.into_iter().map(|(name, weight)| (name.into(), weight)));
        self
    }

    /// Startup weight table for skills. Unknown names are logged and ignored.
    pub fn skill_weights<I, S>(mut self, table: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        self.skill_weights
            .extend(table.into_iter().map(|(name, weight)| (name.into(), weight)));
        self
    }

    /// Startup enable flag for a reserved slot.
    pub fn slot_enabled(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.slot_flags.push((name.into(), enabled));
        self
    }

    /// Build the runtime
    ///
    /// # Errors
    ///
    /// Duplicate modifier or slot names abort the build, as does a missing
    /// engine adapter.
    pub fn build(self) -> Result<Runtime> {
        let engine = self.engine.ok_or(RuntimeError::MissingEngine)?;
        let config = self.config.round;

        let mut event_registry = ModifierRegistry::new();
        event_registry.register_all(self.events)?;
        event_registry.apply_weights(
            self.event_weights
                .iter()
                .map(|(name, weight)| (name.as_str(), *weight)),
        );

        let mut skill_registry = ModifierRegistry::new();
        skill_registry.register_all(self.skills)?;
        skill_registry.apply_weights(
            self.skill_weights
                .iter()
                .map(|(name, weight)| (name.as_str(), *weight)),
        );

        let mut slots = SlotRegistry::new();
        for (modifier, priority, enabled) in self.slots {
            slots.register(modifier, priority, enabled)?;
        }
        for (name, enabled) in &self.slot_flags {
            if let Err(err) = slots.set_enabled(name, *enabled) {
                warn!(target: "runtime::slots", slot = %name, error = %err, "ignoring slot flag");
            }
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        info!(
            target: "runtime::coordinator",
            seed,
            events = event_registry.len(),
            skills = skill_registry.len(),
            slots = slots.len(),
            "runtime built"
        );

        Ok(Runtime {
            host: Host {
                engine,
                directives: SkillDirectives::new(config.skills_per_player),
                commands: Vec::new(),
                bus: EventBus::with_capacity(self.config.event_buffer_size),
            },
            slots,
            events: LifecycleCoordinator::new(event_registry, config.history_capacity, seed),
            skills: PerPlayerSkillAssigner::new(
                skill_registry,
                config.skill_history_capacity,
                compute_seed(seed, 0, u64::MAX, 1),
            ),
            damage: DamageCompositionPipeline::new(),
            scheduler: Scheduler::new(),
            roster: PlayerRoster::new(),
            forced_skills: None,
            round: RoundId::ZERO,
            active: None,
            now: Tick::ZERO,
            config,
        })
    }
}
