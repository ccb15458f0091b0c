//! Simulated round clock.
//!
//! Drives the runtime the way a game server would: spawn, round start,
//! ticks until skills land, a stretch of random combat routed through
//! `on_damage`, round end.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use game_content::{ConfigLoader, ContentConfig, catalog};
use game_core::{DamageEvent, PlayerId, Tick};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use runtime::{Runtime, RuntimeEvent, Topic};
use tokio::sync::broadcast;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::engine::{SimulatedEngine, World};

const WEAPONS: [&str; 4] = ["ak47", "m4a1", "awp", "deagle"];

/// Per-round tallies for the summary log line.
#[derive(Debug, Default)]
struct RoundStats {
    hits: u32,
    kills: u32,
    damage: f32,
    faults: u32,
}

pub struct Host {
    config: ServerConfig,
    runtime: Runtime,
    world: Rc<RefCell<World>>,
    players: Vec<PlayerId>,
    rng: StdRng,
    skill_delay: u64,
    now: u64,
    round_events: broadcast::Receiver<RuntimeEvent>,
}

impl Host {
    pub fn build(config: ServerConfig) -> Result<Self> {
        let content = match &config.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => ContentConfig::default(),
        };
        let seed = content.round.seed.unwrap_or_else(rand::random);
        let round = content.round.clone().with_seed(seed);
        let skill_delay = round.skill_assign_delay;

        let world = Rc::new(RefCell::new(World::with_defaults()));
        let mut builder = Runtime::builder()
            .round_config(round)
            .engine(SimulatedEngine::new(Rc::clone(&world)))
            .events(catalog::events())
            .skills(catalog::skills())
            .reserved_slots(catalog::reserved())
            .event_weights(content.weights.events)
            .skill_weights(content.weights.skills);
        for (name, enabled) in content.slots {
            builder = builder.slot_enabled(name, enabled);
        }
        let mut runtime = builder.build().context("failed to build runtime")?;

        let players = (0..config.players)
            .map(|slot| runtime.on_player_connect(slot))
            .collect();
        let round_events = runtime.subscribe(Topic::Round);

        info!(target: "server", seed, players = config.players, "server ready");
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            config,
            runtime,
            world,
            players,
            skill_delay,
            now: 0,
            round_events,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let mut interval = tokio::time::interval(Duration::from_millis(self.config.tick_millis));
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

        for _ in 0..self.config.rounds {
            self.play_round(&mut interval).await;
        }

        for listing in self.runtime.list_modifiers(game_core::ModifierKind::Event)? {
            debug!(target: "server", event = %listing.name, weight = listing.weight, "final weight");
        }
        info!(target: "server", rounds = self.config.rounds, "simulation finished");
        Ok(())
    }

    async fn tick(&mut self, interval: &mut Interval) -> runtime::TickReport {
        interval.tick().await;
        self.now += 1;
        self.runtime.on_tick(Tick(self.now))
    }

    async fn play_round(&mut self, interval: &mut Interval) {
        self.world.borrow_mut().respawn(&self.players);
        let summary = self.runtime.on_round_start();
        let mut stats = RoundStats::default();

        // Skills land after the configured delay.
        for _ in 0..=self.skill_delay {
            if !self.tick(interval).await.assigned.is_empty() {
                break;
            }
        }

        for _ in 0..self.config.round_ticks {
            self.tick(interval).await;
            self.exchange_fire(&mut stats);
            if self.world.borrow().alive().len() <= 1 {
                break;
            }
        }

        self.runtime.on_round_end();
        while let Ok(event) = self.round_events.try_recv() {
            if matches!(event, RuntimeEvent::ModifierFaulted { .. }) {
                stats.faults += 1;
            }
        }

        info!(
            target: "server",
            round = summary.round.0,
            event = summary.event.as_deref().unwrap_or("-"),
            forced = summary.forced,
            reserved = ?summary.reserved,
            hits = stats.hits,
            kills = stats.kills,
            damage = stats.damage,
            faults = stats.faults,
            "round summary"
        );
        if stats.faults > 0 {
            warn!(target: "server", faults = stats.faults, "modifiers faulted this round");
        }
    }

    /// Maybe fires one shot between two living players.
    fn exchange_fire(&mut self, stats: &mut RoundStats) {
        if !self.rng.gen_bool(0.3) {
            return;
        }
        let alive = self.world.borrow().alive();
        let mut pair = alive.choose_multiple(&mut self.rng, 2);
        let (Some(&attacker), Some(&victim)) = (pair.next(), pair.next()) else {
            return;
        };

        let weapon = WEAPONS.choose(&mut self.rng).copied().unwrap_or("knife");
        let hit = DamageEvent::new(victim, self.rng.gen_range(10.0..40.0))
            .with_attacker(attacker)
            .with_weapon(weapon)
            .with_headshot(self.rng.gen_bool(0.2));

        let resolved = self.runtime.on_damage(hit);
        let amount = resolved.final_amount();
        stats.hits += 1;
        stats.damage += amount;
        if self.world.borrow_mut().damage(victim, amount) {
            stats.kills += 1;
            debug!(
                target: "server",
                attacker = attacker.0,
                victim = victim.0,
                weapon,
                "kill"
            );
        }
    }
}
