//! Per-player skill assignment.
//!
//! Mirrors the event coordinator, but every connected player receives an
//! independent set of skills drawn from the skill registry. A player's draws
//! within one round are mutually distinct, and each player draws on their own
//! selector stream so one player's draws never shift another's.
//!
//! The assigner is the only owner of the player → skills mapping.

use std::collections::HashMap;

use game_core::{
    HistoryWindow, Modifier, ModifierId, ModifierKind, ModifierRegistry, PlayerId, Target,
    WeightedSelector,
};
use tracing::{debug, info, warn};

use crate::events::RuntimeEvent;
use crate::lifecycle::RoundEnv;

pub struct PerPlayerSkillAssigner {
    registry: ModifierRegistry,
    selector: WeightedSelector,
    assignments: HashMap<PlayerId, Vec<ModifierId>>,
    /// Optional per-player no-repeat windows, keyed by player.
    histories: HashMap<PlayerId, HistoryWindow>,
    history_capacity: usize,
}

impl PerPlayerSkillAssigner {
    pub fn new(registry: ModifierRegistry, history_capacity: usize, seed: u64) -> Self {
        Self {
            registry,
            selector: WeightedSelector::new(seed),
            assignments: HashMap::new(),
            histories: HashMap::new(),
            history_capacity,
        }
    }

    /// Assigns skills to every player in order and applies them.
    ///
    /// `count` is the per-player draw count. A forced list in the round's
    /// [`SkillDirectives`](game_core::SkillDirectives) replaces drawing for
    /// every player. With fewer eligible skills than `count`, a player gets
    /// as many as are available.
    pub(crate) fn assign_all(
        &mut self,
        players: &[PlayerId],
        event: Option<&str>,
        count: usize,
        env: &mut RoundEnv<'_>,
    ) -> Vec<(PlayerId, Vec<String>)> {
        let forced: Option<Vec<String>> = env.directives.forced().map(<[String]>::to_vec);
        let mut assigned = Vec::with_capacity(players.len());

        for &player in players {
            if !env.engine.is_alive(player) {
                debug!(
                    target: "runtime::skills",
                    player = player.0,
                    "player not alive, skipping"
                );
                continue;
            }

            // Never stack a second assignment on top of an unreverted one.
            self.remove_all(player, env);

            let ids = match &forced {
                Some(names) => self.resolve_forced(names),
                None => self.draw_for(player, event, count),
            };

            let mut names = Vec::with_capacity(ids.len());
            for &id in &ids {
                env.apply(
                    ModifierKind::Skill,
                    self.registry.modifier_mut(id),
                    Target::Player(player),
                );
                let name = self.registry.name(id).to_owned();
                if self.history_capacity > 0 {
                    self.histories
                        .entry(player)
                        .or_insert_with(|| HistoryWindow::new(self.history_capacity))
                        .record(name.as_str());
                }
                names.push(name);
            }
            // Faulted applies stay assigned so their revert still runs.
            self.assignments.insert(player, ids);

            info!(
                target: "runtime::skills",
                round = env.round.0,
                player = player.0,
                skills = ?names,
                forced = forced.is_some(),
                "skills assigned"
            );
            env.bus.publish(RuntimeEvent::SkillsAssigned {
                round: env.round,
                player,
                skills: names.clone(),
            });
            assigned.push((player, names));
        }

        assigned
    }

    fn resolve_forced(&self, names: &[String]) -> Vec<ModifierId> {
        let mut ids: Vec<ModifierId> = Vec::with_capacity(names.len());
        for name in names {
            match self.registry.id_of(name) {
                Ok(id) if !ids.contains(&id) => ids.push(id),
                Ok(_) => {}
                Err(err) => warn!(
                    target: "runtime::skills",
                    skill = %name,
                    error = %err,
                    "skipping unknown forced skill"
                ),
            }
        }
        ids
    }

    fn draw_for(&mut self, player: PlayerId, event: Option<&str>, count: usize) -> Vec<ModifierId> {
        let history = self.histories.get(&player);
        let mut chosen: Vec<ModifierId> = Vec::with_capacity(count);

        for _ in 0..count {
            let picked = self
                .selector
                .draw(&self.registry, player.stream(), |id, modifier| {
                    !chosen.contains(&id)
                        && modifier.allows_with(event)
                        && !history.is_some_and(|window| window.contains(modifier.name()))
                });
            match picked {
                Some(id) => chosen.push(id),
                None => {
                    debug!(
                        target: "runtime::skills",
                        player = player.0,
                        requested = count,
                        assigned = chosen.len(),
                        "ran out of eligible skills"
                    );
                    break;
                }
            }
        }

        chosen
    }

    /// Reverts and clears every skill held by `player`.
    ///
    /// Returns the names that were removed.
    pub(crate) fn remove_all(&mut self, player: PlayerId, env: &mut RoundEnv<'_>) -> Vec<String> {
        let Some(ids) = self.assignments.remove(&player) else {
            return Vec::new();
        };

        let mut names = Vec::with_capacity(ids.len());
        for id in ids {
            env.revert(
                ModifierKind::Skill,
                self.registry.modifier_mut(id),
                Target::Player(player),
            );
            names.push(self.registry.name(id).to_owned());
        }

        if !names.is_empty() {
            env.bus.publish(RuntimeEvent::SkillsRemoved {
                player,
                skills: names.clone(),
            });
        }
        names
    }

    /// Strips every player, lowest id first.
    pub(crate) fn remove_everyone(&mut self, env: &mut RoundEnv<'_>) {
        let mut players: Vec<PlayerId> = self.assignments.keys().copied().collect();
        players.sort_unstable();
        for player in players {
            self.remove_all(player, env);
        }
    }

    /// Drops per-player history for a player who left.
    pub(crate) fn forget(&mut self, player: PlayerId) {
        self.histories.remove(&player);
    }

    pub fn skills_of(&self, player: PlayerId) -> Vec<&str> {
        self.assignments
            .get(&player)
            .map(|ids| ids.iter().map(|&id| self.registry.name(id)).collect())
            .unwrap_or_default()
    }

    /// Skills currently held by `player`, for damage queries.
    pub fn contributors(&self, player: PlayerId) -> impl Iterator<Item = &dyn Modifier> + '_ {
        self.assignments
            .get(&player)
            .into_iter()
            .flatten()
            .map(|&id| self.registry.modifier(id))
    }

    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ModifierRegistry {
        &mut self.registry
    }
}
