//! Execution context handed to every modifier call.

use crate::admin::AdminCommand;
use crate::env::EngineHandle;
use crate::state::{PlayerId, RoundId, Tick};

/// Who an `apply`/`revert` call acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// Server-wide effect (events and reserved slots).
    Server,
    /// A single player's skill.
    Player(PlayerId),
}

/// Per-round instructions events may leave for the skill assigner.
///
/// Reset to configured defaults at every round start before any modifier
/// runs, so a directive only lives for the round that set it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillDirectives {
    count_per_player: usize,
    forced: Option<Vec<String>>,
}

impl SkillDirectives {
    pub fn new(count_per_player: usize) -> Self {
        Self {
            count_per_player,
            forced: None,
        }
    }

    /// Number of skills each player draws this round.
    pub fn count_per_player(&self) -> usize {
        self.count_per_player
    }

    /// Overrides the per-player skill count for this round.
    pub fn set_count_per_player(&mut self, count: usize) {
        self.count_per_player = count;
    }

    /// Forced skill names, if any modifier or admin set them.
    pub fn forced(&self) -> Option<&[String]> {
        self.forced.as_deref()
    }

    /// Replaces random drawing with exactly these skills for every player.
    pub fn force<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forced = Some(names.into_iter().map(Into::into).collect());
    }

    /// Restores the defaults for a fresh round.
    pub fn reset(&mut self, count_per_player: usize) {
        self.count_per_player = count_per_player;
        self.forced = None;
    }
}

/// Context provided to modifiers during `apply` and `revert`.
///
/// Bundles everything a modifier may touch so no modifier reaches for
/// ambient global state.
pub struct RoundContext<'a> {
    /// Round this call belongs to.
    pub round: RoundId,

    /// Host tick at the time of the call.
    pub now: Tick,

    /// Server-wide or a specific player.
    pub target: Target,

    /// Engine adapter.
    pub engine: &'a mut dyn EngineHandle,

    /// Skill directives for the current round.
    pub directives: &'a mut SkillDirectives,

    commands: &'a mut Vec<AdminCommand>,
}

impl<'a> RoundContext<'a> {
    pub fn new(
        round: RoundId,
        now: Tick,
        target: Target,
        engine: &'a mut dyn EngineHandle,
        directives: &'a mut SkillDirectives,
        commands: &'a mut Vec<AdminCommand>,
    ) -> Self {
        Self {
            round,
            now,
            target,
            engine,
            directives,
            commands,
        }
    }

    /// Returns the player for skill calls.
    pub fn player(&self) -> Option<PlayerId> {
        match self.target {
            Target::Player(player) => Some(player),
            Target::Server => None,
        }
    }

    /// Queues an administrative command for the next tick.
    ///
    /// Commands never run while a lifecycle call is in progress.
    pub fn queue(&mut self, command: AdminCommand) {
        self.commands.push(command);
    }
}
