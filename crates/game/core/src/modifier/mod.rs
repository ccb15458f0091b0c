//! Named, weighted units of round-scoped behavior.
//!
//! A [`Modifier`] is either a server-wide event, a per-player skill, or a
//! reserved slot body (heavy armor, welfare). The orchestration layer owns
//! every instance for the lifetime of the process and drives it through
//! repeated `apply`/`revert` pairs, so implementations must not accumulate
//! state across cycles.
//!
//! # Capabilities
//!
//! Every modifier supports `apply` and `revert`. Modifiers that adjust damage
//! additionally expose a [`DamageContributor`] through
//! [`Modifier::as_damage_contributor`]; the damage pipeline only consults
//! modifiers that return `Some` there.

mod context;
mod history;
mod registry;

pub use context::{RoundContext, SkillDirectives, Target};
pub use history::HistoryWindow;
pub use registry::{ModifierId, ModifierListing, ModifierRegistry, WeightReport};

use crate::combat::DamageEvent;
use crate::error::ModifierFault;

/// Which family a modifier belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModifierKind {
    /// Server-wide modifier, at most one current per round.
    Event,
    /// Per-player modifier, assigned shortly after round start.
    Skill,
    /// Always-on-if-enabled slot applied before the event draw.
    Reserved,
}

/// Role in which a modifier is asked for a damage contribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Scope {
    /// The modifier is active server-wide (current event or reserved slot).
    Server,
    /// The modifier is a skill held by the attacker.
    Attacker,
    /// The modifier is a skill held by the victim.
    Victim,
}

/// Round-scoped behavior with an explicit Apply/Revert lifecycle.
pub trait Modifier {
    /// Unique, stable identifier used for history, forcing, and weights.
    fn name(&self) -> &str;

    /// Presentation name shown to players.
    fn display_name(&self) -> &str {
        self.name()
    }

    /// Presentation text shown to players.
    fn description(&self) -> &str {
        ""
    }

    /// Weight used until config or an admin overrides it. Zero disables
    /// natural selection.
    fn default_weight(&self) -> u32 {
        1
    }

    /// Activates the modifier for `ctx.target`.
    fn apply(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault>;

    /// Undoes a prior [`apply`](Modifier::apply) for `ctx.target`.
    ///
    /// The orchestration layer calls this at most once per apply, so
    /// implementations need not track whether they are active.
    fn revert(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        Ok(())
    }

    /// Skill-side exclusivity against the server-wide event of this round.
    ///
    /// Returning false removes the skill from every player's candidate set.
    fn allows_with(&self, _event: Option<&str>) -> bool {
        true
    }

    /// Optional damage capability.
    fn as_damage_contributor(&self) -> Option<&dyn DamageContributor> {
        None
    }
}

/// Capability of modifiers that scale damage while active.
pub trait DamageContributor {
    /// Returns a multiplier for this damage instance, or `None` to abstain.
    ///
    /// Contributions from every active modifier are folded by multiplication,
    /// so a contributor never needs to know what else is active.
    fn damage_multiplier(
        &self,
        event: &DamageEvent,
        scope: Scope,
    ) -> Result<Option<f32>, ModifierFault>;
}
