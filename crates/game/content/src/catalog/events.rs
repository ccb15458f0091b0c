//! Server-wide events.

use game_core::{
    Audience, DamageContributor, DamageEvent, Modifier, ModifierFault, RoundContext, Scope,
};

/// Gravity convar the engine exposes.
pub const GRAVITY_CONVAR: &str = "sv_gravity";
const LOW_GRAVITY: &str = "200";
const DEFAULT_GRAVITY: &str = "800";

/// A plain round. Heavily weighted so most rounds stay normal.
pub struct NoEvent;

impl Modifier for NoEvent {
    fn name(&self) -> &str {
        "NoEvent"
    }

    fn display_name(&self) -> &str {
        "No Event"
    }

    fn default_weight(&self) -> u32 {
        100
    }

    fn apply(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        Ok(())
    }
}

/// Quarter gravity for the round.
///
/// Remembers the value it replaced and restores it on revert, so a server
/// with a custom gravity gets its own value back.
pub struct LowGravity {
    saved: Option<String>,
}

impl LowGravity {
    pub fn new() -> Self {
        Self { saved: None }
    }
}

impl Default for LowGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for LowGravity {
    fn name(&self) -> &str {
        "LowGravity"
    }

    fn display_name(&self) -> &str {
        "Low Gravity"
    }

    fn description(&self) -> &str {
        "Everyone jumps higher and falls slower"
    }

    fn default_weight(&self) -> u32 {
        10
    }

    fn apply(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        self.saved = ctx.engine.convar(GRAVITY_CONVAR);
        ctx.engine.set_convar(GRAVITY_CONVAR, LOW_GRAVITY)?;
        Ok(())
    }

    fn revert(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        let previous = self.saved.take();
        ctx.engine
            .set_convar(GRAVITY_CONVAR, previous.as_deref().unwrap_or(DEFAULT_GRAVITY))?;
        Ok(())
    }
}

/// Everyone takes half damage.
pub struct Juggernaut;

impl Modifier for Juggernaut {
    fn name(&self) -> &str {
        "Juggernaut"
    }

    fn description(&self) -> &str {
        "All players take half damage"
    }

    fn default_weight(&self) -> u32 {
        10
    }

    fn apply(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        ctx.engine.notify(Audience::All, "Juggernaut: everyone takes half damage");
        Ok(())
    }

    fn as_damage_contributor(&self) -> Option<&dyn DamageContributor> {
        Some(self as &dyn DamageContributor)
    }
}

impl DamageContributor for Juggernaut {
    fn damage_multiplier(
        &self,
        _event: &DamageEvent,
        _scope: Scope,
    ) -> Result<Option<f32>, ModifierFault> {
        Ok(Some(0.5))
    }
}

/// Every player draws three skills this round.
pub struct SkillFrenzy;

/// Skill count set by [`SkillFrenzy`].
pub const FRENZY_SKILL_COUNT: usize = 3;

impl Modifier for SkillFrenzy {
    fn name(&self) -> &str {
        "SkillFrenzy"
    }

    fn display_name(&self) -> &str {
        "Skill Frenzy"
    }

    fn default_weight(&self) -> u32 {
        5
    }

    fn apply(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        ctx.directives.set_count_per_player(FRENZY_SKILL_COUNT);
        Ok(())
    }
}

/// Only headshots deal damage.
pub struct Headhunter;

impl Modifier for Headhunter {
    fn name(&self) -> &str {
        "Headhunter"
    }

    fn description(&self) -> &str {
        "Only headshots deal damage"
    }

    fn default_weight(&self) -> u32 {
        5
    }

    fn apply(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        Ok(())
    }

    fn as_damage_contributor(&self) -> Option<&dyn DamageContributor> {
        Some(self as &dyn DamageContributor)
    }
}

impl DamageContributor for Headhunter {
    fn damage_multiplier(
        &self,
        event: &DamageEvent,
        _scope: Scope,
    ) -> Result<Option<f32>, ModifierFault> {
        Ok((!event.headshot).then_some(0.0))
    }
}
