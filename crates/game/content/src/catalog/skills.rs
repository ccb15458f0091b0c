//! Per-player skills.

use game_core::{
    DamageContributor, DamageEvent, Modifier, ModifierFault, RoundContext, Scope,
};

/// Health granted by [`Medic`].
pub const MEDIC_HEALTH: i32 = 150;
const BASE_HEALTH: i32 = 100;

fn target_player(ctx: &RoundContext<'_>) -> Result<game_core::PlayerId, ModifierFault> {
    ctx.player()
        .ok_or_else(|| ModifierFault::new("skill applied without a player target"))
}

/// Starts the round with extra health.
pub struct Medic;

impl Modifier for Medic {
    fn name(&self) -> &str {
        "Medic"
    }

    fn description(&self) -> &str {
        "Spawn with 150 health"
    }

    fn apply(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        let player = target_player(ctx)?;
        ctx.engine.set_health(player, MEDIC_HEALTH)?;
        Ok(())
    }

    fn revert(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        let player = target_player(ctx)?;
        // Dead players have nothing to restore.
        if ctx.engine.is_alive(player) {
            ctx.engine.set_health(player, BASE_HEALTH)?;
        }
        Ok(())
    }
}

/// Deals and takes 50% more damage.
pub struct GlassCannon;

impl Modifier for GlassCannon {
    fn name(&self) -> &str {
        "GlassCannon"
    }

    fn display_name(&self) -> &str {
        "Glass Cannon"
    }

    fn apply(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        Ok(())
    }

    fn as_damage_contributor(&self) -> Option<&dyn DamageContributor> {
        Some(self as &dyn DamageContributor)
    }
}

impl DamageContributor for GlassCannon {
    fn damage_multiplier(
        &self,
        _event: &DamageEvent,
        scope: Scope,
    ) -> Result<Option<f32>, ModifierFault> {
        Ok(match scope {
            Scope::Attacker | Scope::Victim => Some(1.5),
            Scope::Server => None,
        })
    }
}

/// Takes 30% less damage from other players.
pub struct Ironclad;

impl Modifier for Ironclad {
    fn name(&self) -> &str {
        "Ironclad"
    }

    fn apply(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        Ok(())
    }

    fn as_damage_contributor(&self) -> Option<&dyn DamageContributor> {
        Some(self as &dyn DamageContributor)
    }
}

impl DamageContributor for Ironclad {
    fn damage_multiplier(
        &self,
        event: &DamageEvent,
        scope: Scope,
    ) -> Result<Option<f32>, ModifierFault> {
        let from_other = event.attacker.is_some() && !event.is_self_damage();
        Ok((scope == Scope::Victim && from_other).then_some(0.7))
    }
}

/// Headshots deal double damage. Pointless during Headhunter, so it sits
/// those rounds out.
pub struct Marksman;

impl Modifier for Marksman {
    fn name(&self) -> &str {
        "Marksman"
    }

    fn apply(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        Ok(())
    }

    fn allows_with(&self, event: Option<&str>) -> bool {
        event != Some("Headhunter")
    }

    fn as_damage_contributor(&self) -> Option<&dyn DamageContributor> {
        Some(self as &dyn DamageContributor)
    }
}

impl DamageContributor for Marksman {
    fn damage_multiplier(
        &self,
        event: &DamageEvent,
        scope: Scope,
    ) -> Result<Option<f32>, ModifierFault> {
        Ok((scope == Scope::Attacker && event.headshot).then_some(2.0))
    }
}
