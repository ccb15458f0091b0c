//! Reserved slot bodies.

use game_core::{
    Audience, DamageContributor, DamageEvent, Modifier, ModifierFault, RoundContext, Scope,
};

/// Multiplier heavy armor applies to body shots.
pub const HEAVY_ARMOR_MULTIPLIER: f32 = 0.4;

/// Heavy armor: body shots deal 40% damage. Headshots are unaffected.
pub struct HeavyArmor;

impl Modifier for HeavyArmor {
    fn name(&self) -> &str {
        "HeavyArmor"
    }

    fn display_name(&self) -> &str {
        "Heavy Armor"
    }

    fn apply(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        Ok(())
    }

    fn as_damage_contributor(&self) -> Option<&dyn DamageContributor> {
        Some(self as &dyn DamageContributor)
    }
}

impl DamageContributor for HeavyArmor {
    fn damage_multiplier(
        &self,
        event: &DamageEvent,
        _scope: Scope,
    ) -> Result<Option<f32>, ModifierFault> {
        Ok((!event.headshot).then_some(HEAVY_ARMOR_MULTIPLIER))
    }
}

/// Money every player receives after a round.
pub const ROUND_MONEY_CONVAR: &str = "mp_afterroundmoney";
const WELFARE_MONEY: &str = "1000";

/// Welfare: every player gets a cash handout at round end.
pub struct Welfare {
    saved: Option<String>,
}

impl Welfare {
    pub fn new() -> Self {
        Self { saved: None }
    }
}

impl Default for Welfare {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Welfare {
    fn name(&self) -> &str {
        "Welfare"
    }

    fn apply(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        self.saved = ctx.engine.convar(ROUND_MONEY_CONVAR);
        ctx.engine.set_convar(ROUND_MONEY_CONVAR, WELFARE_MONEY)?;
        ctx.engine
            .notify(Audience::All, "Welfare: everyone gets $1000 after the round");
        Ok(())
    }

    fn revert(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
        let previous = self.saved.take();
        ctx.engine
            .set_convar(ROUND_MONEY_CONVAR, previous.as_deref().unwrap_or("0"))?;
        Ok(())
    }
}
