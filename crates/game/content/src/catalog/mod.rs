//! Built-in modifier catalog.
//!
//! A small set of concrete events, skills and reserved slots. Effect bodies
//! only touch the world through [`EngineHandle`](game_core::EngineHandle),
//! so the catalog runs unchanged against a real engine adapter or the
//! simulated one.

mod events;
mod reserved;
mod skills;

pub use events::{
    FRENZY_SKILL_COUNT, GRAVITY_CONVAR, Headhunter, Juggernaut, LowGravity, NoEvent, SkillFrenzy,
};
pub use reserved::{HEAVY_ARMOR_MULTIPLIER, HeavyArmor, ROUND_MONEY_CONVAR, Welfare};
pub use skills::{GlassCannon, Ironclad, MEDIC_HEALTH, Marksman, Medic};

use game_core::Modifier;

/// Priority of the heavy armor slot (runs first).
pub const HEAVY_ARMOR_PRIORITY: i32 = 0;
/// Priority of the welfare slot.
pub const WELFARE_PRIORITY: i32 = 10;

/// Every built-in event, in registration order.
pub fn events() -> Vec<Box<dyn Modifier>> {
    vec![
        Box::new(NoEvent) as Box<dyn Modifier>,
        Box::new(LowGravity::new()) as Box<dyn Modifier>,
        Box::new(Juggernaut) as Box<dyn Modifier>,
        Box::new(SkillFrenzy) as Box<dyn Modifier>,
        Box::new(Headhunter) as Box<dyn Modifier>,
    ]
}

/// Every built-in skill, in registration order.
pub fn skills() -> Vec<Box<dyn Modifier>> {
    vec![
        Box::new(Medic) as Box<dyn Modifier>,
        Box::new(GlassCannon) as Box<dyn Modifier>,
        Box::new(Ironclad) as Box<dyn Modifier>,
        Box::new(Marksman) as Box<dyn Modifier>,
    ]
}

/// Reserved slots with their priority and default enable flag.
pub fn reserved() -> Vec<(Box<dyn Modifier>, i32, bool)> {
    vec![
        (Box::new(HeavyArmor) as Box<dyn Modifier>, HEAVY_ARMOR_PRIORITY, true),
        (Box::new(Welfare::new()) as Box<dyn Modifier>, WELFARE_PRIORITY, true),
    ]
}
