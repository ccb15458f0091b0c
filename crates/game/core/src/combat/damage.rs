//! Damage event value and multiplicative composition.

use crate::state::PlayerId;

/// One damage instance as reported by the engine boundary.
///
/// Created by the host adapter, routed through the damage pipeline exactly
/// once, and discarded after the engine commits the final amount.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageEvent {
    /// Player dealing the damage; `None` for world damage (fall, bomb).
    pub attacker: Option<PlayerId>,

    /// Player receiving the damage.
    pub victim: PlayerId,

    /// Damage before any modifier adjusts it.
    pub base_amount: f32,

    /// Weapon designer name, if the engine reported one.
    pub weapon: Option<String>,

    /// True for hits to the head hitgroup.
    pub headshot: bool,

    multiplier: f32,
}

impl DamageEvent {
    pub fn new(victim: PlayerId, base_amount: f32) -> Self {
        Self {
            attacker: None,
            victim,
            base_amount,
            weapon: None,
            headshot: false,
            multiplier: 1.0,
        }
    }

    #[must_use]
    pub fn with_attacker(mut self, attacker: PlayerId) -> Self {
        self.attacker = Some(attacker);
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }

    #[must_use]
    pub fn with_headshot(mut self, headshot: bool) -> Self {
        self.headshot = headshot;
        self
    }

    /// Multiplier accumulated so far (1.0 until the pipeline runs).
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Scales the accumulated multiplier.
    pub fn scale(&mut self, factor: f32) {
        self.multiplier *= factor;
    }

    /// Damage the engine should commit.
    pub fn final_amount(&self) -> f32 {
        self.base_amount * self.multiplier
    }

    /// True when the attacker damaged themselves.
    pub fn is_self_damage(&self) -> bool {
        self.attacker == Some(self.victim)
    }
}

/// Returns true for multipliers the pipeline accepts (finite, non-negative).
pub fn is_valid_multiplier(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Folds contributions by multiplication, defaulting to exactly `1.0`.
///
/// Contributions are sorted before folding and multiplied in `f64`, so the
/// result is bit-identical for any order in which they were collected.
pub fn compose_multipliers<I>(contributions: I) -> f32
where
    I: IntoIterator<Item = f32>,
{
    let mut values: Vec<f32> = contributions.into_iter().collect();
    values.sort_by(f32::total_cmp);
    values.iter().fold(1.0f64, |acc, &v| acc * v as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_contributions_is_identity() {
        assert_eq!(compose_multipliers(std::iter::empty()), 1.0);
    }

    #[test]
    fn contributions_multiply_not_add() {
        assert_eq!(compose_multipliers([0.4, 2.0]), 0.8);
        assert_eq!(compose_multipliers([0.5, 2.0]), 1.0);
        assert_eq!(compose_multipliers([2.0, 0.5]), 1.0);
    }

    #[test]
    fn final_amount_uses_accumulated_multiplier() {
        let mut event = DamageEvent::new(PlayerId(2), 50.0).with_attacker(PlayerId(1));
        event.scale(0.5);
        assert_eq!(event.final_amount(), 25.0);
        assert!(!event.is_self_damage());
    }

    #[test]
    fn invalid_multipliers_are_flagged() {
        assert!(is_valid_multiplier(0.0));
        assert!(!is_valid_multiplier(-0.5));
        assert!(!is_valid_multiplier(f32::NAN));
        assert!(!is_valid_multiplier(f32::INFINITY));
    }

    proptest! {
        #[test]
        fn fold_is_order_independent(
            values in proptest::collection::vec(0.05f32..8.0, 0..8),
            rotation in 0usize..8,
        ) {
            let forward = compose_multipliers(values.iter().copied());
            let mut reversed = values.clone();
            reversed.reverse();
            let mut rotated = values.clone();
            if !rotated.is_empty() {
                let k = rotation % rotated.len();
                rotated.rotate_left(k);
            }

            prop_assert_eq!(forward.to_bits(), compose_multipliers(reversed).to_bits());
            prop_assert_eq!(forward.to_bits(), compose_multipliers(rotated).to_bits());
        }
    }
}
