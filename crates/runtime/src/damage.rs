//! Damage composition.
//!
//! For one damage instance the pipeline asks every active modifier that
//! exposes a [`DamageContributor`](game_core::DamageContributor) for an
//! optional multiplier and folds the answers by multiplication. The fold is
//! order independent, so callers may gather contributors in any order.

use game_core::{DamageEvent, Modifier, Scope, compose_multipliers, is_valid_multiplier};
use tracing::{debug, error, warn};

use crate::lifecycle::guarded;

/// Multiplicative damage fold over active modifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct DamageCompositionPipeline;

impl DamageCompositionPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Returns the product of every contribution, or exactly `1.0` when
    /// nothing contributes.
    ///
    /// Faulting contributors and invalid multipliers (negative, NaN or
    /// infinite) are logged and count as no contribution.
    pub fn resolve<'a, I>(&self, event: &DamageEvent, contributors: I) -> f32
    where
        I: IntoIterator<Item = (Scope, &'a dyn Modifier)>,
    {
        let mut contributions = Vec::new();

        for (scope, modifier) in contributors {
            let Some(contributor) = modifier.as_damage_contributor() else {
                continue;
            };

            match guarded(|| contributor.damage_multiplier(event, scope)) {
                Ok(Some(value)) if is_valid_multiplier(value) => {
                    debug!(
                        target: "runtime::damage",
                        modifier = modifier.name(),
                        scope = %scope,
                        multiplier = value,
                        "contribution"
                    );
                    contributions.push(value);
                }
                Ok(Some(value)) => warn!(
                    target: "runtime::damage",
                    modifier = modifier.name(),
                    multiplier = value,
                    "ignoring invalid multiplier"
                ),
                Ok(None) => {}
                Err(fault) => error!(
                    target: "runtime::damage",
                    modifier = modifier.name(),
                    scope = %scope,
                    error = %fault,
                    "damage contributor faulted, ignoring"
                ),
            }
        }

        compose_multipliers(contributions)
    }

    /// Resolves and scales `event` in place.
    pub fn apply<'a, I>(&self, event: &mut DamageEvent, contributors: I) -> f32
    where
        I: IntoIterator<Item = (Scope, &'a dyn Modifier)>,
    {
        let multiplier = self.resolve(event, contributors);
        event.scale(multiplier);
        multiplier
    }
}

#[cfg(test)]
mod tests {
    use game_core::{DamageContributor, ModifierFault, PlayerId, RoundContext};

    use super::*;
    use crate::testing::Counted;

    fn hit() -> DamageEvent {
        DamageEvent::new(PlayerId(2), 100.0).with_attacker(PlayerId(1))
    }

    #[test]
    fn no_contributors_yields_identity() {
        let pipeline = DamageCompositionPipeline::new();
        assert_eq!(pipeline.resolve(&hit(), std::iter::empty()), 1.0);

        let silent = Counted::new("Silent", 1);
        assert_eq!(pipeline.resolve(&hit(), [(Scope::Server, &silent as &dyn Modifier)]), 1.0);
    }

    #[test]
    fn armor_and_bonus_compose_multiplicatively() {
        let armor = Counted::new("HeavyArmor", 1).contributing(0.4);
        let bonus = Counted::new("Pairing", 1).contributing(2.0);
        let pipeline = DamageCompositionPipeline::new();

        let forward = pipeline.resolve(
            &hit(),
            [
                (Scope::Server, &armor as &dyn Modifier),
                (Scope::Attacker, &bonus as &dyn Modifier),
            ],
        );
        let backward = pipeline.resolve(
            &hit(),
            [
                (Scope::Attacker, &bonus as &dyn Modifier),
                (Scope::Server, &armor as &dyn Modifier),
            ],
        );

        assert_eq!(forward, 0.8);
        assert_eq!(forward.to_bits(), backward.to_bits());
    }

    struct Panicky;

    impl Modifier for Panicky {
        fn name(&self) -> &str {
            "Panicky"
        }

        fn apply(&mut self, _ctx: &mut RoundContext<'_>) -> Result<(), ModifierFault> {
            Ok(())
        }

        fn as_damage_contributor(&self) -> Option<&dyn DamageContributor> {
            Some(self as &dyn DamageContributor)
        }
    }

    impl DamageContributor for Panicky {
        fn damage_multiplier(
            &self,
            _event: &DamageEvent,
            _scope: Scope,
        ) -> Result<Option<f32>, ModifierFault> {
            panic!("lost the victim pawn")
        }
    }

    #[test]
    fn faults_and_invalid_values_are_skipped() {
        let half = Counted::new("Half", 1).contributing(0.5);
        let negative = Counted::new("Negative", 1).contributing(-3.0);
        let nan = Counted::new("Nan", 1).contributing(f32::NAN);
        let pipeline = DamageCompositionPipeline::new();

        let mut event = hit();
        let multiplier = pipeline.apply(
            &mut event,
            [
                (Scope::Victim, &Panicky as &dyn Modifier),
                (Scope::Server, &negative as &dyn Modifier),
                (Scope::Server, &nan as &dyn Modifier),
                (Scope::Victim, &half as &dyn Modifier),
            ],
        );

        assert_eq!(multiplier, 0.5);
        assert_eq!(event.final_amount(), 50.0);
    }
}
