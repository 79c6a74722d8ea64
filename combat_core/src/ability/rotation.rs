//! Rotation - Player action selection policy

use super::AbilityState;

/// Snapshot of the player's state handed to a rotation strategy each tick
pub struct RotationContext<'a> {
    pub abilities: &'a [AbilityState],
    pub elapsed: f64,
    pub resource: f64,
    pub max_resource: f64,
    /// Player health fraction at normal difficulty
    pub health_fraction: f64,
    pub use_cooldowns: bool,
}

impl RotationContext<'_> {
    /// Current resource as a fraction of the pool (0 when there is no pool)
    pub fn resource_fraction(&self) -> f64 {
        if self.max_resource <= 0.0 {
            return 0.0;
        }
        (self.resource / self.max_resource).clamp(0.0, 1.0)
    }

    /// Whether the ability at `index` is ready, affordable and allowed
    pub fn is_usable(&self, index: usize) -> bool {
        let Some(state) = self.abilities.get(index) else {
            return false;
        };
        if state.definition.major_cooldown && !self.use_cooldowns {
            return false;
        }
        if state.definition.resource_cost > self.resource {
            return false;
        }
        state.is_ready(self.elapsed, self.resource_fraction(), self.health_fraction)
    }
}

/// Chooses the player's next ability; `None` falls back to an auto-attack
pub trait RotationStrategy: Send + Sync {
    fn next_ability(&self, context: &RotationContext<'_>) -> Option<usize>;
}

/// Fixed-priority rotation: the first usable ability in list order
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityRotation;

impl RotationStrategy for PriorityRotation {
    fn next_ability(&self, context: &RotationContext<'_>) -> Option<usize> {
        (0..context.abilities.len()).find(|&index| context.is_usable(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityDefinition, AbilityEffect, AbilityTrigger, DamageSchool};

    fn ability(id: &str, cost: f64, major: bool) -> AbilityState {
        AbilityState::new(AbilityDefinition {
            id: id.to_string(),
            name: id.to_string(),
            resource_cost: cost,
            cooldown: 6.0,
            effect: AbilityEffect::Damage {
                min: 5.0,
                max: 5.0,
                coefficient: 1.0,
                school: DamageSchool::Physical,
            },
            trigger: AbilityTrigger::OnCooldownReady,
            major_cooldown: major,
        })
    }

    fn context(abilities: &[AbilityState], resource: f64, use_cooldowns: bool) -> RotationContext<'_> {
        RotationContext {
            abilities,
            elapsed: 1.0,
            resource,
            max_resource: 100.0,
            health_fraction: 1.0,
            use_cooldowns,
        }
    }

    #[test]
    fn test_picks_first_affordable() {
        let abilities = vec![ability("big", 50.0, false), ability("small", 10.0, false)];
        let ctx = context(&abilities, 20.0, true);
        assert_eq!(PriorityRotation.next_ability(&ctx), Some(1));
    }

    #[test]
    fn test_major_cooldowns_gated_by_setting() {
        let abilities = vec![ability("avatar", 0.0, true), ability("strike", 10.0, false)];

        let without = context(&abilities, 20.0, false);
        assert_eq!(PriorityRotation.next_ability(&without), Some(1));

        let with = context(&abilities, 20.0, true);
        assert_eq!(PriorityRotation.next_ability(&with), Some(0));
    }

    #[test]
    fn test_nothing_usable_returns_none() {
        let mut abilities = vec![ability("strike", 10.0, false)];
        abilities[0].mark_used(1.0);
        let ctx = context(&abilities, 100.0, true);
        assert_eq!(PriorityRotation.next_ability(&ctx), None);
    }
}
