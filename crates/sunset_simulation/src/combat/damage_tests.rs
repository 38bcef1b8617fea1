//! Tests for damage execution.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::attributes::{DamageTaken, NeonAttributeSet};
    use crate::combat::damage::{execute_damage, resolve_damage, DamageContext};
    use crate::config::DamageConfig;
    use crate::effects::tags::{GameplayTagContainer, DAMAGE_TYPE_NEON, STATUS_CORRUPTED};

    fn config() -> DamageConfig {
        DamageConfig::default()
    }

    fn context(base: Option<f32>, corrupted: bool, neon: bool) -> DamageContext {
        DamageContext {
            base_damage: base,
            source_tags: if neon {
                GameplayTagContainer::from_tags([DAMAGE_TYPE_NEON])
            } else {
                GameplayTagContainer::new()
            },
            target_tags: if corrupted {
                GameplayTagContainer::from_tags([STATUS_CORRUPTED])
            } else {
                GameplayTagContainer::new()
            },
        }
    }

    #[test]
    fn test_combo_neon_vs_corrupted() {
        assert_eq!(resolve_damage(Some(10.0), true, true, &config()), 25.0);
    }

    #[test]
    fn test_no_combo_without_neon() {
        assert_eq!(resolve_damage(Some(10.0), true, false, &config()), 10.0);
    }

    #[test]
    fn test_no_combo_without_corruption() {
        assert_eq!(resolve_damage(Some(10.0), false, true, &config()), 10.0);
    }

    #[test]
    fn test_fallback_when_base_absent() {
        assert_eq!(resolve_damage(None, false, false, &config()), 10.0);
        // Fallback тоже умножается
        assert_eq!(resolve_damage(None, true, true, &config()), 25.0);
    }

    #[test]
    fn test_execute_submits_negative_delta() {
        let target = Entity::from_raw(3);
        let mut attributes = NeonAttributeSet::new(target);

        let execution = execute_damage(&context(Some(20.0), true, true), &mut attributes, &config());

        assert!(execution.combo);
        assert!(!execution.used_fallback);
        assert_eq!(execution.final_damage, 50.0);
        assert_eq!(attributes.health().current, 50.0);

        let change = execution.change.expect("damage should be submitted");
        assert_eq!(
            change.damage_taken,
            Some(DamageTaken {
                damage: 50.0,
                target,
            })
        );
    }

    #[test]
    fn test_execute_zero_damage_is_noop() {
        let mut attributes = NeonAttributeSet::new(Entity::from_raw(3));

        let execution = execute_damage(&context(Some(0.0), true, true), &mut attributes, &config());
        assert!(execution.change.is_none());

        let execution = execute_damage(&context(Some(-15.0), false, false), &mut attributes, &config());
        assert!(execution.change.is_none());

        assert_eq!(attributes.health().current, 100.0);
    }

    #[test]
    fn test_context_tag_hierarchy() {
        let ctx = DamageContext {
            base_damage: Some(5.0),
            source_tags: GameplayTagContainer::from_tags(["Damage.Type.Neon.Pulse"]),
            target_tags: GameplayTagContainer::from_tags(["Status.Corrupted.Heavy"]),
        };

        assert!(ctx.is_neon_damage());
        assert!(ctx.target_is_corrupted());
    }

    #[test]
    fn test_custom_multiplier() {
        let config = DamageConfig {
            fallback_base_damage: 4.0,
            combo_multiplier: 3.0,
        };

        assert_eq!(resolve_damage(None, true, true, &config), 12.0);
        assert_eq!(resolve_damage(None, false, true, &config), 4.0);
    }
}
