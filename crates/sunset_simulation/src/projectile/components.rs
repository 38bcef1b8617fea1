//! Projectile components: контроллер фазы, кинематика, timeout

use bevy::prelude::*;

use super::phase::{HitEffect, ProjectilePhaseController};
use crate::effects::{ApplyEffect, EffectClass, DATA_DAMAGE};

/// Снаряд (standard или boomerang)
#[derive(Component, Debug, Clone)]
pub struct NeonProjectile {
    pub controller: ProjectilePhaseController,
    /// Standard hit / boomerang на возврате
    pub damage_effect: Option<EffectClass>,
    /// Boomerang на вылете
    pub corruption_effect: Option<EffectClass>,
    /// SetByCaller Data.Damage, передаётся вместе с damage эффектом
    pub damage_magnitude: Option<f32>,
}

impl NeonProjectile {
    pub fn new(controller: ProjectilePhaseController) -> Self {
        Self {
            controller,
            damage_effect: None,
            corruption_effect: None,
            damage_magnitude: None,
        }
    }

    pub fn with_damage_effect(mut self, effect: Option<EffectClass>) -> Self {
        self.damage_effect = effect;
        self
    }

    pub fn with_corruption_effect(mut self, effect: Option<EffectClass>) -> Self {
        self.corruption_effect = effect;
        self
    }

    pub fn with_damage_magnitude(mut self, magnitude: Option<f32>) -> Self {
        self.damage_magnitude = magnitude;
        self
    }

    pub fn effect_for(&self, hit: HitEffect) -> Option<&EffectClass> {
        match hit {
            HitEffect::Damage => self.damage_effect.as_ref(),
            HitEffect::Corruption => self.corruption_effect.as_ref(),
        }
    }

    /// ApplyEffect для попадания (Data.Damage только для damage эффекта)
    pub fn effect_request(&self, hit: HitEffect, target: Entity) -> Option<ApplyEffect> {
        let effect = self.effect_for(hit)?.clone();
        let request = ApplyEffect::new(self.controller.instigator(), target, effect);

        Some(match (hit, self.damage_magnitude) {
            (HitEffect::Damage, Some(magnitude)) => request.with_set_by_caller(DATA_DAMAGE, magnitude),
            _ => request,
        })
    }
}

/// Homing к цели (boomerang на возврате)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homing {
    pub target: Entity,
    /// units/sec²
    pub acceleration: f32,
}

/// Кинематика снаряда (без гравитации)
///
/// Не физика: только прямой полёт / homing, который настраивает контроллер.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileMovement {
    pub velocity: Vec3,
    pub max_speed: f32,
    pub homing: Option<Homing>,
}

impl ProjectileMovement {
    pub fn straight(direction: Vec3, speed: f32) -> Self {
        Self {
            velocity: direction.normalize_or_zero() * speed,
            max_speed: speed,
            homing: None,
        }
    }

    pub fn enable_homing(&mut self, target: Entity, acceleration: f32) {
        self.homing = Some(Homing {
            target,
            acceleration,
        });
    }

    pub fn is_homing(&self) -> bool {
        self.homing.is_some()
    }

    /// Один шаг интеграции. `homing_target` = None → летим прямо.
    pub fn step(&mut self, position: Vec3, homing_target: Option<Vec3>, delta_secs: f32) -> Vec3 {
        if let (Some(homing), Some(target)) = (self.homing, homing_target) {
            let to_target = (target - position).normalize_or_zero();
            self.velocity += to_target * homing.acceleration * delta_secs;
            self.velocity = self.velocity.clamp_length_max(self.max_speed);
        }

        position + self.velocity * delta_secs
    }
}

/// Независимый timeout снаряда (секунды)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileLifetime {
    pub remaining_secs: f32,
}

impl ProjectileLifetime {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining_secs: secs,
        }
    }

    /// true → время вышло
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        self.remaining_secs -= delta_secs;
        self.remaining_secs <= 0.0
    }
}
