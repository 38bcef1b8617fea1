//! Дизайнерская конфигурация симуляции
//!
//! Host интеграция собирает SimulationConfig (из ассетов/файла через serde)
//! и вставляет как resource до старта. Defaults совпадают с игровыми.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actor::ActorKind;
use crate::attributes::Stat;

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub attributes: AttributeDefaults,
    pub damage: DamageConfig,
    pub projectile: ProjectileConfig,
}

/// Стартовые значения атрибутов одного вида акторов
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeProfile {
    pub health: Stat,
    pub neon: Stat,
    pub stamina: Stat,
    pub ultimate_charge: Stat,
}

impl Default for AttributeProfile {
    fn default() -> Self {
        Self {
            health: Stat::full(100.0),
            neon: Stat::full(100.0),
            stamina: Stat::full(100.0),
            ultimate_charge: Stat::new(0.0, 50.0), // Ultimate стартует пустым
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeDefaults {
    pub player: AttributeProfile,
    pub enemy: AttributeProfile,
}

impl Default for AttributeDefaults {
    fn default() -> Self {
        Self {
            player: AttributeProfile::default(),
            enemy: AttributeProfile {
                // Враги стартуют без Neon
                neon: Stat::new(0.0, 100.0),
                ..AttributeProfile::default()
            },
        }
    }
}

impl AttributeDefaults {
    pub fn for_kind(&self, kind: ActorKind) -> &AttributeProfile {
        match kind {
            ActorKind::Player => &self.player,
            ActorKind::Enemy => &self.enemy,
        }
    }
}

/// Параметры damage execution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    /// Подставляется, если эффект не передал Data.Damage
    pub fallback_base_damage: f32,
    /// Neon урон по Corrupted цели
    pub combo_multiplier: f32,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            fallback_base_damage: 10.0,
            combo_multiplier: 2.5,
        }
    }
}

/// Параметры снаряда (кинематика + boomerang)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// units/sec
    pub speed: f32,
    pub max_travel_distance: f32,
    /// Boomerang уничтожается ближе этого расстояния к владельцу
    pub arrival_radius: f32,
    /// Сильный homing, чтобы boomerang не уходил на орбиту вокруг владельца
    pub homing_acceleration: f32,
    /// Независимый timeout (секунды)
    pub lifespan_secs: f32,
    /// Радиус сферы коллизии (host использует для overlap)
    pub collision_radius: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 2000.0,
            max_travel_distance: 1000.0,
            arrival_radius: 100.0,
            homing_acceleration: 8000.0,
            lifespan_secs: 10.0,
            collision_radius: 15.0,
        }
    }
}
