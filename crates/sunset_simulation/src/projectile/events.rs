//! Projectile events
//!
//! - SpawnProjectile: ability → ECS (запрос на выстрел)
//! - ProjectileCollision: host collision broker → ECS
//! - ProjectileSpawned / ProjectileTerminated: ECS → host (visual lifecycle)

use bevy::prelude::*;

use crate::effects::EffectClass;

/// Режим запрошенного снаряда
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnMode {
    Standard,
    /// None → ProjectileConfig::max_travel_distance
    Boomerang { max_travel_distance: Option<f32> },
}

/// Event: выпустить снаряд
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SpawnProjectile {
    /// Кто стреляет (self-hit + цель возврата boomerang'а)
    pub instigator: Option<Entity>,
    pub origin: Vec3,
    pub direction: Vec3,
    pub mode: SpawnMode,
    pub damage_effect: Option<EffectClass>,
    pub corruption_effect: Option<EffectClass>,
    /// SetByCaller Data.Damage для damage эффекта (None → из definition)
    pub damage_magnitude: Option<f32>,
}

/// Event: коллизия снаряда (от host physics)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ProjectileCollision {
    /// Blocking hit (стены, препятствия)
    Blocking {
        projectile: Entity,
        other: Option<Entity>,
        /// Hit действительно blocking (не sweep/touch)
        blocking: bool,
    },
    /// Overlap с актором (персонажи, враги)
    Overlap {
        projectile: Entity,
        other: Option<Entity>,
    },
}

impl ProjectileCollision {
    pub fn projectile(&self) -> Entity {
        match self {
            ProjectileCollision::Blocking { projectile, .. }
            | ProjectileCollision::Overlap { projectile, .. } => *projectile,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawned {
    pub projectile: Entity,
    pub instigator: Option<Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Standard: hit актора или стены
    Collision,
    /// Boomerang долетел до владельца
    ArrivedAtOwner,
    LifetimeExpired,
}

/// Event: снаряд уничтожен (entity деспавнится в SimulationSet::Cleanup)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileTerminated {
    pub projectile: Entity,
    pub reason: TerminationReason,
}
