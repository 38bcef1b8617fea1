//! Sunset Simulation Core
//!
//! ECS-симуляция gameplay правил на Bevy 0.16 (headless)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = rules layer (атрибуты, эффекты, damage combo, фазы снарядов)
//! - Host engine = physics, rendering, collision broker (шлёт ProjectileCollision)
//!
//! Combo: Corruption (boomerang на вылете) + Neon damage (на возврате) = ×2.5

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod actor;
pub mod attributes;
pub mod combat;
pub mod config;
pub mod effects;
pub mod logger;
pub mod projectile;

// Re-export базовых типов для удобства
pub use actor::{spawn_actor, Actor, ActorKind};
pub use attributes::{
    Attribute, AttributeChanged, AttributesPlugin, DamageReactionTriggered, DamageTaken,
    NeonAttributeSet, ResourceKind, Stat,
};
pub use combat::{execute_damage, resolve_damage, DamageContext, DamageExecution};
pub use config::{AttributeDefaults, AttributeProfile, DamageConfig, ProjectileConfig, SimulationConfig};
pub use effects::{
    AbilitySystem, ApplyEffect, EffectApplied, EffectClass, EffectRegistry, EffectsPlugin,
    GameplayTag, GameplayTagContainer, SetByCallerMagnitudes, CORRUPTION_EFFECT, DATA_DAMAGE,
    HEAL_EFFECT, NEON_DAMAGE_EFFECT,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use projectile::{
    NeonProjectile, ProjectileCollision, ProjectilePhase, ProjectilePlugin, ProjectileSpawned,
    ProjectileTerminated, SpawnMode, SpawnProjectile, TerminationReason,
};

/// Порядок фаз FixedUpdate тика (chain)
///
/// Projectiles → Effects → Reactions → Cleanup:
/// попадание этого тика применяется и отражается в том же тике.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Спавн, движение, фазы, коллизии, timeout
    Projectiles,
    /// ApplyEffect → атрибуты/теги, истечение статусов
    Effects,
    /// DamageTaken → стратегии реакции
    Reactions,
    /// Деспавн уничтоженных снарядов
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Projectiles,
                    SimulationSet::Effects,
                    SimulationSet::Reactions,
                    SimulationSet::Cleanup,
                )
                    .chain(),
            );

        // Host может вставить свой seed / конфиг до plugin'а
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
        if !app.world().contains_resource::<SimulationConfig>() {
            app.insert_resource(SimulationConfig::default());
        }

        app.add_plugins((AttributesPlugin, EffectsPlugin, ProjectilePlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время шагает ровно на 1/60 сек за `app.update()` (не зависит от wall clock).
/// SimulationPlugin добавляет вызывающий.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            std::time::Duration::from_secs_f64(1.0 / 60.0),
        ));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сериализуются через Debug, entities сортируются по index.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
