//! Projectile module (standard + boomerang)
//!
//! ECS ответственность:
//! - ProjectilePhaseController: фазы, дедупликация попаданий, destroy
//! - Кинематика: прямой полёт / homing к владельцу
//! - ApplyEffect запросы в effect pipeline
//!
//! Host ответственность:
//! - Collision detection → ProjectileCollision events
//! - Визуал снаряда (ProjectileSpawned / ProjectileTerminated)

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod phase;
pub mod systems;


pub use components::{Homing, NeonProjectile, ProjectileLifetime, ProjectileMovement};
pub use events::{
    ProjectileCollision, ProjectileSpawned, ProjectileTerminated, SpawnMode, SpawnProjectile,
    TerminationReason,
};
pub use phase::{
    BlockingOutcome, BoomerangState, CollisionOutcome, HitEffect, IgnoreReason, ProjectileMode,
    ProjectilePhase, ProjectilePhaseController, TickOutcome,
};
pub use systems::*;

/// Projectile Plugin
///
/// Порядок выполнения (SimulationSet::Projectiles, chain):
/// 1. spawn_projectiles
/// 2. integrate_projectile_movement
/// 3. evaluate_projectile_phases — до коллизий этого тика
/// 4. handle_projectile_collisions
/// 5. tick_projectile_lifetimes
///
/// despawn_terminated_projectiles — SimulationSet::Cleanup
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnProjectile>()
            .add_event::<ProjectileCollision>()
            .add_event::<ProjectileSpawned>()
            .add_event::<ProjectileTerminated>();

        app.add_systems(
            FixedUpdate,
            (
                spawn_projectiles,
                integrate_projectile_movement,
                evaluate_projectile_phases,
                handle_projectile_collisions,
                tick_projectile_lifetimes,
            )
                .chain()
                .in_set(crate::SimulationSet::Projectiles),
        );

        app.add_systems(
            FixedUpdate,
            despawn_terminated_projectiles.in_set(crate::SimulationSet::Cleanup),
        );
    }
}
