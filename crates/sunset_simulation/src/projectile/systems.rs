//! Projectile systems (SimulationSet::Projectiles + Cleanup)
//!
//! Порядок внутри тика (как у host: movement → collision callbacks):
//! 1. spawn_projectiles
//! 2. integrate_projectile_movement
//! 3. evaluate_projectile_phases — дистанция / прибытие
//! 4. handle_projectile_collisions — blocking + overlap
//! 5. tick_projectile_lifetimes

use bevy::prelude::*;

use super::components::{NeonProjectile, ProjectileLifetime, ProjectileMovement};
use super::events::{
    ProjectileCollision, ProjectileSpawned, ProjectileTerminated, SpawnMode, SpawnProjectile,
    TerminationReason,
};
use super::phase::{BlockingOutcome, CollisionOutcome, ProjectilePhaseController, TickOutcome};
use crate::config::SimulationConfig;
use crate::effects::{AbilitySystem, ApplyEffect};

/// Система: SpawnProjectile → entity снаряда
pub fn spawn_projectiles(
    mut commands: Commands,
    mut requests: EventReader<SpawnProjectile>,
    config: Res<SimulationConfig>,
    mut spawned_events: EventWriter<ProjectileSpawned>,
) {
    let projectile_config = &config.projectile;

    for request in requests.read() {
        let mut controller =
            ProjectilePhaseController::new(request.instigator, projectile_config.arrival_radius);

        if let SpawnMode::Boomerang {
            max_travel_distance,
        } = request.mode
        {
            controller.init_boomerang(
                request.instigator,
                request.origin,
                max_travel_distance.unwrap_or(projectile_config.max_travel_distance),
            );
        }

        let projectile = NeonProjectile::new(controller)
            .with_damage_effect(request.damage_effect.clone())
            .with_corruption_effect(request.corruption_effect.clone())
            .with_damage_magnitude(request.damage_magnitude);

        let entity = commands
            .spawn((
                Transform::from_translation(request.origin),
                projectile,
                // Boomerang стартует прямым полётом (homing выключен)
                ProjectileMovement::straight(request.direction, projectile_config.speed),
                ProjectileLifetime::new(projectile_config.lifespan_secs),
            ))
            .id();

        spawned_events.write(ProjectileSpawned {
            projectile: entity,
            instigator: request.instigator,
        });

        crate::logger::log(&format!(
            "Projectile {:?} spawned: instigator={:?} mode={:?} origin={:?}",
            entity, request.instigator, request.mode, request.origin
        ));
    }
}

/// Система: кинематика (прямой полёт / homing к владельцу)
pub fn integrate_projectile_movement(
    mut projectiles: Query<(&mut Transform, &mut ProjectileMovement, &NeonProjectile)>,
    targets: Query<&Transform, Without<NeonProjectile>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (mut transform, mut movement, projectile) in projectiles.iter_mut() {
        if projectile.controller.is_terminated() {
            continue;
        }

        // Протухший handle цели → летим прямо
        let homing_target = movement
            .homing
            .and_then(|homing| targets.get(homing.target).ok())
            .map(|target| target.translation);

        transform.translation = movement.step(transform.translation, homing_target, delta);
    }
}

/// Система: per-tick оценка фазы boomerang'а
///
/// Владелец проверяется на liveness через query — уничтоженный владелец
/// делает снаряд инертным до timeout'а.
pub fn evaluate_projectile_phases(
    mut projectiles: Query<(Entity, &Transform, &mut NeonProjectile, &mut ProjectileMovement)>,
    owners: Query<&Transform, Without<NeonProjectile>>,
    config: Res<SimulationConfig>,
    mut terminated_events: EventWriter<ProjectileTerminated>,
) {
    for (entity, transform, mut projectile, mut movement) in projectiles.iter_mut() {
        let owner_position = projectile
            .controller
            .owner()
            .and_then(|owner| owners.get(owner).ok())
            .map(|owner| owner.translation);

        match projectile.controller.tick(transform.translation, owner_position) {
            TickOutcome::EnteredReturning => {
                if let Some(owner) = projectile.controller.owner() {
                    movement.enable_homing(owner, config.projectile.homing_acceleration);
                }
            }
            TickOutcome::ArrivedAtOwner => {
                terminated_events.write(ProjectileTerminated {
                    projectile: entity,
                    reason: TerminationReason::ArrivedAtOwner,
                });
            }
            TickOutcome::Idle | TickOutcome::Inert => {}
        }
    }
}

/// Система: коллизии от host physics (в порядке доставки)
pub fn handle_projectile_collisions(
    mut collisions: EventReader<ProjectileCollision>,
    mut projectiles: Query<(&mut NeonProjectile, &mut ProjectileMovement)>,
    ability_systems: Query<(), With<AbilitySystem>>,
    config: Res<SimulationConfig>,
    mut apply_events: EventWriter<ApplyEffect>,
    mut terminated_events: EventWriter<ProjectileTerminated>,
) {
    for collision in collisions.read() {
        let entity = collision.projectile();

        // Уже деспавнен (destroy прошлого тика) — коллизия устарела
        let Ok((mut projectile, mut movement)) = projectiles.get_mut(entity) else {
            continue;
        };

        match *collision {
            ProjectileCollision::Blocking {
                other, blocking, ..
            } => match projectile.controller.on_blocking_hit(blocking) {
                BlockingOutcome::Terminated => {
                    terminated_events.write(ProjectileTerminated {
                        projectile: entity,
                        reason: TerminationReason::Collision,
                    });
                }
                BlockingOutcome::ForcedReturn => {
                    crate::logger::log(&format!(
                        "Boomerang {:?} hit wall {:?}. Forcing Return.",
                        entity, other
                    ));
                    if let Some(owner) = projectile.controller.owner() {
                        movement.enable_homing(owner, config.projectile.homing_acceleration);
                    }
                }
                BlockingOutcome::Ignored => {}
            },
            ProjectileCollision::Overlap { other, .. } => {
                let has_ability_system = other.is_some_and(|target| ability_systems.contains(target));

                let CollisionOutcome::Hit { effect, terminate } = projectile
                    .controller
                    .handle_collision(other, has_ability_system)
                else {
                    continue;
                };

                // Hit всегда несёт актора
                let Some(target) = other else {
                    continue;
                };

                match projectile.effect_request(effect, target) {
                    Some(request) => {
                        crate::logger::log(&format!(
                            "🎯 Projectile {:?} hit {:?} ({:?}) → {}",
                            entity,
                            target,
                            projectile.controller.phase(),
                            request.effect.as_str()
                        ));
                        apply_events.write(request);
                    }
                    None => {
                        crate::logger::log_warning(&format!(
                            "⚠️ Projectile {:?} has no {:?} effect configured — hit on {:?} applies nothing",
                            entity, effect, target
                        ));
                    }
                }

                if terminate {
                    terminated_events.write(ProjectileTerminated {
                        projectile: entity,
                        reason: TerminationReason::Collision,
                    });
                }
            }
        }
    }
}

/// Система: независимый timeout (в т.ч. для инертных boomerang'ов)
pub fn tick_projectile_lifetimes(
    mut projectiles: Query<(Entity, &mut ProjectileLifetime, &mut NeonProjectile)>,
    time: Res<Time<Fixed>>,
    mut terminated_events: EventWriter<ProjectileTerminated>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (entity, mut lifetime, mut projectile) in projectiles.iter_mut() {
        if lifetime.tick(delta) && projectile.controller.terminate() {
            crate::logger::log(&format!("⏱️ Projectile {:?} lifetime expired", entity));
            terminated_events.write(ProjectileTerminated {
                projectile: entity,
                reason: TerminationReason::LifetimeExpired,
            });
        }
    }
}

/// Система: деспавн уничтоженных снарядов (конец тика)
pub fn despawn_terminated_projectiles(
    mut commands: Commands,
    projectiles: Query<(Entity, &NeonProjectile)>,
) {
    for (entity, projectile) in projectiles.iter() {
        if projectile.controller.is_terminated() {
            commands.entity(entity).despawn();
        }
    }
}
