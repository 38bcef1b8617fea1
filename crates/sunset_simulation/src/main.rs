//! Headless симуляция Sunset
//!
//! Игрок бросает boomerang в линию врагов: на вылете враги получают
//! Corruption, на возврате — Neon damage с combo ×2.5.
//! Коллизии считает простой broker по дистанции (вместо physics engine).

use bevy::prelude::*;
use rand::Rng;

use sunset_simulation::*;

/// Радиус "тела" врага для broker'а
const ENEMY_RADIUS: f32 = 40.0;
const ENEMY_COUNT: usize = 4;
const TICKS: usize = 180;

fn main() {
    let seed = 42;
    println!("Starting Sunset headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let player = spawn_actor(app.world_mut(), ActorKind::Player, Vec3::ZERO);

    // Враги вдоль линии броска (seeded разброс)
    let positions: Vec<Vec3> = {
        let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
        (0..ENEMY_COUNT)
            .map(|_| {
                Vec3::new(
                    rng.rng.gen_range(200.0..900.0),
                    rng.rng.gen_range(-10.0..10.0),
                    0.0,
                )
            })
            .collect()
    };
    for position in positions {
        spawn_actor(app.world_mut(), ActorKind::Enemy, position);
    }

    app.world_mut().send_event(SpawnProjectile {
        instigator: Some(player),
        origin: Vec3::ZERO,
        direction: Vec3::X,
        mode: SpawnMode::Boomerang {
            max_travel_distance: None,
        },
        damage_effect: Some(EffectClass::from(NEON_DAMAGE_EFFECT)),
        corruption_effect: Some(EffectClass::from(CORRUPTION_EFFECT)),
        damage_magnitude: None,
    });

    for tick in 0..TICKS {
        app.update();
        broker_overlaps(app.world_mut());

        if tick % 30 == 0 {
            let projectiles = app
                .world_mut()
                .query::<&NeonProjectile>()
                .iter(app.world())
                .count();
            println!("Tick {}: {} projectiles in flight", tick, projectiles);
        }
    }

    let mut actors = app.world_mut().query::<(Entity, &Actor, &NeonAttributeSet)>();
    for (entity, actor, attributes) in actors.iter(app.world()) {
        log_info(&format!(
            "{:?} {:?}: HP {:.0}/{:.0}",
            actor.kind,
            entity,
            attributes.health().current,
            attributes.health().max
        ));
    }

    println!("Simulation complete!");
}

/// Overlap по дистанции: снаряд ↔ враг
fn broker_overlaps(world: &mut World) {
    let collision_radius = world.resource::<SimulationConfig>().projectile.collision_radius;

    let projectiles: Vec<(Entity, Vec3)> = world
        .query_filtered::<(Entity, &Transform), With<NeonProjectile>>()
        .iter(world)
        .map(|(entity, transform)| (entity, transform.translation))
        .collect();

    let enemies: Vec<(Entity, Vec3)> = world
        .query::<(Entity, &Transform, &Actor)>()
        .iter(world)
        .filter(|(_, _, actor)| actor.kind == ActorKind::Enemy)
        .map(|(entity, transform, _)| (entity, transform.translation))
        .collect();

    for (projectile, projectile_position) in &projectiles {
        for (enemy, enemy_position) in &enemies {
            if projectile_position.distance(*enemy_position) <= collision_radius + ENEMY_RADIUS {
                // Повторные overlap'ы отсекает дедупликация снаряда
                world.send_event(ProjectileCollision::Overlap {
                    projectile: *projectile,
                    other: Some(*enemy),
                });
            }
        }
    }
}
