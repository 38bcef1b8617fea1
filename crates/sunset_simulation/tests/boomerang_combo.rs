//! Boomerang combo integration test
//!
//! Полный FixedUpdate тик: SpawnProjectile → коллизии → ApplyEffect →
//! атрибуты → DamageTaken → реакции → деспавн.
//!
//! Тики гоняются через run_schedule(FixedUpdate) без реального времени:
//! delta = 0, позиции снаряда выставляются напрямую (как делал бы host).

use bevy::prelude::*;
use sunset_simulation::*;

/// Записывает события типа E за все тики
#[derive(Resource)]
struct Recorded<E: Event + Clone>(Vec<E>);

impl<E: Event + Clone> Default for Recorded<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record<E: Event + Clone>(mut reader: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(reader.read().cloned());
}

fn create_test_app() -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins(SimulationPlugin)
        .init_resource::<Recorded<EffectApplied>>()
        .init_resource::<Recorded<DamageTaken>>()
        .init_resource::<Recorded<DamageReactionTriggered>>()
        .init_resource::<Recorded<ProjectileTerminated>>()
        .add_systems(
            FixedUpdate,
            (
                record::<EffectApplied>,
                record::<DamageTaken>,
                record::<DamageReactionTriggered>,
                record::<ProjectileTerminated>,
            )
                .after(SimulationSet::Cleanup),
        );

    app
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn spawn_request(instigator: Entity, mode: SpawnMode) -> SpawnProjectile {
    SpawnProjectile {
        instigator: Some(instigator),
        origin: Vec3::ZERO,
        direction: Vec3::X,
        mode,
        damage_effect: Some(EffectClass::from(NEON_DAMAGE_EFFECT)),
        corruption_effect: Some(EffectClass::from(CORRUPTION_EFFECT)),
        damage_magnitude: None,
    }
}

fn fire(app: &mut App, instigator: Entity, mode: SpawnMode) -> Entity {
    fire_request(app, spawn_request(instigator, mode))
}

fn fire_request(app: &mut App, request: SpawnProjectile) -> Entity {
    app.world_mut().send_event(request);
    tick(app);

    let mut query = app
        .world_mut()
        .query_filtered::<Entity, With<NeonProjectile>>();
    let projectiles: Vec<Entity> = query.iter(app.world()).collect();
    assert_eq!(projectiles.len(), 1, "expected exactly one projectile in flight");
    projectiles[0]
}

fn fire_boomerang(app: &mut App, instigator: Entity) -> Entity {
    fire(
        app,
        instigator,
        SpawnMode::Boomerang {
            max_travel_distance: None,
        },
    )
}

fn place(app: &mut App, entity: Entity, position: Vec3) {
    app.world_mut()
        .get_mut::<Transform>(entity)
        .unwrap()
        .translation = position;
}

fn overlap(app: &mut App, projectile: Entity, other: Entity) {
    app.world_mut().send_event(ProjectileCollision::Overlap {
        projectile,
        other: Some(other),
    });
}

fn health(app: &App, entity: Entity) -> f32 {
    app.world()
        .get::<NeonAttributeSet>(entity)
        .unwrap()
        .health()
        .current
}

fn is_corrupted(app: &App, entity: Entity) -> bool {
    app.world()
        .get::<AbilitySystem>(entity)
        .unwrap()
        .has_matching_tag(effects::STATUS_CORRUPTED)
}

fn applied_count(app: &App) -> usize {
    app.world().resource::<Recorded<EffectApplied>>().0.len()
}

/// Test: вылет накладывает Corruption, возврат бьёт с combo ×2.5
#[test]
fn test_boomerang_corrupts_then_combo_damage() {
    let mut app = create_test_app();

    let player = spawn_actor(app.world_mut(), ActorKind::Player, Vec3::ZERO);
    let enemy = spawn_actor(app.world_mut(), ActorKind::Enemy, Vec3::new(500.0, 0.0, 0.0));

    let projectile = fire_boomerang(&mut app, player);

    // Вылет: Corruption, урона нет
    place(&mut app, projectile, Vec3::new(500.0, 0.0, 0.0));
    overlap(&mut app, projectile, enemy);
    tick(&mut app);

    assert!(is_corrupted(&app, enemy));
    assert_eq!(health(&app, enemy), 100.0);
    assert_eq!(applied_count(&app), 1);

    // Повторный overlap в той же фазе — игнор
    overlap(&mut app, projectile, enemy);
    tick(&mut app);
    assert_eq!(applied_count(&app), 1);

    // Дистанция → Returning + homing к игроку
    place(&mut app, projectile, Vec3::new(1000.0, 0.0, 0.0));
    tick(&mut app);
    {
        let projectile_state = app.world().get::<NeonProjectile>(projectile).unwrap();
        assert_eq!(
            projectile_state.controller.phase(),
            Some(ProjectilePhase::Returning)
        );
        let movement = app
            .world()
            .get::<projectile::ProjectileMovement>(projectile)
            .unwrap();
        assert_eq!(movement.homing.map(|homing| homing.target), Some(player));
    }

    // Возврат: Neon damage 20 × 2.5 = 50
    place(&mut app, projectile, Vec3::new(500.0, 0.0, 0.0));
    overlap(&mut app, projectile, enemy);
    tick(&mut app);

    assert_eq!(health(&app, enemy), 50.0);
    assert_eq!(applied_count(&app), 2);

    let damage = &app.world().resource::<Recorded<DamageTaken>>().0;
    assert_eq!(damage.len(), 1);
    assert_eq!(damage[0].target, enemy);
    assert_eq!(damage[0].damage, 50.0);

    // Враг с AI стратегией отреагировал
    let reactions = &app.world().resource::<Recorded<DamageReactionTriggered>>().0;
    assert_eq!(reactions.len(), 1);
    assert_eq!(reactions[0].entity, enemy);

    // Прилёт к игроку → уничтожение и деспавн в том же тике
    place(&mut app, projectile, Vec3::new(50.0, 0.0, 0.0));
    tick(&mut app);

    assert!(app.world().get::<NeonProjectile>(projectile).is_none());
    let terminated = &app.world().resource::<Recorded<ProjectileTerminated>>().0;
    assert_eq!(terminated.len(), 1);
    assert_eq!(terminated[0].reason, TerminationReason::ArrivedAtOwner);

    // Игрок не задет своим снарядом
    assert_eq!(health(&app, player), 100.0);
}

/// Test: без Corruption урон на возврате обычный (20)
#[test]
fn test_return_hit_without_corruption_deals_base_damage() {
    let mut app = create_test_app();

    let player = spawn_actor(app.world_mut(), ActorKind::Player, Vec3::ZERO);
    let enemy = spawn_actor(app.world_mut(), ActorKind::Enemy, Vec3::new(500.0, 0.0, 0.0));

    let projectile = fire_boomerang(&mut app, player);

    // Враг не попал под вылет
    place(&mut app, projectile, Vec3::new(1000.0, 0.0, 0.0));
    tick(&mut app);

    overlap(&mut app, projectile, enemy);
    tick(&mut app);

    assert!(!is_corrupted(&app, enemy));
    assert_eq!(health(&app, enemy), 80.0);
}

/// Test: стена на вылете разворачивает boomerang
#[test]
fn test_wall_forces_early_return() {
    let mut app = create_test_app();

    let player = spawn_actor(app.world_mut(), ActorKind::Player, Vec3::ZERO);
    let enemy = spawn_actor(app.world_mut(), ActorKind::Enemy, Vec3::new(200.0, 0.0, 0.0));

    let projectile = fire_boomerang(&mut app, player);

    overlap(&mut app, projectile, enemy);
    tick(&mut app);
    assert!(is_corrupted(&app, enemy));

    place(&mut app, projectile, Vec3::new(300.0, 0.0, 0.0));
    app.world_mut().send_event(ProjectileCollision::Blocking {
        projectile,
        other: None,
        blocking: true,
    });
    tick(&mut app);

    let phase = app
        .world()
        .get::<NeonProjectile>(projectile)
        .unwrap()
        .controller
        .phase();
    assert_eq!(phase, Some(ProjectilePhase::Returning));

    // Hit set очищен — враг снова доступен, уже для combo damage
    overlap(&mut app, projectile, enemy);
    tick(&mut app);
    assert_eq!(health(&app, enemy), 50.0);
}

/// Test: standard снаряд — ровно одно применение и уничтожение
#[test]
fn test_standard_projectile_applies_once() {
    let mut app = create_test_app();

    let player = spawn_actor(app.world_mut(), ActorKind::Player, Vec3::ZERO);
    let first = spawn_actor(app.world_mut(), ActorKind::Enemy, Vec3::new(100.0, 0.0, 0.0));
    let second = spawn_actor(app.world_mut(), ActorKind::Enemy, Vec3::new(110.0, 0.0, 0.0));

    let projectile = fire(&mut app, player, SpawnMode::Standard);

    // Два overlap'а в одном тике — второй уже после destroy
    overlap(&mut app, projectile, first);
    overlap(&mut app, projectile, second);
    tick(&mut app);

    assert_eq!(health(&app, first), 80.0);
    assert_eq!(health(&app, second), 100.0);
    assert_eq!(applied_count(&app), 1);
    assert!(app.world().get::<NeonProjectile>(projectile).is_none());

    let terminated = &app.world().resource::<Recorded<ProjectileTerminated>>().0;
    assert_eq!(terminated.len(), 1);
    assert_eq!(terminated[0].reason, TerminationReason::Collision);
}

/// Test: уничтоженный владелец → boomerang инертен (ждёт timeout)
#[test]
fn test_dead_owner_leaves_boomerang_inert() {
    let mut app = create_test_app();

    let player = spawn_actor(app.world_mut(), ActorKind::Player, Vec3::ZERO);
    let projectile = fire_boomerang(&mut app, player);

    app.world_mut().despawn(player);

    place(&mut app, projectile, Vec3::new(1500.0, 0.0, 0.0));
    tick(&mut app);

    let state = app.world().get::<NeonProjectile>(projectile).unwrap();
    assert_eq!(state.controller.phase(), Some(ProjectilePhase::Outgoing));
    assert!(!state.controller.is_terminated());
}

/// Test: overlap с объектом без AbilitySystem ничего не делает
#[test]
fn test_overlap_with_non_actor_is_ignored() {
    let mut app = create_test_app();

    let player = spawn_actor(app.world_mut(), ActorKind::Player, Vec3::ZERO);
    let crate_prop = app
        .world_mut()
        .spawn(Transform::from_xyz(300.0, 0.0, 0.0))
        .id();

    let projectile = fire_boomerang(&mut app, player);

    overlap(&mut app, projectile, crate_prop);
    tick(&mut app);

    assert_eq!(applied_count(&app), 0);
    let state = app.world().get::<NeonProjectile>(projectile).unwrap();
    assert!(!state.controller.has_hit_this_phase(crate_prop));
}

/// Test: Heal эффект через pipeline (health bar события)
#[test]
fn test_heal_effect_restores_health() {
    let mut app = create_test_app();

    let player = spawn_actor(app.world_mut(), ActorKind::Player, Vec3::ZERO);
    let enemy = spawn_actor(app.world_mut(), ActorKind::Enemy, Vec3::new(100.0, 0.0, 0.0));

    let damage = EffectClass::from(NEON_DAMAGE_EFFECT);
    for _ in 0..2 {
        app.world_mut()
            .send_event(ApplyEffect::new(Some(player), enemy, damage.clone()));
    }
    tick(&mut app);
    assert_eq!(health(&app, enemy), 60.0);

    app.world_mut()
        .send_event(ApplyEffect::new(None, enemy, EffectClass::from(HEAL_EFFECT)));
    tick(&mut app);
    assert_eq!(health(&app, enemy), 85.0);

    // Heal не порождает DamageTaken
    assert_eq!(app.world().resource::<Recorded<DamageTaken>>().0.len(), 2);
}

/// Test: Data.Damage от вызывающего перекрывает definition (40 × 2.5 = 100)
#[test]
fn test_projectile_damage_magnitude_reaches_resolver() {
    let mut app = create_test_app();

    let player = spawn_actor(app.world_mut(), ActorKind::Player, Vec3::ZERO);
    let enemy = spawn_actor(app.world_mut(), ActorKind::Enemy, Vec3::new(500.0, 0.0, 0.0));

    let mut request = spawn_request(
        player,
        SpawnMode::Boomerang {
            max_travel_distance: None,
        },
    );
    request.damage_magnitude = Some(40.0);
    let projectile = fire_request(&mut app, request);

    // Вылет: Corruption не получает magnitude
    overlap(&mut app, projectile, enemy);
    tick(&mut app);
    assert_eq!(health(&app, enemy), 100.0);

    place(&mut app, projectile, Vec3::new(1000.0, 0.0, 0.0));
    tick(&mut app);
    overlap(&mut app, projectile, enemy);
    tick(&mut app);

    let damage = &app.world().resource::<Recorded<DamageTaken>>().0;
    assert_eq!(damage.len(), 1);
    assert_eq!(damage[0].damage, 100.0);
    assert_eq!(health(&app, enemy), 0.0);
}

/// Test: ApplyEffect с SetByCaller напрямую (без снаряда)
#[test]
fn test_apply_effect_with_caller_magnitude() {
    let mut app = create_test_app();

    let enemy = spawn_actor(app.world_mut(), ActorKind::Enemy, Vec3::ZERO);

    app.world_mut().send_event(
        ApplyEffect::new(None, enemy, EffectClass::from(NEON_DAMAGE_EFFECT))
            .with_set_by_caller(DATA_DAMAGE, 35.0),
    );
    tick(&mut app);

    assert_eq!(health(&app, enemy), 65.0);
}
