//! Акторы: игрок и враги
//!
//! Актор = Transform + NeonAttributeSet + AbilitySystem + стратегия реакции.
//! Стартовые атрибуты берутся из SimulationConfig (per ActorKind).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::attributes::{AiReaction, DamageReactionHandler, NeonAttributeSet, NoReaction};
use crate::config::SimulationConfig;
use crate::effects::AbilitySystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Enemy,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Actor {
    pub kind: ActorKind,
}

/// Спавнит актора со всеми capability.
///
/// Игрок урон не отражает (NoReaction), враг — AI реакция.
pub fn spawn_actor(world: &mut World, kind: ActorKind, position: Vec3) -> Entity {
    let profile = world
        .get_resource::<SimulationConfig>()
        .map(|config| *config.attributes.for_kind(kind))
        .unwrap_or_else(|| *SimulationConfig::default().attributes.for_kind(kind));

    let entity = world
        .spawn((Transform::from_translation(position), Actor { kind }))
        .id();

    let reaction = match kind {
        ActorKind::Player => DamageReactionHandler::new(NoReaction),
        ActorKind::Enemy => DamageReactionHandler::new(AiReaction),
    };

    world.entity_mut(entity).insert((
        NeonAttributeSet::from_profile(entity, &profile),
        AbilitySystem::new(),
        reaction,
    ));

    crate::logger::log(&format!(
        "Spawned {:?} {:?} at {:?} (HP {:.0}/{:.0}, Neon {:.0}/{:.0})",
        kind,
        entity,
        position,
        profile.health.current,
        profile.health.max,
        profile.neon.current,
        profile.neon.max
    ));

    entity
}
