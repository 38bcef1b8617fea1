//! Attributes module (AttributeStore)
//!
//! ECS ответственность:
//! - NeonAttributeSet: Health, Neon, Stamina, UltimateCharge (+ Max)
//! - Инварианты: 0 ≤ current ≤ max, MaxHealth ≥ 1
//! - Events: DamageTaken (урон), AttributeChanged (UI), DamageReactionTriggered (AI)

use bevy::prelude::*;

pub mod delegate;
pub mod reaction;
pub mod set;
pub mod stat;

pub use delegate::{DamageTaken, DamageTakenCallback, DamageTakenDelegate};
pub use reaction::{
    dispatch_damage_reactions, AiReaction, DamageReaction, DamageReactionHandler,
    DamageReactionTriggered, NoReaction,
};
pub use set::{AttributeChange, NeonAttributeSet};
pub use stat::{Attribute, ResourceKind, Stat};

/// Событие: значение ресурса изменилось (для UI: health bar, neon bar)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttributeChanged {
    pub entity: Entity,
    pub resource: ResourceKind,
    pub current: f32,
    pub max: f32,
}

impl AttributeChanged {
    pub fn from_change(entity: Entity, change: &AttributeChange) -> Self {
        Self {
            entity,
            resource: change.resource(),
            current: change.stat.current,
            max: change.stat.max,
        }
    }
}

/// Attributes Plugin
///
/// Регистрирует события. Реакции выполняются в SimulationSet::Reactions.
pub struct AttributesPlugin;

impl Plugin for AttributesPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageTaken>()
            .add_event::<AttributeChanged>()
            .add_event::<DamageReactionTriggered>();

        app.add_systems(
            FixedUpdate,
            dispatch_damage_reactions.in_set(crate::SimulationSet::Reactions),
        );
    }
}
