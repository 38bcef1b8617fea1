//! Damage reaction strategies
//!
//! Вместо override через иерархию Player → Enemy: каждому актору
//! инжектится стратегия реакции на DamageTaken.
//! - `NoReaction` — игрок (только лог)
//! - `AiReaction` — враг (триггерит AI/анимацию через DamageReactionTriggered)

use bevy::prelude::*;

use super::delegate::DamageTaken;

/// Событие: реакция на урон (consumed AI FSM / анимацией на стороне host)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageReactionTriggered {
    pub entity: Entity,
    pub damage: f32,
}

pub trait DamageReaction: Send + Sync + 'static {
    /// `owner` — entity, которому принадлежит стратегия
    fn react(&self, owner: Entity, event: &DamageTaken) -> Option<DamageReactionTriggered>;
}

/// Игрок: урон только логируется
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReaction;

impl DamageReaction for NoReaction {
    fn react(&self, owner: Entity, event: &DamageTaken) -> Option<DamageReactionTriggered> {
        crate::logger::log(&format!(
            "Actor {:?} received DamageTaken ({:.1} → {:?})",
            owner, event.damage, event.target
        ));
        None
    }
}

/// Враг: реагирует только на урон, нанесённый ему самому
#[derive(Debug, Clone, Copy, Default)]
pub struct AiReaction;

impl DamageReaction for AiReaction {
    fn react(&self, owner: Entity, event: &DamageTaken) -> Option<DamageReactionTriggered> {
        if event.target != owner {
            return None;
        }

        crate::logger::log_info(&format!("Enemy {:?} took {:.1} damage!", owner, event.damage));

        Some(DamageReactionTriggered {
            entity: owner,
            damage: event.damage,
        })
    }
}

/// Компонент: инжектированная стратегия реакции
#[derive(Component)]
pub struct DamageReactionHandler(pub Box<dyn DamageReaction>);

impl DamageReactionHandler {
    pub fn new(reaction: impl DamageReaction) -> Self {
        Self(Box::new(reaction))
    }
}

/// Система: DamageTaken → стратегия реакции владельца
///
/// Actor без handler'а урон получает, но не реагирует.
pub fn dispatch_damage_reactions(
    mut damage_events: EventReader<DamageTaken>,
    handlers: Query<&DamageReactionHandler>,
    mut reaction_events: EventWriter<DamageReactionTriggered>,
) {
    for event in damage_events.read() {
        let Ok(handler) = handlers.get(event.target) else {
            continue;
        };

        if let Some(triggered) = handler.0.react(event.target, event) {
            reaction_events.write(triggered);
        }
    }
}
