//! Effect application pipeline
//!
//! 1. Projectile (или ability) пишет ApplyEffect { target, effect, set_by_caller }
//! 2. apply_gameplay_effects резолвит effect class через EffectRegistry
//! 3. Damage → combat::execute_damage → NeonAttributeSet::apply_delta
//! 4. DamageTaken / AttributeChanged / EffectApplied события

use std::collections::BTreeMap;

use bevy::prelude::*;

use super::ability_system::AbilitySystem;
use super::definition::{EffectClass, EffectKind, EffectRegistry, GameplayEffectDef};
use super::tags::{GameplayTag, DATA_DAMAGE};
use crate::attributes::{AttributeChange, AttributeChanged, DamageTaken, NeonAttributeSet};
use crate::combat::{execute_damage, DamageContext, DamageExecution};
use crate::config::{DamageConfig, SimulationConfig};

/// SetByCaller magnitudes: значения, которые вызывающий передаёт эффекту по тегу
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetByCallerMagnitudes(BTreeMap<GameplayTag, f32>);

impl SetByCallerMagnitudes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, tag: impl Into<GameplayTag>, magnitude: f32) {
        self.0.insert(tag.into(), magnitude);
    }

    pub fn get(&self, tag: &str) -> Option<f32> {
        self.0.get(&GameplayTag::new(tag)).copied()
    }

    /// Data.Damage (базовый урон)
    pub fn damage(&self) -> Option<f32> {
        self.get(DATA_DAMAGE)
    }
}

/// Event: применить effect class к цели
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ApplyEffect {
    /// Кто инициировал (владелец снаряда)
    pub instigator: Option<Entity>,
    pub target: Entity,
    pub effect: EffectClass,
    /// Перекрывает magnitude из definition
    pub set_by_caller: SetByCallerMagnitudes,
}

impl ApplyEffect {
    pub fn new(instigator: Option<Entity>, target: Entity, effect: EffectClass) -> Self {
        Self {
            instigator,
            target,
            effect,
            set_by_caller: SetByCallerMagnitudes::new(),
        }
    }

    pub fn with_set_by_caller(mut self, tag: impl Into<GameplayTag>, magnitude: f32) -> Self {
        self.set_by_caller.set(tag, magnitude);
        self
    }
}

/// Event: эффект успешно применён
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EffectApplied {
    pub instigator: Option<Entity>,
    pub target: Entity,
    pub effect: EffectClass,
}

/// Результат применения одного эффекта
#[derive(Debug, Clone, PartialEq)]
pub enum EffectOutcome {
    Damage(DamageExecution),
    Modified(AttributeChange),
    TagsGranted(usize),
    /// Effect class не зарегистрирован (missing configuration)
    UnknownEffect,
    /// Цель не поддерживает эффекты — тихо игнорируем
    MissingAbilitySystem,
    /// Атрибутный эффект, а у цели нет NeonAttributeSet
    MissingAttributes,
}

impl EffectOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            EffectOutcome::Damage(_) | EffectOutcome::Modified(_) | EffectOutcome::TagsGranted(_)
        )
    }

    /// Изменение атрибутов (если было)
    pub fn attribute_change(&self) -> Option<&AttributeChange> {
        match self {
            EffectOutcome::Damage(execution) => execution.change.as_ref(),
            EffectOutcome::Modified(change) => Some(change),
            _ => None,
        }
    }
}

/// Применяет definition к цели (без ECS — для тестов и host интеграции)
///
/// Базовый урон: SetByCaller Data.Damage → значение из definition →
/// DamageConfig fallback (внутри resolve_damage).
pub fn execute_effect(
    def: &GameplayEffectDef,
    set_by_caller: &SetByCallerMagnitudes,
    ability_system: &mut AbilitySystem,
    attributes: Option<&mut NeonAttributeSet>,
    config: &DamageConfig,
) -> EffectOutcome {
    match &def.kind {
        EffectKind::Damage {
            set_by_caller_damage,
        } => {
            let Some(attributes) = attributes else {
                return EffectOutcome::MissingAttributes;
            };

            let context = DamageContext {
                base_damage: set_by_caller.damage().or(*set_by_caller_damage),
                source_tags: def.asset_tags.clone(),
                target_tags: ability_system.owned_tags(),
            };

            EffectOutcome::Damage(execute_damage(&context, attributes, config))
        }
        EffectKind::Modifier {
            attribute,
            magnitude,
        } => {
            let Some(attributes) = attributes else {
                return EffectOutcome::MissingAttributes;
            };

            EffectOutcome::Modified(attributes.apply_delta(*attribute, *magnitude))
        }
        EffectKind::GrantTags {
            tags,
            duration_secs,
        } => {
            for tag in tags.iter() {
                ability_system.grant_tag(tag.clone(), *duration_secs);
            }
            EffectOutcome::TagsGranted(tags.len())
        }
    }
}

/// Система: обработка ApplyEffect запросов
///
/// Все аномалии — warning + skip (никаких panic'ов в pipeline).
pub fn apply_gameplay_effects(
    mut requests: EventReader<ApplyEffect>,
    registry: Res<EffectRegistry>,
    config: Res<SimulationConfig>,
    mut targets: Query<(&mut AbilitySystem, Option<&mut NeonAttributeSet>)>,
    mut damage_events: EventWriter<DamageTaken>,
    mut changed_events: EventWriter<AttributeChanged>,
    mut applied_events: EventWriter<EffectApplied>,
) {
    for request in requests.read() {
        let Some(def) = registry.get(&request.effect) else {
            crate::logger::log_warning(&format!(
                "⚠️ Effect class '{}' is not registered — skipping",
                request.effect.as_str()
            ));
            continue;
        };

        let Ok((mut ability_system, mut attributes)) = targets.get_mut(request.target) else {
            crate::logger::log(&format!(
                "Target {:?} has no AbilitySystem — '{}' ignored",
                request.target,
                request.effect.as_str()
            ));
            continue;
        };

        let outcome = execute_effect(
            def,
            &request.set_by_caller,
            &mut ability_system,
            attributes.as_deref_mut(),
            &config.damage,
        );

        if !outcome.is_applied() {
            crate::logger::log_warning(&format!(
                "⚠️ Effect '{}' on {:?} not applied: {:?}",
                request.effect.as_str(),
                request.target,
                outcome
            ));
            continue;
        }

        if let Some(change) = outcome.attribute_change() {
            changed_events.write(AttributeChanged::from_change(request.target, change));

            if let Some(damage_taken) = change.damage_taken {
                damage_events.write(damage_taken);
            }
        }

        applied_events.write(EffectApplied {
            instigator: request.instigator,
            target: request.target,
            effect: request.effect.clone(),
        });
    }
}

/// Система: истечение статусов (Corruption и т.п.)
pub fn tick_status_durations(
    mut ability_systems: Query<(Entity, &mut AbilitySystem)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (entity, mut ability_system) in ability_systems.iter_mut() {
        for tag in ability_system.tick(delta) {
            crate::logger::log(&format!("Status {} expired on {:?}", tag.as_str(), entity));
        }
    }
}
