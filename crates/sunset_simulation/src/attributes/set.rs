//! NeonAttributeSet — хранилище атрибутов персонажа
//!
//! Два hook'а мутации:
//! - `pre_change` — clamp max полей (до commit)
//! - `post_change` — clamp current в [0, max] + DamageTaken (после commit)
//!
//! Единственный контракт мутации current значений — `apply_delta`.

use bevy::prelude::*;

use super::delegate::{DamageTaken, DamageTakenDelegate};
use super::stat::{Attribute, ResourceKind, Stat};
use crate::config::AttributeProfile;

/// Результат одной мутации (для AttributeChanged и тестов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeChange {
    pub attribute: Attribute,
    pub old_value: f32,
    /// Значение поля после clamp'ов
    pub new_value: f32,
    /// Пара ресурса после мутации (для UI: current/max)
    pub stat: Stat,
    pub damage_taken: Option<DamageTaken>,
}

impl AttributeChange {
    pub fn resource(&self) -> ResourceKind {
        self.attribute.resource()
    }
}

/// Атрибуты актора: Health, Neon, Stamina, UltimateCharge (+ Max)
#[derive(Component, Debug)]
pub struct NeonAttributeSet {
    owner: Entity,
    health: Stat,
    neon: Stat,
    stamina: Stat,
    ultimate_charge: Stat,
    /// Подписчики на урон (UI, AI, звук). Вызываются после commit + clamp.
    pub on_damage_taken: DamageTakenDelegate,
}

impl NeonAttributeSet {
    /// Дефолты игрока: 100/100 HP, Neon, Stamina; Ultimate 0/50
    pub fn new(owner: Entity) -> Self {
        Self::from_profile(owner, &AttributeProfile::default())
    }

    pub fn from_profile(owner: Entity, profile: &AttributeProfile) -> Self {
        let mut set = Self {
            owner,
            health: profile.health,
            neon: profile.neon,
            stamina: profile.stamina,
            ultimate_charge: profile.ultimate_charge,
            on_damage_taken: DamageTakenDelegate::default(),
        };

        // Дизайнерские дефолты проходят те же инварианты, что и мутации
        for attribute in Attribute::ALL.into_iter().filter(|a| a.is_max()) {
            let value = set.get(attribute);
            set.set_base(attribute, value);
        }

        set
    }

    pub fn owner(&self) -> Entity {
        self.owner
    }

    pub fn stat(&self, kind: ResourceKind) -> Stat {
        match kind {
            ResourceKind::Health => self.health,
            ResourceKind::Neon => self.neon,
            ResourceKind::Stamina => self.stamina,
            ResourceKind::UltimateCharge => self.ultimate_charge,
        }
    }

    fn stat_mut(&mut self, kind: ResourceKind) -> &mut Stat {
        match kind {
            ResourceKind::Health => &mut self.health,
            ResourceKind::Neon => &mut self.neon,
            ResourceKind::Stamina => &mut self.stamina,
            ResourceKind::UltimateCharge => &mut self.ultimate_charge,
        }
    }

    pub fn health(&self) -> Stat {
        self.health
    }

    pub fn neon(&self) -> Stat {
        self.neon
    }

    pub fn stamina(&self) -> Stat {
        self.stamina
    }

    pub fn ultimate_charge(&self) -> Stat {
        self.ultimate_charge
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    pub fn get(&self, attribute: Attribute) -> f32 {
        let stat = self.stat(attribute.resource());
        if attribute.is_max() {
            stat.max
        } else {
            stat.current
        }
    }

    fn value_mut(&mut self, attribute: Attribute) -> &mut f32 {
        let stat = self.stat_mut(attribute.resource());
        if attribute.is_max() {
            &mut stat.max
        } else {
            &mut stat.current
        }
    }

    /// Hook до commit: clamp только max полей.
    ///
    /// MaxHealth ≥ 1.0, MaxNeon/MaxStamina/MaxUltimateCharge ≥ 0.0.
    /// Current поля проходят без изменений (их clamp'ит `post_change`).
    pub fn pre_change(&self, attribute: Attribute, proposed: f32) -> f32 {
        match attribute.max_floor() {
            Some(floor) => proposed.max(floor),
            None => proposed,
        }
    }

    /// Hook после commit: clamp current + DamageTaken для отрицательной Health delta.
    ///
    /// Подписчики видят уже clamp'нутое значение.
    pub fn post_change(&mut self, attribute: Attribute, delta: f32) -> Option<DamageTaken> {
        match attribute {
            Attribute::Health => {
                crate::logger::log(&format!(
                    "Health modified on {:?}: magnitude {:.1} (negative = damage)",
                    self.owner, delta
                ));

                self.health.clamp_current();

                if delta < 0.0 {
                    let event = DamageTaken {
                        damage: delta.abs(),
                        target: self.owner,
                    };

                    crate::logger::log_info(&format!(
                        "💥 {:?} took {:.1} damage (HP: {:.1}/{:.1}, subscribers: {})",
                        self.owner,
                        event.damage,
                        self.health.current,
                        self.health.max,
                        self.on_damage_taken.len()
                    ));

                    self.on_damage_taken.broadcast(&event);
                    Some(event)
                } else {
                    crate::logger::log(&format!(
                        "💚 Healing on {:?}: {:.1} (HP: {:.1}/{:.1})",
                        self.owner, delta, self.health.current, self.health.max
                    ));
                    None
                }
            }
            Attribute::Neon => {
                self.neon.clamp_current();
                None
            }
            Attribute::Stamina => {
                self.stamina.clamp_current();
                crate::logger::log(&format!(
                    "Stamina changed: {:.1} / {:.1}",
                    self.stamina.current, self.stamina.max
                ));
                None
            }
            Attribute::UltimateCharge => {
                self.ultimate_charge.clamp_current();
                crate::logger::log(&format!(
                    "Ultimate Charge: {:.0} / {:.0}",
                    self.ultimate_charge.current, self.ultimate_charge.max
                ));
                None
            }
            // Уменьшение max не должно оставлять current выше потолка
            Attribute::MaxHealth
            | Attribute::MaxNeon
            | Attribute::MaxStamina
            | Attribute::MaxUltimateCharge => {
                self.stat_mut(attribute.resource()).clamp_current();
                None
            }
        }
    }

    /// Контракт мутации: commit `value + delta` → post_change.
    ///
    /// Порядок гарантирован: pre_change → commit → post_change.
    pub fn apply_delta(&mut self, attribute: Attribute, delta: f32) -> AttributeChange {
        let old_value = self.get(attribute);
        let proposed = self.pre_change(attribute, old_value + delta);
        *self.value_mut(attribute) = proposed;

        let damage_taken = self.post_change(attribute, delta);

        AttributeChange {
            attribute,
            old_value,
            new_value: self.get(attribute),
            stat: self.stat(attribute.resource()),
            damage_taken,
        }
    }

    /// Прямая запись значения (инициализация, дизайнерские override'ы).
    ///
    /// Проходит pre_change и clamp пары, но не публикует DamageTaken.
    pub fn set_base(&mut self, attribute: Attribute, value: f32) -> AttributeChange {
        let old_value = self.get(attribute);
        let value = self.pre_change(attribute, value);
        *self.value_mut(attribute) = value;
        self.stat_mut(attribute.resource()).clamp_current();

        AttributeChange {
            attribute,
            old_value,
            new_value: self.get(attribute),
            stat: self.stat(attribute.resource()),
            damage_taken: None,
        }
    }
}
