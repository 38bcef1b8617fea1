//! Gameplay effect definitions (дизайнерские данные)

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::tags::{GameplayTagContainer, DAMAGE_TYPE_NEON, STATUS_CORRUPTED};
use crate::attributes::Attribute;

pub const NEON_DAMAGE_EFFECT: &str = "GE_NeonDamage";
pub const CORRUPTION_EFFECT: &str = "GE_Corruption";
pub const HEAL_EFFECT: &str = "GE_Heal";

/// Ссылка на effect class (ключ в EffectRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectClass(pub String);

impl EffectClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EffectClass {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Что делает эффект при применении
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Damage execution: combo + fallback → отрицательная Health delta
    Damage {
        /// SetByCaller Data.Damage (None → fallback из DamageConfig)
        set_by_caller_damage: Option<f32>,
    },
    /// Instant additive модификатор атрибута (heal, restore neon, ult charge)
    Modifier { attribute: Attribute, magnitude: f32 },
    /// Выдаёт теги цели (статусы). None → бессрочно
    GrantTags {
        tags: GameplayTagContainer,
        duration_secs: Option<f32>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameplayEffectDef {
    /// Asset tags эффекта (Damage.Type.Neon и т.п.)
    pub asset_tags: GameplayTagContainer,
    pub kind: EffectKind,
}

/// Registry эффектов (effect class → definition)
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectRegistry {
    effects: HashMap<EffectClass, GameplayEffectDef>,
}

impl EffectRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Набор эффектов boomerang способности
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        registry.register(
            NEON_DAMAGE_EFFECT,
            GameplayEffectDef {
                asset_tags: GameplayTagContainer::from_tags([DAMAGE_TYPE_NEON]),
                kind: EffectKind::Damage {
                    set_by_caller_damage: Some(20.0),
                },
            },
        );

        registry.register(
            CORRUPTION_EFFECT,
            GameplayEffectDef {
                asset_tags: GameplayTagContainer::new(),
                kind: EffectKind::GrantTags {
                    tags: GameplayTagContainer::from_tags([STATUS_CORRUPTED]),
                    duration_secs: Some(6.0),
                },
            },
        );

        registry.register(
            HEAL_EFFECT,
            GameplayEffectDef {
                asset_tags: GameplayTagContainer::new(),
                kind: EffectKind::Modifier {
                    attribute: Attribute::Health,
                    magnitude: 25.0,
                },
            },
        );

        registry
    }

    pub fn register(&mut self, class: impl Into<EffectClass>, def: GameplayEffectDef) {
        self.effects.insert(class.into(), def);
    }

    pub fn get(&self, class: &EffectClass) -> Option<&GameplayEffectDef> {
        self.effects.get(class)
    }

    pub fn contains(&self, class: &EffectClass) -> bool {
        self.effects.contains_key(class)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
