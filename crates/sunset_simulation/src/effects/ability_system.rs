//! AbilitySystem — capability "на этого актора можно применять эффекты"
//!
//! Хранит owned теги (статусы) с опциональной длительностью.

use bevy::prelude::*;

use super::tags::{GameplayTag, GameplayTagContainer};

#[derive(Debug, Clone, PartialEq)]
struct ActiveTag {
    tag: GameplayTag,
    /// None → бессрочно
    remaining_secs: Option<f32>,
}

#[derive(Component, Debug, Clone, Default)]
pub struct AbilitySystem {
    active: Vec<ActiveTag>,
}

impl AbilitySystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Выдать тег. Повторная выдача обновляет длительность (refresh, не stack).
    pub fn grant_tag(&mut self, tag: GameplayTag, duration_secs: Option<f32>) {
        if let Some(existing) = self.active.iter_mut().find(|active| active.tag == tag) {
            existing.remaining_secs = match (existing.remaining_secs, duration_secs) {
                (None, _) | (_, None) => None,
                (Some(left), Some(new)) => Some(left.max(new)),
            };
            return;
        }

        self.active.push(ActiveTag {
            tag,
            remaining_secs: duration_secs,
        });
    }

    pub fn remove_tag(&mut self, tag: &GameplayTag) -> bool {
        let before = self.active.len();
        self.active.retain(|active| &active.tag != tag);
        self.active.len() != before
    }

    pub fn has_matching_tag(&self, query: &str) -> bool {
        self.active.iter().any(|active| active.tag.matches(query))
    }

    pub fn owned_tags(&self) -> GameplayTagContainer {
        GameplayTagContainer::from_tags(self.active.iter().map(|active| active.tag.clone()))
    }

    /// Тикает длительности, возвращает истёкшие теги
    pub fn tick(&mut self, delta_secs: f32) -> Vec<GameplayTag> {
        let mut expired = Vec::new();

        self.active.retain_mut(|active| match active.remaining_secs.as_mut() {
            Some(left) => {
                *left -= delta_secs;
                if *left <= 0.0 {
                    expired.push(active.tag.clone());
                    false
                } else {
                    true
                }
            }
            None => true,
        });

        expired
    }
}
