//! Stat (current/max пара) и идентификаторы атрибутов

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Идентификатор поля в NeonAttributeSet
///
/// Каждый ресурс персонажа — пара current/max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum Attribute {
    Health,
    MaxHealth,
    Neon,
    MaxNeon,
    Stamina,
    MaxStamina,
    UltimateCharge,
    MaxUltimateCharge,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Health,
        Attribute::MaxHealth,
        Attribute::Neon,
        Attribute::MaxNeon,
        Attribute::Stamina,
        Attribute::MaxStamina,
        Attribute::UltimateCharge,
        Attribute::MaxUltimateCharge,
    ];

    pub fn is_max(self) -> bool {
        matches!(
            self,
            Attribute::MaxHealth
                | Attribute::MaxNeon
                | Attribute::MaxStamina
                | Attribute::MaxUltimateCharge
        )
    }

    /// Health → MaxHealth (для max полей → None)
    pub fn max_counterpart(self) -> Option<Attribute> {
        match self {
            Attribute::Health => Some(Attribute::MaxHealth),
            Attribute::Neon => Some(Attribute::MaxNeon),
            Attribute::Stamina => Some(Attribute::MaxStamina),
            Attribute::UltimateCharge => Some(Attribute::MaxUltimateCharge),
            _ => None,
        }
    }

    /// MaxHealth → Health (для current полей → None)
    pub fn current_counterpart(self) -> Option<Attribute> {
        match self {
            Attribute::MaxHealth => Some(Attribute::Health),
            Attribute::MaxNeon => Some(Attribute::Neon),
            Attribute::MaxStamina => Some(Attribute::Stamina),
            Attribute::MaxUltimateCharge => Some(Attribute::UltimateCharge),
            _ => None,
        }
    }

    /// Нижняя граница для max полей.
    ///
    /// MaxHealth никогда не опускается ниже 1.0 (персонаж с потолком 0 HP
    /// ломает UI и проценты), остальные max — не ниже 0.0.
    pub fn max_floor(self) -> Option<f32> {
        match self {
            Attribute::MaxHealth => Some(1.0),
            Attribute::MaxNeon | Attribute::MaxStamina | Attribute::MaxUltimateCharge => Some(0.0),
            _ => None,
        }
    }

    /// Какой ресурс (пара) содержит это поле
    pub fn resource(self) -> ResourceKind {
        match self {
            Attribute::Health | Attribute::MaxHealth => ResourceKind::Health,
            Attribute::Neon | Attribute::MaxNeon => ResourceKind::Neon,
            Attribute::Stamina | Attribute::MaxStamina => ResourceKind::Stamina,
            Attribute::UltimateCharge | Attribute::MaxUltimateCharge => ResourceKind::UltimateCharge,
        }
    }
}

/// Ресурс персонажа (пара current/max)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum ResourceKind {
    Health,
    /// Мана/стиль — тратится на способности
    Neon,
    Stamina,
    /// Копится до ultimate способности
    UltimateCharge,
}

/// Числовая пара current/max
///
/// Инвариант (после завершения мутации): 0 ≤ current ≤ max
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct Stat {
    pub current: f32,
    pub max: f32,
}

impl Default for Stat {
    fn default() -> Self {
        Self::full(100.0)
    }
}

impl Stat {
    pub fn new(current: f32, max: f32) -> Self {
        Self { current, max }
    }

    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn clamp_current(&mut self) {
        self.current = self.current.clamp(0.0, self.max.max(0.0));
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    /// 0.0..=1.0 (max == 0 → 0.0)
    pub fn percent(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counterparts_round_trip() {
        for attribute in Attribute::ALL {
            if attribute.is_max() {
                let current = attribute.current_counterpart().unwrap();
                assert_eq!(current.max_counterpart(), Some(attribute));
                assert!(attribute.max_floor().is_some());
            } else {
                assert!(attribute.max_floor().is_none());
                assert!(attribute.current_counterpart().is_none());
            }
        }
    }

    #[test]
    fn test_health_floor_is_one() {
        assert_eq!(Attribute::MaxHealth.max_floor(), Some(1.0));
        assert_eq!(Attribute::MaxUltimateCharge.max_floor(), Some(0.0));
    }

    #[test]
    fn test_stat_clamp() {
        let mut stat = Stat::new(130.0, 100.0);
        stat.clamp_current();
        assert_eq!(stat.current, 100.0);

        stat.current = -5.0;
        stat.clamp_current();
        assert_eq!(stat.current, 0.0);
        assert!(stat.is_empty());
    }

    #[test]
    fn test_stat_percent() {
        assert_eq!(Stat::new(25.0, 50.0).percent(), 0.5);
        assert_eq!(Stat::new(0.0, 0.0).percent(), 0.0);
    }
}
