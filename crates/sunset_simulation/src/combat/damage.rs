//! Damage execution (DamageResolver)
//!
//! Формула:
//! - base = SetByCaller Data.Damage (нет → fallback 10.0 + warning)
//! - Neon урон по Corrupted цели → base × 2.5 (COMBO)
//! - final > 0 → Health delta = -final через NeonAttributeSet::apply_delta
//!
//! Отсутствие NeonAttributeSet у цели — забота вызывающего (effect pipeline).

use crate::attributes::{Attribute, AttributeChange, NeonAttributeSet};
use crate::config::DamageConfig;
use crate::effects::tags::{GameplayTagContainer, DAMAGE_TYPE_NEON, STATUS_CORRUPTED};

/// Входные данные damage execution (не персистится)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageContext {
    /// None → fallback из DamageConfig
    pub base_damage: Option<f32>,
    /// Asset tags эффекта (тип урона)
    pub source_tags: GameplayTagContainer,
    /// Owned tags цели (статусы)
    pub target_tags: GameplayTagContainer,
}

impl DamageContext {
    pub fn target_is_corrupted(&self) -> bool {
        self.target_tags.has_tag(STATUS_CORRUPTED)
    }

    pub fn is_neon_damage(&self) -> bool {
        self.source_tags.has_tag(DAMAGE_TYPE_NEON)
    }
}

/// Результат damage execution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageExecution {
    pub final_damage: f32,
    pub combo: bool,
    pub used_fallback: bool,
    /// None → final_damage ≤ 0, в Health ничего не отправлялось
    pub change: Option<AttributeChange>,
}

/// Вычисляет final damage (чистая функция)
///
/// - Corrupted + Neon → × combo_multiplier
/// - Любая другая комбинация → × 1.0
pub fn resolve_damage(
    base_damage: Option<f32>,
    target_corrupted: bool,
    neon_damage: bool,
    config: &DamageConfig,
) -> f32 {
    let base = match base_damage {
        Some(value) => value,
        None => {
            crate::logger::log_warning(&format!(
                "NeonDamageExec: No Damage Value Found! Defaulting to {}. Check the effect's Data.Damage.",
                config.fallback_base_damage
            ));
            config.fallback_base_damage
        }
    };

    if target_corrupted && neon_damage {
        crate::logger::log_info(">>> COMBO TRIGGERED! Neon vs Corrupted <<<");
        base * config.combo_multiplier
    } else {
        crate::logger::log(&format!(
            "No Combo. Corrupted: {} | Neon: {}",
            if target_corrupted { "YES" } else { "NO" },
            if neon_damage { "YES" } else { "NO" },
        ));
        base
    }
}

/// Полный execution: resolve + submit отрицательной delta в Health цели
pub fn execute_damage(
    context: &DamageContext,
    target: &mut NeonAttributeSet,
    config: &DamageConfig,
) -> DamageExecution {
    let target_corrupted = context.target_is_corrupted();
    let neon_damage = context.is_neon_damage();

    let final_damage = resolve_damage(context.base_damage, target_corrupted, neon_damage, config);

    // Нулевой/отрицательный урон — no-op (не ошибка)
    let change = (final_damage > 0.0).then(|| target.apply_delta(Attribute::Health, -final_damage));

    DamageExecution {
        final_damage,
        combo: target_corrupted && neon_damage,
        used_fallback: context.base_damage.is_none(),
        change,
    }
}
