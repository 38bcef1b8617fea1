//! Combat module — damage execution с combo правилом
//!
//! Вызывается из effect pipeline для EffectKind::Damage.

pub mod damage;

#[cfg(test)]
mod damage_tests;

pub use damage::{execute_damage, resolve_damage, DamageContext, DamageExecution};
