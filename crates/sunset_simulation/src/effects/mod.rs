//! Effects module — host effect pipeline (стенд-ин для engine ability system)
//!
//! - tags: иерархические gameplay tags
//! - definition: EffectClass → GameplayEffectDef (EffectRegistry)
//! - ability_system: capability + owned статусы цели
//! - pipeline: ApplyEffect → damage/modifier/tags

use bevy::prelude::*;

pub mod ability_system;
pub mod definition;
pub mod pipeline;
pub mod tags;

pub use ability_system::AbilitySystem;
pub use definition::{
    EffectClass, EffectKind, EffectRegistry, GameplayEffectDef, CORRUPTION_EFFECT, HEAL_EFFECT,
    NEON_DAMAGE_EFFECT,
};
pub use pipeline::{
    apply_gameplay_effects, execute_effect, tick_status_durations, ApplyEffect, EffectApplied,
    EffectOutcome, SetByCallerMagnitudes,
};
pub use tags::{GameplayTag, GameplayTagContainer, DAMAGE_TYPE_NEON, DATA_DAMAGE, STATUS_CORRUPTED};

/// Effects Plugin
///
/// Порядок: apply_gameplay_effects → tick_status_durations (SimulationSet::Effects)
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ApplyEffect>().add_event::<EffectApplied>();

        // Host может заранее вставить свой registry
        if !app.world().contains_resource::<EffectRegistry>() {
            app.insert_resource(EffectRegistry::with_defaults());
        }

        app.add_systems(
            FixedUpdate,
            (apply_gameplay_effects, tick_status_durations)
                .chain()
                .in_set(crate::SimulationSet::Effects),
        );
    }
}
