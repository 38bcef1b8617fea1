//! ProjectilePhaseController — state machine снаряда
//!
//! Standard: летит прямо, первая квалифицирующая коллизия → эффект + уничтожение.
//!
//! Boomerang:
//! - Outgoing: летит прямо, на overlap накладывает Corruption
//! - дистанция ≥ max_travel ИЛИ blocking hit (стена) → Returning
//! - Returning: homing к владельцу, на overlap наносит Damage (combo!)
//! - ближе arrival_radius к владельцу → уничтожение
//! - каждую цель можно задеть один раз за фазу (дважды за полёт)
//!
//! Контроллер не знает про ECS: системы передают позиции и флаги,
//! контроллер возвращает решение.

use std::collections::HashSet;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ProjectileMode {
    Standard,
    Boomerang,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ProjectilePhase {
    /// Летит от владельца
    Outgoing,
    /// Возвращается к владельцу
    Returning,
}

/// Какой эффект применить к цели
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitEffect {
    /// Standard hit или boomerang на возврате
    Damage,
    /// Boomerang на вылете
    Corruption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    NoActor,
    SelfHit,
    AlreadyTerminated,
    AlreadyHitThisPhase,
    /// Цель без AbilitySystem — не регистрируется, может быть задета позже
    NoAbilitySystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Ignored(IgnoreReason),
    Hit {
        effect: HitEffect,
        /// Standard снаряд уничтожается после hit
        terminate: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ничего не произошло
    Idle,
    /// Standard, уничтоженный снаряд или невалидный владелец
    Inert,
    /// Outgoing → Returning по дистанции (включить homing)
    EnteredReturning,
    /// Долетел до владельца — уничтожен
    ArrivedAtOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingOutcome {
    /// Standard снаряд разбился о стену
    Terminated,
    /// Boomerang ударился о стену на вылете — разворот
    ForcedReturn,
    /// Boomerang на возврате проходит сквозь стены; уже уничтоженный снаряд
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoomerangState {
    /// Weak handle: жив ли владелец, проверяет вызывающий (query по Entity)
    pub owner: Option<Entity>,
    pub origin: Vec3,
    pub max_travel_distance: f32,
    pub phase: ProjectilePhase,
    hit_this_phase: HashSet<Entity>,
}

impl BoomerangState {
    fn new(owner: Option<Entity>, origin: Vec3, max_travel_distance: f32) -> Self {
        Self {
            owner,
            origin,
            max_travel_distance,
            phase: ProjectilePhase::Outgoing,
            hit_this_phase: HashSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectilePhaseController {
    /// Кто выпустил снаряд (self-hit prevention)
    instigator: Option<Entity>,
    boomerang: Option<BoomerangState>,
    arrival_radius: f32,
    terminated: bool,
}

impl ProjectilePhaseController {
    pub fn new(instigator: Option<Entity>, arrival_radius: f32) -> Self {
        Self {
            instigator,
            boomerang: None,
            arrival_radius,
            terminated: false,
        }
    }

    /// Переводит снаряд в boomerang режим (Outgoing, пустой hit set).
    ///
    /// Повторный вызов сбрасывает полёт с новой точки старта.
    pub fn init_boomerang(&mut self, owner: Option<Entity>, origin: Vec3, max_travel_distance: f32) {
        crate::logger::log(&format!(
            "Boomerang initialized: owner={:?} origin={:?} max_distance={:.0}",
            owner, origin, max_travel_distance
        ));

        self.boomerang = Some(BoomerangState::new(owner, origin, max_travel_distance));
    }

    pub fn mode(&self) -> ProjectileMode {
        if self.boomerang.is_some() {
            ProjectileMode::Boomerang
        } else {
            ProjectileMode::Standard
        }
    }

    pub fn phase(&self) -> Option<ProjectilePhase> {
        self.boomerang.as_ref().map(|state| state.phase)
    }

    pub fn boomerang(&self) -> Option<&BoomerangState> {
        self.boomerang.as_ref()
    }

    /// Владелец boomerang'а (цель возврата)
    pub fn owner(&self) -> Option<Entity> {
        self.boomerang.as_ref().and_then(|state| state.owner)
    }

    pub fn instigator(&self) -> Option<Entity> {
        self.instigator
    }

    pub fn arrival_radius(&self) -> f32 {
        self.arrival_radius
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn has_hit_this_phase(&self, actor: Entity) -> bool {
        self.boomerang
            .as_ref()
            .is_some_and(|state| state.hit_this_phase.contains(&actor))
    }

    pub fn hits_this_phase(&self) -> usize {
        self.boomerang
            .as_ref()
            .map_or(0, |state| state.hit_this_phase.len())
    }

    /// Идемпотентный destroy. true — только при первом вызове.
    pub fn terminate(&mut self) -> bool {
        if self.terminated {
            return false;
        }
        self.terminated = true;
        true
    }

    /// Outgoing → Returning + очистка hit set (цели снова доступны)
    fn enter_returning(&mut self) -> bool {
        let Some(state) = self.boomerang.as_mut() else {
            return false;
        };
        if state.phase != ProjectilePhase::Outgoing {
            return false;
        }

        state.phase = ProjectilePhase::Returning;
        state.hit_this_phase.clear();
        true
    }

    /// Per-tick оценка фазы.
    ///
    /// `owner_position` = None → владелец уничтожен (handle протух): снаряд
    /// инертен до собственного timeout'а.
    pub fn tick(&mut self, position: Vec3, owner_position: Option<Vec3>) -> TickOutcome {
        if self.terminated {
            return TickOutcome::Inert;
        }
        let Some(state) = self.boomerang.as_ref() else {
            return TickOutcome::Inert;
        };
        let Some(owner_position) = owner_position else {
            return TickOutcome::Inert;
        };

        match state.phase {
            ProjectilePhase::Outgoing => {
                let traveled = state.origin.distance(position);
                if traveled >= state.max_travel_distance {
                    crate::logger::log(&format!(
                        "=== BOOMERANG ENTERING RETURN PHASE (distance {:.0}) ===",
                        traveled
                    ));
                    self.enter_returning();
                    return TickOutcome::EnteredReturning;
                }
                TickOutcome::Idle
            }
            ProjectilePhase::Returning => {
                if position.distance(owner_position) < self.arrival_radius {
                    crate::logger::log("Boomerang returned to owner - destroying");
                    self.terminate();
                    return TickOutcome::ArrivedAtOwner;
                }
                TickOutcome::Idle
            }
        }
    }

    /// Blocking collision (стены, препятствия)
    pub fn on_blocking_hit(&mut self, blocking: bool) -> BlockingOutcome {
        if self.terminated {
            return BlockingOutcome::Ignored;
        }

        match self.phase() {
            // Standard разбивается о любой hit
            None => {
                self.terminate();
                BlockingOutcome::Terminated
            }
            Some(ProjectilePhase::Outgoing) if blocking => {
                self.enter_returning();
                BlockingOutcome::ForcedReturn
            }
            // Returning: стены игнорируются (pass-through на обратном пути)
            Some(_) => BlockingOutcome::Ignored,
        }
    }

    /// Общая обработка коллизии с актором (overlap).
    ///
    /// `target_has_ability_system` — внешняя capability проверка цели.
    pub fn handle_collision(
        &mut self,
        other: Option<Entity>,
        target_has_ability_system: bool,
    ) -> CollisionOutcome {
        let Some(other) = other else {
            return CollisionOutcome::Ignored(IgnoreReason::NoActor);
        };
        if self.terminated {
            return CollisionOutcome::Ignored(IgnoreReason::AlreadyTerminated);
        }
        if Some(other) == self.instigator || Some(other) == self.owner() {
            return CollisionOutcome::Ignored(IgnoreReason::SelfHit);
        }

        let Some(state) = self.boomerang.as_mut() else {
            // Standard: ровно одно применение эффекта за жизнь снаряда
            self.terminate();
            return CollisionOutcome::Hit {
                effect: HitEffect::Damage,
                terminate: true,
            };
        };

        if state.hit_this_phase.contains(&other) {
            return CollisionOutcome::Ignored(IgnoreReason::AlreadyHitThisPhase);
        }
        if !target_has_ability_system {
            return CollisionOutcome::Ignored(IgnoreReason::NoAbilitySystem);
        }

        state.hit_this_phase.insert(other);

        let effect = match state.phase {
            ProjectilePhase::Outgoing => HitEffect::Corruption,
            ProjectilePhase::Returning => HitEffect::Damage,
        };

        CollisionOutcome::Hit {
            effect,
            terminate: false,
        }
    }
}
