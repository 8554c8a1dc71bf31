//! Базовые компоненты акторов: Shark, Health, Mortality, Player, Listener

use bevy::prelude::*;

/// Акула - AI-управляемый агент
///
/// Автоматически добавляет всё состояние контроллера через Required Components.
/// Authority задаётся через `NetOwnership` при спавне (default: owner 0 = host).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    Health,
    Mortality,
    crate::components::MovementCommand,
    crate::components::MovementSpeed,
    crate::ai::SharkState,
    crate::ai::SharkConfig,
    crate::ai::SharkBrain,
    crate::ai::SearchRoutine,
    crate::ai::VisibleTargets,
    crate::audio::AudioCueGate,
    crate::audio::AudioEmitter,
    crate::animation::Animator,
    crate::net::NetOwnership
)]
pub struct Shark;

/// Здоровье актора
///
/// Может уйти в минус: смерть проверяется как `current <= 0`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.current -= amount;
    }
}

/// Смерть агента (ортогональна FSM)
///
/// `dead` реплицируется, `death_transition_done` - локальный one-time флаг
/// для stop audio + death cue.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Mortality {
    pub dead: bool,
    pub death_transition_done: bool,
}

impl Mortality {
    pub fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Игрок - потенциальная цель
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Player {
    /// Жив и доступен для таргетинга (внутри play area, не в корабле)
    pub targetable: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self { targetable: true }
    }
}

/// Участник, который слышит spatial audio (локальная камера/игрок)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Listener;
