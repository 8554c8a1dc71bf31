//! Movement компоненты: команды навигации и скорость

use bevy::prelude::*;

/// Команда движения для агента (выполняется navigation layer движка)
///
/// Архитектура:
/// - ECS система пишет MovementCommand (high-level intent)
/// - Navigation layer читает и конвертирует в destination агента
/// - Повторная запись той же команды каждый тик идемпотентна
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub enum MovementCommand {
    /// Стоять на месте (не трогать destination)
    #[default]
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
}

impl MovementCommand {
    pub fn destination(&self) -> Option<Vec3> {
        match self {
            MovementCommand::Idle => None,
            MovementCommand::MoveToPosition { target } => Some(*target),
        }
    }
}

/// Скорость движения агента (метры/сек)
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 2.0 } // скорость спавна/поиска
    }
}

/// Точка в `buffer` метрах перед целью на линии target → agent
///
/// Если агент стоит ровно на цели - направление нулевое, возвращаем саму цель.
pub fn follow_point(agent: Vec3, target: Vec3, buffer: f32) -> Vec3 {
    let direction = (target - agent).normalize_or_zero();
    target - direction * buffer
}
