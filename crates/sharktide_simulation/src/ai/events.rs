//! AI Events - события от движка для AI систем
//!
//! Движок (vision, colliders, animation events) → Bevy Events → контроллер агента.

use bevy::prelude::*;

/// Line-of-sight события (vision check движка)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSighted {
    /// Игрок вошёл в line-of-sight агента
    Spotted {
        /// Entity агента (наблюдатель)
        observer: Entity,
        /// Entity игрока
        target: Entity,
    },

    /// Игрок вышел из line-of-sight (или despawned)
    Lost { observer: Entity, target: Entity },
}

/// Физический контакт агента с игроком (collider движка)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCollision {
    pub agent: Entity,
    pub target: Entity,
}

/// Animation event: кадр kill-анимации, на котором kill должен сработать
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationKillEvent {
    pub agent: Entity,
}
