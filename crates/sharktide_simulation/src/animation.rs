//! Animation triggers (реплицируемые) и локальный Animator
//!
//! Trigger выбирается enum'ом, строковое имя параметра animator'а -
//! только в lookup таблице `AnimationTrigger::parameter_name`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum AnimationTrigger {
    /// Idle swim (spawn, reset)
    StartSwim,
    /// Hunting loop
    StartHunting,
    /// Kill animation - на нужном кадре движок шлёт AnimationKillEvent
    Kill,
}

impl AnimationTrigger {
    pub fn parameter_name(self) -> &'static str {
        match self {
            AnimationTrigger::StartSwim => "startSwim",
            AnimationTrigger::StartHunting => "startHunting",
            AnimationTrigger::Kill => "kill",
        }
    }
}

/// Локальное отображение animator'а (на каждом участнике)
///
/// Движок читает `current` и дёргает SetTrigger у своего animator'а.
#[derive(Component, Debug, Clone, Default)]
pub struct Animator {
    pub current: Option<AnimationTrigger>,
    pub triggers_fired: u32,
}

impl Animator {
    pub fn set_trigger(&mut self, trigger: AnimationTrigger) {
        self.current = Some(trigger);
        self.triggers_fired += 1;
    }
}
