//! Kill sequence: collision → kill animation → AnimationKillEvent → fatal effect → reset
//!
//! Летальный эффект НЕ применяется при старте: контроллер только запускает
//! "kill" trigger, а движок шлёт AnimationKillEvent на нужном кадре.

use bevy::prelude::*;
use thiserror::Error;

use super::FatalEffect;
use crate::ai::controller::SharkController;
use crate::ai::{SharkBrain, SharkState};
use crate::animation::AnimationTrigger;

/// Почему kill не стартовал (логируется, наружу не уходит)
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KillRefusal {
    #[error("not in Killing state (current: {0:?})")]
    WrongState(SharkState),
    #[error("no target")]
    NoTarget,
    #[error("no collision with target yet")]
    NoCollision,
    #[error("kill already in progress")]
    AlreadyKilling,
}

impl SharkBrain {
    /// Eligibility без учёта state: target есть, collision была, kill не идёт
    pub fn can_start_kill(&self) -> Result<(), KillRefusal> {
        if self.target.is_none() {
            return Err(KillRefusal::NoTarget);
        }
        if !self.collided {
            return Err(KillRefusal::NoCollision);
        }
        if self.killing {
            return Err(KillRefusal::AlreadyKilling);
        }
        Ok(())
    }
}

impl SharkController<'_> {
    pub fn check_kill_start(&self) -> Result<(), KillRefusal> {
        if *self.state != SharkState::Killing {
            return Err(KillRefusal::WrongState(*self.state));
        }
        self.brain.can_start_kill()
    }

    /// Collision с целью (уже отфильтрованной как targetable player)
    ///
    /// Вне Killing игнорируется.
    pub fn on_collision(&mut self, target: Entity) {
        if *self.state != SharkState::Killing {
            return;
        }

        crate::logger::log(&format!("💥 {:?} collision with {:?}", self.agent, target));
        self.brain.collided = true;
        self.brain.target = Some(target);
        self.start_kill_sequence();
    }

    /// Запуск kill animation; false - отказ (залогирован)
    pub fn start_kill_sequence(&mut self) -> bool {
        if let Err(reason) = self.check_kill_start() {
            crate::logger::log(&format!("{:?} cannot start killing behavior: {}", self.agent, reason));
            return false;
        }

        crate::logger::log_info(&format!(
            "🩸 {:?} starting kill behavior for {:?}",
            self.agent, self.brain.target
        ));
        self.stop_audio();
        self.brain.killing = true;
        self.animate(AnimationTrigger::Kill);
        true
    }

    /// AnimationKillEvent: кадр анимации, на котором kill должен сработать
    ///
    /// Без kill in progress событие игнорируется. Цели нет - только reset.
    pub fn execute_kill(&mut self) -> bool {
        if !self.brain.killing {
            crate::logger::log_warning(&format!(
                "{:?} kill animation event without kill in progress, ignored",
                self.agent
            ));
            return false;
        }

        match self.brain.target {
            Some(target) => {
                crate::logger::log_info(&format!("☠️ {:?} executing kill on {:?}", self.agent, target));
                self.outbox.fatal.push(FatalEffect {
                    agent: self.agent,
                    target,
                });
            }
            None => crate::logger::log(&format!("{:?} no target to kill", self.agent)),
        }

        self.reset_after_kill();
        true
    }

    /// Reset, защищённый от гонки с kill completion
    pub fn reset_if_not_killing(&mut self) -> bool {
        if self.brain.killing {
            crate::logger::log(&format!("{:?} reset refused: kill in progress", self.agent));
            return false;
        }
        self.reset_after_kill();
        true
    }

    /// Полный reset в Searching
    ///
    /// In-flight collision wait сбрасывается вместе с флагами: новый Killing
    /// начинает ожидание с нуля.
    fn reset_after_kill(&mut self) {
        self.brain.killing = false;
        self.brain.collided = false;
        self.brain.target = None;
        self.brain.collision_wait = None;
        self.stop_audio();

        self.animate(AnimationTrigger::StartSwim);
        self.search.start(self.position);
        self.switch_state(SharkState::Searching);
    }
}
