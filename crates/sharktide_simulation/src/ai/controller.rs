//! SharkController - decision logic одного агента за один проход
//!
//! Контроллер - это набор `&mut` на компоненты агента + outbox для
//! реплицируемых эффектов. Системы собирают его из Query, unit-тесты -
//! из локальных значений. Kill sequence (combat/kill.rs) - тоже методы
//! контроллера.
//!
//! Все решения принимаются ТОЛЬКО на authoritative участнике - проверка
//! `NetOwnership::is_authoritative` лежит на системах.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::wait::{TimedWaitTask, WaitPoll};
use crate::ai::{SearchRoutine, SharkBrain, SharkConfig, SharkState, VisibleTargets};
use crate::animation::AnimationTrigger;
use crate::audio::{AudioCue, AudioCueGate, CueCompletion, CueLibrary};
use crate::components::{follow_point, MovementCommand, MovementSpeed};
use crate::net::{EffectKind, SharkOutbox};

/// Игрок глазами target scan'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCandidate {
    pub entity: Entity,
    pub position: Vec3,
    pub targetable: bool,
}

/// Two-pass scan: line-of-sight в sensing radius, затем вплотную без LOS
pub fn find_nearest_target(
    origin: Vec3,
    candidates: &[TargetCandidate],
    visible: &VisibleTargets,
    config: &SharkConfig,
) -> Option<Entity> {
    let nearest = |radius: f32, require_sight: bool| {
        candidates
            .iter()
            .filter(|c| c.targetable)
            .filter(|c| !require_sight || visible.contains(c.entity))
            .map(|c| (c.entity, origin.distance(c.position)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity)
    };

    nearest(config.sensing_radius, true).or_else(|| nearest(config.proximity_radius, false))
}

pub struct SharkController<'a> {
    pub agent: Entity,
    pub position: Vec3,
    pub config: &'a SharkConfig,
    pub cues: &'a CueLibrary,
    pub state: &'a mut SharkState,
    pub brain: &'a mut SharkBrain,
    pub gate: &'a mut AudioCueGate,
    pub search: &'a mut SearchRoutine,
    pub command: &'a mut MovementCommand,
    pub speed: &'a mut MovementSpeed,
    pub outbox: &'a mut SharkOutbox,
}

impl SharkController<'_> {
    /// Инициализация после спавна: idle swim, скорость поиска, search от точки спавна
    pub fn on_spawn(&mut self) {
        crate::logger::log_info(&format!("🦈 {:?} spawned at {:?}", self.agent, self.position));
        self.animate(AnimationTrigger::StartSwim);
        self.speed.speed = self.config.roam_speed;
        self.search.start(self.position);
        *self.state = SharkState::Searching;
        self.outbox
            .push(self.agent, EffectKind::StateChanged(SharkState::Searching));
    }

    /// Один AI интервал: resume waits, затем state handler и search routine
    ///
    /// Waits poll'ятся ДО handler'а: wait, созданный handler'ом в этом
    /// интервале, начинает отсчёт со следующего (полная длительность от старта).
    pub fn run_interval(
        &mut self,
        candidates: &[TargetCandidate],
        visible: &VisibleTargets,
        delta: f32,
        rng: &mut impl Rng,
    ) {
        self.poll_waits(delta);

        let target_position = self.target_position(candidates);

        match *self.state {
            SharkState::Searching => self.handle_searching(candidates, visible),
            SharkState::Following => self.handle_following(target_position),
            SharkState::Hunting => self.handle_hunting(target_position),
            SharkState::Killing => self.handle_killing(target_position),
        }

        self.tick_search(delta, rng);
    }

    fn target_position(&self, candidates: &[TargetCandidate]) -> Option<Vec3> {
        let target = self.brain.target?;
        candidates
            .iter()
            .find(|c| c.entity == target)
            .map(|c| c.position)
    }

    fn handle_searching(&mut self, candidates: &[TargetCandidate], visible: &VisibleTargets) {
        // Никого рядом - search routine продолжает бродить
        let Some(target) = find_nearest_target(self.position, candidates, visible, self.config)
        else {
            return;
        };

        crate::logger::log(&format!("🎯 {:?} start targeting {:?}", self.agent, target));
        self.brain.target = Some(target);
        self.search.stop();
        self.switch_state(SharkState::Following);
    }

    fn handle_following(&mut self, target_position: Option<Vec3>) {
        self.speed.speed = self.config.follow_speed;
        self.follow_closely(target_position, self.config.follow_buffer);

        self.play_gated(
            AudioCue::FollowSong,
            self.config.follow_cue_secs,
            CueCompletion::Advance {
                from: SharkState::Following,
                to: SharkState::Hunting,
            },
        );
    }

    fn handle_hunting(&mut self, target_position: Option<Vec3>) {
        self.animate(AnimationTrigger::StartHunting);
        self.speed.speed = self.config.hunt_speed;
        self.follow_closely(target_position, self.config.hunt_buffer);

        self.play_gated(
            AudioCue::HuntSting,
            self.config.hunt_cue_secs,
            CueCompletion::Advance {
                from: SharkState::Hunting,
                to: SharkState::Killing,
            },
        );
    }

    fn handle_killing(&mut self, target_position: Option<Vec3>) {
        if self.brain.can_start_kill().is_ok() {
            self.start_kill_sequence();
            return;
        }

        // Прём прямо на цель
        if let Some(position) = target_position {
            self.speed.speed = self.config.hunt_speed;
            *self.command = MovementCommand::MoveToPosition { target: position };
        }

        if !self.brain.killing && self.brain.collision_wait.is_none() {
            crate::logger::log(&format!("{:?} waiting for collision...", self.agent));
            self.brain.collision_wait = Some(TimedWaitTask::new(self.config.collision_timeout_secs));
        }
    }

    fn tick_search(&mut self, delta: f32, rng: &mut impl Rng) {
        if *self.state != SharkState::Searching {
            return;
        }

        if let Some(waypoint) = self.search.tick(delta, self.config, rng) {
            self.speed.speed = self.config.roam_speed;
            *self.command = MovementCommand::MoveToPosition { target: waypoint };
        }
    }

    /// Resume всех cooperative waits; каждый результат перепроверяет state
    pub fn poll_waits(&mut self, delta: f32) {
        let tick = self.gate.tick(delta);
        if tick.silenced.is_some() {
            self.outbox.push(self.agent, EffectKind::StopCue);
        }
        for completion in tick.completions {
            self.complete_cue(completion);
        }

        let collided = self.brain.collided;
        let Some(wait) = self.brain.collision_wait.as_mut() else {
            return;
        };

        match wait.poll(delta, || collided) {
            WaitPoll::Pending => {}
            WaitPoll::Satisfied => {
                self.brain.collision_wait = None;
                if *self.state == SharkState::Killing {
                    crate::logger::log(&format!("{:?} collision detected within timeout", self.agent));
                    self.start_kill_sequence();
                }
            }
            WaitPoll::TimedOut => {
                self.brain.collision_wait = None;
                if *self.state == SharkState::Killing {
                    crate::logger::log_info(&format!(
                        "⏱️ {:?} no collision within {}s, resetting",
                        self.agent, self.config.collision_timeout_secs
                    ));
                    self.reset_if_not_killing();
                }
            }
        }
    }

    fn complete_cue(&mut self, completion: CueCompletion) {
        match completion {
            CueCompletion::Nothing => {}
            CueCompletion::Advance { from, to } => {
                if *self.state == from {
                    self.switch_state(to);
                } else {
                    crate::logger::log(&format!(
                        "{:?} stale cue completion {:?} → {:?} dropped (now {:?})",
                        self.agent, from, to, *self.state
                    ));
                }
            }
        }
    }

    pub fn switch_state(&mut self, next: SharkState) {
        if *self.state == next {
            return;
        }
        crate::logger::log(&format!("AI: {:?} {:?} → {:?}", self.agent, *self.state, next));
        *self.state = next;
        self.outbox.push(self.agent, EffectKind::StateChanged(next));
    }

    /// Replicated animation trigger; повтор последнего trigger'а не шлём
    pub fn animate(&mut self, trigger: AnimationTrigger) {
        if self.brain.last_animation == Some(trigger) {
            return;
        }
        self.brain.last_animation = Some(trigger);
        self.outbox.push(self.agent, EffectKind::Animation(trigger));
    }

    /// Gated cue: занят слот или клипа нет - no-op
    pub fn play_gated(&mut self, cue: AudioCue, duration: f32, on_complete: CueCompletion) {
        if self.gate.is_gated() {
            return;
        }
        if !self.cues.contains(cue) {
            crate::logger::log_warning(&format!("{:?}: audio clip not found for {:?}", self.agent, cue));
            return;
        }
        if self.gate.acquire(cue, duration, on_complete) {
            self.outbox.push(self.agent, EffectKind::PlayCue(cue));
        }
    }

    pub fn stop_audio(&mut self) {
        if self.gate.stop().is_some() {
            self.outbox.push(self.agent, EffectKind::StopCue);
        }
    }

    fn follow_closely(&mut self, target_position: Option<Vec3>, buffer: f32) {
        let Some(target) = target_position else {
            return;
        };
        *self.command = MovementCommand::MoveToPosition {
            target: follow_point(self.position, target, buffer),
        };
    }
}
