//! FSM AI components (state, config, brain, vision, search routine).

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::wait::TimedWaitTask;
use crate::animation::AnimationTrigger;

/// AI FSM состояния (реплицируется)
///
/// Рёбра: Searching → Following → Hunting → Killing → Searching.
/// Смерть - отдельный overlay (`Mortality`), не состояние FSM.
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect,
)]
#[reflect(Component)]
pub enum SharkState {
    /// Ищем цель (search routine бродит вокруг origin)
    #[default]
    Searching,
    /// Держимся за целью, играет primary cue
    Following,
    /// Ускорились, играет secondary cue
    Hunting,
    /// Прём прямо на цель, ждём collision
    Killing,
}

impl SharkState {
    /// Допустимое ребро перехода
    pub fn can_transition_to(self, next: SharkState) -> bool {
        matches!(
            (self, next),
            (SharkState::Searching, SharkState::Following)
                | (SharkState::Following, SharkState::Hunting)
                | (SharkState::Hunting, SharkState::Killing)
                | (SharkState::Killing, SharkState::Searching)
        )
    }
}

/// Параметры AI (литеральные пороги и скорости)
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct SharkConfig {
    /// Радиус line-of-sight поиска (метры)
    pub sensing_radius: f32,
    /// Fallback: цель без line-of-sight, но вплотную (метры)
    pub proximity_radius: f32,
    /// Скорость поиска (спавн/reset)
    pub roam_speed: f32,
    pub follow_speed: f32,
    pub hunt_speed: f32,
    /// Following: держимся на N метров позади цели
    pub follow_buffer: f32,
    /// Hunting: держимся на N метров позади цели
    pub hunt_buffer: f32,
    pub follow_cue_secs: f32,
    pub hunt_cue_secs: f32,
    /// Killing: сколько ждём collision до reset
    pub collision_timeout_secs: f32,
    /// Search routine: радиус блуждания вокруг origin
    pub roam_radius: f32,
    /// Search routine: смена waypoint'а каждые N секунд
    pub roam_waypoint_secs: f32,
}

impl Default for SharkConfig {
    fn default() -> Self {
        Self {
            sensing_radius: 25.0,
            proximity_radius: 3.0,
            roam_speed: 2.0,
            follow_speed: 8.0,
            hunt_speed: 11.0,
            follow_buffer: 2.0,
            hunt_buffer: 1.0,
            follow_cue_secs: 10.0,
            hunt_cue_secs: 15.0,
            collision_timeout_secs: 120.0,
            roam_radius: 15.0,
            roam_waypoint_secs: 6.0,
        }
    }
}

/// Мутабельное состояние погони/убийства (только на authoritative участнике)
#[derive(Component, Debug, Default)]
pub struct SharkBrain {
    /// Текущая цель (weak: entity может исчезнуть)
    pub target: Option<Entity>,
    /// Коснулись цели в Killing
    pub collided: bool,
    /// Kill animation запущена, ждём AnimationKillEvent
    pub killing: bool,
    /// Единственный in-flight collision wait
    pub collision_wait: Option<TimedWaitTask>,
    /// Последний отправленный animation trigger (dedup)
    pub last_animation: Option<AnimationTrigger>,
}

/// Component: цели в line-of-sight (от TargetSighted events)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct VisibleTargets {
    pub targets: Vec<Entity>,
}

impl VisibleTargets {
    pub fn contains(&self, entity: Entity) -> bool {
        self.targets.contains(&entity)
    }
}

/// Search routine: блуждание вокруг origin, пока нет цели
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct SearchRoutine {
    active: bool,
    origin: Vec3,
    waypoint: Option<Vec3>,
    retarget_in: f32,
}

impl SearchRoutine {
    pub fn start(&mut self, origin: Vec3) {
        self.active = true;
        self.origin = origin;
        self.waypoint = None;
        self.retarget_in = 0.0;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.waypoint = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    #[cfg(test)]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn waypoint(&self) -> Option<Vec3> {
        self.waypoint
    }

    /// Тикает таймер; при истечении выбирает новый waypoint и возвращает его
    pub fn tick(&mut self, delta: f32, config: &SharkConfig, rng: &mut impl Rng) -> Option<Vec3> {
        if !self.active {
            return None;
        }

        self.retarget_in -= delta;
        if self.waypoint.is_some() && self.retarget_in > 0.0 {
            return None;
        }

        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let distance = rng.gen::<f32>() * config.roam_radius;
        let offset = Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance);
        let waypoint = self.origin + offset;

        self.waypoint = Some(waypoint);
        self.retarget_in = config.roam_waypoint_secs;
        Some(waypoint)
    }
}
