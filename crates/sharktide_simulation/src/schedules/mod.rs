//! Custom schedules и tick counter
//!
//! # Архитектура
//!
//! **FixedUpdate (60 Hz)** → increment_tick_counter
//!   └─ tick % interval_ticks == 0 → AiInterval (5 Hz по умолчанию)
//!
//! AiInterval - аналог "AI interval" движка: state machine, search routine,
//! cue gates, collision wait. Всё внутри двигается на фиксированный
//! `AiTiming::interval_secs()`, а не на wall-clock delta - детерминизм.

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod timer_systems;

pub use timer_systems::{increment_tick_counter, run_ai_interval_timer};

/// Глобальный tick counter (детерминистичный, wraparound safe)
///
/// Инкрементируется в каждый FixedUpdate tick.
#[derive(Resource, Default, Debug)]
pub struct FixedTickCounter {
    pub tick: u64,
}

/// Custom schedule: AiInterval (coarse AI tick)
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AiInterval;

/// Частоты симуляции
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTiming {
    /// Частота FixedUpdate (Hz)
    pub fixed_hz: f64,
    /// Сколько fixed ticks между AI интервалами
    pub interval_ticks: u64,
}

impl Default for AiTiming {
    fn default() -> Self {
        Self {
            fixed_hz: 60.0,
            interval_ticks: 12, // 0.2s
        }
    }
}

impl AiTiming {
    /// Длина одного AI интервала в секундах
    pub fn interval_secs(&self) -> f32 {
        (self.interval_ticks.max(1) as f64 / self.fixed_hz) as f32
    }

    /// Сколько fixed ticks занимает `secs` секунд (округление вверх)
    pub fn ticks_for(&self, secs: f32) -> u64 {
        (secs as f64 * self.fixed_hz).ceil() as u64
    }
}
