//! Spatial audio агента
//!
//! - AudioCue: enum вместо строкового имени клипа, lookup через CueLibrary
//! - AudioCueGate (gate.rs): эксклюзивный слот для gated cue + completion
//! - AudioEmitter: локальный рендер cue на участнике (volume по дистанции)
//!
//! Low-level mixer и загрузка клипов - на стороне движка.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod gate;

pub use gate::{AudioCueGate, CueCompletion, GateTick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum AudioCue {
    /// Песня во время Following (primary cue)
    FollowSong,
    /// Искажённый кусок во время Hunting (secondary cue)
    HuntSting,
    /// Звук смерти агента
    DeathSplat,
}

/// Клип, зарегистрированный движком под cue
///
/// Длительность gated cue задаёт `SharkConfig`, не клип.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueClip {
    pub name: String,
}

impl CueClip {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Linear rolloff: полная громкость в 0, тишина на max_distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialAudio {
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_volume: f32,
}

impl Default for SpatialAudio {
    fn default() -> Self {
        Self {
            min_distance: 1.0,
            max_distance: 25.0,
            max_volume: 1.0,
        }
    }
}

impl SpatialAudio {
    /// Громкость для слушателя на `distance`, None - вне радиуса
    pub fn volume_at(&self, distance: f32) -> Option<f32> {
        if distance > self.max_distance || self.max_distance <= 0.0 {
            return None;
        }
        Some(self.max_volume * (1.0 - distance / self.max_distance))
    }
}

/// Lookup таблица cue → clip
///
/// Отсутствующая запись = клип не назначен: запуск такого cue - no-op с warning.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CueLibrary {
    pub clips: HashMap<AudioCue, CueClip>,
    pub spatial: SpatialAudio,
}

impl Default for CueLibrary {
    fn default() -> Self {
        let clips = HashMap::from([
            (AudioCue::FollowSong, CueClip::new("babySharkSong")),
            (AudioCue::HuntSting, CueClip::new("runaway_letsgohunt")),
            (AudioCue::DeathSplat, CueClip::new("splat")),
        ]);
        Self {
            clips,
            spatial: SpatialAudio::default(),
        }
    }
}

impl CueLibrary {
    pub fn empty() -> Self {
        Self {
            clips: HashMap::new(),
            spatial: SpatialAudio::default(),
        }
    }

    pub fn clip(&self, cue: AudioCue) -> Option<&CueClip> {
        self.clips.get(&cue)
    }

    pub fn contains(&self, cue: AudioCue) -> bool {
        self.clips.contains_key(&cue)
    }
}

/// Локальный audio source агента (на каждом участнике)
///
/// Движок читает `playing`/`volume` и проигрывает клип через свой mixer.
#[derive(Component, Debug, Clone, Default)]
pub struct AudioEmitter {
    pub playing: Option<AudioCue>,
    pub clip_name: Option<String>,
    pub volume: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub plays_started: u32,
}

impl AudioEmitter {
    /// Рендерит cue для первого слушателя в радиусе (nearest-listener heuristic)
    ///
    /// Возвращает false, если клипа нет или никто не слышит.
    pub fn render(
        &mut self,
        cue: AudioCue,
        library: &CueLibrary,
        emitter_position: Vec3,
        listeners: impl IntoIterator<Item = Vec3>,
    ) -> bool {
        let Some(clip) = library.clip(cue) else {
            crate::logger::log_warning(&format!("Audio clip not found: {:?}", cue));
            return false;
        };

        let spatial = library.spatial;
        self.min_distance = spatial.min_distance;
        self.max_distance = spatial.max_distance;

        for listener in listeners {
            let distance = emitter_position.distance(listener);
            if let Some(volume) = spatial.volume_at(distance) {
                self.volume = volume;
                self.playing = Some(cue);
                self.clip_name = Some(clip.name.clone());
                self.plays_started += 1;
                crate::logger::log(&format!(
                    "🔊 Playing audio: {} (volume {:.2} at {:.1}m)",
                    clip.name, volume, distance
                ));
                return true;
            }
        }

        false
    }

    pub fn stop(&mut self) {
        if self.playing.take().is_some() {
            crate::logger::log("Stopping audio.");
        }
        self.clip_name = None;
    }

    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }
}
