//! Authority и репликация эффектов
//!
//! Один authoritative участник на агента гоняет всю decision logic.
//! Остальные только рендерят `ReplicatedEffect` (animation, audio) и
//! зеркалят state/death flag. Транспорт - внешний network layer:
//! он форвардит `ReplicatedEffect` на клиентов fire-and-forget, at-most-once.

use bevy::prelude::*;

use crate::animation::AnimationTrigger;
use crate::audio::AudioCue;
use crate::ai::SharkState;

pub mod replication;
pub mod snapshot;

pub use replication::apply_replicated_effects;
pub use snapshot::{apply_snapshot, capture_snapshots, SharkSnapshot, SnapshotError};

/// Локальный участник симуляции (host = 0)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalParticipant {
    pub id: u64,
}

/// Владелец агента
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct NetOwnership {
    pub owner: u64,
}

impl NetOwnership {
    /// Capability check: можно ли здесь гонять decision logic
    pub fn is_authoritative(&self, local: &LocalParticipant) -> bool {
        self.owner == local.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Animation(AnimationTrigger),
    PlayCue(AudioCue),
    StopCue,
    StateChanged(SharkState),
    Died,
}

/// Реплицируемый side effect агента (пишет только authority)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicatedEffect {
    pub agent: Entity,
    pub kind: EffectKind,
}

/// Буфер эффектов одного прохода логики
///
/// Логика контроллера не знает про EventWriter - система сливает outbox после.
#[derive(Debug, Default)]
pub struct SharkOutbox {
    pub effects: Vec<ReplicatedEffect>,
    pub fatal: Vec<crate::combat::FatalEffect>,
}

impl SharkOutbox {
    pub fn push(&mut self, agent: Entity, kind: EffectKind) {
        self.effects.push(ReplicatedEffect { agent, kind });
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.fatal.is_empty()
    }

    pub fn flush(
        &mut self,
        effects: &mut EventWriter<ReplicatedEffect>,
        fatal: &mut EventWriter<crate::combat::FatalEffect>,
    ) {
        for effect in self.effects.drain(..) {
            effects.write(effect);
        }
        for kill in self.fatal.drain(..) {
            fatal.write(kill);
        }
    }
}

/// Replication plugin: ReplicatedEffect → локальный рендер / mirror
pub struct ReplicationPlugin;

impl Plugin for ReplicationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ReplicatedEffect>().add_systems(
            FixedUpdate,
            apply_replicated_effects.in_set(crate::SimulationSet::Replication),
        );
    }
}
