//! Test fixture: компоненты одного агента без World

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::controller::{SharkController, TargetCandidate};
use crate::ai::{SearchRoutine, SharkBrain, SharkConfig, SharkState, VisibleTargets};
use crate::audio::{AudioCueGate, CueLibrary};
use crate::components::{MovementCommand, MovementSpeed};
use crate::net::{EffectKind, SharkOutbox};

pub const INTERVAL: f32 = 0.2;

pub struct Fixture {
    pub agent: Entity,
    pub position: Vec3,
    pub config: SharkConfig,
    pub cues: CueLibrary,
    pub state: SharkState,
    pub brain: SharkBrain,
    pub gate: AudioCueGate,
    pub search: SearchRoutine,
    pub command: MovementCommand,
    pub speed: MovementSpeed,
    pub outbox: SharkOutbox,
    pub visible: VisibleTargets,
    pub candidates: Vec<TargetCandidate>,
    pub rng: ChaCha8Rng,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            agent: Entity::from_raw(1),
            position: Vec3::ZERO,
            config: SharkConfig::default(),
            cues: CueLibrary::default(),
            state: SharkState::Searching,
            brain: SharkBrain::default(),
            gate: AudioCueGate::default(),
            search: SearchRoutine::default(),
            command: MovementCommand::default(),
            speed: MovementSpeed::default(),
            outbox: SharkOutbox::default(),
            visible: VisibleTargets::default(),
            candidates: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(7),
        }
    }

    /// Игрок в line-of-sight на расстоянии `distance` по X
    pub fn with_visible_player(mut self, id: u32, distance: f32) -> Self {
        let entity = Entity::from_raw(id);
        self.candidates.push(TargetCandidate {
            entity,
            position: Vec3::new(distance, 0.0, 0.0),
            targetable: true,
        });
        self.visible.targets.push(entity);
        self
    }

    pub fn controller(&mut self) -> SharkController<'_> {
        SharkController {
            agent: self.agent,
            position: self.position,
            config: &self.config,
            cues: &self.cues,
            state: &mut self.state,
            brain: &mut self.brain,
            gate: &mut self.gate,
            search: &mut self.search,
            command: &mut self.command,
            speed: &mut self.speed,
            outbox: &mut self.outbox,
        }
    }

    /// Один AI интервал
    pub fn interval(&mut self) {
        let candidates = std::mem::take(&mut self.candidates);
        let visible = std::mem::take(&mut self.visible);
        let mut rng = self.rng.clone();

        self.controller()
            .run_interval(&candidates, &visible, INTERVAL, &mut rng);

        self.rng = rng;
        self.candidates = candidates;
        self.visible = visible;
    }

    /// Гонять интервалы, пока state не сменится (не больше `limit`)
    pub fn run_until_state(&mut self, target: SharkState, limit: usize) -> usize {
        for i in 0..limit {
            if self.state == target {
                return i;
            }
            self.interval();
        }
        panic!("state {:?} not reached in {} intervals (now {:?})", target, limit, self.state);
    }

    pub fn drain_effects(&mut self) -> Vec<EffectKind> {
        self.outbox.effects.drain(..).map(|e| e.kind).collect()
    }

    /// Поставить агента сразу в Killing с целью
    pub fn into_killing(mut self, target: u32) -> Self {
        self.state = SharkState::Killing;
        self.brain.target = Some(Entity::from_raw(target));
        self
    }
}
