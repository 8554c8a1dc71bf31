//! AI decision-making module
//!
//! FSM агента: Searching → Following → Hunting → Killing → Searching.
//! Waits (gated audio, collision wait, search routine) - cooperative задачи,
//! которые poll'ятся на AiInterval и перепроверяют state при resume.

use bevy::prelude::*;

pub mod components;
pub mod controller;
pub mod events;
pub mod systems;
pub mod wait;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export основных типов
pub use components::*;
pub use controller::{find_nearest_target, SharkController, TargetCandidate};
pub use events::{AnimationKillEvent, TargetCollision, TargetSighted};
pub use wait::{TimedWaitTask, WaitPoll};

use crate::schedules::AiInterval;
use crate::SimulationSet;

/// AI Plugin
///
/// FixedUpdate (каждый tick):
/// 1. initialize_spawned_sharks - Start() новых агентов (SimulationSet::Spawn)
/// 2. update_visible_targets - line-of-sight (SimulationSet::Perception)
/// 3. handle_target_collisions → handle_animation_kill_events (SimulationSet::Reactions)
///
/// AiInterval (каждые `AiTiming::interval_ticks`):
/// - shark_ai_interval - waits, state handlers, search routine
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TargetSighted>()
            .add_event::<TargetCollision>()
            .add_event::<AnimationKillEvent>();

        app.add_systems(
            FixedUpdate,
            (
                systems::initialize_spawned_sharks.in_set(SimulationSet::Spawn),
                systems::update_visible_targets.in_set(SimulationSet::Perception),
                (
                    systems::handle_target_collisions,
                    systems::handle_animation_kill_events,
                )
                    .chain()
                    .in_set(SimulationSet::Reactions),
            ),
        );

        app.add_systems(AiInterval, systems::shark_ai_interval);
    }
}
