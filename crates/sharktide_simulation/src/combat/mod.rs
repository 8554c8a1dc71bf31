//! Combat module: kill sequence + damage/death overlay
//!
//! ECS ответственность:
//! - Kill eligibility, kill sequence, reset после kill
//! - Health агента, death decision, one-time death transition
//!
//! Движок ответственность:
//! - Collider → TargetCollision
//! - Animation event кадра kill → AnimationKillEvent
//! - FatalEffect → реальное убийство игрока

use bevy::prelude::*;

pub mod damage;
pub mod kill;

#[cfg(test)]
mod kill_tests;

pub use damage::{apply_shark_damage, death_overlay};
pub use kill::KillRefusal;

/// Агент убил цель (читает damage layer движка)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatalEffect {
    pub agent: Entity,
    pub target: Entity,
}

/// Урон по агенту (onDamage)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageTaken {
    pub agent: Entity,
    pub amount: i32,
}

/// Combat plugin
///
/// FixedUpdate (SimulationSet::Death):
/// apply_shark_damage → death_overlay
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FatalEffect>().add_event::<DamageTaken>();

        app.add_systems(
            FixedUpdate,
            (apply_shark_damage, death_overlay)
                .chain()
                .in_set(crate::SimulationSet::Death),
        );
    }
}
