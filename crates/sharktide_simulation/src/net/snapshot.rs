//! Network snapshot агента для late join / reconnect
//!
//! Только то, что нужно mirror'у для корректного рендера без логики:
//! state enum + death flag.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{LocalParticipant, NetOwnership};
use crate::ai::SharkState;
use crate::components::{Mortality, Shark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharkSnapshot {
    pub state: SharkState,
    pub is_dead: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("agent is owned by local participant {0}; snapshots only apply to mirrors")]
    Authoritative(u64),
    #[error("no agent {0:?} in this world")]
    UnknownAgent(Entity),
}

impl SharkSnapshot {
    pub fn capture(state: &SharkState, mortality: &Mortality) -> Self {
        Self {
            state: *state,
            is_dead: mortality.dead,
        }
    }

    /// Применить snapshot к зеркалу агента
    ///
    /// Death flag только поднимается - воскрешать snapshot'ом нельзя.
    pub fn apply_to_mirror(
        &self,
        ownership: &NetOwnership,
        local: &LocalParticipant,
        state: &mut SharkState,
        mortality: &mut Mortality,
    ) -> Result<(), SnapshotError> {
        if ownership.is_authoritative(local) {
            return Err(SnapshotError::Authoritative(local.id));
        }

        *state = self.state;
        if self.is_dead {
            mortality.dead = true;
        }
        Ok(())
    }
}

/// Snapshot всех агентов (детерминированный порядок по Entity index)
pub fn capture_snapshots(world: &mut World) -> Vec<(Entity, SharkSnapshot)> {
    let mut query = world.query_filtered::<(Entity, &SharkState, &Mortality), With<Shark>>();
    let mut snapshots: Vec<_> = query
        .iter(world)
        .map(|(entity, state, mortality)| (entity, SharkSnapshot::capture(state, mortality)))
        .collect();

    snapshots.sort_by_key(|(entity, _)| entity.index());
    snapshots
}

/// Применить snapshot к зеркалу агента в world (late join)
pub fn apply_snapshot(
    world: &mut World,
    entity: Entity,
    snapshot: &SharkSnapshot,
) -> Result<(), SnapshotError> {
    let local = world
        .get_resource::<LocalParticipant>()
        .copied()
        .unwrap_or_default();

    let mut query =
        world.query_filtered::<(&NetOwnership, &mut SharkState, &mut Mortality), With<Shark>>();
    let (ownership, mut state, mut mortality) = query
        .get_mut(world, entity)
        .map_err(|_| SnapshotError::UnknownAgent(entity))?;

    snapshot.apply_to_mirror(ownership, &local, &mut state, &mut mortality)
}
