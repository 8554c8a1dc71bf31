//! Perception systems (line-of-sight tracking).

use bevy::prelude::*;

use crate::ai::{TargetSighted, VisibleTargets};
use crate::components::Player;

/// Система: обновление VisibleTargets из TargetSighted
///
/// Читает Spotted/Lost events → обновляет VisibleTargets агента.
/// Также чистит нетаргетируемых/despawned игроков (vision не шлёт Lost при смерти).
pub fn update_visible_targets(
    mut sight_events: EventReader<TargetSighted>,
    mut observers: Query<&mut VisibleTargets>,
    players: Query<&Player>,
) {
    for event in sight_events.read() {
        match *event {
            TargetSighted::Spotted { observer, target } => {
                let Ok(mut visible) = observers.get_mut(observer) else {
                    continue;
                };
                // Только игроки
                if players.get(target).is_err() {
                    continue;
                }
                if !visible.targets.contains(&target) {
                    visible.targets.push(target);
                    crate::logger::log(&format!("👁️ {:?} spotted {:?}", observer, target));
                }
            }
            TargetSighted::Lost { observer, target } => {
                if let Ok(mut visible) = observers.get_mut(observer) {
                    let was_present = visible.targets.contains(&target);
                    visible.targets.retain(|&e| e != target);
                    if was_present {
                        crate::logger::log(&format!("👻 {:?} lost sight of {:?}", observer, target));
                    }
                }
            }
        }
    }

    for mut visible in observers.iter_mut() {
        let stale = visible
            .targets
            .iter()
            .any(|&e| !players.get(e).map(|p| p.targetable).unwrap_or(false));
        if stale {
            visible
                .targets
                .retain(|&e| players.get(e).map(|p| p.targetable).unwrap_or(false));
        }
    }
}
