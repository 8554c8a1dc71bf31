//! FSM AI systems: spawn init, AI interval, collision и kill animation events.
//!
//! Все системы здесь - decision logic: non-authoritative агенты и мёртвые
//! пропускаются. Mirror получает результат через ReplicatedEffect.

use bevy::prelude::*;

use crate::ai::controller::{SharkController, TargetCandidate};
use crate::ai::{
    AnimationKillEvent, SearchRoutine, SharkBrain, SharkConfig, SharkState, TargetCollision,
    VisibleTargets,
};
use crate::audio::{AudioCueGate, CueLibrary};
use crate::combat::FatalEffect;
use crate::components::{Mortality, MovementCommand, MovementSpeed, Player, RoundState, Shark};
use crate::net::{LocalParticipant, NetOwnership, ReplicatedEffect, SharkOutbox};
use crate::schedules::AiTiming;
use crate::DeterministicRng;

/// Всё, из чего собирается SharkController
pub type SharkControlData = (
    Entity,
    &'static Transform,
    &'static SharkConfig,
    &'static mut SharkState,
    &'static mut SharkBrain,
    &'static mut AudioCueGate,
    &'static mut SearchRoutine,
    &'static mut MovementCommand,
    &'static mut MovementSpeed,
    &'static VisibleTargets,
    &'static Mortality,
    &'static NetOwnership,
);

fn collect_candidates(players: &Query<(Entity, &Transform, &Player)>) -> Vec<TargetCandidate> {
    players
        .iter()
        .map(|(entity, transform, player)| TargetCandidate {
            entity,
            position: transform.translation,
            targetable: player.targetable,
        })
        .collect()
}

/// Система: инициализация только что заспавненных агентов
pub fn initialize_spawned_sharks(
    mut sharks: Query<SharkControlData, Added<Shark>>,
    cues: Res<CueLibrary>,
    local: Res<LocalParticipant>,
    mut effects: EventWriter<ReplicatedEffect>,
    mut fatal: EventWriter<FatalEffect>,
) {
    let mut outbox = SharkOutbox::default();

    for (
        entity,
        transform,
        config,
        mut state,
        mut brain,
        mut gate,
        mut search,
        mut command,
        mut speed,
        _visible,
        _mortality,
        ownership,
    ) in sharks.iter_mut()
    {
        if !ownership.is_authoritative(&local) {
            continue;
        }

        SharkController {
            agent: entity,
            position: transform.translation,
            config,
            cues: &cues,
            state: &mut state,
            brain: &mut brain,
            gate: &mut gate,
            search: &mut search,
            command: &mut command,
            speed: &mut speed,
            outbox: &mut outbox,
        }
        .on_spawn();
    }

    outbox.flush(&mut effects, &mut fatal);
}

/// Система: AI interval (AiInterval schedule)
///
/// Пропускается целиком, если все игроки мертвы. Мёртвые агенты - инертны.
pub fn shark_ai_interval(
    mut sharks: Query<SharkControlData, With<Shark>>,
    players: Query<(Entity, &Transform, &Player)>,
    cues: Res<CueLibrary>,
    timing: Res<AiTiming>,
    round: Res<RoundState>,
    local: Res<LocalParticipant>,
    mut rng: ResMut<DeterministicRng>,
    mut effects: EventWriter<ReplicatedEffect>,
    mut fatal: EventWriter<FatalEffect>,
) {
    if round.all_players_dead {
        return;
    }

    let delta = timing.interval_secs();
    let candidates = collect_candidates(&players);
    let mut outbox = SharkOutbox::default();

    for (
        entity,
        transform,
        config,
        mut state,
        mut brain,
        mut gate,
        mut search,
        mut command,
        mut speed,
        visible,
        mortality,
        ownership,
    ) in sharks.iter_mut()
    {
        if mortality.is_dead() || !ownership.is_authoritative(&local) {
            continue;
        }

        SharkController {
            agent: entity,
            position: transform.translation,
            config,
            cues: &cues,
            state: &mut state,
            brain: &mut brain,
            gate: &mut gate,
            search: &mut search,
            command: &mut command,
            speed: &mut speed,
            outbox: &mut outbox,
        }
        .run_interval(&candidates, visible, delta, &mut rng.rng);
    }

    outbox.flush(&mut effects, &mut fatal);
}

/// Система: collision агента с игроком (OnCollideWithPlayer)
///
/// Учитываются только targetable игроки; вне Killing контроллер игнорирует.
pub fn handle_target_collisions(
    mut collisions: EventReader<TargetCollision>,
    mut sharks: Query<SharkControlData, With<Shark>>,
    players: Query<&Player>,
    cues: Res<CueLibrary>,
    local: Res<LocalParticipant>,
    mut effects: EventWriter<ReplicatedEffect>,
    mut fatal: EventWriter<FatalEffect>,
) {
    let mut outbox = SharkOutbox::default();

    for collision in collisions.read() {
        let targetable = players
            .get(collision.target)
            .map(|p| p.targetable)
            .unwrap_or(false);
        if !targetable {
            continue;
        }

        let Ok((
            entity,
            transform,
            config,
            mut state,
            mut brain,
            mut gate,
            mut search,
            mut command,
            mut speed,
            _visible,
            mortality,
            ownership,
        )) = sharks.get_mut(collision.agent)
        else {
            continue;
        };

        if mortality.is_dead() || !ownership.is_authoritative(&local) {
            continue;
        }

        SharkController {
            agent: entity,
            position: transform.translation,
            config,
            cues: &cues,
            state: &mut state,
            brain: &mut brain,
            gate: &mut gate,
            search: &mut search,
            command: &mut command,
            speed: &mut speed,
            outbox: &mut outbox,
        }
        .on_collision(collision.target);
    }

    outbox.flush(&mut effects, &mut fatal);
}

/// Система: AnimationKillEvent → execute_kill
pub fn handle_animation_kill_events(
    mut kill_events: EventReader<AnimationKillEvent>,
    mut sharks: Query<SharkControlData, With<Shark>>,
    cues: Res<CueLibrary>,
    local: Res<LocalParticipant>,
    mut effects: EventWriter<ReplicatedEffect>,
    mut fatal: EventWriter<FatalEffect>,
) {
    let mut outbox = SharkOutbox::default();

    for event in kill_events.read() {
        let Ok((
            entity,
            transform,
            config,
            mut state,
            mut brain,
            mut gate,
            mut search,
            mut command,
            mut speed,
            _visible,
            mortality,
            ownership,
        )) = sharks.get_mut(event.agent)
        else {
            continue;
        };

        if mortality.is_dead() || !ownership.is_authoritative(&local) {
            continue;
        }

        SharkController {
            agent: entity,
            position: transform.translation,
            config,
            cues: &cues,
            state: &mut state,
            brain: &mut brain,
            gate: &mut gate,
            search: &mut search,
            command: &mut command,
            speed: &mut speed,
            outbox: &mut outbox,
        }
        .execute_kill();
    }

    outbox.flush(&mut effects, &mut fatal);
}
