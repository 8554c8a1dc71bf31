//! Тесты kill sequence: eligibility, execute_kill, reset guard

use bevy::prelude::*;

use super::{FatalEffect, KillRefusal};
use crate::ai::test_support::Fixture;
use crate::ai::SharkState;
use crate::animation::AnimationTrigger;
use crate::audio::{AudioCue, CueCompletion};
use crate::net::EffectKind;

const TARGET: u32 = 10;

/// Killing + target + collided, kill ещё не идёт
fn eligible() -> Fixture {
    let mut fx = Fixture::new().into_killing(TARGET);
    fx.brain.collided = true;
    fx
}

#[test]
fn test_eligible_kill_starts() {
    let mut fx = eligible();
    assert_eq!(fx.controller().check_kill_start(), Ok(()));

    assert!(fx.controller().start_kill_sequence());
    assert!(fx.brain.killing);
    assert_eq!(
        fx.drain_effects(),
        vec![EffectKind::Animation(AnimationTrigger::Kill)]
    );
    // Летальный эффект только по AnimationKillEvent
    assert!(fx.outbox.fatal.is_empty());
}

#[test]
fn test_kill_refused_in_wrong_state() {
    let mut fx = eligible();
    fx.state = SharkState::Hunting;

    assert_eq!(
        fx.controller().check_kill_start(),
        Err(KillRefusal::WrongState(SharkState::Hunting))
    );
    assert!(!fx.controller().start_kill_sequence());
    assert!(!fx.brain.killing);
    assert!(fx.outbox.is_empty());
}

#[test]
fn test_kill_refused_without_target() {
    let mut fx = eligible();
    fx.brain.target = None;

    assert_eq!(fx.controller().check_kill_start(), Err(KillRefusal::NoTarget));
    assert!(!fx.controller().start_kill_sequence());
    assert!(!fx.brain.killing);
}

#[test]
fn test_kill_refused_without_collision() {
    let mut fx = eligible();
    fx.brain.collided = false;

    assert_eq!(fx.controller().check_kill_start(), Err(KillRefusal::NoCollision));
    assert!(!fx.controller().start_kill_sequence());
}

#[test]
fn test_kill_refused_when_already_killing() {
    let mut fx = eligible();
    assert!(fx.controller().start_kill_sequence());
    fx.drain_effects();

    assert_eq!(
        fx.controller().check_kill_start(),
        Err(KillRefusal::AlreadyKilling)
    );
    assert!(!fx.controller().start_kill_sequence());
    assert!(fx.drain_effects().is_empty());
}

#[test]
fn test_kill_start_stops_playing_cue() {
    let mut fx = eligible();
    fx.gate
        .acquire(AudioCue::HuntSting, 15.0, CueCompletion::Nothing);

    assert!(fx.controller().start_kill_sequence());

    assert!(!fx.gate.is_gated());
    assert_eq!(fx.gate.audible(), None);
    assert_eq!(
        fx.drain_effects(),
        vec![
            EffectKind::StopCue,
            EffectKind::Animation(AnimationTrigger::Kill)
        ]
    );
}

#[test]
fn test_execute_kill_emits_fatal_effect_and_resets() {
    let mut fx = eligible();
    fx.position = Vec3::new(3.0, 0.0, 3.0);
    fx.controller().start_kill_sequence();
    fx.drain_effects();

    assert!(fx.controller().execute_kill());

    assert_eq!(
        fx.outbox.fatal,
        vec![FatalEffect {
            agent: fx.agent,
            target: Entity::from_raw(TARGET),
        }]
    );
    assert_eq!(fx.state, SharkState::Searching);
    assert!(!fx.brain.killing);
    assert!(!fx.brain.collided);
    assert!(fx.brain.target.is_none());
    assert!(fx.search.is_active());
    assert_eq!(fx.search.origin(), Vec3::new(3.0, 0.0, 3.0));

    let effects = fx.drain_effects();
    assert!(effects.contains(&EffectKind::Animation(AnimationTrigger::StartSwim)));
    assert!(effects.contains(&EffectKind::StateChanged(SharkState::Searching)));
}

#[test]
fn test_execute_kill_without_target_only_resets() {
    let mut fx = eligible();
    fx.controller().start_kill_sequence();
    fx.brain.target = None;

    assert!(fx.controller().execute_kill());

    assert!(fx.outbox.fatal.is_empty());
    assert_eq!(fx.state, SharkState::Searching);
    assert!(!fx.brain.killing);
}

#[test]
fn test_execute_kill_without_kill_in_progress_ignored() {
    let mut fx = eligible();

    assert!(!fx.controller().execute_kill());

    assert!(fx.outbox.is_empty());
    assert_eq!(fx.state, SharkState::Killing);
    assert!(fx.brain.collided);
}

#[test]
fn test_reset_if_not_killing_refused_during_kill() {
    let mut fx = eligible();
    fx.controller().start_kill_sequence();
    fx.drain_effects();

    assert!(!fx.controller().reset_if_not_killing());

    assert_eq!(fx.state, SharkState::Killing);
    assert!(fx.brain.killing);
    assert_eq!(fx.brain.target, Some(Entity::from_raw(TARGET)));
    assert!(fx.outbox.is_empty());
}

#[test]
fn test_reset_if_not_killing_is_idempotent() {
    let mut fx = Fixture::new().into_killing(TARGET);
    fx.interval();
    assert!(fx.brain.collision_wait.is_some());

    assert!(fx.controller().reset_if_not_killing());
    let first = fx.drain_effects();
    assert!(first.contains(&EffectKind::StateChanged(SharkState::Searching)));
    assert!(fx.brain.collision_wait.is_none());

    assert!(fx.controller().reset_if_not_killing());
    // Второй reset ничего нового не реплицирует
    assert!(fx.drain_effects().is_empty());
    assert_eq!(fx.state, SharkState::Searching);
    assert!(fx.brain.target.is_none());
}

#[test]
fn test_swim_trigger_resent_after_hunting_between_resets() {
    let mut fx = Fixture::new().into_killing(TARGET);
    assert!(fx.controller().reset_if_not_killing());
    assert!(fx
        .drain_effects()
        .contains(&EffectKind::Animation(AnimationTrigger::StartSwim)));

    // Новая погоня: между reset'ами ушёл другой trigger
    fx.state = SharkState::Hunting;
    fx.brain.target = Some(Entity::from_raw(TARGET));
    fx.interval();
    assert!(fx
        .drain_effects()
        .contains(&EffectKind::Animation(AnimationTrigger::StartHunting)));

    assert!(fx.controller().reset_if_not_killing());
    let effects = fx.drain_effects();
    assert!(effects.contains(&EffectKind::Animation(AnimationTrigger::StartSwim)));
    assert!(effects.contains(&EffectKind::StopCue));
}
