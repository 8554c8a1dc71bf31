//! Damage и death overlay агента.

use bevy::prelude::*;

use super::DamageTaken;
use crate::ai::SearchRoutine;
use crate::audio::{AudioCue, AudioCueGate, CueLibrary};
use crate::components::{Health, Mortality, Shark};
use crate::net::{EffectKind, LocalParticipant, NetOwnership, ReplicatedEffect};

/// Система: применение урона к агенту
///
/// Health уменьшается на всех участниках (hit реплицируется движком),
/// но решение о смерти принимает только authoritative owner:
/// - останавливает search routine (движок сам её не гасит при смерти)
/// - помечает агента мёртвым и реплицирует Died
pub fn apply_shark_damage(
    mut damage_events: EventReader<DamageTaken>,
    mut sharks: Query<(&mut Health, &mut Mortality, &mut SearchRoutine, &NetOwnership), With<Shark>>,
    local: Res<LocalParticipant>,
    mut effects: EventWriter<ReplicatedEffect>,
) {
    for event in damage_events.read() {
        let Ok((mut health, mut mortality, mut search, ownership)) = sharks.get_mut(event.agent)
        else {
            continue;
        };

        // Мёртвых не добиваем
        if mortality.is_dead() {
            continue;
        }

        health.take_damage(event.amount);
        crate::logger::log(&format!(
            "🔪 {:?} took {} damage → {}/{}",
            event.agent, event.amount, health.current, health.max
        ));

        if !ownership.is_authoritative(&local) || !health.is_depleted() {
            continue;
        }

        search.stop();
        mortality.dead = true;
        effects.write(ReplicatedEffect {
            agent: event.agent,
            kind: EffectKind::Died,
        });
        crate::logger::log_info(&format!("💀 {:?} died → AI disabled", event.agent));
    }
}

/// Система: one-time death transition (каждый fixed tick)
///
/// Stop audio + non-gated death cue. После этого агент инертен: AI interval
/// и обработчики событий мёртвых пропускают.
pub fn death_overlay(
    mut sharks: Query<(Entity, &mut Mortality, &mut AudioCueGate, &NetOwnership), With<Shark>>,
    cues: Res<CueLibrary>,
    local: Res<LocalParticipant>,
    mut effects: EventWriter<ReplicatedEffect>,
) {
    for (entity, mut mortality, mut gate, ownership) in sharks.iter_mut() {
        if !mortality.dead || mortality.death_transition_done {
            continue;
        }
        if !ownership.is_authoritative(&local) {
            continue;
        }

        mortality.death_transition_done = true;

        if gate.stop().is_some() {
            effects.write(ReplicatedEffect {
                agent: entity,
                kind: EffectKind::StopCue,
            });
        }

        if !cues.contains(AudioCue::DeathSplat) {
            crate::logger::log_warning(&format!("{:?}: death clip not found, skipping", entity));
            continue;
        }
        gate.play_ungated(AudioCue::DeathSplat);
        effects.write(ReplicatedEffect {
            agent: entity,
            kind: EffectKind::PlayCue(AudioCue::DeathSplat),
        });
    }
}
