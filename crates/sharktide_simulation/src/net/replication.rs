//! Narrow entry point для реплицированных эффектов (на каждом участнике)

use bevy::prelude::*;

use super::{EffectKind, LocalParticipant, NetOwnership, ReplicatedEffect};
use crate::ai::SharkState;
use crate::animation::Animator;
use crate::audio::{AudioEmitter, CueLibrary};
use crate::components::{Listener, Mortality};

/// System: применить ReplicatedEffect к локальному отображению
///
/// - Animation / audio рендерятся везде (включая authority)
/// - StateChanged / Died зеркалятся только на non-authoritative участниках
///   (authority уже применил их в decision logic)
/// - Нет Animator/AudioEmitter → warning, эффект пропускается
pub fn apply_replicated_effects(
    mut effects: EventReader<ReplicatedEffect>,
    mut agents: Query<(
        &Transform,
        &NetOwnership,
        &mut SharkState,
        &mut Mortality,
        Option<&mut Animator>,
        Option<&mut AudioEmitter>,
    )>,
    listeners: Query<&Transform, With<Listener>>,
    cues: Res<CueLibrary>,
    local: Res<LocalParticipant>,
) {
    for effect in effects.read() {
        let Ok((transform, ownership, mut state, mut mortality, animator, emitter)) =
            agents.get_mut(effect.agent)
        else {
            continue;
        };

        match effect.kind {
            EffectKind::Animation(trigger) => match animator {
                Some(mut animator) => animator.set_trigger(trigger),
                None => crate::logger::log_warning(&format!(
                    "{:?}: no Animator for trigger '{}'",
                    effect.agent,
                    trigger.parameter_name()
                )),
            },

            EffectKind::PlayCue(cue) => match emitter {
                Some(mut emitter) => {
                    let listener_positions = listeners.iter().map(|t| t.translation);
                    emitter.render(cue, &cues, transform.translation, listener_positions);
                }
                None => crate::logger::log_warning(&format!(
                    "{:?}: no AudioEmitter for cue {:?}",
                    effect.agent, cue
                )),
            },

            EffectKind::StopCue => {
                if let Some(mut emitter) = emitter {
                    emitter.stop();
                }
            }

            EffectKind::StateChanged(new_state) => {
                if !ownership.is_authoritative(&local) && *state != new_state {
                    *state = new_state;
                }
            }

            EffectKind::Died => {
                if !ownership.is_authoritative(&local) && !mortality.dead {
                    mortality.dead = true;
                }
            }
        }
    }
}
