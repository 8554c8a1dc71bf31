//! AudioCueGate - один gated cue за раз на агента
//!
//! Слот занимается на `duration` секунд; по истечении - stop playback,
//! слот свободен, completion отдаётся владельцу.
//!
//! `stop()` освобождает слот немедленно, но ожидание не отменяет:
//! "висящий" wait всё равно истечёт и отдаст completion (владелец
//! перепроверяет state). Его trailing stop глушит playback только если
//! слот всё ещё принадлежит тому же запуску (generation), чтобы устаревший
//! wait не обрезал более новый cue.

use bevy::prelude::*;

use super::AudioCue;
use crate::ai::wait::{TimedWaitTask, WaitPoll};
use crate::ai::SharkState;

/// Что сделать после окончания gated cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CueCompletion {
    #[default]
    Nothing,
    /// Перейти в `to`, если агент всё ещё в `from`
    Advance { from: SharkState, to: SharkState },
}

#[derive(Debug, Clone)]
struct PendingCue {
    generation: u64,
    wait: TimedWaitTask,
    on_complete: CueCompletion,
}

/// Результат одного tick'а gate
#[derive(Debug, Default, PartialEq)]
pub struct GateTick {
    /// Cue, который надо заглушить (wait истёк, слот его)
    pub silenced: Option<AudioCue>,
    pub completions: Vec<CueCompletion>,
}

#[derive(Component, Debug, Default)]
pub struct AudioCueGate {
    /// generation запуска, который держит слот
    slot: Option<u64>,
    /// что сейчас звучит (gated или нет)
    audible: Option<AudioCue>,
    pending: Vec<PendingCue>,
    generation: u64,
}

impl AudioCueGate {
    pub fn is_gated(&self) -> bool {
        self.slot.is_some()
    }

    #[cfg(test)]
    pub fn audible(&self) -> Option<AudioCue> {
        self.audible
    }

    #[cfg(test)]
    pub fn pending_waits(&self) -> usize {
        self.pending.len()
    }

    /// Занять слот под `cue` на `duration` секунд
    ///
    /// false - слот занят, вызов дропается молча.
    pub fn acquire(&mut self, cue: AudioCue, duration: f32, on_complete: CueCompletion) -> bool {
        if self.slot.is_some() {
            return false;
        }

        self.generation += 1;
        self.slot = Some(self.generation);
        self.audible = Some(cue);
        self.pending.push(PendingCue {
            generation: self.generation,
            wait: TimedWaitTask::new(duration),
            on_complete,
        });
        true
    }

    /// Non-gated playback (interrupt): слот не трогаем
    pub fn play_ungated(&mut self, cue: AudioCue) {
        self.audible = Some(cue);
    }

    /// Немедленно остановить текущий cue и освободить слот (идемпотентно)
    ///
    /// Возвращает cue, который реально звучал.
    pub fn stop(&mut self) -> Option<AudioCue> {
        self.slot = None;
        self.audible.take()
    }

    pub fn tick(&mut self, delta: f32) -> GateTick {
        let mut result = GateTick::default();
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for mut pending in self.pending.drain(..) {
            match pending.wait.poll_elapsed(delta) {
                WaitPoll::Pending => still_pending.push(pending),
                WaitPoll::Satisfied | WaitPoll::TimedOut => {
                    if self.slot == Some(pending.generation) {
                        self.slot = None;
                        result.silenced = self.audible.take();
                    }
                    result.completions.push(pending.on_complete);
                }
            }
        }

        self.pending = still_pending;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance() -> CueCompletion {
        CueCompletion::Advance {
            from: SharkState::Following,
            to: SharkState::Hunting,
        }
    }

    /// Прогнать gate `seconds` секунд шагами по 0.2
    fn run(gate: &mut AudioCueGate, seconds: f32) -> Vec<GateTick> {
        let steps = (seconds / 0.2).round() as usize;
        (0..steps).map(|_| gate.tick(0.2)).collect()
    }

    #[test]
    fn test_second_acquire_dropped_while_playing() {
        let mut gate = AudioCueGate::default();
        assert!(gate.acquire(AudioCue::FollowSong, 10.0, advance()));
        assert!(!gate.acquire(AudioCue::HuntSting, 15.0, CueCompletion::Nothing));

        assert_eq!(gate.audible(), Some(AudioCue::FollowSong));
        assert_eq!(gate.pending_waits(), 1);
    }

    #[test]
    fn test_completion_after_duration() {
        let mut gate = AudioCueGate::default();
        gate.acquire(AudioCue::FollowSong, 10.0, advance());

        let ticks = run(&mut gate, 9.8);
        assert!(ticks.iter().all(|t| t.completions.is_empty()));
        assert!(gate.is_gated());

        let last = gate.tick(0.2);
        assert_eq!(last.completions, vec![advance()]);
        assert_eq!(last.silenced, Some(AudioCue::FollowSong));
        assert!(!gate.is_gated());
        assert_eq!(gate.pending_waits(), 0);
    }

    #[test]
    fn test_stop_frees_slot_but_wait_still_completes() {
        let mut gate = AudioCueGate::default();
        gate.acquire(AudioCue::FollowSong, 1.0, advance());

        assert_eq!(gate.stop(), Some(AudioCue::FollowSong));
        assert_eq!(gate.stop(), None);
        assert!(!gate.is_gated());

        let completions: Vec<_> = run(&mut gate, 1.0)
            .into_iter()
            .flat_map(|t| t.completions)
            .collect();
        assert_eq!(completions, vec![advance()]);
    }

    #[test]
    fn test_stale_wait_does_not_silence_newer_cue() {
        let mut gate = AudioCueGate::default();
        gate.acquire(AudioCue::FollowSong, 1.0, advance());
        gate.tick(0.2);
        gate.stop();

        // Новый cue занимает слот, пока старый wait ещё висит
        assert!(gate.acquire(AudioCue::HuntSting, 15.0, CueCompletion::Nothing));

        let ticks = run(&mut gate, 0.8);
        let stale = ticks.iter().find(|t| !t.completions.is_empty()).unwrap();
        assert_eq!(stale.silenced, None);
        assert_eq!(gate.audible(), Some(AudioCue::HuntSting));
        assert!(gate.is_gated());
    }

    #[test]
    fn test_ungated_playback_keeps_slot_free() {
        let mut gate = AudioCueGate::default();
        gate.play_ungated(AudioCue::DeathSplat);
        assert!(!gate.is_gated());
        assert_eq!(gate.audible(), Some(AudioCue::DeathSplat));
        assert!(gate.acquire(AudioCue::FollowSong, 10.0, CueCompletion::Nothing));
    }
}
