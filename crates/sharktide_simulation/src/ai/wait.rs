//! TimedWaitTask - bounded wait (predicate или timeout)
//!
//! Не блокирует tick: владелец poll'ит задачу каждый AI интервал и сам
//! решает, что делать с результатом. Отмены нет - после Satisfied/TimedOut
//! вызывающий обязан перепроверить актуальное состояние (soft cancellation).

/// Погрешность накопления f32 (50 × 0.2 не всегда ровно 10.0)
const ELAPSED_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPoll {
    Pending,
    Satisfied,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimedWaitTask {
    elapsed: f32,
    timeout: f32,
}

impl TimedWaitTask {
    pub fn new(timeout: f32) -> Self {
        Self {
            elapsed: 0.0,
            timeout: timeout.max(0.0),
        }
    }

    #[cfg(test)]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[cfg(test)]
    pub fn timeout(&self) -> f32 {
        self.timeout
    }

    /// Один шаг ожидания: время идёт, затем predicate, затем timeout
    pub fn poll(&mut self, delta: f32, satisfied: impl FnOnce() -> bool) -> WaitPoll {
        self.elapsed += delta.max(0.0);

        if satisfied() {
            WaitPoll::Satisfied
        } else if self.elapsed + ELAPSED_EPSILON >= self.timeout {
            WaitPoll::TimedOut
        } else {
            WaitPoll::Pending
        }
    }

    /// Безусловное ожидание (WaitForSeconds): завершается только по времени
    pub fn poll_elapsed(&mut self, delta: f32) -> WaitPoll {
        self.poll(delta, || false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconditional_wait_completes_after_duration() {
        let mut wait = TimedWaitTask::new(10.0);
        let mut polls = 0;
        while wait.poll_elapsed(0.2) == WaitPoll::Pending {
            polls += 1;
            assert!(polls < 100, "wait never completed");
        }
        // 50-й poll завершает ожидание
        assert_eq!(polls, 49);
    }

    #[test]
    fn test_predicate_wins_before_timeout() {
        let mut wait = TimedWaitTask::new(120.0);
        assert_eq!(wait.poll(0.2, || false), WaitPoll::Pending);
        assert_eq!(wait.poll(0.2, || true), WaitPoll::Satisfied);
        assert!((wait.elapsed() - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_timeout_without_predicate() {
        let mut wait = TimedWaitTask::new(1.0);
        for _ in 0..3 {
            assert_eq!(wait.poll(0.25, || false), WaitPoll::Pending);
        }
        assert_eq!(wait.poll(0.25, || false), WaitPoll::TimedOut);
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let mut wait = TimedWaitTask::new(-5.0);
        assert_eq!(wait.timeout(), 0.0);
        assert_eq!(wait.poll(-1.0, || false), WaitPoll::TimedOut);
        assert_eq!(wait.elapsed(), 0.0);
    }
}
