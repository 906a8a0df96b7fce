//! Gravity timer - an explicit, cancellable repeating task
//!
//! The timer does not read a clock. Hosts feed it elapsed milliseconds and it
//! reports how many periods completed. Restarting discards whatever part of
//! the current period had already elapsed, so a new speed never inherits a
//! stale deadline.

/// Repeating gravity timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GravityTimer {
    /// Period while armed; `None` when cancelled
    period_ms: Option<u32>,
    /// Time accumulated towards the next fire
    elapsed_ms: u32,
}

impl GravityTimer {
    /// A cancelled timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer. Already running timers keep their progress.
    pub fn start(&mut self, period_ms: u32) {
        if self.period_ms.is_none() {
            self.restart(period_ms);
        }
    }

    /// Arm the timer with a fresh interval, dropping any partial progress
    pub fn restart(&mut self, period_ms: u32) {
        self.period_ms = Some(period_ms.max(1));
        self.elapsed_ms = 0;
    }

    /// Stop firing until started again
    pub fn cancel(&mut self) {
        self.period_ms = None;
        self.elapsed_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.period_ms.is_some()
    }

    pub fn period_ms(&self) -> Option<u32> {
        self.period_ms
    }

    /// Time left until the next fire, or `None` when cancelled
    pub fn remaining_ms(&self) -> Option<u32> {
        self.period_ms.map(|p| p - self.elapsed_ms)
    }

    /// Let `elapsed_ms` pass and return how many periods completed
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let Some(period) = self.period_ms else {
            return 0;
        };
        let total = self.elapsed_ms as u64 + elapsed_ms as u64;
        let period = period as u64;
        self.elapsed_ms = (total % period) as u32;
        (total / period).min(u32::MAX as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timer = GravityTimer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.advance(10_000), 0);
        assert_eq!(timer.remaining_ms(), None);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = GravityTimer::new();
        timer.start(800);
        assert_eq!(timer.advance(799), 0);
        assert_eq!(timer.remaining_ms(), Some(1));
        assert_eq!(timer.advance(1), 1);
        assert_eq!(timer.remaining_ms(), Some(800));
        assert_eq!(timer.advance(2_500), 3);
        assert_eq!(timer.remaining_ms(), Some(700));
    }

    #[test]
    fn test_start_keeps_progress() {
        let mut timer = GravityTimer::new();
        timer.start(500);
        timer.advance(300);
        timer.start(100);
        assert_eq!(timer.period_ms(), Some(500));
        assert_eq!(timer.remaining_ms(), Some(200));
    }

    #[test]
    fn test_restart_discards_partial_interval() {
        let mut timer = GravityTimer::new();
        timer.start(800);
        timer.advance(700);
        timer.restart(700);
        assert_eq!(timer.remaining_ms(), Some(700));
        assert_eq!(timer.advance(100), 0);
    }

    #[test]
    fn test_cancel_then_start_begins_fresh() {
        let mut timer = GravityTimer::new();
        timer.start(400);
        timer.advance(399);
        timer.cancel();
        assert_eq!(timer.advance(1), 0);
        timer.start(400);
        assert_eq!(timer.remaining_ms(), Some(400));
    }
}
