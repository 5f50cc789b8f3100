//! A rearmable single-deadline timer whose fires merge into the room's
//! event loop via `tokio::select!`.
//!
//! When disarmed, [`RevealTimer::fired`] pends forever — `select!` just
//! serves the other branches, so a stalled round idles instead of
//! polling.

use std::time::Duration;

use tokio::time::{self, Instant};

/// The per-room reveal timer. Rearmed from zero elapsed on every arm.
#[derive(Debug, Default)]
pub struct RevealTimer {
    deadline: Option<Instant>,
}

impl RevealTimer {
    /// A disarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms (or rearms) the timer to fire one full `interval` from now.
    pub fn arm(&mut self, interval: Duration) {
        self.deadline = Some(Instant::now() + interval);
    }

    /// Stops the timer. [`fired`](Self::fired) will pend forever until
    /// the next [`arm`](Self::arm).
    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is set.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolves when the armed deadline passes; pends forever when
    /// disarmed. The caller must arm or disarm after each fire —
    /// the deadline is not cleared automatically.
    pub async fn fired(&self) {
        match self.deadline {
            Some(deadline) => time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_armed_timer_fires_after_interval() {
        let mut timer = RevealTimer::new();
        timer.arm(Duration::from_secs(5));
        assert!(timer.is_armed());
        // With the clock paused, time auto-advances to the deadline.
        timer.fired().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarmed_timer_pends() {
        let timer = RevealTimer::new();
        let result =
            time::timeout(Duration::from_secs(60), timer.fired()).await;
        assert!(result.is_err(), "disarmed timer must not fire");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_restarts_from_zero_elapsed() {
        let mut timer = RevealTimer::new();
        timer.arm(Duration::from_secs(10));
        time::advance(Duration::from_secs(9)).await;
        // Rearm at a new interval: the 9 elapsed seconds are discarded.
        timer.arm(Duration::from_secs(5));
        let early = time::timeout(Duration::from_secs(4), timer.fired()).await;
        assert!(early.is_err());
        let on_time = time::timeout(Duration::from_secs(2), timer.fired()).await;
        assert!(on_time.is_ok());
    }
}
