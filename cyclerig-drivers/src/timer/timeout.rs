//! Non-blocking timeout
//!
//! Compares against an absolute millisecond clock, so it needs no periodic
//! update: the caller passes `now` from a [`Clock`](cyclerig_core::traits::Clock).

/// Timeout timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout {
    duration_ms: u32,
    started_at: Option<u32>,
}

impl Timeout {
    /// Create a stopped timer
    pub const fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            started_at: None,
        }
    }

    /// Get the configured duration
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Change the duration; a running timer keeps its start time
    pub fn set_duration(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
    }

    /// Start (or restart) the timer at `now_ms`
    pub fn start(&mut self, now_ms: u32) {
        self.started_at = Some(now_ms);
    }

    /// Stop the timer
    pub fn reset(&mut self) {
        self.started_at = None;
    }

    /// Check if the timer has been started
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Check if a started timer has expired
    ///
    /// A stopped timer never expires.
    pub fn is_timed_out(&self, now_ms: u32) -> bool {
        match self.started_at {
            Some(start) => now_ms.wrapping_sub(start) >= self.duration_ms,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_never_expires() {
        let timer = Timeout::new(100);
        assert!(!timer.is_running());
        assert!(!timer.is_timed_out(u32::MAX));
    }

    #[test]
    fn test_expiry() {
        let mut timer = Timeout::new(100);
        timer.start(1_000);
        assert!(!timer.is_timed_out(1_099));
        assert!(!timer.is_timed_out(1_040));
        assert!(timer.is_timed_out(1_100));

        timer.reset();
        assert!(!timer.is_timed_out(5_000));
    }

    #[test]
    fn test_clock_wraparound() {
        let mut timer = Timeout::new(100);
        timer.start(u32::MAX - 10);
        assert!(!timer.is_timed_out(50));
        assert!(timer.is_timed_out(89));
    }
}
