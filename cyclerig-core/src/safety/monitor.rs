//! Inactivity and magazine monitor

/// Reaction to an inactivity timeout, escalating with each consecutive one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutAction {
    /// Reset the rig and resume running
    AutoReset,
    /// Stop and wait for the operator
    AutoPause,
    /// Stop and fall back to step mode
    ShutDown,
}

/// Rig monitor
///
/// Tracks three independent conditions from the elapsed time handed in by
/// the control loop:
///
/// - time since the last step transition while running (inactivity)
/// - time since the rig stopped or the operator last touched it (idle)
/// - whether the strap sensor reports an empty magazine
#[derive(Debug, Clone)]
pub struct RigMonitor {
    /// Running time since the last step transition (ms)
    inactive_ms: u32,
    /// Stopped time since the last operator action (ms)
    idle_ms: u32,
    /// Consecutive timeouts without step progress
    timeouts: u8,
    /// Timeouts until shut down
    max_timeouts: u8,
    /// Inside an empty-magazine episode
    strap_missing: bool,
}

impl RigMonitor {
    /// Create a monitor that shuts down on the `max_timeouts`-th timeout
    pub fn new(max_timeouts: u8) -> Self {
        Self {
            inactive_ms: 0,
            idle_ms: 0,
            timeouts: 0,
            max_timeouts: max_timeouts.max(1),
            strap_missing: false,
        }
    }

    /// Update time tracking
    ///
    /// # Arguments
    /// - `delta_ms`: Time elapsed since last update
    /// - `running`: Whether the sequencer is executing steps
    pub fn update_time(&mut self, delta_ms: u32, running: bool) {
        if running {
            self.inactive_ms = self.inactive_ms.saturating_add(delta_ms);
            self.idle_ms = 0;
        } else {
            self.inactive_ms = 0;
            self.idle_ms = self.idle_ms.saturating_add(delta_ms);
        }
    }

    /// The step index changed; restart the inactivity timer
    pub fn step_transition(&mut self) {
        self.inactive_ms = 0;
    }

    /// A step completed on its own; clear the timeout escalation
    pub fn progress(&mut self) {
        self.inactive_ms = 0;
        self.timeouts = 0;
    }

    /// Operator input; restart the idle timer
    pub fn wake(&mut self) {
        self.idle_ms = 0;
    }

    /// Check the inactivity timer against `limit_ms`
    ///
    /// Each expiry restarts the timer and escalates: the first timeout
    /// resets the rig, later ones pause it, and the `max_timeouts`-th shuts
    /// it down and clears the escalation.
    pub fn check_timeout(&mut self, limit_ms: u32) -> Option<TimeoutAction> {
        if self.inactive_ms < limit_ms {
            return None;
        }

        self.inactive_ms = 0;
        self.timeouts = self.timeouts.saturating_add(1);

        let action = if self.timeouts >= self.max_timeouts {
            self.timeouts = 0;
            TimeoutAction::ShutDown
        } else if self.timeouts == 1 {
            TimeoutAction::AutoReset
        } else {
            TimeoutAction::AutoPause
        };
        Some(action)
    }

    /// Check if the rig has been idle for at least `limit_ms`
    pub fn is_idle(&self, limit_ms: u32) -> bool {
        self.idle_ms >= limit_ms
    }

    /// Update the strap sensor reading
    ///
    /// Returns true once per empty episode, when the magazine runs empty
    /// while the rig is running.
    pub fn update_strap(&mut self, present: bool, running: bool) -> bool {
        if present {
            self.strap_missing = false;
            return false;
        }
        if running && !self.strap_missing {
            self.strap_missing = true;
            return true;
        }
        false
    }

    /// Consecutive timeouts so far
    pub fn timeout_count(&self) -> u8 {
        self.timeouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT_MS: u32 = 30_000;

    fn expire(monitor: &mut RigMonitor) -> Option<TimeoutAction> {
        monitor.update_time(LIMIT_MS, true);
        monitor.check_timeout(LIMIT_MS)
    }

    #[test]
    fn test_no_timeout_before_limit() {
        let mut monitor = RigMonitor::new(3);
        monitor.update_time(LIMIT_MS - 1, true);
        assert_eq!(monitor.check_timeout(LIMIT_MS), None);
    }

    #[test]
    fn test_stopped_rig_never_times_out() {
        let mut monitor = RigMonitor::new(3);
        monitor.update_time(LIMIT_MS * 10, false);
        assert_eq!(monitor.check_timeout(LIMIT_MS), None);
    }

    #[test]
    fn test_escalation() {
        let mut monitor = RigMonitor::new(3);
        assert_eq!(expire(&mut monitor), Some(TimeoutAction::AutoReset));
        assert_eq!(expire(&mut monitor), Some(TimeoutAction::AutoPause));
        assert_eq!(expire(&mut monitor), Some(TimeoutAction::ShutDown));
        assert_eq!(monitor.timeout_count(), 0);
        assert_eq!(expire(&mut monitor), Some(TimeoutAction::AutoReset));
    }

    #[test]
    fn test_progress_clears_escalation() {
        let mut monitor = RigMonitor::new(3);
        assert_eq!(expire(&mut monitor), Some(TimeoutAction::AutoReset));
        monitor.progress();
        assert_eq!(monitor.timeout_count(), 0);
        assert_eq!(expire(&mut monitor), Some(TimeoutAction::AutoReset));
    }

    #[test]
    fn test_transition_restarts_timer_only() {
        let mut monitor = RigMonitor::new(3);
        assert_eq!(expire(&mut monitor), Some(TimeoutAction::AutoReset));

        monitor.update_time(LIMIT_MS - 1, true);
        monitor.step_transition();
        monitor.update_time(LIMIT_MS - 1, true);
        assert_eq!(monitor.check_timeout(LIMIT_MS), None);

        monitor.update_time(1, true);
        assert_eq!(monitor.check_timeout(LIMIT_MS), Some(TimeoutAction::AutoPause));
    }

    #[test]
    fn test_single_timeout_limit_shuts_down() {
        let mut monitor = RigMonitor::new(1);
        assert_eq!(expire(&mut monitor), Some(TimeoutAction::ShutDown));
    }

    #[test]
    fn test_idle() {
        let mut monitor = RigMonitor::new(3);
        monitor.update_time(1000, false);
        assert!(monitor.is_idle(1000));

        monitor.wake();
        assert!(!monitor.is_idle(1000));

        monitor.update_time(999, false);
        monitor.update_time(5, true);
        assert!(!monitor.is_idle(1));
    }

    #[test]
    fn test_strap_missing_reported_once_per_episode() {
        let mut monitor = RigMonitor::new(3);
        assert!(!monitor.update_strap(true, true));

        assert!(monitor.update_strap(false, true));
        assert!(!monitor.update_strap(false, true));
        assert!(monitor.strap_missing);

        assert!(!monitor.update_strap(true, true));
        assert!(monitor.update_strap(false, true));
    }

    #[test]
    fn test_strap_missing_ignored_while_stopped() {
        let mut monitor = RigMonitor::new(3);
        assert!(!monitor.update_strap(false, false));
        assert!(monitor.update_strap(false, true));
    }
}
