//! Sequencer state machine
//!
//! Tracks which step is current and whether the rig is executing it. The
//! state is `{Stopped, Running} × {Auto, Step}`; the two axes change
//! independently.
//!
//! [`Sequencer::tick`] is called once per loop iteration and does, in order:
//!
//! 1. rearm the current step if navigation moved the index since the
//!    previous tick
//! 2. drain the current step's completion flag into an index advance, and
//!    rearm the step advanced to
//! 3. detect whether the index changed since the previous tick
//! 4. in step mode, stop on a detected change
//! 5. if running, run the current step's `do_work`
//!
//! A step entered in auto mode therefore starts working in the same tick,
//! and a step entered in step mode never gets a free `do_work` call. Every
//! entry starts the step afresh; a stopped step resumes where it was.

use super::registry::{StepRegistry, MAX_STEPS};
use super::step::Step;
use crate::state::RunMode;

/// Sequencer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// No steps registered
    EmptySequence,
    /// Jump target outside `[0, count)`
    OutOfRange { index: usize, count: usize },
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// The current step reported completion and the index advanced
    pub advanced: bool,
    /// The advance wrapped from the last step back to the first
    pub wrapped: bool,
    /// The index differs from the previous tick (any cause)
    pub changed: bool,
    /// Step mode stopped the machine on the change
    pub paused: bool,
    /// The current step's `do_work` was invoked
    pub worked: bool,
}

/// Cycle step sequencer
///
/// Owns the step registry and seals it on construction.
#[derive(Debug)]
pub struct Sequencer<S, const N: usize = MAX_STEPS> {
    registry: StepRegistry<S, N>,
    current: usize,
    previous: usize,
    mode: RunMode,
    running: bool,
    reset_requested: bool,
    run_after_reset: bool,
}

impl<S, const N: usize> Sequencer<S, N> {
    /// Create a stopped sequencer in step mode at the first step
    pub fn new(mut registry: StepRegistry<S, N>) -> Self {
        registry.seal();
        Self {
            registry,
            current: 0,
            previous: 0,
            mode: RunMode::Step,
            running: false,
            reset_requested: false,
            run_after_reset: false,
        }
    }

    /// Get the step registry
    pub fn registry(&self) -> &StepRegistry<S, N> {
        &self.registry
    }

    /// Number of steps in the cycle
    pub fn step_count(&self) -> usize {
        self.registry.count()
    }

    /// Index of the current step
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Get the current step (None if the sequence is empty)
    pub fn current_step(&self) -> Option<&S> {
        self.registry.step_at(self.current).ok()
    }

    // Run axis

    /// Check if the current step is executed each tick
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start running (no-op if already running)
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop running (no-op if already stopped)
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Flip running/stopped
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    // Mode axis

    /// Get the run mode
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Keep running across step completions
    pub fn set_auto_mode(&mut self) {
        self.mode = RunMode::Auto;
    }

    /// Stop after each step completion
    pub fn set_step_mode(&mut self) {
        self.mode = RunMode::Step;
    }

    /// Set the run mode
    pub fn set_mode(&mut self, mode: RunMode) {
        self.mode = mode;
    }

    // Index

    /// Move to the next step, wrapping at the end
    pub fn advance(&mut self) {
        let count = self.registry.count();
        if count == 0 {
            return;
        }
        self.current = (self.current + 1) % count;
    }

    /// Manual forward navigation
    pub fn step_forward(&mut self) {
        self.advance();
    }

    /// Manual backward navigation, wrapping from the first to the last step
    pub fn step_back(&mut self) {
        let count = self.registry.count();
        if count == 0 {
            return;
        }
        self.current = if self.current == 0 {
            count - 1
        } else {
            self.current - 1
        };
    }

    /// Jump to an explicit step
    ///
    /// Out-of-range targets are rejected and leave the state unchanged.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SequenceError> {
        let count = self.registry.count();
        if count == 0 {
            return Err(SequenceError::EmptySequence);
        }
        if index >= count {
            return Err(SequenceError::OutOfRange { index, count });
        }
        self.current = index;
        Ok(())
    }

    // Reset

    /// Ask the reset handler to return the rig to its initial state
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    /// Check if a reset is pending
    pub fn reset_requested(&self) -> bool {
        self.reset_requested
    }

    /// Acknowledge a carried-out reset
    pub fn clear_reset(&mut self) {
        self.reset_requested = false;
    }

    /// Choose whether the rig resumes running after a reset
    pub fn set_run_after_reset(&mut self, run_after_reset: bool) {
        self.run_after_reset = run_after_reset;
    }

    /// Check if the rig resumes running after a reset
    pub fn run_after_reset(&self) -> bool {
        self.run_after_reset
    }

    /// Compare against the index seen on the previous call and remember the
    /// current one
    fn take_step_change(&mut self) -> bool {
        let changed = self.current != self.previous;
        self.previous = self.current;
        changed
    }
}

impl<S: Step, const N: usize> Sequencer<S, N> {
    /// Label of the current step
    pub fn current_label(&self) -> Option<&str> {
        self.current_step().map(|s| s.label())
    }

    /// Evaluate one loop iteration
    ///
    /// With no steps registered this is a no-op.
    pub fn tick(&mut self, io: &mut S::Io) -> TickReport {
        let mut report = TickReport::default();

        if self.registry.is_empty() {
            return report;
        }

        if self.current != self.previous {
            self.rearm_current(io);
        }

        let completed = self
            .registry
            .step_at_mut(self.current)
            .map(|step| step.is_completed())
            .unwrap_or(false);

        if completed {
            self.advance();
            self.rearm_current(io);
            report.advanced = true;
            report.wrapped = self.current == 0;
        }

        report.changed = self.take_step_change();

        if report.changed && self.mode == RunMode::Step && self.running {
            self.stop();
            report.paused = true;
        }

        if self.running {
            if let Ok(step) = self.registry.step_at_mut(self.current) {
                step.do_work(io);
                report.worked = true;
            }
        }

        report
    }

    /// Rearm every step, e.g. after the peripherals were released
    pub fn rearm_all(&mut self, io: &mut S::Io) {
        for step in self.registry.iter_mut() {
            step.rearm(io);
        }
    }

    fn rearm_current(&mut self, io: &mut S::Io) {
        if let Ok(step) = self.registry.step_at_mut(self.current) {
            step.rearm(io);
        }
    }
}
