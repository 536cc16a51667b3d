//! Step/direction stepper driver (A4988, DRV8825, TMC in standalone mode)
//!
//! Pulses are emitted from the control loop: every update converts the
//! elapsed time into a step budget at the configured rate. The loop period
//! therefore bounds the achievable speed, which suits the slow strap feed
//! moves of a test rig.

use cyclerig_core::traits::{Direction, StepperDriver, StepperError};
use cyclerig_hal::OutputPin;

use crate::TimedDriver;

/// Step/direction driver configuration
#[derive(Debug, Clone, Copy)]
pub struct StepDirConfig {
    /// Step rate (steps per second)
    pub steps_per_second: u32,
    /// Upper bound of pulses emitted in one update
    pub max_pulses_per_update: u32,
    /// DIR pin level for forward moves
    pub forward_high: bool,
    /// EN pin is active-low (true for A4988 and most TMC boards)
    pub enable_active_low: bool,
}

impl Default for StepDirConfig {
    fn default() -> Self {
        Self {
            steps_per_second: 1000,
            max_pulses_per_update: 64,
            forward_high: true,
            enable_active_low: true,
        }
    }
}

/// Step/direction stepper driver
pub struct StepDirStepper<S, D, E> {
    step: S,
    dir: D,
    enable: E,
    config: StepDirConfig,
    enabled: bool,
    position: i32,
    /// Steps left in the current move
    remaining: u32,
    direction: Direction,
    /// Accumulated step budget in steps × 1000
    budget_milli: u32,
}

impl<S: OutputPin, D: OutputPin, E: OutputPin> StepDirStepper<S, D, E> {
    /// Create a disabled driver
    pub fn new(step: S, dir: D, enable: E, config: StepDirConfig) -> Self {
        let mut stepper = Self {
            step,
            dir,
            enable,
            config,
            enabled: false,
            position: 0,
            remaining: 0,
            direction: Direction::Forward,
            budget_milli: 0,
        };
        stepper.step.set_low();
        stepper.write_enable(false);
        stepper
    }

    fn write_enable(&mut self, enabled: bool) {
        self.enable.set_state(enabled != self.config.enable_active_low);
    }

    fn pulse(&mut self) {
        self.step.set_high();
        self.step.set_low();
        self.remaining -= 1;
        self.position = match self.direction {
            Direction::Forward => self.position.wrapping_add(1),
            Direction::Reverse => self.position.wrapping_sub(1),
        };
    }
}

impl<S: OutputPin, D: OutputPin, E: OutputPin> TimedDriver for StepDirStepper<S, D, E> {
    fn update_with_delta(&mut self, delta_ms: u32) {
        if !self.enabled || self.remaining == 0 {
            self.budget_milli = 0;
            return;
        }

        let cap_milli = self.config.max_pulses_per_update.saturating_mul(1000);
        self.budget_milli = self
            .budget_milli
            .saturating_add(delta_ms.saturating_mul(self.config.steps_per_second))
            .min(cap_milli);

        while self.budget_milli >= 1000 && self.remaining > 0 {
            self.budget_milli -= 1000;
            self.pulse();
        }
    }
}

impl<S: OutputPin, D: OutputPin, E: OutputPin> StepperDriver for StepDirStepper<S, D, E> {
    fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.write_enable(enabled);
        if !enabled {
            self.stop();
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn move_by(&mut self, steps: i32) -> Result<(), StepperError> {
        if !self.enabled {
            return Err(StepperError::Disabled);
        }
        if self.remaining > 0 {
            return Err(StepperError::Busy);
        }

        self.direction = Direction::of(steps);
        let forward = self.direction == Direction::Forward;
        self.dir.set_state(forward == self.config.forward_high);
        self.remaining = steps.unsigned_abs();
        self.budget_milli = 0;
        Ok(())
    }

    fn stop(&mut self) {
        self.remaining = 0;
        self.budget_milli = 0;
    }

    fn is_moving(&self) -> bool {
        self.remaining > 0
    }

    fn position(&self) -> i32 {
        self.position
    }
}
