//! Pneumatic cylinder on a single solenoid valve
//!
//! The valve output extends the cylinder while active; a spring or the
//! return air retracts it when released. Besides plain extend/retract the
//! driver runs timed strokes:
//!
//! ```text
//! Idle ──stroke()──► Pushing ──push_ms──► Releasing ──release_ms──► Idle
//!                    (valve on)           (valve off)          (completed)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut knife = PneumaticCylinder::new(knife_pin);
//!
//! // In the control loop:
//! knife.update_with_delta(delta_ms);
//! knife.stroke(800, 500);
//! if knife.take_stroke_completed() { /* ... */ }
//! ```

use cyclerig_core::traits::CylinderDriver;
use cyclerig_hal::OutputPin;

use crate::TimedDriver;

/// Stroke progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StrokePhase {
    /// No stroke running
    Idle,
    /// Valve on, extending and holding
    Pushing { remaining_ms: u32, release_ms: u32 },
    /// Valve off, retracting and resting
    Releasing { remaining_ms: u32 },
}

/// Pneumatic cylinder driver
pub struct PneumaticCylinder<P> {
    valve: P,
    extended: bool,
    phase: StrokePhase,
    stroke_completed: bool,
}

impl<P: OutputPin> PneumaticCylinder<P> {
    /// Create a retracted cylinder
    pub fn new(valve: P) -> Self {
        let mut cylinder = Self {
            valve,
            extended: false,
            phase: StrokePhase::Idle,
            stroke_completed: false,
        };
        cylinder.write_valve(false);
        cylinder
    }

    fn write_valve(&mut self, extended: bool) {
        self.extended = extended;
        self.valve.set_state(extended);
    }
}

impl<P: OutputPin> TimedDriver for PneumaticCylinder<P> {
    fn update_with_delta(&mut self, delta_ms: u32) {
        match self.phase {
            StrokePhase::Idle => {}
            StrokePhase::Pushing {
                remaining_ms,
                release_ms,
            } => {
                let remaining_ms = remaining_ms.saturating_sub(delta_ms);
                if remaining_ms == 0 {
                    self.write_valve(false);
                    self.phase = StrokePhase::Releasing {
                        remaining_ms: release_ms,
                    };
                } else {
                    self.phase = StrokePhase::Pushing {
                        remaining_ms,
                        release_ms,
                    };
                }
            }
            StrokePhase::Releasing { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(delta_ms);
                if remaining_ms == 0 {
                    self.phase = StrokePhase::Idle;
                    self.stroke_completed = true;
                } else {
                    self.phase = StrokePhase::Releasing { remaining_ms };
                }
            }
        }
    }
}

impl<P: OutputPin> CylinderDriver for PneumaticCylinder<P> {
    fn set_extended(&mut self, extended: bool) {
        self.phase = StrokePhase::Idle;
        self.write_valve(extended);
    }

    fn is_extended(&self) -> bool {
        self.extended
    }

    fn stroke(&mut self, push_ms: u32, release_ms: u32) {
        if self.phase != StrokePhase::Idle {
            return;
        }
        self.write_valve(true);
        self.phase = StrokePhase::Pushing {
            remaining_ms: push_ms.max(1),
            release_ms: release_ms.max(1),
        };
    }

    fn is_stroking(&self) -> bool {
        self.phase != StrokePhase::Idle
    }

    fn take_stroke_completed(&mut self) -> bool {
        core::mem::replace(&mut self.stroke_completed, false)
    }
}
