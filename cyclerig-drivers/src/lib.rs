//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cyclerig-core for the rig's peripherals:
//!
//! - Pneumatic cylinders (single solenoid valve, timed strokes)
//! - Debounced switch inputs
//! - Step/direction stepper drivers
//! - Timeout timers
//! - `embedded-hal` 1.0 pin adapters
//! - Reusable step kinds and a ready-made peripheral set

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod cylinder;
pub mod input;
pub mod peripherals;
pub mod pins;
pub mod stepper;
pub mod steps;
pub mod timer;

#[cfg(test)]
pub(crate) mod testing;

/// Drivers whose state advances with elapsed time
pub trait TimedDriver {
    /// Update for a specific time delta (in ms)
    fn update_with_delta(&mut self, delta_ms: u32);
}
