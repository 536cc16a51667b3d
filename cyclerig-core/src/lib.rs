//! Board-agnostic core logic for the endurance test rig firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Step sequencing (step trait, registry, sequencer state machine)
//! - Rig controller tying the sequencer to counters, logbook and monitor
//! - Cycle counters and event logbook
//! - Status light and inactivity monitoring
//! - Peripheral traits (cylinder, switch, stepper, clock)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod counter;
pub mod logbook;
pub mod rig;
pub mod safety;
pub mod sequence;
pub mod state;
pub mod status;
pub mod traits;
