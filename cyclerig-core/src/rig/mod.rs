//! Rig controller
//!
//! Ties the sequencer to the rest of the rig: operator commands, reset
//! handling, cycle counting, the event logbook, the status light and the
//! inactivity monitor. The control loop owns one [`Rig`] and calls
//! [`Rig::poll`] once per iteration.

pub mod controller;
pub mod view;

pub use controller::{Rig, RigReport};
pub use view::RigView;
