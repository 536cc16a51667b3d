//! Rig supervision
//!
//! Detects a stalled cycle (no step progress within the expected cycle
//! time), an empty strap magazine, and operator inactivity.

pub mod monitor;

pub use monitor::{RigMonitor, TimeoutAction};
