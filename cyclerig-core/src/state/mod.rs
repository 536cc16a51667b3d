//! Machine run state and operator commands
//!
//! The sequencer's state is two orthogonal axes: running/stopped and
//! auto/step mode. Operator input arrives as [`Command`]s.

pub mod command;
pub mod mode;

pub use command::Command;
pub use mode::RunMode;
