//! Stepper motor drivers

pub mod step_dir;

pub use step_dir::{StepDirConfig, StepDirStepper};
