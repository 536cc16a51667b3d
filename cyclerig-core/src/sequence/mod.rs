//! Cycle step sequencing
//!
//! A rig cycle is a fixed, ordered list of steps. Each step drives some
//! outputs and raises a one-shot completion flag once its sensor condition
//! is met; the [`Sequencer`] drains that flag into an index advance and
//! decides whether the new step runs straight away (auto mode) or waits for
//! the operator (step mode).

pub mod registry;
pub mod sequencer;
pub mod step;

pub use registry::{RegistryError, StepRegistry, MAX_STEPS};
pub use sequencer::{SequenceError, Sequencer, TickReport};
pub use step::{make_label, CompletionFlag, Step, StepLabel, MAX_LABEL_LEN};
