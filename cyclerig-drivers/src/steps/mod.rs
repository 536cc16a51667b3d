//! Reusable step kinds
//!
//! Most rig steps are one of a handful of shapes: stroke a cylinder, move a
//! cylinder and let it settle, wait for a sensor, move a stepper, or dwell.
//! Each shape is a [`Step`] on its own; [`StepKind`] closes them into one
//! type so a whole cycle fits in a single registry without trait objects.

pub mod actuate;
pub mod dwell;
pub mod movement;
pub mod sensor;
pub mod stroke;

pub use actuate::ActuateStep;
pub use dwell::DwellStep;
pub use movement::MoveStep;
pub use sensor::SensorStep;
pub use stroke::StrokeStep;

use cyclerig_core::sequence::{CompletionFlag, Step};
use cyclerig_core::traits::RigIo;

/// Any of the reusable step kinds
pub enum StepKind<IO: ?Sized> {
    Stroke(StrokeStep<IO>),
    Actuate(ActuateStep<IO>),
    Sensor(SensorStep<IO>),
    Move(MoveStep<IO>),
    Dwell(DwellStep<IO>),
}

impl<IO: RigIo + ?Sized> Step for StepKind<IO> {
    type Io = IO;

    fn label(&self) -> &str {
        match self {
            StepKind::Stroke(step) => step.label(),
            StepKind::Actuate(step) => step.label(),
            StepKind::Sensor(step) => step.label(),
            StepKind::Move(step) => step.label(),
            StepKind::Dwell(step) => step.label(),
        }
    }

    fn do_work(&mut self, io: &mut IO) {
        match self {
            StepKind::Stroke(step) => step.do_work(io),
            StepKind::Actuate(step) => step.do_work(io),
            StepKind::Sensor(step) => step.do_work(io),
            StepKind::Move(step) => step.do_work(io),
            StepKind::Dwell(step) => step.do_work(io),
        }
    }

    fn completion(&mut self) -> &mut CompletionFlag {
        match self {
            StepKind::Stroke(step) => step.completion(),
            StepKind::Actuate(step) => step.completion(),
            StepKind::Sensor(step) => step.completion(),
            StepKind::Move(step) => step.completion(),
            StepKind::Dwell(step) => step.completion(),
        }
    }

    fn rearm(&mut self, io: &mut IO) {
        match self {
            StepKind::Stroke(step) => step.rearm(io),
            StepKind::Actuate(step) => step.rearm(io),
            StepKind::Sensor(step) => step.rearm(io),
            StepKind::Move(step) => step.rearm(io),
            StepKind::Dwell(step) => step.rearm(io),
        }
    }
}

impl<IO: ?Sized> From<StrokeStep<IO>> for StepKind<IO> {
    fn from(step: StrokeStep<IO>) -> Self {
        StepKind::Stroke(step)
    }
}

impl<IO: ?Sized> From<ActuateStep<IO>> for StepKind<IO> {
    fn from(step: ActuateStep<IO>) -> Self {
        StepKind::Actuate(step)
    }
}

impl<IO: ?Sized> From<SensorStep<IO>> for StepKind<IO> {
    fn from(step: SensorStep<IO>) -> Self {
        StepKind::Sensor(step)
    }
}

impl<IO: ?Sized> From<MoveStep<IO>> for StepKind<IO> {
    fn from(step: MoveStep<IO>) -> Self {
        StepKind::Move(step)
    }
}

impl<IO: ?Sized> From<DwellStep<IO>> for StepKind<IO> {
    fn from(step: DwellStep<IO>) -> Self {
        StepKind::Dwell(step)
    }
}
