//! Relative stepper move

use core::marker::PhantomData;

use cyclerig_core::sequence::{make_label, CompletionFlag, Step, StepLabel};
use cyclerig_core::traits::{RigIo, StepperDriver, StepperId};

/// Move a stepper by a relative number of steps and complete when it stops
pub struct MoveStep<IO: ?Sized> {
    label: StepLabel,
    completion: CompletionFlag,
    stepper: StepperId,
    steps: i32,
    started: bool,
    _io: PhantomData<fn(&mut IO)>,
}

impl<IO: ?Sized> MoveStep<IO> {
    pub fn new(label: &str, stepper: StepperId, steps: i32) -> Self {
        Self {
            label: make_label(label),
            completion: CompletionFlag::new(),
            stepper,
            steps,
            started: false,
            _io: PhantomData,
        }
    }
}

impl<IO: RigIo + ?Sized> Step for MoveStep<IO> {
    type Io = IO;

    fn label(&self) -> &str {
        &self.label
    }

    fn do_work(&mut self, io: &mut IO) {
        let Some(stepper) = io.stepper(self.stepper) else {
            return;
        };

        if !self.started {
            if !stepper.is_enabled() {
                stepper.enable(true);
            }
            // Busy: another step still owns the motor, retry next call
            self.started = stepper.move_by(self.steps).is_ok();
            return;
        }

        if !stepper.is_moving() {
            self.started = false;
            self.completion.mark();
        }
    }

    fn completion(&mut self) -> &mut CompletionFlag {
        &mut self.completion
    }

    fn rearm(&mut self, _io: &mut IO) {
        self.started = false;
        self.completion.take();
    }
}
