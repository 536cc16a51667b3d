//! Move a cylinder to a position and let it settle

use core::marker::PhantomData;

use cyclerig_core::sequence::{make_label, CompletionFlag, Step, StepLabel};
use cyclerig_core::traits::{CylinderDriver, CylinderId, RigIo};

use crate::timer::Timeout;

/// Command a cylinder extended or retracted and complete after `settle_ms`
pub struct ActuateStep<IO: ?Sized> {
    label: StepLabel,
    completion: CompletionFlag,
    cylinder: CylinderId,
    extend: bool,
    settle: Timeout,
    _io: PhantomData<fn(&mut IO)>,
}

impl<IO: ?Sized> ActuateStep<IO> {
    pub fn new(label: &str, cylinder: CylinderId, extend: bool, settle_ms: u32) -> Self {
        Self {
            label: make_label(label),
            completion: CompletionFlag::new(),
            cylinder,
            extend,
            settle: Timeout::new(settle_ms),
            _io: PhantomData,
        }
    }

    /// Shorthand for an extending step
    pub fn extend(label: &str, cylinder: CylinderId, settle_ms: u32) -> Self {
        Self::new(label, cylinder, true, settle_ms)
    }

    /// Shorthand for a retracting step
    pub fn retract(label: &str, cylinder: CylinderId, settle_ms: u32) -> Self {
        Self::new(label, cylinder, false, settle_ms)
    }
}

impl<IO: RigIo + ?Sized> Step for ActuateStep<IO> {
    type Io = IO;

    fn label(&self) -> &str {
        &self.label
    }

    fn do_work(&mut self, io: &mut IO) {
        let now_ms = io.now_ms();
        let Some(cylinder) = io.cylinder(self.cylinder) else {
            return;
        };

        if !self.settle.is_running() {
            if cylinder.is_extended() != self.extend {
                cylinder.set_extended(self.extend);
            }
            self.settle.start(now_ms);
        }

        if self.settle.is_timed_out(now_ms) {
            self.settle.reset();
            self.completion.mark();
        }
    }

    fn completion(&mut self) -> &mut CompletionFlag {
        &mut self.completion
    }

    fn rearm(&mut self, _io: &mut IO) {
        // Re-command the valve on the next call
        self.settle.reset();
        self.completion.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_io, TestIo};

    #[test]
    fn test_extend_and_settle() {
        let (mut io, pins) = test_io();
        let mut step: ActuateStep<TestIo> = ActuateStep::extend("CLAMP", CylinderId(0), 30);

        step.do_work(&mut io);
        assert!(pins.valves[0].is_high());
        assert!(!step.is_completed());

        io.update(25);
        step.do_work(&mut io);
        assert!(!step.is_completed());

        io.update(5);
        step.do_work(&mut io);
        assert!(step.is_completed());
        assert!(pins.valves[0].is_high());
    }

    #[test]
    fn test_step_rearms_for_next_cycle() {
        let (mut io, pins) = test_io();
        let mut step: ActuateStep<TestIo> = ActuateStep::retract("RELEASE", CylinderId(0), 10);
        io.cylinder(CylinderId(0)).unwrap().extend();

        step.do_work(&mut io);
        assert!(!pins.valves[0].is_high());
        io.update(10);
        step.do_work(&mut io);
        assert!(step.is_completed());

        // Next cycle: settle time starts over
        step.do_work(&mut io);
        assert!(!step.is_completed());
    }

    #[test]
    fn test_reentry_after_release_recommands_valve() {
        let (mut io, pins) = test_io();
        let mut step: ActuateStep<TestIo> = ActuateStep::extend("SLED FORWARD", CylinderId(0), 100);

        step.do_work(&mut io);
        assert!(pins.valves[0].is_high());

        // Left half way, peripherals released, entered again much later
        io.update(50);
        io.release_all();
        assert!(!pins.valves[0].is_high());
        io.update(5_000);
        step.rearm(&mut io);

        step.do_work(&mut io);
        assert!(pins.valves[0].is_high());
        assert!(!step.is_completed());

        io.update(99);
        step.do_work(&mut io);
        assert!(!step.is_completed());
        io.update(1);
        step.do_work(&mut io);
        assert!(step.is_completed());
    }
}
