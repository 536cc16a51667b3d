//! Stroke a cylinder once

use core::marker::PhantomData;

use cyclerig_core::sequence::{make_label, CompletionFlag, Step, StepLabel};
use cyclerig_core::traits::{CylinderDriver, CylinderId, RigIo};

/// Extend a cylinder for `push_ms`, retract it for `release_ms`, then complete
pub struct StrokeStep<IO: ?Sized> {
    label: StepLabel,
    completion: CompletionFlag,
    cylinder: CylinderId,
    push_ms: u32,
    release_ms: u32,
    _io: PhantomData<fn(&mut IO)>,
}

impl<IO: ?Sized> StrokeStep<IO> {
    pub fn new(label: &str, cylinder: CylinderId, push_ms: u32, release_ms: u32) -> Self {
        Self {
            label: make_label(label),
            completion: CompletionFlag::new(),
            cylinder,
            push_ms,
            release_ms,
            _io: PhantomData,
        }
    }
}

impl<IO: RigIo + ?Sized> Step for StrokeStep<IO> {
    type Io = IO;

    fn label(&self) -> &str {
        &self.label
    }

    fn do_work(&mut self, io: &mut IO) {
        let Some(cylinder) = io.cylinder(self.cylinder) else {
            return;
        };
        // Check before re-arming so a finished stroke is not restarted
        if cylinder.take_stroke_completed() {
            self.completion.mark();
            return;
        }
        cylinder.stroke(self.push_ms, self.release_ms);
    }

    fn completion(&mut self) -> &mut CompletionFlag {
        &mut self.completion
    }

    fn rearm(&mut self, io: &mut IO) {
        if let Some(cylinder) = io.cylinder(self.cylinder) {
            cylinder.take_stroke_completed();
        }
        self.completion.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_io, TestIo};

    #[test]
    fn test_completes_after_stroke() {
        let (mut io, pins) = test_io();
        let mut step: StrokeStep<TestIo> = StrokeStep::new("WELD", CylinderId(1), 20, 10);

        step.do_work(&mut io);
        assert!(pins.valves[1].is_high());

        for _ in 0..5 {
            io.update(5);
            step.do_work(&mut io);
        }
        assert!(!pins.valves[1].is_high());
        assert!(!step.is_completed());

        io.update(5);
        step.do_work(&mut io);
        assert!(step.is_completed());
        assert!(!pins.valves[1].is_high());
        assert!(!io.cylinder(CylinderId(1)).unwrap().is_stroking());
    }

    #[test]
    fn test_stroke_finished_while_away_is_repeated() {
        let (mut io, pins) = test_io();
        let mut step: StrokeStep<TestIo> = StrokeStep::new("WELD", CylinderId(1), 10, 10);

        step.do_work(&mut io);
        for _ in 0..4 {
            io.update(5);
        }
        step.rearm(&mut io);

        step.do_work(&mut io);
        assert!(!step.is_completed());
        assert!(pins.valves[1].is_high());
    }

    #[test]
    fn test_missing_cylinder_never_completes() {
        let (mut io, _pins) = test_io();
        let mut step: StrokeStep<TestIo> = StrokeStep::new("GHOST", CylinderId(9), 5, 5);
        for _ in 0..10 {
            io.update(5);
            step.do_work(&mut io);
        }
        assert!(!step.is_completed());
    }
}
