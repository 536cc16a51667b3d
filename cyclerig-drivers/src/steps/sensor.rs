//! Wait for a switch edge

use core::marker::PhantomData;

use cyclerig_core::sequence::{make_label, CompletionFlag, Step, StepLabel};
use cyclerig_core::traits::{Edge, RigIo, SwitchId, SwitchInput};

/// Complete when a debounced switch shows `edge`
pub struct SensorStep<IO: ?Sized> {
    label: StepLabel,
    completion: CompletionFlag,
    switch: SwitchId,
    edge: Edge,
    _io: PhantomData<fn(&mut IO)>,
}

impl<IO: ?Sized> SensorStep<IO> {
    pub fn new(label: &str, switch: SwitchId, edge: Edge) -> Self {
        Self {
            label: make_label(label),
            completion: CompletionFlag::new(),
            switch,
            edge,
            _io: PhantomData,
        }
    }
}

impl<IO: RigIo + ?Sized> Step for SensorStep<IO> {
    type Io = IO;

    fn label(&self) -> &str {
        &self.label
    }

    fn do_work(&mut self, io: &mut IO) {
        if let Some(switch) = io.switch(self.switch) {
            if switch.take_edge(self.edge) {
                self.completion.mark();
            }
        }
    }

    fn completion(&mut self) -> &mut CompletionFlag {
        &mut self.completion
    }

    fn rearm(&mut self, io: &mut IO) {
        // Edges latched while another step was current do not count
        if let Some(switch) = io.switch(self.switch) {
            switch.take_edge(self.edge);
        }
        self.completion.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_io, TestIo};

    fn settle(io: &mut TestIo) {
        for _ in 0..10 {
            io.update(5);
        }
    }

    #[test]
    fn test_rising_edge() {
        let (mut io, pins) = test_io();
        let mut step: SensorStep<TestIo> = SensorStep::new("SLED HOME", SwitchId(1), Edge::Rising);

        step.do_work(&mut io);
        assert!(!step.is_completed());

        pins.sensor.set(true);
        settle(&mut io);
        step.do_work(&mut io);
        assert!(step.is_completed());

        // Level alone does not complete again
        step.do_work(&mut io);
        assert!(!step.is_completed());
    }

    #[test]
    fn test_stale_edge_ignored_on_entry() {
        let (mut io, pins) = test_io();
        let mut step: SensorStep<TestIo> = SensorStep::new("SLED HOME", SwitchId(1), Edge::Rising);

        pins.sensor.set(true);
        settle(&mut io);
        step.rearm(&mut io);
        step.do_work(&mut io);
        assert!(!step.is_completed());

        pins.sensor.set(false);
        settle(&mut io);
        pins.sensor.set(true);
        settle(&mut io);
        step.do_work(&mut io);
        assert!(step.is_completed());
    }

    #[test]
    fn test_falling_edge() {
        let (mut io, pins) = test_io();
        let mut step: SensorStep<TestIo> = SensorStep::new("STRAP OUT", SwitchId(0), Edge::Falling);

        pins.strap.set(false);
        settle(&mut io);
        step.do_work(&mut io);
        assert!(step.is_completed());
    }
}
