//! Wait a fixed time

use core::marker::PhantomData;

use cyclerig_core::sequence::{make_label, CompletionFlag, Step, StepLabel};
use cyclerig_core::traits::RigIo;

use crate::timer::Timeout;

/// Complete `duration_ms` after the first `do_work`
pub struct DwellStep<IO: ?Sized> {
    label: StepLabel,
    completion: CompletionFlag,
    timer: Timeout,
    _io: PhantomData<fn(&mut IO)>,
}

impl<IO: ?Sized> DwellStep<IO> {
    pub fn new(label: &str, duration_ms: u32) -> Self {
        Self {
            label: make_label(label),
            completion: CompletionFlag::new(),
            timer: Timeout::new(duration_ms),
            _io: PhantomData,
        }
    }

    /// Change the dwell time (e.g. when the cooling time is adjusted)
    pub fn set_duration(&mut self, duration_ms: u32) {
        self.timer.set_duration(duration_ms);
    }
}

impl<IO: RigIo + ?Sized> Step for DwellStep<IO> {
    type Io = IO;

    fn label(&self) -> &str {
        &self.label
    }

    fn do_work(&mut self, io: &mut IO) {
        let now_ms = io.now_ms();
        if !self.timer.is_running() {
            self.timer.start(now_ms);
        }
        if self.timer.is_timed_out(now_ms) {
            self.timer.reset();
            self.completion.mark();
        }
    }

    fn completion(&mut self) -> &mut CompletionFlag {
        &mut self.completion
    }

    fn rearm(&mut self, _io: &mut IO) {
        self.timer.reset();
        self.completion.take();
    }
}
