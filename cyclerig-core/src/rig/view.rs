//! Display snapshot of the rig state

use crate::counter::CounterBank;
use crate::sequence::StepLabel;
use crate::state::RunMode;
use crate::status::Signal;

/// Everything the panel shows, detached from the rig
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RigView {
    pub step_index: usize,
    pub step_count: usize,
    pub label: StepLabel,
    pub mode: RunMode,
    pub running: bool,
    pub signal: Signal,
    pub counters: CounterBank,
}

impl RigView {
    /// One-based step number, zero when no steps exist
    pub fn step_number(&self) -> usize {
        if self.step_count == 0 {
            0
        } else {
            self.step_index + 1
        }
    }
}
