//! Operator commands
//!
//! Commands come from the touch panel (or any other operator input) and map
//! one-to-one onto sequencer and rig mutators.

use crate::counter::CounterKind;

/// Operator commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    // Run axis
    /// Start executing the current step
    Start,
    /// Stop after the current `do_work` slice
    Stop,
    /// Flip running/stopped
    ToggleRunning,

    // Mode axis
    /// Keep running across completions
    SetAutoMode,
    /// Pause after each completion
    SetStepMode,
    /// Flip auto/step
    ToggleMode,

    // Manual navigation
    /// Move to the next step (wraps)
    NextStep,
    /// Move to the previous step (wraps)
    PreviousStep,
    /// Jump to an explicit step index
    JumpTo(u8),

    // Maintenance
    /// Release all actuators and return to the first step
    RequestReset,
    /// Zero a cycle counter
    ResetCounter(CounterKind),
    /// Change the cooling time by a signed number of seconds
    AdjustCoolingTime(i16),
}
