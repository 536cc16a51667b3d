//! Peripheral context handed to every step

use super::{Clock, CylinderDriver, StepperDriver, SwitchInput};

/// Index of a cylinder in the rig's wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CylinderId(pub u8);

/// Index of a switch input in the rig's wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchId(pub u8);

/// Index of a stepper in the rig's wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperId(pub u8);

/// All peripherals of a rig
///
/// Owned by the control loop and passed by reference into the sequencer,
/// which forwards it to the current step.
pub trait RigIo: Clock {
    type Cylinder: CylinderDriver;
    type Switch: SwitchInput;
    type Stepper: StepperDriver;

    /// Look up a cylinder
    fn cylinder(&mut self, id: CylinderId) -> Option<&mut Self::Cylinder>;

    /// Look up a switch input
    fn switch(&mut self, id: SwitchId) -> Option<&mut Self::Switch>;

    /// Look up a stepper
    fn stepper(&mut self, id: StepperId) -> Option<&mut Self::Stepper>;

    /// Check if the strap magazine sensor sees strap
    fn strap_present(&mut self) -> bool;

    /// Advance time-driven peripheral state (debouncing, strokes, step pulses)
    fn update(&mut self, delta_ms: u32);

    /// Retract every cylinder and stop every stepper
    fn release_all(&mut self);
}
