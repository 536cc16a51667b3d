//! Stepper motor driver trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Direction of a signed relative move
    pub fn of(steps: i32) -> Self {
        if steps < 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }
}

/// Errors that can occur with stepper operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperError {
    /// Driver is disabled
    Disabled,
    /// A move is already in progress
    Busy,
}

/// Trait for step/direction stepper drivers
pub trait StepperDriver {
    /// Enable or disable the driver
    ///
    /// Disabling aborts any move in progress.
    fn enable(&mut self, enabled: bool);

    /// Check if the driver is enabled
    fn is_enabled(&self) -> bool;

    /// Start a relative move of `steps` (sign gives the direction)
    fn move_by(&mut self, steps: i32) -> Result<(), StepperError>;

    /// Abort the current move
    fn stop(&mut self);

    /// Check if a move is in progress
    fn is_moving(&self) -> bool;

    /// Absolute position in steps since power up
    fn position(&self) -> i32;
}
