//! Rig configuration
//!
//! Board-agnostic settings stored in flash as postcard binary data. A
//! missing or unreadable record falls back to [`RigConfig::default`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::RunMode;

/// Magic number to identify a valid configuration record
pub const CONFIG_MAGIC: u32 = 0x5249_4731; // "RIG1"

/// Timing and behavior settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigConfig {
    /// Record identifier, must equal [`CONFIG_MAGIC`]
    pub magic: u32,
    /// Expected duration of one full cycle (s)
    pub cycle_time_s: u16,
    /// Stopped time after which the status light goes to sleep (s)
    pub idle_sleep_s: u16,
    /// Consecutive inactivity timeouts until the rig shuts down
    pub max_timeouts: u8,
    /// Cooling time increment per panel button press (s)
    pub cooling_step_s: u8,
    /// Power up in step mode instead of auto mode
    pub boot_in_step_mode: bool,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            magic: CONFIG_MAGIC,
            cycle_time_s: 30,
            idle_sleep_s: 300,
            max_timeouts: 3,
            cooling_step_s: 5,
            boot_in_step_mode: true,
        }
    }
}

impl RigConfig {
    /// Check if the record carries the expected magic number
    pub fn is_valid(&self) -> bool {
        self.magic == CONFIG_MAGIC && self.max_timeouts > 0
    }

    /// Run mode to enter at power up
    pub fn boot_mode(&self) -> RunMode {
        if self.boot_in_step_mode {
            RunMode::Step
        } else {
            RunMode::Auto
        }
    }

    /// Inactivity limit for a given cooling time (ms)
    pub fn timeout_limit_ms(&self, cooling_time_s: u32) -> u32 {
        (self.cycle_time_s as u32)
            .saturating_add(cooling_time_s)
            .saturating_mul(1000)
    }

    /// Idle period before sleeping (ms)
    pub fn idle_sleep_ms(&self) -> u32 {
        self.idle_sleep_s as u32 * 1000
    }
}
