//! Debounced switch input
//!
//! A raw level change is accepted once it has been stable for the
//! configured debounce time. Accepted changes latch an edge flag that is
//! cleared when read.

use cyclerig_core::traits::{Edge, SwitchInput};
use cyclerig_hal::InputPin;

use crate::TimedDriver;

/// Debounce configuration
#[derive(Debug, Clone, Copy)]
pub struct DebounceConfig {
    /// Time a new level must be stable before it is accepted (ms)
    pub debounce_ms: u32,
    /// Input is active-high (true) or active-low (false)
    pub active_high: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 20,
            active_high: true,
        }
    }
}

/// Debounced input driver
pub struct DebouncedInput<P> {
    pin: P,
    config: DebounceConfig,
    /// Accepted level
    active: bool,
    /// Level currently being timed
    candidate: bool,
    /// How long the candidate has been stable (ms)
    stable_ms: u32,
    rose: bool,
    fell: bool,
}

impl<P: InputPin> DebouncedInput<P> {
    /// Create an input, accepting the current level without an edge
    pub fn new(mut pin: P, config: DebounceConfig) -> Self {
        let active = pin.is_high() == config.active_high;
        Self {
            pin,
            config,
            active,
            candidate: active,
            stable_ms: 0,
            rose: false,
            fell: false,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    fn read_raw(&mut self) -> bool {
        self.pin.is_high() == self.config.active_high
    }
}

impl<P: InputPin> TimedDriver for DebouncedInput<P> {
    fn update_with_delta(&mut self, delta_ms: u32) {
        let raw = self.read_raw();

        if raw == self.active {
            self.candidate = raw;
            self.stable_ms = 0;
            return;
        }

        if raw != self.candidate {
            self.candidate = raw;
            self.stable_ms = 0;
            return;
        }

        self.stable_ms = self.stable_ms.saturating_add(delta_ms);
        if self.stable_ms >= self.config.debounce_ms {
            self.active = raw;
            self.stable_ms = 0;
            if raw {
                self.rose = true;
            } else {
                self.fell = true;
            }
        }
    }
}

impl<P: InputPin> SwitchInput for DebouncedInput<P> {
    fn is_active(&self) -> bool {
        self.active
    }

    fn take_edge(&mut self, edge: Edge) -> bool {
        match edge {
            Edge::Rising => core::mem::replace(&mut self.rose, false),
            Edge::Falling => core::mem::replace(&mut self.fell, false),
        }
    }
}
