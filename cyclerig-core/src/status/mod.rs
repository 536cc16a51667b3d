//! Status light shown on the panel

/// RGB565 panel color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const WHITE: Color = Color(0xFFFF);
    pub const BLACK: Color = Color(0x0000);

    /// Build from 8-bit channels
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3))
    }

    /// Raw RGB565 value
    pub const fn rgb565(self) -> u16 {
        self.0
    }
}

/// Rig status signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    /// Stopped at the beginning of the cycle
    #[default]
    Start,
    /// Running
    Operate,
    /// Stopped mid-cycle
    Wait,
    /// Idle for longer than the sleep period
    Sleep,
}

impl Signal {
    pub fn text(self) -> &'static str {
        match self {
            Signal::Start => "START",
            Signal::Operate => "OPERATE",
            Signal::Wait => "WAIT",
            Signal::Sleep => "SLEEP",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Signal::Start | Signal::Sleep => Color::BLUE,
            Signal::Operate => Color::GREEN,
            Signal::Wait => Color::RED,
        }
    }
}

/// Status light with a one-shot change flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusLight {
    signal: Signal,
    changed: bool,
}

impl Default for StatusLight {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLight {
    /// Create a light showing [`Signal::Start`], flagged as changed so the
    /// first render picks it up
    pub const fn new() -> Self {
        Self {
            signal: Signal::Start,
            changed: true,
        }
    }

    /// Current signal
    pub fn signal(&self) -> Signal {
        self.signal
    }

    /// Show a signal; re-setting the current one is not a change
    pub fn set(&mut self, signal: Signal) {
        if self.signal != signal {
            self.signal = signal;
            self.changed = true;
        }
    }

    pub fn set_start(&mut self) {
        self.set(Signal::Start);
    }

    pub fn set_operate(&mut self) {
        self.set(Signal::Operate);
    }

    pub fn set_wait(&mut self) {
        self.set(Signal::Wait);
    }

    pub fn set_sleep(&mut self) {
        self.set(Signal::Sleep);
    }

    pub fn is_sleeping(&self) -> bool {
        self.signal == Signal::Sleep
    }

    /// Return whether the signal changed since the last call, clearing the flag
    pub fn has_changed(&mut self) -> bool {
        core::mem::replace(&mut self.changed, false)
    }
}
