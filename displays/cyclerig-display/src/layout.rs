//! Main page layout
//!
//! Component names and touch ids must match the panel's project file.

/// Page shown after boot
pub const PAGE_MAIN: u8 = 1;

/// Step number, e.g. `3/8`
pub const STEP_NUMBER: &str = "t_step_no";
/// Current step label
pub const STEP_LABEL: &str = "t_step";
/// Mode button, shows `AUTO` or `STEP`
pub const MODE_BUTTON: &str = "b_mode";
/// Play button, colored by the running state
pub const PLAY_BUTTON: &str = "b_play";
/// Status field, text and background follow the status light
pub const INFO: &str = "t_info";
/// Short-time cycle counter
pub const SHORT_COUNTER: &str = "n_short";
/// Long-time cycle counter
pub const LONG_COUNTER: &str = "n_long";
/// Cooling time in seconds
pub const COOLING_TIME: &str = "n_cool";

/// Touchable components of the main page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Button {
    Play = 2,
    Mode = 3,
    Next = 4,
    Previous = 5,
    Reset = 6,
    ClearShort = 7,
    CoolingUp = 8,
    CoolingDown = 9,
}

impl Button {
    /// Look up a button by its touch id
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            2 => Some(Button::Play),
            3 => Some(Button::Mode),
            4 => Some(Button::Next),
            5 => Some(Button::Previous),
            6 => Some(Button::Reset),
            7 => Some(Button::ClearShort),
            8 => Some(Button::CoolingUp),
            9 => Some(Button::CoolingDown),
            _ => None,
        }
    }

    /// Touch id
    pub fn id(self) -> u8 {
        self as u8
    }
}
