//! Run mode

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sequencer run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunMode {
    /// Keep running across step completions
    Auto,
    /// Stop after every completed step; the operator resumes
    #[default]
    Step,
}

impl RunMode {
    /// Get the other mode
    pub fn toggled(self) -> Self {
        match self {
            RunMode::Auto => RunMode::Step,
            RunMode::Step => RunMode::Auto,
        }
    }

    /// Short text for the mode button
    pub fn text(self) -> &'static str {
        match self {
            RunMode::Auto => "AUTO",
            RunMode::Step => "STEP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_step_mode() {
        assert_eq!(RunMode::default(), RunMode::Step);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(RunMode::Auto.toggled(), RunMode::Step);
        assert_eq!(RunMode::Step.toggled(), RunMode::Auto);
    }
}
