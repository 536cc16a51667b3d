//! Panel input
//!
//! Maps events returned by the panel onto operator commands.

use cyclerig_core::counter::CounterKind;
use cyclerig_core::state::Command;
use cyclerig_protocol::ReturnEvent;

use crate::layout::{Button, PAGE_MAIN};

/// What the control loop should do with a panel event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelAction {
    /// Apply an operator command
    Command(Command),
    /// Panel lost its contents, redraw everything
    Redraw,
    /// Nothing to do
    Ignore,
}

/// Interpret a panel event
///
/// `cooling_step_s` is the increment applied by the cooling time buttons.
pub fn interpret(event: ReturnEvent, cooling_step_s: u8) -> PanelAction {
    match event {
        ReturnEvent::Ready => PanelAction::Redraw,
        ReturnEvent::PageChanged { page } if page == PAGE_MAIN => PanelAction::Redraw,
        _ => match event.press_on(PAGE_MAIN).and_then(Button::from_id) {
            Some(button) => PanelAction::Command(button_command(button, cooling_step_s)),
            None => PanelAction::Ignore,
        },
    }
}

fn button_command(button: Button, cooling_step_s: u8) -> Command {
    let step = i16::from(cooling_step_s);
    match button {
        Button::Play => Command::ToggleRunning,
        Button::Mode => Command::ToggleMode,
        Button::Next => Command::NextStep,
        Button::Previous => Command::PreviousStep,
        Button::Reset => Command::RequestReset,
        Button::ClearShort => Command::ResetCounter(CounterKind::ShortTime),
        Button::CoolingUp => Command::AdjustCoolingTime(step),
        Button::CoolingDown => Command::AdjustCoolingTime(-step),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(component: u8) -> ReturnEvent {
        ReturnEvent::Touch {
            page: PAGE_MAIN,
            component,
            pressed: true,
        }
    }

    #[test]
    fn test_buttons_map_to_commands() {
        assert_eq!(
            interpret(press(Button::Play.id()), 5),
            PanelAction::Command(Command::ToggleRunning)
        );
        assert_eq!(
            interpret(press(Button::Mode.id()), 5),
            PanelAction::Command(Command::ToggleMode)
        );
        assert_eq!(
            interpret(press(Button::Previous.id()), 5),
            PanelAction::Command(Command::PreviousStep)
        );
        assert_eq!(
            interpret(press(Button::ClearShort.id()), 5),
            PanelAction::Command(Command::ResetCounter(CounterKind::ShortTime))
        );
    }

    #[test]
    fn test_cooling_buttons_use_step() {
        assert_eq!(
            interpret(press(Button::CoolingUp.id()), 5),
            PanelAction::Command(Command::AdjustCoolingTime(5))
        );
        assert_eq!(
            interpret(press(Button::CoolingDown.id()), 10),
            PanelAction::Command(Command::AdjustCoolingTime(-10))
        );
    }

    #[test]
    fn test_release_and_other_pages_ignored() {
        let release = ReturnEvent::Touch {
            page: PAGE_MAIN,
            component: Button::Play.id(),
            pressed: false,
        };
        assert_eq!(interpret(release, 5), PanelAction::Ignore);

        let other_page = ReturnEvent::Touch {
            page: 0,
            component: Button::Play.id(),
            pressed: true,
        };
        assert_eq!(interpret(other_page, 5), PanelAction::Ignore);
        assert_eq!(interpret(press(42), 5), PanelAction::Ignore);
    }

    #[test]
    fn test_ready_requests_redraw() {
        assert_eq!(interpret(ReturnEvent::Ready, 5), PanelAction::Redraw);
        assert_eq!(
            interpret(ReturnEvent::PageChanged { page: PAGE_MAIN }, 5),
            PanelAction::Redraw
        );
        assert_eq!(interpret(ReturnEvent::Success, 5), PanelAction::Ignore);
    }
}
