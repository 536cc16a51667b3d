//! Return events sent by the panel

use crate::frame::FrameError;

// Wire format codes
const CODE_INVALID_INSTRUCTION: u8 = 0x00;
const CODE_SUCCESS: u8 = 0x01;
const CODE_INVALID_VARIABLE: u8 = 0x1A;
const CODE_BUFFER_OVERFLOW: u8 = 0x24;
const CODE_TOUCH: u8 = 0x65;
const CODE_PAGE: u8 = 0x66;
const CODE_READY: u8 = 0x88;

/// Decoded return frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReturnEvent {
    /// A component was pressed or released
    Touch { page: u8, component: u8, pressed: bool },
    /// The panel now shows `page`
    PageChanged { page: u8 },
    /// Panel finished booting
    Ready,
    /// Last instruction executed
    Success,
    /// Last instruction was not understood
    InvalidInstruction,
    /// Last instruction named an unknown component or attribute
    InvalidVariable,
    /// Panel's serial buffer overflowed; instructions were dropped
    BufferOverflow,
}

impl ReturnEvent {
    /// Decode a frame (terminator removed)
    pub fn from_frame(frame: &[u8]) -> Result<Self, FrameError> {
        let (&code, rest) = frame.split_first().ok_or(FrameError::Empty)?;

        match code {
            CODE_TOUCH => match rest {
                [page, component, event, ..] => Ok(ReturnEvent::Touch {
                    page: *page,
                    component: *component,
                    pressed: *event == 1,
                }),
                _ => Err(FrameError::Truncated),
            },
            CODE_PAGE => match rest {
                [page, ..] => Ok(ReturnEvent::PageChanged { page: *page }),
                _ => Err(FrameError::Truncated),
            },
            CODE_READY => Ok(ReturnEvent::Ready),
            CODE_SUCCESS => Ok(ReturnEvent::Success),
            CODE_INVALID_INSTRUCTION => Ok(ReturnEvent::InvalidInstruction),
            CODE_INVALID_VARIABLE => Ok(ReturnEvent::InvalidVariable),
            CODE_BUFFER_OVERFLOW => Ok(ReturnEvent::BufferOverflow),
            other => Err(FrameError::UnknownCode(other)),
        }
    }

    /// Returns true if the panel rejected an instruction
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ReturnEvent::InvalidInstruction
                | ReturnEvent::InvalidVariable
                | ReturnEvent::BufferOverflow
        )
    }

    /// Returns the touched component if this is a press on `page`
    pub fn press_on(&self, page: u8) -> Option<u8> {
        match *self {
            ReturnEvent::Touch {
                page: touched,
                component,
                pressed: true,
            } if touched == page => Some(component),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ReturnEvent::from_frame(&[0x88]), Ok(ReturnEvent::Ready));
        assert_eq!(ReturnEvent::from_frame(&[0x01]), Ok(ReturnEvent::Success));
        assert_eq!(
            ReturnEvent::from_frame(&[0x00]),
            Ok(ReturnEvent::InvalidInstruction)
        );
        assert_eq!(
            ReturnEvent::from_frame(&[0x1A]),
            Ok(ReturnEvent::InvalidVariable)
        );
        assert_eq!(
            ReturnEvent::from_frame(&[0x24]),
            Ok(ReturnEvent::BufferOverflow)
        );
    }

    #[test]
    fn test_startup_frame_with_padding() {
        // Panel sends 00 00 00 FF FF FF after power up
        assert_eq!(
            ReturnEvent::from_frame(&[0x00, 0x00, 0x00]),
            Ok(ReturnEvent::InvalidInstruction)
        );
    }

    #[test]
    fn test_touch_release() {
        assert_eq!(
            ReturnEvent::from_frame(&[0x65, 0x01, 0x07, 0x00]),
            Ok(ReturnEvent::Touch {
                page: 1,
                component: 7,
                pressed: false
            })
        );
    }

    #[test]
    fn test_truncated() {
        assert_eq!(
            ReturnEvent::from_frame(&[0x65, 0x01]),
            Err(FrameError::Truncated)
        );
        assert_eq!(ReturnEvent::from_frame(&[0x66]), Err(FrameError::Truncated));
        assert_eq!(ReturnEvent::from_frame(&[]), Err(FrameError::Empty));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(
            ReturnEvent::from_frame(&[0x70, 0x41]),
            Err(FrameError::UnknownCode(0x70))
        );
    }

    #[test]
    fn test_press_on() {
        let press = ReturnEvent::Touch {
            page: 1,
            component: 3,
            pressed: true,
        };
        assert_eq!(press.press_on(1), Some(3));
        assert_eq!(press.press_on(2), None);

        let release = ReturnEvent::Touch {
            page: 1,
            component: 3,
            pressed: false,
        };
        assert_eq!(release.press_on(1), None);
        assert!(!press.is_error());
        assert!(ReturnEvent::BufferOverflow.is_error());
    }
}
