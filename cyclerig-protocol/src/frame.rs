//! Return frame framing
//!
//! A return frame is any byte run ended by `FF FF FF`. The parser collects
//! bytes until it sees the terminator and then decodes the run into a
//! [`ReturnEvent`]. Payload bytes may themselves be `0xFF`, so only three in
//! a row count as the terminator.

use heapless::Vec;

use crate::events::ReturnEvent;

/// Message terminator, both directions
pub const TERMINATOR: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// Longest accepted return frame, terminator excluded
pub const MAX_RETURN_FRAME: usize = 16;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Frame ran past [`MAX_RETURN_FRAME`] without a terminator
    TooLong,
    /// Terminator without any content
    Empty,
    /// Code byte not known to this protocol
    UnknownCode(u8),
    /// Frame shorter than its code requires
    Truncated,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// State machine for parsing incoming return frames
#[derive(Debug, Clone, Default)]
pub struct FrameParser {
    buffer: Vec<u8, MAX_RETURN_FRAME>,
    /// Consecutive `0xFF` bytes seen at the end of the buffer
    ff_run: u8,
}

impl FrameParser {
    /// Create a new frame parser
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            ff_run: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.ff_run = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(event))` when a complete frame is decoded,
    /// `Ok(None)` when more bytes are needed, or `Err` on a bad frame. The
    /// parser is ready for the next frame after either outcome.
    pub fn feed(&mut self, byte: u8) -> Result<Option<ReturnEvent>, FrameError> {
        if byte == 0xFF {
            self.ff_run += 1;
            if self.ff_run as usize == TERMINATOR.len() {
                let result = self.decode();
                self.reset();
                return result.map(Some);
            }
            return Ok(None);
        }

        // Pending 0xFF bytes were payload after all
        for _ in 0..self.ff_run {
            self.push(0xFF)?;
        }
        self.ff_run = 0;
        self.push(byte)?;
        Ok(None)
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete event found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<ReturnEvent>, FrameError> {
        for &byte in bytes {
            if let Some(event) = self.feed(byte)? {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }

    fn push(&mut self, byte: u8) -> Result<(), FrameError> {
        if self.buffer.push(byte).is_err() {
            self.reset();
            return Err(FrameError::TooLong);
        }
        Ok(())
    }

    fn decode(&self) -> Result<ReturnEvent, FrameError> {
        ReturnEvent::from_frame(&self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_touch_frame() {
        let mut parser = FrameParser::new();
        let event = parser
            .feed_bytes(&[0x65, 0x01, 0x04, 0x01, 0xFF, 0xFF, 0xFF])
            .unwrap();
        assert_eq!(
            event,
            Some(ReturnEvent::Touch {
                page: 1,
                component: 4,
                pressed: true
            })
        );
    }

    #[test]
    fn test_incomplete_frame_waits() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&[0x66, 0x02, 0xFF, 0xFF]), Ok(None));
        assert_eq!(
            parser.feed(0xFF),
            Ok(Some(ReturnEvent::PageChanged { page: 2 }))
        );
    }

    #[test]
    fn test_ff_inside_payload() {
        let mut parser = FrameParser::new();
        // Component id 0xFF followed by the terminator
        let event = parser
            .feed_bytes(&[0x65, 0x01, 0xFF, 0x00, 0xFF, 0xFF, 0xFF])
            .unwrap();
        assert_eq!(
            event,
            Some(ReturnEvent::Touch {
                page: 1,
                component: 0xFF,
                pressed: false
            })
        );
    }

    #[test]
    fn test_empty_frame() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&TERMINATOR), Err(FrameError::Empty));
    }

    #[test]
    fn test_unknown_code_then_resync() {
        let mut parser = FrameParser::new();
        assert_eq!(
            parser.feed_bytes(&[0x42, 0x13, 0xFF, 0xFF, 0xFF]),
            Err(FrameError::UnknownCode(0x42))
        );
        assert_eq!(
            parser.feed_bytes(&[0x88, 0xFF, 0xFF, 0xFF]),
            Ok(Some(ReturnEvent::Ready))
        );
    }

    #[test]
    fn test_too_long_then_resync() {
        let mut parser = FrameParser::new();
        let garbage = [0x12u8; MAX_RETURN_FRAME + 1];
        assert_eq!(parser.feed_bytes(&garbage), Err(FrameError::TooLong));

        assert_eq!(
            parser.feed_bytes(&[0x01, 0xFF, 0xFF, 0xFF]),
            Ok(Some(ReturnEvent::Success))
        );
    }

    #[test]
    fn test_back_to_back_frames() {
        let mut parser = FrameParser::new();
        let data = [0x88, 0xFF, 0xFF, 0xFF, 0x01, 0xFF, 0xFF, 0xFF];
        assert_eq!(parser.feed_bytes(&data), Ok(Some(ReturnEvent::Ready)));
        assert_eq!(parser.feed_bytes(&data[4..]), Ok(Some(ReturnEvent::Success)));
    }

    proptest! {
        #[test]
        fn test_parser_survives_noise(noise in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut parser = FrameParser::new();
            for byte in noise {
                let _ = parser.feed(byte);
                prop_assert!(parser.buffer.len() <= MAX_RETURN_FRAME);
            }
            parser.reset();
            prop_assert_eq!(
                parser.feed_bytes(&[0x66, 0x03, 0xFF, 0xFF, 0xFF]),
                Ok(Some(ReturnEvent::PageChanged { page: 3 }))
            );
        }
    }
}
