//! Instructions sent to the panel
//!
//! Instructions are ASCII text in the panel's scripting syntax, each
//! followed by the terminator:
//!
//! | Instruction | Text |
//! |-------------|------|
//! | `Page(1)` | `page 1` |
//! | `Text` | `t_step.txt="WELD"` |
//! | `Value` | `n_short.val=42` |
//! | `ForeColor` | `b_play.pco=2016` |
//! | `BackColor` | `t_info.bco=63488` |

use core::fmt::Write;

use heapless::{String, Vec};

use crate::frame::{FrameError, TERMINATOR};

/// Maximum encoded instruction size, terminator included
pub const MAX_INSTRUCTION_LEN: usize = 96;

/// Encoded instruction bytes
pub type InstructionBuf = Vec<u8, MAX_INSTRUCTION_LEN>;

/// Panel instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction<'a> {
    /// Switch to a page
    Page(u8),
    /// Set a text component's content
    Text { object: &'a str, text: &'a str },
    /// Set a number component's value
    Value { object: &'a str, value: i32 },
    /// Set a component's foreground (font) color, RGB565
    ForeColor { object: &'a str, color: u16 },
    /// Set a component's background color, RGB565
    BackColor { object: &'a str, color: u16 },
}

impl Instruction<'_> {
    /// Encode this instruction into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let encoded = self.encode_to_vec()?;
        let len = encoded.len();
        buffer
            .get_mut(..len)
            .ok_or(FrameError::BufferTooSmall)?
            .copy_from_slice(&encoded);
        Ok(len)
    }

    /// Encode this instruction into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<InstructionBuf, FrameError> {
        let mut text: String<{ MAX_INSTRUCTION_LEN - 3 }> = String::new();
        self.write_text(&mut text)
            .map_err(|_| FrameError::BufferTooSmall)?;

        let mut out = InstructionBuf::new();
        out.extend_from_slice(text.as_bytes())
            .map_err(|_| FrameError::BufferTooSmall)?;
        out.extend_from_slice(&TERMINATOR)
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(out)
    }

    fn write_text<W: Write>(&self, w: &mut W) -> core::fmt::Result {
        match *self {
            Instruction::Page(page) => write!(w, "page {}", page),
            Instruction::Text { object, text } => {
                write!(w, "{}.txt=\"", object)?;
                for ch in text.chars() {
                    // A double quote would end the string literal early
                    w.write_char(if ch == '"' { '\'' } else { ch })?;
                }
                w.write_char('"')
            }
            Instruction::Value { object, value } => write!(w, "{}.val={}", object, value),
            Instruction::ForeColor { object, color } => write!(w, "{}.pco={}", object, color),
            Instruction::BackColor { object, color } => write!(w, "{}.bco={}", object, color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(instruction: Instruction<'_>) -> InstructionBuf {
        instruction.encode_to_vec().unwrap()
    }

    #[test]
    fn test_page() {
        assert_eq!(encoded(Instruction::Page(1)).as_slice(), b"page 1\xFF\xFF\xFF");
    }

    #[test]
    fn test_text() {
        let bytes = encoded(Instruction::Text {
            object: "t_step",
            text: "WELD",
        });
        assert_eq!(bytes.as_slice(), b"t_step.txt=\"WELD\"\xFF\xFF\xFF");
    }

    #[test]
    fn test_text_quotes_replaced() {
        let bytes = encoded(Instruction::Text {
            object: "t_info",
            text: "say \"hi\"",
        });
        assert_eq!(bytes.as_slice(), b"t_info.txt=\"say 'hi'\"\xFF\xFF\xFF");
    }

    #[test]
    fn test_value_and_colors() {
        assert_eq!(
            encoded(Instruction::Value {
                object: "n_short",
                value: -42
            })
            .as_slice(),
            b"n_short.val=-42\xFF\xFF\xFF"
        );
        assert_eq!(
            encoded(Instruction::ForeColor {
                object: "b_play",
                color: 0x07E0
            })
            .as_slice(),
            b"b_play.pco=2016\xFF\xFF\xFF"
        );
        assert_eq!(
            encoded(Instruction::BackColor {
                object: "t_info",
                color: 0xF800
            })
            .as_slice(),
            b"t_info.bco=63488\xFF\xFF\xFF"
        );
    }

    #[test]
    fn test_encode_into_slice() {
        let mut buffer = [0u8; 16];
        let len = Instruction::Page(2).encode(&mut buffer).unwrap();
        assert_eq!(&buffer[..len], b"page 2\xFF\xFF\xFF");

        let mut small = [0u8; 4];
        assert_eq!(
            Instruction::Page(2).encode(&mut small),
            Err(FrameError::BufferTooSmall)
        );
    }

    #[test]
    fn test_text_too_long() {
        let long = [b'x'; MAX_INSTRUCTION_LEN];
        let text = core::str::from_utf8(&long).unwrap();
        assert_eq!(
            Instruction::Text {
                object: "t_info",
                text
            }
            .encode_to_vec(),
            Err(FrameError::BufferTooSmall)
        );
    }
}
