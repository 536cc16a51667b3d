//! Instruction sink
//!
//! Defines where rendered instructions go.

use heapless::Vec;

use cyclerig_protocol::{Instruction, InstructionBuf};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Instruction did not fit the encoding buffer
    Encoding,
    /// Sink cannot take more instructions
    BufferOverflow,
}

/// Destination for panel instructions
pub trait InstructionSink {
    /// Queue or send one instruction
    fn send(&mut self, instruction: Instruction<'_>) -> Result<(), DisplayError>;
}

/// Encoded instructions waiting to be written to the panel
pub type Outbox<const N: usize> = Vec<InstructionBuf, N>;

impl<const N: usize> InstructionSink for Outbox<N> {
    fn send(&mut self, instruction: Instruction<'_>) -> Result<(), DisplayError> {
        let encoded = instruction
            .encode_to_vec()
            .map_err(|_| DisplayError::Encoding)?;
        self.push(encoded).map_err(|_| DisplayError::BufferOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbox_encodes() {
        let mut outbox: Outbox<2> = Vec::new();
        outbox.send(Instruction::Page(1)).unwrap();
        assert_eq!(outbox[0].as_slice(), b"page 1\xFF\xFF\xFF");
    }

    #[test]
    fn test_outbox_overflow() {
        let mut outbox: Outbox<1> = Vec::new();
        outbox.send(Instruction::Page(1)).unwrap();
        assert_eq!(
            outbox.send(Instruction::Page(2)),
            Err(DisplayError::BufferOverflow)
        );
    }
}
