//! Nextion Touch Panel Protocol
//!
//! The rig's operator panel is a Nextion HMI on a UART. The panel holds the
//! page layout; the controller only sets component attributes and receives
//! touch events.
//!
//! # Protocol Overview
//!
//! Both directions terminate every message with three `0xFF` bytes:
//! ```text
//! controller → panel   t_step.txt="WELD"  FF FF FF      (ASCII instruction)
//! panel → controller   65 01 04 01        FF FF FF      (binary return frame)
//! ```
//!
//! Return frames start with a code byte that selects the layout of the
//! remaining bytes.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod events;
pub mod frame;
pub mod instructions;

pub use events::ReturnEvent;
pub use frame::{FrameError, FrameParser, MAX_RETURN_FRAME, TERMINATOR};
pub use instructions::{Instruction, InstructionBuf, MAX_INSTRUCTION_LEN};
