//! RP2040-specific HAL for the test rig firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `cyclerig-hal` traits:
//!
//! - Flash storage driver (implements `cyclerig_hal::FlashStorage`)
//! - Panel UART configuration (baud rate, framing)

#![no_std]

pub mod flash;
pub mod uart;

// Re-export shared traits from cyclerig-hal for convenience
pub use cyclerig_hal::{FlashStorage as FlashStorageTrait, StorageKey};
