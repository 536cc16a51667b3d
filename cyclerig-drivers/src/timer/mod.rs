//! Timers

pub mod timeout;

pub use timeout::Timeout;
