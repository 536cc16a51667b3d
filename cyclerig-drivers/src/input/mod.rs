//! Switch input drivers

pub mod debounce;

pub use debounce::{DebounceConfig, DebouncedInput};
