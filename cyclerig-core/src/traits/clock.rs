//! Monotonic time source

/// Millisecond clock
///
/// The value wraps after ~49 days; consumers compare with `wrapping_sub`.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;
}
