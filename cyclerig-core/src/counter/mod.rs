//! Persistent cycle counters
//!
//! The rig keeps three values across power loss: a long-time cycle count
//! that is never cleared from the panel, a short-time count the operator
//! may zero, and the cooling time in seconds added to every timeout limit.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound for the cooling time setting (seconds)
pub const MAX_COOLING_TIME_S: u32 = 600;

/// Counter slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CounterKind {
    /// Total completed cycles
    LongTime,
    /// Completed cycles since the operator last cleared it
    ShortTime,
    /// Cooling time in seconds
    CoolingTime,
}

impl CounterKind {
    /// All slots in storage order
    pub const ALL: [CounterKind; 3] = [
        CounterKind::LongTime,
        CounterKind::ShortTime,
        CounterKind::CoolingTime,
    ];

    fn slot(self) -> usize {
        match self {
            CounterKind::LongTime => 0,
            CounterKind::ShortTime => 1,
            CounterKind::CoolingTime => 2,
        }
    }
}

/// Set of counter values
///
/// Every mutation raises a one-shot "changed" flag that the persistence
/// layer drains with [`take_changed`](Self::take_changed). Equality only
/// compares the values.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CounterBank {
    values: [u32; 3],
    #[cfg_attr(feature = "serde", serde(skip))]
    changed: bool,
}

impl CounterBank {
    /// Create a bank with all counters at zero
    pub const fn new() -> Self {
        Self {
            values: [0; 3],
            changed: false,
        }
    }

    /// Get a counter value
    pub fn get(&self, kind: CounterKind) -> u32 {
        self.values[kind.slot()]
    }

    /// Overwrite a counter value
    pub fn set(&mut self, kind: CounterKind, value: u32) {
        let slot = &mut self.values[kind.slot()];
        if *slot != value {
            *slot = value;
            self.changed = true;
        }
    }

    /// Add one to a counter (saturating)
    pub fn increment(&mut self, kind: CounterKind) {
        let value = self.get(kind).saturating_add(1);
        self.set(kind, value);
    }

    /// Zero a counter
    pub fn reset(&mut self, kind: CounterKind) {
        self.set(kind, 0);
    }

    /// Record one completed cycle on both cycle counters
    pub fn count_cycle(&mut self) {
        self.increment(CounterKind::LongTime);
        self.increment(CounterKind::ShortTime);
    }

    /// Cooling time in seconds
    pub fn cooling_time_s(&self) -> u32 {
        self.get(CounterKind::CoolingTime)
    }

    /// Shift the cooling time by `delta_s`, clamped to `[0, MAX_COOLING_TIME_S]`
    pub fn adjust_cooling_time(&mut self, delta_s: i16) {
        let current = self.cooling_time_s() as i64;
        let adjusted = (current + delta_s as i64).clamp(0, MAX_COOLING_TIME_S as i64);
        self.set(CounterKind::CoolingTime, adjusted as u32);
    }

    /// Return whether the bank changed since the last call, clearing the flag
    pub fn take_changed(&mut self) -> bool {
        core::mem::replace(&mut self.changed, false)
    }
}

impl PartialEq for CounterBank {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for CounterBank {}

/// Counter persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterError {
    /// Encoding failed or the buffer was too small
    Serialize,
    /// Stored bytes could not be decoded
    Deserialize,
}

#[cfg(feature = "serde")]
impl CounterBank {
    /// Encoded size upper bound (three varint u32)
    pub const MAX_ENCODED_LEN: usize = 15;

    /// Encode the values with postcard into `buf`
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8], CounterError> {
        postcard::to_slice(self, buf)
            .map(|bytes| &*bytes)
            .map_err(|_| CounterError::Serialize)
    }

    /// Decode values previously written by [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CounterError> {
        postcard::from_bytes(bytes).map_err(|_| CounterError::Deserialize)
    }
}

/// Sink for counter snapshots
///
/// Saving is fire-and-forget: the last write wins and failures are the
/// store's own concern.
pub trait CounterStore {
    /// Persist a snapshot of the bank
    fn save(&mut self, counters: &CounterBank);
}

/// Hand the bank to `store` if it changed since the last call
///
/// Returns whether a save was issued.
pub fn persist_if_changed<C: CounterStore + ?Sized>(
    counters: &mut CounterBank,
    store: &mut C,
) -> bool {
    if counters.take_changed() {
        store.save(counters);
        true
    } else {
        false
    }
}
