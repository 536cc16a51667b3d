//! Event logbook
//!
//! A fixed-size ring of the most recent rig events. Each entry stores the
//! short-time cycle count and the wall-clock time at which it was written,
//! packed the way the rig's persistent log stores it.

use heapless::Deque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of retained entries
pub const LOGBOOK_LEN: usize = 50;

/// Event codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LogCode {
    /// Placeholder for unused slots
    #[default]
    Empty,
    /// Controller powered up
    ToolReset,
    /// First inactivity timeout, rig reset and resumed
    ShortTimeout,
    /// Second consecutive timeout, rig paused
    LongTimeout,
    /// Third consecutive timeout, rig stopped in step mode
    ShutDown,
    /// Strap sensor reported an empty magazine
    MagazineEmpty,
    /// Operator started the rig
    ManualOn,
    /// Operator stopped the rig
    ManualOff,
}

impl LogCode {
    /// Text shown in the panel's log list
    pub fn text(self) -> &'static str {
        match self {
            LogCode::Empty => "n.a.",
            LogCode::ToolReset => "CONTROL ON",
            LogCode::ShortTimeout => "AUTO RESET",
            LogCode::LongTimeout => "AUTO PAUSE",
            LogCode::ShutDown => "AUTO STOP",
            LogCode::MagazineEmpty => "STRAP EMPTY",
            LogCode::ManualOn => "MANUAL START",
            LogCode::ManualOff => "MANUAL STOP",
        }
    }
}

/// Time of day with second resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockTime {
    /// Create a time of day, wrapping out-of-range fields
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// Time of day `uptime_s` seconds after midnight
    pub const fn from_seconds(uptime_s: u32) -> Self {
        let day_s = uptime_s % 86_400;
        Self {
            hour: (day_s / 3600) as u8,
            minute: ((day_s / 60) % 60) as u8,
            second: (day_s % 60) as u8,
        }
    }

    /// Pack into 17 bits: hour (5) | minute (6) | second (6)
    pub const fn pack(self) -> u32 {
        ((self.hour as u32 & 0x1F) << 12)
            | ((self.minute as u32 & 0x3F) << 6)
            | (self.second as u32 & 0x3F)
    }

    /// Unpack a value produced by [`pack`](Self::pack)
    pub const fn unpack(packed: u32) -> Self {
        Self {
            hour: ((packed >> 12) & 0x1F) as u8,
            minute: ((packed >> 6) & 0x3F) as u8,
            second: (packed & 0x3F) as u8,
        }
    }
}

/// One logbook entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogEntry {
    /// Short-time cycle count when the event happened
    pub cycle: u32,
    /// Packed time of day
    pub time: u32,
    pub code: LogCode,
}

impl LogEntry {
    pub fn new(cycle: u32, time: ClockTime, code: LogCode) -> Self {
        Self {
            cycle,
            time: time.pack(),
            code,
        }
    }

    /// Time of day the entry was written
    pub fn clock_time(&self) -> ClockTime {
        ClockTime::unpack(self.time)
    }
}

/// Ring buffer of the `N` most recent entries
#[derive(Debug, Clone)]
pub struct Logbook<const N: usize = LOGBOOK_LEN> {
    entries: Deque<LogEntry, N>,
    changed: bool,
}

impl<const N: usize> Default for Logbook<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Logbook<N> {
    /// Create an empty logbook
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
            changed: false,
        }
    }

    /// Append an entry, dropping the oldest one when full
    pub fn write(&mut self, entry: LogEntry) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.entries.push_back(entry);
        self.changed = true;
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Iterate from newest to oldest
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
        self.changed = true;
    }

    /// Check and clear the "needs persisting" flag
    pub fn take_changed(&mut self) -> bool {
        core::mem::replace(&mut self.changed, false)
    }
}

/// Logbook persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogbookError {
    /// Encoding failed or the buffer was too small
    Serialize,
    /// Stored bytes could not be decoded
    Deserialize,
}

#[cfg(feature = "serde")]
impl<const N: usize> Logbook<N> {
    /// Encoded size upper bound: length prefix plus two varint u32 and a
    /// code byte per entry
    pub const MAX_ENCODED_LEN: usize = 5 + N * 11;

    /// Encode the entries, oldest first, with postcard into `buf`
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8], LogbookError> {
        let entries: heapless::Vec<LogEntry, N> = self.entries.iter().copied().collect();
        postcard::to_slice(&entries, buf)
            .map(|bytes| &*bytes)
            .map_err(|_| LogbookError::Serialize)
    }

    /// Decode entries previously written by [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LogbookError> {
        let entries: heapless::Vec<LogEntry, N> =
            postcard::from_bytes(bytes).map_err(|_| LogbookError::Deserialize)?;
        let mut logbook = Self::new();
        for entry in entries {
            logbook.write(entry);
        }
        logbook.changed = false;
        Ok(logbook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(cycle: u32, code: LogCode) -> LogEntry {
        LogEntry::new(cycle, ClockTime::new(12, 0, 0), code)
    }

    #[test]
    fn test_code_texts() {
        assert_eq!(LogCode::Empty.text(), "n.a.");
        assert_eq!(LogCode::ToolReset.text(), "CONTROL ON");
        assert_eq!(LogCode::MagazineEmpty.text(), "STRAP EMPTY");
    }

    #[test]
    fn test_time_packing() {
        let time = ClockTime::new(23, 59, 58);
        let packed = time.pack();
        assert_eq!(packed, (23 << 12) | (59 << 6) | 58);
        assert!(packed < (1 << 17));
        assert_eq!(ClockTime::unpack(packed), time);
    }

    #[test]
    fn test_time_from_seconds() {
        assert_eq!(ClockTime::from_seconds(0), ClockTime::new(0, 0, 0));
        assert_eq!(ClockTime::from_seconds(3_725), ClockTime::new(1, 2, 5));
        // Wraps at midnight
        assert_eq!(ClockTime::from_seconds(86_401), ClockTime::new(0, 0, 1));
    }

    #[test]
    fn test_write_and_latest() {
        let mut log: Logbook<4> = Logbook::new();
        assert!(log.latest().is_none());

        log.write(entry(0, LogCode::ToolReset));
        log.write(entry(7, LogCode::ManualOn));

        assert_eq!(log.len(), 2);
        assert_eq!(log.latest().map(|e| e.code), Some(LogCode::ManualOn));
        assert_eq!(log.latest().map(|e| e.cycle), Some(7));
    }

    #[test]
    fn test_ring_drops_oldest() {
        let mut log: Logbook<3> = Logbook::new();
        for cycle in 0..5 {
            log.write(entry(cycle, LogCode::ShortTimeout));
        }

        assert_eq!(log.len(), 3);
        let mut cycles = log.iter_newest_first().map(|e| e.cycle);
        assert_eq!(cycles.next(), Some(4));
        assert_eq!(cycles.next(), Some(3));
        assert_eq!(cycles.next(), Some(2));
        assert_eq!(cycles.next(), None);
    }

    #[test]
    fn test_clear() {
        let mut log: Logbook = Logbook::new();
        log.write(entry(1, LogCode::ManualOff));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_take_changed() {
        let mut log: Logbook<4> = Logbook::new();
        assert!(!log.take_changed());

        log.write(entry(1, LogCode::ManualOn));
        assert!(log.take_changed());
        assert!(!log.take_changed());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_persisted_logbook_keeps_order() {
        let mut log: Logbook<4> = Logbook::new();
        for cycle in 0..6 {
            log.write(entry(cycle, LogCode::ShortTimeout));
        }
        log.write(entry(9, LogCode::MagazineEmpty));

        let mut buf = [0u8; Logbook::<4>::MAX_ENCODED_LEN];
        let bytes = log.to_bytes(&mut buf).unwrap();
        let mut restored: Logbook<4> = Logbook::from_bytes(bytes).unwrap();

        assert!(!restored.take_changed());
        let cycles: std::vec::Vec<u32> = restored.iter_newest_first().map(|e| e.cycle).collect();
        assert_eq!(cycles, [9, 5, 4, 3]);
        assert_eq!(
            restored.latest().map(|e| e.code),
            Some(LogCode::MagazineEmpty)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_garbage_rejected() {
        assert_eq!(
            Logbook::<4>::from_bytes(&[9, 1]).err(),
            Some(LogbookError::Deserialize)
        );
    }
}
