//! Flash storage abstractions
//!
//! Persistent key-value storage for the rig configuration, the cycle
//! counters and the event logbook. Chip-specific HALs implement it on top
//! of their flash memory.

/// Record keys
///
/// Each key holds one postcard-encoded record; the newest write wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// `RigConfig`
    RigConfig = 0,
    /// `CounterBank`
    Counters = 1,
    /// `Logbook`, oldest entry first
    Logbook = 2,
}

impl StorageKey {
    /// Every key, in byte order
    pub const ALL: [StorageKey; 3] = [
        StorageKey::RigConfig,
        StorageKey::Counters,
        StorageKey::Logbook,
    ];

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Look up the key stored as `value`
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// The flash driver reported an error
    Flash,
    /// The key/value map could not complete the operation
    Storage,
    /// Nothing stored under the key
    NotFound,
    /// Stored record does not fit the caller's buffer
    BufferTooSmall,
    /// Stored data failed its integrity check
    Corrupted,
}

/// Flash storage trait
///
/// Counters are written after every completed cycle, so implementations
/// must spread writes across sectors.
pub trait FlashStorage {
    /// Read a value by key into the provided buffer
    ///
    /// Returns the number of bytes read.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Write a value by key
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;

    /// Erase all stored data
    fn erase_all(&mut self) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

#[cfg(feature = "sequential-storage")]
mod map_key {
    use sequential_storage::map::{Key, SerializationError};

    use super::StorageKey;

    // One byte on flash per key
    impl Key for StorageKey {
        fn serialize_into(&self, buffer: &mut [u8]) -> Result<usize, SerializationError> {
            let slot = buffer.first_mut().ok_or(SerializationError::BufferTooSmall)?;
            *slot = self.as_u8();
            Ok(1)
        }

        fn deserialize_from(buffer: &[u8]) -> Result<(Self, usize), SerializationError> {
            let byte = *buffer.first().ok_or(SerializationError::BufferTooSmall)?;
            let key = StorageKey::from_u8(byte).ok_or(SerializationError::InvalidFormat)?;
            Ok((key, 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_byte_roundtrip() {
        for (byte, key) in StorageKey::ALL.into_iter().enumerate() {
            assert_eq!(key.as_u8(), byte as u8);
            assert_eq!(StorageKey::from_u8(byte as u8), Some(key));
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(StorageKey::from_u8(3), None);
        assert_eq!(StorageKey::from_u8(0xFF), None);
    }
}
