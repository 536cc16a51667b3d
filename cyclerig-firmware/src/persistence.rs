//! Flash persistence
//!
//! Loads the rig configuration, the cycle counters and the logbook at boot
//! and writes counters and logbook back when they change. Anything missing
//! or unreadable falls back to defaults; a corrupted partition is erased so
//! later writes start from a clean map.

use defmt::*;

use cyclerig_core::config::RigConfig;
use cyclerig_core::counter::{CounterBank, CounterStore};
use cyclerig_core::logbook::Logbook;
use cyclerig_hal_rp2040::flash::{FlashError, Rp2040FlashStorage, StorageKey};
use cyclerig_hal_rp2040::FlashStorageTrait;

/// Largest stored record (the logbook)
const MAX_RECORD_SIZE: usize = Logbook::<{ cyclerig_core::logbook::LOGBOOK_LEN }>::MAX_ENCODED_LEN;

/// Persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Flash operation failed
    Flash(FlashError),
    /// Encoding failed
    Serialize,
    /// Stored bytes could not be decoded
    Deserialize,
    /// Stored configuration has the wrong magic
    InvalidConfig,
}

impl From<FlashError> for StorageError {
    fn from(e: FlashError) -> Self {
        StorageError::Flash(e)
    }
}

/// Rig data on flash
///
/// Implements [`CounterStore`] by remembering the latest snapshot; the
/// control loop writes it out with [`flush`](Self::flush).
pub struct RigStorage<'d> {
    storage: Rp2040FlashStorage<'d>,
    pending_counters: Option<CounterBank>,
}

impl<'d> RigStorage<'d> {
    pub fn new(storage: Rp2040FlashStorage<'d>) -> Self {
        Self {
            storage,
            pending_counters: None,
        }
    }

    /// Load the configuration, or the defaults
    pub async fn load_config(&mut self) -> RigConfig {
        match self.read_config().await {
            Ok(config) => {
                info!(
                    "Loaded config: cycle {}s, sleep {}s, {} timeouts",
                    config.cycle_time_s, config.idle_sleep_s, config.max_timeouts
                );
                config
            }
            Err(StorageError::Flash(FlashError::NotFound)) => {
                info!("No config in flash, using defaults");
                RigConfig::default()
            }
            Err(e) => {
                warn!("Failed to load config: {:?}, using defaults", e);
                self.erase_if_corrupted(e).await;
                RigConfig::default()
            }
        }
    }

    /// Load the counter bank, or a zeroed one
    pub async fn load_counters(&mut self) -> CounterBank {
        let mut buffer = [0u8; CounterBank::MAX_ENCODED_LEN];
        let result = match self.storage.read(StorageKey::Counters, &mut buffer).await {
            Ok(len) => CounterBank::from_bytes(&buffer[..len]).map_err(|_| StorageError::Deserialize),
            Err(e) => Err(StorageError::from(e)),
        };

        match result {
            Ok(counters) => {
                info!("Loaded counters: {:?}", counters);
                counters
            }
            Err(StorageError::Flash(FlashError::NotFound)) => {
                info!("No counters in flash, starting from zero");
                CounterBank::new()
            }
            Err(e) => {
                warn!("Failed to load counters: {:?}, starting from zero", e);
                self.erase_if_corrupted(e).await;
                CounterBank::new()
            }
        }
    }

    /// Load the logbook, or an empty one
    pub async fn load_logbook(&mut self) -> Logbook {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let result = match self.storage.read(StorageKey::Logbook, &mut buffer).await {
            Ok(len) => Logbook::from_bytes(&buffer[..len]).map_err(|_| StorageError::Deserialize),
            Err(e) => Err(StorageError::from(e)),
        };

        match result {
            Ok(logbook) => {
                info!("Loaded logbook with {} entries", logbook.len());
                logbook
            }
            Err(StorageError::Flash(FlashError::NotFound)) => Logbook::new(),
            Err(e) => {
                warn!("Failed to load logbook: {:?}, starting empty", e);
                self.erase_if_corrupted(e).await;
                Logbook::new()
            }
        }
    }

    /// Write the latest counter snapshot, if any
    pub async fn flush(&mut self) {
        let Some(counters) = self.pending_counters.take() else {
            return;
        };

        let mut buffer = [0u8; CounterBank::MAX_ENCODED_LEN];
        let result = match counters.to_bytes(&mut buffer) {
            Ok(bytes) => self
                .storage
                .write(StorageKey::Counters, bytes)
                .await
                .map_err(StorageError::from),
            Err(_) => Err(StorageError::Serialize),
        };

        match result {
            Ok(()) => debug!("Counters saved"),
            Err(e) => warn!("Failed to save counters: {:?}", e),
        }
    }

    /// Write the logbook
    pub async fn save_logbook(&mut self, logbook: &Logbook) {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let result = match logbook.to_bytes(&mut buffer) {
            Ok(bytes) => self
                .storage
                .write(StorageKey::Logbook, bytes)
                .await
                .map_err(StorageError::from),
            Err(_) => Err(StorageError::Serialize),
        };

        match result {
            Ok(()) => debug!("Logbook saved ({} entries)", logbook.len()),
            Err(e) => warn!("Failed to save logbook: {:?}", e),
        }
    }

    async fn erase_if_corrupted(&mut self, error: StorageError) {
        if !matches!(error, StorageError::Flash(FlashError::Corrupted)) {
            return;
        }
        match self.storage.erase_all().await {
            Ok(()) => warn!("Storage corrupted, partition erased"),
            Err(e) => error!("Failed to erase corrupted storage: {:?}", e),
        }
    }

    async fn read_config(&mut self) -> Result<RigConfig, StorageError> {
        let mut buffer = [0u8; 32];
        let len = self.storage.read(StorageKey::RigConfig, &mut buffer).await?;

        let config: RigConfig =
            postcard::from_bytes(&buffer[..len]).map_err(|_| StorageError::Deserialize)?;
        if !config.is_valid() {
            return Err(StorageError::InvalidConfig);
        }
        Ok(config)
    }
}

impl CounterStore for RigStorage<'_> {
    fn save(&mut self, counters: &CounterBank) {
        // Last write wins
        self.pending_counters = Some(*counters);
    }
}
