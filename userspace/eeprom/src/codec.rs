// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Raw load/store of the settings record against an `NvStore`.

use log::{debug, warn};
use nvram::{NvStore, SettingKey, StoreError, EEPROM_KEY};
use thiserror::Error;

use crate::record::{LayoutError, SettingsRecord};

/// The store could not supply a usable record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("settings store unavailable: {0}")]
    Store(#[source] StoreError),
    #[error("settings blob malformed: {0}")]
    Layout(#[source] LayoutError),
}

/// The store rejected the write-back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("settings write-back failed: {0}")]
pub struct Failed(#[source] pub StoreError);

pub struct RecordCodec<S> {
    store: S,
    key: SettingKey,
}

impl<S: NvStore> RecordCodec<S> {
    /// Codec over `store` using the well-known EEPROM key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, EEPROM_KEY)
    }

    pub fn with_key(store: S, key: SettingKey) -> Self {
        Self { store, key }
    }

    pub fn key(&self) -> SettingKey {
        self.key
    }

    pub fn store_ref(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn load(&self) -> Result<SettingsRecord, Unavailable> {
        let blob = self.store.load(self.key).map_err(|err| {
            warn!("eeprom: load of key {} failed: {}", self.key, err);
            Unavailable::Store(err)
        })?;
        let record = SettingsRecord::from_bytes(&blob).map_err(|err| {
            warn!("eeprom: key {} holds a malformed blob: {}", self.key, err);
            Unavailable::Layout(err)
        })?;
        debug!("eeprom: loaded record from key {}", self.key);
        Ok(record)
    }

    /// Recompute both checksums into `record`, then persist its image.
    pub fn store(&mut self, record: &mut SettingsRecord) -> Result<(), Failed> {
        record.update_checksums();
        self.store.store(self.key, &record.to_image()).map_err(|err| {
            warn!("eeprom: write-back to key {} failed: {}", self.key, err);
            Failed(err)
        })?;
        debug!(
            "eeprom: stored record (factory={:#010x} user={:#010x})",
            record.factory_checksum(),
            record.user_checksum()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::AudioFlags;
    use crate::layout::{AUDIO_SETTINGS, FACTORY_CHECKSUM, RECORD_SIZE, USER_CHECKSUM};
    use nvram::MemStore;

    #[test]
    fn test_load_missing_is_unavailable() {
        let codec = RecordCodec::new(MemStore::new());
        assert_eq!(codec.load(), Err(Unavailable::Store(StoreError::NotFound(EEPROM_KEY))));
    }

    #[test]
    fn test_load_short_blob_is_unavailable() {
        let codec = RecordCodec::new(MemStore::with_block(EEPROM_KEY, &[0u8; 64]));
        assert_eq!(codec.load(), Err(Unavailable::Layout(LayoutError { actual: 64 })));
    }

    #[test]
    fn test_store_writes_checksums_into_image() {
        let mut codec = RecordCodec::new(MemStore::new());
        let mut record = SettingsRecord::default();
        record.set_audio_flags(AudioFlags::SURROUND);
        codec.store(&mut record).unwrap();

        let image = codec.store_ref().block(EEPROM_KEY).unwrap();
        assert_eq!(image.len(), RECORD_SIZE);
        assert_eq!(&image[FACTORY_CHECKSUM..FACTORY_CHECKSUM + 4], &0xFFFF_FFFFu32.to_le_bytes());
        assert_eq!(&image[USER_CHECKSUM..USER_CHECKSUM + 4], &0xFFFF_FFFDu32.to_le_bytes());
        assert_eq!(&image[AUDIO_SETTINGS..AUDIO_SETTINGS + 4], &2u32.to_le_bytes());

        let reloaded = codec.load().unwrap();
        assert_eq!(reloaded, record);
        assert!(reloaded.verify_checksums().is_valid());
    }

    #[test]
    fn test_store_rejected_is_failed() {
        let mut store = MemStore::new();
        store.set_fail_stores(true);
        let mut codec = RecordCodec::new(store);
        let mut record = SettingsRecord::default();
        assert_eq!(codec.store(&mut record), Err(Failed(StoreError::Rejected(EEPROM_KEY))));
        assert_eq!(codec.store_ref().store_count(), 0);
    }

    #[test]
    fn test_custom_key() {
        let key = SettingKey(0x0042);
        let mut codec = RecordCodec::with_key(MemStore::new(), key);
        codec.store(&mut SettingsRecord::default()).unwrap();
        assert!(codec.store_ref().block(key).is_some());
        assert!(codec.store_ref().block(EEPROM_KEY).is_none());
    }
}
