// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CONTEXT: Non-volatile setting store abstractions for userspace settings backends
//! OWNERS: @runtime
//! STATUS: Functional (host-first)
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests (MemStore, FileStore) + downstream eeprom tests
//!
//! PUBLIC API:
//!   - NvStore: keyed load/store of fixed-size setting blocks
//!   - SettingKey: opaque store key (EEPROM_KEY is the A/V settings blob)
//!   - MemStore: in-memory store with failure injection for tests
//!   - FileStore: one file per key under a directory (feature = "std")
//!   - StoreError: Error types

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use thiserror::Error;

#[cfg(feature = "std")]
mod file;

#[cfg(feature = "std")]
pub use file::FileStore;

/// Opaque identifier of one setting block in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SettingKey(pub u32);

/// Well-known key of the whole EEPROM image.
pub const EEPROM_KEY: SettingKey = SettingKey(0xFFFF);

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Store error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No block has been stored under the key.
    #[error("no setting stored under key {0}")]
    NotFound(SettingKey),
    /// The backing medium failed the request.
    #[error("i/o error: {0}")]
    Io(alloc::string::String),
    /// The medium refused the write.
    #[error("store rejected write for key {0}")]
    Rejected(SettingKey),
}

/// Keyed non-volatile setting store.
///
/// Blocks are opaque to the store: it hands back exactly the bytes that were
/// last persisted under a key.
pub trait NvStore {
    /// Read the block stored under `key`.
    fn load(&self, key: SettingKey) -> Result<Vec<u8>, StoreError>;

    /// Persist `block` under `key`, replacing any previous block.
    fn store(&mut self, key: SettingKey, block: &[u8]) -> Result<(), StoreError>;
}

impl<S: NvStore + ?Sized> NvStore for &mut S {
    fn load(&self, key: SettingKey) -> Result<Vec<u8>, StoreError> {
        (**self).load(key)
    }

    fn store(&mut self, key: SettingKey, block: &[u8]) -> Result<(), StoreError> {
        (**self).store(key, block)
    }
}

/// In-memory store for testing.
#[derive(Debug, Default)]
pub struct MemStore {
    blocks: BTreeMap<SettingKey, Vec<u8>>,
    fail_loads: bool,
    fail_stores: bool,
    loads: Cell<usize>,
    stores: usize,
}

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `block` under `key`.
    pub fn with_block(key: SettingKey, block: &[u8]) -> Self {
        let mut store = Self::new();
        store.blocks.insert(key, block.to_vec());
        store
    }

    /// Make every subsequent `load` fail with an I/O error.
    pub fn set_fail_loads(&mut self, fail: bool) {
        self.fail_loads = fail;
    }

    /// Make every subsequent `store` fail with `Rejected`.
    pub fn set_fail_stores(&mut self, fail: bool) {
        self.fail_stores = fail;
    }

    /// Number of `load` calls seen, including failed ones.
    pub fn load_count(&self) -> usize {
        self.loads.get()
    }

    /// Number of successful `store` calls.
    pub fn store_count(&self) -> usize {
        self.stores
    }

    /// Get raw access to a stored block (for corruption tests and fixtures).
    pub fn raw_block_mut(&mut self, key: SettingKey) -> Option<&mut Vec<u8>> {
        self.blocks.get_mut(&key)
    }

    /// Bytes currently stored under `key`.
    pub fn block(&self, key: SettingKey) -> Option<&[u8]> {
        self.blocks.get(&key).map(Vec::as_slice)
    }
}

impl NvStore for MemStore {
    fn load(&self, key: SettingKey) -> Result<Vec<u8>, StoreError> {
        self.loads.set(self.loads.get() + 1);
        if self.fail_loads {
            return Err(StoreError::Io("injected load failure".into()));
        }
        self.blocks.get(&key).cloned().ok_or(StoreError::NotFound(key))
    }

    fn store(&mut self, key: SettingKey, block: &[u8]) -> Result<(), StoreError> {
        if self.fail_stores {
            return Err(StoreError::Rejected(key));
        }
        self.blocks.insert(key, block.to_vec());
        self.stores += 1;
        Ok(())
    }
}
