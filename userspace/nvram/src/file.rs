// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CONTEXT: Directory-backed NvStore for host tools and tests
//! OWNERS: @runtime
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests with tempfile

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::{NvStore, SettingKey, StoreError};

/// Stores each setting block as `<dir>/<key>.nvs`. Writes are atomic
/// (temporary file + rename).
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn block_path(&self, key: SettingKey) -> PathBuf {
        self.dir.join(format!("{:04x}.nvs", key.0))
    }
}

fn io_error(key: SettingKey, err: io::Error) -> StoreError {
    match err.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(key),
        _ => StoreError::Io(err.to_string()),
    }
}

impl NvStore for FileStore {
    fn load(&self, key: SettingKey) -> Result<Vec<u8>, StoreError> {
        let path = self.block_path(key);
        let block = fs::read(&path).map_err(|err| io_error(key, err))?;
        debug!("nvram: loaded {} bytes from {}", block.len(), path.display());
        Ok(block)
    }

    fn store(&mut self, key: SettingKey, block: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|err| StoreError::Io(err.to_string()))?;
        let path = self.block_path(key);
        let tmp = path.with_extension("nvs.tmp");
        {
            let mut f = fs::File::create(&tmp).map_err(|err| StoreError::Io(err.to_string()))?;
            f.write_all(block).map_err(|err| StoreError::Io(err.to_string()))?;
            f.sync_all().map_err(|err| StoreError::Io(err.to_string()))?;
        }
        fs::rename(&tmp, &path).map_err(|err| StoreError::Io(err.to_string()))?;
        debug!("nvram: stored {} bytes to {}", block.len(), path.display());
        Ok(())
    }
}
