use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write slot `{slot}`")]
    Io {
        slot: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode slot `{slot}`")]
    Encode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to create store directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Local key-value byte store with named slots.
pub trait KvStore {
    /// `None` when the slot is absent or unreadable.
    fn get(&self, slot: &str) -> Option<Vec<u8>>;
    fn set(&mut self, slot: &str, value: &[u8]) -> Result<(), StoreError>;
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, slot: &str) -> Option<Vec<u8>> {
        (**self).get(slot)
    }

    fn set(&mut self, slot: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(slot, value)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryKvStore {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, slot: &str) -> Option<Vec<u8>> {
        self.slots.get(slot).cloned()
    }

    fn set(&mut self, slot: &str, value: &[u8]) -> Result<(), StoreError> {
        self.slots.insert(slot.to_string(), value.to_vec());
        Ok(())
    }
}

/// One file per slot under `base_dir`.
#[derive(Clone, Debug)]
pub struct FileKvStore {
    base_dir: PathBuf,
}

impl FileKvStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|source| StoreError::CreateDir {
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", Self::sanitize_slot(slot)))
    }

    fn sanitize_slot(slot: &str) -> String {
        slot.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn write_atomic(&self, slot: &str, value: &[u8]) -> io::Result<()> {
        let path = self.file_path(slot);
        let tmp_path = path.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(value)?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)
    }
}

impl KvStore for FileKvStore {
    fn get(&self, slot: &str) -> Option<Vec<u8>> {
        fs::read(self.file_path(slot)).ok()
    }

    fn set(&mut self, slot: &str, value: &[u8]) -> Result<(), StoreError> {
        self.write_atomic(slot, value)
            .map_err(|source| StoreError::Io {
                slot: slot.to_string(),
                source,
            })
    }
}
