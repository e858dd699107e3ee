//! Key-value persistence
//!
//! The game persists a handful of scalars (best score, tuning overrides)
//! under string keys. Browsers back this with LocalStorage; native builds and
//! tests use an in-memory map.

use std::collections::HashMap;

use thiserror::Error;

/// Failure writing to a persistent slot
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("storage write rejected for key `{key}`: {reason}")]
    WriteRejected { key: String, reason: String },
}

/// A persistent string slot addressed by key
pub trait KeyValueSlot {
    /// Read the value under `key`, `None` if absent or unreadable
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory slot (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    items: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueSlot for MemorySlot {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KeyValueSlot + ?Sized> KeyValueSlot for &mut T {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

impl<T: KeyValueSlot + ?Sized> KeyValueSlot for Box<T> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}
