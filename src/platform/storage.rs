//! Platform storage slots

use crate::persistence::KeyValueSlot;
#[cfg(not(target_arch = "wasm32"))]
use crate::persistence::MemorySlot;

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSlot;

#[cfg(target_arch = "wasm32")]
impl LocalStorageSlot {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueSlot for LocalStorageSlot {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), crate::persistence::StorageError> {
        use crate::persistence::StorageError;

        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

/// Persistent slot for the current platform
#[cfg(target_arch = "wasm32")]
pub fn default_slot() -> Box<dyn KeyValueSlot> {
    Box::new(LocalStorageSlot)
}

/// Native builds keep scores for the life of the process
#[cfg(not(target_arch = "wasm32"))]
pub fn default_slot() -> Box<dyn KeyValueSlot> {
    Box::new(MemorySlot::new())
}
