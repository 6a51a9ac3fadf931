use std::collections::HashMap;
use std::sync::Mutex;

use crate::app::{Result, VidsieveError};
use crate::store::{Store, StoreKey};

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| VidsieveError::Other(e.to_string()))?;
        Ok(values.get(&key).cloned())
    }

    fn write(&self, key: StoreKey, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| VidsieveError::Other(e.to_string()))?;
        values.insert(key, value.to_string());
        Ok(())
    }
}
