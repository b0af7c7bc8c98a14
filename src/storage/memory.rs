use super::{decode, encode, LikesStorage};
use crate::model::LikedRecipe;
use crate::RecipeError;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process storage holding the serialized documents as strings
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw document under `key`, bypassing serialization
    pub fn insert_raw(&self, key: impl Into<String>, raw: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.into(), raw.into());
        }
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl LikesStorage for MemoryStorage {
    fn read_all(&self, key: &str) -> Result<Option<Vec<LikedRecipe>>, RecipeError> {
        match self.get_raw(key) {
            Some(raw) => decode(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    fn write_all(&self, key: &str, likes: &[LikedRecipe]) -> Result<(), RecipeError> {
        let raw = encode(likes)?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| RecipeError::Storage("memory storage lock poisoned".to_string()))?;
        entries.insert(key.to_string(), raw);
        Ok(())
    }
}
