mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::model::LikedRecipe;
use crate::RecipeError;

/// Key-value persistence for the likes collection.
///
/// A missing key is `Ok(None)`; unreadable contents are an error the caller
/// may choose to tolerate.
pub trait LikesStorage: Send + Sync {
    fn read_all(&self, key: &str) -> Result<Option<Vec<LikedRecipe>>, RecipeError>;
    fn write_all(&self, key: &str, likes: &[LikedRecipe]) -> Result<(), RecipeError>;
}

fn encode(likes: &[LikedRecipe]) -> Result<String, RecipeError> {
    serde_json::to_string(likes).map_err(|e| RecipeError::Storage(e.to_string()))
}

fn decode(key: &str, raw: &str) -> Result<Vec<LikedRecipe>, RecipeError> {
    serde_json::from_str(raw)
        .map_err(|e| RecipeError::Storage(format!("corrupt data under {}: {}", key, e)))
}
