use crate::model::LikedRecipe;
use crate::storage::LikesStorage;
use crate::RecipeError;
use log::{debug, warn};

/// Liked recipes, unique by id, in the order they were liked
#[derive(Debug, Default)]
pub struct Likes {
    likes: Vec<LikedRecipe>,
}

impl Likes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|like| like.id == id)
    }

    /// Add a like. Fails with [`RecipeError::Duplicate`] if `id` is already
    /// liked; callers check [`Likes::is_liked`] first.
    pub fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        img: impl Into<String>,
    ) -> Result<&LikedRecipe, RecipeError> {
        let id = id.into();
        if self.is_liked(&id) {
            return Err(RecipeError::Duplicate(format!("recipe {} already liked", id)));
        }
        self.likes.push(LikedRecipe {
            id,
            title: title.into(),
            author: author.into(),
            img: img.into(),
        });
        Ok(&self.likes[self.likes.len() - 1])
    }

    /// Remove a like by id; returns whether anything was removed
    pub fn delete_like(&mut self, id: &str) -> bool {
        let before = self.likes.len();
        self.likes.retain(|like| like.id != id);
        before != self.likes.len()
    }

    pub fn count(&self) -> usize {
        self.likes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LikedRecipe> {
        self.likes.iter()
    }

    pub fn persist(&self, storage: &dyn LikesStorage, key: &str) -> Result<(), RecipeError> {
        debug!("Persisting {} likes under {}", self.likes.len(), key);
        storage.write_all(key, &self.likes)
    }

    /// Rebuild the collection from storage. Missing or unreadable data
    /// yields an empty collection.
    pub fn restore(storage: &dyn LikesStorage, key: &str) -> Self {
        let stored = match storage.read_all(key) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!("No likes stored under {}", key);
                return Self::default();
            }
            Err(e) => {
                warn!("Ignoring unreadable likes under {}: {}", key, e);
                return Self::default();
            }
        };

        let mut likes = Self::default();
        for like in stored {
            if likes.is_liked(&like.id) {
                warn!("Dropping duplicate stored like {}", like.id);
                continue;
            }
            likes.likes.push(like);
        }
        likes
    }
}
