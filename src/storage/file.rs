use super::{decode, encode, LikesStorage};
use crate::model::LikedRecipe;
use crate::RecipeError;
use log::debug;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl LikesStorage for FileStorage {
    fn read_all(&self, key: &str) -> Result<Option<Vec<LikedRecipe>>, RecipeError> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RecipeError::Storage(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        decode(key, &raw).map(Some)
    }

    /// Write to a temporary file next to the target, then rename it over the
    /// target so readers never see a partial file.
    fn write_all(&self, key: &str, likes: &[LikedRecipe]) -> Result<(), RecipeError> {
        let path = self.path_for(key);
        let contents = encode(likes)?;
        fs::create_dir_all(&self.dir).map_err(|e| {
            RecipeError::Storage(format!("failed to create {}: {}", self.dir.display(), e))
        })?;
        let write_error = |e: std::io::Error| {
            RecipeError::Storage(format!("failed to write {}: {}", path.display(), e))
        };

        let mut file = NamedTempFile::new_in(&self.dir).map_err(write_error)?;
        file.write_all(contents.as_bytes()).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;
        file.persist(&path).map_err(|e| write_error(e.error))?;
        debug!("Wrote {} likes to {}", likes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_sanitized() {
        let storage = FileStorage::new("/tmp/likes");
        assert_eq!(
            storage.path_for("recipe-lookup.likes"),
            PathBuf::from("/tmp/likes/recipe-lookup.likes.json")
        );
        assert_eq!(
            storage.path_for("../escape"),
            PathBuf::from("/tmp/likes/.._escape.json")
        );
    }
}
