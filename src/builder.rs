use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::controller::App;
use crate::likes::Likes;
use crate::source::{HttpRecipeSource, RecipeSource};
use crate::state::AppState;
use crate::storage::{FileStorage, LikesStorage};
use crate::RecipeError;

/// Builder for wiring an [`App`] to its collaborators
#[derive(Default)]
pub struct AppBuilder {
    config: Option<AppConfig>,
    source: Option<Box<dyn RecipeSource>>,
    storage: Option<Box<dyn LikesStorage>>,
    timeout: Option<Duration>,
}

impl AppBuilder {
    /// Use an explicit configuration instead of loading one
    ///
    /// # Example
    /// ```
    /// use recipe_lookup::{App, AppConfig};
    ///
    /// let builder = App::builder().config(AppConfig::default());
    /// ```
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the recipe source (defaults to the HTTP API from configuration)
    ///
    /// # Example
    /// ```
    /// use recipe_lookup::{App, StaticSource};
    ///
    /// let builder = App::builder().source(StaticSource::new());
    /// ```
    pub fn source(mut self, source: impl RecipeSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Set the likes storage (defaults to files under `storage.dir`)
    ///
    /// # Example
    /// ```
    /// use recipe_lookup::{App, MemoryStorage};
    ///
    /// let builder = App::builder().storage(MemoryStorage::new());
    /// ```
    pub fn storage(mut self, storage: impl LikesStorage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Override the HTTP timeout of the default source
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Build the app and restore previously persisted likes
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - No configuration was given and loading one fails
    /// - The default HTTP client cannot be created
    ///
    /// # Example
    /// ```
    /// use recipe_lookup::{App, AppConfig, MemoryStorage, StaticSource};
    ///
    /// let app = App::builder()
    ///     .config(AppConfig::default())
    ///     .source(StaticSource::new())
    ///     .storage(MemoryStorage::new())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(app.state().likes.count(), 0);
    /// ```
    pub fn build(self) -> Result<App, RecipeError> {
        let config = match self.config {
            Some(config) => config,
            None => AppConfig::load()?,
        };

        let source: Arc<dyn RecipeSource> = match self.source {
            Some(source) => Arc::from(source),
            None => match self.timeout {
                Some(timeout) => Arc::new(HttpRecipeSource::new(
                    config.api.base_url.clone(),
                    Some(timeout),
                )?),
                None => Arc::new(HttpRecipeSource::from_config(&config.api)?),
            },
        };

        let storage: Box<dyn LikesStorage> = match self.storage {
            Some(storage) => storage,
            None => Box::new(FileStorage::new(&config.storage.dir)),
        };

        let likes = Likes::restore(storage.as_ref(), &config.storage.likes_key);
        Ok(App::new(
            source,
            storage,
            config.storage.likes_key,
            config.recipe,
            AppState::new(likes),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LikedRecipe;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_default_source_with_timeout_override() {
        let app = App::builder()
            .config(AppConfig::default())
            .storage(MemoryStorage::new())
            .timeout(Duration::from_secs(5))
            .build();
        assert!(app.is_ok());
    }

    #[test]
    fn test_build_restores_likes() {
        let storage = MemoryStorage::new();
        let liked = LikedRecipe {
            id: "47746".to_string(),
            title: "Best Pizza Dough Ever".to_string(),
            author: "101 Cookbooks".to_string(),
            img: String::new(),
        };
        let config = AppConfig::default();
        storage
            .write_all(&config.storage.likes_key, &[liked])
            .unwrap();

        let app = App::builder()
            .config(config)
            .storage(storage)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert!(app.state().likes.is_liked("47746"));
    }
}
