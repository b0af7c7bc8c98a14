use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where liked recipes are persisted
    #[serde(default)]
    pub storage: StorageConfig,
    /// Recipe derivation constants
    #[serde(default)]
    pub recipe: RecipeConfig,
}

/// Configuration for the HTTP recipe source
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the recipe API (search and get endpoints hang off it)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for likes persistence
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON document per storage key
    #[serde(default = "default_storage_dir")]
    pub dir: String,
    /// Namespaced key the likes collection is stored under
    #[serde(default = "default_likes_key")]
    pub likes_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            likes_key: default_likes_key(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipeConfig {
    /// Prep allowance per ingredient when the source has no cooking time
    #[serde(default = "default_minutes_per_ingredient")]
    pub minutes_per_ingredient: u32,
    /// Servings assumed when the source has none
    #[serde(default = "default_servings")]
    pub default_servings: u32,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            minutes_per_ingredient: default_minutes_per_ingredient(),
            default_servings: default_servings(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://forkify-api.herokuapp.com/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_storage_dir() -> String {
    ".recipe-lookup".to_string()
}

fn default_likes_key() -> String {
    "recipe-lookup.likes".to_string()
}

fn default_minutes_per_ingredient() -> u32 {
    crate::recipe::MINUTES_PER_INGREDIENT
}

fn default_servings() -> u32 {
    crate::recipe::DEFAULT_SERVINGS
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_LOOKUP__ prefix
    /// 2. recipe-lookup.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_LOOKUP__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-lookup").required(false))
        // Use double underscore for nested: RECIPE_LOOKUP__STORAGE__DIR
        .add_source(
            Environment::with_prefix("RECIPE_LOOKUP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
