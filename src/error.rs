use thiserror::Error;

/// Errors surfaced by the recipe lookup core
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Network, HTTP status or payload failure from the recipe source
    #[error("Failed to fetch: {message}")]
    Fetch {
        /// HTTP status code, when the failure came from a response
        status: Option<u16>,
        message: String,
    },

    /// The referenced id does not exist in the collection
    #[error("Not found: {0}")]
    NotFound(String),

    /// The id is already present in a collection that requires uniqueness
    #[error("Already exists: {0}")]
    Duplicate(String),

    /// Caller supplied a value the operation does not accept
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage collaborator failed to write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RecipeError {
    pub fn fetch(status: Option<u16>, message: impl Into<String>) -> Self {
        RecipeError::Fetch {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for RecipeError {
    fn from(err: reqwest::Error) -> Self {
        RecipeError::fetch(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

impl From<serde_json::Error> for RecipeError {
    fn from(err: serde_json::Error) -> Self {
        RecipeError::fetch(None, format!("Malformed payload: {}", err))
    }
}
