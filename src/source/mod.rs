mod http;
mod memory;

pub use http::HttpRecipeSource;
pub use memory::StaticSource;

use crate::model::{RecipeData, RecipeSummary};
use crate::RecipeError;
use async_trait::async_trait;

/// Where recipes come from
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Short name used in logs (e.g., "http", "static")
    fn source_name(&self) -> &str;

    async fn fetch_recipes_by_search_term(
        &self,
        query: &str,
    ) -> Result<Vec<RecipeSummary>, RecipeError>;

    async fn fetch_recipe_by_id(&self, id: &str) -> Result<RecipeData, RecipeError>;
}
