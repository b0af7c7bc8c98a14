use super::RecipeSource;
use crate::model::{RecipeData, RecipeSummary};
use crate::RecipeError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Serves a fixed set of search results and recipes from memory.
///
/// Unknown queries and ids fail with a 404 `Fetch` error, the same way the
/// HTTP source reports them.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    searches: HashMap<String, Vec<RecipeSummary>>,
    recipes: HashMap<String, RecipeData>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: impl Into<String>, results: Vec<RecipeSummary>) -> Self {
        self.searches.insert(query.into().to_lowercase(), results);
        self
    }

    pub fn with_recipe(mut self, recipe: RecipeData) -> Self {
        self.recipes.insert(recipe.id.clone(), recipe);
        self
    }
}

#[async_trait]
impl RecipeSource for StaticSource {
    fn source_name(&self) -> &str {
        "static"
    }

    async fn fetch_recipes_by_search_term(
        &self,
        query: &str,
    ) -> Result<Vec<RecipeSummary>, RecipeError> {
        self.searches
            .get(&query.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| RecipeError::fetch(Some(404), format!("no results for {:?}", query)))
    }

    async fn fetch_recipe_by_id(&self, id: &str) -> Result<RecipeData, RecipeError> {
        self.recipes
            .get(id)
            .cloned()
            .ok_or_else(|| RecipeError::fetch(Some(404), format!("no recipe with id {}", id)))
    }
}
