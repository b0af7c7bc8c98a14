pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod id;
pub mod ingredients;
pub mod likes;
pub mod list;
pub mod model;
pub mod recipe;
pub mod search;
pub mod source;
pub mod state;
pub mod storage;

pub use builder::AppBuilder;
pub use config::AppConfig;
pub use controller::{
    App, Command, FetchedRecipe, FetchedSearch, Outcome, PendingRecipe, PendingSearch,
};
pub use error::RecipeError;
pub use likes::Likes;
pub use list::ShoppingList;
pub use model::{IngredientLine, LikedRecipe, RecipeData, RecipeSummary, ShoppingListItem};
pub use recipe::{Recipe, Servings};
pub use search::{Search, RESULTS_PER_PAGE};
pub use source::{HttpRecipeSource, RecipeSource, StaticSource};
pub use state::{AppState, Ticket};
pub use storage::{FileStorage, LikesStorage, MemoryStorage};

/// Search the configured recipe API and return the first page of results.
///
/// # Example
/// ```no_run
/// # use recipe_lookup::{search_recipes, AppConfig};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = search_recipes(&AppConfig::load()?, "pizza").await?;
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(
    config: &AppConfig,
    query: &str,
) -> Result<Vec<RecipeSummary>, RecipeError> {
    let source = HttpRecipeSource::from_config(&config.api)?;
    let mut search = Search::new(query);
    search.get_results(&source).await?;
    Ok(search.page(1).to_vec())
}

/// Fetch one recipe and derive its ingredients, time and servings.
pub async fn load_recipe(config: &AppConfig, id: &str) -> Result<Recipe, RecipeError> {
    let source = HttpRecipeSource::from_config(&config.api)?;
    let mut recipe = Recipe::load(&source, id).await?;
    recipe.parse_ingredients();
    recipe.calc_time_with(config.recipe.minutes_per_ingredient);
    recipe.calc_servings_with(config.recipe.default_servings);
    Ok(recipe)
}
