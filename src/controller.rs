use crate::builder::AppBuilder;
use crate::config::RecipeConfig;
use crate::model::{IngredientLine, RecipeSummary, ShoppingListItem};
use crate::recipe::{Recipe, Servings};
use crate::search::Search;
use crate::source::RecipeSource;
use crate::state::{AppState, Ticket};
use crate::storage::LikesStorage;
use crate::RecipeError;
use log::{debug, info};
use std::sync::Arc;

/// A user action, mapped onto exactly one core operation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search { query: String },
    GoToPage { page: usize },
    LoadRecipe { id: String },
    IncreaseServings,
    DecreaseServings,
    AddRecipeToList,
    DeleteListItem { id: String },
    UpdateListCount { id: String, count: f64 },
    ToggleLike,
}

/// What the caller should render after a [`Command`]
#[derive(Debug, Clone)]
pub enum Outcome {
    Results {
        query: String,
        page: usize,
        page_count: usize,
        recipes: Vec<RecipeSummary>,
    },
    Recipe {
        recipe: Recipe,
        liked: bool,
    },
    Servings {
        servings: u32,
        ingredients: Vec<IngredientLine>,
    },
    ListItems {
        added: Vec<ShoppingListItem>,
    },
    ListItemDeleted {
        id: String,
        removed: bool,
    },
    ListCountUpdated {
        id: String,
        count: f64,
    },
    Liked {
        liked: bool,
        count: usize,
    },
    /// Nothing to do; the UI action should be suppressed
    Ignored {
        reason: String,
    },
}

fn ignored(reason: &str) -> Outcome {
    Outcome::Ignored {
        reason: reason.to_string(),
    }
}

/// A search that holds its ticket but has not been fetched yet.
///
/// Fetching needs no access to the [`App`], so several requests can be in
/// flight at once; [`App::finish_search`] keeps only the newest.
pub struct PendingSearch {
    ticket: Ticket,
    search: Search,
    source: Arc<dyn RecipeSource>,
}

impl PendingSearch {
    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub async fn fetch(mut self) -> Result<FetchedSearch, RecipeError> {
        self.search.get_results(self.source.as_ref()).await?;
        Ok(FetchedSearch {
            ticket: self.ticket,
            search: self.search,
        })
    }
}

/// A search result waiting to be applied with [`App::finish_search`]
pub struct FetchedSearch {
    ticket: Ticket,
    search: Search,
}

/// A recipe request that holds its ticket but has not been fetched yet
pub struct PendingRecipe {
    ticket: Ticket,
    id: String,
    source: Arc<dyn RecipeSource>,
    recipe_config: RecipeConfig,
}

impl PendingRecipe {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Load the recipe and derive its ingredients, time and servings
    pub async fn fetch(self) -> Result<FetchedRecipe, RecipeError> {
        let mut recipe = Recipe::load(self.source.as_ref(), &self.id).await?;
        recipe.parse_ingredients();
        recipe.calc_time_with(self.recipe_config.minutes_per_ingredient);
        recipe.calc_servings_with(self.recipe_config.default_servings);
        Ok(FetchedRecipe {
            ticket: self.ticket,
            recipe,
        })
    }
}

/// A loaded recipe waiting to be applied with [`App::finish_recipe`]
pub struct FetchedRecipe {
    ticket: Ticket,
    recipe: Recipe,
}

/// The controller: owns the application state and the collaborators
pub struct App {
    source: Arc<dyn RecipeSource>,
    storage: Box<dyn LikesStorage>,
    likes_key: String,
    recipe_config: RecipeConfig,
    state: AppState,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::default()
    }

    pub(crate) fn new(
        source: Arc<dyn RecipeSource>,
        storage: Box<dyn LikesStorage>,
        likes_key: String,
        recipe_config: RecipeConfig,
        state: AppState,
    ) -> Self {
        Self {
            source,
            storage,
            likes_key,
            recipe_config,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn handle(&mut self, command: Command) -> Result<Outcome, RecipeError> {
        debug!("Handling {:?}", command);
        match command {
            Command::Search { query } => self.search(&query).await,
            Command::GoToPage { page } => Ok(self.go_to_page(page)),
            Command::LoadRecipe { id } => self.load_recipe(&id).await,
            Command::IncreaseServings => Ok(self.update_servings(Servings::Increase)),
            Command::DecreaseServings => Ok(self.update_servings(Servings::Decrease)),
            Command::AddRecipeToList => Ok(self.add_recipe_to_list()),
            Command::DeleteListItem { id } => {
                let removed = self.state.list.delete_item(&id);
                Ok(Outcome::ListItemDeleted { id, removed })
            }
            Command::UpdateListCount { id, count } => self.update_list_count(id, count),
            Command::ToggleLike => self.toggle_like(),
        }
    }

    async fn search(&mut self, query: &str) -> Result<Outcome, RecipeError> {
        let Some(pending) = self.begin_search(query) else {
            return Ok(ignored("empty search query"));
        };
        let fetched = pending.fetch().await?;
        Ok(self.finish_search(fetched))
    }

    /// Start a search. Returns `None` for a blank query.
    pub fn begin_search(&mut self, query: &str) -> Option<PendingSearch> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(PendingSearch {
            ticket: self.state.begin_search(),
            search: Search::new(query),
            source: Arc::clone(&self.source),
        })
    }

    /// Apply a fetched search and show its first page, unless a newer
    /// search was started in the meantime.
    pub fn finish_search(&mut self, fetched: FetchedSearch) -> Outcome {
        if !self.state.finish_search(fetched.ticket, fetched.search) {
            return ignored("superseded by a newer search");
        }
        self.go_to_page(1)
    }

    fn go_to_page(&self, page: usize) -> Outcome {
        match &self.state.search {
            Some(search) => Outcome::Results {
                query: search.query().to_string(),
                page,
                page_count: search.page_count(),
                recipes: search.page(page).to_vec(),
            },
            None => ignored("no active search"),
        }
    }

    async fn load_recipe(&mut self, id: &str) -> Result<Outcome, RecipeError> {
        let Some(pending) = self.begin_recipe(id) else {
            return Ok(ignored("empty recipe id"));
        };
        let fetched = pending.fetch().await?;
        Ok(self.finish_recipe(fetched))
    }

    /// Start loading a recipe. Returns `None` for a blank id.
    pub fn begin_recipe(&mut self, id: &str) -> Option<PendingRecipe> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        Some(PendingRecipe {
            ticket: self.state.begin_recipe(),
            id: id.to_string(),
            source: Arc::clone(&self.source),
            recipe_config: self.recipe_config.clone(),
        })
    }

    /// Apply a loaded recipe, unless a newer recipe was requested in the
    /// meantime.
    pub fn finish_recipe(&mut self, fetched: FetchedRecipe) -> Outcome {
        let FetchedRecipe { ticket, recipe } = fetched;
        let liked = self.state.likes.is_liked(recipe.id());
        let snapshot = recipe.clone();
        if !self.state.finish_recipe(ticket, recipe) {
            return ignored("superseded by a newer recipe");
        }
        info!("Showing recipe {} ({})", snapshot.id(), snapshot.title());
        Outcome::Recipe {
            recipe: snapshot,
            liked,
        }
    }

    fn update_servings(&mut self, direction: Servings) -> Outcome {
        let Some(recipe) = self.state.recipe.as_mut() else {
            return ignored("no recipe loaded");
        };
        if direction == Servings::Decrease && recipe.servings() <= 1 {
            return ignored("servings already at minimum");
        }
        let servings = recipe.update_servings(direction);
        Outcome::Servings {
            servings,
            ingredients: recipe.ingredients().to_vec(),
        }
    }

    fn add_recipe_to_list(&mut self) -> Outcome {
        let Some(recipe) = self.state.recipe.as_ref() else {
            return ignored("no recipe loaded");
        };
        let added = self.state.list.add_ingredients(recipe.ingredients());
        Outcome::ListItems { added }
    }

    fn update_list_count(&mut self, id: String, count: f64) -> Result<Outcome, RecipeError> {
        if !count.is_finite() || count < 0.0 {
            return Err(RecipeError::InvalidInput(format!(
                "count must be a non-negative number, got {}",
                count
            )));
        }
        self.state.list.update_count(&id, count)?;
        Ok(Outcome::ListCountUpdated { id, count })
    }

    fn toggle_like(&mut self) -> Result<Outcome, RecipeError> {
        let Some(recipe) = self.state.recipe.as_ref() else {
            return Ok(ignored("no recipe loaded"));
        };

        let liked = if self.state.likes.is_liked(recipe.id()) {
            self.state.likes.delete_like(recipe.id());
            false
        } else {
            let like = recipe.to_liked();
            self.state
                .likes
                .add_like(like.id, like.title, like.author, like.img)?;
            true
        };

        self.state
            .likes
            .persist(self.storage.as_ref(), &self.likes_key)?;
        Ok(Outcome::Liked {
            liked,
            count: self.state.likes.count(),
        })
    }
}
