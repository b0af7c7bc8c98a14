use crate::ingredients;
use crate::model::{IngredientLine, LikedRecipe, RecipeData};
use crate::source::RecipeSource;
use crate::RecipeError;
use log::debug;

/// Prep allowance per ingredient when the source gives no cooking time
pub const MINUTES_PER_INGREDIENT: u32 = 15;

/// Servings assumed when the source gives none
pub const DEFAULT_SERVINGS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Servings {
    Increase,
    Decrease,
}

/// A loaded recipe with live, serving-scaled ingredient quantities.
///
/// The fetched [`RecipeData`] is kept untouched; scaling only changes
/// `ingredients`. Parsed counts always satisfy
/// `count / servings == source count / base_servings`.
#[derive(Debug, Clone)]
pub struct Recipe {
    data: RecipeData,
    ingredients: Vec<IngredientLine>,
    parsed: bool,
    cooking_time: u32,
    servings: u32,
    /// Servings the raw source quantities are written for
    base_servings: u32,
    /// Set once servings have been stepped away from the base
    adjusted: bool,
}

impl Recipe {
    /// Fetch a recipe by id. Fetch errors are returned as-is.
    pub async fn load(source: &dyn RecipeSource, id: &str) -> Result<Self, RecipeError> {
        let data = source.fetch_recipe_by_id(id).await?;
        debug!(
            "Loaded recipe {} from {} ({} raw ingredients)",
            data.id,
            source.source_name(),
            data.ingredients.len()
        );
        Ok(Self::from_data(data))
    }

    pub fn from_data(data: RecipeData) -> Self {
        let servings = data.servings.filter(|s| *s >= 1).unwrap_or(DEFAULT_SERVINGS);
        Self {
            cooking_time: data.cooking_time.unwrap_or(0),
            servings,
            base_servings: servings,
            adjusted: false,
            data,
            ingredients: Vec::new(),
            parsed: false,
        }
    }

    /// Parse every raw ingredient line. Subsequent calls are no-ops.
    ///
    /// If servings were already changed, the parsed counts are scaled to
    /// match the current servings.
    pub fn parse_ingredients(&mut self) {
        if self.parsed {
            return;
        }
        self.ingredients = self
            .data
            .ingredients
            .iter()
            .map(|raw| ingredients::parse(raw))
            .collect();
        self.parsed = true;
        if self.servings != self.base_servings {
            self.rescale(self.servings as f64 / self.base_servings as f64);
        }
    }

    pub fn calc_time(&mut self) {
        self.calc_time_with(MINUTES_PER_INGREDIENT);
    }

    /// Trust an explicit source time, otherwise allow `minutes_per_ingredient`
    /// for each ingredient.
    pub fn calc_time_with(&mut self, minutes_per_ingredient: u32) {
        self.cooking_time = match self.data.cooking_time {
            Some(minutes) => minutes,
            None => minutes_per_ingredient * self.ingredient_count() as u32,
        };
    }

    pub fn calc_servings(&mut self) {
        self.calc_servings_with(DEFAULT_SERVINGS);
    }

    /// Initialise servings from the source, or `default_servings` when it
    /// has none. Once servings were stepped with [`Recipe::update_servings`]
    /// this is a no-op.
    pub fn calc_servings_with(&mut self, default_servings: u32) {
        if self.adjusted {
            debug!("Servings for recipe {} already adjusted", self.data.id);
            return;
        }
        let servings = self
            .data
            .servings
            .filter(|s| *s >= 1)
            .unwrap_or_else(|| default_servings.max(1));
        self.servings = servings;
        self.base_servings = servings;
    }

    /// Step servings up or down and rescale every known count by
    /// `new / old`. Decreasing at one serving, or increasing at `u32::MAX`,
    /// changes nothing.
    pub fn update_servings(&mut self, direction: Servings) -> u32 {
        let old = self.servings;
        let new = match direction {
            Servings::Increase => old.checked_add(1),
            Servings::Decrease if old > 1 => Some(old - 1),
            Servings::Decrease => None,
        };
        let Some(new) = new else {
            debug!("Servings for recipe {} stay at {}", self.data.id, old);
            return old;
        };

        self.rescale(new as f64 / old as f64);
        self.servings = new;
        self.adjusted = true;
        new
    }

    fn rescale(&mut self, factor: f64) {
        for line in &mut self.ingredients {
            if let Some(count) = line.count.as_mut() {
                *count *= factor;
            }
        }
    }

    fn ingredient_count(&self) -> usize {
        if self.parsed {
            self.ingredients.len()
        } else {
            self.data.ingredients.len()
        }
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }

    pub fn author(&self) -> &str {
        &self.data.author
    }

    pub fn img(&self) -> &str {
        &self.data.img
    }

    pub fn url(&self) -> &str {
        &self.data.url
    }

    pub fn cooking_time(&self) -> u32 {
        self.cooking_time
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    pub fn ingredients(&self) -> &[IngredientLine] {
        &self.ingredients
    }

    /// The data exactly as the source delivered it
    pub fn data(&self) -> &RecipeData {
        &self.data
    }

    pub fn to_liked(&self) -> LikedRecipe {
        LikedRecipe {
            id: self.data.id.clone(),
            title: self.data.title.clone(),
            author: self.data.author.clone(),
            img: self.data.img.clone(),
        }
    }
}
