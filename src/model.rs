use serde::{Deserialize, Serialize};
use std::fmt;

/// Lightweight recipe record returned by a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

/// Full recipe record as delivered by a [`crate::source::RecipeSource`].
///
/// Ingredients are the raw free-text lines; `cooking_time` and `servings`
/// are only present when the source states them explicitly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipeData {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub url: String,
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub ingredients: Vec<String>,
}

/// One structured ingredient line.
///
/// A `None` count means "to taste" and is never scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

impl fmt::Display for IngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(count) = self.count {
            parts.push(format_count(count));
        }
        if !self.unit.is_empty() {
            parts.push(self.unit.clone());
        }
        parts.push(self.ingredient.clone());
        write!(f, "{}", parts.join(" "))
    }
}

/// Render a quantity with at most two decimals and no trailing zeros
pub fn format_count(count: f64) -> String {
    let rounded = format!("{:.2}", count);
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

/// A bookmarked recipe; `id` is the uniqueness key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}
