use super::RecipeSource;
use crate::config::ApiConfig;
use crate::model::{RecipeData, RecipeSummary};
use crate::RecipeError;
use async_trait::async_trait;
use html_escape::decode_html_entities;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Client for a Forkify-style recipe API.
///
/// `GET {base}/search?q=...` returns `{"count", "recipes": [...]}` and
/// `GET {base}/get?rId=...` returns `{"recipe": {...}}`. Either endpoint may
/// answer 200 with `{"error": "..."}`, which is treated as a failure.
pub struct HttpRecipeSource {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeId {
    String(String),
    Number(u64),
}

impl From<RecipeId> for String {
    fn from(id: RecipeId) -> Self {
        match id {
            RecipeId::String(s) => s,
            RecipeId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    recipes: Vec<WireSummary>,
}

#[derive(Debug, Deserialize)]
struct WireSummary {
    recipe_id: RecipeId,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    recipe: WireRecipe,
}

#[derive(Debug, Deserialize)]
struct WireRecipe {
    recipe_id: RecipeId,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    source_url: String,
    #[serde(default)]
    ingredients: Vec<String>,
    cooking_time: Option<u32>,
    servings: Option<u32>,
}

fn decode_html_symbols(text: &str) -> String {
    // Titles from the API are sometimes entity-encoded twice
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

impl From<WireSummary> for RecipeSummary {
    fn from(wire: WireSummary) -> Self {
        RecipeSummary {
            id: wire.recipe_id.into(),
            title: decode_html_symbols(&wire.title),
            author: decode_html_symbols(&wire.publisher),
            img: wire.image_url,
        }
    }
}

impl From<WireRecipe> for RecipeData {
    fn from(wire: WireRecipe) -> Self {
        RecipeData {
            id: wire.recipe_id.into(),
            title: decode_html_symbols(&wire.title),
            author: decode_html_symbols(&wire.publisher),
            img: wire.image_url,
            url: wire.source_url,
            cooking_time: wire.cooking_time,
            servings: wire.servings,
            ingredients: wire
                .ingredients
                .iter()
                .map(|line| decode_html_symbols(line))
                .collect(),
        }
    }
}

impl HttpRecipeSource {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, RecipeError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-lookup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, RecipeError> {
        Self::new(
            config.base_url.clone(),
            Some(Duration::from_secs(config.timeout)),
        )
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, RecipeError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("request failed");
            return Err(RecipeError::fetch(
                Some(status.as_u16()),
                format!("{} returned {}: {}", url, status.as_u16(), reason),
            ));
        }

        let json: Value = serde_json::from_str(&body)?;
        if let Some(error) = json.get("error").and_then(Value::as_str) {
            return Err(RecipeError::fetch(Some(status.as_u16()), error));
        }
        Ok(json)
    }
}

#[async_trait]
impl RecipeSource for HttpRecipeSource {
    fn source_name(&self) -> &str {
        "http"
    }

    async fn fetch_recipes_by_search_term(
        &self,
        query: &str,
    ) -> Result<Vec<RecipeSummary>, RecipeError> {
        let json = self.get_json("search", &[("q", query)]).await?;
        let response: SearchResponse = serde_json::from_value(json)?;
        info!("Fetched {} results for {:?}", response.recipes.len(), query);
        Ok(response.recipes.into_iter().map(RecipeSummary::from).collect())
    }

    async fn fetch_recipe_by_id(&self, id: &str) -> Result<RecipeData, RecipeError> {
        let json = self.get_json("get", &[("rId", id)]).await?;
        let response: GetResponse = serde_json::from_value(json)?;
        info!("Fetched recipe {}", id);
        Ok(response.recipe.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_wire_decodes_entities() {
        let wire: WireSummary = serde_json::from_value(serde_json::json!({
            "recipe_id": 35477,
            "title": "Pizza Dip &amp;amp; Chips",
            "publisher": "Closet Cooking",
            "image_url": "http://img/1.jpg",
            "social_rank": 99.9
        }))
        .unwrap();
        let summary = RecipeSummary::from(wire);

        assert_eq!(summary.id, "35477");
        assert_eq!(summary.title, "Pizza Dip & Chips");
        assert_eq!(summary.author, "Closet Cooking");
    }

    #[test]
    fn test_recipe_without_timing_fields() {
        let wire: WireRecipe = serde_json::from_value(serde_json::json!({
            "recipe_id": "47746",
            "title": "Best Pizza Dough Ever",
            "publisher": "101 Cookbooks",
            "image_url": "http://img/2.jpg",
            "source_url": "http://101cookbooks.com/pizza",
            "ingredients": ["4 1/2 cups flour", "2 tsp salt"]
        }))
        .unwrap();
        let data = RecipeData::from(wire);

        assert_eq!(data.cooking_time, None);
        assert_eq!(data.servings, None);
        assert_eq!(data.ingredients.len(), 2);
        assert_eq!(data.url, "http://101cookbooks.com/pizza");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = HttpRecipeSource::new("http://localhost:1234/api/", None).unwrap();
        assert_eq!(source.base_url, "http://localhost:1234/api");
        assert_eq!(source.source_name(), "http");
    }
}
