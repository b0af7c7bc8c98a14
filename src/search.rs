use crate::model::RecipeSummary;
use crate::source::RecipeSource;
use crate::RecipeError;
use log::info;

/// Fixed number of results shown per page
pub const RESULTS_PER_PAGE: usize = 10;

/// One search: the query and the result set it produced
#[derive(Debug, Clone)]
pub struct Search {
    query: String,
    results: Vec<RecipeSummary>,
}

impl Search {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
        }
    }

    /// Fetch results for the query, replacing whatever was held before.
    ///
    /// On error the previous results are left as they were.
    pub async fn get_results(
        &mut self,
        source: &dyn RecipeSource,
    ) -> Result<&[RecipeSummary], RecipeError> {
        let results = source.fetch_recipes_by_search_term(&self.query).await?;
        info!(
            "Search {:?} on {} returned {} recipes",
            self.query,
            source.source_name(),
            results.len()
        );
        self.results = results;
        Ok(&self.results)
    }

    /// Results for a 1-based page number. Out of range pages are empty.
    pub fn page(&self, number: usize) -> &[RecipeSummary] {
        if number == 0 {
            return &[];
        }
        let start = (number - 1).saturating_mul(RESULTS_PER_PAGE);
        if start >= self.results.len() {
            return &[];
        }
        let end = (start + RESULTS_PER_PAGE).min(self.results.len());
        &self.results[start..end]
    }

    pub fn page_count(&self) -> usize {
        self.results.len().div_ceil(RESULTS_PER_PAGE)
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[RecipeSummary] {
        &self.results
    }
}
