//! Application state owned by the controller.
//!
//! Fetches for a search or a recipe can resolve out of order. Each request
//! takes a [`Ticket`] before it starts; a result is applied only while its
//! ticket is still the newest of its kind, so a slow earlier response never
//! overwrites a newer one.

use crate::likes::Likes;
use crate::list::ShoppingList;
use crate::recipe::Recipe;
use crate::search::Search;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Search,
    Recipe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: RequestKind,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub search: Option<Search>,
    pub recipe: Option<Recipe>,
    pub list: ShoppingList,
    pub likes: Likes,
    next_generation: u64,
    latest_search: Option<u64>,
    latest_recipe: Option<u64>,
}

impl AppState {
    pub fn new(likes: Likes) -> Self {
        Self {
            likes,
            ..Self::default()
        }
    }

    pub fn begin_search(&mut self) -> Ticket {
        let ticket = self.issue(RequestKind::Search);
        self.latest_search = Some(ticket.generation);
        ticket
    }

    pub fn begin_recipe(&mut self) -> Ticket {
        let ticket = self.issue(RequestKind::Recipe);
        self.latest_recipe = Some(ticket.generation);
        ticket
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        let latest = match ticket.kind {
            RequestKind::Search => self.latest_search,
            RequestKind::Recipe => self.latest_recipe,
        };
        latest == Some(ticket.generation)
    }

    /// Install `search` if `ticket` is still current. Returns whether it was applied.
    pub fn finish_search(&mut self, ticket: Ticket, search: Search) -> bool {
        if ticket.kind != RequestKind::Search || !self.is_current(ticket) {
            debug!("Discarding stale search {:?}", search.query());
            return false;
        }
        self.search = Some(search);
        true
    }

    /// Install `recipe` if `ticket` is still current. Returns whether it was applied.
    pub fn finish_recipe(&mut self, ticket: Ticket, recipe: Recipe) -> bool {
        if ticket.kind != RequestKind::Recipe || !self.is_current(ticket) {
            debug!("Discarding stale recipe {}", recipe.id());
            return false;
        }
        self.recipe = Some(recipe);
        true
    }

    fn issue(&mut self, kind: RequestKind) -> Ticket {
        self.next_generation += 1;
        Ticket {
            kind,
            generation: self.next_generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeData;

    fn recipe(id: &str) -> Recipe {
        Recipe::from_data(RecipeData {
            id: id.to_string(),
            title: format!("Recipe {id}"),
            ..Default::default()
        })
    }

    #[test]
    fn test_latest_search_applies() {
        let mut state = AppState::default();
        let ticket = state.begin_search();
        assert!(state.finish_search(ticket, Search::new("pizza")));
        assert_eq!(state.search.as_ref().unwrap().query(), "pizza");
    }

    #[test]
    fn test_stale_search_discarded() {
        let mut state = AppState::default();
        let slow = state.begin_search();
        let fast = state.begin_search();

        assert!(state.finish_search(fast, Search::new("pasta")));
        assert!(!state.finish_search(slow, Search::new("pizza")));
        assert_eq!(state.search.as_ref().unwrap().query(), "pasta");
    }

    #[test]
    fn test_stale_recipe_discarded() {
        let mut state = AppState::default();
        let slow = state.begin_recipe();
        let fast = state.begin_recipe();

        assert!(state.finish_recipe(fast, recipe("2")));
        assert!(!state.finish_recipe(slow, recipe("1")));
        assert_eq!(state.recipe.as_ref().unwrap().id(), "2");
    }

    #[test]
    fn test_kinds_are_tracked_separately() {
        let mut state = AppState::default();
        let search = state.begin_search();
        let recipe_ticket = state.begin_recipe();

        assert!(state.is_current(search));
        assert!(state.finish_recipe(recipe_ticket, recipe("1")));
        assert!(state.finish_search(search, Search::new("soup")));
    }

    #[test]
    fn test_ticket_kind_mismatch_rejected() {
        let mut state = AppState::default();
        let search = state.begin_search();
        assert!(!state.finish_recipe(search, recipe("1")));
        assert!(state.recipe.is_none());
    }
}
