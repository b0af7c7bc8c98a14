use crate::id::IdGenerator;
use crate::model::{IngredientLine, ShoppingListItem};
use crate::RecipeError;
use log::debug;

/// Ordered shopping list. Items are identified by generated id, never by
/// content, so the same ingredient can appear more than once.
#[derive(Debug, Default)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
    ids: IdGenerator,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(
        &mut self,
        count: Option<f64>,
        unit: impl Into<String>,
        ingredient: impl Into<String>,
    ) -> ShoppingListItem {
        let item = ShoppingListItem {
            id: self.ids.next_id(),
            count,
            unit: unit.into(),
            ingredient: ingredient.into(),
        };
        debug!("Adding list item {} ({})", item.id, item.ingredient);
        self.items.push(item.clone());
        item
    }

    /// Append every ingredient line as its own item
    pub fn add_ingredients(&mut self, lines: &[IngredientLine]) -> Vec<ShoppingListItem> {
        lines
            .iter()
            .map(|line| self.add_item(line.count, line.unit.clone(), line.ingredient.clone()))
            .collect()
    }

    /// Remove the item with `id`. Unknown ids are ignored; returns whether
    /// anything was removed.
    pub fn delete_item(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => {
                debug!("List item {} already gone", id);
                false
            }
        }
    }

    /// Set the count of an existing item. The caller validates `new_count`.
    pub fn update_count(&mut self, id: &str, new_count: f64) -> Result<(), RecipeError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| RecipeError::NotFound(format!("list item {}", id)))?;
        item.count = Some(new_count);
        Ok(())
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
