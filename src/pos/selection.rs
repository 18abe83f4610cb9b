//! Option picking for a meal plan sold at the POS.

use std::collections::BTreeMap;

use mealdesk_api_types::catalog::{MealPlan, MealPlanItem};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("meal plan has no item `{0}`")]
    UnknownItem(String),
    #[error("item `{item}` has no option `{option}`")]
    UnknownOption { item: String, option: String },
    #[error("item `{item}` allows at most {max} choices")]
    LimitReached { item: String, max: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

#[derive(Debug, Clone)]
pub struct OptionSelection {
    items: Vec<MealPlanItem>,
    selected: BTreeMap<String, Vec<String>>,
}

impl OptionSelection {
    pub fn for_plan(plan: &MealPlan) -> Self {
        Self {
            items: plan.items.clone(),
            selected: BTreeMap::new(),
        }
    }

    fn item(&self, item_id: &str) -> Result<&MealPlanItem, SelectionError> {
        self.items
            .iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| SelectionError::UnknownItem(item_id.to_string()))
    }

    pub fn toggle(&mut self, item_id: &str, option_id: &str) -> Result<Toggled, SelectionError> {
        let item = self.item(item_id)?;
        if !item.options.iter().any(|option| option.id == option_id) {
            return Err(SelectionError::UnknownOption {
                item: item_id.to_string(),
                option: option_id.to_string(),
            });
        }
        let max = item.max_choices;

        let chosen = self.selected.entry(item_id.to_string()).or_default();
        if let Some(pos) = chosen.iter().position(|id| id == option_id) {
            chosen.remove(pos);
            if chosen.is_empty() {
                self.selected.remove(item_id);
            }
            return Ok(Toggled::Removed);
        }

        if let Some(max) = max
            && chosen.len() >= max as usize
        {
            if chosen.is_empty() {
                self.selected.remove(item_id);
            }
            return Err(SelectionError::LimitReached {
                item: item_id.to_string(),
                max,
            });
        }
        chosen.push(option_id.to_string());
        Ok(Toggled::Added)
    }

    /// Option ids chosen for an item, in selection order.
    pub fn selected(&self, item_id: &str) -> &[String] {
        self.selected
            .get(item_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Items that still need more choices to meet their minimum.
    pub fn missing(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| (self.selected(&item.id).len() as u32) < item.min_choices)
            .map(|item| item.id.as_str())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Sum of the extra prices of every chosen option.
    pub fn extra_price(&self) -> i64 {
        self.items
            .iter()
            .flat_map(|item| {
                let chosen = self.selected(&item.id);
                item.options
                    .iter()
                    .filter(move |option| chosen.contains(&option.id))
                    .map(|option| option.extra_price)
            })
            .sum()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
