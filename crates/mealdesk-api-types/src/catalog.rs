//! Menus, meal plans and their add-on options.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Price per tier in minor currency units.
    #[serde(default)]
    pub prices: TierPrices,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuDraft {
    pub name: String,
    #[serde(default)]
    pub item_ids: Vec<String>,
    pub active: bool,
}

/// Prices of one item across the three POS price tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TierPrices {
    #[serde(default)]
    pub restaurant: i64,
    #[serde(default)]
    pub online: i64,
    #[serde(default)]
    pub membership: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanOption {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub extra_price: i64,
}

/// One slot in a meal plan, e.g. "main course", with its selectable options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<MealPlanOption>,
    #[serde(default)]
    pub min_choices: u32,
    #[serde(default)]
    pub max_choices: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub price: i64,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub meals_per_day: u32,
    #[serde(default)]
    pub items: Vec<MealPlanItem>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: i64,
    pub duration_days: u32,
    pub meals_per_day: u32,
    pub active: bool,
}

/// Add-on shown under "more options" on the POS, e.g. extra sauce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoreOption {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MoreOptionDraft {
    pub name: String,
    pub price: i64,
    pub active: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_plan_decodes_server_shape() {
        let raw = r#"{
            "_id": "64f0c1",
            "title": "Keto Week",
            "price": 4500,
            "durationDays": 7,
            "mealsPerDay": 2,
            "items": [{"_id": "i1", "name": "Main", "options": [{"_id": "o1", "name": "Chicken"}], "maxChoices": 1}],
            "createdAt": "2024-05-01T10:00:00.000Z"
        }"#;
        let plan: MealPlan = serde_json::from_str(raw).expect("meal plan");
        assert_eq!(plan.id, "64f0c1");
        assert!(plan.active);
        assert_eq!(plan.items[0].max_choices, Some(1));
        assert_eq!(plan.items[0].options[0].extra_price, 0);
        assert!(plan.created_at.is_some());
    }

    #[test]
    fn draft_skips_empty_optionals() {
        let draft = MealPlanDraft {
            title: "Lean".into(),
            price: 100,
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).expect("json");
        assert!(json.get("description").is_none());
        assert_eq!(json["durationDays"], 0);
    }
}
