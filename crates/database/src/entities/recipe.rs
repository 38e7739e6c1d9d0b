//! Recipe entity definitions

use serde::{Deserialize, Serialize};

/// Recipe entity as stored in the recipe collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub public_id: String,
    pub title: String,
    pub food_category: FoodCategory,
    pub ingredients: String,
    pub steps: String,
    pub image_url: Option<String>,
    /// Open map for extension fields beyond the fixed schema.
    pub extra: serde_json::Map<String, serde_json::Value>,
    /// Username of the owner. Not a referential pointer; it may dangle after
    /// the owning account is deleted.
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating a recipe or fully replacing its fields on edit.
/// The owner is never part of the draft; it is stamped from the session
/// identity by the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub food_category: FoodCategory,
    pub ingredients: String,
    pub steps: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Filter predicate handed opaquely to the recipe repository.
///
/// Present fields combine conjunctively; an empty filter matches every
/// recipe. Results always come back in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    pub created_by: Option<String>,
    pub food_category: Option<String>,
    pub search_term: Option<String>,
}

/// Fixed food category labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
    Soup,
    Drink,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::Breakfast,
        FoodCategory::Lunch,
        FoodCategory::Dinner,
        FoodCategory::Dessert,
        FoodCategory::Snack,
        FoodCategory::Soup,
        FoodCategory::Drink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Breakfast => "breakfast",
            FoodCategory::Lunch => "lunch",
            FoodCategory::Dinner => "dinner",
            FoodCategory::Dessert => "dessert",
            FoodCategory::Snack => "snack",
            FoodCategory::Soup => "soup",
            FoodCategory::Drink => "drink",
        }
    }

    /// Parse a stored or submitted label; unknown labels are rejected rather
    /// than mapped to a default.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "breakfast" => Some(FoodCategory::Breakfast),
            "lunch" => Some(FoodCategory::Lunch),
            "dinner" => Some(FoodCategory::Dinner),
            "dessert" => Some(FoodCategory::Dessert),
            "snack" => Some(FoodCategory::Snack),
            "soup" => Some(FoodCategory::Soup),
            "drink" => Some(FoodCategory::Drink),
            _ => None,
        }
    }

    /// Labels offered to the create/edit form.
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(FoodCategory::as_str).collect()
    }
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
