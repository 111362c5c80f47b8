//! Menu Item Entity

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::tsid::TsidGenerator;

/// A dish on the menu
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Dish name
    pub name: String,

    /// Ingredient / preparation description
    pub recipe: String,

    /// Image URL
    pub image: String,

    /// Menu section, e.g. "salad", "pizza", "dessert"
    pub category: String,

    /// Price in major currency units
    pub price: f64,
}

/// Fields accepted when creating or editing a dish
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemInput {
    pub name: String,
    pub recipe: String,
    pub image: String,
    pub category: String,
    pub price: f64,
}

impl MenuItem {
    pub fn from_input(input: MenuItemInput) -> Self {
        Self {
            id: TsidGenerator::generate(),
            name: input.name,
            recipe: input.recipe,
            image: input.image,
            category: input.category,
            price: input.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_assigns_id() {
        let item = MenuItem::from_input(MenuItemInput {
            name: "Caesar Salad".to_string(),
            recipe: "Romaine, croutons, parmesan".to_string(),
            image: "https://img.example/caesar.jpg".to_string(),
            category: "salad".to_string(),
            price: 12.5,
        });
        assert_eq!(item.id.len(), 13);
        assert_eq!(item.category, "salad");
    }

    #[test]
    fn test_id_serializes_as_underscore_id() {
        let item = MenuItem {
            id: "0HZX3KQJG0001".to_string(),
            name: "Tiramisu".to_string(),
            recipe: "Mascarpone, espresso".to_string(),
            image: "https://img.example/tiramisu.jpg".to_string(),
            category: "dessert".to_string(),
            price: 8.0,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["_id"], "0HZX3KQJG0001");
        assert!(json.get("id").is_none());
    }
}
