//! Cart Entity

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::tsid::TsidGenerator;

/// One dish in a customer's cart. Name, price, and image are snapshots of
/// the menu item at add time so later menu edits do not reprice carts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Owning customer's email
    pub email: String,

    /// Referenced menu item ID
    pub menu_id: String,

    pub name: String,
    pub price: f64,
    pub image: String,
}

/// Fields accepted when adding to the cart
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub email: String,
    pub menu_id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
}

impl CartLine {
    pub fn from_input(input: CartLineInput) -> Self {
        Self {
            id: TsidGenerator::generate(),
            email: input.email,
            menu_id: input.menu_id,
            name: input.name,
            price: input.price,
            image: input.image,
        }
    }
}
