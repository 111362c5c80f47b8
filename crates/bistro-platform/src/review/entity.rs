//! Review Entity

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A customer review shown on the landing page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Reviewer display name
    pub name: String,

    /// Review text
    pub details: String,

    /// Star rating, 0 to 5
    pub rating: f64,
}
