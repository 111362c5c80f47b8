//! Analytics Repository
//!
//! Aggregation pipelines over the payments collection. Pipelines return raw
//! documents, deserialized into typed rows at the edge.

use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::error::Result;

/// Revenue and order count per menu category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryStat {
    pub category: String,

    /// Units sold in this category
    pub quantity: i64,

    /// Sum of listed item prices over units sold
    pub revenue: f64,
}

/// Repository for analytics pipelines
#[derive(Clone)]
pub struct StatsRepository {
    payments: Collection<Document>,
}

impl StatsRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            payments: db.collection("payments"),
        }
    }

    /// Total revenue across all payments; 0 when none exist
    pub async fn total_revenue(&self) -> Result<f64> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": null,
                "totalRevenue": { "$sum": "$price" }
            }
        }];

        let mut cursor = self.payments.aggregate(pipeline).await?;
        let revenue = match cursor.try_next().await? {
            Some(doc) => doc.get_f64("totalRevenue").unwrap_or(0.0),
            None => 0.0,
        };
        Ok(revenue)
    }

    /// Units sold and revenue per menu category.
    ///
    /// Unwinds each payment's purchased item ids, joins against the menu
    /// (string ids on both sides), and groups by category. Revenue is the
    /// listed item price per purchased unit.
    pub async fn category_breakdown(&self) -> Result<Vec<CategoryStat>> {
        let pipeline = vec![
            doc! { "$unwind": "$menuId" },
            doc! { "$lookup": {
                "from": "menu",
                "localField": "menuId",
                "foreignField": "_id",
                "as": "menuItems"
            } },
            doc! { "$unwind": "$menuItems" },
            doc! { "$group": {
                "_id": "$menuItems.category",
                "quantity": { "$sum": 1 },
                "revenue": { "$sum": "$menuItems.price" }
            } },
            doc! { "$project": {
                "_id": 0,
                "category": "$_id",
                "quantity": 1,
                "revenue": 1
            } },
        ];

        let mut cursor = self.payments.aggregate(pipeline).await?;
        let mut stats = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            stats.push(bson::from_document(doc)?);
        }
        Ok(stats)
    }
}
