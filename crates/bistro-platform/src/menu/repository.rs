//! Menu Repository

use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::debug;

use crate::menu::entity::{MenuItem, MenuItemInput};
use crate::shared::error::Result;

const COLLECTION_NAME: &str = "menu";

/// Repository for menu items
#[derive(Clone)]
pub struct MenuRepository {
    collection: Collection<MenuItem>,
}

impl MenuRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    /// List the whole menu
    pub async fn find_all(&self) -> Result<Vec<MenuItem>> {
        let cursor = self.collection.find(doc! {}).await?;
        let items = cursor.try_collect().await?;
        Ok(items)
    }

    /// Find a single dish by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<MenuItem>> {
        let item = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(item)
    }

    /// Insert a new dish
    pub async fn insert(&self, item: &MenuItem) -> Result<()> {
        self.collection.insert_one(item).await?;
        debug!(item_id = %item.id, name = %item.name, "Menu item inserted");
        Ok(())
    }

    /// Replace the editable fields of a dish; returns (matched, modified)
    pub async fn update(&self, id: &str, input: &MenuItemInput) -> Result<(u64, u64)> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "name": &input.name,
                    "recipe": &input.recipe,
                    "image": &input.image,
                    "category": &input.category,
                    "price": input.price,
                } },
            )
            .await?;
        Ok((result.matched_count, result.modified_count))
    }

    /// Delete a dish; returns the number of documents removed
    pub async fn delete(&self, id: &str) -> Result<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    /// Fast approximate count of menu documents
    pub async fn estimated_count(&self) -> Result<u64> {
        let count = self.collection.estimated_document_count().await?;
        Ok(count)
    }
}
