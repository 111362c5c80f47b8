//! Cart Repository

use bson::doc;
use futures::TryStreamExt;
use mongodb::{ClientSession, Collection, Database};
use tracing::debug;

use crate::cart::entity::CartLine;
use crate::shared::error::Result;

const COLLECTION_NAME: &str = "cart";

/// Repository for cart lines
#[derive(Clone)]
pub struct CartRepository {
    collection: Collection<CartLine>,
}

impl CartRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    /// Add a line to a cart
    pub async fn insert(&self, line: &CartLine) -> Result<()> {
        self.collection.insert_one(line).await?;
        debug!(line_id = %line.id, email = %line.email, "Cart line inserted");
        Ok(())
    }

    /// All lines belonging to one customer
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<CartLine>> {
        let cursor = self.collection.find(doc! { "email": email }).await?;
        let lines = cursor.try_collect().await?;
        Ok(lines)
    }

    /// Delete one line; returns the number of documents removed
    pub async fn delete(&self, id: &str) -> Result<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    /// Delete every line whose id is in `ids`, inside a session transaction.
    /// Used by checkout so the cart only empties if the payment persists.
    pub async fn delete_many_in_session(
        &self,
        ids: &[String],
        session: &mut ClientSession,
    ) -> Result<u64> {
        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": ids } })
            .session(&mut *session)
            .await?;
        Ok(result.deleted_count)
    }
}
