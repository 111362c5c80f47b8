//! Review Repository

use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use crate::review::entity::Review;
use crate::shared::error::Result;

const COLLECTION_NAME: &str = "reviews";

/// Repository for customer reviews
#[derive(Clone)]
pub struct ReviewRepository {
    collection: Collection<Review>,
}

impl ReviewRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    /// List all reviews
    pub async fn find_all(&self) -> Result<Vec<Review>> {
        let cursor = self.collection.find(doc! {}).await?;
        let reviews = cursor.try_collect().await?;
        Ok(reviews)
    }
}
