//! User Repository
//!
//! MongoDB-backed storage for user accounts.

use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::debug;

use crate::shared::error::Result;
use crate::user::entity::{User, UserRole};

const COLLECTION_NAME: &str = "users";

/// Repository for user accounts
#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    /// Insert a new user
    pub async fn insert(&self, user: &User) -> Result<()> {
        self.collection.insert_one(user).await?;
        debug!(user_id = %user.id, email = %user.email, "User inserted");
        Ok(())
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(user)
    }

    /// List all users
    pub async fn find_all(&self) -> Result<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users = cursor.try_collect().await?;
        Ok(users)
    }

    /// Delete a user by ID; returns the number of documents removed
    pub async fn delete(&self, id: &str) -> Result<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    /// Set the role of a user; returns (matched, modified)
    pub async fn set_role(&self, id: &str, role: UserRole) -> Result<(u64, u64)> {
        let role_value = bson::to_bson(&role)?;
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "role": role_value } })
            .await?;
        Ok((result.matched_count, result.modified_count))
    }

    /// Fast approximate count of user documents
    pub async fn estimated_count(&self) -> Result<u64> {
        let count = self.collection.estimated_document_count().await?;
        Ok(count)
    }
}
