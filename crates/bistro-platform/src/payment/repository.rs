//! Payment Repository

use bson::doc;
use futures::TryStreamExt;
use mongodb::{ClientSession, Collection, Database};
use tracing::debug;

use crate::payment::entity::Payment;
use crate::shared::error::Result;

const COLLECTION_NAME: &str = "payments";

/// Repository for recorded payments
#[derive(Clone)]
pub struct PaymentRepository {
    collection: Collection<Payment>,
}

impl PaymentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    /// Record a payment inside a session transaction
    pub async fn insert_in_session(
        &self,
        payment: &Payment,
        session: &mut ClientSession,
    ) -> Result<()> {
        self.collection
            .insert_one(payment)
            .session(&mut *session)
            .await?;
        debug!(payment_id = %payment.id, email = %payment.email, "Payment recorded");
        Ok(())
    }

    /// Payment history for one customer
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<Payment>> {
        let cursor = self.collection.find(doc! { "email": email }).await?;
        let payments = cursor.try_collect().await?;
        Ok(payments)
    }

    /// Fast approximate count of payment documents
    pub async fn estimated_count(&self) -> Result<u64> {
        let count = self.collection.estimated_document_count().await?;
        Ok(count)
    }
}
