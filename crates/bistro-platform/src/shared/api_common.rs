//! Common API types and utilities

use serde::Serialize;
use utoipa::ToSchema;

/// Standard API error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

/// Result of an insert, mirroring the driver's acknowledgement shape.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    /// Id of the inserted document. Null when nothing was inserted.
    pub inserted_id: Option<String>,
}

impl InsertResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self { inserted_id: Some(id.into()) }
    }

    pub fn none() -> Self {
        Self { inserted_id: None }
    }
}

/// Result of an update-by-id. A zero matched count means the id did not
/// exist; that is a no-op, not an error.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<mongodb::results::UpdateResult> for UpdateResponse {
    fn from(r: mongodb::results::UpdateResult) -> Self {
        Self {
            matched_count: r.matched_count,
            modified_count: r.modified_count,
        }
    }
}

/// Result of a delete. Deleting an absent id yields a zero count
/// (idempotent-delete semantics).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

impl From<mongodb::results::DeleteResult> for DeleteResponse {
    fn from(r: mongodb::results::DeleteResult) -> Self {
        Self { deleted_count: r.deleted_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_response_serializes_null_id() {
        let json = serde_json::to_string(&InsertResponse::none()).unwrap();
        assert_eq!(json, r#"{"insertedId":null}"#);
    }

    #[test]
    fn test_delete_response_field_names() {
        let json = serde_json::to_string(&DeleteResponse { deleted_count: 2 }).unwrap();
        assert_eq!(json, r#"{"deletedCount":2}"#);
    }
}
