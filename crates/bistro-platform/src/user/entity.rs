//! User Entity

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::tsid::TsidGenerator;

/// User role. Stored lowercase; a closed enumeration so typos cannot grant
/// or deny access silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Email address (unique)
    pub email: String,

    /// Display name
    pub name: String,

    /// Account role; defaults to `user`, promoted only by an admin action
    #[serde(default)]
    pub role: UserRole,

    /// Argon2id PHC hash; absent for accounts created via social login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Wire representation of a user account.
///
/// The `User` serializer must keep `passwordHash` for BSON persistence, so
/// response bodies go through this view instead; credential material never
/// reaches the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: TsidGenerator::generate(),
            email: email.into(),
            name: name.into(),
            role: UserRole::User,
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("a@x.com", "Alice");
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_admin());
        assert!(user.password_hash.is_none());
        assert_eq!(user.id.len(), 13);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_unknown_role_rejected() {
        // Closed enumeration: free-text roles no longer deserialize.
        assert!(serde_json::from_str::<UserRole>("\"superadmin\"").is_err());
    }

    #[test]
    fn test_view_never_carries_password_hash() {
        let user = User::new("diner@example.com", "Diner")
            .with_password_hash("$argon2id$v=19$m=4096,t=1,p=1$salt$hash");

        let json = serde_json::to_value(UserView::from(user)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "diner@example.com");
    }

    #[test]
    fn test_persistence_model_keeps_password_hash() {
        // The entity itself must round-trip the hash into BSON.
        let user = User::new("diner@example.com", "Diner")
            .with_password_hash("$argon2id$v=19$m=4096,t=1,p=1$salt$hash");

        let doc = bson::to_document(&user).unwrap();
        assert!(doc.contains_key("passwordHash"));
    }
}
