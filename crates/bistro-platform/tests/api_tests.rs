//! Platform API Integration Tests
//!
//! Tests for domain models, token handling, wire shapes, and error mapping.

use std::collections::HashSet;

use bistro_platform::{BistroError, TsidGenerator, User, UserRole, UserView};

// Unit tests for domain models
mod domain_tests {
    use super::*;
    use bistro_platform::{CartLine, CartLineInput, MenuItem, MenuItemInput, Payment, PaymentRequest};

    #[test]
    fn test_user_creation() {
        let user = User::new("diner@example.com", "Diner");
        assert_eq!(user.email, "diner@example.com");
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_admin());
        assert!(user.password_hash.is_none());
    }

    #[test]
    fn test_user_with_password_hash() {
        let user = User::new("diner@example.com", "Diner")
            .with_password_hash("$argon2id$fake");
        assert_eq!(user.password_hash.as_deref(), Some("$argon2id$fake"));
    }

    #[test]
    fn test_password_hash_never_serialized_when_absent() {
        let user = User::new("diner@example.com", "Diner");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_user_view_hides_stored_credentials() {
        // Password-registered accounts carry a hash in the store; the wire
        // view the admin listing returns must not include it.
        let user = User::new("diner@example.com", "Diner")
            .with_password_hash("$argon2id$v=19$m=4096,t=1,p=1$salt$hash");

        let json = serde_json::to_value(UserView::from(user)).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["email"], "diner@example.com");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_role_round_trip_lowercase() {
        let admin: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(admin, UserRole::Admin);
        assert_eq!(serde_json::to_string(&admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_role_is_closed_enumeration() {
        assert!(serde_json::from_str::<UserRole>("\"owner\"").is_err());
        assert!(serde_json::from_str::<UserRole>("\"ADMIN\"").is_err());
    }

    #[test]
    fn test_menu_item_wire_shape() {
        let item = MenuItem::from_input(MenuItemInput {
            name: "Escalope de Veau".to_string(),
            recipe: "Veal, butter, lemon".to_string(),
            image: "https://img.example/veau.jpg".to_string(),
            category: "offered".to_string(),
            price: 12.5,
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["_id"], serde_json::Value::String(item.id.clone()));
        assert_eq!(json["category"], "offered");
        assert_eq!(json["price"], 12.5);
    }

    #[test]
    fn test_cart_line_snapshot_fields() {
        let line = CartLine::from_input(CartLineInput {
            email: "diner@example.com".to_string(),
            menu_id: "0HZX3KQJG0001".to_string(),
            name: "Escalope de Veau".to_string(),
            price: 12.5,
            image: "https://img.example/veau.jpg".to_string(),
        });
        assert_eq!(line.menu_id, "0HZX3KQJG0001");
        assert_eq!(line.price, 12.5);

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["menuId"], "0HZX3KQJG0001");
        assert_eq!(json["email"], "diner@example.com");
    }

    #[test]
    fn test_payment_from_request() {
        let payment = Payment::from_request(PaymentRequest {
            email: "diner@example.com".to_string(),
            price: 25.0,
            transaction_id: "pi_3OaX".to_string(),
            cart_id: vec!["c1".to_string(), "c2".to_string()],
            menu_id: vec!["m1".to_string(), "m2".to_string()],
            status: "pending".to_string(),
        });
        assert_eq!(payment.id.len(), 13);
        assert_eq!(payment.cart_id.len(), 2);
        assert_eq!(payment.status, "pending");
    }
}

// Token issuance and validation tests
mod token_tests {
    use super::*;
    use bistro_platform::{AuthConfig, AuthService};

    fn service() -> AuthService {
        AuthService::new(AuthConfig {
            secret_key: "integration-test-secret".to_string(),
            issuer: "bistro".to_string(),
            token_expiry_secs: 3600,
        })
    }

    #[test]
    fn test_token_round_trip() {
        let service = service();
        let user = User::new("diner@example.com", "Diner");

        let token = service.issue_token(&user).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "diner@example.com");
        assert_eq!(claims.name, "Diner");
    }

    #[test]
    fn test_token_carries_one_hour_expiry() {
        let service = service();
        let user = User::new("diner@example.com", "Diner");

        let claims = service
            .validate_token(&service.issue_token(&user).unwrap())
            .unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = service();
        let user = User::new("diner@example.com", "Diner");

        let mut token = service.issue_token(&user).unwrap();
        token.push('x');

        assert!(matches!(
            service.validate_token(&token),
            Err(BistroError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let other = AuthService::new(AuthConfig {
            secret_key: "integration-test-secret".to_string(),
            issuer: "someone-else".to_string(),
            token_expiry_secs: 3600,
        });
        let user = User::new("diner@example.com", "Diner");
        let token = other.issue_token(&user).unwrap();

        assert!(service().validate_token(&token).is_err());
    }
}

// Password hashing tests
mod password_tests {
    use bistro_platform::auth::password_service::{Argon2Config, PasswordPolicy};
    use bistro_platform::PasswordService;

    #[test]
    fn test_register_then_login_flow() {
        let service = PasswordService::new(Argon2Config::testing(), PasswordPolicy::default());

        let hash = service.hash_password("table-for-two").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify_password("table-for-two", &hash).unwrap());
        assert!(!service.verify_password("table-for-one", &hash).unwrap());
    }
}

// Minor-unit conversion tests
mod payment_amount_tests {
    use bistro_platform::payment::stripe::to_minor_units;

    #[test]
    fn test_whole_dollar_amounts() {
        assert_eq!(to_minor_units(25.00), 2500);
        assert_eq!(to_minor_units(1.0), 100);
    }

    #[test]
    fn test_fractional_cents_truncate() {
        assert_eq!(to_minor_units(10.999), 1099);
        assert_eq!(to_minor_units(19.99), 1998);
        assert_eq!(to_minor_units(0.009), 0);
    }
}

// TSID generation tests
mod tsid_tests {
    use super::*;

    #[test]
    fn test_tsid_format() {
        let id = TsidGenerator::generate();

        // TSID should be 13 characters in Crockford Base32
        assert_eq!(id.len(), 13);

        // Should only contain valid Crockford Base32 characters (uppercase)
        assert!(id.chars().all(|c| {
            matches!(c, '0'..='9' | 'A'..='H' | 'J'..='K' | 'M'..='N' | 'P'..='T' | 'V'..='Z')
        }));
    }

    #[test]
    fn test_tsid_uniqueness() {
        let ids: HashSet<String> = (0..1000).map(|_| TsidGenerator::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_tsid_sortability() {
        let id1 = TsidGenerator::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = TsidGenerator::generate();

        // Newer IDs should sort after older ones lexicographically
        assert!(id2 > id1, "id2 ({}) should be greater than id1 ({})", id2, id1);
    }
}

// Error handling tests
mod error_tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_not_found_error() {
        let err = BistroError::not_found("MenuItem", "0HZX3KQJG0009");
        let msg = err.to_string();
        assert!(msg.contains("MenuItem"));
        assert!(msg.contains("0HZX3KQJG0009"));
    }

    #[test]
    fn test_validation_error() {
        let err = BistroError::validation("email must not be empty");
        assert!(err.to_string().contains("email must not be empty"));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (BistroError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (BistroError::TokenExpired, StatusCode::UNAUTHORIZED),
            (BistroError::forbidden("forbidden access"), StatusCode::FORBIDDEN),
            (BistroError::not_found("User", "u1"), StatusCode::NOT_FOUND),
            (BistroError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                BistroError::payment_provider("card declined upstream"),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, expected) in cases {
            let response = err.into_response();
            assert_eq!(response.status(), expected);
        }
    }
}

// Wire DTO tests
mod wire_tests {
    use bistro_platform::api::{DeleteResponse, InsertResponse, UpdateResponse};

    #[test]
    fn test_insert_response_shapes() {
        assert_eq!(
            serde_json::to_string(&InsertResponse::new("abc")).unwrap(),
            r#"{"insertedId":"abc"}"#
        );
        assert_eq!(
            serde_json::to_string(&InsertResponse::none()).unwrap(),
            r#"{"insertedId":null}"#
        );
    }

    #[test]
    fn test_update_response_shape() {
        let json = serde_json::to_string(&UpdateResponse {
            matched_count: 1,
            modified_count: 1,
        })
        .unwrap();
        assert_eq!(json, r#"{"matchedCount":1,"modifiedCount":1}"#);
    }

    #[test]
    fn test_idempotent_delete_shape() {
        let json = serde_json::to_string(&DeleteResponse { deleted_count: 0 }).unwrap();
        assert_eq!(json, r#"{"deletedCount":0}"#);
    }
}
