//! Payment Entity

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::tsid::TsidGenerator;

/// A recorded payment. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Paying customer's email
    pub email: String,

    /// Total paid, in major currency units
    pub price: f64,

    /// Processor transaction reference
    pub transaction_id: String,

    /// Cart lines settled by this payment
    pub cart_id: Vec<String>,

    /// Menu items purchased
    pub menu_id: Vec<String>,

    /// Processor-side status as reported at checkout
    pub status: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    #[schema(value_type = String, format = DateTime)]
    pub date: DateTime<Utc>,
}

/// Checkout request body
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub email: String,
    pub price: f64,
    pub transaction_id: String,
    pub cart_id: Vec<String>,
    pub menu_id: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "pending".to_string()
}

impl Payment {
    pub fn from_request(req: PaymentRequest) -> Self {
        Self {
            id: TsidGenerator::generate(),
            email: req.email,
            price: req.price,
            transaction_id: req.transaction_id,
            cart_id: req.cart_id,
            menu_id: req.menu_id,
            status: req.status,
            date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_status_pending() {
        let json = r#"{
            "email": "a@x.com",
            "price": 26.5,
            "transactionId": "pi_123",
            "cartId": ["0HZX3KQJG0003"],
            "menuId": ["0HZX3KQJG0001"]
        }"#;
        let req: PaymentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, "pending");
        assert_eq!(req.transaction_id, "pi_123");
    }

    #[test]
    fn test_payment_wire_field_names() {
        let payment = Payment::from_request(PaymentRequest {
            email: "a@x.com".to_string(),
            price: 26.5,
            transaction_id: "pi_123".to_string(),
            cart_id: vec!["c1".to_string()],
            menu_id: vec!["m1".to_string()],
            status: "pending".to_string(),
        });
        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["transactionId"], "pi_123");
        assert!(json["cartId"].is_array());
        assert!(json["menuId"].is_array());
    }
}
