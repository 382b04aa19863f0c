//! # Customer Types
//!
//! Local customer records. Customers are created via the CRUD API and are
//! never deleted; the only mutation after creation is linking a payment
//! token obtained from the gateway.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer record held in the in-memory store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique customer identifier (generated, `cust-` prefixed)
    pub id: String,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Optional phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Gateway token linked to this customer, if any.
    /// Serialized as an explicit `null` until linked.
    pub token_id: Option<String>,
}

impl Customer {
    /// Create a new customer with a generated identifier and no token
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            id: generate_id("cust"),
            name: name.into(),
            email: email.into(),
            phone,
            token_id: None,
        }
    }
}

/// Generate a prefixed short identifier (e.g. `cust-1a2b3c4d`)
pub(crate) fn generate_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().to_string();
    format!("{}-{}", prefix, &uuid[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_has_no_token() {
        let customer = Customer::new("Alice Johnson", "alice@example.com", None);
        assert!(customer.id.starts_with("cust-"));
        assert_eq!(customer.id.len(), "cust-".len() + 8);
        assert!(customer.token_id.is_none());
    }

    #[test]
    fn test_token_id_serializes_as_null() {
        let customer = Customer::new("Alice", "alice@example.com", Some("555-1234".into()));
        let json = serde_json::to_value(&customer).unwrap();
        assert!(json.get("tokenId").unwrap().is_null());
        assert_eq!(json.get("phone").unwrap(), "555-1234");
    }

    #[test]
    fn test_phone_omitted_when_absent() {
        let customer = Customer::new("Bob", "bob@example.com", None);
        let json = serde_json::to_value(&customer).unwrap();
        assert!(json.get("phone").is_none());
    }
}
