//! Admin Endpoint Commands
//!
//! Frontend bindings to the admin's AJAX endpoints, organized by concern.

mod csrf;
mod http;

use serde_json::{Map, Value};

use crate::error::AdminError;
use crate::models::{ItemId, OrderPayload};

pub use csrf::*;
pub use http::*;

/// Write side of the admin. One call is one request.
pub trait AdminBackend {
    /// Persist the complete order of one list
    async fn save_order(&self, endpoint: &str, order: &[ItemId]) -> Result<(), AdminError>;

    /// Delete a single item, sending its id under `field`
    async fn delete_item(&self, endpoint: &str, field: &str, id: &ItemId) -> Result<(), AdminError>;
}

pub fn order_body(order: &[ItemId]) -> Result<String, AdminError> {
    Ok(serde_json::to_string(&OrderPayload { order })?)
}

pub fn delete_body(field: &str, id: &ItemId) -> Result<String, AdminError> {
    let mut body = Map::new();
    body.insert(field.to_string(), serde_json::to_value(id)?);
    Ok(serde_json::to_string(&Value::Object(body))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_body() {
        let body = order_body(&[ItemId::Int(2), ItemId::Int(1)]).unwrap();
        assert_eq!(body, r#"{"order":[2,1]}"#);
    }

    #[test]
    fn test_delete_body_uses_field_name() {
        assert_eq!(delete_body("photo_id", &ItemId::Int(9)).unwrap(), r#"{"photo_id":9}"#);
        assert_eq!(
            delete_body("id", &ItemId::Text("n-3".into())).unwrap(),
            r#"{"id":"n-3"}"#
        );
    }
}
