//! Frontend Models
//!
//! Row identifiers and the request/reply payloads exchanged with the admin.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AdminError;

/// How a list's id attribute is parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    /// Integer primary keys; anything else is malformed
    #[default]
    Int,
    /// Any non-blank text
    String,
}

/// Stable row identifier, sent as a bare JSON number or string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Text(String),
}

impl ItemId {
    /// Parse a raw attribute value. `None` means the row is malformed.
    pub fn parse(raw: &str, kind: IdKind) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match kind {
            IdKind::Int => raw.parse::<i64>().ok().map(ItemId::Int),
            IdKind::String => Some(ItemId::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(id) => write!(f, "{}", id),
            ItemId::Text(id) => f.write_str(id),
        }
    }
}

/// Body of a reorder request: the complete new order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPayload<'a> {
    pub order: &'a [ItemId],
}

/// Reply from any admin AJAX endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusReply {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusReply {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    pub fn into_result(self) -> Result<(), AdminError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(AdminError::Rejected {
                message: self.message.unwrap_or_else(|| "Unknown error".to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_ids() {
        assert_eq!(ItemId::parse("42", IdKind::Int), Some(ItemId::Int(42)));
        assert_eq!(ItemId::parse(" 7 ", IdKind::Int), Some(ItemId::Int(7)));
        assert_eq!(ItemId::parse("abc", IdKind::Int), None);
        assert_eq!(ItemId::parse("", IdKind::Int), None);
        assert_eq!(ItemId::parse("4.5", IdKind::Int), None);
    }

    #[test]
    fn test_parse_string_ids() {
        assert_eq!(ItemId::parse("a-1", IdKind::String), Some(ItemId::Text("a-1".into())));
        assert_eq!(ItemId::parse("   ", IdKind::String), None);
    }

    #[test]
    fn test_order_payload_json() {
        let order = vec![ItemId::Int(3), ItemId::Int(1), ItemId::Text("x".into())];
        let json = serde_json::to_string(&OrderPayload { order: &order }).unwrap();
        assert_eq!(json, r#"{"order":[3,1,"x"]}"#);
    }

    #[test]
    fn test_status_reply() {
        let ok: StatusReply = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(ok.into_result().is_ok());

        let err: StatusReply = serde_json::from_str(r#"{"status":"error","message":"Not found"}"#).unwrap();
        match err.into_result() {
            Err(AdminError::Rejected { message }) => assert_eq!(message, "Not found"),
            other => panic!("unexpected {:?}", other),
        }

        let bare: StatusReply = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert_eq!(
            bare.into_result().unwrap_err().to_string(),
            "Server rejected the request: Unknown error"
        );
    }
}
