//! Test doubles shared by the unit tests

use std::cell::RefCell;

use crate::commands::AdminBackend;
use crate::error::AdminError;
use crate::models::ItemId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    SaveOrder { endpoint: String, order: Vec<ItemId> },
    Delete { endpoint: String, field: String, id: ItemId },
}

/// Records every request; optionally rejects them all
#[derive(Default)]
pub struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    reject_with: Option<String>,
}

impl RecordingBackend {
    pub fn rejecting(message: &str) -> Self {
        Self {
            reject_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn reply(&self) -> Result<(), AdminError> {
        match &self.reject_with {
            Some(message) => Err(AdminError::Rejected { message: message.clone() }),
            None => Ok(()),
        }
    }
}

impl AdminBackend for RecordingBackend {
    async fn save_order(&self, endpoint: &str, order: &[ItemId]) -> Result<(), AdminError> {
        self.calls.borrow_mut().push(Call::SaveOrder {
            endpoint: endpoint.to_string(),
            order: order.to_vec(),
        });
        self.reply()
    }

    async fn delete_item(&self, endpoint: &str, field: &str, id: &ItemId) -> Result<(), AdminError> {
        self.calls.borrow_mut().push(Call::Delete {
            endpoint: endpoint.to_string(),
            field: field.to_string(),
            id: id.clone(),
        });
        self.reply()
    }
}

pub fn int_ids(raw: &[i64]) -> Vec<ItemId> {
    raw.iter().copied().map(ItemId::Int).collect()
}
