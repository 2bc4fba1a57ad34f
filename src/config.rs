//! Page Configuration
//!
//! The admin template may embed
//! `<script type="application/json" id="admin-reorder-config">` to describe
//! its lists. Without it the built-in defaults cover the event/note
//! changelists and the event photo inline.

use std::str::FromStr;

use leptos_dragdrop::{Placement, RowSelectors, DRAG_THRESHOLD_PX};
use log::LevelFilter;
use serde::Deserialize;

use crate::error::AdminError;
use crate::models::{IdKind, ItemId};

/// Id of the script element holding the JSON config
pub const CONFIG_ELEMENT_ID: &str = "admin-reorder-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub lists: Vec<ListConfig>,
    pub delete: Option<DeleteConfig>,
    pub csrf: CsrfConfig,
    /// How long a toast stays up
    pub notice_ms: u32,
    pub log_level: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            lists: vec![
                // Event and note changelists share the same markup
                ListConfig::new("#result_list tbody", "reorder/"),
                ListConfig {
                    handle: ".photo-drag-handle".to_string(),
                    id_attribute: "data-photo-id".to_string(),
                    weight_field: Some(r#"input[name$="-order"]"#.to_string()),
                    success_message: "Photo order saved".to_string(),
                    ..ListConfig::new(".inline-group tbody", "/admin/blog/event/reorder-photos/")
                },
            ],
            delete: Some(DeleteConfig::new("/admin/blog/event/delete-photo/{id}/")),
            csrf: CsrfConfig::default(),
            notice_ms: 2000,
            log_level: "info".to_string(),
        }
    }
}

impl AdminConfig {
    pub fn from_json(json: &str) -> Result<Self, AdminError> {
        let config: AdminConfig =
            serde_json::from_str(json).map_err(|e| AdminError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AdminError> {
        for (idx, list) in self.lists.iter().enumerate() {
            list.validate()
                .map_err(|field| AdminError::Config(format!("lists[{}].{} must not be empty", idx, field)))?;
        }
        if let Some(delete) = &self.delete {
            delete
                .validate()
                .map_err(|field| AdminError::Config(format!("delete.{} must not be empty", field)))?;
        }
        Ok(())
    }

    /// Unknown names fall back to `info`
    pub fn level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    /// Config embedded in the page, or the defaults when there is none
    pub fn load_from_page() -> Result<Self, AdminError> {
        let embedded = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match embedded {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json),
            _ => Ok(Self::default()),
        }
    }
}

/// One reorderable list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListConfig {
    pub container: String,
    pub endpoint: String,
    #[serde(default = "default_row")]
    pub row: String,
    #[serde(default = "default_handle")]
    pub handle: String,
    #[serde(default = "default_id_attribute")]
    pub id_attribute: String,
    #[serde(default)]
    pub id_kind: IdKind,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default = "default_threshold")]
    pub drag_threshold: i32,
    /// Per-row input that receives the sort weight after a reorder
    #[serde(default)]
    pub weight_field: Option<String>,
    #[serde(default)]
    pub weight_base: i64,
    #[serde(default = "default_weight_step")]
    pub weight_step: i64,
    #[serde(default = "default_success_message")]
    pub success_message: String,
    /// Restore the previous order when saving fails
    #[serde(default)]
    pub rollback_on_failure: bool,
}

fn default_row() -> String {
    "tr".to_string()
}

fn default_handle() -> String {
    ".drag-handle".to_string()
}

fn default_id_attribute() -> String {
    "data-id".to_string()
}

fn default_threshold() -> i32 {
    DRAG_THRESHOLD_PX
}

fn default_weight_step() -> i64 {
    10
}

fn default_success_message() -> String {
    "Order saved".to_string()
}

impl ListConfig {
    pub fn new(container: &str, endpoint: &str) -> Self {
        Self {
            container: container.to_string(),
            endpoint: endpoint.to_string(),
            row: default_row(),
            handle: default_handle(),
            id_attribute: default_id_attribute(),
            id_kind: IdKind::default(),
            placement: Placement::default(),
            drag_threshold: default_threshold(),
            weight_field: None,
            weight_base: 0,
            weight_step: default_weight_step(),
            success_message: default_success_message(),
            rollback_on_failure: false,
        }
    }

    pub fn selectors(&self) -> RowSelectors {
        RowSelectors {
            container: self.container.clone(),
            row: self.row.clone(),
            handle: self.handle.clone(),
            id_attribute: self.id_attribute.clone(),
        }
    }

    pub fn parse_id(&self, raw: &str) -> Option<ItemId> {
        ItemId::parse(raw, self.id_kind)
    }

    /// Name of the first blank required field
    fn validate(&self) -> Result<(), &'static str> {
        let required = [
            ("container", &self.container),
            ("endpoint", &self.endpoint),
            ("row", &self.row),
            ("handle", &self.handle),
            ("id_attribute", &self.id_attribute),
        ];
        match required.iter().find(|(_, v)| v.trim().is_empty()) {
            Some((name, _)) => Err(*name),
            None => Ok(()),
        }
    }
}

/// Single-item delete buttons
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeleteConfig {
    /// May contain `{id}`, replaced by the item id
    pub endpoint: String,
    #[serde(default = "default_delete_button")]
    pub button: String,
    #[serde(default = "default_delete_id_attribute")]
    pub id_attribute: String,
    #[serde(default)]
    pub id_kind: IdKind,
    /// JSON body field carrying the id
    #[serde(default = "default_delete_field")]
    pub field: String,
    #[serde(default = "default_confirm_message")]
    pub confirm_message: String,
    /// Row removed after a successful delete
    #[serde(default = "default_row")]
    pub row: String,
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u32,
}

fn default_delete_button() -> String {
    ".photo-delete-btn".to_string()
}

fn default_delete_id_attribute() -> String {
    "data-photo-id".to_string()
}

fn default_delete_field() -> String {
    "photo_id".to_string()
}

fn default_confirm_message() -> String {
    "Delete this photo?".to_string()
}

fn default_fade_ms() -> u32 {
    300
}

impl DeleteConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            button: default_delete_button(),
            id_attribute: default_delete_id_attribute(),
            id_kind: IdKind::default(),
            field: default_delete_field(),
            confirm_message: default_confirm_message(),
            row: default_row(),
            fade_ms: default_fade_ms(),
        }
    }

    pub fn endpoint_for(&self, id: &ItemId) -> String {
        self.endpoint.replace("{id}", &id.to_string())
    }

    fn validate(&self) -> Result<(), &'static str> {
        let required = [
            ("endpoint", &self.endpoint),
            ("button", &self.button),
            ("id_attribute", &self.id_attribute),
            ("field", &self.field),
            ("row", &self.row),
        ];
        match required.iter().find(|(_, v)| v.trim().is_empty()) {
            Some((name, _)) => Err(*name),
            None => Ok(()),
        }
    }
}

/// Where the anti-forgery token comes from and where it goes
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    pub field_name: String,
    pub cookie_name: String,
    pub header: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            field_name: "csrfmiddlewaretoken".to_string(),
            cookie_name: "csrftoken".to_string(),
            header: "X-CSRFToken".to_string(),
        }
    }
}
