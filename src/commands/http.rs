//! Fetch Transport
//!
//! JSON `POST`s through the browser's `fetch`, carrying the CSRF header.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

use super::{csrf_token, delete_body, order_body, AdminBackend};
use crate::config::CsrfConfig;
use crate::error::AdminError;
use crate::models::{ItemId, StatusReply};

/// [`AdminBackend`] over `window.fetch`
#[derive(Clone, Debug)]
pub struct FetchBackend {
    csrf: CsrfConfig,
}

impl FetchBackend {
    pub fn new(csrf: CsrfConfig) -> Self {
        Self { csrf }
    }

    /// POST a JSON body and read the `{status, message}` reply.
    ///
    /// Error statuses still carry a JSON reply, so the body is read either way.
    async fn post_json(&self, url: &str, body: String) -> Result<StatusReply, AdminError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_credentials(RequestCredentials::SameOrigin);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(url, &opts).map_err(AdminError::dom)?;
        let headers = request.headers();
        headers
            .set("Content-Type", "application/json")
            .map_err(AdminError::dom)?;
        // Token is read per request; the cookie may rotate while the page is open
        match csrf_token(&self.csrf) {
            Some(token) => headers.set(&self.csrf.header, &token).map_err(AdminError::dom)?,
            None => log::warn!("no CSRF token found for {}", url),
        }

        let window = web_sys::window().ok_or_else(|| AdminError::Dom("no window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(AdminError::transport)?;
        let response: Response = response.dyn_into().map_err(AdminError::transport)?;
        let http_status = response.status();

        let json = response.json().map_err(AdminError::transport)?;
        let json = JsFuture::from(json).await.map_err(|_| {
            AdminError::Transport(format!("HTTP {} with a non-JSON reply", http_status))
        })?;
        let reply: StatusReply = serde_wasm_bindgen::from_value(json)?;
        log::debug!("POST {} -> HTTP {} status={}", url, http_status, reply.status);
        Ok(reply)
    }
}

impl AdminBackend for FetchBackend {
    async fn save_order(&self, endpoint: &str, order: &[ItemId]) -> Result<(), AdminError> {
        let body = order_body(order)?;
        self.post_json(endpoint, body).await?.into_result()
    }

    async fn delete_item(&self, endpoint: &str, field: &str, id: &ItemId) -> Result<(), AdminError> {
        let body = delete_body(field, id)?;
        self.post_json(endpoint, body).await?.into_result()
    }
}
