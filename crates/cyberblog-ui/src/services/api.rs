//! HTTP client helpers (toggle endpoints).

use crate::core::cookie::{CSRF_HEADER, CSRF_INPUT_SELECTOR, resolve_csrf_token};
use crate::core::error::ApiError;
use cyberblog_api_models::{LikeResponse, SubscribeResponse, like_path, subscribe_path};
use gloo::utils::document;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlInputElement};

#[derive(Clone, Debug, Default)]
pub(crate) struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Client for same-origin endpoints.
    pub(crate) fn same_origin() -> Self {
        Self::default()
    }

    async fn post_toggle<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let token = csrf_token();
        let response = Request::post(&format!("{}{}", self.base_url, path))
            .header(CSRF_HEADER, &token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        if let Some(err) = ApiError::from_status(response.status()) {
            return Err(err);
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub(crate) async fn toggle_like(&self, post_id: &str) -> Result<LikeResponse, ApiError> {
        self.post_toggle(&like_path(post_id)).await
    }

    pub(crate) async fn toggle_subscribe(
        &self,
        username: &str,
    ) -> Result<SubscribeResponse, ApiError> {
        self.post_toggle(&subscribe_path(username)).await
    }
}

/// Cookie token first, then the hidden form field, else empty.
fn csrf_token() -> String {
    let doc = document();
    let cookies = doc
        .dyn_ref::<HtmlDocument>()
        .and_then(|html| html.cookie().ok())
        .unwrap_or_default();
    let form_field = doc
        .query_selector(CSRF_INPUT_SELECTOR)
        .ok()
        .flatten()
        .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value());
    resolve_csrf_token(&cookies, form_field)
}
