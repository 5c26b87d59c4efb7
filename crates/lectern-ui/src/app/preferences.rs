//! Environment helpers for the app shell.

use crate::core::config::{FALLBACK_API_BASE, api_base_url as resolve_api_base};
use crate::core::storage::{API_BASE_OVERRIDE_KEY, KeyValueStore};
use crate::services::storage::BrowserStore;
use gloo::utils::window;
use web_sys::Url;

/// REST base URL for this page, honouring a stored override.
pub(crate) fn api_base_url(storage: &BrowserStore) -> String {
    let override_base = storage.get(API_BASE_OVERRIDE_KEY);
    let Ok(href) = window().location().href() else {
        return override_base.unwrap_or_else(|| FALLBACK_API_BASE.to_string());
    };
    match Url::new(&href) {
        Ok(url) => resolve_api_base(
            &url.protocol(),
            &url.hostname(),
            &url.port(),
            override_base.as_deref(),
        ),
        Err(_) => resolve_api_base("", "", "", override_base.as_deref()),
    }
}
