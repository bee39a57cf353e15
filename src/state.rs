use std::sync::Arc;

use url::Url;

use crate::store::LinkStore;

/// Application state shared across all request handlers
///
/// Cloned into every handler by axum; the store handle and the base URL are
/// both reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the link store
    pub store: LinkStore,

    /// Public base URL of the service, used to build full short URLs
    pub base_url: Arc<Url>,
}

impl AppState {
    pub fn new(store: LinkStore, base_url: Url) -> Self {
        Self {
            store,
            base_url: Arc::new(base_url),
        }
    }

    /// Full short URL for `code`, e.g. `http://localhost:3000/abc123`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), code)
    }

    /// Host the service is reachable under.
    pub fn own_host(&self) -> Option<&str> {
        self.base_url.host_str()
    }
}
