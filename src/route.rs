//! Route definitions for the URL shortener API
//!
//! This module configures all HTTP routes and maps them to their respective handlers.

use std::path::Path;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::handler::{resolve_url, shorten_url};
use crate::state::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `POST /api/v1` - Creates a new short link
/// - `GET /{code}` - Redirects to the stored URL
/// - Static front-end files from `static_dir`, if given
///
/// Static files take precedence: a request only reaches the redirect route
/// when no file exists at its path. `/` serves `index.html` from the directory.
///
/// # Example Usage
///
/// ```no_run
/// # use shortlink::{route::create_app, state::AppState, store::LinkStore};
/// let store = LinkStore::open("data.db").unwrap();
/// let base_url = "http://localhost:3000".parse().unwrap();
/// let app = create_app(AppState::new(store, base_url), None);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState, static_dir: Option<&Path>) -> Router {
    let redirects = Router::new()
        .route("/{code}", get(resolve_url))
        .with_state(state.clone());

    let api = Router::new()
        .route("/api/v1", post(shorten_url))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(
            ServeDir::new(dir)
                .append_index_html_on_directories(true)
                .call_fallback_on_method_not_allowed(true)
                .fallback(redirects),
        ),
        None => api.merge(redirects),
    };

    app.layer(cors_layer())
}

/// Any origin may call the API, the front-end is often served elsewhere
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::POST])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}
