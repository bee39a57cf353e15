//! HTTP request handlers for the URL shortener API
//!
//! - `shorten_url` stores a new short link
//! - `resolve_url` redirects a short code to its target
//!
//! redb calls block on disk I/O, so every store access runs on tokio's
//! blocking pool.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use tokio::task::spawn_blocking;

use crate::codegen::{gen_code, is_valid_code};
use crate::error::AppError;
use crate::model::{ShortLink, ShortenRequest, ShortenResponse};
use crate::state::AppState;
use crate::store::LinkStore;
use crate::target::normalize_target;

/// How many random codes are tried before giving up on a collision streak
pub const MAX_GENERATE_ATTEMPTS: usize = 8;

/// Creates a new short link
///
/// This handler:
/// 1. Validates the submitted URL (prepending `http://` if no scheme is given)
/// 2. Uses the custom code if one was supplied, otherwise generates a random
///    6-character code, regenerating on collision
/// 3. Stores `code -> url` and returns the code and the full short URL
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/very/long/url",
///   "short": "my-link"  // Optional
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - link stored
/// - **400 Bad Request** - unparsable body, invalid URL or invalid custom code
/// - **409 Conflict** - custom code already exists
///
/// Nothing is written to the store unless the response is 201.
pub async fn shorten_url(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let target = normalize_target(&payload.url, state.own_host())?;

    // An empty custom code means "generate one"
    let custom_code = payload.short.filter(|code| !code.is_empty());

    let store = state.store.clone();
    let link = match custom_code {
        Some(code) => {
            if !is_valid_code(&code) {
                return Err(AppError::InvalidCode(code));
            }

            let link = ShortLink { code, target };
            let (inserted, link) =
                spawn_blocking(move || store.insert_new(&link).map(|ok| (ok, link))).await??;

            if !inserted {
                return Err(AppError::CodeTaken(link.code));
            }
            link
        }
        None => spawn_blocking(move || insert_generated(&store, target, gen_code)).await??,
    };

    tracing::info!(code = %link.code, target = %link.target, "short link created");

    let response = ShortenResponse {
        short: state.short_url(&link.code),
        url: link.target,
        code: link.code,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Stores `target` under a code from `next_code`, drawing a new one each time
/// the previous code is already taken.
fn insert_generated(
    store: &LinkStore,
    target: String,
    mut next_code: impl FnMut() -> String,
) -> Result<ShortLink, AppError> {
    let mut link = ShortLink {
        code: String::new(),
        target,
    };

    for attempt in 1..=MAX_GENERATE_ATTEMPTS {
        link.code = next_code();
        if store.insert_new(&link)? {
            return Ok(link);
        }
        tracing::debug!(code = %link.code, attempt, "generated code already taken");
    }

    Err(AppError::CodeSpaceExhausted(MAX_GENERATE_ATTEMPTS))
}

/// Redirects a short code to its target URL
///
/// When a user visits `http://localhost:3000/abc123`, this handler looks up
/// "abc123" and answers with a 307 Temporary Redirect to the stored URL.
///
/// # Response
///
/// - **307 Temporary Redirect** - `Location` is the stored URL
/// - **404 Not Found** - unknown code
pub async fn resolve_url(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    // Anything outside the code alphabet can't be stored, skip the lookup
    if !is_valid_code(&code) {
        return Err(AppError::NotFound(code));
    }

    let store = state.store.clone();
    let lookup = code.clone();
    let link = spawn_blocking(move || store.get(&lookup)).await??;

    match link {
        Some(link) => {
            tracing::debug!(code = %link.code, target = %link.target, "redirecting");
            Ok(Redirect::temporary(&link.target))
        }
        None => Err(AppError::NotFound(code)),
    }
}
