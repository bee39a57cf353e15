//! Data models for the URL shortener
//!
//! Request/response payloads of the HTTP API and the stored link entity.

use serde::{Deserialize, Serialize};

/// A stored mapping from a short code to its target URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    /// Unique short identifier (e.g. "abc123")
    pub code: String,

    /// The long URL the code redirects to
    pub target: String,
}

/// Request payload for `POST /api/v1`
///
/// # Example
/// ```json
/// {
///   "url": "https://example.com/very/long/url",
///   "short": "my-link"  // Optional
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ShortenRequest {
    /// The URL to shorten. A missing field is reported the same way as an
    /// empty one.
    #[serde(default)]
    pub url: String,

    /// Optional caller-chosen short code; a random one is generated otherwise
    #[serde(default)]
    pub short: Option<String>,
}

/// Response returned after a link has been created
///
/// # Example
/// ```json
/// {
///   "url": "https://example.com/very/long/url",
///   "code": "abc123",
///   "short": "http://localhost:3000/abc123"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    /// The target URL as stored
    pub url: String,

    /// The short code
    pub code: String,

    /// Full short URL built from the configured public base URL
    pub short: String,
}
