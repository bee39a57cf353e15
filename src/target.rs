//! Validation of URLs submitted for shortening.

use url::Url;

/// Reasons a submitted URL is refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("url is required")]
    Empty,

    #[error("invalid url: {0}")]
    InvalidFormat(String),

    #[error("only http and https urls can be shortened")]
    UnsupportedScheme,

    #[error("url must include a host")]
    MissingHost,

    #[error("urls pointing at this service cannot be shortened")]
    SelfReferential,
}

/// Validates `input` and returns the string to store as the link target.
///
/// Surrounding whitespace is trimmed and `http://` is prepended when the input
/// does not start with a scheme (a leading `//` is dropped first). Apart from that the input is stored verbatim, so a
/// resolved link redirects to exactly what was submitted. Input containing
/// anything but visible ASCII is replaced by its percent-encoded serialization
/// instead, since it has to fit in a `Location` header.
///
/// `own_host` is the host the service is reachable under; links to it are
/// refused since they would redirect back into the shortener.
///
/// # Examples
///
/// ```
/// use shortlink::target::normalize_target;
///
/// assert_eq!(
///     normalize_target("example.com/page", None).unwrap(),
///     "http://example.com/page"
/// );
/// assert!(normalize_target("ftp://example.com", None).is_err());
/// ```
pub fn normalize_target(input: &str, own_host: Option<&str>) -> Result<String, TargetError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TargetError::Empty);
    }

    let target = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        let rest = trimmed.trim_start_matches('/');
        format!("http://{rest}")
    };

    let url = Url::parse(&target).map_err(|e| TargetError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetError::UnsupportedScheme),
    }

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(TargetError::MissingHost),
    };

    if let Some(own) = own_host {
        if same_host(host, own) {
            return Err(TargetError::SelfReferential);
        }
    }

    if target.bytes().all(|b| b.is_ascii_graphic()) {
        Ok(target)
    } else {
        Ok(url.to_string())
    }
}

/// Whether `input` starts with `scheme://`, where the scheme is an ASCII
/// letter followed by letters, digits, `+`, `-` or `.`.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

fn same_host(a: &str, b: &str) -> bool {
    let strip = |h: &str| -> String {
        let lower = h.to_ascii_lowercase();
        match lower.strip_prefix("www.") {
            Some(rest) => rest.to_string(),
            None => lower,
        }
    };
    strip(a) == strip(b)
}
