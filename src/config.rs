//! Service configuration loaded from environment variables.
//!
//! Loaded once at startup (after `.env` has been read) and validated before
//! the server starts.
//!
//! - `APP_PORT` - listen address: `3000`, `:3000` or `host:port` (default: `:3000`)
//! - `DATABASE_URL` - path of the redb file (default: `data.db`)
//! - `DOMAIN` - public base URL used in short links (default: `http://localhost:<port>`)
//! - `STATIC_DIR` - front-end directory served at `/` (default: `../ui`, empty disables)
//! - `RUST_LOG` - tracing filter (default: [`DEFAULT_LOG_FILTER`])

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use url::Url;

pub const DEFAULT_LOG_FILTER: &str = "shortlink=debug,tower_http=debug";

const DEFAULT_APP_PORT: &str = ":3000";
const DEFAULT_DATABASE_PATH: &str = "data.db";
const DEFAULT_STATIC_DIR: &str = "../ui";

#[derive(Debug, Clone)]
pub struct Config {
    /// Address handed to the TCP listener, always `host:port`
    pub listen_addr: String,
    pub port: u16,
    pub database_path: String,
    pub base_url: Url,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `APP_PORT` or `DOMAIN` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let app_port = env::var("APP_PORT").unwrap_or_else(|_| DEFAULT_APP_PORT.to_string());
        let (host, port) = parse_listen_addr(&app_port)?;

        let database_path =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());

        let base_url = match env::var("DOMAIN") {
            Ok(domain) if !domain.trim().is_empty() => parse_base_url(&domain)?,
            _ => parse_base_url(&format!("http://localhost:{port}"))?,
        };

        let static_dir = match env::var("STATIC_DIR") {
            Ok(dir) if dir.is_empty() => None,
            Ok(dir) => Some(PathBuf::from(dir)),
            Err(_) => Some(PathBuf::from(DEFAULT_STATIC_DIR)),
        };

        Ok(Self {
            listen_addr: format!("{host}:{port}"),
            port,
            database_path,
            base_url,
            static_dir,
        })
    }
}

/// Splits a listen address into host and port.
///
/// A bare port (`3000`) or a port with a leading colon (`:3000`) binds every
/// interface.
pub fn parse_listen_addr(value: &str) -> Result<(String, u16)> {
    let value = value.trim();

    let (host, port) = match value.rsplit_once(':') {
        Some(("", port)) => ("0.0.0.0", port),
        Some((host, port)) => (host, port),
        None => ("0.0.0.0", value),
    };

    let port: u16 = port
        .parse()
        .with_context(|| format!("APP_PORT must be a port or host:port, got '{value}'"))?;

    Ok((host.to_string(), port))
}

/// Parses the public base URL, prepending `http://` when no scheme is given.
pub fn parse_base_url(value: &str) -> Result<Url> {
    let value = value.trim();
    let with_scheme = if value.contains("://") {
        value.to_string()
    } else {
        format!("http://{value}")
    };

    let url = Url::parse(&with_scheme)
        .with_context(|| format!("DOMAIN must be a valid URL, got '{value}'"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("DOMAIN must use http or https, got '{value}'");
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_addr_forms() {
        assert_eq!(parse_listen_addr("3000").unwrap(), ("0.0.0.0".to_string(), 3000));
        assert_eq!(parse_listen_addr(":8080").unwrap(), ("0.0.0.0".to_string(), 8080));
        assert_eq!(
            parse_listen_addr("127.0.0.1:9000").unwrap(),
            ("127.0.0.1".to_string(), 9000)
        );
    }

    #[test]
    fn test_listen_addr_rejects_garbage() {
        assert!(parse_listen_addr("").is_err());
        assert!(parse_listen_addr("abc").is_err());
        assert!(parse_listen_addr(":70000").is_err());
    }

    #[test]
    fn test_base_url_adds_scheme() {
        let url = parse_base_url("short.ly").unwrap();
        assert_eq!(url.as_str(), "http://short.ly/");
        assert_eq!(url.host_str(), Some("short.ly"));
    }

    #[test]
    fn test_base_url_keeps_https() {
        let url = parse_base_url("https://s.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://short.ly").is_err());
    }
}
