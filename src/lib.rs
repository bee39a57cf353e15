//! Library exports for the URL shortener
//!
//! The binary in `main.rs` only wires configuration, logging and the server
//! around these modules; tests use them directly.

pub mod codegen;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod route;
pub mod state;
pub mod store;
pub mod target;
