//! SurrealRest Core Library
//!
//! Data model shared by SurrealRest clients:
//! - Connection configuration and protocol version selection
//! - Authentication state (Root, Token, Scope)
//! - Query results, error records and signin/signup payloads

pub mod auth;
pub mod config;
pub mod models;

// Re-export commonly used types
pub use auth::AuthState;
pub use config::{ClientConfig, ProtocolVersion};
pub use models::*;
