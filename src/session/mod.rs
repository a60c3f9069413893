//! Provider session-cookie handling.
//!
//! # Modules
//!
//! - [`resolver`] - Reads the provider client library's cookie namespace into
//!   a typed session record

pub mod resolver;

// Re-export commonly used items for convenience
pub use resolver::{CookieField, SessionError, SessionResolver};
