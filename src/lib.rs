#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the portico application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod handlers;
pub mod models;
pub mod oauth;
pub mod session;
pub mod settings;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use handlers::{health, oauth_callback, profile, require_session, userinfo};
pub use models::{AuthCookies, UserInfo};
pub use oauth::{decode_custom_state, encode_custom_state, resolve_redirect, StateParam};
pub use session::{CookieField, SessionError, SessionResolver};
pub use settings::PorticoSettings;
