// HTTP request handlers for the account portal gateway
pub mod auth;
pub mod callback;
pub mod health;

// Re-export the main handler functions
pub use auth::{profile, require_session, userinfo};
pub use callback::oauth_callback;
pub use health::health;
