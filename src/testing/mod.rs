//! Unified testing utilities for Portico
//!
//! Consolidates test fixtures and builders into one location so unit tests
//! and integration tests share the same data.
//!
//! ## Organization
//!
//! - [`fixtures`] - Pre-built test data (settings, cookie jars, state tokens)
//! - [`builders`] - Fluent builders for creating test objects

pub mod builders;
pub mod fixtures;

// Re-export commonly used items for convenience
pub use builders::CookieJarBuilder;
pub use fixtures::TestFixtures;

/// Common test constants
pub mod constants {
    /// Cookie prefix used by test fixtures
    pub const TEST_COOKIE_PREFIX: &str = "CognitoIdentityServiceProvider.test-client";

    /// Default test user id (the `LastAuthUser` value)
    pub const TEST_USER: &str = "test-user";

    /// Default test email address
    pub const TEST_EMAIL: &str = "test@example.com";

    /// Default test subject id
    pub const TEST_SUB: &str = "0000-1111-2222";
}
