//! Fluent builders for creating test objects

use std::collections::HashMap;

use crate::session::CookieField;

/// Builds the name→value cookie map a request would carry, using the same key
/// naming the provider's client library uses.
pub struct CookieJarBuilder {
    prefix: String,
    cookies: HashMap<String, String>,
}

impl CookieJarBuilder {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            cookies: HashMap::new(),
        }
    }

    /// Name the active user via the `LastAuthUser` cookie
    #[must_use]
    pub fn with_last_auth_user(mut self, user: &str) -> Self {
        self.cookies.insert(
            format!("{}.{}", self.prefix, CookieField::LastAuthUser.suffix()),
            user.to_string(),
        );
        self
    }

    /// Set one per-user session field
    #[must_use]
    pub fn with_field(mut self, user: &str, field: CookieField, value: &str) -> Self {
        self.cookies.insert(
            format!("{}.{user}.{}", self.prefix, field.suffix()),
            value.to_string(),
        );
        self
    }

    /// Set the raw user-data blob for a user
    #[must_use]
    pub fn with_user_data(self, user: &str, raw: &str) -> Self {
        self.with_field(user, CookieField::UserData, raw)
    }

    /// Insert an arbitrary cookie untouched
    #[must_use]
    pub fn with_raw(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> HashMap<String, String> {
        self.cookies
    }
}
