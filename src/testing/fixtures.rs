//! Pre-built test data

use super::builders::CookieJarBuilder;
use super::constants::{TEST_COOKIE_PREFIX, TEST_EMAIL, TEST_SUB, TEST_USER};
use crate::oauth::encode_custom_state;
use crate::session::CookieField;
use crate::settings::PorticoSettings;

/// Central fixture factory for tests
pub struct TestFixtures;

impl TestFixtures {
    /// Settings wired to the test cookie prefix
    #[must_use]
    pub fn settings() -> PorticoSettings {
        let mut settings = PorticoSettings::default();
        settings.provider.cookie_prefix = TEST_COOKIE_PREFIX.to_string();
        settings
    }

    /// A compact user-data blob as the provider's library would store it.
    /// Kept free of spaces and percent signs so it survives a `Cookie` header
    /// round trip unchanged.
    #[must_use]
    pub fn user_data_json() -> String {
        format!(
            r#"{{"UserAttributes":[{{"Name":"sub","Value":"{TEST_SUB}"}},{{"Name":"email","Value":"{TEST_EMAIL}"}},{{"Name":"given_name","Value":"Test"}},{{"Name":"family_name","Value":"User"}}],"Username":"{TEST_USER}"}}"#
        )
    }

    /// A fully populated session cookie jar for the test user
    #[must_use]
    pub fn session_cookies() -> Vec<(String, String)> {
        CookieJarBuilder::new(TEST_COOKIE_PREFIX)
            .with_last_auth_user(TEST_USER)
            .with_field(TEST_USER, CookieField::AccessToken, "access-token-value")
            .with_field(TEST_USER, CookieField::IdToken, "id-token-value")
            .with_field(TEST_USER, CookieField::ClockDrift, "0")
            .with_field(TEST_USER, CookieField::RefreshToken, "refresh-token-value")
            .with_field(TEST_USER, CookieField::DeviceKey, "device-key-value")
            .with_user_data(TEST_USER, &Self::user_data_json())
            .build()
            .into_iter()
            .collect()
    }

    /// A provider-shaped `state` value carrying the given resume destination
    #[must_use]
    pub fn state_token(destination: &str) -> String {
        format!("pr0v1derR4nd0m-{}", encode_custom_state(destination))
    }
}
