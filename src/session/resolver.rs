//! Resolution of the identity provider's cookie-stored session state.
//!
//! The provider's browser library writes one cookie namespace per signed-in
//! user: `{prefix}.LastAuthUser` names the active user, and every other field
//! lives under `{prefix}.{lastAuthUser}.{suffix}`. The resolver reads that
//! layout back into a typed [`AuthCookies`] record. It is a pure function over
//! the supplied cookie map; it performs no I/O and never mutates its input.

use std::collections::HashMap;

use log::{debug, warn};
use thiserror::Error;

use crate::models::{AuthCookies, UserData, UserInfo};

/// The fixed cookie-key suffixes written by the provider's client library.
///
/// The rendered key names must stay bit-exact for compatibility with cookies
/// the library has already written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieField {
    AccessToken,
    IdToken,
    ClockDrift,
    RefreshToken,
    LastAuthUser,
    DeviceGroupKey,
    UserData,
    RandomPassword,
    DeviceKey,
}

impl CookieField {
    /// Every per-user field, in the order they appear in [`AuthCookies`].
    /// `LastAuthUser` is not listed; it selects the namespace instead of
    /// living inside one.
    pub const SESSION_FIELDS: [Self; 8] = [
        Self::AccessToken,
        Self::IdToken,
        Self::ClockDrift,
        Self::RefreshToken,
        Self::DeviceGroupKey,
        Self::UserData,
        Self::RandomPassword,
        Self::DeviceKey,
    ];

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::AccessToken => "accessToken",
            Self::IdToken => "idToken",
            Self::ClockDrift => "clockDrift",
            Self::RefreshToken => "refreshToken",
            Self::LastAuthUser => "LastAuthUser",
            Self::DeviceGroupKey => "deviceGroupKey",
            Self::UserData => "userData",
            Self::RandomPassword => "randomPasswordKey",
            Self::DeviceKey => "deviceKey",
        }
    }
}

/// Errors from session resolution.
///
/// Absence of a session is not an error (the resolver returns `Ok(None)`);
/// only a present-but-unparseable user-data cookie is fatal, since a corrupt
/// session blob is a client-storage integrity problem the caller cannot
/// safely paper over.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("malformed user data cookie: {0}")]
    MalformedUserData(#[from] serde_json::Error),
}

/// Resolves provider session cookies for a configured cookie-key prefix.
///
/// The prefix is injected at construction so parallel instances (tests,
/// multiple tenants) can use different prefixes without shared state.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    cookie_prefix: String,
}

impl SessionResolver {
    #[must_use]
    pub fn new(cookie_prefix: impl Into<String>) -> Self {
        Self {
            cookie_prefix: cookie_prefix.into(),
        }
    }

    /// The key naming the active user: `{prefix}.LastAuthUser`.
    #[must_use]
    pub fn last_auth_user_key(&self) -> String {
        format!(
            "{}.{}",
            self.cookie_prefix,
            CookieField::LastAuthUser.suffix()
        )
    }

    /// The key for one per-user field: `{prefix}.{lastAuthUser}.{suffix}`.
    #[must_use]
    pub fn field_key(&self, last_auth_user: &str, field: CookieField) -> String {
        format!(
            "{}.{last_auth_user}.{}",
            self.cookie_prefix,
            field.suffix()
        )
    }

    /// Resolve the active session from a request's cookie map.
    ///
    /// Returns `Ok(None)` when the `LastAuthUser` cookie is absent; no other
    /// lookups are performed in that case. Individual missing fields are not
    /// errors and stay `None` in the result.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MalformedUserData`] if the user-data cookie is
    /// present but is not parseable JSON of the expected shape.
    pub fn resolve(
        &self,
        cookies: &HashMap<String, String>,
    ) -> Result<Option<AuthCookies>, SessionError> {
        let Some(last_auth_user) = cookies.get(&self.last_auth_user_key()) else {
            debug!(
                "No {} cookie present, treating request as unauthenticated",
                self.last_auth_user_key()
            );
            return Ok(None);
        };

        let field =
            |field: CookieField| cookies.get(&self.field_key(last_auth_user, field)).cloned();

        let user_data = match field(CookieField::UserData) {
            Some(raw) => {
                let document: UserData = serde_json::from_str(&raw).inspect_err(|e| {
                    warn!("User data cookie for '{last_auth_user}' is not parseable: {e}");
                })?;
                Some(UserInfo::from_attributes(&document.user_attributes))
            }
            None => None,
        };

        Ok(Some(AuthCookies {
            access_token: field(CookieField::AccessToken),
            id_token: field(CookieField::IdToken),
            clock_drift: field(CookieField::ClockDrift),
            refresh_token: field(CookieField::RefreshToken),
            device_group_key: field(CookieField::DeviceGroupKey),
            user_data,
            random_password: field(CookieField::RandomPassword),
            device_key: field(CookieField::DeviceKey),
        }))
    }
}
