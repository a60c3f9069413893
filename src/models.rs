use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Session fields the identity provider's client library stores in browser
/// cookies, resolved for one request.
///
/// Token and key fields are verbatim copies of the cookie values; nothing is
/// trimmed, decoded, or validated here. Token validity is the provider's
/// concern. A session may be partially populated (e.g. mid-challenge), so
/// every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCookies {
    pub access_token: Option<String>,
    pub id_token: Option<String>,
    pub clock_drift: Option<String>,
    pub refresh_token: Option<String>,
    pub device_group_key: Option<String>,
    /// Decoded from the `userData` cookie when present.
    pub user_data: Option<UserInfo>,
    pub random_password: Option<String>,
    pub device_key: Option<String>,
}

/// Flat user record derived from the provider's user-attribute list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub sub: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
}

impl UserInfo {
    /// Copy the recognized attributes into a flat record.
    ///
    /// Names are matched by exact, case-sensitive equality and unrecognized
    /// names are ignored. Each match unconditionally overwrites the prior
    /// value, so when a name repeats the last occurrence wins.
    #[must_use]
    pub fn from_attributes(attributes: &[UserAttribute]) -> Self {
        let mut info = Self::default();
        for attribute in attributes {
            let value = Some(attribute.value.clone());
            match attribute.name.as_str() {
                "sub" => info.sub = value,
                "name" => info.name = value,
                "email" => info.email = value,
                "family_name" => info.family_name = value,
                "given_name" => info.given_name = value,
                _ => {}
            }
        }
        info
    }
}

/// Schema for the serialized user-data blob stored client-side by the
/// provider's library. Extra fields are tolerated; a missing or malformed
/// attribute list is not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    #[serde(rename = "UserAttributes")]
    pub user_attributes: Vec<UserAttribute>,
    #[serde(rename = "Username", default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// One `{Name, Value}` pair from the user-data blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttribute {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl UserAttribute {
    #[must_use]
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
