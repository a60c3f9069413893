//! Codec for the application payload carried through the OAuth `state`
//! parameter.
//!
//! When federated sign-in starts, the application embeds the page the user
//! should resume on after the round trip. The hosted provider prepends its own
//! random component, producing `{provider_random}-{custom_hex}` on the
//! callback. Only the application payload is ours to interpret: two lowercase
//! hex digits per byte, no delimiter. The provider random is discarded.
//!
//! Decode failures are never fatal. A `state` that carries no payload, or a
//! garbled one, simply means the caller falls back to its default
//! destination.

use log::{debug, warn};

/// Encode a redirect destination for embedding in an OAuth `state` parameter.
///
/// Each byte of the destination is rendered as exactly two lowercase hex
/// digits, concatenated without a delimiter. The federated sign-in call sends
/// this as its `customState`; [`decode_custom_state`] inverts it.
#[must_use]
pub fn encode_custom_state(destination: &str) -> String {
    use std::fmt::Write as _;

    destination.bytes().fold(
        String::with_capacity(destination.len() * 2),
        |mut encoded, byte| {
            let _ = write!(encoded, "{byte:02x}");
            encoded
        },
    )
}

/// Recover the embedded destination from one raw `state` value.
///
/// Returns `None` when the value contains no `-` (no payload was embedded) or
/// when the payload decodes to an empty string. The text before the first `-`
/// is the provider's random component and is discarded, never interpreted.
#[must_use]
pub fn decode_custom_state(state: &str) -> Option<String> {
    let (_provider_random, payload) = state.split_once('-')?;
    let decoded = decode_hex_payload(payload);
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

/// Hex-decode the custom payload, permissively.
///
/// Malformed input (odd length, non-hex digits) yields an empty string rather
/// than an error; the user still lands on the fallback destination either
/// way. Each two-digit group becomes the character with that code, matching
/// the encoding side byte for byte.
fn decode_hex_payload(payload: &str) -> String {
    if payload.len() % 2 != 0 {
        warn!("Discarding odd-length state payload ({} chars)", payload.len());
        return String::new();
    }

    let mut decoded = String::with_capacity(payload.len() / 2);
    for group in payload.as_bytes().chunks(2) {
        let Some(code) = std::str::from_utf8(group)
            .ok()
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
        else {
            warn!("Discarding state payload with non-hex digits");
            return String::new();
        };
        decoded.push(char::from(code));
    }
    decoded
}

/// A `state` query parameter as a query-string parser may yield it: a single
/// value, or several when the parameter repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateParam {
    Single(String),
    Multiple(Vec<String>),
}

impl StateParam {
    /// Recover the embedded destination, if any.
    ///
    /// For repeated parameters the first element that decodes to a non-empty
    /// destination wins; elements without a payload are skipped.
    #[must_use]
    pub fn decode(&self) -> Option<String> {
        match self {
            Self::Single(state) => decode_custom_state(state),
            Self::Multiple(states) => {
                states.iter().map(String::as_str).find_map(decode_custom_state)
            }
        }
    }
}

/// Resolve where the user should land after an OAuth callback.
///
/// Parses the raw callback query string, applies the state codec to every
/// `state` occurrence, and returns the decoded destination or `fallback` when
/// no usable payload is present. This never fails; any parse problem degrades
/// to `fallback`.
#[must_use]
pub fn resolve_redirect(query: &str, fallback: &str) -> String {
    let states: Vec<String> = url::form_urlencoded::parse(query.as_bytes())
        .filter(|(name, _)| name == "state")
        .map(|(_, value)| value.into_owned())
        .collect();

    let state = match states.len() {
        0 => {
            debug!("No state parameter in callback query, using fallback destination");
            return fallback.to_string();
        }
        1 => StateParam::Single(states.into_iter().next().unwrap_or_default()),
        _ => StateParam::Multiple(states),
    };

    state
        .decode()
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_custom_state() {
        assert_eq!(encode_custom_state("Hello"), "48656c6c6f");
        assert_eq!(encode_custom_state("/profile"), "2f70726f66696c65");
        assert_eq!(encode_custom_state(""), "");
    }

    #[test]
    fn test_round_trip_printable_ascii() {
        let destinations = [
            "/profile",
            "/profile?tab=devices&page=2",
            "/a b/c",
            "https://accounts.example.com/verifyemail",
            "!\"#$%&'()*+,-./0123456789:;<=>?@[\\]^_`{|}~",
        ];

        for destination in destinations {
            let state = format!("provider_random-{}", encode_custom_state(destination));
            assert_eq!(
                decode_custom_state(&state).as_deref(),
                Some(destination),
                "round trip failed for {destination}"
            );
        }
    }

    #[test]
    fn test_decode_custom_state() {
        assert_eq!(
            decode_custom_state("abc123-48656c6c6f").as_deref(),
            Some("Hello")
        );
        // No separator means no payload was embedded
        assert_eq!(decode_custom_state("abc123"), None);
        // Separator but empty payload
        assert_eq!(decode_custom_state("abc123-"), None);
    }

    #[test]
    fn test_decode_splits_on_first_separator_only() {
        // "Hello-World" encodes with a 2d byte in the payload; the provider
        // random is only the text before the first separator
        let state = format!("r4nd0m-{}", encode_custom_state("Hello-World"));
        assert_eq!(decode_custom_state(&state).as_deref(), Some("Hello-World"));
    }

    #[test]
    fn test_malformed_payload_decodes_to_absent() {
        // Odd length
        assert_eq!(decode_custom_state("r1-48656c6c6"), None);
        // Non-hex digits
        assert_eq!(decode_custom_state("r1-4865zz6c6f"), None);
        // Hex decode is lenient about uppercase digits
        assert_eq!(decode_custom_state("r1-48656C6C6F").as_deref(), Some("Hello"));
    }

    #[test]
    fn test_state_param_single() {
        let state = StateParam::Single("abc123-48656c6c6f".to_string());
        assert_eq!(state.decode().as_deref(), Some("Hello"));

        let no_payload = StateParam::Single("abc123".to_string());
        assert_eq!(no_payload.decode(), None);
    }

    #[test]
    fn test_state_param_multiple_first_non_empty_wins() {
        let state = StateParam::Multiple(vec![
            "r1-".to_string(),
            "r2-776f726c64".to_string(),
            "r3-48656c6c6f".to_string(),
        ]);
        assert_eq!(state.decode().as_deref(), Some("world"));

        let all_empty = StateParam::Multiple(vec!["r1-".to_string(), "r2".to_string()]);
        assert_eq!(all_empty.decode(), None);
    }

    #[test]
    fn test_resolve_redirect_with_state() {
        assert_eq!(
            resolve_redirect("state=xyz-48656c6c6f", "/profile"),
            "Hello"
        );
    }

    #[test]
    fn test_resolve_redirect_without_state_uses_fallback() {
        assert_eq!(resolve_redirect("foo=bar", "/profile"), "/profile");
        assert_eq!(resolve_redirect("", "/profile"), "/profile");
    }

    #[test]
    fn test_resolve_redirect_malformed_payload_uses_fallback() {
        assert_eq!(resolve_redirect("state=xyz-zzzz", "/profile"), "/profile");
        assert_eq!(resolve_redirect("state=xyz", "/profile"), "/profile");
    }

    #[test]
    fn test_resolve_redirect_repeated_state_parameters() {
        assert_eq!(
            resolve_redirect("state=r1-&state=r2-776f726c64", "/profile"),
            "world"
        );
    }

    #[test]
    fn test_resolve_redirect_url_decodes_values() {
        // A percent-encoded state value is decoded by the query parser before
        // the codec sees it
        let encoded = urlencoding::encode("xyz-48656c6c6f").into_owned();
        assert_eq!(
            resolve_redirect(&format!("code=abc&state={encoded}"), "/profile"),
            "Hello"
        );
    }
}
