//! Validation of post-authentication redirect destinations.
//!
//! The resume destination recovered from an OAuth `state` parameter is
//! attacker-influencable text, so it is validated before the user is sent
//! there. Portico's policy is strict: a destination must be a relative path
//! within the application. Absolute URLs, protocol-relative URLs, traversal
//! sequences, and control characters are all rejected, including in their
//! percent-encoded forms.

use actix_web::HttpResponse;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::responses::ResponseBuilder;

// Path traversal, in any casing
static PATH_TRAVERSAL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.\.").unwrap());

// Scheme prefixes and protocol-relative (`//host`) forms that would leave the
// application
static PROTOCOL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:[a-z][a-z0-9+.-]*:)|(?:/{2,})").unwrap());

// Control characters, header-injection escapes, backslashes, and invisible
// Unicode that can disguise a foreign destination
static SUSPICIOUS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\x00-\x1F\x7F-\x9F]|%(?:00|0[aAdD]|09|5c)|\\|[\u{200E}\u{200F}\u{2060}-\u{2064}\u{2000}-\u{200A}]").unwrap()
});

const MAX_REDIRECT_LENGTH: usize = 2048;

/// Validate a post-authentication redirect destination.
///
/// Returns the destination unchanged when it is an in-application relative
/// path free of attack patterns.
///
/// # Errors
///
/// Returns a 400 `HttpResponse` when the destination is absolute, too long,
/// or matches a traversal, protocol, or control-character pattern in any of
/// its decoded forms.
pub fn validate_post_auth_redirect(redirect_url: &str) -> Result<String, HttpResponse> {
    debug!("Validating post-authentication redirect: {redirect_url}");

    if redirect_url.len() > MAX_REDIRECT_LENGTH {
        warn!(
            "Excessively long redirect destination: {} characters",
            redirect_url.len()
        );
        return Err(invalid_redirect_error());
    }

    if !is_relative_url(redirect_url) {
        warn!("Rejecting non-relative redirect destination: {redirect_url}");
        return Err(invalid_redirect_error());
    }

    // Check the raw value and its decoded variants so percent-encoding cannot
    // hide an attack
    for variant in decoded_variants(redirect_url) {
        if PATH_TRAVERSAL_PATTERN.is_match(&variant) {
            warn!("Path traversal in redirect destination: {redirect_url} -> {variant}");
            return Err(invalid_redirect_error());
        }
        if PROTOCOL_PATTERN.is_match(&variant) {
            warn!("Protocol injection in redirect destination: {redirect_url} -> {variant}");
            return Err(invalid_redirect_error());
        }
        if SUSPICIOUS_PATTERN.is_match(&variant) {
            warn!("Suspicious pattern in redirect destination: {redirect_url} -> {variant}");
            return Err(invalid_redirect_error());
        }
        if contains_dangerous_protocol(&variant.to_lowercase()) {
            warn!("Dangerous protocol in redirect destination: {redirect_url} -> {variant}");
            return Err(invalid_redirect_error());
        }
    }

    debug!("Validated redirect destination: {redirect_url}");
    Ok(redirect_url.to_string())
}

/// A destination is relative when it starts with a single `/` and carries no
/// scheme
fn is_relative_url(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.contains(':')
}

/// The value itself plus up to two rounds of percent-decoding, stopping when
/// decoding reaches a fixed point
fn decoded_variants(redirect_url: &str) -> Vec<String> {
    let mut variants = Vec::with_capacity(3);
    variants.push(redirect_url.to_string());

    if let Ok(decoded) = urlencoding::decode(redirect_url) {
        let decoded = decoded.into_owned();
        if decoded != redirect_url {
            if let Ok(double_decoded) = urlencoding::decode(&decoded) {
                let double_decoded = double_decoded.into_owned();
                if double_decoded != decoded {
                    variants.push(double_decoded);
                }
            }
            variants.push(decoded);
        }
    }

    variants
}

fn contains_dangerous_protocol(text: &str) -> bool {
    const DANGEROUS_PROTOCOLS: &[&str] =
        &["javascript:", "vbscript:", "data:", "file:", "ftp:"];

    DANGEROUS_PROTOCOLS
        .iter()
        .any(|protocol| text.contains(protocol))
}

fn invalid_redirect_error() -> HttpResponse {
    ResponseBuilder::bad_request()
        .with_error_code("invalid_redirect")
        .with_message("The redirect URL is invalid or potentially unsafe")
        .build()
}
