//! OAuth callback landing.
//!
//! After federated sign-in the provider's hosted UI redirects here with the
//! `state` parameter it echoed back. The handler's only job is to recover the
//! resume destination from that parameter and send the user there; the token
//! exchange itself already happened in the provider's client library.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use log::{info, warn};

use crate::oauth::resolve_redirect;
use crate::settings::PorticoSettings;
use crate::utils::redirect_validator::validate_post_auth_redirect;
use crate::utils::responses::ResponseBuilder;

/// OAuth callback endpoint
///
/// Never fails toward the user: a missing, empty, or garbled `state` payload
/// degrades to the configured default destination, as does a decoded
/// destination that fails redirect validation.
///
/// # Errors
///
/// This handler does not fail; all degradation paths end in a redirect
pub async fn oauth_callback(
    req: HttpRequest,
    settings: web::Data<PorticoSettings>,
) -> Result<HttpResponse> {
    let fallback = settings.routes.default_redirect.as_str();
    let destination = resolve_redirect(req.query_string(), fallback);

    let destination = if destination == fallback {
        destination
    } else {
        match validate_post_auth_redirect(&destination) {
            Ok(validated) => validated,
            Err(_) => {
                warn!("Rejected resume destination from state parameter, using fallback");
                fallback.to_string()
            }
        }
    };

    info!("OAuth callback complete, redirecting to {destination}");
    Ok(ResponseBuilder::redirect(&destination).build())
}
