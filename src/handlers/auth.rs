//! Session-gated handlers.
//!
//! Every server-rendered protected page runs the session gate first: resolve
//! the provider's cookies, and either hand the session to the page or produce
//! the response that turns the visitor away (a sign-in redirect for page
//! navigation, a 401 for API-style endpoints).

use actix_web::{web, HttpRequest, HttpResponse, Result};
use log::{debug, error};

use crate::models::AuthCookies;
use crate::session::SessionResolver;
use crate::settings::PorticoSettings;
use crate::utils::cookie_utils::{log_cookie_names, request_cookie_map};
use crate::utils::responses::ResponseBuilder;

/// Resolve the provider session for a request, or produce the redirect that
/// sends the visitor to sign-in.
///
/// The sign-in redirect carries the originally requested path as a
/// `redirect_uri` query parameter so the sign-in page can resume there after
/// authentication completes.
///
/// # Errors
///
/// Returns the response to send instead of the page: a 302 to the sign-in
/// path when no session exists, or a 401 when the session cookies are present
/// but corrupt.
pub fn require_session(
    req: &HttpRequest,
    settings: &PorticoSettings,
) -> std::result::Result<AuthCookies, HttpResponse> {
    let resolver = SessionResolver::new(settings.provider.cookie_prefix.as_str());
    let cookies = request_cookie_map(req);

    match resolver.resolve(&cookies) {
        Ok(Some(session)) => Ok(session),
        Ok(None) => {
            debug!("No provider session for {}, redirecting to sign-in", req.path());
            Err(sign_in_redirect(req, settings))
        }
        Err(e) => {
            error!("Session resolution failed for {}: {e}", req.path());
            Err(ResponseBuilder::unauthorized()
                .with_error_code("malformed_session")
                .with_message("Session cookies could not be decoded")
                .build())
        }
    }
}

fn sign_in_redirect(req: &HttpRequest, settings: &PorticoSettings) -> HttpResponse {
    let destination = format!(
        "{}?redirect_uri={}",
        settings.routes.sign_in_path,
        urlencoding::encode(req.path())
    );
    ResponseBuilder::redirect(&destination).build()
}

/// Gated profile endpoint - the "require authenticated session" consumer
///
/// Unauthenticated visitors are redirected to sign-in with a resume
/// parameter; authenticated ones get their resolved session record.
///
/// # Errors
///
/// This handler does not fail; gate outcomes are encoded as responses
pub async fn profile(
    req: HttpRequest,
    settings: web::Data<PorticoSettings>,
) -> Result<HttpResponse> {
    match require_session(&req, &settings) {
        Ok(session) => Ok(HttpResponse::Ok().json(session)),
        Err(response) => Ok(response),
    }
}

/// Userinfo endpoint - returns the user attributes resolved from the
/// provider's `userData` cookie
///
/// Unlike [`profile`], this is an API-style endpoint: absence of a session is
/// a 401, never a redirect.
///
/// # Errors
///
/// This handler does not fail; gate outcomes are encoded as responses
pub async fn userinfo(
    req: HttpRequest,
    settings: web::Data<PorticoSettings>,
) -> Result<HttpResponse> {
    let resolver = SessionResolver::new(settings.provider.cookie_prefix.as_str());
    let cookies = request_cookie_map(&req);

    match resolver.resolve(&cookies) {
        Ok(Some(session)) => session.user_data.map_or_else(
            || {
                debug!("Session present but no userData cookie, returning 401");
                Ok(ResponseBuilder::unauthorized().build())
            },
            |info| Ok(HttpResponse::Ok().json(info)),
        ),
        Ok(None) => {
            debug!("Userinfo endpoint: no provider session");
            log_cookie_names(&req);
            Ok(ResponseBuilder::unauthorized().build())
        }
        Err(e) => {
            error!("Userinfo endpoint: corrupt user data cookie: {e}");
            Ok(ResponseBuilder::unauthorized()
                .with_error_code("malformed_session")
                .with_message("Session cookies could not be decoded")
                .build())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestFixtures;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    #[test]
    fn test_require_session_redirects_to_sign_in() {
        let settings = TestFixtures::settings();
        let req = TestRequest::get().uri("/changepassword").to_http_request();

        let result = require_session(&req, &settings);
        let response = result.expect_err("no cookies should fail the gate");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get("Location").unwrap(),
            "/signin?redirect_uri=%2Fchangepassword"
        );
    }

    #[test]
    fn test_require_session_passes_with_cookies() {
        let settings = TestFixtures::settings();
        let mut req = TestRequest::get().uri("/profile");
        for (name, value) in TestFixtures::session_cookies() {
            req = req.cookie(actix_web::cookie::Cookie::new(name, value));
        }

        let session = require_session(&req.to_http_request(), &settings)
            .expect("populated cookie jar should pass the gate");
        assert!(session.access_token.is_some());
        assert!(session.user_data.is_some());
    }

    #[test]
    fn test_require_session_corrupt_user_data_is_unauthorized() {
        let settings = TestFixtures::settings();
        let prefix = settings.provider.cookie_prefix.clone();
        let req = TestRequest::get()
            .uri("/profile")
            .cookie(actix_web::cookie::Cookie::new(
                format!("{prefix}.LastAuthUser"),
                "u1",
            ))
            .cookie(actix_web::cookie::Cookie::new(
                format!("{prefix}.u1.userData"),
                "notjson",
            ))
            .to_http_request();

        let response = require_session(&req, &settings).expect_err("corrupt blob should fail");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
