//! HTTP response construction
//!
//! A single place to build the responses portico emits: redirects (the
//! dominant case for an authentication gateway) and a small set of JSON error
//! bodies, with the common ones pre-serialized at startup.

use actix_web::{http::header, HttpResponse};
use serde_json::{json, Value};

/// Pre-serialized common response bodies, computed once and reused
static CACHED_RESPONSES: std::sync::LazyLock<CachedResponses> =
    std::sync::LazyLock::new(CachedResponses::new);

struct CachedResponses {
    unauthorized: String,
    invalid_request: String,
    server_error: String,
}

impl CachedResponses {
    fn new() -> Self {
        Self {
            unauthorized: Self::create_json(
                "unauthorized",
                "Authentication is required to access this resource",
            ),
            invalid_request: Self::create_json(
                "invalid_request",
                "The request is malformed or invalid",
            ),
            server_error: Self::create_json("server_error", "An internal server error occurred"),
        }
    }

    fn create_json(error: &str, description: &str) -> String {
        let body = json!({
            "error": error,
            "error_description": description
        });
        serde_json::to_string(&body).expect("Failed to serialize JSON")
    }

    fn unauthorized(&self) -> HttpResponse {
        HttpResponse::Unauthorized()
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .body(self.unauthorized.clone())
    }

    fn invalid_request(&self) -> HttpResponse {
        HttpResponse::BadRequest()
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .body(self.invalid_request.clone())
    }

    fn server_error(&self) -> HttpResponse {
        HttpResponse::InternalServerError()
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .body(self.server_error.clone())
    }
}

/// Unified response builder for redirects and error responses
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Create a redirect response (302 Found) with optional query error param
    #[must_use]
    pub fn redirect(location: &str) -> RedirectBuilder {
        RedirectBuilder::new(location)
    }

    /// Create a `BadRequest` (400) error response with optional customization
    #[must_use]
    pub fn bad_request() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(ErrorType::BadRequest)
    }

    /// Create an `Unauthorized` (401) error response with optional customization
    #[must_use]
    pub fn unauthorized() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(ErrorType::Unauthorized)
    }

    /// Create an `InternalServerError` (500) error response with optional customization
    #[must_use]
    pub fn internal_server_error() -> ErrorResponseBuilder {
        ErrorResponseBuilder::new(ErrorType::InternalServerError)
    }
}

/// Supported HTTP error response types
#[derive(Clone, Copy)]
enum ErrorType {
    BadRequest,
    Unauthorized,
    InternalServerError,
}

/// Builder for error responses with fluent interface
pub struct ErrorResponseBuilder {
    error_type: ErrorType,
    error_code: Option<String>,
    message: Option<String>,
}

impl ErrorResponseBuilder {
    fn new(error_type: ErrorType) -> Self {
        Self {
            error_type,
            error_code: None,
            message: None,
        }
    }

    /// Set a custom error code (e.g., "`malformed_session`")
    #[must_use]
    pub fn with_error_code(mut self, code: &str) -> Self {
        self.error_code = Some(code.to_string());
        self
    }

    /// Set a custom error message
    #[must_use]
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Build the final `HttpResponse`
    #[must_use]
    pub fn build(self) -> HttpResponse {
        // Uncustomized responses come from the pre-serialized cache
        if self.error_code.is_none() && self.message.is_none() {
            return match self.error_type {
                ErrorType::BadRequest => CACHED_RESPONSES.invalid_request(),
                ErrorType::Unauthorized => CACHED_RESPONSES.unauthorized(),
                ErrorType::InternalServerError => CACHED_RESPONSES.server_error(),
            };
        }

        let (default_code, default_message, mut response) = match self.error_type {
            ErrorType::BadRequest => (
                "invalid_request",
                "The request is malformed or invalid",
                HttpResponse::BadRequest(),
            ),
            ErrorType::Unauthorized => (
                "unauthorized",
                "Authentication is required to access this resource",
                HttpResponse::Unauthorized(),
            ),
            ErrorType::InternalServerError => (
                "server_error",
                "An internal server error occurred",
                HttpResponse::InternalServerError(),
            ),
        };

        let body = json!({
            "error": Value::String(self.error_code.unwrap_or_else(|| default_code.to_string())),
            "message": Value::String(self.message.unwrap_or_else(|| default_message.to_string())),
        });

        response
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .json(body)
    }
}

/// Builder for redirect responses
pub struct RedirectBuilder {
    location: String,
}

impl RedirectBuilder {
    fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
        }
    }

    /// Add an error parameter to the redirect URL
    #[must_use]
    pub fn with_error(mut self, error_param: &str) -> Self {
        self.location = if self.location.contains('?') {
            format!("{}&error={error_param}", self.location)
        } else {
            format!("{}?error={error_param}", self.location)
        };
        self
    }

    /// Build the final redirect response
    #[must_use]
    pub fn build(self) -> HttpResponse {
        HttpResponse::Found()
            .append_header(("Location", self.location))
            .finish()
    }
}
