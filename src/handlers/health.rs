use actix_web::{HttpResponse, Result};

use crate::models::HealthResponse;

/// Health check endpoint
///
/// # Errors
///
/// This handler does not fail
pub async fn health() -> Result<HttpResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        message: "Portico account gateway is running".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}
