#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use portico::{
    handlers::{health, oauth_callback, profile, userinfo},
    settings::PorticoSettings,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = PorticoSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;

    start_server(settings).await
}

/// Start the server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(settings: PorticoSettings) -> std::io::Result<()> {
    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address, &settings);

    // Configure CORS for the portal frontend
    let cors_origins = settings.get_cors_origins();

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "OPTIONS"])
            .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(settings.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure_services)
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg
        // OAuth callback landing
        .route("/auth/callback", web::get().to(oauth_callback))
        // Session-gated endpoints
        .route("/auth/userinfo", web::get().to(userinfo))
        .route("/profile", web::get().to(profile))
        // Health endpoint
        .route("/ping", web::get().to(health));
}

fn print_startup_info(bind_address: &str, settings: &PorticoSettings) {
    println!("Starting Portico account gateway on http://{bind_address}");
    println!();
    println!("Endpoints:");
    println!("  GET  /auth/callback - OAuth callback landing (resume destination)");
    println!("  GET  /auth/userinfo - User attributes from the provider session");
    println!("  GET  /profile       - Session-gated profile record");
    println!("  GET  /ping          - Health check");
    println!();
    println!(
        "Provider cookie prefix: {}",
        settings.provider.cookie_prefix
    );
    println!(
        "Sign-in path: {}  Default redirect: {}",
        settings.routes.sign_in_path, settings.routes.default_redirect
    );
}
