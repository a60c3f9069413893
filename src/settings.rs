use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PorticoSettings {
    pub application: ApplicationSettings,
    pub provider: ProviderSettings,
    pub routes: RouteSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

/// Identity-provider integration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// The key prefix under which the provider's client library stores its
    /// session cookies, typically `{library-name}.{client-id}`. Must match
    /// the browser side exactly or no session will ever resolve.
    pub cookie_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSettings {
    /// Where unauthenticated visitors to protected pages are sent.
    pub sign_in_path: String,
    /// Where the OAuth callback lands users whose `state` carried no usable
    /// resume destination.
    pub default_redirect: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: "http://localhost:3000,http://localhost:8080".to_string(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            cookie_prefix: "CognitoIdentityServiceProvider.local-client".to_string(),
        }
    }
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            sign_in_path: "/signin".to_string(),
            default_redirect: "/profile".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl PorticoSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Logger initialization fails
    /// - Settings file cannot be read or parsed
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        // Initialize environment and logging
        Self::initialize_environment()?;

        // Load base settings from TOML or defaults
        let mut settings = Self::load_base_settings()?;

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut settings);

        Ok(settings)
    }

    /// Initialize environment variables and logging
    ///
    /// # Errors
    ///
    /// Returns an error if logger initialization fails
    fn initialize_environment() -> Result<(), Box<dyn std::error::Error>> {
        Self::load_env_file();
        env_logger::try_init()?;
        Ok(())
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `PORTICO_CONFIG_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read or parsed
    fn load_base_settings() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::default();

        let default_config_path = std::path::PathBuf::from("Settings.toml");
        if default_config_path.exists() {
            let toml_content = fs::read_to_string(&default_config_path)?;
            settings = basic_toml::from_str(&toml_content)?;
            println!(
                "✓ Loaded base settings from {}",
                default_config_path.display()
            );
        }

        if let Ok(config_dir) = std::env::var("PORTICO_CONFIG_DIR") {
            let config_path = std::path::Path::new(&config_dir).join("Settings.toml");
            if config_path.exists() {
                let config_toml_content = fs::read_to_string(&config_path)?;
                settings = basic_toml::from_str(&config_toml_content)?;
                println!("✓ Overriding settings from {}", config_path.display());
            } else {
                println!(
                    "ℹ PORTICO_CONFIG_DIR set but no Settings.toml found at: {}",
                    config_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_application_env_overrides(&mut settings.application);
        Self::apply_provider_env_overrides(&mut settings.provider);
        Self::apply_route_env_overrides(&mut settings.routes);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    /// Apply environment overrides for application settings
    fn apply_application_env_overrides(app_settings: &mut ApplicationSettings) {
        if let Ok(host) = std::env::var("HOST") {
            app_settings.host = host;
        }
        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                app_settings.port = port;
            }
        }
        if let Ok(cors_origins) = std::env::var("CORS_ORIGINS") {
            app_settings.cors_origins = cors_origins;
        }
    }

    /// Apply environment overrides for provider settings
    fn apply_provider_env_overrides(provider_settings: &mut ProviderSettings) {
        if let Ok(cookie_prefix) = std::env::var("COOKIE_PREFIX") {
            provider_settings.cookie_prefix = cookie_prefix;
        }
    }

    /// Apply environment overrides for route settings
    fn apply_route_env_overrides(route_settings: &mut RouteSettings) {
        if let Ok(sign_in_path) = std::env::var("SIGN_IN_PATH") {
            route_settings.sign_in_path = sign_in_path;
        }
        if let Ok(default_redirect) = std::env::var("DEFAULT_REDIRECT") {
            route_settings.default_redirect = default_redirect;
        }
    }

    /// Apply environment overrides for logging settings
    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }

    /// Get the bind address for the server
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }

    /// Get CORS origins as a vector of strings
    #[must_use]
    pub fn get_cors_origins(&self) -> Vec<String> {
        self.application
            .cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .collect()
    }
}
