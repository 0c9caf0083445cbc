//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CLINIC_ROUTER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use clinic_router::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod routing;
mod server;

pub use error::{ConfigError, ValidationError};
pub use routing::RoutingConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development server. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Router bounds and flag policy
    #[serde(default)]
    pub routing: RoutingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CLINIC_ROUTER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CLINIC_ROUTER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CLINIC_ROUTER__ROUTING__FLAG_POLICY=lenient` -> `routing.flag_policy = lenient`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLINIC_ROUTER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.routing.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routing::FlagPolicy;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("CLINIC_ROUTER__SERVER__PORT");
        env::remove_var("CLINIC_ROUTER__SERVER__ENVIRONMENT");
        env::remove_var("CLINIC_ROUTER__ROUTING__FLAG_POLICY");
        env::remove_var("CLINIC_ROUTER__ROUTING__MAX_AGE_YEARS");
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.routing.flag_policy, FlagPolicy::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_routing_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLINIC_ROUTER__ROUTING__FLAG_POLICY", "lenient");
        env::set_var("CLINIC_ROUTER__ROUTING__MAX_AGE_YEARS", "18");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.routing.flag_policy, FlagPolicy::Lenient);
        assert_eq!(config.routing.max_age_years, 18.0);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLINIC_ROUTER__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLINIC_ROUTER__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
