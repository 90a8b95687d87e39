//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Expense report settings.
    #[serde(default)]
    pub expense: ExpenseConfig,
    /// Accounting dimension settings.
    #[serde(default)]
    pub dimensions: DimensionsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Expense report settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseConfig {
    /// Mode of payment that needs no payment reference.
    #[serde(default = "default_cash_mode_of_payment")]
    pub cash_mode_of_payment: String,
}

fn default_cash_mode_of_payment() -> String {
    "Cash".to_string()
}

impl Default for ExpenseConfig {
    fn default() -> Self {
        Self {
            cash_mode_of_payment: default_cash_mode_of_payment(),
        }
    }
}

/// Accounting dimension settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DimensionsConfig {
    /// Run the install-time field sync when the server starts.
    #[serde(default)]
    pub sync_on_startup: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CLAIMDESK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_toml(
            r#"
            [server]
            [database]
            url = "postgres://localhost/claimdesk"
            [jwt]
            secret = "s"
            "#,
        );

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.jwt.access_token_expiry_secs, 900);
        assert_eq!(config.expense.cash_mode_of_payment, "Cash");
        assert!(!config.dimensions.sync_on_startup);
    }

    #[test]
    fn test_expense_and_dimension_sections() {
        let config = from_toml(
            r#"
            [server]
            port = 3000
            [database]
            url = "postgres://localhost/claimdesk"
            [jwt]
            secret = "s"
            [expense]
            cash_mode_of_payment = "Petty Cash"
            [dimensions]
            sync_on_startup = true
            "#,
        );

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.expense.cash_mode_of_payment, "Petty Cash");
        assert!(config.dimensions.sync_on_startup);
    }
}
