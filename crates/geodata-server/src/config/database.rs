//! Database configuration for the RDS PostgreSQL connection.

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Database configuration loaded from environment variables.
///
/// Environment variables are prefixed with `POSTGRES_`:
/// - `POSTGRES_HOST`: Database host (default: "localhost")
/// - `POSTGRES_PORT`: Database port (default: "5432")
/// - `POSTGRES_USER`: Database user (default: "geo")
/// - `POSTGRES_PASSWORD`: Database password
/// - `POSTGRES_DATABASE`: Database name (default: "geodata")
/// - `POSTGRES_IAM_AUTH`: Authenticate with an RDS IAM token instead of the password
/// - `POSTGRES_REGION`: AWS region for token generation (default: "eu-west-1")
/// - `POSTGRES_AWS_PROFILE`: Named AWS credentials profile (optional)
/// - `POSTGRES_SSL_ROOT_CERT`: Path to a CA bundle for server certificate validation
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database host
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port
    #[serde(default = "default_port")]
    pub port: String,

    /// Database user
    #[serde(default = "default_user")]
    pub user: String,

    /// Database password (ignored when IAM authentication is enabled)
    #[serde(default = "default_password")]
    pub password: String,

    /// Database name
    #[serde(default = "default_database")]
    pub database: String,

    /// Maximum connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout: u64,

    /// Use a short-lived RDS IAM authentication token as the password
    #[serde(default)]
    pub iam_auth: bool,

    /// AWS region used when generating the IAM token
    #[serde(default = "default_region")]
    pub region: String,

    /// Named AWS credentials profile (falls back to the default chain)
    #[serde(default)]
    pub aws_profile: Option<String>,

    /// Path to a CA bundle (e.g. rds-combined-ca-bundle.pem)
    #[serde(default)]
    pub ssl_root_cert: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> String {
    "5432".to_string()
}

fn default_user() -> String {
    "geo".to_string()
}

fn default_password() -> String {
    "TGL2022!!".to_string()
}

fn default_database() -> String {
    "geodata".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_region() -> String {
    "eu-west-1".to_string()
}

impl DatabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `POSTGRES_`.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("POSTGRES_").from_env::<DatabaseConfig>()
    }

    /// Database port as a number.
    pub fn port_number(&self) -> u16 {
        self.port.parse().unwrap_or(5432)
    }

    /// Get PostgreSQL connection options using the configured password.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.connect_options_with_password(&self.password)
    }

    /// Get PostgreSQL connection options with an explicit password.
    ///
    /// Used for IAM authentication, where the password is a freshly
    /// generated token rather than the configured value.
    pub fn connect_options_with_password(&self, password: &str) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port_number())
            .username(&self.user)
            .password(password)
            .database(&self.database)
            .ssl_mode(self.ssl_mode());

        if let Some(ref cert) = self.ssl_root_cert {
            options = options.ssl_root_cert(cert);
        }

        options
    }

    /// RDS rejects IAM tokens over plaintext connections, so TLS is
    /// mandatory whenever IAM auth or a CA bundle is configured.
    fn ssl_mode(&self) -> PgSslMode {
        if self.iam_auth || self.ssl_root_cert.is_some() {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: default_password(),
            database: default_database(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout: default_acquire_timeout(),
            iam_auth: false,
            region: default_region(),
            aws_profile: None,
            ssl_root_cert: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, "5432");
        assert_eq!(config.user, "geo");
        assert_eq!(config.database, "geodata");
        assert!(!config.iam_auth);
    }

    #[test]
    fn test_prefixed_override() {
        let config: DatabaseConfig = envy::prefixed("POSTGRES_")
            .from_iter(vec![
                (
                    "POSTGRES_HOST".to_string(),
                    "db.internal.example.com".to_string(),
                ),
                ("POSTGRES_USER".to_string(), "jane_doe".to_string()),
                ("POSTGRES_IAM_AUTH".to_string(), "true".to_string()),
            ])
            .unwrap();
        assert_eq!(config.host, "db.internal.example.com");
        assert_eq!(config.user, "jane_doe");
        assert!(config.iam_auth);
        assert_eq!(config.region, "eu-west-1");
    }

    #[test]
    fn test_port_number_fallback() {
        let mut config = DatabaseConfig::default();
        config.port = "not-a-port".to_string();
        assert_eq!(config.port_number(), 5432);
    }
}
