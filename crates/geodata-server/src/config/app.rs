//! Application configuration for the geodata server.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// Environment variables are unprefixed:
/// - `HOST`: Server bind address (default: "localhost")
/// - `PORT`: Server port (default: 8080)
/// - `WORKERS`: Number of worker threads (optional)
/// - `DEBUG`: Enable debug mode (default: false)
/// - `SERVER_NAME`: Server name for identification
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (optional, defaults to CPU count)
    pub workers: Option<usize>,

    /// Enable debug mode
    #[serde(default)]
    pub debug: bool,

    /// Server name for identification
    #[serde(default = "default_server_name")]
    pub server_name: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_server_name() -> String {
    "geodata-server".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<AppConfig>()
    }

    /// Get the server bind address as a string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            debug: false,
            server_name: default_server_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "localhost:8080");
    }

    #[test]
    fn test_port_override_keeps_default_host() {
        let config: AppConfig =
            envy::from_iter(vec![("PORT".to_string(), "3000".to_string())]).unwrap();
        assert_eq!(config.bind_address(), "localhost:3000");
        assert!(!config.debug);
    }

    #[test]
    fn test_host_and_port_override() {
        let config: AppConfig = envy::from_iter(vec![
            ("HOST".to_string(), "0.0.0.0".to_string()),
            ("PORT".to_string(), "9090".to_string()),
        ])
        .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9090");
    }
}
