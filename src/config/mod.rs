// Configuration module entry point
// Manages application configuration and the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig};

/// Default config file name (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `HTP_SERVER__PORT=9000`
const ENV_PREFIX: &str = "HTP";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources in priority order: environment variables, the file, defaults.
    /// A missing file is not an error.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, None)
    }

    /// Same as `load_from`, but `env` stands in for the process environment
    /// when given
    fn load_with_env(
        config_path: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8888)?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::io::Write;

    #[test]
    fn test_load_defaults_without_file() {
        let cfg = Config::load_from("definitely/not/here/config").unwrap();
        assert_eq!(cfg.server.port, 8888);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(cfg.logging.access_log);
        assert!(cfg.performance.keep_alive);
        assert_eq!(cfg.performance.max_connections, None);
        assert_eq!(cfg.fixtures.auth_token, fixtures::AUTH_TOKEN);
    }

    #[test]
    fn test_load_overrides_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 9000

[logging]
access_log = false

[fixtures]
auth_token = "swapped"

[fixtures.payload]
user_id = 7
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.fixtures.auth_token, "swapped");
        assert_eq!(cfg.fixtures.payload.user_id, 7);
        assert_eq!(cfg.fixtures.payload.username, fixtures::FIXED_USERNAME);
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:9000".parse().unwrap()
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 9000\n\n[logging]\nshow_headers = false").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let mut env = config::Map::new();
        env.insert("HTP_SERVER__PORT".to_string(), "9100".to_string());
        env.insert("HTP_LOGGING__SHOW_HEADERS".to_string(), "true".to_string());
        env.insert("OTHER_SERVER__PORT".to_string(), "1".to_string());

        let cfg = Config::load_with_env(&path, Some(env)).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert!(cfg.logging.show_headers);
        assert_eq!(cfg.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_socket_addr() {
        let mut cfg = Config::default();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
