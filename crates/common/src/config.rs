use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,

    /// Seconds to wait for a pooled connection before failing (default: 5)
    pub db_acquire_timeout_secs: u64,

    /// Address the HTTP server binds to (default: 0.0.0.0)
    pub server_host: String,

    /// Port the HTTP server binds to (default: 8000)
    pub server_port: u16,

    /// Apply pending migrations on startup (default: true)
    pub run_migrations: bool,

    /// Emit logs as JSON lines instead of the human-readable format
    pub log_json: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
            db_acquire_timeout_secs: std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64"))?,
            server_host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: std::env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid u16"))?,
            run_migrations: parse_bool(
                "RUN_MIGRATIONS",
                &std::env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".to_string()),
            )?,
            log_json: match std::env::var("LOG_FORMAT") {
                Ok(format) => parse_log_format(&format)?,
                Err(_) => false,
            },
        })
    }

    /// `host:port` string suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_bool(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!("{} must be a boolean, got '{}'", name, value)),
    }
}

/// Returns `true` for JSON output.
fn parse_log_format(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(true),
        "pretty" | "text" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
            value
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", " YES ").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "false").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        let err = parse_bool("RUN_MIGRATIONS", "maybe").unwrap_err();
        assert!(err.to_string().contains("RUN_MIGRATIONS"));
    }

    #[test]
    fn test_parse_log_format() {
        assert!(parse_log_format("json").unwrap());
        assert!(parse_log_format("JSON").unwrap());
        assert!(!parse_log_format("pretty").unwrap());
        assert!(parse_log_format("xml").is_err());
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig {
            database_url: "unused".to_string(),
            db_max_connections: 5,
            db_acquire_timeout_secs: 5,
            server_host: "127.0.0.1".to_string(),
            server_port: 8000,
            run_migrations: false,
            log_json: false,
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }
}
