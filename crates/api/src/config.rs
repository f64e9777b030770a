//! Server configuration loaded from environment variables.

/// Where accepted submissions go: the local database or an external backend.
#[derive(Debug, Clone)]
pub enum SinkConfig {
    /// Parameterized inserts into Postgres.
    Database { database_url: String },
    /// JSON forwarding to an external backend service.
    Forward { backend_url: String, timeout_secs: u64 },
}

/// Server configuration.
///
/// All fields except the sink settings have defaults suitable for local
/// development. Misconfiguration fails fast at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Submission sink selection.
    pub sink: SinkConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `SUBMISSION_SINK`      | `database`              |
    /// | `BACKEND_TIMEOUT_SECS` | `10`                    |
    ///
    /// `DATABASE_URL` is required in `database` mode; `BACKEND_API_URL` is
    /// required in `forward` mode. Both panic when unset so a misconfigured
    /// process never starts serving.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let sink_kind = std::env::var("SUBMISSION_SINK").unwrap_or_else(|_| "database".into());
        let sink = match sink_kind.as_str() {
            "database" => SinkConfig::Database {
                database_url: std::env::var("DATABASE_URL")
                    .expect("DATABASE_URL must be set when SUBMISSION_SINK=database"),
            },
            "forward" => SinkConfig::Forward {
                backend_url: std::env::var("BACKEND_API_URL")
                    .expect("BACKEND_API_URL must be set when SUBMISSION_SINK=forward"),
                timeout_secs: std::env::var("BACKEND_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".into())
                    .parse()
                    .expect("BACKEND_TIMEOUT_SECS must be a valid u64"),
            },
            other => panic!("SUBMISSION_SINK must be 'database' or 'forward', got '{other}'"),
        };

        Self { host, port, cors_origins, request_timeout_secs, sink }
    }
}
