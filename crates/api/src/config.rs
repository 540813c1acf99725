use veogen_core::checkout::PaymentMode;

/// Which generation-store adapter to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// One JSON file per generation under `generations_dir`.
    Fs,
    /// Process-local map; records are lost on restart.
    Memory,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Generation-store adapter (default: `fs`).
    pub store_backend: StoreBackend,
    /// Directory for the filesystem generation store.
    pub generations_dir: String,
    /// Payment-processor environment; selects the price whitelist.
    pub payment_mode: PaymentMode,
    /// Payment processor API base URL.
    pub payments_api_base: String,
    /// Payment processor secret key.
    pub payments_secret_key: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                   |
    /// |------------------------|---------------------------|
    /// | `HOST`                 | `0.0.0.0`                 |
    /// | `PORT`                 | `3000`                    |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                      |
    /// | `STORE_BACKEND`        | `fs`                      |
    /// | `GENERATIONS_DIR`      | `./data/generations`      |
    /// | `PAYMENT_MODE`         | `test`                    |
    /// | `PAYMENTS_API_BASE`    | `https://api.stripe.com`  |
    /// | `PAYMENTS_SECRET_KEY`  | required in live mode     |
    ///
    /// Panics on unparseable values; misconfiguration should fail fast
    /// at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_backend = match std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "fs".into())
            .as_str()
        {
            "fs" => StoreBackend::Fs,
            "memory" => StoreBackend::Memory,
            other => panic!("STORE_BACKEND must be 'fs' or 'memory', got '{other}'"),
        };

        let generations_dir =
            std::env::var("GENERATIONS_DIR").unwrap_or_else(|_| "./data/generations".into());

        let payment_mode = match std::env::var("PAYMENT_MODE")
            .unwrap_or_else(|_| "test".into())
            .as_str()
        {
            "test" => PaymentMode::Test,
            "live" => PaymentMode::Live,
            other => panic!("PAYMENT_MODE must be 'test' or 'live', got '{other}'"),
        };

        let payments_api_base =
            std::env::var("PAYMENTS_API_BASE").unwrap_or_else(|_| "https://api.stripe.com".into());

        let payments_secret_key = match std::env::var("PAYMENTS_SECRET_KEY") {
            Ok(key) => key,
            Err(_) if payment_mode == PaymentMode::Test => "sk_test_local".into(),
            Err(_) => panic!("PAYMENTS_SECRET_KEY must be set in live mode"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_backend,
            generations_dir,
            payment_mode,
            payments_api_base,
            payments_secret_key,
        }
    }
}
