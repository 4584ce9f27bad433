/// Server configuration loaded from environment variables.
///
/// All fields except the database URL (read separately in `main`) have
/// defaults suitable for local development.
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
    /// Marketplace API root (default: `https://api.mercadolibre.com`).
    pub marketplace_base_url: String,
    /// Seconds between item sync cycles (default: `3600`).
    pub sync_interval_secs: u64,
    /// Whether the background item sync runs at all (default: `true`).
    pub sync_enabled: bool,
    /// Maximum concurrent marketplace lookups per enrichment (default: `16`).
    pub enrich_concurrency: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `HOST`                 | `0.0.0.0`                       |
    /// | `PORT`                 | `3000`                          |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`         |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                            |
    /// | `MARKETPLACE_BASE_URL` | `https://api.mercadolibre.com`  |
    /// | `SYNC_INTERVAL_SECS`   | `3600`                          |
    /// | `SYNC_ENABLED`         | `true`                          |
    /// | `ENRICH_CONCURRENCY`   | `16`                            |
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

        let marketplace_base_url = std::env::var("MARKETPLACE_BASE_URL")
            .unwrap_or_else(|_| melist_marketplace::api::DEFAULT_BASE_URL.into());

        let sync_interval_secs: u64 = std::env::var("SYNC_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("SYNC_INTERVAL_SECS must be a valid u64");

        let sync_enabled: bool = std::env::var("SYNC_ENABLED")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("SYNC_ENABLED must be true or false");

        let enrich_concurrency: usize = std::env::var("ENRICH_CONCURRENCY")
            .unwrap_or_else(|_| "16".into())
            .parse()
            .expect("ENRICH_CONCURRENCY must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            marketplace_base_url,
            sync_interval_secs,
            sync_enabled,
            enrich_concurrency: enrich_concurrency.max(1),
        }
    }
}
