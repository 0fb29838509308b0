use blitz_core::graph_layout::DEFAULT_LAYOUT_CAPACITY;
use blitz_core::paging::POOL_PAGE_SIZE;

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
    /// Maximum number of targets loaded into the available pool (default: `100`).
    pub pool_page_size: i64,
    /// Pinned graph positions kept per graph before eviction (default: `500`).
    pub layout_cache_capacity: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `POOL_PAGE_SIZE`        | `100`                      |
    /// | `LAYOUT_CACHE_CAPACITY` | `500`                      |
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

        let pool_page_size: i64 = std::env::var("POOL_PAGE_SIZE")
            .map(|v| v.parse().expect("POOL_PAGE_SIZE must be a valid i64"))
            .unwrap_or(POOL_PAGE_SIZE)
            .max(1);

        let layout_cache_capacity: usize = std::env::var("LAYOUT_CACHE_CAPACITY")
            .map(|v| v.parse().expect("LAYOUT_CACHE_CAPACITY must be a valid usize"))
            .unwrap_or(DEFAULT_LAYOUT_CAPACITY);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            pool_page_size,
            layout_cache_capacity,
        }
    }
}
