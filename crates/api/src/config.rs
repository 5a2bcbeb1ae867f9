use std::path::PathBuf;

use ticketport_core::importer::{ATTACHMENT_TIMEOUT_SECS, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

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
    /// Root directory where imported attachments are materialized.
    pub upload_dir: PathBuf,
    /// Public base URL under which `upload_dir` is served.
    pub upload_base_url: String,
    /// Remote tickets fetched per migration page, clamped to
    /// `1..=MAX_PAGE_SIZE`.
    pub import_page_size: u64,
    /// Timeout for a single attachment download, in seconds.
    pub attachment_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                          |
    /// |---------------------------|----------------------------------|
    /// | `HOST`                    | `0.0.0.0`                        |
    /// | `PORT`                    | `3000`                           |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                             |
    /// | `UPLOAD_DIR`              | `./uploads`                      |
    /// | `UPLOAD_BASE_URL`         | `http://localhost:3000/uploads`  |
    /// | `IMPORT_PAGE_SIZE`        | `50`                             |
    /// | `ATTACHMENT_TIMEOUT_SECS` | `60`                             |
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

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".into()),
        );

        let upload_base_url = std::env::var("UPLOAD_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/uploads".into())
            .trim_end_matches('/')
            .to_string();

        let import_page_size: u64 = std::env::var("IMPORT_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .expect("IMPORT_PAGE_SIZE must be a valid u64");
        let import_page_size = import_page_size.clamp(1, MAX_PAGE_SIZE);

        let attachment_timeout_secs: u64 = std::env::var("ATTACHMENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| ATTACHMENT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("ATTACHMENT_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            upload_base_url,
            import_page_size,
            attachment_timeout_secs,
        }
    }
}
