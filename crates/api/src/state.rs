use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::attachments::AttachmentFetcher;
use crate::engine::locks::ImportLocks;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`, and
/// `reqwest::Client` is itself a reference-counted handle).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ticketport_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Shared outbound HTTP client, reused by every importer and the
    /// attachment fetcher.
    pub http: reqwest::Client,
    /// Materializes remote attachments under the uploads root.
    pub attachments: Arc<AttachmentFetcher>,
    /// Per-handler import serialization.
    pub import_locks: Arc<ImportLocks>,
}
