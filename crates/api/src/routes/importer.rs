//! Route definitions for the migration endpoints.
//!
//! Mounted at `/admin/import`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::importer;
use crate::state::AppState;

/// Routes mounted at `/admin/import`.
///
/// ```text
/// POST   /tickets          -> import_tickets   (one page per call)
/// POST   /tickets/delete   -> delete_imported
/// GET    /stats            -> import_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tickets", post(importer::import_tickets))
        .route("/tickets/delete", post(importer::delete_imported))
        .route("/stats", get(importer::import_stats))
}
