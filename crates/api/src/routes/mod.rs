pub mod health;
pub mod importer;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/import/tickets           import one page (POST)
/// /admin/import/tickets/delete    reverse one page (POST)
/// /admin/import/stats             per-source migration status (GET)
///
/// /tickets                        list imported tickets (GET)
/// /tickets/{id}                   get full thread, delete (GET, DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin/import", importer::router())
        .nest("/tickets", tickets::router())
}
