//! Route definitions for ticket browsing.
//!
//! Mounted at `/tickets`.

use axum::routing::get;
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Routes mounted at `/tickets`.
///
/// ```text
/// GET    /        -> list_tickets   (?source&status&page&per_page)
/// GET    /{id}    -> get_ticket
/// DELETE /{id}    -> delete_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list_tickets))
        .route(
            "/{id}",
            get(tickets::get_ticket).delete(tickets::delete_ticket),
        )
}
