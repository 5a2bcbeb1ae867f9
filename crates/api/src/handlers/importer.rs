//! Handlers for the remote help-desk migration endpoints.
//!
//! A migration is driven page by page from the admin UI: each POST to
//! `/admin/import/tickets` imports one page and returns progress, and
//! the UI keeps re-posting with `next_page` until `has_more` is false.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use ticketport_core::importer::last_migrated_option_key;
use ticketport_core::ticket::SourceKind;
use ticketport_core::types::DbId;
use ticketport_db::repositories::OptionRepo;
use validator::Validate;

use crate::engine::orchestrator::{self, ImportPageRequest, ImportPageResult};
use crate::engine::registry::{self, SourceCredentials};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ── Request / response shapes ────────────────────────────────────────

/// Remote-source credentials and options, as sent by the admin UI.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SourceQuery {
    #[validate(length(min = 1, message = "access_token is required"))]
    pub access_token: String,
    #[validate(length(min = 1, message = "domain is required"))]
    pub domain: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// Local mailbox to file imported tickets under.
    pub mailbox: Option<DbId>,
}

impl SourceQuery {
    fn credentials(&self) -> SourceCredentials {
        SourceCredentials {
            domain: self.domain.clone(),
            email: self.email.clone(),
            access_token: self.access_token.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ImportTicketsRequest {
    #[validate(length(min = 1, message = "handler is required"))]
    pub handler: String,
    /// 1-based page number.
    #[validate(range(min = 1, message = "page starts at 1"))]
    pub page: u64,
    #[validate(nested)]
    pub query: SourceQuery,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteTicketsRequest {
    #[validate(length(min = 1, message = "handler is required"))]
    pub handler: String,
    #[validate(range(min = 1, message = "page starts at 1"))]
    pub page: u64,
    /// Credentials are optional here: importers that support deletion
    /// decide for themselves whether they need remote access.
    #[validate(nested)]
    pub query: Option<SourceQuery>,
}

#[derive(Debug, Serialize)]
pub struct DeleteTicketsResult {
    pub handler: String,
    pub page: u64,
    pub deleted: u64,
    pub supported: bool,
}

/// One row of the migration stats table shown in the admin UI.
#[derive(Debug, Serialize)]
pub struct MigrationStats {
    pub name: &'static str,
    pub handler: &'static str,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// `YYYY-MM-DD HH:MM:SS` of the last completed migration, or `null`
    /// when this source has never finished one.
    pub last_migrated: Option<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// POST /api/v1/admin/import/tickets
///
/// Import one page of tickets from the named source. Holds the
/// per-handler lock for the duration, so concurrent requests for the
/// same source run one page at a time.
pub async fn import_tickets(
    State(state): State<AppState>,
    Json(body): Json<ImportTicketsRequest>,
) -> AppResult<Json<DataResponse<ImportPageResult>>> {
    body.validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let importer = registry::build(&body.handler, &body.query.credentials(), state.http.clone())
        .ok_or_else(|| AppError::BadRequest(format!("Unknown import handler: {}", body.handler)))?;

    let _guard = state.import_locks.acquire(&body.handler).await;

    let result = orchestrator::run_import_page(
        &state.pool,
        &state.attachments,
        importer.as_ref(),
        &ImportPageRequest {
            page: body.page,
            page_size: state.config.import_page_size,
            mailbox_id: body.query.mailbox,
        },
    )
    .await;

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/admin/import/tickets/delete
///
/// Reverse one page of a previous import. Deletion is importer-specific
/// and optional; the result says whether the source supports it at all.
pub async fn delete_imported(
    State(state): State<AppState>,
    Json(body): Json<DeleteTicketsRequest>,
) -> AppResult<Json<DataResponse<DeleteTicketsResult>>> {
    body.validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let credentials = body
        .query
        .as_ref()
        .map(SourceQuery::credentials)
        .unwrap_or_default();
    let importer = registry::build(&body.handler, &credentials, state.http.clone())
        .ok_or_else(|| AppError::BadRequest(format!("Unknown import handler: {}", body.handler)))?;

    let _guard = state.import_locks.acquire(&body.handler).await;

    let deleted = importer
        .delete_tickets(body.page)
        .await
        .map_err(|err| AppError::InternalError(err.to_string()))?;

    Ok(Json(DataResponse {
        data: DeleteTicketsResult {
            handler: body.handler,
            page: body.page,
            deleted: deleted.deleted,
            supported: deleted.supported,
        },
    }))
}

/// GET /api/v1/admin/import/stats
///
/// Per-source migration status for the admin UI.
pub async fn import_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MigrationStats>>>> {
    let mut stats = Vec::new();
    for descriptor in registry::descriptors() {
        let last_migrated =
            OptionRepo::get(&state.pool, &last_migrated_option_key(descriptor.handler))
                .await?
                .map(|option| option.option_value);
        stats.push(MigrationStats {
            name: descriptor.name,
            handler: descriptor.handler,
            kind: descriptor.kind,
            last_migrated,
        });
    }
    Ok(Json(DataResponse { data: stats }))
}
