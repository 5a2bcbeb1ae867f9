//! Handlers for browsing and pruning imported tickets.
//!
//! This is an operator surface: after (or during) a migration it lets
//! someone inspect what actually landed in the local store and remove a
//! ticket that should not have been imported.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use ticketport_core::error::CoreError;
use ticketport_core::query::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use ticketport_core::types::DbId;
use ticketport_db::models::{Attachment, Conversation, Person, Ticket};
use ticketport_db::repositories::{AttachmentRepo, ConversationRepo, PersonRepo, TicketRepo};

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

// ── Request / response shapes ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TicketListParams {
    /// Filter by import source (e.g. `zendesk`).
    pub source: Option<String>,
    pub status: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// One reply with its resolved author and files.
#[derive(Debug, Serialize)]
pub struct ReplyDetail {
    pub conversation: Conversation,
    pub author: Option<Person>,
    pub attachments: Vec<Attachment>,
}

/// A ticket with everything attached to it, in thread order.
#[derive(Debug, Serialize)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub customer: Option<Person>,
    pub attachments: Vec<Attachment>,
    pub replies: Vec<ReplyDetail>,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// GET /api/v1/tickets
///
/// List tickets newest first, optionally filtered by source and status.
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(params): Query<TicketListParams>,
) -> AppResult<Json<Paginated<Ticket>>> {
    let per_page = clamp_limit(params.per_page, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let page = params.page.unwrap_or(1).max(1);
    let offset = clamp_offset(Some((page - 1) * per_page));

    let source = params.source.as_deref();
    let status = params.status.as_deref();

    let total = TicketRepo::count(&state.pool, source, status).await?;
    let tickets = TicketRepo::list(&state.pool, source, status, per_page, offset).await?;

    Ok(Json(Paginated {
        data: tickets,
        total,
        page,
        per_page,
    }))
}

/// GET /api/v1/tickets/{id}
///
/// Full view of one ticket: customer, ticket attachments, and every
/// reply with its author and attachments.
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TicketDetail>>> {
    let ticket = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }))?;

    let customer = PersonRepo::find_by_id(&state.pool, ticket.customer_id).await?;
    let attachments = AttachmentRepo::list_by_ticket(&state.pool, ticket.id).await?;

    let conversations = ConversationRepo::list_by_ticket(&state.pool, ticket.id).await?;
    let mut replies = Vec::with_capacity(conversations.len());
    for conversation in conversations {
        let author = match conversation.person_id {
            Some(person_id) => PersonRepo::find_by_id(&state.pool, person_id).await?,
            None => None,
        };
        let attachments = AttachmentRepo::list_by_conversation(&state.pool, conversation.id).await?;
        replies.push(ReplyDetail {
            conversation,
            author,
            attachments,
        });
    }

    Ok(Json(DataResponse {
        data: TicketDetail {
            ticket,
            customer,
            attachments,
            replies,
        },
    }))
}

/// DELETE /api/v1/tickets/{id}
///
/// Remove a ticket; its conversations and attachment records cascade.
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TicketRepo::delete_by_id(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Ticket",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
