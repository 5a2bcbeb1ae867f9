//! Models for stored attachments.

use serde::Serialize;
use sqlx::FromRow;
use ticketport_core::types::{DbId, Timestamp};

/// A row from the `attachments` table.
///
/// Exactly one of `ticket_id` / `conversation_id` is set, depending on
/// whether the file belongs to the ticket body or to a reply.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub ticket_id: Option<DbId>,
    pub conversation_id: Option<DbId>,
    pub title: String,
    pub file_path: String,
    pub full_url: String,
    pub driver: String,
    pub status: String,
    pub file_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an attachment record.
#[derive(Debug, Clone)]
pub struct CreateAttachment {
    pub ticket_id: Option<DbId>,
    pub conversation_id: Option<DbId>,
    pub title: String,
    pub file_path: String,
    pub full_url: String,
    pub driver: String,
    pub status: String,
    pub file_type: Option<String>,
}
