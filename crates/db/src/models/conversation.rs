//! Models for ticket conversations (replies).

use serde::Serialize;
use sqlx::FromRow;
use ticketport_core::types::{DbId, Timestamp};

/// A row from the `conversations` table.
///
/// `person_id` is nullable: imported replies keep their content even
/// when the remote author could not be resolved to a person.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conversation {
    pub id: DbId,
    pub ticket_id: DbId,
    pub person_id: Option<DbId>,
    pub conversation_type: String,
    pub content: String,
    pub is_customer_reply: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a conversation.
#[derive(Debug, Clone)]
pub struct CreateConversation {
    pub ticket_id: DbId,
    pub person_id: Option<DbId>,
    pub conversation_type: String,
    pub content: String,
    pub is_customer_reply: Option<bool>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}
