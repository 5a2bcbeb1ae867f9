//! Repository for ticket conversations.

use sqlx::PgPool;
use ticketport_core::types::DbId;

use crate::models::{Conversation, CreateConversation};

const COLUMNS: &str = "id, ticket_id, person_id, conversation_type, content, \
     is_customer_reply, created_at, updated_at";

pub struct ConversationRepo;

impl ConversationRepo {
    pub async fn insert(
        pool: &PgPool,
        input: &CreateConversation,
    ) -> Result<Conversation, sqlx::Error> {
        let sql = format!(
            "INSERT INTO conversations \
                (ticket_id, person_id, conversation_type, content, is_customer_reply, \
                 created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, now()), COALESCE($7, now())) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&sql)
            .bind(input.ticket_id)
            .bind(input.person_id)
            .bind(&input.conversation_type)
            .bind(&input.content)
            .bind(input.is_customer_reply)
            .bind(input.created_at)
            .bind(input.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Conversations for a ticket in thread order (oldest first).
    pub async fn list_by_ticket(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Vec<Conversation>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM conversations \
             WHERE ticket_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Conversation>(&sql)
            .bind(ticket_id)
            .fetch_all(pool)
            .await
    }
}
