//! Repository for attachments.

use sqlx::PgPool;
use ticketport_core::types::DbId;

use crate::models::{Attachment, CreateAttachment};

const COLUMNS: &str = "id, ticket_id, conversation_id, title, file_path, full_url, \
     driver, status, file_type, created_at, updated_at";

pub struct AttachmentRepo;

impl AttachmentRepo {
    pub async fn insert(pool: &PgPool, input: &CreateAttachment) -> Result<Attachment, sqlx::Error> {
        let sql = format!(
            "INSERT INTO attachments \
                (ticket_id, conversation_id, title, file_path, full_url, driver, status, file_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&sql)
            .bind(input.ticket_id)
            .bind(input.conversation_id)
            .bind(&input.title)
            .bind(&input.file_path)
            .bind(&input.full_url)
            .bind(&input.driver)
            .bind(&input.status)
            .bind(&input.file_type)
            .fetch_one(pool)
            .await
    }

    /// Attachments that belong to the ticket body itself.
    pub async fn list_by_ticket(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM attachments WHERE ticket_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Attachment>(&sql)
            .bind(ticket_id)
            .fetch_all(pool)
            .await
    }

    /// Attachments that belong to a single reply.
    pub async fn list_by_conversation(
        pool: &PgPool,
        conversation_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM attachments WHERE conversation_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Attachment>(&sql)
            .bind(conversation_id)
            .fetch_all(pool)
            .await
    }
}
