//! Repository for tickets.

use sqlx::PgPool;
use ticketport_core::types::DbId;

use crate::models::{CreateImportedTicket, Ticket};

const COLUMNS: &str = "id, customer_id, mailbox_id, title, content, status, priority, \
     client_priority, source, origin_id, last_customer_response, last_agent_response, \
     created_at, updated_at";

pub struct TicketRepo;

impl TicketRepo {
    /// Insert an imported ticket.
    ///
    /// Returns `None` when a ticket with the same `(origin_id, source)`
    /// already exists; re-running a page must not duplicate tickets.
    pub async fn insert_imported(
        pool: &PgPool,
        input: &CreateImportedTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let sql = format!(
            "INSERT INTO tickets \
                (customer_id, mailbox_id, title, content, status, priority, client_priority, \
                 source, origin_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, \
                     COALESCE($10, now()), COALESCE($11, now())) \
             ON CONFLICT (origin_id, source) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(input.customer_id)
            .bind(input.mailbox_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.client_priority)
            .bind(&input.source)
            .bind(input.origin_id)
            .bind(input.created_at)
            .bind(input.updated_at)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_origin(
        pool: &PgPool,
        origin_id: i64,
        source: &str,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM tickets WHERE origin_id = $1 AND source = $2");
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(origin_id)
            .bind(source)
            .fetch_optional(pool)
            .await
    }

    /// List tickets, newest first, optionally filtered by source and
    /// status. A `NULL` filter matches everything.
    pub async fn list(
        pool: &PgPool,
        source: Option<&str>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM tickets \
             WHERE ($1::text IS NULL OR source = $1) \
               AND ($2::text IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(source)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count tickets under the same filters as [`TicketRepo::list`].
    pub async fn count(
        pool: &PgPool,
        source: Option<&str>,
        status: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tickets \
             WHERE ($1::text IS NULL OR source = $1) \
               AND ($2::text IS NULL OR status = $2)",
        )
        .bind(source)
        .bind(status)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Delete a ticket; conversations and attachments go with it via
    /// `ON DELETE CASCADE`. Returns whether a row was removed.
    pub async fn delete_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
