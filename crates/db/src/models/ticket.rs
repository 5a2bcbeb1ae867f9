//! Models for tickets.

use serde::Serialize;
use sqlx::FromRow;
use ticketport_core::types::{DbId, Timestamp};

/// A row from the `tickets` table.
///
/// `source` and `origin_id` are set only for imported tickets; together
/// they form the dedup key `uq_tickets_origin_source`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub customer_id: DbId,
    pub mailbox_id: Option<DbId>,
    pub title: String,
    pub content: String,
    pub status: String,
    pub priority: String,
    pub client_priority: String,
    pub source: Option<String>,
    pub origin_id: Option<i64>,
    /// Updated by the live ticketing flows; imports leave these unset.
    pub last_customer_response: Option<Timestamp>,
    pub last_agent_response: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an imported ticket.
///
/// Timestamps are the remote system's values when the source provided
/// them; `None` falls back to `now()` at insert time.
#[derive(Debug, Clone)]
pub struct CreateImportedTicket {
    pub customer_id: DbId,
    pub mailbox_id: Option<DbId>,
    pub title: String,
    pub content: String,
    pub status: String,
    pub priority: String,
    pub client_priority: String,
    pub source: String,
    pub origin_id: i64,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}
