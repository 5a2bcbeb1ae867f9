//! Model for the key-value options store.

use serde::Serialize;
use sqlx::FromRow;
use ticketport_core::types::{DbId, Timestamp};

/// A row from the `options` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppOption {
    pub id: DbId,
    pub option_key: String,
    pub option_value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
