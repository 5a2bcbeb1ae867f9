//! Models for persons (ticket customers and agents).

use serde::Serialize;
use sqlx::FromRow;
use ticketport_core::importer::PersonDraft;
use ticketport_core::types::{DbId, Timestamp};

/// A row from the `persons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub person_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a person keyed by `(email, person_type)`.
#[derive(Debug, Clone)]
pub struct UpsertPerson {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub person_type: String,
}

impl From<&PersonDraft> for UpsertPerson {
    fn from(draft: &PersonDraft) -> Self {
        Self {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            person_type: draft.person_type.as_str().to_string(),
        }
    }
}
