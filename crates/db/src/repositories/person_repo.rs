//! Repository for persons.

use sqlx::PgPool;
use ticketport_core::types::DbId;

use crate::models::{Person, UpsertPerson};

const COLUMNS: &str = "id, first_name, last_name, email, person_type, created_at, updated_at";

pub struct PersonRepo;

impl PersonRepo {
    /// Upsert keyed by `(email, person_type)`.
    ///
    /// Creates the person when missing; otherwise refreshes the name
    /// fields with whatever the remote system sent last. The same email
    /// may exist once per person type.
    pub async fn upsert(pool: &PgPool, input: &UpsertPerson) -> Result<Person, sqlx::Error> {
        let sql = format!(
            "INSERT INTO persons (first_name, last_name, email, person_type) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (email, person_type) DO UPDATE SET \
                first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&sql)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.person_type)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM persons WHERE id = $1");
        sqlx::query_as::<_, Person>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email_and_type(
        pool: &PgPool,
        email: &str,
        person_type: &str,
    ) -> Result<Option<Person>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM persons WHERE email = $1 AND person_type = $2");
        sqlx::query_as::<_, Person>(&sql)
            .bind(email)
            .bind(person_type)
            .fetch_optional(pool)
            .await
    }
}
