//! Repository for the key-value options store.

use sqlx::PgPool;

use crate::models::AppOption;

const COLUMNS: &str = "id, option_key, option_value, created_at, updated_at";

pub struct OptionRepo;

impl OptionRepo {
    /// Set a key, inserting or replacing the stored value.
    pub async fn set(pool: &PgPool, key: &str, value: &str) -> Result<AppOption, sqlx::Error> {
        let sql = format!(
            "INSERT INTO options (option_key, option_value) \
             VALUES ($1, $2) \
             ON CONFLICT (option_key) DO UPDATE SET \
                option_value = EXCLUDED.option_value, \
                updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AppOption>(&sql)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<AppOption>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM options WHERE option_key = $1");
        sqlx::query_as::<_, AppOption>(&sql)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM options WHERE option_key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
