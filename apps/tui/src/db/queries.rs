use sqlx::{query, query_scalar, SqlitePool};

use crate::db::models::PreferenceKey;

/// Reads a preference, `None` when it was never stored
pub async fn get_preference(
    pool: &SqlitePool,
    key: PreferenceKey,
) -> Result<Option<String>, sqlx::Error> {
    query_scalar::<_, String>("SELECT value FROM preferences WHERE key = ?")
        .bind(key.as_str())
        .fetch_optional(pool)
        .await
}

/// Inserts or replaces a preference
pub async fn set_preference(
    pool: &SqlitePool,
    key: PreferenceKey,
    value: &str,
) -> Result<(), sqlx::Error> {
    let updated = chrono::Utc::now().to_rfc3339();

    query(
        "INSERT INTO preferences (key, value, updated) VALUES (?, ?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated",
    )
    .bind(key.as_str())
    .bind(value)
    .bind(updated)
    .execute(pool)
    .await?;

    Ok(())
}
