//! Repository for the `mess_menus` table.

use sqlx::PgPool;

use crate::models::mess_menu::{MessMenu, UpdateMessMenu, UpsertMessMenu};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, day, breakfast, lunch, dinner, created_at, updated_at";

/// Provides CRUD operations for the weekly menu. Rows are keyed by the
/// lowercase weekday name.
pub struct MessMenuRepo;

impl MessMenuRepo {
    /// Create or replace the menu for `day`, returning the stored row.
    pub async fn upsert(
        pool: &PgPool,
        day: &str,
        input: &UpsertMessMenu,
    ) -> Result<MessMenu, sqlx::Error> {
        let query = format!(
            "INSERT INTO mess_menus (day, breakfast, lunch, dinner)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_mess_menus_day DO UPDATE SET
                breakfast = EXCLUDED.breakfast,
                lunch = EXCLUDED.lunch,
                dinner = EXCLUDED.dinner
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MessMenu>(&query)
            .bind(day)
            .bind(&input.breakfast)
            .bind(&input.lunch)
            .bind(&input.dinner)
            .fetch_one(pool)
            .await
    }

    /// Find the menu for a day.
    pub async fn find_by_day(pool: &PgPool, day: &str) -> Result<Option<MessMenu>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mess_menus WHERE day = $1");
        sqlx::query_as::<_, MessMenu>(&query)
            .bind(day)
            .fetch_optional(pool)
            .await
    }

    /// List all stored days. Ordering by weekday is left to the caller.
    pub async fn list(pool: &PgPool) -> Result<Vec<MessMenu>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mess_menus");
        sqlx::query_as::<_, MessMenu>(&query).fetch_all(pool).await
    }

    /// Update a day's menu. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the day has no menu.
    pub async fn update(
        pool: &PgPool,
        day: &str,
        input: &UpdateMessMenu,
    ) -> Result<Option<MessMenu>, sqlx::Error> {
        let query = format!(
            "UPDATE mess_menus SET
                breakfast = COALESCE($2, breakfast),
                lunch = COALESCE($3, lunch),
                dinner = COALESCE($4, dinner)
             WHERE day = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MessMenu>(&query)
            .bind(day)
            .bind(&input.breakfast)
            .bind(&input.lunch)
            .bind(&input.dinner)
            .fetch_optional(pool)
            .await
    }

    /// Delete a day's menu. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, day: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mess_menus WHERE day = $1")
            .bind(day)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
