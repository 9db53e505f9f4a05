//! Repository for the `fees` table.

use hostel_core::types::DbId;
use sqlx::PgPool;

use crate::models::fee::{CreateFee, Fee, UpdateFee};

/// Columns of a fee row `f` joined with its student `s`.
const COLUMNS: &str = "f.id, f.student_id, s.name AS student_name, s.student_code, f.amount, \
                       f.due_date, f.status, f.paid_date, f.payment_method, f.transaction_id, \
                       f.created_at, f.updated_at";

/// Provides CRUD operations for fees.
pub struct FeeRepo;

impl FeeRepo {
    /// Insert a new fee, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFee) -> Result<Fee, sqlx::Error> {
        let query = format!(
            "WITH f AS (
                INSERT INTO fees (student_id, amount, due_date, status, paid_date,
                                  payment_method, transaction_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
             )
             SELECT {COLUMNS} FROM f JOIN students s ON s.id = f.student_id"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(input.student_id)
            .bind(input.amount)
            .bind(input.due_date)
            .bind(&input.status)
            .bind(input.paid_date)
            .bind(&input.payment_method)
            .bind(&input.transaction_id)
            .fetch_one(pool)
            .await
    }

    /// Find a fee by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fees f JOIN students s ON s.id = f.student_id
             WHERE f.id = $1"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List fees, optionally narrowed to one status, earliest due first.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fees f JOIN students s ON s.id = f.student_id
             WHERE ($1::TEXT IS NULL OR f.status = $1)
             ORDER BY f.due_date, f.id"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List one student's fees, earliest due first.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fees f JOIN students s ON s.id = f.student_id
             WHERE f.student_id = $1 AND ($2::TEXT IS NULL OR f.status = $2)
             ORDER BY f.due_date, f.id"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(student_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a fee. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFee,
    ) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!(
            "WITH f AS (
                UPDATE fees SET
                    amount = COALESCE($2, amount),
                    due_date = COALESCE($3, due_date),
                    status = COALESCE($4, status),
                    paid_date = COALESCE($5, paid_date),
                    payment_method = COALESCE($6, payment_method),
                    transaction_id = COALESCE($7, transaction_id)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM f JOIN students s ON s.id = f.student_id"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .bind(input.amount)
            .bind(input.due_date)
            .bind(&input.status)
            .bind(input.paid_date)
            .bind(&input.payment_method)
            .bind(&input.transaction_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a fee. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
