//! # Expense Repository
//!
//! Database operations for running expenses (fuel, washes, parking, ...).
//!
//! The `icon` column stores a plain name; decoding maps unrecognized names to
//! [`carlog_core::ExpenseIcon::Other`] instead of failing, so rows written by
//! older or newer builds always load.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use carlog_core::{ExpenseItem, Money};

/// Repository for expense item database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

const EXPENSE_COLUMNS: &str = "id, car_id, description, date, amount_cents, icon";

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Inserts a new expense item.
    pub async fn add(&self, expense: &ExpenseItem) -> DbResult<()> {
        debug!(id = %expense.id, car_id = %expense.car_id, "Inserting expense item");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO expense_items (id, car_id, description, date, amount_cents, icon)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.car_id)
        .bind(&expense.description)
        .bind(expense.date)
        .bind(expense.amount_cents)
        .bind(expense.icon)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Replaces every mutable field of an existing expense item by id.
    /// Silently no-ops when the id is absent.
    pub async fn update(&self, expense: &ExpenseItem) -> DbResult<()> {
        debug!(id = %expense.id, "Updating expense item");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE expense_items SET
                car_id = ?2,
                description = ?3,
                date = ?4,
                amount_cents = ?5,
                icon = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.car_id)
        .bind(&expense.description)
        .bind(expense.date)
        .bind(expense.amount_cents)
        .bind(expense.icon)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            debug!(id = %expense.id, "Update matched no expense item");
        }

        Ok(())
    }

    /// Deletes an expense item by id; no-op when absent.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting expense item");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM expense_items WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets an expense item by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<ExpenseItem>> {
        let expense = sqlx::query_as::<_, ExpenseItem>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense_items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    /// Lists a car's expenses, newest first, stable for same-day entries.
    pub async fn list_for_car(&self, car_id: &str) -> DbResult<Vec<ExpenseItem>> {
        let expenses = sqlx::query_as::<_, ExpenseItem>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense_items \
             WHERE car_id = ?1 ORDER BY date DESC, rowid ASC"
        ))
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(car_id = %car_id, count = expenses.len(), "Listed expense items");
        Ok(expenses)
    }

    /// Sums a car's expenses. The dashboard's "total other costs" figure.
    pub async fn total_for_car(&self, car_id: &str) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM expense_items WHERE car_id = ?1",
        )
        .bind(car_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
