//! # Maintenance Repository
//!
//! Database operations for maintenance events.
//!
//! ## Listing Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  The car detail screen shows newest work first:                 │
//! │                                                                 │
//! │    ORDER BY date DESC, rowid ASC                                │
//! │                                                                 │
//! │  The rowid tiebreaker keeps insertion order for events logged   │
//! │  on the same day, so the list is stable across reloads.         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use carlog_core::{Maintenance, Money};

/// Repository for maintenance database operations.
#[derive(Debug, Clone)]
pub struct MaintenanceRepository {
    pool: SqlitePool,
}

const MAINTENANCE_COLUMNS: &str =
    "id, car_id, workshop_id, date, description, cost_cents, kind, odometer_km";

impl MaintenanceRepository {
    /// Creates a new MaintenanceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MaintenanceRepository { pool }
    }

    /// Inserts a new maintenance event.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - car_id or workshop_id doesn't
    ///   exist
    pub async fn add(&self, maintenance: &Maintenance) -> DbResult<()> {
        debug!(id = %maintenance.id, car_id = %maintenance.car_id, "Inserting maintenance");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO maintenances (
                id, car_id, workshop_id, date, description,
                cost_cents, kind, odometer_km
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&maintenance.id)
        .bind(&maintenance.car_id)
        .bind(&maintenance.workshop_id)
        .bind(maintenance.date)
        .bind(&maintenance.description)
        .bind(maintenance.cost_cents)
        .bind(maintenance.kind)
        .bind(maintenance.odometer_km)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Replaces every mutable field of an existing event by id.
    /// Silently no-ops when the id is absent.
    pub async fn update(&self, maintenance: &Maintenance) -> DbResult<()> {
        debug!(id = %maintenance.id, "Updating maintenance");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE maintenances SET
                car_id = ?2,
                workshop_id = ?3,
                date = ?4,
                description = ?5,
                cost_cents = ?6,
                kind = ?7,
                odometer_km = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&maintenance.id)
        .bind(&maintenance.car_id)
        .bind(&maintenance.workshop_id)
        .bind(maintenance.date)
        .bind(&maintenance.description)
        .bind(maintenance.cost_cents)
        .bind(maintenance.kind)
        .bind(maintenance.odometer_km)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            debug!(id = %maintenance.id, "Update matched no maintenance");
        }

        Ok(())
    }

    /// Deletes a maintenance event by id; no-op when absent.
    /// Its invoices go with it (ON DELETE CASCADE).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting maintenance");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM maintenances WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets a maintenance event by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Maintenance>> {
        let maintenance = sqlx::query_as::<_, Maintenance>(&format!(
            "SELECT {MAINTENANCE_COLUMNS} FROM maintenances WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(maintenance)
    }

    /// Lists a car's maintenance history, newest first, stable for events
    /// logged on the same date.
    pub async fn list_for_car(&self, car_id: &str) -> DbResult<Vec<Maintenance>> {
        let maintenances = sqlx::query_as::<_, Maintenance>(&format!(
            "SELECT {MAINTENANCE_COLUMNS} FROM maintenances \
             WHERE car_id = ?1 ORDER BY date DESC, rowid ASC"
        ))
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(car_id = %car_id, count = maintenances.len(), "Listed maintenances");
        Ok(maintenances)
    }

    /// Sums the maintenance cost over a car's whole history.
    ///
    /// The dashboard's "total spent on maintenance" figure.
    pub async fn total_cost_for_car(&self, car_id: &str) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(cost_cents), 0) FROM maintenances WHERE car_id = ?1",
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
