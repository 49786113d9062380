//! # Invoice Repository
//!
//! Database operations for invoices.
//!
//! An invoice bills exactly one maintenance event and carries a closed
//! payment status (`Pendiente` / `Pagada`). The status flip the UI offers is
//! a full-record update like any other edit: read, [`carlog_core::Invoice::toggle_status`],
//! write back.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use carlog_core::Invoice;

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

const INVOICE_COLUMNS: &str = "id, maintenance_id, date, total_cents, status";

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Inserts a new invoice.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - maintenance_id doesn't exist
    pub async fn add(&self, invoice: &Invoice) -> DbResult<()> {
        debug!(id = %invoice.id, maintenance_id = %invoice.maintenance_id, "Inserting invoice");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO invoices (id, maintenance_id, date, total_cents, status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.maintenance_id)
        .bind(invoice.date)
        .bind(invoice.total_cents)
        .bind(invoice.status)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Replaces every mutable field of an existing invoice by id.
    /// Silently no-ops when the id is absent.
    pub async fn update(&self, invoice: &Invoice) -> DbResult<()> {
        debug!(id = %invoice.id, status = %invoice.status, "Updating invoice");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE invoices SET
                maintenance_id = ?2,
                date = ?3,
                total_cents = ?4,
                status = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.maintenance_id)
        .bind(invoice.date)
        .bind(invoice.total_cents)
        .bind(invoice.status)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            debug!(id = %invoice.id, "Update matched no invoice");
        }

        Ok(())
    }

    /// Deletes an invoice by id; no-op when absent.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting invoice");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM invoices WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets an invoice by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Lists the invoices of a maintenance event, newest first, stable for
    /// invoices dated the same day.
    pub async fn list_for_maintenance(&self, maintenance_id: &str) -> DbResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices \
             WHERE maintenance_id = ?1 ORDER BY date DESC, rowid ASC"
        ))
        .bind(maintenance_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use carlog_core::{Car, FuelType, InvoiceStatus, Maintenance, MaintenanceKind, Transmission};
    use chrono::NaiveDate;

    /// Builds the shared fixture: Car "1" with Maintenance "m1".
    async fn test_db_with_history() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let car = Car {
            id: "1".to_string(),
            user_id: "u1".to_string(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            plate: "ABC-123".to_string(),
            odometer_km: 45_000,
            image_url: None,
            next_service_date: None,
            color: "Red".to_string(),
            transmission: Transmission::Manual,
            fuel_type: FuelType::Gasoline,
            purchase_date: None,
        };
        db.cars().add(&car).await.unwrap();

        let maintenance = Maintenance {
            id: "m1".to_string(),
            car_id: "1".to_string(),
            workshop_id: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Oil change".to_string(),
            cost_cents: 8500,
            kind: MaintenanceKind::Preventive,
            odometer_km: 45_000,
        };
        db.maintenances().add(&maintenance).await.unwrap();

        db
    }

    fn invoice(id: &str, date: (i32, u32, u32)) -> Invoice {
        Invoice {
            id: id.to_string(),
            maintenance_id: "m1".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            total_cents: 8500,
            status: InvoiceStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_add_then_get_round_trips() {
        let db = test_db_with_history().await;
        let inv = invoice("i1", (2024, 1, 15));

        db.invoices().add(&inv).await.unwrap();
        let loaded = db.invoices().get_by_id("i1").await.unwrap().unwrap();
        assert_eq!(loaded, inv);
        assert!(!loaded.is_paid());
    }

    #[tokio::test]
    async fn test_toggle_flips_status_and_keeps_the_rest() {
        let db = test_db_with_history().await;
        db.invoices().add(&invoice("i1", (2024, 1, 15))).await.unwrap();

        // Toggle once: Pendiente → Pagada
        let mut loaded = db.invoices().get_by_id("i1").await.unwrap().unwrap();
        loaded.toggle_status();
        db.invoices().update(&loaded).await.unwrap();

        let after = db.invoices().get_by_id("i1").await.unwrap().unwrap();
        assert_eq!(after.status, InvoiceStatus::Paid);
        assert_eq!(after.status.as_str(), "Pagada");

        // Toggle again: back to Pendiente, total and reference untouched
        let mut loaded = after;
        loaded.toggle_status();
        db.invoices().update(&loaded).await.unwrap();

        let after = db.invoices().get_by_id("i1").await.unwrap().unwrap();
        assert_eq!(after.status, InvoiceStatus::Pending);
        assert_eq!(after.status.as_str(), "Pendiente");
        assert_eq!(after.total_cents, 8500);
        assert_eq!(after.maintenance_id, "m1");
    }

    #[tokio::test]
    async fn test_list_for_maintenance_is_date_descending() {
        let db = test_db_with_history().await;
        db.invoices().add(&invoice("i1", (2024, 1, 15))).await.unwrap();
        db.invoices().add(&invoice("i2", (2024, 2, 1))).await.unwrap();
        db.invoices().add(&invoice("i3", (2024, 2, 1))).await.unwrap();

        let invoices = db.invoices().list_for_maintenance("m1").await.unwrap();
        let ids: Vec<&str> = invoices.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["i2", "i3", "i1"]);
    }

    #[tokio::test]
    async fn test_add_for_unknown_maintenance_is_fk_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let orphan = Invoice {
            id: "i1".to_string(),
            maintenance_id: "no-such-event".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            total_cents: 8500,
            status: InvoiceStatus::Pending,
        };

        let err = db.invoices().add(&orphan).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::DbError::ForeignKeyViolation { .. }
        ));
    }
}
