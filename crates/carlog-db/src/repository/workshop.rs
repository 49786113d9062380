//! # Workshop Repository
//!
//! Database operations for the shared workshop directory.
//!
//! Workshops are reference data: maintenance events point at them, but a
//! workshop is never owned by a car or user. Deleting one must not destroy
//! service history — the schema's ON DELETE SET NULL clears the reference on
//! maintenances instead.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use carlog_core::Workshop;

/// Repository for workshop database operations.
#[derive(Debug, Clone)]
pub struct WorkshopRepository {
    pool: SqlitePool,
}

const WORKSHOP_COLUMNS: &str = "id, name, specialty, phone, location, hourly_rate_cents";

impl WorkshopRepository {
    /// Creates a new WorkshopRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WorkshopRepository { pool }
    }

    /// Inserts a new workshop.
    pub async fn add(&self, workshop: &Workshop) -> DbResult<()> {
        debug!(id = %workshop.id, name = %workshop.name, "Inserting workshop");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO workshops (id, name, specialty, phone, location, hourly_rate_cents)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&workshop.id)
        .bind(&workshop.name)
        .bind(&workshop.specialty)
        .bind(&workshop.phone)
        .bind(&workshop.location)
        .bind(workshop.hourly_rate_cents)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Replaces every mutable field of an existing workshop by id.
    /// Silently no-ops when the id is absent.
    pub async fn update(&self, workshop: &Workshop) -> DbResult<()> {
        debug!(id = %workshop.id, "Updating workshop");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE workshops SET
                name = ?2,
                specialty = ?3,
                phone = ?4,
                location = ?5,
                hourly_rate_cents = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&workshop.id)
        .bind(&workshop.name)
        .bind(&workshop.specialty)
        .bind(&workshop.phone)
        .bind(&workshop.location)
        .bind(workshop.hourly_rate_cents)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            debug!(id = %workshop.id, "Update matched no workshop");
        }

        Ok(())
    }

    /// Deletes a workshop by id; no-op when absent.
    ///
    /// Referencing maintenances survive with their workshop_id cleared
    /// (ON DELETE SET NULL).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting workshop");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM workshops WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets a workshop by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Workshop>> {
        let workshop = sqlx::query_as::<_, Workshop>(&format!(
            "SELECT {WORKSHOP_COLUMNS} FROM workshops WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(workshop)
    }

    /// Lists all workshops, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Workshop>> {
        let workshops = sqlx::query_as::<_, Workshop>(&format!(
            "SELECT {WORKSHOP_COLUMNS} FROM workshops ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(workshops)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use carlog_core::{Car, FuelType, Maintenance, MaintenanceKind, Transmission};
    use chrono::NaiveDate;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_workshop(id: &str, name: &str) -> Workshop {
        Workshop {
            id: id.to_string(),
            name: name.to_string(),
            specialty: "General".to_string(),
            phone: "555-0100".to_string(),
            location: "Main St 12".to_string(),
            hourly_rate_cents: 6000,
        }
    }

    #[tokio::test]
    async fn test_add_then_get_round_trips() {
        let db = test_db().await;
        let workshop = sample_workshop("w1", "Taller Paco");

        db.workshops().add(&workshop).await.unwrap();
        let loaded = db.workshops().get_by_id("w1").await.unwrap().unwrap();
        assert_eq!(loaded, workshop);
        assert_eq!(loaded.hourly_rate().cents(), 6000);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let db = test_db().await;
        db.workshops().add(&sample_workshop("w1", "Zeta Motors")).await.unwrap();
        db.workshops().add(&sample_workshop("w2", "Auto Ana")).await.unwrap();

        let all = db.workshops().list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Auto Ana");
        assert_eq!(all[1].name, "Zeta Motors");
    }

    #[tokio::test]
    async fn test_delete_clears_reference_on_maintenance() {
        let db = test_db().await;

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
        db.workshops().add(&sample_workshop("w1", "Taller Paco")).await.unwrap();

        let maintenance = Maintenance {
            id: "m1".to_string(),
            car_id: "1".to_string(),
            workshop_id: Some("w1".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Brake pads".to_string(),
            cost_cents: 12_000,
            kind: MaintenanceKind::Corrective,
            odometer_km: 45_000,
        };
        db.maintenances().add(&maintenance).await.unwrap();

        db.workshops().delete("w1").await.unwrap();

        // The maintenance survives with the reference cleared
        let loaded = db.maintenances().get_by_id("m1").await.unwrap().unwrap();
        assert_eq!(loaded.workshop_id, None);
        assert_eq!(loaded.description, "Brake pads");
    }
}
