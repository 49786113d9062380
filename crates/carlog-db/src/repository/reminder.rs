//! # Reminder Repository
//!
//! Database operations for per-car reminder notes.
//!
//! Reminders have no date of their own; the list keeps insertion order.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use carlog_core::Reminder;

/// Repository for reminder database operations.
#[derive(Debug, Clone)]
pub struct ReminderRepository {
    pool: SqlitePool,
}

const REMINDER_COLUMNS: &str = "id, car_id, title, subtitle";

impl ReminderRepository {
    /// Creates a new ReminderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReminderRepository { pool }
    }

    /// Inserts a new reminder.
    pub async fn add(&self, reminder: &Reminder) -> DbResult<()> {
        debug!(id = %reminder.id, car_id = %reminder.car_id, "Inserting reminder");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO reminders (id, car_id, title, subtitle)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&reminder.id)
        .bind(&reminder.car_id)
        .bind(&reminder.title)
        .bind(&reminder.subtitle)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Replaces every mutable field of an existing reminder by id.
    /// Silently no-ops when the id is absent.
    pub async fn update(&self, reminder: &Reminder) -> DbResult<()> {
        debug!(id = %reminder.id, "Updating reminder");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE reminders SET
                car_id = ?2,
                title = ?3,
                subtitle = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&reminder.id)
        .bind(&reminder.car_id)
        .bind(&reminder.title)
        .bind(&reminder.subtitle)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            debug!(id = %reminder.id, "Update matched no reminder");
        }

        Ok(())
    }

    /// Deletes a reminder by id; no-op when absent.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting reminder");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reminders WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets a reminder by its id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, Reminder>(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    /// Lists a car's reminders in insertion order.
    pub async fn list_for_car(&self, car_id: &str) -> DbResult<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, Reminder>(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE car_id = ?1 ORDER BY rowid ASC"
        ))
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use carlog_core::{Car, FuelType, Transmission};

    async fn test_db_with_car(car_id: &str) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let car = Car {
            id: car_id.to_string(),
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
        db
    }

    fn reminder(id: &str, title: &str) -> Reminder {
        Reminder {
            id: id.to_string(),
            car_id: "1".to_string(),
            title: title.to_string(),
            subtitle: "Soon".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_then_get_round_trips() {
        let db = test_db_with_car("1").await;
        let note = reminder("r1", "Renew insurance");

        db.reminders().add(&note).await.unwrap();
        let loaded = db.reminders().get_by_id("r1").await.unwrap().unwrap();
        assert_eq!(loaded, note);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let db = test_db_with_car("1").await;
        db.reminders().add(&reminder("r1", "ITV inspection")).await.unwrap();
        db.reminders().add(&reminder("r2", "Renew insurance")).await.unwrap();

        let notes = db.reminders().list_for_car("1").await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, "r1");
        assert_eq!(notes[1].id, "r2");
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let db = test_db_with_car("1").await;
        let mut note = reminder("r1", "ITV inspection");
        db.reminders().add(&note).await.unwrap();

        note.subtitle = "Next week".to_string();
        db.reminders().update(&note).await.unwrap();
        assert_eq!(
            db.reminders().get_by_id("r1").await.unwrap().unwrap().subtitle,
            "Next week"
        );

        db.reminders().delete("r1").await.unwrap();
        assert!(db.reminders().get_by_id("r1").await.unwrap().is_none());
    }
}
