//! # Car Repository
//!
//! Database operations for cars.
//!
//! ## Ownership Filtering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Cars belong to exactly one user, but the schema carries no     │
//! │  FOREIGN KEY on cars.user_id (inherited gap, kept visible).     │
//! │  Ownership is enforced here, in list_for_user's WHERE clause —  │
//! │  the only read path the UI uses to enumerate cars.              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deleting a car cascades to its maintenances (and transitively their
//! invoices), expense items, and reminders via the schema's FK rules.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use carlog_core::Car;

/// Repository for car database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CarRepository::new(pool);
///
/// let mine = repo.list_for_user("user-id").await?;
/// let car = repo.get_by_id("car-id").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CarRepository {
    pool: SqlitePool,
}

const CAR_COLUMNS: &str = "id, user_id, brand, model, year, plate, odometer_km, \
     image_url, next_service_date, color, transmission, fuel_type, purchase_date";

impl CarRepository {
    /// Creates a new CarRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CarRepository { pool }
    }

    /// Inserts a new car.
    ///
    /// ## Arguments
    /// * `car` - Car to insert (id generated beforehand by the caller)
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - Id already exists
    pub async fn add(&self, car: &Car) -> DbResult<()> {
        debug!(id = %car.id, plate = %car.plate, "Inserting car");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO cars (
                id, user_id, brand, model, year, plate, odometer_km,
                image_url, next_service_date, color, transmission,
                fuel_type, purchase_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&car.id)
        .bind(&car.user_id)
        .bind(&car.brand)
        .bind(&car.model)
        .bind(car.year)
        .bind(&car.plate)
        .bind(car.odometer_km)
        .bind(&car.image_url)
        .bind(car.next_service_date)
        .bind(&car.color)
        .bind(car.transmission)
        .bind(car.fuel_type)
        .bind(car.purchase_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Replaces every mutable field of an existing car by id.
    ///
    /// Silently no-ops when the id is absent — the form the user submitted
    /// simply refers to a car that is already gone.
    pub async fn update(&self, car: &Car) -> DbResult<()> {
        debug!(id = %car.id, "Updating car");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE cars SET
                user_id = ?2,
                brand = ?3,
                model = ?4,
                year = ?5,
                plate = ?6,
                odometer_km = ?7,
                image_url = ?8,
                next_service_date = ?9,
                color = ?10,
                transmission = ?11,
                fuel_type = ?12,
                purchase_date = ?13
            WHERE id = ?1
            "#,
        )
        .bind(&car.id)
        .bind(&car.user_id)
        .bind(&car.brand)
        .bind(&car.model)
        .bind(car.year)
        .bind(&car.plate)
        .bind(car.odometer_km)
        .bind(&car.image_url)
        .bind(car.next_service_date)
        .bind(&car.color)
        .bind(car.transmission)
        .bind(car.fuel_type)
        .bind(car.purchase_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            debug!(id = %car.id, "Update matched no car");
        }

        Ok(())
    }

    /// Deletes a car by id; no-op when absent.
    ///
    /// Cascades to maintenances (and their invoices), expense items, and
    /// reminders via the schema FK rules.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting car");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM cars WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets a car by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Car))` - Car found
    /// * `Ok(None)` - Car not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    /// Lists the cars owned by a user, ordered by brand then model.
    ///
    /// This WHERE clause is the ownership enforcement — see the module docs.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE user_id = ?1 ORDER BY brand, model"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id = %user_id, count = cars.len(), "Listed cars");
        Ok(cars)
    }

    /// Counts cars (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use carlog_core::{
        ExpenseIcon, ExpenseItem, FuelType, Invoice, InvoiceStatus, Maintenance, MaintenanceKind,
        Reminder, Transmission,
    };
    use chrono::NaiveDate;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_car(id: &str, user_id: &str) -> Car {
        Car {
            id: id.to_string(),
            user_id: user_id.to_string(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            plate: "ABC-123".to_string(),
            odometer_km: 45_000,
            image_url: None,
            next_service_date: NaiveDate::from_ymd_opt(2024, 9, 1),
            color: "Red".to_string(),
            transmission: Transmission::Manual,
            fuel_type: FuelType::Gasoline,
            purchase_date: NaiveDate::from_ymd_opt(2020, 3, 12),
        }
    }

    fn sample_maintenance(id: &str, car_id: &str) -> Maintenance {
        Maintenance {
            id: id.to_string(),
            car_id: car_id.to_string(),
            workshop_id: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Oil change".to_string(),
            cost_cents: 8500,
            kind: MaintenanceKind::Preventive,
            odometer_km: 45_000,
        }
    }

    #[tokio::test]
    async fn test_add_then_get_round_trips() {
        let db = test_db().await;
        let car = sample_car("1", "u1");

        db.cars().add(&car).await.unwrap();
        let loaded = db.cars().get_by_id("1").await.unwrap().unwrap();

        assert_eq!(loaded, car);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let db = test_db().await;
        assert!(db.cars().get_by_id("never-added").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_duplicate_id_is_unique_violation() {
        let db = test_db().await;
        let car = sample_car("1", "u1");

        db.cars().add(&car).await.unwrap();
        let err = db.cars().add(&car).await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let db = test_db().await;
        let mut car = sample_car("1", "u1");
        db.cars().add(&car).await.unwrap();

        car.odometer_km = 52_000;
        car.color = "Blue".to_string();
        db.cars().update(&car).await.unwrap();

        let loaded = db.cars().get_by_id("1").await.unwrap().unwrap();
        assert_eq!(loaded.odometer_km, 52_000);
        assert_eq!(loaded.color, "Blue");
    }

    #[tokio::test]
    async fn test_update_absent_id_is_silent_noop() {
        let db = test_db().await;
        let car = sample_car("ghost", "u1");

        db.cars().update(&car).await.unwrap();
        assert!(db.cars().get_by_id("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_noop() {
        let db = test_db().await;
        db.cars().delete("ghost").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let db = test_db().await;

        db.cars().add(&sample_car("1", "ana")).await.unwrap();
        let mut other = sample_car("2", "ana");
        other.brand = "Honda".to_string();
        other.model = "Civic".to_string();
        db.cars().add(&other).await.unwrap();
        db.cars().add(&sample_car("3", "luis")).await.unwrap();

        let cars = db.cars().list_for_user("ana").await.unwrap();
        assert_eq!(cars.len(), 2);
        // Ordered by brand then model
        assert_eq!(cars[0].brand, "Honda");
        assert_eq!(cars[1].brand, "Toyota");

        assert_eq!(db.cars().list_for_user("luis").await.unwrap().len(), 1);
        assert!(db.cars().list_for_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_children_and_invoices() {
        let db = test_db().await;
        let car = sample_car("1", "u1");
        db.cars().add(&car).await.unwrap();

        let maintenance = sample_maintenance("m1", "1");
        db.maintenances().add(&maintenance).await.unwrap();

        let invoice = Invoice {
            id: "i1".to_string(),
            maintenance_id: "m1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            total_cents: 8500,
            status: InvoiceStatus::Pending,
        };
        db.invoices().add(&invoice).await.unwrap();

        let expense = ExpenseItem {
            id: "e1".to_string(),
            car_id: "1".to_string(),
            description: "Fuel".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            amount_cents: 4500,
            icon: ExpenseIcon::Fuel,
        };
        db.expenses().add(&expense).await.unwrap();

        let reminder = Reminder {
            id: "r1".to_string(),
            car_id: "1".to_string(),
            title: "Renew insurance".to_string(),
            subtitle: "Due in March".to_string(),
        };
        db.reminders().add(&reminder).await.unwrap();

        db.cars().delete("1").await.unwrap();

        // Direct children are gone
        assert!(db.maintenances().get_by_id("m1").await.unwrap().is_none());
        assert!(db.expenses().get_by_id("e1").await.unwrap().is_none());
        assert!(db.reminders().get_by_id("r1").await.unwrap().is_none());
        // ...and so is the invoice of the deleted maintenance (transitive)
        assert!(db.invoices().get_by_id("i1").await.unwrap().is_none());
    }
}
