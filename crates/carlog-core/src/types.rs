//! # Domain Types
//!
//! Entity records and closed enumerations for the maintenance tracker.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                            │
//! │                                                                 │
//! │  User ──owns──► Car ──has──► Maintenance ──has──► Invoice       │
//! │                  │                │                             │
//! │                  │                └──refs──► Workshop (opt)     │
//! │                  ├──has──► ExpenseItem                          │
//! │                  └──has──► Reminder                             │
//! │                                                                 │
//! │  Closed enums: InvoiceStatus, MaintenanceKind, Transmission,    │
//! │                FuelType, ExpenseIcon                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity carries an opaque string `id` (UUID v4), generated by the
//! caller before insert — never by the database. Updates are full-record
//! replaces keyed by that id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Invoice Status
// =============================================================================

/// Payment status of an invoice.
///
/// Stored and serialized as the wire strings `"Pendiente"` / `"Pagada"`,
/// which the presentation layer displays verbatim. A closed enum instead of a
/// free string keeps invalid states unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum InvoiceStatus {
    /// Not yet paid.
    #[serde(rename = "Pendiente")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Pendiente"))]
    Pending,
    /// Paid in full.
    #[serde(rename = "Pagada")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Pagada"))]
    Paid,
}

impl InvoiceStatus {
    /// Returns the wire/display string for this status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pendiente",
            InvoiceStatus::Paid => "Pagada",
        }
    }

    /// Returns the opposite status. Toggling twice round-trips.
    #[inline]
    pub const fn toggled(&self) -> Self {
        match self {
            InvoiceStatus::Pending => InvoiceStatus::Paid,
            InvoiceStatus::Paid => InvoiceStatus::Pending,
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Pending
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Maintenance Kind
// =============================================================================

/// Category of a maintenance event.
///
/// Stored as `"Preventivo"` / `"Correctivo"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum MaintenanceKind {
    /// Scheduled service (oil change, inspection, rotation).
    #[serde(rename = "Preventivo")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Preventivo"))]
    Preventive,
    /// Repair of a fault.
    #[serde(rename = "Correctivo")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Correctivo"))]
    Corrective,
}

impl MaintenanceKind {
    /// Returns the wire/display string for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MaintenanceKind::Preventive => "Preventivo",
            MaintenanceKind::Corrective => "Correctivo",
        }
    }
}

impl fmt::Display for MaintenanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Transmission
// =============================================================================

/// Gearbox type of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Transmission {
    Manual,
    Automatic,
}

// =============================================================================
// Fuel Type
// =============================================================================

/// Fuel type of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
}

// =============================================================================
// Expense Icon
// =============================================================================

/// Icon shown next to an expense item.
///
/// A closed set with an explicit fallback: stored names the current build
/// doesn't recognize decode to [`ExpenseIcon::Other`] instead of failing or
/// string-matching against a UI-toolkit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseIcon {
    Fuel,
    Wash,
    Parking,
    Toll,
    Insurance,
    Repair,
    /// Fallback for unrecognized stored names.
    Other,
}

impl ExpenseIcon {
    /// Returns the stored name for this icon.
    pub const fn name(&self) -> &'static str {
        match self {
            ExpenseIcon::Fuel => "fuel",
            ExpenseIcon::Wash => "wash",
            ExpenseIcon::Parking => "parking",
            ExpenseIcon::Toll => "toll",
            ExpenseIcon::Insurance => "insurance",
            ExpenseIcon::Repair => "repair",
            ExpenseIcon::Other => "other",
        }
    }

    /// Maps a stored name back to an icon, falling back to `Other` for
    /// anything unrecognized (old builds, hand-edited rows).
    pub fn from_name(name: &str) -> Self {
        match name {
            "fuel" => ExpenseIcon::Fuel,
            "wash" => ExpenseIcon::Wash,
            "parking" => ExpenseIcon::Parking,
            "toll" => ExpenseIcon::Toll,
            "insurance" => ExpenseIcon::Insurance,
            "repair" => ExpenseIcon::Repair,
            _ => ExpenseIcon::Other,
        }
    }
}

impl Default for ExpenseIcon {
    fn default() -> Self {
        ExpenseIcon::Other
    }
}

impl fmt::Display for ExpenseIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// The derive(sqlx::Type) enum mapping rejects unknown strings on decode.
// ExpenseIcon needs the fallback-to-Other behavior instead, so the sqlx
// plumbing is written out by hand against TEXT.
#[cfg(feature = "sqlx")]
impl sqlx::Type<sqlx::Sqlite> for ExpenseIcon {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <&str as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlx")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for ExpenseIcon {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'q, sqlx::Sqlite>>::encode(self.name(), buf)
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for ExpenseIcon {
    fn decode(
        value: sqlx::sqlite::SqliteValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let name = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
        Ok(ExpenseIcon::from_name(name))
    }
}

// =============================================================================
// User
// =============================================================================

/// A user account. Owns cars.
///
/// `password_hash` is an opaque argon2 PHC string; carlog-core never inspects
/// it. No audit timestamps by design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login email, unique across all users.
    pub email: String,

    /// Salted password digest (never the plaintext).
    pub password_hash: String,
}

// =============================================================================
// Car
// =============================================================================

/// A tracked vehicle. Belongs to exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Car {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning user's id. NOTE: ownership is enforced only by the
    /// list-for-user query filter, not by a storage constraint — see the
    /// schema comment on `cars.user_id`.
    pub user_id: String,

    pub brand: String,
    pub model: String,

    /// Model year.
    pub year: i32,

    /// License plate.
    pub plate: String,

    /// Current odometer reading in kilometers.
    pub odometer_km: i64,

    /// Optional photo URL shown on the car card.
    pub image_url: Option<String>,

    /// Next scheduled service date, if one is planned.
    #[ts(as = "Option<String>")]
    pub next_service_date: Option<NaiveDate>,

    pub color: String,
    pub transmission: Transmission,
    pub fuel_type: FuelType,

    /// Purchase date, if known.
    #[ts(as = "Option<String>")]
    pub purchase_date: Option<NaiveDate>,
}

impl Car {
    /// "Brand Model (year)" label used in pickers and lists.
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }

    /// Whether the next scheduled service is due on or before `on`.
    /// A car without a scheduled date is never due.
    pub fn service_due(&self, on: NaiveDate) -> bool {
        match self.next_service_date {
            Some(date) => date <= on,
            None => false,
        }
    }
}

// =============================================================================
// Workshop
// =============================================================================

/// A repair shop that maintenance events may reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Workshop {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub name: String,

    /// What the shop specializes in (bodywork, electrics, ...).
    pub specialty: String,

    pub phone: String,
    pub location: String,

    /// Labor rate in cents per hour.
    pub hourly_rate_cents: i64,
}

impl Workshop {
    /// Returns the hourly labor rate as Money.
    #[inline]
    pub fn hourly_rate(&self) -> Money {
        Money::from_cents(self.hourly_rate_cents)
    }
}

// =============================================================================
// Maintenance
// =============================================================================

/// A maintenance event performed on a car, optionally at a workshop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Maintenance {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Car this event belongs to. Deleting the car deletes the event.
    pub car_id: String,

    /// Workshop where the work was done, if any. Deleting the workshop
    /// clears this field rather than deleting the event.
    pub workshop_id: Option<String>,

    #[ts(as = "String")]
    pub date: NaiveDate,

    pub description: String,

    /// Cost in cents.
    pub cost_cents: i64,

    pub kind: MaintenanceKind,

    /// Odometer reading in kilometers at the time of service.
    pub odometer_km: i64,
}

impl Maintenance {
    /// Returns the cost as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// An invoice issued for a maintenance event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Maintenance event this invoice bills. Deleting the event deletes
    /// the invoice.
    pub maintenance_id: String,

    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Total in cents.
    pub total_cents: i64,

    pub status: InvoiceStatus,
}

impl Invoice {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Whether this invoice has been paid.
    #[inline]
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Flips the payment status in place. Total and maintenance reference
    /// are untouched.
    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

// =============================================================================
// Expense Item
// =============================================================================

/// A running expense tied to a car (fuel, wash, parking, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ExpenseItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Car this expense belongs to. Deleting the car deletes the expense.
    pub car_id: String,

    pub description: String,

    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Amount in cents.
    pub amount_cents: i64,

    pub icon: ExpenseIcon,
}

impl ExpenseItem {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Reminder
// =============================================================================

/// A short note attached to a car ("Renew insurance", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Reminder {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Car this reminder belongs to. Deleting the car deletes the reminder.
    pub car_id: String,

    pub title: String,
    pub subtitle: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_status_strings() {
        assert_eq!(InvoiceStatus::Pending.as_str(), "Pendiente");
        assert_eq!(InvoiceStatus::Paid.as_str(), "Pagada");
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Pending);
    }

    #[test]
    fn test_invoice_status_toggle_round_trips() {
        let status = InvoiceStatus::Pending;
        assert_eq!(status.toggled(), InvoiceStatus::Paid);
        assert_eq!(status.toggled().toggled(), InvoiceStatus::Pending);
    }

    #[test]
    fn test_invoice_toggle_keeps_other_fields() {
        let mut invoice = Invoice {
            id: "i1".to_string(),
            maintenance_id: "m1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            total_cents: 8500,
            status: InvoiceStatus::Pending,
        };

        invoice.toggle_status();
        assert!(invoice.is_paid());
        invoice.toggle_status();
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.total_cents, 8500);
        assert_eq!(invoice.maintenance_id, "m1");
    }

    #[test]
    fn test_maintenance_kind_strings() {
        assert_eq!(MaintenanceKind::Preventive.as_str(), "Preventivo");
        assert_eq!(MaintenanceKind::Corrective.as_str(), "Correctivo");
    }

    #[test]
    fn test_expense_icon_round_trip() {
        for icon in [
            ExpenseIcon::Fuel,
            ExpenseIcon::Wash,
            ExpenseIcon::Parking,
            ExpenseIcon::Toll,
            ExpenseIcon::Insurance,
            ExpenseIcon::Repair,
            ExpenseIcon::Other,
        ] {
            assert_eq!(ExpenseIcon::from_name(icon.name()), icon);
        }
    }

    #[test]
    fn test_expense_icon_fallback() {
        assert_eq!(ExpenseIcon::from_name("jet_engine"), ExpenseIcon::Other);
        assert_eq!(ExpenseIcon::from_name(""), ExpenseIcon::Other);
    }

    #[test]
    fn test_car_service_due() {
        let mut car = sample_car();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        assert!(!car.service_due(today));

        car.next_service_date = NaiveDate::from_ymd_opt(2024, 5, 20);
        assert!(car.service_due(today));

        car.next_service_date = NaiveDate::from_ymd_opt(2024, 7, 1);
        assert!(!car.service_due(today));
    }

    #[test]
    fn test_car_display_name() {
        assert_eq!(sample_car().display_name(), "Toyota Corolla (2020)");
    }

    fn sample_car() -> Car {
        Car {
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
        }
    }
}
