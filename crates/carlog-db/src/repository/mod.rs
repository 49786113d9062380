//! # Repository Module
//!
//! One repository per entity, each a thin handle over the shared pool.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                           │
//! │                                                                 │
//! │  UI action                                                      │
//! │       │   db.maintenances().list_for_car("car-id")              │
//! │       ▼                                                         │
//! │  MaintenanceRepository                                          │
//! │  ├── add(&self, maintenance)                                    │
//! │  ├── update(&self, maintenance)    full-record replace by id    │
//! │  ├── delete(&self, id)                                          │
//! │  ├── get_by_id(&self, id)          → Option, absent ≠ error     │
//! │  └── list_for_car(&self, car_id)   → date descending            │
//! │       │                                                         │
//! │       ▼   one SQL statement in one short transaction            │
//! │  SQLite                                                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Uniform Contract
//!
//! - `add` inserts; duplicate ids surface as `DbError::UniqueViolation`
//! - `update` replaces every mutable field by id and silently no-ops when
//!   the id is absent
//! - `delete` no-ops when the id is absent; FK rules handle cascades
//! - `get_by_id` returns `Ok(None)` for absent rows
//! - list operations define the ordering the UI renders
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - accounts (consumed by [`crate::auth`])
//! - [`car::CarRepository`] - vehicles, filtered by owner
//! - [`workshop::WorkshopRepository`] - shared workshop directory
//! - [`maintenance::MaintenanceRepository`] - service history per car
//! - [`invoice::InvoiceRepository`] - invoices per maintenance
//! - [`expense::ExpenseRepository`] - running expenses per car
//! - [`reminder::ReminderRepository`] - notes per car

pub mod car;
pub mod expense;
pub mod invoice;
pub mod maintenance;
pub mod reminder;
pub mod user;
pub mod workshop;

use uuid::Uuid;

/// Generates a fresh opaque entity id.
///
/// Identifiers are caller-generated UUID v4 strings — the database never
/// assigns them. Used by the auth service and the seed binary; the UI layer
/// calls this before submitting a new record.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}
