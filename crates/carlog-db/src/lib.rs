//! # carlog-db: Database Layer for CarLog
//!
//! This crate provides database access for the CarLog maintenance tracker.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       CarLog Data Flow                          │
//! │                                                                 │
//! │  UI action (save car form, toggle invoice, ...)                 │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                 carlog-db (THIS CRATE)                    │  │
//! │  │                                                           │  │
//! │  │  ┌────────────┐   ┌──────────────┐   ┌───────────────┐    │  │
//! │  │  │  Database  │   │ Repositories │   │  Migrations   │    │  │
//! │  │  │ (pool.rs)  │◄──│ car.rs, ...  │   │  (embedded)   │    │  │
//! │  │  └────────────┘   └──────────────┘   └───────────────┘    │  │
//! │  │        ▲                                                  │  │
//! │  │        └── AuthService (auth.rs, argon2 digests)          │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite database file (WAL mode, foreign keys ON)               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema migrations (the schema initializer)
//! - [`error`] - Database error types
//! - [`repository`] - One repository per entity
//! - [`auth`] - Account creation and password verification
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carlog_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()).await?;
//!
//! let cars = db.cars().list_for_user("user-id").await?;
//! let history = db.maintenances().list_for_car(&cars[0].id).await?;
//! ```
//!
//! ## Contract
//!
//! Every repository call owns one short transaction and is independent of any
//! other in-flight call; there is no shared mutable state, no caching, and no
//! retry logic in this crate. Absent rows are `Ok(None)`, storage failures
//! are [`DbError`].

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use auth::AuthService;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::car::CarRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::maintenance::MaintenanceRepository;
pub use repository::reminder::ReminderRepository;
pub use repository::user::UserRepository;
pub use repository::workshop::WorkshopRepository;
