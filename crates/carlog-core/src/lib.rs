//! # carlog-core: Pure Domain Model for CarLog
//!
//! This crate contains the domain model of the vehicle-maintenance tracker as
//! plain data and pure functions, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      CarLog Architecture                        │
//! │                                                                 │
//! │  Desktop shell (forms, lists, dashboards — out of scope)        │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │            ★ carlog-core (THIS CRATE) ★                   │  │
//! │  │                                                           │  │
//! │  │  ┌─────────┐  ┌─────────┐  ┌────────────┐                 │  │
//! │  │  │  types  │  │  money  │  │ validation │                 │  │
//! │  │  │  Car    │  │  Money  │  │   rules    │                 │  │
//! │  │  │ Invoice │  │ (cents) │  │   checks   │                 │  │
//! │  │  └─────────┘  └─────────┘  └────────────┘                 │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO DATABASE • PURE FUNCTIONS                    │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  carlog-db (SQLite queries, migrations, repositories)           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity records (Car, Workshop, Maintenance, ...) and closed enums
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic, no side effects
//! 2. **Integer Money**: all monetary values are cents (i64), never floats
//! 3. **Closed Enumerations**: status/category fields are tagged variants,
//!    not free-form strings
//! 4. **Opaque String IDs**: identifiers are caller-generated UUIDs, never
//!    database-generated

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum accepted password length for user accounts.
///
/// Digest computation itself is delegated to argon2 in carlog-db; this is
/// only the input-shape rule applied before hashing.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Earliest model year accepted for a car.
pub const CAR_YEAR_MIN: i32 = 1900;

/// Latest model year accepted for a car.
pub const CAR_YEAR_MAX: i32 = 2100;
