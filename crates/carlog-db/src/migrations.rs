//! # Database Migrations
//!
//! Embedded SQL migrations — the schema initializer.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                          │
//! │                                                                 │
//! │  App Startup                                                    │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  Check _sqlx_migrations table (created on first run)            │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  Compare embedded migrations vs applied                         │
//! │       │                                                         │
//! │       ├── 001_initial_schema.sql ✓ (already applied)            │
//! │       └── 002_...                ⬜ (NEW - needs to run)         │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  Run pending migrations in order, record each                   │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failure here is a startup-time fatal condition: it propagates to the
//! caller without retry.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql` (e.g., `002_add_fuel_log.sql`)
//! 3. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 4. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds all SQL files from the specified
/// directory into the binary at compile time. No runtime file access needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// ## Safety
/// - Idempotent: safe to run on every process start
/// - Transactional: each migration runs in a transaction
/// - Ordered: migrations run in filename order (001, 002, ...)
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let (total, applied_before) = migration_status(pool).await?;

    if applied_before < total {
        info!(
            pending = total - applied_before,
            "Applying schema migrations"
        );
    }

    MIGRATOR.run(pool).await?;

    info!(applied = total, "Schema is up to date");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)`.
///
/// Exposed to callers as [`crate::pool::Database::migration_status`]; the
/// first run reports 0 applied because the bookkeeping table itself doesn't
/// exist yet.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
