//! # Auth Service
//!
//! Account creation and password verification, built on the user repository.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      AuthService                                │
//! │                                                                 │
//! │  create_user(email, pw)                                         │
//! │   ├── validate email + password shape (carlog-core)             │
//! │   ├── email already registered? ──► Ok(None)                    │
//! │   ├── hash_password(pw) ──► argon2 PHC string                   │
//! │   └── users.add(...) ──► Ok(Some(User))                         │
//! │                                                                 │
//! │  check_password(email, pw)                                      │
//! │   ├── unknown email ──► Ok(false)                               │
//! │   └── argon2 verify against stored digest ──► Ok(bool)          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This service contains no cryptographic logic of its own — digest
//! computation and constant-time comparison are delegated entirely to the
//! argon2 crate. Only orchestration lives here.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::{new_entity_id, user::UserRepository};
use carlog_core::validation::{validate_email, validate_password};
use carlog_core::User;

/// Account service over the user repository.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    /// Creates a new AuthService.
    pub fn new(pool: SqlitePool) -> Self {
        AuthService {
            users: UserRepository::new(pool),
        }
    }

    /// Creates a new account.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Account created
    /// * `Ok(None)` - The email is already registered
    /// * `Err(DbError::Validation)` - Rejected input, nothing persisted
    /// * `Err(DbError)` - Storage failure
    ///
    /// The uniqueness check runs up front for the common case; if another
    /// call wins the race between check and insert, the UNIQUE constraint on
    /// users.email reports it and that also maps to `Ok(None)`.
    pub async fn create_user(&self, email: &str, password: &str) -> DbResult<Option<User>> {
        let email = email.trim();

        validate_email(email)?;
        validate_password(password)?;

        if self.users.find_by_email(email).await?.is_some() {
            debug!(email = %email, "Email already registered");
            return Ok(None);
        }

        let user = User {
            id: new_entity_id(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
        };

        match self.users.add(&user).await {
            Ok(()) => {
                info!(id = %user.id, "User created");
                Ok(Some(user))
            }
            Err(err) if err.is_unique_violation() => {
                debug!(email = %email, "Lost creation race on email");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Looks up an account by email.
    pub async fn find_user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        self.users.find_by_email(email.trim()).await
    }

    /// Verifies a candidate password for an email.
    ///
    /// Returns `Ok(false)` both for an unknown email and for a wrong
    /// password — callers can't distinguish the two, on purpose.
    pub async fn check_password(&self, email: &str, password: &str) -> DbResult<bool> {
        let user = match self.users.find_by_email(email.trim()).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        Ok(verify_password(password, &user.password_hash))
    }
}

/// Hashes a password into an argon2 PHC string with a fresh random salt.
fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a candidate password against a stored PHC string.
///
/// An unparseable stored digest counts as a failed verification rather than
/// an error; a corrupt row must not open the account.
fn verify_password(password: &str, stored: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
