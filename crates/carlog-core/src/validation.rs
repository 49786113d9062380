//! # Validation Module
//!
//! Input validation rules for CarLog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                          │
//! │                                                                 │
//! │  Layer 1: Frontend forms                                        │
//! │  ├── Basic format checks (empty, length)                        │
//! │  └── Immediate user feedback                                    │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 2: THIS MODULE (pure Rust, pre-persist)                  │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 3: Database (SQLite)                                     │
//! │  ├── NOT NULL constraints                                       │
//! │  ├── UNIQUE constraints (users.email)                           │
//! │  └── Foreign key constraints                                    │
//! │                                                                 │
//! │  Defense in depth: multiple layers catch different errors       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use carlog_core::validation::{validate_email, validate_year};
//!
//! validate_email("ana@example.com").unwrap();
//! validate_year(2020).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{CAR_YEAR_MAX, CAR_YEAR_MIN, MIN_PASSWORD_LEN};

// =============================================================================
// Account Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 254 characters
/// - Must contain exactly one `@` with a non-empty local part and a domain
///   containing a dot
///
/// This is a shape check, not RFC 5322 — the database UNIQUE constraint and
/// the mail round-trip do the rest.
///
/// ## Example
/// ```rust
/// use carlog_core::validation::validate_email;
///
/// assert!(validate_email("ana@example.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a candidate password before hashing.
///
/// ## Rules
/// - Must be at least [`MIN_PASSWORD_LEN`] characters
///
/// ## Example
/// ```rust
/// use carlog_core::validation::validate_password;
///
/// assert!(validate_password("correct horse").is_ok());
/// assert!(validate_password("short").is_err());
/// ```
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Car Validators
// =============================================================================

/// Validates a license plate.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 16 characters
/// - Letters, digits, spaces and hyphens only
pub fn validate_plate(plate: &str) -> ValidationResult<()> {
    let plate = plate.trim();

    if plate.is_empty() {
        return Err(ValidationError::Required {
            field: "plate".to_string(),
        });
    }

    if plate.len() > 16 {
        return Err(ValidationError::TooLong {
            field: "plate".to_string(),
            max: 16,
        });
    }

    if !plate
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "plate".to_string(),
            reason: "must contain only letters, numbers, spaces, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a car model year.
pub fn validate_year(year: i32) -> ValidationResult<()> {
    if !(CAR_YEAR_MIN..=CAR_YEAR_MAX).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "year".to_string(),
            min: CAR_YEAR_MIN as i64,
            max: CAR_YEAR_MAX as i64,
        });
    }

    Ok(())
}

/// Validates an odometer reading in kilometers.
pub fn validate_odometer_km(km: i64) -> ValidationResult<()> {
    if km < 0 {
        return Err(ValidationError::Negative {
            field: "odometer_km".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("  ana@example.com  ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@nodot").is_err());
        assert!(validate_email("ana@").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_plate() {
        assert!(validate_plate("ABC-123").is_ok());
        assert!(validate_plate("1234 XYZ").is_ok());

        assert!(validate_plate("").is_err());
        assert!(validate_plate("PLATE!@#").is_err());
        assert!(validate_plate("A-VERY-LONG-PLATE-NUMBER").is_err());
    }

    #[test]
    fn test_validate_year() {
        assert!(validate_year(2020).is_ok());
        assert!(validate_year(1900).is_ok());
        assert!(validate_year(1899).is_err());
        assert!(validate_year(2101).is_err());
    }

    #[test]
    fn test_validate_odometer() {
        assert!(validate_odometer_km(0).is_ok());
        assert!(validate_odometer_km(45_000).is_ok());
        assert!(validate_odometer_km(-1).is_err());
    }
}
