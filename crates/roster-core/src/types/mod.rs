//! # Core Type Definitions
//!
//! This module contains the shared value types of the Roster core:
//! - Record identifiers (`RecordId`)
//! - Money (`Cents`)
//! - Field values used for filtering, sorting and export (`FieldValue`)
//! - Error types (`RosterError`)
//!
//! ## Arithmetic
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Use saturating arithmetic for sums and products

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIER
// =============================================================================

/// Opaque unique key of a record.
///
/// Records carry no identity beyond this key. Ids minted by the core are
/// UUID v4 strings; ids coming from a data source are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Create an id from an existing key.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Mint a fresh, globally unique id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// MONEY
// =============================================================================

/// An amount of money in integer cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Create an amount from whole units and cents, e.g. `Cents::new(12, 34)`.
    #[must_use]
    pub const fn new(units: i64, cents: i64) -> Self {
        Self(units.saturating_mul(100).saturating_add(cents))
    }

    /// Get the raw cent value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Multiply by a quantity, saturating at the bounds.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// Add two amounts, saturating at the bounds.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Cents {
    type Err = RosterError;

    /// Parse `"12"`, `"12.3"` or `"12.34"` (optionally negative).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RosterError::Validation(format!("Invalid amount: {s:?}"));
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (units, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if units.is_empty() || fraction.len() > 2 {
            return Err(invalid());
        }
        if !units.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let units: i64 = units.parse().map_err(|_| invalid())?;
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        let amount = Self::new(units, cents);
        Ok(if negative { Self(-amount.0) } else { amount })
    }
}

// =============================================================================
// FIELD VALUES
// =============================================================================

/// The value of a named record field.
///
/// Values of the same kind are totally ordered. Values of different kinds are
/// incomparable, and the filter engine treats such pairs as equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text.
    Text(String),
    /// Whole number (counts, stock levels).
    Integer(i64),
    /// Money in cents.
    Money(Cents),
    /// Point in time.
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Three-way comparison of two values of the same kind.
    ///
    /// Returns `None` when the kinds differ.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Money(a), Self::Money(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Numeric view of the value, if it has one (money yields cents).
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Money(c) => Some(c.0),
            Self::Text(_) | Self::Timestamp(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Money(c) => write!(f, "{c}"),
            Self::Timestamp(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Roster core.
///
/// - Mutations report failures through `Result<T, RosterError>`
/// - Derived reads (filtered views, pages) never fail
/// - The core never panics; all errors are recoverable
#[derive(Debug, Error)]
pub enum RosterError {
    /// Input data failed validation (create/update forms, amounts, config).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested record does not exist in the store.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record label, e.g. `User`.
        kind: &'static str,
        /// The missing id.
        id: RecordId,
    },

    /// A data source failed to produce records.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Local key-value storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
