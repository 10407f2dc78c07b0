//! # Unit Types
//!
//! Units of measure for line items, lightweight length/area wrappers used by
//! the structure estimator, and the cent-rounding rule shared by every
//! calculator.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{Feet, SquareFeet, Unit, round_cents};
//!
//! let unit = Unit::from("linear ft");
//! assert_eq!(unit, Unit::LinearFeet);
//!
//! let area: SquareFeet = Feet(10.0) * Feet(12.0);
//! assert_eq!(area.0, 120.0);
//!
//! assert_eq!(round_cents(12.345), 12.35);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

// ============================================================================
// Line Item Units
// ============================================================================

/// Unit of measure on a line item.
///
/// Serializes as the plain label (`"sqft"`, `"linear ft"`, `"each"`). Any other
/// label is kept as [`Unit::Unrecognized`] rather than rejected, so that a
/// line item always deserializes and the calculator stays total. Boundary
/// validation rejects unrecognized units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    /// Square feet
    SquareFeet,
    /// Linear feet
    LinearFeet,
    /// Per-unit count (fixtures, windows, ...)
    Each,
    /// Any label outside the supported set
    Unrecognized(String),
}

impl Unit {
    /// Supported units for UI selection
    pub const ALL: [Unit; 3] = [Unit::SquareFeet, Unit::LinearFeet, Unit::Each];

    /// Label used in JSON and on forms
    pub fn as_str(&self) -> &str {
        match self {
            Unit::SquareFeet => "sqft",
            Unit::LinearFeet => "linear ft",
            Unit::Each => "each",
            Unit::Unrecognized(label) => label,
        }
    }

    /// True for `sqft`, `linear ft` and `each`
    pub fn is_supported(&self) -> bool {
        !matches!(self, Unit::Unrecognized(_))
    }
}

impl From<&str> for Unit {
    fn from(label: &str) -> Self {
        match label {
            "sqft" => Unit::SquareFeet,
            "linear ft" => Unit::LinearFeet,
            "each" => Unit::Each,
            other => Unit::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Unit {
    fn from(label: String) -> Self {
        Unit::from(label.as_str())
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Unrecognized(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Length and Area
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareFeet(pub f64);

impl Add for Feet {
    type Output = Feet;
    fn add(self, rhs: Feet) -> Feet {
        Feet(self.0 + rhs.0)
    }
}

impl Mul for Feet {
    type Output = SquareFeet;
    fn mul(self, rhs: Feet) -> SquareFeet {
        SquareFeet(self.0 * rhs.0)
    }
}

impl Mul<f64> for Feet {
    type Output = Feet;
    fn mul(self, rhs: f64) -> Feet {
        Feet(self.0 * rhs)
    }
}

impl Add for SquareFeet {
    type Output = SquareFeet;
    fn add(self, rhs: SquareFeet) -> SquareFeet {
        SquareFeet(self.0 + rhs.0)
    }
}

impl Mul<f64> for SquareFeet {
    type Output = SquareFeet;
    fn mul(self, rhs: f64) -> SquareFeet {
        SquareFeet(self.0 * rhs)
    }
}

// ============================================================================
// Currency
// ============================================================================

/// Round a dollar amount to whole cents, half-up.
///
/// Amounts in this crate are never negative, so `f64::round` (half away from
/// zero) rounds half-up at the cent.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
