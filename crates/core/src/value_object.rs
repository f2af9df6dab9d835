//! Value objects: equality by value, not identity.
//!
//! These types have **no identity**; they are defined entirely by their
//! attribute values and are replaced rather than modified.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Price of a single unit of an item.
///
/// Always finite and non-negative. Stored as a plain decimal number because
/// that is how it is written to snapshots.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitPrice(f64);

impl UnitPrice {
    pub const ZERO: UnitPrice = UnitPrice(0.0);

    pub fn new(amount: f64) -> Result<Self, CatalogError> {
        if !amount.is_finite() {
            return Err(CatalogError::invalid_data(format!(
                "unit price must be a finite number, got {amount}"
            )));
        }
        if amount < 0.0 {
            return Err(CatalogError::invalid_data(format!(
                "unit price cannot be negative, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    /// Value of `quantity` units at this price.
    pub fn times(self, quantity: i64) -> f64 {
        self.0 * quantity as f64
    }
}

impl core::fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for UnitPrice {
    type Error = CatalogError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitPrice> for f64 {
    fn from(value: UnitPrice) -> Self {
        value.0
    }
}
