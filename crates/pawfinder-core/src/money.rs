//! # Money Module
//!
//! Adoption fees as integer cents.
//!
//! Listings send fees in the smallest currency unit so that comparison
//! rows can test equality exactly; floats never enter the picture.
//!
//! ## Usage
//! ```rust
//! use pawfinder_core::money::Money;
//!
//! let fee = Money::from_cents(25_000);
//! assert_eq!(fee.to_string(), "$250.00");
//! assert_eq!(fee.fee_label(), "$250");
//! assert_eq!(Money::zero().fee_label(), "Free");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// A monetary value in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Short label used on cards and in comparison rows.
    ///
    /// Zero reads "Free"; whole amounts drop the ".00".
    pub fn fee_label(&self) -> String {
        if self.is_zero() {
            "Free".to_string()
        } else if self.cents_part() == 0 {
            let sign = if self.0 < 0 { "-" } else { "" };
            format!("{}${}", sign, self.dollars().abs())
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}
