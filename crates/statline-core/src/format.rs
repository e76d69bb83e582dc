// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-width rendering of byte quantities.
//!
//! A quantity is printed as `value / unit` with as many decimals as fit in
//! four characters:
//!
//! | `value / unit`     | form       | example |
//! |--------------------|------------|---------|
//! | `>= 99.95`         | integer    | `9999`  |
//! | `>= 9.995`         | 1 decimal  | `99.9`  |
//! | otherwise          | 2 decimals | `9.99`  |
//!
//! The tier thresholds are the midpoints between the largest value of one
//! form and the smallest of the next (`99.9`/`100`, `9.99`/`10.0`), so a
//! value that would round up into the next tier is printed in that tier.
//! All comparisons and rounding use integer arithmetic; ties round up.

use crate::Unit;
use std::fmt;

/// Integer division rounding half up. `d` must be non-zero.
fn round_div(n: u128, d: u128) -> u128 {
    (n + d / 2) / d
}

/// A byte quantity scaled to a [`Unit`], formatted on display.
///
/// The unit symbol is not part of the output; callers append it once for a
/// `used/total` pair.
///
/// # Examples
/// ```
/// use statline_core::{Scaled, Unit};
///
/// assert_eq!(Scaled::new(3 << 30, Unit::GIB, true).to_string(), "3");
/// assert_eq!(Scaled::new(3 << 30, Unit::GIB, false).to_string(), "3.00");
/// assert_eq!(Scaled::new(1536, Unit::KIB, true).to_string(), "1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scaled {
    value: u64,
    unit: Unit,
    trim_zero: bool,
}

impl Scaled {
    /// Wraps `value` bytes for display in `unit`.
    ///
    /// With `trim_zero`, trailing decimal zeros are dropped (`8.00` → `8`,
    /// `1.50` → `1.5`). Without it the decimals are kept for alignment.
    pub fn new(value: u64, unit: Unit, trim_zero: bool) -> Self {
        Self {
            value,
            unit,
            trim_zero,
        }
    }
}

impl fmt::Display for Scaled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = u128::from(self.value);
        let unit = u128::from(self.unit.bytes());

        if 20 * value >= 1999 * unit {
            // value/unit >= 99.95
            write!(f, "{}", round_div(value, unit))
        } else if 200 * value >= 1999 * unit {
            // value/unit >= 9.995
            let d = round_div(value * 10, unit);
            if self.trim_zero && d % 10 == 0 {
                write!(f, "{}", d / 10)
            } else {
                write!(f, "{}.{}", d / 10, d % 10)
            }
        } else {
            let d = round_div(value * 100, unit);
            match (self.trim_zero, d % 100, d % 10) {
                (true, 0, _) => write!(f, "{}", d / 100),
                (true, _, 0) => write!(f, "{}.{}", d / 100, d % 100 / 10),
                _ => write!(f, "{}.{:02}", d / 100, d % 100),
            }
        }
    }
}

/// Formats `value` bytes in an explicit `unit`.
pub fn format_in_unit(value: u64, unit: Unit, trim_zero: bool) -> String {
    Scaled::new(value, unit, trim_zero).to_string()
}

/// Formats `value` bytes in the unit chosen for `reference_total`.
///
/// The numeric part is at most four characters wide as long as
/// `value < 9999.5 × unit`. Use the same `reference_total` for every figure
/// that must share a unit.
pub fn format_quantity(value: u64, reference_total: u64, trim_zero: bool) -> String {
    format_in_unit(value, Unit::for_total(reference_total), trim_zero)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIB: u64 = 1 << 10;
    const MIB: u64 = 1 << 20;
    const GIB: u64 = 1 << 30;

    fn k(value: u64, trim: bool) -> String {
        format_in_unit(value, Unit::KIB, trim)
    }

    #[test]
    fn test_round_div() {
        assert_eq!(round_div(5, 2), 3);
        assert_eq!(round_div(4, 2), 2);
        assert_eq!(round_div(7, 3), 2);
        assert_eq!(round_div(0, 9), 0);
    }

    #[test]
    fn test_integer_tier() {
        assert_eq!(k(100 * KIB, false), "100");
        assert_eq!(k(100 * KIB, true), "100");
        assert_eq!(k(9999 * KIB, false), "9999");
        assert_eq!(k(1234 * KIB + 511, false), "1234");
        assert_eq!(k(1234 * KIB + 512, false), "1235");
    }

    #[test]
    fn test_one_decimal_tier() {
        assert_eq!(k(10 * KIB, false), "10.0");
        assert_eq!(k(10 * KIB, true), "10");
        assert_eq!(k(42 * KIB + KIB / 2, false), "42.5");
        assert_eq!(k(42 * KIB + KIB / 2, true), "42.5");
    }

    #[test]
    fn test_two_decimal_tier() {
        assert_eq!(k(0, false), "0.00");
        assert_eq!(k(0, true), "0");
        assert_eq!(k(KIB, false), "1.00");
        assert_eq!(k(KIB, true), "1");
        assert_eq!(k(KIB + KIB / 2, false), "1.50");
        assert_eq!(k(KIB + KIB / 2, true), "1.5");
        assert_eq!(k(KIB + KIB / 4, true), "1.25");
        assert_eq!(k(5, false), "0.00");
        assert_eq!(k(6, false), "0.01");
    }

    #[test]
    fn test_tier_boundary_99_95() {
        // 99.95 KiB is not a whole number of bytes; the first byte at or
        // above it must already print as an integer.
        let first_integer = (1999 * KIB).div_ceil(20);
        assert_eq!(k(first_integer, false), "100");
        assert_eq!(k(first_integer - 1, false), "99.9");
    }

    #[test]
    fn test_tier_boundary_9_995() {
        let first_one_decimal = (1999 * KIB).div_ceil(200);
        assert_eq!(k(first_one_decimal, false), "10.0");
        assert_eq!(k(first_one_decimal, true), "10");
        assert_eq!(k(first_one_decimal - 1, false), "9.99");
    }

    #[test]
    fn test_ties_round_up() {
        // 10.25 KiB -> 102.5 tenths -> 10.3
        assert_eq!(k(10 * KIB + KIB / 4, false), "10.3");
        // 1.125 KiB -> 112.5 hundredths -> 1.13
        assert_eq!(k(KIB + KIB / 8, false), "1.13");
        // 100.5 KiB -> 101
        assert_eq!(k(100 * KIB + KIB / 2, false), "101");
    }

    #[test]
    fn test_numeric_part_is_at_most_four_chars() {
        let limit = 9999 * KIB + KIB / 2;
        let mut checked = 0u64;
        let mut value = 0u64;
        while value < limit {
            for trim in [false, true] {
                let s = k(value, trim);
                assert!(s.len() <= 4, "{value} bytes rendered as '{s}'");
            }
            checked += 1;
            value += if value < 20 * KIB { 1 } else { 37 };
        }
        assert!(checked > 20_000);
        assert_eq!(k(limit - 1, false).len(), 4);
    }

    #[test]
    fn test_width_bound_in_every_unit() {
        for unit in Unit::ALL {
            let b = unit.bytes();
            for value in [0, b / 3, 9 * b, 9 * b + b - 1, 99 * b, 9999 * b + b / 2 - 1] {
                let s = format_in_unit(value, unit, false);
                assert!(s.len() <= 4, "{value} in {unit} rendered as '{s}'");
            }
        }
    }

    #[test]
    fn test_format_quantity_picks_unit_from_total() {
        let total = 512 * MIB;
        assert_eq!(format_quantity(total, total, true), "512");
        assert_eq!(format_quantity(0, total, true), "0");
        assert_eq!(format_quantity(0, total, false), "0.00");
        assert_eq!(format_quantity(256 * MIB, total, false), "256");
    }

    #[test]
    fn test_gib_figures() {
        assert_eq!(format_in_unit(8 * GIB, Unit::GIB, true), "8");
        assert_eq!(format_in_unit(2_400_000_000, Unit::GIB, false), "2.24");
    }

    #[test]
    fn test_largest_values_do_not_overflow() {
        assert_eq!(format_in_unit(u64::MAX, Unit::PIB, true), "16384");
        assert_eq!(format_in_unit(u64::MAX, Unit::KIB, true).len(), 17);
    }
}
