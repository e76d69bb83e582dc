// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Binary display units for byte quantities.

use std::fmt;

/// A binary magnitude (`K` = 1024 bytes through `P` = 1024⁵ bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Unit {
    bytes: u64,
    symbol: char,
}

impl Unit {
    pub const KIB: Unit = Unit::new('K', 1);
    pub const MIB: Unit = Unit::new('M', 2);
    pub const GIB: Unit = Unit::new('G', 3);
    pub const TIB: Unit = Unit::new('T', 4);
    pub const PIB: Unit = Unit::new('P', 5);

    /// All units, smallest first.
    pub const ALL: [Unit; 5] = [Unit::KIB, Unit::MIB, Unit::GIB, Unit::TIB, Unit::PIB];

    const fn new(symbol: char, power: u32) -> Self {
        Self {
            bytes: 1 << (10 * power),
            symbol,
        }
    }

    /// The single-letter symbol printed after the number.
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Bytes in one of this unit.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Picks the smallest unit in which `total` prints as at most `9999`.
    ///
    /// A unit qualifies when `total < 9999.5 × unit`, i.e. when the rounded
    /// integer form still fits in four digits. Totals beyond every unit fall
    /// back to `P`.
    pub fn for_total(total: u64) -> Unit {
        let total = u128::from(total);
        Unit::ALL[..Unit::ALL.len() - 1]
            .iter()
            .copied()
            .find(|u| {
                let b = u128::from(u.bytes);
                total < 9999 * b + b / 2
            })
            .unwrap_or(Unit::PIB)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
