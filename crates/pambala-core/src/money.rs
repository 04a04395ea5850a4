//! # Money Module
//!
//! Provides the `Money` type for Kwanza amounts.
//!
//! ## Why Integer Kwanza?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  f64 amounts drift:  0.1 + 0.2 = 0.30000000000000004                   │
//! │                                                                         │
//! │  Kwanza prices in shops are quoted in whole units (cêntimos are not    │
//! │  used at the counter), so an i64 of whole Kz is exact and enough.      │
//! │                                                                         │
//! │  Display: Kz 1.234.567  (pt-BR grouping, no decimals)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operators saturate at the `i64` bounds instead of panicking; the
//! `checked_*` methods report overflow to callers that must not clamp.
//!
//! ## Usage
//! ```rust
//! use pambala_core::money::Money;
//!
//! let price = Money::from_kz(4_990);
//! let line = price * 2;
//! assert_eq!(line.kz(), 9_980);
//! assert_eq!(line.to_string(), "Kz 9.980");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Currency symbol printed before every amount.
pub const CURRENCY_SYMBOL: &str = "Kz";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole Angolan Kwanza.
///
/// ## Design Decisions
/// - **i64 (signed)**: expenses are stored as negative amounts, and a draft
///   whose discount exceeds its subtotal has a negative total
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Newtype serde**: serialises as a plain JSON number
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.sale_price ──┬──► SaleItem.price_at_sale ──► line total        │
/// │                       │                                                 │
/// │  Draft override ──────┘                                                 │
/// │                                                                         │
/// │  Σ lines − discount ──► Transaction.amount ──► invoice / analytics     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount.
    pub const MAX: Money = Money(i64::MAX);

    /// Creates a Money value from whole Kwanza.
    #[inline]
    pub const fn from_kz(kz: i64) -> Self {
        Money(kz)
    }

    /// Returns the value in whole Kwanza.
    #[inline]
    pub const fn kz(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// Used for display; commits go through [`Money::checked_mul_quantity`].
    ///
    /// ## Example
    /// ```rust
    /// use pambala_core::money::Money;
    ///
    /// let unit_price = Money::from_kz(299);
    /// assert_eq!(unit_price.multiply_quantity(3).kz(), 897);
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX), Money::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies money by a quantity, `None` on overflow.
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Subtracts two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Formats the bare number with `pt-BR` thousands grouping.
    ///
    /// ## Example
    /// ```rust
    /// use pambala_core::money::Money;
    ///
    /// assert_eq!(Money::from_kz(999).grouped(), "999");
    /// assert_eq!(Money::from_kz(1_234_567).grouped(), "1.234.567");
    /// assert_eq!(Money::from_kz(-15_000).grouped(), "-15.000");
    /// ```
    pub fn grouped(&self) -> String {
        group_thousands(self.0)
    }
}

/// Groups the digits of `value` in threes with `.` separators, the way
/// `Number.toLocaleString("pt-BR")` renders integers.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }

    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }

    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `Kz 1.234`, the form used on receipts and in the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", CURRENCY_SYMBOL, self.grouped())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
