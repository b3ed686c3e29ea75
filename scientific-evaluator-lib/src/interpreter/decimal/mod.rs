//! Arbitrary-precision decimal numbers with a significant-digit rounding context.
//!
//! A [`Decimal`] is an unscaled big integer together with a base-ten scale, so
//! `Decimal::new(12345, 2)` is `123.45`. Operations that can grow the number of digits take
//! a [`Context`] and round their exact result half-even to the context's precision.

pub mod math;

use crate::interpreter::error::ArithmeticError;
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Formatter;
use std::ops::Neg;
use std::str::FromStr;
use thiserror::Error;

/// Largest decimal exponent (in either direction) a value may carry.
pub const MAX_EXPONENT: i64 = 999_999_999;

/// Number of significant digits results are rounded to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Context {
    precision: u64,
}

impl Context {
    /// 34 significant digits, the precision of IEEE 754 decimal128.
    pub const DECIMAL128: Context = Context { precision: 34 };

    pub fn new(precision: u64) -> Self {
        Context {
            precision: precision.max(1),
        }
    }

    pub fn precision(&self) -> u64 {
        self.precision
    }

    pub(crate) fn widened(&self, extra_digits: u64) -> Self {
        Context {
            precision: self.precision + extra_digits,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::DECIMAL128
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal literal: {0}")]
pub struct ParseDecimalError(String);

/// A decimal number `unscaled × 10^(-scale)`.
///
/// Equality and ordering compare numeric values, so `2.5` and `2.50` are equal even though
/// they print differently.
#[derive(Clone)]
pub struct Decimal {
    unscaled: BigInt,
    scale: i64,
}

impl Decimal {
    pub fn new(unscaled: BigInt, scale: i64) -> Self {
        Decimal { unscaled, scale }
    }

    pub fn zero() -> Self {
        Decimal::new(BigInt::zero(), 0)
    }

    pub fn one() -> Self {
        Decimal::new(BigInt::one(), 0)
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    pub fn abs(&self) -> Decimal {
        Decimal::new(self.unscaled.abs(), self.scale)
    }

    /// Number of digits in the unscaled value.
    pub fn digits(&self) -> u64 {
        digit_count(&self.unscaled)
    }

    /// Exponent of the most significant digit, e.g. 2 for `123.4` and -3 for `0.00123`.
    pub fn adjusted_exponent(&self) -> i64 {
        self.digits() as i64 - 1 - self.scale
    }

    /// Rounds half-even to the precision of `context`.
    pub fn round(&self, context: Context) -> Decimal {
        let digits = self.digits();
        if digits <= context.precision {
            return self.clone();
        }
        let dropped = digits - context.precision;
        let unscaled = divide_half_even(&self.unscaled, &pow10(dropped));
        let rounded = Decimal::new(unscaled, self.scale - dropped as i64);
        // 9.99… can round up to 10.0…, one digit too many
        if rounded.digits() > context.precision {
            rounded.round(context)
        } else {
            rounded
        }
    }

    pub fn add(&self, other: &Decimal, context: Context) -> Decimal {
        if self.is_zero() {
            return other.round(context);
        }
        if other.is_zero() {
            return self.round(context);
        }
        let (larger, smaller) = if self.adjusted_exponent() >= other.adjusted_exponent() {
            (self, other)
        } else {
            (other, self)
        };
        // A term entirely below the rounding position only contributes its sign.
        let reach = larger.digits().max(context.precision) as i64 + 2;
        let floor = larger.adjusted_exponent() - reach;
        if smaller.adjusted_exponent() < floor {
            let sticky = Decimal::new(smaller.unscaled.signum(), -floor);
            return larger.add_exact(&sticky).round(context);
        }
        larger.add_exact(smaller).round(context)
    }

    pub fn sub(&self, other: &Decimal, context: Context) -> Decimal {
        self.add(&-other, context)
    }

    pub fn mul(&self, other: &Decimal, context: Context) -> Decimal {
        Decimal::new(&self.unscaled * &other.unscaled, self.scale + other.scale).round(context)
    }

    pub fn div(&self, divisor: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(self.quotient(divisor, context))
    }

    /// Division by a divisor the caller knows to be non-zero.
    pub(crate) fn quotient(&self, divisor: &Decimal, context: Context) -> Decimal {
        if self.is_zero() {
            return Decimal::zero();
        }
        let wanted = context.precision + 3;
        let shift = (wanted + divisor.digits()).saturating_sub(self.digits());
        let numerator = &self.unscaled * pow10(shift);
        let quotient = &numerator / &divisor.unscaled;
        let remainder = &numerator % &divisor.unscaled;
        let scale = self.scale - divisor.scale + shift as i64;
        if remainder.is_zero() {
            return Decimal::new(quotient, scale).round(context);
        }
        // An extra non-zero digit keeps an inexact quotient from looking like a tie.
        let sticky = if self.is_negative() == divisor.is_negative() {
            1
        } else {
            -1
        };
        Decimal::new(quotient * 10 + sticky, scale + 1).round(context)
    }

    pub(crate) fn div_integer(&self, divisor: u64, context: Context) -> Decimal {
        debug_assert!(divisor != 0);
        self.quotient(&Decimal::from(divisor), context)
    }

    /// Exact division by two.
    pub(crate) fn halved(&self) -> Decimal {
        Decimal::new(&self.unscaled * 5, self.scale + 1)
    }

    pub fn strip_trailing_zeros(&self) -> Decimal {
        if self.is_zero() {
            return Decimal::zero();
        }
        let ten = BigInt::from(10);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        while (&unscaled % &ten).is_zero() {
            unscaled /= &ten;
            scale -= 1;
        }
        Decimal::new(unscaled, scale)
    }

    /// Plain notation while the exponent stays within `limit`, scientific notation such as
    /// `1.5E+1000` beyond it. Trailing zeros are dropped either way.
    pub fn to_bounded_string(&self, limit: u64) -> String {
        let stripped = self.strip_trailing_zeros();
        let exponent = stripped.adjusted_exponent();
        if exponent.unsigned_abs() <= limit {
            return stripped.to_string();
        }
        let sign = if stripped.is_negative() { "-" } else { "" };
        let digits = stripped.unscaled.magnitude().to_str_radix(10);
        let (leading, fraction) = digits.split_at(1);
        if fraction.is_empty() {
            format!("{}{}E{:+}", sign, leading, exponent)
        } else {
            format!("{}{}.{}E{:+}", sign, leading, fraction, exponent)
        }
    }

    pub fn is_integer(&self) -> bool {
        self.scale <= 0 || self.strip_trailing_zeros().scale <= 0
    }

    /// The value as a big integer, if it has no fractional part.
    pub fn to_integer(&self) -> Option<BigInt> {
        if !self.is_integer() {
            return None;
        }
        let stripped = self.strip_trailing_zeros();
        Some(stripped.unscaled * pow10((-stripped.scale) as u64))
    }

    /// Nearest integer, ties to even.
    pub(crate) fn round_to_integer(&self) -> BigInt {
        if self.scale <= 0 {
            &self.unscaled * pow10((-self.scale) as u64)
        } else {
            divide_half_even(&self.unscaled, &pow10(self.scale as u64))
        }
    }

    pub(crate) fn within_exponent_limit(self) -> Result<Decimal, ArithmeticError> {
        if !self.is_zero() && self.adjusted_exponent().abs() > MAX_EXPONENT {
            Err(ArithmeticError::Overflow)
        } else {
            Ok(self)
        }
    }

    fn add_exact(&self, other: &Decimal) -> Decimal {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => Decimal::new(&self.unscaled + &other.unscaled, self.scale),
            Ordering::Less => {
                let widened = &self.unscaled * pow10((other.scale - self.scale) as u64);
                Decimal::new(widened + &other.unscaled, other.scale)
            }
            Ordering::Greater => {
                let widened = &other.unscaled * pow10((self.scale - other.scale) as u64);
                Decimal::new(&self.unscaled + widened, self.scale)
            }
        }
    }
}

fn digit_count(value: &BigInt) -> u64 {
    if value.is_zero() {
        return 1;
    }
    value.magnitude().to_str_radix(10).len() as u64
}

pub(crate) fn pow10(exponent: u64) -> BigInt {
    BigInt::from(10).pow(exponent as u32)
}

/// `value / divisor` rounded half-even; `divisor` must be positive.
fn divide_half_even(value: &BigInt, divisor: &BigInt) -> BigInt {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder.is_zero() {
        return quotient;
    }
    let away_from_zero = match (remainder.abs() * 2u32).cmp(divisor) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => !(&quotient % 2u32).is_zero(),
    };
    match (away_from_zero, value.is_negative()) {
        (false, _) => quotient,
        (true, false) => quotient + 1,
        (true, true) => quotient - 1,
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Self::Output {
        Decimal::new(-self.unscaled, self.scale)
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Self::Output {
        Decimal::new(-&self.unscaled, self.scale)
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let sign = self.unscaled.sign();
        match sign.cmp(&other.unscaled.sign()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        if sign == Sign::NoSign {
            return Ordering::Equal;
        }
        match self.adjusted_exponent().cmp(&other.adjusted_exponent()) {
            Ordering::Equal => self.add_exact(&-other).unscaled.sign().cmp(&Sign::NoSign),
            unequal if sign == Sign::Minus => unequal.reverse(),
            unequal => unequal,
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

macro_rules! impl_from_integer {
    ($($integer:ty),*) => {
        $(
            impl From<$integer> for Decimal {
                fn from(value: $integer) -> Self {
                    Decimal::new(BigInt::from(value), 0)
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64);

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Decimal::new(value, 0)
    }
}

impl ToPrimitive for Decimal {
    fn to_i64(&self) -> Option<i64> {
        self.to_integer()?.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_integer()?.to_u64()
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses an optionally signed decimal literal with an optional `e` exponent,
    /// such as `12`, `-0.5`, `.25`, `3.` or `1.5e-3`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDecimalError(text.to_string());

        let (mantissa, exponent) = match text.find(|c| c == 'e' || c == 'E') {
            Some(index) => {
                let exponent: i64 = text[index + 1..].parse().map_err(|_| invalid())?;
                (&text[..index], exponent)
            }
            None => (text, 0),
        };
        let (negative, unsigned) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };
        let (integer_part, fraction_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (integer_part.is_empty() && fraction_part.is_empty())
            || !all_digits(integer_part)
            || !all_digits(fraction_part)
        {
            return Err(invalid());
        }

        let digits = format!("{}{}", integer_part, fraction_part);
        let mut unscaled = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        if negative {
            unscaled = -unscaled;
        }
        let scale = (fraction_part.len() as i64)
            .checked_sub(exponent)
            .ok_or_else(invalid)?;
        Decimal::new(unscaled, scale)
            .within_exponent_limit()
            .map_err(|_| invalid())
    }
}

impl fmt::Display for Decimal {
    /// Plain notation without an exponent, like `java.math.BigDecimal::toPlainString`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.unscaled.magnitude().to_str_radix(10);
        if self.scale <= 0 {
            let zeros = if self.is_zero() { 0 } else { (-self.scale) as usize };
            return write!(f, "{}{}{}", sign, digits, "0".repeat(zeros));
        }
        let scale = self.scale as usize;
        if digits.len() > scale {
            let (integer, fraction) = digits.split_at(digits.len() - scale);
            write!(f, "{}{}.{}", sign, integer, fraction)
        } else {
            write!(f, "{}0.{}{}", sign, "0".repeat(scale - digits.len()), digits)
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
