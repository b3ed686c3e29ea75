//! Elementary and transcendental functions over [`Decimal`].
//!
//! Every function works internally with a few guard digits beyond the requested context and
//! rounds once at the end, so results are correct to within the last digit.

use super::{pow10, Context, Decimal};
use crate::interpreter::error::ArithmeticError;
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};
use once_cell::sync::Lazy;
use std::sync::RwLock;

const GUARD_DIGITS: u64 = 10;

/// `exp(x)` leaves the exponent range once `x` is above `ln(10) × 10^9`.
const EXP_LIMIT: i64 = 2_302_585_093;

/// Operands in error messages are printed plainly only up to this decimal exponent.
const PLAIN_OPERAND_EXPONENT: u64 = 34;

/// Trigonometric arguments are reduced modulo 2π only up to this decimal exponent.
const MAX_TRIG_EXPONENT: i64 = 1000;

fn domain(function: &'static str, operand: &Decimal) -> ArithmeticError {
    ArithmeticError::Domain {
        function,
        operand: operand.to_bounded_string(PLAIN_OPERAND_EXPONENT),
    }
}

fn half() -> Decimal {
    Decimal::new(BigInt::from(5), 1)
}

fn with_sign(value: Decimal, negative: bool) -> Decimal {
    if negative {
        -value
    } else {
        value
    }
}

/// True once `term` can no longer change `sum` at the precision of `context`.
fn is_negligible(term: &Decimal, sum: &Decimal, context: Context) -> bool {
    term.is_zero()
        || (!sum.is_zero()
            && term.adjusted_exponent() < sum.adjusted_exponent() - context.precision() as i64 - 1)
}

/// The most precise π computed so far; every request at or below its precision is a rounding.
static PI: Lazy<RwLock<Decimal>> =
    Lazy::new(|| RwLock::new(machin_pi(Context::DECIMAL128.precision() + GUARD_DIGITS)));

/// π rounded to `context`.
pub fn pi(context: Context) -> Decimal {
    let digits = context.precision() + GUARD_DIGITS;
    if let Ok(cached) = PI.read() {
        if cached.scale() >= digits as i64 {
            return cached.round(context);
        }
    }
    let computed = machin_pi(digits);
    if let Ok(mut cached) = PI.write() {
        if computed.scale() > cached.scale() {
            *cached = computed.clone();
        }
    }
    computed.round(context)
}

/// π to `digits` decimal places by Machin's formula, `16·atan(1/5) − 4·atan(1/239)`, in
/// scaled integer arithmetic.
fn machin_pi(digits: u64) -> Decimal {
    let scale = pow10(digits);
    let pi = arctan_inverse_scaled(5, &scale) * 16 - arctan_inverse_scaled(239, &scale) * 4;
    Decimal::new(pi, digits as i64)
}

/// `atan(1/q) × scale`, truncating each term.
fn arctan_inverse_scaled(q: u32, scale: &BigInt) -> BigInt {
    let q_squared = BigInt::from(q) * q;
    let mut power = BigInt::from(q);
    let mut sum = BigInt::zero();
    for k in 0u32.. {
        let term = scale / (&power * (2 * k + 1));
        if term.is_zero() {
            break;
        }
        if k % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
        power *= &q_squared;
    }
    sum
}

/// Euler's number.
pub fn e(context: Context) -> Decimal {
    exp_series(&Decimal::one(), context.widened(GUARD_DIGITS)).round(context)
}

pub fn exp(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_zero() {
        return Ok(Decimal::one());
    }
    if x.abs() > Decimal::from(EXP_LIMIT) {
        return Err(ArithmeticError::Overflow);
    }
    if x.is_negative() {
        let reciprocal = exp(&-x, context.widened(GUARD_DIGITS))?;
        return Decimal::one().div(&reciprocal, context);
    }

    // exp(x) = exp(x / 2^k)^(2^k)
    let mut reduced = x.clone();
    let mut halvings = 0u64;
    while reduced > half() {
        reduced = reduced.halved();
        halvings += 1;
    }
    let work = context.widened(GUARD_DIGITS + halvings / 3 + 1);
    let mut result = exp_series(&reduced, work);
    for _ in 0..halvings {
        result = result.mul(&result, work);
    }
    result.round(context).within_exponent_limit()
}

fn exp_series(x: &Decimal, context: Context) -> Decimal {
    let mut sum = Decimal::one();
    let mut term = Decimal::one();
    for n in 1.. {
        term = term.mul(x, context).div_integer(n, context);
        if is_negligible(&term, &sum, context) {
            break;
        }
        sum = sum.add(&term, context);
    }
    sum
}

/// Natural logarithm.
pub fn ln(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_negative() || x.is_zero() {
        return Err(domain("ln", x));
    }
    if *x == Decimal::one() {
        return Ok(Decimal::zero());
    }
    Ok(ln_positive(x, context.widened(GUARD_DIGITS)).round(context))
}

/// Base-ten logarithm, exact for powers of ten.
pub fn log10(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_negative() || x.is_zero() {
        return Err(domain("lg", x));
    }
    let stripped = x.strip_trailing_zeros();
    if stripped.unscaled().is_one() {
        return Ok(Decimal::from(-stripped.scale()));
    }
    let work = context.widened(GUARD_DIGITS);
    Ok(ln_positive(x, work).quotient(&ln10(work), work).round(context))
}

/// `ln(x)` for `x > 0` without final rounding.
fn ln_positive(x: &Decimal, context: Context) -> Decimal {
    let two = Decimal::from(2);
    if *x >= half() && *x <= two {
        return ln_series(x, context);
    }

    // x = m · 2^k · 10^p with m in [1, 2]
    let exponent = x.adjusted_exponent();
    let mut mantissa = Decimal::new(x.unscaled().clone(), x.scale() + exponent);
    let mut halvings = 0i64;
    while mantissa > two {
        mantissa = mantissa.halved();
        halvings += 1;
    }
    let mut result = ln_series(&mantissa, context);
    if halvings > 0 {
        let scaled = ln2(context).mul(&Decimal::from(halvings), context);
        result = result.add(&scaled, context);
    }
    if exponent != 0 {
        let scaled = ln10(context).mul(&Decimal::from(exponent), context);
        result = result.add(&scaled, context);
    }
    result
}

/// `ln(y) = 2·atanh((y − 1)/(y + 1))`, converging quickly for y near 1.
fn ln_series(y: &Decimal, context: Context) -> Decimal {
    let one = Decimal::one();
    let z = y.sub(&one, context).quotient(&y.add(&one, context), context);
    atanh_series(&z, context).mul(&Decimal::from(2), context)
}

fn ln2(context: Context) -> Decimal {
    ln_series(&Decimal::from(2), context)
}

/// `ln(10) = 3·ln(2) + ln(1.25)`
fn ln10(context: Context) -> Decimal {
    let ln_1_25 = ln_series(&Decimal::new(BigInt::from(125), 2), context);
    ln2(context)
        .mul(&Decimal::from(3), context)
        .add(&ln_1_25, context)
}

fn atanh_series(z: &Decimal, context: Context) -> Decimal {
    if z.is_zero() {
        return Decimal::zero();
    }
    let z_squared = z.mul(z, context);
    let mut power = z.clone();
    let mut sum = z.clone();
    for k in 1.. {
        power = power.mul(&z_squared, context);
        let term = power.div_integer(2 * k + 1, context);
        if is_negligible(&term, &sum, context) {
            break;
        }
        sum = sum.add(&term, context);
    }
    sum
}

/// `base^exponent`.
pub fn pow(base: &Decimal, exponent: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if exponent.is_zero() {
        return Ok(Decimal::one());
    }
    if base.is_zero() {
        return if exponent.is_negative() {
            Err(ArithmeticError::DivisionByZero)
        } else {
            Ok(Decimal::zero())
        };
    }
    if exponent.is_integer() {
        return integer_power(base, exponent, context);
    }
    if base.is_negative() {
        return Err(domain("^", base));
    }
    power_by_logarithm(base, exponent, context)
}

fn integer_power(base: &Decimal, exponent: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    let negative_result = base.is_negative() && is_odd_integer(exponent);
    if base.abs() == Decimal::one() {
        return Ok(with_sign(Decimal::one(), negative_result));
    }
    let count = if exponent.adjusted_exponent() <= 18 {
        exponent.to_i64()
    } else {
        None
    };
    let count = match count {
        Some(count) => count,
        None => {
            let magnitude = power_by_logarithm(&base.abs(), exponent, context)?;
            return Ok(with_sign(magnitude, negative_result));
        }
    };

    let work = context.widened(GUARD_DIGITS + 20);
    let mut remaining = count.unsigned_abs();
    let mut square = base.clone();
    let mut result = Decimal::one();
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result.mul(&square, work).within_exponent_limit()?;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = square.mul(&square, work).within_exponent_limit()?;
        }
    }
    if count < 0 {
        result = Decimal::one().div(&result, work)?;
    }
    result.round(context).within_exponent_limit()
}

/// `exp(y · ln x)` for `x > 0`.
fn power_by_logarithm(base: &Decimal, exponent: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    let extra = exponent.adjusted_exponent().clamp(0, 64) as u64;
    let work = context.widened(2 * GUARD_DIGITS + extra);
    let logarithm = ln_positive(base, work).mul(exponent, work);
    exp(&logarithm, context)
}

fn is_odd_integer(value: &Decimal) -> bool {
    let stripped = value.strip_trailing_zeros();
    stripped.scale() == 0 && !(stripped.unscaled() % 2u32).is_zero()
}

/// Square root; negative operands are a domain error.
pub fn sqrt(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_negative() {
        return Err(domain("√", x));
    }
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    Ok(nth_root(x, 2, context))
}

/// Cube root, defined for every real operand.
pub fn cbrt(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    let root = nth_root(&x.abs(), 3, context);
    Ok(with_sign(root, x.is_negative()))
}

/// Integer root of the unscaled value, shifted so the root carries enough digits.
/// `x` must be positive.
fn nth_root(x: &Decimal, degree: u32, context: Context) -> Decimal {
    let degree_digits = i64::from(degree);
    let wanted = (context.precision() + 2) * u64::from(degree);
    let mut shift = wanted.saturating_sub(x.digits()) as i64;
    shift += (degree_digits - (x.scale() + shift).rem_euclid(degree_digits)) % degree_digits;

    let radicand = x.unscaled() * pow10(shift as u64);
    let root = radicand.nth_root(degree);
    let scale = (x.scale() + shift) / degree_digits;
    if root.pow(degree) == radicand {
        Decimal::new(root, scale).round(context)
    } else {
        Decimal::new(root * 10 + 1, scale + 1).round(context)
    }
}

fn trig_context(x: &Decimal, context: Context) -> Context {
    context.widened(GUARD_DIGITS + x.adjusted_exponent().max(0) as u64)
}

/// `x − 2πn` for the nearest integer `n`.
fn reduce_angle(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.adjusted_exponent() > MAX_TRIG_EXPONENT {
        return Err(ArithmeticError::Overflow);
    }
    let two_pi = pi(context).mul(&Decimal::from(2), context);
    let turns = x.quotient(&two_pi, context).round_to_integer();
    if turns.is_zero() {
        return Ok(x.clone());
    }
    let whole_turns = two_pi.mul(&Decimal::from(turns), context);
    Ok(x.sub(&whole_turns, context))
}

pub fn sin(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    let work = trig_context(x, context);
    let reduced = reduce_angle(x, work)?;
    Ok(sin_series(&reduced, work).round(context))
}

pub fn cos(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    let work = trig_context(x, context);
    let reduced = reduce_angle(x, work)?;
    Ok(cos_series(&reduced, work).round(context))
}

/// Tangent; fails with division by zero where the cosine vanishes.
pub fn tan(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    let work = trig_context(x, context);
    let reduced = reduce_angle(x, work)?;
    let cosine = cos_series(&reduced, work);
    // A cosine below one unit in the last place of the argument is zero.
    let resolution = x.adjusted_exponent().max(0) - context.precision() as i64;
    if cosine.is_zero() || cosine.adjusted_exponent() <= resolution {
        return Err(ArithmeticError::DivisionByZero);
    }
    sin_series(&reduced, work).div(&cosine, context)
}

fn sin_series(x: &Decimal, context: Context) -> Decimal {
    if x.is_zero() {
        return Decimal::zero();
    }
    let x_squared = x.mul(x, context);
    let mut term = x.clone();
    let mut sum = x.clone();
    for k in 1.. {
        term = -term
            .mul(&x_squared, context)
            .div_integer((2 * k) * (2 * k + 1), context);
        if is_negligible(&term, &sum, context) {
            break;
        }
        sum = sum.add(&term, context);
    }
    sum
}

fn cos_series(x: &Decimal, context: Context) -> Decimal {
    let x_squared = x.mul(x, context);
    let mut term = Decimal::one();
    let mut sum = Decimal::one();
    for k in 1.. {
        term = -term
            .mul(&x_squared, context)
            .div_integer((2 * k - 1) * (2 * k), context);
        if is_negligible(&term, &sum, context) {
            break;
        }
        sum = sum.add(&term, context);
    }
    sum
}

pub fn atan(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    Ok(atan_unbounded(x, context.widened(GUARD_DIGITS)).round(context))
}

pub fn asin(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    let one = Decimal::one();
    if x.abs() > one {
        return Err(domain("asin", x));
    }
    let work = context.widened(GUARD_DIGITS);
    if x.abs() == one {
        return Ok(with_sign(pi(work).halved(), x.is_negative()).round(context));
    }
    // asin(x) = atan(x / √((1 − x)(1 + x)))
    let cosine = nth_root(&one.sub(x, work).mul(&one.add(x, work), work), 2, work);
    Ok(atan_unbounded(&x.quotient(&cosine, work), work).round(context))
}

pub fn acos(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    let one = Decimal::one();
    if x.abs() > one {
        return Err(domain("acos", x));
    }
    if *x == -&one {
        return Ok(pi(context));
    }
    let work = context.widened(GUARD_DIGITS);
    // acos(x) = 2·atan(√((1 − x)/(1 + x)))
    let ratio = one.sub(x, work).quotient(&one.add(x, work), work);
    if ratio.is_zero() {
        return Ok(Decimal::zero());
    }
    let root = nth_root(&ratio, 2, work);
    Ok(atan_unbounded(&root, work)
        .mul(&Decimal::from(2), work)
        .round(context))
}

fn atan_unbounded(x: &Decimal, context: Context) -> Decimal {
    let one = Decimal::one();
    let magnitude = x.abs();
    let result = if magnitude > one {
        let reciprocal = one.quotient(&magnitude, context);
        pi(context)
            .halved()
            .sub(&atan_reduced(&reciprocal, context), context)
    } else {
        atan_reduced(&magnitude, context)
    };
    with_sign(result, x.is_negative())
}

/// `atan(x)` for `0 ≤ x ≤ 1`, halving the argument three times with
/// `atan(x) = 2·atan(x / (1 + √(1 + x²)))` before summing the series.
fn atan_reduced(x: &Decimal, context: Context) -> Decimal {
    let one = Decimal::one();
    let mut reduced = x.clone();
    for _ in 0..3 {
        if reduced.is_zero() {
            return Decimal::zero();
        }
        let root = nth_root(&one.add(&reduced.mul(&reduced, context), context), 2, context);
        reduced = reduced.quotient(&one.add(&root, context), context);
    }
    atan_series(&reduced, context).mul(&Decimal::from(8), context)
}

fn atan_series(x: &Decimal, context: Context) -> Decimal {
    let x_squared = x.mul(x, context);
    let mut power = x.clone();
    let mut sum = x.clone();
    for k in 1.. {
        power = -power.mul(&x_squared, context);
        let term = power.div_integer(2 * k + 1, context);
        if is_negligible(&term, &sum, context) {
            break;
        }
        sum = sum.add(&term, context);
    }
    sum
}

pub fn sinh(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    Ok(sinh_unrounded(x, context.widened(GUARD_DIGITS))?.round(context))
}

pub fn cosh(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    Ok(cosh_unrounded(x, context.widened(GUARD_DIGITS))?.round(context))
}

pub fn tanh(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    // 1 − tanh(x) ≈ 2e^(−2x) is below half a unit in the last place from here on
    let saturation = Decimal::from(2 * context.precision() + 10);
    if x.abs() > saturation {
        return Ok(with_sign(Decimal::one(), x.is_negative()));
    }
    let work = context.widened(GUARD_DIGITS);
    let sine = sinh_unrounded(x, work)?;
    let cosine = cosh_unrounded(x, work)?;
    Ok(sine.quotient(&cosine, work).round(context))
}

fn sinh_unrounded(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.abs() < Decimal::one() {
        return Ok(sinh_series(x, context));
    }
    let growth = exp(x, context)?;
    let decay = Decimal::one().quotient(&growth, context);
    Ok(growth.sub(&decay, context).halved())
}

fn cosh_unrounded(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    let growth = exp(&x.abs(), context)?;
    let decay = Decimal::one().quotient(&growth, context);
    Ok(growth.add(&decay, context).halved())
}

fn sinh_series(x: &Decimal, context: Context) -> Decimal {
    let x_squared = x.mul(x, context);
    let mut term = x.clone();
    let mut sum = x.clone();
    for k in 1.. {
        term = term
            .mul(&x_squared, context)
            .div_integer((2 * k) * (2 * k + 1), context);
        if is_negligible(&term, &sum, context) {
            break;
        }
        sum = sum.add(&term, context);
    }
    sum
}

pub fn asinh(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    let work = context.widened(GUARD_DIGITS);
    let magnitude = x.abs();
    let root = nth_root(
        &magnitude.mul(&magnitude, work).add(&Decimal::one(), work),
        2,
        work,
    );
    // small arguments go through atanh to avoid cancellation in ln(1 + …)
    let result = if magnitude <= half() {
        atanh_series(&magnitude.quotient(&root, work), work)
    } else {
        ln_positive(&magnitude.add(&root, work), work)
    };
    Ok(with_sign(result, x.is_negative()).round(context))
}

pub fn acosh(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    let one = Decimal::one();
    if *x < one {
        return Err(domain("acosh", x));
    }
    if *x == one {
        return Ok(Decimal::zero());
    }
    let distance = x.sub(&one, context.widened(GUARD_DIGITS + x.digits()));
    let extra = (-distance.adjusted_exponent()).max(0) as u64;
    let work = context.widened(GUARD_DIGITS + extra);
    let root = nth_root(&distance.mul(&x.add(&one, work), work), 2, work);
    Ok(ln_positive(&x.add(&root, work), work).round(context))
}

pub fn atanh(x: &Decimal, context: Context) -> Result<Decimal, ArithmeticError> {
    let one = Decimal::one();
    let magnitude = x.abs();
    if magnitude >= one {
        return Err(domain("atanh", x));
    }
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    let work = context.widened(GUARD_DIGITS);
    let result = if magnitude <= half() {
        atanh_series(&magnitude, work)
    } else {
        let ratio = one
            .add(&magnitude, work)
            .quotient(&one.sub(&magnitude, work), work);
        ln_positive(&ratio, work).halved()
    };
    Ok(with_sign(result, x.is_negative()).round(context))
}

pub fn to_radians(x: &Decimal, context: Context) -> Decimal {
    let work = context.widened(GUARD_DIGITS);
    x.mul(&pi(work), work).div_integer(180, work).round(context)
}

pub fn to_degrees(x: &Decimal, context: Context) -> Decimal {
    let work = context.widened(GUARD_DIGITS);
    x.mul(&Decimal::from(180), work)
        .quotient(&pi(work), work)
        .round(context)
}

/// `n!` for integers `0 ≤ n ≤ limit`, computed exactly and then rounded.
pub fn factorial(n: &Decimal, limit: u32, context: Context) -> Result<Decimal, ArithmeticError> {
    let invalid = || ArithmeticError::InvalidFactorial {
        operand: n.to_bounded_string(PLAIN_OPERAND_EXPONENT),
        limit,
    };
    if n.is_negative() || *n > Decimal::from(limit) {
        return Err(invalid());
    }
    let value = n
        .to_integer()
        .and_then(|integer| integer.to_u32())
        .ok_or_else(invalid)?;
    let product = (2..=value).fold(BigInt::one(), |product, k| product * k);
    Ok(Decimal::from(product).round(context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    const CONTEXT: Context = Context::DECIMAL128;

    fn decimal(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    fn assert_close(actual: Decimal, expected: &str) {
        let tolerance = decimal("1e-32");
        let difference = actual.sub(&decimal(expected), CONTEXT).abs();
        assert!(
            difference < tolerance,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn pi_is_rounded_half_even() {
        assert_eq!(
            pi(CONTEXT).to_string(),
            "3.141592653589793238462643383279503"
        );
    }

    #[test]
    fn pi_at_lower_precision_is_rounded_from_the_most_precise_value() {
        let long = pi(Context::new(60));
        let short = pi(CONTEXT);

        assert_eq!(
            long.to_string(),
            "3.14159265358979323846264338327950288419716939937510582097494"
        );
        assert_eq!(short.to_string(), "3.141592653589793238462643383279503");
        assert_eq!(pi(Context::new(5)).to_string(), "3.1416");
    }

    #[test]
    fn e_is_correct_to_context_precision() {
        assert_eq!(
            e(CONTEXT).to_string(),
            "2.718281828459045235360287471352662"
        );
    }

    #[test]
    fn exp_of_one_is_e() {
        assert_close(exp(&Decimal::one(), CONTEXT).unwrap(), "2.718281828459045235360287471352662");
        assert_eq!(exp(&Decimal::zero(), CONTEXT).unwrap(), Decimal::one());
    }

    #[test]
    fn exp_of_negative_is_reciprocal() {
        assert_close(
            exp(&decimal("-1"), CONTEXT).unwrap(),
            "0.3678794411714423215955237701614609",
        );
    }

    #[test]
    fn exp_beyond_exponent_range_overflows() {
        assert_eq!(
            exp(&decimal("1e10"), CONTEXT),
            Err(ArithmeticError::Overflow)
        );
    }

    #[test]
    fn natural_logarithm_of_ten() {
        assert_eq!(
            ln(&decimal("10"), CONTEXT).unwrap().to_string(),
            "2.302585092994045684017991454684364"
        );
    }

    #[parameterized(value = { "1000", "0.01", "1", "1e50" }, expected = { 3, -2, 0, 50 })]
    fn common_logarithm_is_exact_for_powers_of_ten(value: &str, expected: i64) {
        assert_eq!(
            log10(&decimal(value), CONTEXT).unwrap(),
            Decimal::from(expected)
        );
    }

    #[test]
    fn common_logarithm_of_two() {
        assert_close(
            log10(&decimal("2"), CONTEXT).unwrap(),
            "0.3010299956639811952137388947244930",
        );
    }

    #[parameterized(value = { "0", "-1" })]
    fn logarithm_of_non_positive_is_domain_error(value: &str) {
        assert!(matches!(
            ln(&decimal(value), CONTEXT),
            Err(ArithmeticError::Domain { function: "ln", .. })
        ));
        assert!(matches!(
            log10(&decimal(value), CONTEXT),
            Err(ArithmeticError::Domain { function: "lg", .. })
        ));
    }

    #[parameterized(
    base = { "2", "2", "-2", "1.5", "4", "10" },
    exponent = { "10", "-2", "3", "2", "0.5", "0" },
    expected = { "1024", "0.25", "-8", "2.25", "2", "1" }
    )]
    fn power_of_simple_operands(base: &str, exponent: &str, expected: &str) {
        let result = pow(&decimal(base), &decimal(exponent), CONTEXT).unwrap();

        assert_eq!(result, decimal(expected));
    }

    #[test]
    fn power_with_fractional_exponent() {
        assert_close(
            pow(&decimal("2"), &decimal("0.5"), CONTEXT).unwrap(),
            "1.414213562373095048801688724209698",
        );
    }

    #[test]
    fn negative_base_with_fractional_exponent_is_domain_error() {
        assert!(matches!(
            pow(&decimal("-8"), &decimal("0.5"), CONTEXT),
            Err(ArithmeticError::Domain { .. })
        ));
    }

    #[test]
    fn zero_to_negative_power_is_division_by_zero() {
        assert_eq!(
            pow(&Decimal::zero(), &decimal("-1"), CONTEXT),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn power_beyond_exponent_range_overflows() {
        assert_eq!(
            pow(&decimal("10"), &decimal("1e10"), CONTEXT),
            Err(ArithmeticError::Overflow)
        );
    }

    #[test]
    fn square_root_of_two() {
        assert_eq!(
            sqrt(&decimal("2"), CONTEXT).unwrap().to_string(),
            "1.414213562373095048801688724209698"
        );
    }

    #[parameterized(value = { "4", "0.25", "1e100", "0" }, expected = { "2", "0.5", "1e50", "0" })]
    fn square_root_of_perfect_square_is_exact(value: &str, expected: &str) {
        assert_eq!(sqrt(&decimal(value), CONTEXT).unwrap(), decimal(expected));
    }

    #[test]
    fn square_root_of_negative_is_domain_error() {
        assert!(sqrt(&decimal("-4"), CONTEXT).is_err());
    }

    #[parameterized(value = { "27", "-8", "0.001" }, expected = { "3", "-2", "0.1" })]
    fn cube_root_accepts_any_sign(value: &str, expected: &str) {
        assert_eq!(cbrt(&decimal(value), CONTEXT).unwrap(), decimal(expected));
    }

    #[test]
    fn trigonometric_functions_at_zero() {
        assert_eq!(sin(&Decimal::zero(), CONTEXT).unwrap(), Decimal::zero());
        assert_eq!(cos(&Decimal::zero(), CONTEXT).unwrap(), Decimal::one());
        assert_eq!(tan(&Decimal::zero(), CONTEXT).unwrap(), Decimal::zero());
    }

    #[test]
    fn sine_of_sixth_turn_is_half() {
        let angle = pi(CONTEXT).div(&decimal("6"), CONTEXT).unwrap();

        assert_close(sin(&angle, CONTEXT).unwrap(), "0.5");
    }

    #[test]
    fn sine_of_large_angle_is_reduced() {
        assert_close(
            sin(&decimal("100"), CONTEXT).unwrap(),
            "-0.5063656411097587936565576104597854",
        );
    }

    #[test]
    fn tangent_of_one() {
        assert_close(
            tan(&Decimal::one(), CONTEXT).unwrap(),
            "1.557407724654902230506974807458360",
        );
    }

    #[test]
    fn tangent_of_quarter_turn_is_division_by_zero() {
        let right_angle = to_radians(&decimal("90"), CONTEXT);
        let half_pi = pi(CONTEXT).div(&decimal("2"), CONTEXT).unwrap();

        assert_eq!(tan(&right_angle, CONTEXT), Err(ArithmeticError::DivisionByZero));
        assert_eq!(tan(&half_pi, CONTEXT), Err(ArithmeticError::DivisionByZero));
        assert!(tan(&decimal("1.57"), CONTEXT).is_ok());
    }

    #[test]
    fn trigonometric_argument_beyond_limit_overflows() {
        assert_eq!(
            sin(&decimal("1e1001"), CONTEXT),
            Err(ArithmeticError::Overflow)
        );
    }

    #[test]
    fn inverse_trigonometric_functions() {
        assert_close(
            atan(&Decimal::one(), CONTEXT).unwrap(),
            "0.7853981633974483096156608458198757",
        );
        assert_eq!(
            asin(&Decimal::one(), CONTEXT).unwrap().to_string(),
            "1.570796326794896619231321691639751"
        );
        assert_close(asin(&decimal("0.5"), CONTEXT).unwrap(), "0.5235987755982988730771072305465838");
        assert_eq!(acos(&decimal("-1"), CONTEXT).unwrap(), pi(CONTEXT));
        assert_eq!(acos(&Decimal::one(), CONTEXT).unwrap(), Decimal::zero());
        assert_close(acos(&decimal("0.5"), CONTEXT).unwrap(), "1.047197551196597746154214461093168");
    }

    #[test]
    fn arctangent_of_large_argument_approaches_quarter_turn() {
        assert_close(
            atan(&decimal("-1e40"), CONTEXT).unwrap(),
            "-1.570796326794896619231321691639751",
        );
    }

    #[parameterized(value = { "1.5", "-1.01" })]
    fn inverse_sine_outside_unit_interval_is_domain_error(value: &str) {
        assert!(matches!(
            asin(&decimal(value), CONTEXT),
            Err(ArithmeticError::Domain { function: "asin", .. })
        ));
        assert!(acos(&decimal(value), CONTEXT).is_err());
    }

    #[test]
    fn hyperbolic_functions() {
        assert_eq!(sinh(&Decimal::zero(), CONTEXT).unwrap(), Decimal::zero());
        assert_eq!(cosh(&Decimal::zero(), CONTEXT).unwrap(), Decimal::one());
        assert_close(
            sinh(&Decimal::one(), CONTEXT).unwrap(),
            "1.175201193643801456882381850595601",
        );
        assert_close(
            cosh(&Decimal::one(), CONTEXT).unwrap(),
            "1.543080634815243778477905620757062",
        );
        assert_close(
            tanh(&decimal("0.5"), CONTEXT).unwrap(),
            "0.4621171572600097585023184836436725",
        );
        assert_eq!(tanh(&decimal("-100"), CONTEXT).unwrap(), decimal("-1"));
    }

    #[test]
    fn inverse_hyperbolic_functions() {
        assert_close(
            asinh(&Decimal::one(), CONTEXT).unwrap(),
            "0.8813735870195430252326093249797923",
        );
        assert_close(
            acosh(&decimal("2"), CONTEXT).unwrap(),
            "1.316957896924816708625046347307968",
        );
        assert_close(
            atanh(&decimal("0.5"), CONTEXT).unwrap(),
            "0.5493061443340548456976226184612628",
        );
        assert_eq!(acosh(&Decimal::one(), CONTEXT).unwrap(), Decimal::zero());
    }

    #[test]
    fn inverse_hyperbolic_domain_errors() {
        assert!(acosh(&decimal("0.5"), CONTEXT).is_err());
        assert!(atanh(&Decimal::one(), CONTEXT).is_err());
        assert!(atanh(&decimal("-2"), CONTEXT).is_err());
    }

    #[test]
    fn angle_conversions_round_trip() {
        let radians = to_radians(&decimal("180"), CONTEXT);

        assert_eq!(radians, pi(CONTEXT));
        assert_close(to_degrees(&radians, CONTEXT), "180");
    }

    #[parameterized(
    n = { "0", "1", "5", "5.000", "25" },
    expected = { "1", "1", "120", "120", "15511210043330985984000000" }
    )]
    fn factorial_of_valid_operand(n: &str, expected: &str) {
        assert_eq!(
            factorial(&decimal(n), 4000, CONTEXT).unwrap(),
            decimal(expected)
        );
    }

    #[parameterized(n = { "-1", "2.5", "4001" })]
    fn factorial_of_invalid_operand(n: &str) {
        assert!(matches!(
            factorial(&decimal(n), 4000, CONTEXT),
            Err(ArithmeticError::InvalidFactorial { limit: 4000, .. })
        ));
    }

    #[test]
    fn huge_operands_are_reported_in_scientific_notation() {
        assert_eq!(
            factorial(&decimal("1e999999999"), 4000, CONTEXT),
            Err(ArithmeticError::InvalidFactorial {
                operand: "1E+999999999".to_string(),
                limit: 4000
            })
        );
        assert_eq!(
            sqrt(&decimal("-1.5e500"), CONTEXT),
            Err(ArithmeticError::Domain {
                function: "√",
                operand: "-1.5E+500".to_string()
            })
        );
    }

    #[test]
    fn factorial_at_limit_is_rounded() {
        let result = factorial(&decimal("4000"), 4000, CONTEXT).unwrap();

        assert_eq!(result.digits(), 34);
        assert_eq!(result.adjusted_exponent(), 12673);
    }
}
