// exact754: exact decimal reasoning about IEEE 754 binary64 doubles
// Brett Saiki <bksaiki(at)gmail.com>
// 2023

// decimal.rs
//
// The exact-decimal value type and the bit-pattern-to-decimal expansion.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Sub;

use rug::ops::DivRem;
use rug::Integer;

use crate::bits::{DecodedBits, FRACTION_BITS};
use crate::error::Error;

/// Working precision (in decimal digits) of the arbitrary-precision
/// decimal context used to bound string formatting and comparison
/// helpers in this module.
///
/// The expansion in [`expand`] itself needs no bounded precision at all
/// (see its doc comment), but this constant documents the context
/// required by the rest of the crate per the concurrency model: any
/// future helper that must bound its working precision should use this
/// value together with [`Rounding::HalfUp`].
pub const DECIMAL_PRECISION: u32 = 400;

/// Rounding mode of the arbitrary-precision decimal context.
///
/// Only one mode is used by this crate; the enum exists so the context
/// is self-documenting at call sites rather than a bare constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    HalfUp,
}

/// The arbitrary-precision decimal context mandated by the concurrency
/// model: precision and rounding mode, threaded explicitly rather than
/// stashed in thread-local or process-global state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context {
    pub precision: u32,
    pub rounding: Rounding,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            precision: DECIMAL_PRECISION,
            rounding: Rounding::HalfUp,
        }
    }
}

/// An exact decimal value: `(-1)^negative * digits * 10^exp`.
///
/// `digits` is always non-negative. Unlike [`crate::fp::Fp`]'s canonical
/// `exact_decimal` field (always produced via [`Decimal::canonicalize`],
/// stripping trailing decimal zeros into `exp`), a `Decimal` built
/// directly with [`Decimal::from_magnitude`] preserves whatever `digits`
/// and `exp` the caller supplied — this is what lets
/// [`crate::enumerate::get_d_digit_decimals`] hand back numerals with a
/// fixed, padded digit count. Equality and ordering are always
/// value-based (they canonicalize internally before comparing), so the
/// two representations of the same value still compare equal.
#[derive(Clone, Debug)]
pub struct Decimal {
    negative: bool,
    digits: Integer,
    exp: i64,
}

impl Decimal {
    /// Builds a `Decimal` from its raw parts without canonicalizing.
    /// `digits` must be non-negative.
    pub fn from_magnitude(negative: bool, digits: Integer, exp: i64) -> Self {
        debug_assert!(digits >= 0, "Decimal digits must be non-negative");
        Decimal {
            negative,
            digits,
            exp,
        }
    }

    /// The canonical zero value.
    pub fn zero() -> Self {
        Decimal {
            negative: false,
            digits: Integer::from(0),
            exp: 0,
        }
    }

    /// Strips trailing decimal zeros from `digits` into `exp`, and
    /// canonicalizes the sign of zero to non-negative.
    pub fn canonicalize(mut self) -> Self {
        if self.digits == 0 {
            self.negative = false;
            self.exp = 0;
            return self;
        }
        let ten = Integer::from(10);
        loop {
            let (q, r) = self.digits.clone().div_rem(ten.clone());
            if r != 0 {
                break;
            }
            self.digits = q;
            self.exp += 1;
        }
        self
    }

    /// The non-negative significand.
    pub fn digits(&self) -> &Integer {
        &self.digits
    }

    /// The base-10 exponent: `value = (-1)^sign * digits * 10^exp`.
    pub fn exp(&self) -> i64 {
        self.exp
    }

    /// Whether this value is negative (the canonical zero is never
    /// negative).
    pub fn is_negative(&self) -> bool {
        self.negative && self.digits != 0
    }

    /// Whether this value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.digits == 0
    }

    /// Number of decimal digits in `digits` (1 for the canonical zero).
    pub fn digit_count(&self) -> i64 {
        if self.digits == 0 {
            1
        } else {
            self.digits.to_string().len() as i64
        }
    }

    /// Converts this value to the nearest `f64` under the platform's
    /// default round-half-to-even rule, by formatting as `{digits}e{exp}`
    /// and delegating to `f64`'s correctly-rounded `FromStr` impl.
    pub fn to_f64(&self) -> f64 {
        let s = self.to_parse_string();
        s.parse::<f64>()
            .expect("Decimal always formats as a valid f64 literal")
    }

    fn to_parse_string(&self) -> String {
        let sign = if self.negative && self.digits != 0 {
            "-"
        } else {
            ""
        };
        format!("{sign}{}e{}", self.digits, self.exp)
    }
}

impl fmt::Display for Decimal {
    /// Renders the value in plain decimal notation, preserving whatever
    /// trailing zeros `digits`/`exp` encode (no re-canonicalization),
    /// which is what lets d-digit numerals display with a fixed digit
    /// count (e.g. `"0.10000000000000000"`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ds = self.digits.to_string();
        let len = ds.len() as i64;

        if self.is_negative() {
            write!(f, "-")?;
        }

        if self.exp >= 0 {
            write!(f, "{ds}")?;
            for _ in 0..self.exp {
                write!(f, "0")?;
            }
            Ok(())
        } else {
            let frac_len = (-self.exp) as usize;
            if len > frac_len as i64 {
                let split = ds.len() - frac_len;
                write!(f, "{}.{}", &ds[..split], &ds[split..])
            } else {
                write!(f, "0.")?;
                for _ in 0..(frac_len - ds.len()) {
                    write!(f, "0")?;
                }
                write!(f, "{ds}")
            }
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let a = self.clone().canonicalize();
        let b = other.clone().canonicalize();
        a.negative == b.negative && a.digits == b.digits && a.exp == b.exp
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        // Bring both values to a common exponent, then compare signed
        // magnitudes. Exact, since both are finite decimals.
        let exp = self.exp.min(other.exp);
        let a = self.digits.clone() * pow10((self.exp - exp) as u32);
        let b = other.digits.clone() * pow10((other.exp - exp) as u32);
        let a_signed = if self.is_negative() { -a } else { a };
        let b_signed = if other.is_negative() { -b } else { b };
        a_signed.cmp(&b_signed)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    /// Subtracts two decimals exactly, by first bringing both to their
    /// smaller common exponent. Used by callers (e.g. the d-digit
    /// enumerator's tests) that need to check the spacing between two
    /// `Decimal` values; not part of the core expansion/enumeration path.
    fn sub(self, other: &Decimal) -> Decimal {
        let exp = self.exp.min(other.exp);
        let a = self.digits.clone() * pow10((self.exp - exp) as u32);
        let b = other.digits.clone() * pow10((other.exp - exp) as u32);
        let a_signed = if self.is_negative() { -a } else { a };
        let b_signed = if other.is_negative() { -b } else { b };
        let diff = a_signed - b_signed;
        let negative = diff < 0;
        Decimal::from_magnitude(negative, diff.abs(), exp).canonicalize()
    }
}

/// Expands a valid, decoded bit pattern into the exact terminating
/// decimal it denotes.
///
/// `value = sign * (1 + sum(f_i * 2^-i)) * 2^e`, computed as exact
/// integer arithmetic: let `c = 2^52 + fraction` (the 53-bit significand
/// with the implicit leading one folded in) and `shift = e - 52`. If
/// `shift >= 0` the value is the integer `c * 2^shift`; otherwise it is
/// `c * 5^(-shift) * 10^shift`, which is exact because dividing by
/// `2^(-shift)` is the same as multiplying by `5^(-shift)` and shifting
/// the decimal point. No rounding is introduced at any step.
///
/// Subnormal bit patterns (exponent field all zero, fraction non-zero)
/// are rejected with [`Error::InvalidInput`] rather than silently
/// expanded with the normal-number formula; see the corresponding open
/// question in `DESIGN.md`.
pub fn expand(decoded: &DecodedBits) -> Result<Decimal, Error> {
    let exponent_is_zero = decoded.exponent_bits.iter().all(|&b| b == 0);
    let fraction_is_zero = decoded.fraction_bits.iter().all(|&b| b == 0);

    if exponent_is_zero && fraction_is_zero {
        return Ok(Decimal::zero());
    }
    if exponent_is_zero {
        return Err(Error::InvalidInput(
            "subnormal bit patterns are not supported".to_string(),
        ));
    }

    let fraction = fraction_to_integer(&decoded.fraction_bits);
    let c = Integer::from(Integer::from(1) << FRACTION_BITS as u32) + fraction;
    let shift = decoded.unbiased_exp - FRACTION_BITS as i64;

    Ok(scaled_pow2(decoded.sign < 0, c, shift))
}

/// Computes the exact decimal value of `(-1)^negative * c * 2^shift` for
/// an arbitrary-precision integer `c` and integer `shift`, using the same
/// exact-integer technique as [`expand`]: multiply by `2^shift` directly
/// when `shift >= 0`, or by `5^(-shift)` with a negative decimal exponent
/// otherwise. Shared by the exact-decimal expander and the segment
/// descriptor's closed-form bounds, both of which need this conversion.
pub(crate) fn scaled_pow2(negative: bool, c: Integer, shift: i64) -> Decimal {
    let (digits, exp) = if shift >= 0 {
        (Integer::from(c << shift as u32), 0i64)
    } else {
        (c * pow5((-shift) as u32), shift)
    };
    Decimal::from_magnitude(negative, digits, exp).canonicalize()
}

/// Computes `10^n` as an arbitrary-precision integer.
pub(crate) fn pow10(n: u32) -> Integer {
    let mut r = Integer::from(1);
    for _ in 0..n {
        r *= 10;
    }
    r
}

/// Computes `5^n` as an arbitrary-precision integer.
fn pow5(n: u32) -> Integer {
    let mut r = Integer::from(1);
    for _ in 0..n {
        r *= 5;
    }
    r
}

fn fraction_to_integer(fraction_bits: &[u8; FRACTION_BITS]) -> Integer {
    let mut acc = Integer::from(0);
    for &b in fraction_bits {
        acc <<= 1;
        acc += b as u32;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits;

    #[test]
    fn expand_matches_spec_example() {
        let bits_1_2 = "0011111111110011001100110011001100110011001100110011001100110011";
        let decoded = bits::decode(bits_1_2).unwrap();
        let dec = expand(&decoded).unwrap();
        assert_eq!(
            dec.to_string(),
            "1.1999999999999999555910790149937383830547332763671875"
        );
        assert_eq!(dec.to_f64(), 1.2);
    }

    #[test]
    fn expand_zero() {
        let decoded = bits::decode(&bits::encode(0.0_f64).bit_string).unwrap();
        let dec = expand(&decoded).unwrap();
        assert!(dec.is_zero());
        assert_eq!(dec.to_string(), "0");
    }

    #[test]
    fn expand_rejects_subnormal() {
        // smallest subnormal double: all exponent bits zero, fraction = 1
        let bits = format!("0{}{}1", "0".repeat(11), "0".repeat(51));
        let decoded = bits::decode(&bits).unwrap();
        assert!(matches!(expand(&decoded), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn canonicalize_strips_trailing_zeros() {
        let dec = Decimal::from_magnitude(false, Integer::from(1200), 0).canonicalize();
        assert_eq!(dec.digits(), &Integer::from(12));
        assert_eq!(dec.exp(), 2);
    }

    #[test]
    fn display_preserves_uncanonicalized_padding() {
        let dec = Decimal::from_magnitude(false, Integer::from(100000000000000000u128), -17);
        assert_eq!(dec.to_string(), "0.10000000000000000");
    }

    #[test]
    fn ordering_is_value_based_across_exponents() {
        let a = Decimal::from_magnitude(false, Integer::from(12), 0);
        let b = Decimal::from_magnitude(false, Integer::from(1200), -2);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }
}
