// exact754: exact decimal reasoning about IEEE 754 binary64 doubles
// Brett Saiki <bksaiki(at)gmail.com>
// 2023

// enumerate.rs
//
// The d-digit pre-image enumerator: every decimal numeral of exactly d
// significant digits that round-trips to a given double.

use rug::Integer;

use crate::decimal::{pow10, Decimal};
use crate::error::Error;
use crate::fp::Fp;

/// Result of [`get_d_digit_decimals`]: every d-significant-digit decimal
/// numeral whose platform nearest-even conversion to `f64` reproduces a
/// given [`Fp`]'s value, in ascending order, together with the uniform
/// spacing between them.
#[derive(Clone, Debug, PartialEq)]
pub struct DDigitDecimals {
    /// `numbers.len()`.
    pub count: usize,
    /// The spacing between adjacent numerals at this magnitude, `10^k` for
    /// some integer `k`.
    pub distance: Decimal,
    /// The numerals themselves, strictly ascending, each displaying
    /// exactly `d` significant digits.
    pub numbers: Vec<Decimal>,
}

/// Enumerates every decimal numeral of exactly `d` significant digits
/// (`1..=50`) that converts, under the platform's default round-half-to-
/// even `str -> f64` conversion, to exactly `fp.fp`.
///
/// # Algorithm
///
/// `fp.exact_decimal` is already held as `digits * 10^exp` with `digits`
/// carrying no trailing decimal zero (§3's canonical form). Let
/// `dec_len` be the digit count of `digits` and `s = exp + dec_len` the
/// power-of-ten scale of the value (e.g. `s = 1` for a value in
/// `[1, 10)`, `s = 0` for a value in `[0.1, 1)`, where the leading `0.`
/// is not itself a significant digit).
///
/// `d' = d - 1` when `s == 0` (magnitudes in `[0.1, 1)`, to account for
/// the dropped leading zero), else `d' = d`. The spacing between
/// adjacent d-digit numerals at this magnitude is then `distance =
/// 10^(s - d')`, and every such numeral is an integer multiple of
/// `distance`. The largest multiple at or below `|fp.exact_decimal|` is
/// found directly by truncating (for `dec_len > d'`) or zero-extending
/// (for `dec_len <= d'`) the digit string — equivalent to, but exact
/// integer arithmetic in place of, taking a string prefix and padding
/// with zeros.
///
/// From that starting point the exact double each neighbouring multiple
/// converts to is checked directly (by constructing the candidate and
/// calling [`Decimal::to_f64`]); the walk in each direction stops at the
/// first candidate that no longer reproduces `fp.fp`, per §9's open
/// question about preserving the lower/upper walk order to avoid
/// duplicates at the shared boundary value.
pub fn get_d_digit_decimals(fp: &Fp, d: u32) -> Result<DDigitDecimals, Error> {
    if d == 0 {
        return Err(Error::InvalidInput(
            "digit count must be at least 1".to_string(),
        ));
    }
    if d > 50 {
        return Err(Error::OutOfRange(format!(
            "digit count must be at most 50, got {d}"
        )));
    }

    let negative = fp.exact_decimal.is_negative();
    let digits = fp.exact_decimal.digits().clone();
    let exp = fp.exact_decimal.exp();
    let dec_len = fp.exact_decimal.digit_count();

    let s = exp + dec_len;
    let d_prime = if s == 0 { d as i64 - 1 } else { d as i64 };
    let distance_exp = s - d_prime;

    let k_mag = if dec_len > d_prime {
        digits / pow10((dec_len - d_prime) as u32)
    } else {
        digits * pow10((d_prime - dec_len) as u32)
    };

    let at_magnitude = |k: &Integer| -> Decimal {
        Decimal::from_magnitude(negative, k.clone(), distance_exp)
    };
    let converts_to_fp = |k: &Integer| at_magnitude(k).to_f64() == fp.fp;

    let mut numbers = Vec::new();

    let mut k = k_mag.clone();
    while k >= 0 && converts_to_fp(&k) {
        numbers.push(at_magnitude(&k));
        k -= 1;
    }

    let mut k = k_mag + 1;
    while converts_to_fp(&k) {
        numbers.push(at_magnitude(&k));
        k += 1;
    }

    numbers.sort();

    Ok(DDigitDecimals {
        count: numbers.len(),
        distance: Decimal::from_magnitude(false, Integer::from(1), distance_exp).canonicalize(),
        numbers,
    })
}
