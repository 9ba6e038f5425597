// exact754: exact decimal reasoning about IEEE 754 binary64 doubles
// Brett Saiki <bksaiki(at)gmail.com>
// 2023

// segment.rs
//
// Per-exponent segment descriptors: the min, max, and ulp of every
// binary64 value sharing one unbiased exponent.

use rug::Integer;

use crate::bits;
use crate::decimal::{scaled_pow2, Decimal};
use crate::error::Error;

/// The smallest unbiased exponent of a normal binary64 value.
pub const MIN_EXPONENT: i64 = -1022;

/// The largest unbiased exponent of a normal binary64 value.
pub const MAX_EXPONENT: i64 = 1023;

/// The set of binary64 values sharing one unbiased exponent `e`: the
/// half-open range `[2^e, 2^(e+1))`, containing `2^52` equally spaced
/// values.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// The unbiased exponent this segment describes.
    pub unbiased_exp: i64,
    /// `2^e`, the smallest value in the segment.
    pub min_val: Decimal,
    /// `2^(e+1) * (1 - 2^-53)`, the largest value in the segment.
    pub max_val: Decimal,
    /// `2^(e-52)`, the gap between adjacent values in the segment (the
    /// ulp at this magnitude).
    pub distance: Decimal,
}

/// Builds the [`Segment`] for unbiased exponent `e`.
///
/// Fails with [`Error::OutOfRange`] if `e` is outside
/// `[MIN_EXPONENT, MAX_EXPONENT]`.
pub fn segment_from_exponent(e: i64) -> Result<Segment, Error> {
    if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&e) {
        return Err(Error::OutOfRange(format!(
            "unbiased exponent must be in [{MIN_EXPONENT}, {MAX_EXPONENT}], got {e}"
        )));
    }

    let min_val = scaled_pow2(false, Integer::from(1), e);
    // max_val = 2^(e+1) - 2^(e-52) = (2^53 - 1) * 2^(e-52), exact.
    let max_c = Integer::from(Integer::from(1) << 53u32) - Integer::from(1);
    let max_val = scaled_pow2(false, max_c, e - 52);
    let distance = scaled_pow2(false, Integer::from(1), e - 52);

    Ok(Segment {
        unbiased_exp: e,
        min_val,
        max_val,
        distance,
    })
}

/// Builds the [`Segment`] containing a finite, normal double `d`.
pub fn segment_from_double(d: f64) -> Result<Segment, Error> {
    let encoded = bits::encode(d);
    let decoded = bits::decode(&encoded.bit_string)?;
    bits::check_special(&decoded.fraction_bits, &decoded.exponent_bits)?;
    segment_from_exponent(decoded.unbiased_exp)
}

/// Returns the segments for every unbiased exponent in `[start, end)`.
///
/// Fails with [`Error::OutOfRange`] if any exponent in that half-open
/// range falls outside `[MIN_EXPONENT, MAX_EXPONENT]`.
pub fn get_segments(start: i64, end: i64) -> Result<Vec<Segment>, Error> {
    (start..end).map(segment_from_exponent).collect()
}
