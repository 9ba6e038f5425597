// exact754: exact decimal reasoning about IEEE 754 binary64 doubles
// Brett Saiki <bksaiki(at)gmail.com>
// 2023

// bits.rs
//
// Bit-level encoding, decoding, and successor arithmetic for IEEE 754
// binary64 ("double") floating-point numbers.

use crate::error::{Error, Overflow};

/// Number of bits in the exponent field of a binary64 value.
pub const EXPONENT_BITS: usize = 11;

/// Number of bits in the fraction (trailing significand) field.
pub const FRACTION_BITS: usize = 52;

/// Total bitwidth of a binary64 value.
pub const TOTAL_BITS: usize = 1 + EXPONENT_BITS + FRACTION_BITS;

/// The exponent bias for binary64, per IEEE 754-2019 §3.6.
pub const EXPONENT_BIAS: i64 = 1023;

/// The all-zero bit pattern: positive zero.
pub const ZERO_BITS: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// The bit pattern of the smallest positive normal double, `2^-1022`
/// (exponent field `1`, fraction field all zero). This crate does not
/// represent subnormals (see [`crate::decimal::expand`]), so advancing
/// from [`ZERO_BITS`] must skip the subnormal range directly to here
/// rather than stepping through it one bit pattern at a time.
pub const SMALLEST_NORMAL_BITS: &str =
    "0000000000010000000000000000000000000000000000000000000000000000";

/// Result of [`encode`]: the raw bit pattern of a double in two textual
/// forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedBits {
    /// 64-character string of `'0'`/`'1'`, MSB first.
    pub bit_string: String,
    /// The same bits as a zero-padded, lowercase hexadecimal string.
    pub hex_string: String,
}

/// Result of [`decode`]: the typed fields of a binary64 bit pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedBits {
    /// `1` for a positive sign bit, `-1` for a negative one.
    pub sign: i8,
    /// The 11 exponent bits, MSB first.
    pub exponent_bits: [u8; EXPONENT_BITS],
    /// The 52 fraction bits, MSB first.
    pub fraction_bits: [u8; FRACTION_BITS],
    /// The biased exponent minus [`EXPONENT_BIAS`].
    pub unbiased_exp: i64,
}

/// Serialises `d` in IEEE 754 big-endian 8-byte form.
///
/// Pure; never fails, even for non-finite `d` (detection of Infinity/NaN
/// is a downstream concern, see [`check_special`]).
pub fn encode(d: f64) -> EncodedBits {
    let bits = d.to_bits();
    let bit_string = format!("{bits:064b}");
    let hex_string = format!("{bits:016x}");
    log::trace!("encode({d}) -> {bit_string}");
    EncodedBits {
        bit_string,
        hex_string,
    }
}

/// Parses a 64-character `'0'`/`'1'` string into its typed fields.
///
/// Fails with [`Error::InvalidInput`] if `bits` is not exactly
/// [`TOTAL_BITS`] characters long or contains a character other than
/// `'0'` or `'1'`.
pub fn decode(bits: &str) -> Result<DecodedBits, Error> {
    if bits.chars().count() != TOTAL_BITS {
        return Err(Error::InvalidInput(format!(
            "bit string must have exactly {TOTAL_BITS} characters, got {}",
            bits.chars().count()
        )));
    }

    let mut digits = [0u8; TOTAL_BITS];
    for (i, ch) in bits.chars().enumerate() {
        digits[i] = match ch {
            '0' => 0,
            '1' => 1,
            other => {
                return Err(Error::InvalidInput(format!(
                    "bit string must contain only '0' or '1', found '{other}'"
                )))
            }
        };
    }

    let sign = if digits[0] == 1 { -1 } else { 1 };

    let mut exponent_bits = [0u8; EXPONENT_BITS];
    exponent_bits.copy_from_slice(&digits[1..1 + EXPONENT_BITS]);

    let mut fraction_bits = [0u8; FRACTION_BITS];
    fraction_bits.copy_from_slice(&digits[1 + EXPONENT_BITS..TOTAL_BITS]);

    let biased = bits_to_u64(&exponent_bits) as i64;
    let unbiased_exp = biased - EXPONENT_BIAS;

    Ok(DecodedBits {
        sign,
        exponent_bits,
        fraction_bits,
        unbiased_exp,
    })
}

/// Rejects bit fields that denote Infinity or NaN.
///
/// Fails with `Error::Overflow(Overflow::Infinity)` if `exponent_bits` is
/// all ones and `fraction_bits` is all zeros, or with
/// `Error::Overflow(Overflow::Nan)` if `exponent_bits` is all ones and
/// `fraction_bits` is non-zero. Otherwise returns `Ok(())`.
pub fn check_special(
    fraction_bits: &[u8; FRACTION_BITS],
    exponent_bits: &[u8; EXPONENT_BITS],
) -> Result<(), Error> {
    if exponent_bits.iter().all(|&b| b == 1) {
        if fraction_bits.iter().all(|&b| b == 0) {
            log::debug!("check_special: exponent all-ones, fraction zero -> Infinity");
            Err(Error::Overflow(Overflow::Infinity))
        } else {
            log::debug!("check_special: exponent all-ones, fraction non-zero -> NaN");
            Err(Error::Overflow(Overflow::Nan))
        }
    } else {
        Ok(())
    }
}

/// Produces the next representable bit pattern in ascending order.
///
/// Operates only on non-negative values (zero or positive floats); the
/// sign bit of `bits` must be `0`. Callers are responsible for rejecting
/// negative seeds before calling (see [`crate::fp::Fp::successors`]).
///
/// Adds one to the fraction field, propagating any carry into the
/// exponent field, then re-validates the result. Fails with
/// `Error::Overflow` if either the input or the output bit pattern
/// denotes Infinity or NaN.
pub fn next_binary_fp(bits: &str) -> Result<String, Error> {
    let decoded = decode(bits)?;
    check_special(&decoded.fraction_bits, &decoded.exponent_bits)?;

    if decoded.sign < 0 {
        return Err(Error::InvalidInput(
            "next_binary_fp only supports non-negative bit patterns".to_string(),
        ));
    }

    let mut fraction_bits = decoded.fraction_bits;
    let carried = increment_with_carry(&mut fraction_bits);

    let mut exponent_bits = decoded.exponent_bits;
    if carried {
        let overflowed = increment_with_carry(&mut exponent_bits);
        if overflowed {
            // exponent field itself overflowed past all-ones: unrepresentable.
            return Err(Error::Overflow(Overflow::Infinity));
        }
    }

    check_special(&fraction_bits, &exponent_bits)?;

    let mut out = String::with_capacity(TOTAL_BITS);
    out.push('0');
    for b in exponent_bits {
        out.push(if b == 1 { '1' } else { '0' });
    }
    for b in fraction_bits {
        out.push(if b == 1 { '1' } else { '0' });
    }
    Ok(out)
}

/// Adds one to a MSB-first bit array, propagating the carry toward index
/// 0. Returns `true` if the carry propagated out of the most significant
/// bit (the field overflowed).
fn increment_with_carry<const N: usize>(field: &mut [u8; N]) -> bool {
    for i in (0..N).rev() {
        if field[i] == 0 {
            field[i] = 1;
            return false;
        } else {
            field[i] = 0;
        }
    }
    true
}

fn bits_to_u64(field: &[u8]) -> u64 {
    field.iter().fold(0u64, |acc, &b| (acc << 1) | b as u64)
}
