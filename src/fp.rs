// exact754: exact decimal reasoning about IEEE 754 binary64 doubles
// Brett Saiki <bksaiki(at)gmail.com>
// 2023

// fp.rs
//
// The floating-point record (Fp) and its successor generator.

use crate::bits::{self, SMALLEST_NORMAL_BITS, TOTAL_BITS, ZERO_BITS};
use crate::decimal::{self, Decimal};
use crate::error::Error;

/// An immutable bundle of a double, its bit pattern, its exact decimal
/// expansion, and its unbiased exponent.
///
/// Constructed only by [`Fp::from_double`], [`Fp::from_binary`], or
/// [`Fp::from_decimal`]; never mutated afterward. Equality is structural
/// on all four fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Fp {
    /// The platform-canonical `f64` value.
    pub fp: f64,
    /// The 64-character bit string encoding of `fp`.
    pub bits: String,
    /// The exact terminating decimal value that `bits` denotes.
    pub exact_decimal: Decimal,
    /// The unbiased exponent `e`.
    pub unbiased_exp: i64,
}

impl Fp {
    /// Builds an `Fp` from a finite, normal `f64`.
    ///
    /// Encodes `d`, decodes the resulting bit pattern, rejects Infinity
    /// and NaN, and computes the exact decimal expansion.
    pub fn from_double(d: f64) -> Result<Fp, Error> {
        let encoded = bits::encode(d);
        let decoded = bits::decode(&encoded.bit_string)?;
        bits::check_special(&decoded.fraction_bits, &decoded.exponent_bits)?;
        let exact_decimal = decimal::expand(&decoded)?;
        log::trace!("Fp::from_double({d}) -> {}", encoded.bit_string);
        Ok(Fp {
            fp: d,
            bits: encoded.bit_string,
            exact_decimal,
            unbiased_exp: decoded.unbiased_exp,
        })
    }

    /// Builds an `Fp` from a 64-character `'0'`/`'1'` bit string.
    ///
    /// Rejects malformed strings, Infinity, and NaN. The resulting `fp`
    /// field is computed from the exact decimal expansion via the
    /// platform's nearest-even decimal-to-double conversion, which is
    /// guaranteed to reproduce the original double exactly (round-trip
    /// exactness, §8).
    pub fn from_binary(bits: &str) -> Result<Fp, Error> {
        let decoded = bits::decode(bits)?;
        bits::check_special(&decoded.fraction_bits, &decoded.exponent_bits)?;
        let exact_decimal = decimal::expand(&decoded)?;
        let fp = exact_decimal.to_f64();
        debug_assert_eq!(bits.len(), TOTAL_BITS);
        Ok(Fp {
            fp,
            bits: bits.to_string(),
            exact_decimal,
            unbiased_exp: decoded.unbiased_exp,
        })
    }

    /// Builds an `Fp` from an arbitrary-precision [`Decimal`] by first
    /// rounding it to the nearest double (platform nearest-even), then
    /// delegating to [`Fp::from_double`].
    pub fn from_decimal(dec: &Decimal) -> Result<Fp, Error> {
        Fp::from_double(dec.to_f64())
    }

    /// Returns a lazy, restartable iterator over the strictly ascending
    /// sequence of `Fp` records following this one.
    ///
    /// Fails eagerly with [`Error::InvalidInput`] if `self.fp` is
    /// negative (the seed precondition); the iterator itself yields one
    /// final `Err(Error::Overflow(..))` item when a step would cross into
    /// Infinity or NaN, then is exhausted. Advancing from a zero seed
    /// skips the unrepresented subnormal range and yields the smallest
    /// normal double first.
    pub fn successors(&self) -> Result<Successors, Error> {
        if self.fp < 0.0 {
            return Err(Error::InvalidInput(
                "successors() requires a seed with fp >= 0".to_string(),
            ));
        }
        Ok(Successors {
            current_bits: Some(self.bits.clone()),
        })
    }
}

/// A lazy, single-consumer iterator of [`Fp`] records in strictly
/// ascending order, produced by [`Fp::successors`].
///
/// Restartable because its seed is immutable: call `Fp::successors`
/// again on the same `Fp` to get an independent iterator.
pub struct Successors {
    current_bits: Option<String>,
}

impl Iterator for Successors {
    type Item = Result<Fp, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let bits = self.current_bits.take()?;

        // `next_binary_fp` on the zero pattern steps into the subnormal
        // range (fraction field 0 -> 1, exponent field still all-zero),
        // which this crate does not represent (see `decimal::expand`).
        // Skip directly to the smallest normal double instead of
        // surfacing that as a spurious `InvalidInput`.
        let next_bits = if bits == ZERO_BITS {
            Ok(SMALLEST_NORMAL_BITS.to_string())
        } else {
            bits::next_binary_fp(&bits)
        };

        match next_bits {
            Ok(next_bits) => match Fp::from_binary(&next_bits) {
                Ok(fp) => {
                    self.current_bits = Some(next_bits);
                    Some(Ok(fp))
                }
                Err(e) => Some(Err(e)),
            },
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_double_round_trips() {
        let fp = Fp::from_double(1.2).unwrap();
        assert_eq!(fp.fp, 1.2);
        assert_eq!(fp.unbiased_exp, 0);
        assert_eq!(
            fp.exact_decimal.to_string(),
            "1.1999999999999999555910790149937383830547332763671875"
        );
        let round_tripped = Fp::from_binary(&fp.bits).unwrap();
        assert_eq!(round_tripped, fp);
    }

    #[test]
    fn from_decimal_rounds_nearest_even() {
        let dec = crate::decimal::Decimal::from_magnitude(false, rug::Integer::from(1), -1);
        let fp = Fp::from_decimal(&dec).unwrap();
        assert_eq!(fp.fp, 0.1);
    }

    #[test]
    fn successors_are_strictly_ascending() {
        let seed = Fp::from_double(1.0).unwrap();
        let mut iter = seed.successors().unwrap();
        let next = iter.next().unwrap().unwrap();
        assert!(next.fp > seed.fp);
        assert_eq!(next.fp, f64::from_bits(1.0_f64.to_bits() + 1));
    }

    #[test]
    fn successors_reject_negative_seed() {
        let seed = Fp::from_double(-1.0).unwrap();
        assert!(matches!(seed.successors(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn successors_terminate_with_overflow() {
        let seed = Fp::from_double(f64::MAX).unwrap();
        let mut iter = seed.successors().unwrap();
        assert!(matches!(
            iter.next(),
            Some(Err(Error::Overflow(crate::error::Overflow::Infinity)))
        ));
        assert!(iter.next().is_none());
    }

    #[test]
    fn successors_are_restartable() {
        let seed = Fp::from_double(1.0).unwrap();
        let first: Vec<_> = seed.successors().unwrap().take(3).collect();
        let second: Vec<_> = seed.successors().unwrap().take(3).collect();
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }

    #[test]
    fn successors_from_zero_skip_to_smallest_normal() {
        let seed = Fp::from_double(0.0).unwrap();
        let first = seed.successors().unwrap().next().unwrap().unwrap();
        assert_eq!(first.fp, f64::MIN_POSITIVE);
        assert_eq!(first.unbiased_exp, -1022);

        let second = seed.successors().unwrap().nth(1).unwrap().unwrap();
        assert!(second.fp > first.fp);
        assert_eq!(second.bits, bits::next_binary_fp(&first.bits).unwrap());
    }
}
