/*!
`exact754` reasons about IEEE 754 binary64 ("double") floating-point
numbers as exact decimal quantities.

Given any finite, normal double it exposes: its bit pattern
([`bits`]), the mathematically exact terminating decimal its bit
pattern denotes ([`decimal`]), an immutable record bundling the two
together with a lazy ascending successor sequence ([`fp`]), the set of
d-digit decimal numerals that round to that double under the
platform's nearest-even conversion ([`enumerate`]), and the
min/max/ulp descriptor of the range of doubles sharing its unbiased
exponent ([`segment`]).

This is a library: no transport layer, template engine, or
input-parsing glue lives here (see [`error`] for the contract every
fallible operation honours instead).
*/

pub mod bits;
pub mod decimal;
pub mod enumerate;
pub mod error;
pub mod fp;
pub mod segment;

pub use crate::enumerate::{get_d_digit_decimals, DDigitDecimals};
pub use crate::error::{Error, Overflow};
pub use crate::fp::Fp;
pub use crate::segment::{segment_from_double, segment_from_exponent, Segment};
