// exact754: exact decimal reasoning about IEEE 754 binary64 doubles
// Brett Saiki <bksaiki(at)gmail.com>
// 2023

// error.rs
//
// The error type shared by every fallible operation in this crate.

use thiserror::Error;

/// The reason a bit pattern could not be interpreted as a finite number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overflow {
    /// The exponent field is all ones and the fraction field is all zeros.
    Infinity,
    /// The exponent field is all ones and the fraction field is non-zero.
    Nan,
}

impl std::fmt::Display for Overflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Overflow::Infinity => write!(f, "Infinity"),
            Overflow::Nan => write!(f, "NaN"),
        }
    }
}

/// Errors produced by this crate.
///
/// None of these are fatal at process scope: every call that can fail
/// returns a `Result<_, Error>` and the caller decides how to react.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A bit string, decimal string, or digit count was malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A bit pattern denotes (or would denote, after a successor step)
    /// a non-finite value.
    #[error("overflow: {0}")]
    Overflow(Overflow),

    /// A value was syntactically well-formed but outside the range this
    /// crate supports (digit counts, unbiased exponents).
    #[error("out of range: {0}")]
    OutOfRange(String),
}
