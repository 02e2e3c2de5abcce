use thiserror::Error;

/// The closed set of failures the core can produce.
///
/// Every fallible operation in [`crate::mod_poly`], [`crate::irreducible`], and
/// [`crate::field`] returns `Result<_, CalculatorError>`. There is no recovery
/// inside the core: a caller either gets a canonical result or one of these
/// variants, never a partial one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("modulus must be a positive integer, got {0}")]
    InvalidModulus(u64),

    #[error("cannot combine polynomials with different moduli ({a} vs {b})")]
    ModulusMismatch { a: u64, b: u64 },

    #[error("division by the zero polynomial")]
    DivisionByZero,

    #[error("the zero polynomial has no multiplicative inverse")]
    NoInverse,

    #[error("{0} is not a supported field characteristic")]
    InvalidCharacteristic(u64),

    #[error("{0} is not a supported extension degree (must be in 1..=12)")]
    InvalidDegree(usize),

    /// Unreachable through the typed [`crate::field::FieldOp`] API; kept for
    /// parity with the string-dispatched operation this was distilled from.
    #[error("unknown field operation")]
    UnknownOperation,

    #[error("no irreducible trinomial of degree {d} found over GF({p})")]
    SearchExhausted { p: u64, d: usize },
}
