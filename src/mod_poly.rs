use std::fmt;

use log::trace;

use crate::error::CalculatorError;

/// An element of (Z/pZ)[x]: a single-variable polynomial with coefficients
/// reduced modulo a fixed `modulus`.
///
/// `coeffs` is ordered from the constant term upward (index `i` holds the
/// coefficient of `x^i`) and is always canonical: no trailing zero except for
/// the zero polynomial, represented by `[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModPoly {
    pub coeffs: Vec<u64>,
    pub modulus: u64,
}

/// The result of Euclidean division: `dividend = divisor * quotient + remainder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivResult {
    pub quotient: ModPoly,
    pub remainder: ModPoly,
}

fn add_mod(a: u64, b: u64, m: u64) -> u64 {
    let sum = a + b;
    if sum >= m {
        sum - m
    } else {
        sum
    }
}

fn sub_mod(a: u64, b: u64, m: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128) * (b as u128) % (m as u128)) as u64
}

/// `base^exp mod modulus` by square-and-multiply. Used for the Fermat
/// inverses `a^(p-2) mod p` that division and field-element inversion need.
pub(crate) fn pow_mod(base: u64, exp: u64, modulus: u64) -> u64 {
    let mut result = 1u64 % modulus;
    let mut base = base % modulus;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exp >>= 1;
    }
    result
}

impl ModPoly {
    /// Build a polynomial from raw coefficients, reducing each modulo
    /// `modulus` and stripping trailing zeros down to the canonical form.
    pub fn new(modulus: u64, raw: Vec<u64>) -> Result<Self, CalculatorError> {
        if modulus == 0 {
            return Err(CalculatorError::InvalidModulus(modulus));
        }

        let mut coeffs: Vec<u64> = raw.into_iter().map(|c| c % modulus).collect();
        while coeffs.len() > 1 && *coeffs.last().unwrap() == 0 {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(0);
        }

        Ok(Self { coeffs, modulus })
    }

    /// The zero polynomial over Z/modulus Z.
    pub fn zero(modulus: u64) -> Self {
        Self {
            coeffs: vec![0],
            modulus,
        }
    }

    /// A constant polynomial.
    pub fn constant(c: u64, modulus: u64) -> Result<Self, CalculatorError> {
        Self::new(modulus, vec![c])
    }

    /// Degree of the polynomial; the zero polynomial has degree 0 by convention.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// The leading (highest-degree) coefficient.
    pub fn lead(&self) -> u64 {
        *self.coeffs.last().unwrap()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0] == 0
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    fn check_modulus(&self, other: &ModPoly) -> Result<(), CalculatorError> {
        if self.modulus != other.modulus {
            return Err(CalculatorError::ModulusMismatch {
                a: self.modulus,
                b: other.modulus,
            });
        }
        Ok(())
    }

    pub fn add(&self, other: &ModPoly) -> Result<ModPoly, CalculatorError> {
        self.check_modulus(other)?;
        let max_len = self.coeffs.len().max(other.coeffs.len());
        let mut out = Vec::with_capacity(max_len);
        for i in 0..max_len {
            let a = self.coeffs.get(i).copied().unwrap_or(0);
            let b = other.coeffs.get(i).copied().unwrap_or(0);
            out.push(add_mod(a, b, self.modulus));
        }
        ModPoly::new(self.modulus, out)
    }

    pub fn add_one(&self) -> Result<ModPoly, CalculatorError> {
        self.add(&ModPoly::constant(1, self.modulus)?)
    }

    pub fn sub(&self, other: &ModPoly) -> Result<ModPoly, CalculatorError> {
        self.check_modulus(other)?;
        let max_len = self.coeffs.len().max(other.coeffs.len());
        let mut out = Vec::with_capacity(max_len);
        for i in 0..max_len {
            let a = self.coeffs.get(i).copied().unwrap_or(0);
            let b = other.coeffs.get(i).copied().unwrap_or(0);
            out.push(sub_mod(a, b, self.modulus));
        }
        ModPoly::new(self.modulus, out)
    }

    pub fn negate(&self) -> ModPoly {
        let coeffs = self
            .coeffs
            .iter()
            .map(|&c| if c == 0 { 0 } else { self.modulus - c })
            .collect();
        // Negating a canonical polynomial yields a canonical one: zero stays
        // zero and the leading term stays nonzero.
        ModPoly {
            coeffs,
            modulus: self.modulus,
        }
    }

    pub fn mul(&self, other: &ModPoly) -> Result<ModPoly, CalculatorError> {
        self.check_modulus(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(ModPoly::zero(self.modulus));
        }

        let result_len = self.coeffs.len() + other.coeffs.len() - 1;
        let mut out = vec![0u64; result_len];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                let product = mul_mod(a, b, self.modulus);
                out[i + j] = add_mod(out[i + j], product, self.modulus);
            }
        }
        ModPoly::new(self.modulus, out)
    }

    /// Horner evaluation at `x`, reducing each intermediate value mod p.
    pub fn evaluate(&self, x: u64) -> u64 {
        let x = x % self.modulus;
        let mut result = 0u64;
        for &c in self.coeffs.iter().rev() {
            result = add_mod(mul_mod(result, x, self.modulus), c, self.modulus);
        }
        result
    }

    /// Euclidean long division: `self = divisor * quotient + remainder` with
    /// `remainder == 0` or `remainder.degree() < divisor.degree()`.
    ///
    /// Requires `self.modulus` to be prime (used to invert `divisor.lead()`
    /// via Fermat's little theorem); behavior is unspecified otherwise.
    pub fn div(&self, divisor: &ModPoly) -> Result<DivResult, CalculatorError> {
        self.check_modulus(divisor)?;
        if divisor.is_zero() {
            return Err(CalculatorError::DivisionByZero);
        }

        let p = self.modulus;
        let divisor_degree = divisor.degree();
        let divisor_lead_inv = pow_mod(divisor.lead(), p - 2, p);

        let mut quotient = ModPoly::zero(p);
        let mut remainder = self.clone();

        while !remainder.is_zero() && remainder.degree() >= divisor_degree {
            let shift = remainder.degree() - divisor_degree;
            let term_coeff = mul_mod(remainder.lead(), divisor_lead_inv, p);

            let mut term_coeffs = vec![0u64; shift + 1];
            term_coeffs[shift] = term_coeff;
            let term = ModPoly::new(p, term_coeffs)?;

            quotient = quotient.add(&term)?;
            let subtrahend = divisor.mul(&term)?;
            trace!(
                "euclidean division step: remainder={}, subtracting={}",
                remainder,
                subtrahend
            );
            remainder = remainder.sub(&subtrahend)?;
        }

        Ok(DivResult {
            quotient,
            remainder,
        })
    }
}

impl fmt::Display for ModPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0 mod {}", self.modulus);
        }

        let mut terms = Vec::new();
        for (i, &c) in self.coeffs.iter().enumerate().rev() {
            if c == 0 {
                continue;
            }
            let term = if i == 0 {
                format!("{}", c)
            } else if i == 1 {
                if c == 1 {
                    "x".to_string()
                } else {
                    format!("{}x", c)
                }
            } else if c == 1 {
                format!("x^{}", i)
            } else {
                format!("{}x^{}", c, i)
            };
            terms.push(term);
        }

        write!(f, "{} mod {}", terms.join(" + "), self.modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn normalizes_trailing_zeros() {
        let p = ModPoly::new(7, vec![1, 2, 0, 0]).unwrap();
        assert_eq!(p.coeffs, vec![1, 2]);
    }

    #[test]
    fn zero_vector_is_canonical_zero() {
        let p = ModPoly::new(7, vec![0, 0, 0]).unwrap();
        assert_eq!(p.coeffs, vec![0]);
        assert!(p.is_zero());
    }

    #[test]
    fn rejects_nonpositive_modulus() {
        let err = ModPoly::new(0, vec![1]).unwrap_err();
        assert_eq!(err, CalculatorError::InvalidModulus(0));
    }

    #[test]
    fn negative_raw_coefficients_normalize_to_positive_residue() {
        // u64 coefficients can't be negative directly, but reduction of a
        // value far above the modulus should still land in [0, modulus).
        let p = ModPoly::new(5, vec![103]).unwrap();
        assert_eq!(p.coeffs, vec![3]);
    }

    #[test]
    fn addition_is_elementwise_mod_p() {
        let a = ModPoly::new(7, vec![1, 2, 3]).unwrap();
        let b = ModPoly::new(7, vec![4, 5]).unwrap();
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.coeffs, vec![5, 0, 3]);
    }

    #[test]
    fn subtraction_wraps_below_zero() {
        let a = ModPoly::new(7, vec![1]).unwrap();
        let b = ModPoly::new(7, vec![3]).unwrap();
        let diff = a.sub(&b).unwrap();
        assert_eq!(diff.coeffs, vec![5]);
    }

    #[test]
    fn negation_is_an_involution() {
        let p = ModPoly::new(11, vec![3, 0, 7, 1]).unwrap();
        assert_eq!(p.negate().negate(), p);
    }

    #[test]
    fn multiplication_matches_schoolbook_convolution() {
        let a = ModPoly::new(7, vec![1, 2]).unwrap(); // 1 + 2x
        let b = ModPoly::new(7, vec![3, 4]).unwrap(); // 3 + 4x
        let product = a.mul(&b).unwrap();
        assert_eq!(product.coeffs, vec![3, 3, 1]); // 3 + 10x + 8x^2 mod 7
    }

    #[test]
    fn multiplying_by_zero_is_zero() {
        let a = ModPoly::new(7, vec![1, 2, 3]).unwrap();
        let zero = ModPoly::zero(7);
        assert!(a.mul(&zero).unwrap().is_zero());
    }

    #[test]
    fn evaluate_uses_horner() {
        let p = ModPoly::new(7, vec![1, 2, 3]).unwrap(); // 1 + 2x + 3x^2
        assert_eq!(p.evaluate(2), (1 + 4 + 12) % 7);
    }

    #[test]
    fn mismatched_moduli_are_rejected() {
        let a = ModPoly::new(7, vec![1, 1]).unwrap();
        let b = ModPoly::new(11, vec![1, 1]).unwrap();
        assert_eq!(
            a.add(&b).unwrap_err(),
            CalculatorError::ModulusMismatch { a: 7, b: 11 }
        );
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let a = ModPoly::new(7, vec![1, 2, 1]).unwrap();
        let zero = ModPoly::zero(7);
        assert_eq!(a.div(&zero).unwrap_err(), CalculatorError::DivisionByZero);
    }

    #[test]
    fn division_identity_exact_power_of_x() {
        let dividend = ModPoly::new(5, vec![0, 0, 1]).unwrap(); // x^2
        let divisor = ModPoly::new(5, vec![0, 1]).unwrap(); // x
        let result = dividend.div(&divisor).unwrap();
        assert_eq!(result.quotient.coeffs, vec![0, 1]); // x
        assert!(result.remainder.is_zero());
    }

    #[test]
    fn division_identity_with_nonzero_remainder() {
        let dividend = ModPoly::new(5, vec![1, 1, 1]).unwrap(); // x^2 + x + 1
        let divisor = ModPoly::new(5, vec![1, 1]).unwrap(); // x + 1
        let result = dividend.div(&divisor).unwrap();
        assert_eq!(result.quotient.coeffs, vec![0, 1]); // x
        assert_eq!(result.remainder.coeffs, vec![1]); // 1
    }

    #[test]
    fn division_identity_holds_for_arbitrary_pair() {
        let dividend = ModPoly::new(7, vec![1, 2, 3, 4]).unwrap();
        let divisor = ModPoly::new(7, vec![1, 1]).unwrap();
        let result = dividend.div(&divisor).unwrap();
        let reconstructed = divisor
            .mul(&result.quotient)
            .unwrap()
            .add(&result.remainder)
            .unwrap();
        assert_eq!(reconstructed, dividend);
        assert!(result.remainder.is_zero() || result.remainder.degree() < divisor.degree());
    }

    #[test]
    fn display_matches_mathematical_notation() {
        let poly = ModPoly::new(5, vec![1, 2, 3]).unwrap(); // 1 + 2x + 3x^2
        assert_eq!(poly.to_string(), "3x^2 + 2x + 1 mod 5");

        let zero = ModPoly::zero(5);
        assert_eq!(zero.to_string(), "0 mod 5");

        let monic_x = ModPoly::new(5, vec![0, 1]).unwrap();
        assert_eq!(monic_x.to_string(), "x mod 5");
    }

    #[test]
    fn ring_distributivity() {
        let a = ModPoly::new(11, vec![3, 5]).unwrap();
        let b = ModPoly::new(11, vec![2, 0, 1]).unwrap();
        let c = ModPoly::new(11, vec![1, 4]).unwrap();

        let lhs = a.mul(&b.add(&c).unwrap()).unwrap();
        let rhs = a.mul(&b).unwrap().add(&a.mul(&c).unwrap()).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn self_subtraction_is_zero() {
        let a = ModPoly::new(13, vec![9, 8, 7]).unwrap();
        assert!(a.sub(&a).unwrap().is_zero());
    }
}
