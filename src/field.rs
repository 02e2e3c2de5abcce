use log::info;

use crate::error::CalculatorError;
use crate::irreducible::IrreducibleFinder;
use crate::mod_poly::{pow_mod, ModPoly};

/// The first 26 primes, the closed set of supported field characteristics.
pub const SUPPORTED_PRIMES: [u64; 26] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101,
];

/// The supported extension degree range; the finder's prime-factor table is
/// only total over this range.
pub const MIN_DEGREE: usize = 1;
pub const MAX_DEGREE: usize = 12;

/// A field arithmetic operation. Closed and typed: there is no free-form
/// string form at this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// GF(p^n), represented as Z/pZ\[x\] reduced modulo an irreducible monic
/// polynomial of degree n. Immutable once constructed: safe to share across
/// concurrent readers without synchronization.
#[derive(Debug, Clone)]
pub struct FieldCalculator {
    p: u64,
    n: usize,
    modulus: ModPoly,
}

impl FieldCalculator {
    /// Construct GF(p^n), searching for an irreducible modulus polynomial.
    pub fn new(p: u64, n: usize) -> Result<Self, CalculatorError> {
        if !SUPPORTED_PRIMES.contains(&p) {
            return Err(CalculatorError::InvalidCharacteristic(p));
        }
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&n) {
            return Err(CalculatorError::InvalidDegree(n));
        }

        let modulus = IrreducibleFinder::find(p, n)?;
        info!("constructed GF({}^{}) with modulus {}", p, n, modulus);
        Ok(Self { p, n, modulus })
    }

    pub fn characteristic(&self) -> u64 {
        self.p
    }

    pub fn degree(&self) -> usize {
        self.n
    }

    pub fn modulus_polynomial(&self) -> &ModPoly {
        &self.modulus
    }

    fn reduce(&self, poly: ModPoly) -> Result<ModPoly, CalculatorError> {
        Ok(poly.div(&self.modulus)?.remainder)
    }

    /// Lift two coefficient vectors to field elements and apply `op`.
    pub fn operate(
        &self,
        a_coeffs: Vec<u64>,
        b_coeffs: Vec<u64>,
        op: FieldOp,
    ) -> Result<ModPoly, CalculatorError> {
        let a = ModPoly::new(self.p, a_coeffs)?;
        let b = ModPoly::new(self.p, b_coeffs)?;

        match op {
            FieldOp::Add => a.add(&b),
            FieldOp::Sub => a.sub(&b),
            FieldOp::Mul => self.reduce(a.mul(&b)?),
            FieldOp::Div => {
                if b.is_zero() {
                    return Err(CalculatorError::DivisionByZero);
                }
                let b_inv = self.inverse(&b)?;
                self.reduce(a.mul(&b_inv)?)
            }
        }
    }

    /// Multiplicative inverse of `a` in GF(p^n), via the Extended Euclidean
    /// Algorithm run on `(modulus, a)`.
    pub fn inverse(&self, a: &ModPoly) -> Result<ModPoly, CalculatorError> {
        if a.is_zero() {
            return Err(CalculatorError::NoInverse);
        }

        if a.is_constant() {
            let inv = pow_mod(a.coeffs[0], self.p - 2, self.p);
            return ModPoly::new(self.p, vec![inv]);
        }

        let mut r_prev = self.modulus.clone();
        let mut r_curr = a.clone();
        let mut quotients: Vec<ModPoly> = Vec::new();

        let final_remainder = loop {
            let division = r_prev.div(&r_curr)?;
            quotients.push(division.quotient);
            if division.remainder.is_constant() {
                break division.remainder;
            }
            r_prev = r_curr;
            r_curr = division.remainder;
        };

        // Back-substitution with a two-slot rolling window: s_i only ever
        // depends on s_{i-1} and s_{i-2}.
        let mut bezout = quotients[0].negate();
        if quotients.len() > 1 {
            let mut s_prev2 = bezout;
            let mut s_prev1 = quotients[0].mul(&quotients[1])?.add_one()?;
            for q in quotients.iter().skip(2) {
                let product = q.mul(&s_prev1)?;
                let s_next = s_prev2.sub(&product)?;
                s_prev2 = s_prev1;
                s_prev1 = s_next;
            }
            bezout = s_prev1;
        }

        let reduced = self.reduce(bezout)?;
        let constant_inverse = pow_mod(final_remainder.coeffs[0], self.p - 2, self.p);
        let constant_inverse_poly = ModPoly::new(self.p, vec![constant_inverse])?;
        self.reduce(reduced.mul(&constant_inverse_poly)?)
    }
}
