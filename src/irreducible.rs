use log::{debug, info, trace};

use crate::error::CalculatorError;
use crate::mod_poly::ModPoly;

/// Prime factors of `n` for `n` in the supported degree range `1..=12`.
/// Looked up, never computed: primality testing of the degree is out of
/// scope, and the supported range is small enough to enumerate by hand.
const PRIME_FACTORS: [(usize, &[usize]); 12] = [
    (1, &[1]),
    (2, &[2]),
    (3, &[3]),
    (4, &[2]),
    (5, &[5]),
    (6, &[2, 3]),
    (7, &[7]),
    (8, &[2]),
    (9, &[3]),
    (10, &[2, 5]),
    (11, &[11]),
    (12, &[2, 3]),
];

/// Degrees whose Rabin-test result alone is not conclusive: composite,
/// non-prime-power degrees within the supported range. See the modified
/// Rabin test's trial-division fallback.
const NON_PRIME_POWER_DEGREES: [usize; 3] = [6, 10, 12];

fn prime_factors(n: usize) -> &'static [usize] {
    PRIME_FACTORS
        .iter()
        .find(|(d, _)| *d == n)
        .map(|(_, factors)| *factors)
        .unwrap_or_else(|| panic!("degree {} is outside the supported 1..=12 range", n))
}

/// Finds irreducible monic polynomials of a given degree over Z/pZ.
pub struct IrreducibleFinder;

impl IrreducibleFinder {
    /// Produce a monic irreducible polynomial of degree `d` over Z/pZ.
    pub fn find(p: u64, d: usize) -> Result<ModPoly, CalculatorError> {
        if d == 1 {
            debug!("degree 1 is always irreducible: returning x");
            return ModPoly::new(p, vec![0, 1]);
        }
        if p == 2 && d == 8 {
            debug!("no irreducible trinomial exists for GF(2^8); using the hardcoded octonomial");
            return ModPoly::new(2, vec![1, 1, 0, 0, 0, 0, 1, 1, 1]);
        }
        find_irreducible_trinomial(p, d)
    }
}

fn is_primitive(c: u64, p: u64) -> bool {
    let mut current = c;
    let mut order = 1u64;
    while current != 1 {
        current = (current * c) % p;
        order += 1;
    }
    order == p - 1
}

fn find_irreducible_trinomial(p: u64, d: usize) -> Result<ModPoly, CalculatorError> {
    let primitive_elements: Vec<u64> = (1..p).filter(|&c| is_primitive(c, p)).collect();
    let mut candidates_tried = 0u64;

    for &c in primitive_elements.iter().chain(std::iter::once(&1)) {
        for y in 1..p {
            for k in 1..d {
                let mut coeffs = vec![0u64; d + 1];
                coeffs[0] = c;
                coeffs[k] = y;
                coeffs[d] = 1;

                let candidate = ModPoly::new(p, coeffs)?;
                candidates_tried += 1;
                if is_irreducible(&candidate)? {
                    info!(
                        "found irreducible trinomial for GF({}^{}) after {} candidates: {}",
                        p, d, candidates_tried, candidate
                    );
                    return Ok(candidate);
                }
            }
        }
    }

    Err(CalculatorError::SearchExhausted { p, d })
}

fn is_irreducible(f: &ModPoly) -> Result<bool, CalculatorError> {
    let deg = f.degree();
    if deg <= 3 {
        return Ok(check_low_degree(f, deg));
    }
    if !check_high_degree(f, deg)? {
        return Ok(false);
    }
    if NON_PRIME_POWER_DEGREES.contains(&deg) && !check_non_prime_power_degree(f)? {
        return Ok(false);
    }
    Ok(true)
}

fn check_low_degree(f: &ModPoly, deg: usize) -> bool {
    match deg {
        0 => f.coeffs[0] != 0,
        1 => true,
        2 | 3 => !(0..f.modulus).any(|a| f.evaluate(a) == 0),
        _ => unreachable!("check_low_degree only called for degree <= 3"),
    }
}

/// Modified Rabin test: `f` of degree `n` is irreducible iff `x^(p^n) ≡ x`
/// and `x^(p^(n/r)) ≢ x` for every prime factor `r` of `n`.
fn check_high_degree(f: &ModPoly, deg: usize) -> Result<bool, CalculatorError> {
    let p = f.modulus;
    let standard = ModPoly::new(p, vec![0, 1])?;

    let full_power = (p as u128).pow(deg as u32);
    if compute_large_exponent_of_x(full_power, f)? != standard {
        return Ok(false);
    }

    for &r in prime_factors(deg) {
        let sub_power = (p as u128).pow((deg / r) as u32);
        if compute_large_exponent_of_x(sub_power, f)? == standard {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Trial-division fallback for composite non-prime-power degrees: checks
/// that `f` has no monic divisor of degree 1 or 2.
fn check_non_prime_power_degree(f: &ModPoly) -> Result<bool, CalculatorError> {
    let p = f.modulus;
    for deg in [1usize, 2usize] {
        for lower in lower_coefficient_tuples(p, deg) {
            let mut coeffs = lower;
            coeffs.push(1); // monic
            let divisor = ModPoly::new(p, coeffs)?;
            if f.div(&divisor)?.remainder.is_zero() {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Every `deg`-length tuple of coefficients in `[0, p)`, in the order
/// `product(range(p), repeat=deg)` would yield.
fn lower_coefficient_tuples(p: u64, deg: usize) -> Vec<Vec<u64>> {
    let mut tuples = vec![vec![]];
    for _ in 0..deg {
        let mut next = Vec::with_capacity(tuples.len() * p as usize);
        for prefix in &tuples {
            for v in 0..p {
                let mut extended = prefix.clone();
                extended.push(v);
                next.push(extended);
            }
        }
        tuples = next;
    }
    tuples
}

/// Computes `x^target_power mod f` with O(log target_power) multiplications,
/// memoizing every squared power reached so the final non-power-of-two step
/// can land on the target exactly by composing known smaller powers.
fn compute_large_exponent_of_x(target_power: u128, f: &ModPoly) -> Result<ModPoly, CalculatorError> {
    let d = f.degree();
    let mut power: u128 = 1;
    let mut active = ModPoly::new(f.modulus, vec![0, 1])?;
    let mut history: Vec<(ModPoly, u128)> = vec![(active.clone(), power)];

    while power < target_power {
        let mut record_this_step = false;

        if power * 2 > target_power {
            let remaining = target_power - power;
            let (value, exponent) = history
                .iter()
                .rev()
                .find(|(_, e)| *e <= remaining)
                .cloned()
                .expect("exponent 1 is always present in history");
            trace!("composing exponent {} with known power {}", power, exponent);
            active = active.mul(&value)?;
            power += exponent;
        } else {
            active = active.mul(&active)?;
            power *= 2;
            record_this_step = true;
        }

        if active.degree() >= d {
            active = active.div(f)?.remainder;
        }

        if record_this_step {
            history.push((active.clone(), power));
        }
    }

    Ok(active)
}
