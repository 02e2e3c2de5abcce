//! Modular polynomial algebra and irreducible-polynomial discovery for
//! constructing and computing in GF(p^n).
//!
//! Three layered components, each depending only on the ones below it:
//! [`mod_poly::ModPoly`] is the polynomial ring over Z/pZ; [`irreducible::IrreducibleFinder`]
//! searches it for an irreducible modulus of a given degree; [`field::FieldCalculator`]
//! glues the two together into GF(p^n) arithmetic.
//!
//! The crate is a pure computational core: no GUI, no CLI, no persistence,
//! no async wrapper. Those are integration concerns for a caller to provide.

pub mod error;
pub mod field;
pub mod irreducible;
pub mod mod_poly;

pub use error::CalculatorError;
pub use field::{FieldCalculator, FieldOp};
pub use irreducible::IrreducibleFinder;
pub use mod_poly::{DivResult, ModPoly};
