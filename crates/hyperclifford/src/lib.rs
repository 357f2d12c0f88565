//! Cayley tables and multivectors for Clifford algebras of any signature.
//!
//! A [`Signature`] counts the basis vectors that square to `+1`, `-1`, and
//! `0`. From it, [`StructureConstants`] computes the product of any two basis
//! [`Blade`]s, [`CayleyTable`] stores every such product, and [`Algebra`]
//! bundles the table with everything a [`Multivector`] needs.
//!
//! ```
//! use hyperclifford::prelude::*;
//!
//! let vga = Algebra::cached(Signature::VGA3D).unwrap();
//! let e1 = Multivector::<f64>::basis_vector(&vga, 0).unwrap();
//! let e2 = Multivector::<f64>::basis_vector(&vga, 1).unwrap();
//! assert_eq!(&e2 * &e1, -(&e1 ^ &e2));
//! ```

pub use {approx, num_traits as num};

/// Default floating-point coefficient type.
pub type Float = f64;

/// Small floating-point value used for approximate comparisons.
pub const EPSILON: Float = 0.000001;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

#[macro_use]
mod impl_macros;

mod algebra;
mod bitset;
mod blade;
mod duality;
pub mod error;
mod multivector;
mod sign;
mod signature;
mod structure;
mod table;


pub use algebra::{Algebra, ProductKind};
pub use bitset::{BitSet, STORAGE_BITS};
pub use blade::{Blade, BladeOrder};
pub use duality::DualSigns;
pub use error::{
    AlgebraError, BitIndexOutOfRange, BladeOrderError, ParseSignatureError, SignatureError,
    TableError,
};
pub use multivector::{Multivector, Scalar};
pub use sign::{Sign, StructureConstant};
pub use signature::{BasisMask, Signature};
pub use structure::StructureConstants;
pub use table::{CayleyTable, MAX_TABLE_NDIM, TableEntry, const_table};

/// Types, traits, and constants for working with multivectors.
pub mod prelude {
    pub use approx::AbsDiffEq;

    pub use crate::{
        Algebra, Blade, EPSILON, Float, Multivector, ProductKind, Scalar, Sign, Signature,
        StructureConstant, assert_approx_eq,
    };
}
