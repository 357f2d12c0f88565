//! Error types.

use std::num::ParseIntError;

use thiserror::Error;

use crate::{Blade, Signature};

/// Error when a bit index is not less than the logical width of a
/// [`crate::BitSet`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[error("bit index {bit} out of range for {width}-bit set")]
pub struct BitIndexOutOfRange {
    /// Requested bit index.
    pub bit: u32,
    /// Logical width of the bit set.
    pub width: u32,
}

/// Error when constructing an invalid [`Signature`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SignatureError {
    /// More basis vectors than fit in a blade bitmask
    #[error("signature has {ndim} basis vectors but at most {max} are supported")]
    TooManyBasisVectors {
        /// Total number of basis vectors requested.
        ndim: u16,
        /// Maximum number of basis vectors.
        max: u8,
    },
}

/// Error produced when parsing a [`Signature`] from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSignatureError {
    /// Empty input
    #[error("empty signature")]
    Empty,
    /// Unknown algebra name
    #[error("unknown algebra name {0:?}")]
    UnknownName(String),
    /// Wrong number of comma-separated counts
    #[error("expected 2 or 3 basis vector counts, got {0}")]
    WrongArity(usize),
    /// Integer parse error
    #[error("invalid basis vector count: {0}")]
    InvalidCount(#[from] ParseIntError),
    /// Counts parsed but do not form a valid signature
    #[error(transparent)]
    Invalid(#[from] SignatureError),
}

/// Error when building a [`crate::CayleyTable`] or anything sized by one.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TableError {
    /// Dense table would be too large to build
    #[error("cannot build a table for {signature}: more than {max_ndim} basis vectors")]
    TooLarge {
        /// Requested signature.
        signature: Signature,
        /// Maximum number of basis vectors for which tables are built.
        max_ndim: u8,
    },
}

/// Error when constructing a custom [`crate::BladeOrder`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BladeOrderError {
    /// Wrong number of blades
    #[error("expected {expected} blades, got {got}")]
    WrongLength {
        /// Number of blades in the algebra.
        expected: usize,
        /// Number of blades supplied.
        got: usize,
    },
    /// Blade does not exist in the algebra
    #[error("blade {blade} does not exist in {ndim}-dimensional algebra")]
    OutOfRange {
        /// Offending blade.
        blade: Blade,
        /// Number of basis vectors.
        ndim: u8,
    },
    /// Blade listed more than once
    #[error("blade {0} appears more than once")]
    Duplicate(Blade),
    /// Underlying table limit
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Error from a multivector operation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlgebraError {
    /// Operands belong to different algebras
    #[error("cannot combine multivectors of {lhs} and {rhs}")]
    MismatchedAlgebra {
        /// Signature of the left operand.
        lhs: Signature,
        /// Signature of the right operand.
        rhs: Signature,
    },
    /// Wrong number of coefficients supplied
    #[error("expected {expected} coefficients, got {got}")]
    WrongCoefficientCount {
        /// Number of blades in the algebra.
        expected: usize,
        /// Number of coefficients supplied.
        got: usize,
    },
    /// Blade does not exist in the algebra
    #[error("blade {blade} does not exist in {signature}")]
    BladeOutOfRange {
        /// Offending blade.
        blade: Blade,
        /// Signature of the algebra.
        signature: Signature,
    },
    /// Underlying table limit
    #[error(transparent)]
    Table(#[from] TableError),
}
