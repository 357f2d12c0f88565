//! Basis blades and orderings of basis blades.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor};

use itertools::Itertools;

use crate::error::{BladeOrderError, TableError};
use crate::signature::BasisMask;
use crate::{Sign, Signature};

/// Basis blade, represented as a bitmask of basis vectors.
///
/// Bit `i` is set if basis vector `i` is a factor of the blade. The basis
/// vectors are always multiplied in increasing order, so `e₁₃` means `e₁e₃`
/// and never `e₃e₁`.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Blade(u64);

impl fmt::Debug for Blade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blade({self})")
    }
}

impl fmt::Display for Blade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scalar() {
            return write!(f, "1");
        }
        let separate = self.basis_vectors().any(|i| i >= 9);
        write!(f, "e")?;
        for (n, i) in self.basis_vectors().enumerate() {
            if separate && n > 0 {
                write!(f, ",")?;
            }
            write_subscript(f, i as u32 + 1)?;
        }
        Ok(())
    }
}

fn write_subscript(f: &mut fmt::Formatter<'_>, n: u32) -> fmt::Result {
    const DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
    if n >= 10 {
        write_subscript(f, n / 10)?;
    }
    write!(f, "{}", DIGITS[(n % 10) as usize])
}

impl Blade {
    /// Scalar (no basis vectors).
    pub const SCALAR: Self = Self(0);

    /// Constructs a blade from a bitmask of basis vectors.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }
    /// Returns the bitmask of basis vectors.
    pub const fn bits(self) -> u64 {
        self.0
    }
    /// Returns the blade as a [`BasisMask`].
    pub const fn to_mask(self) -> BasisMask {
        BasisMask::from_bits(self.0)
    }
    /// Returns the index of the blade's coefficient in a container indexed by
    /// bitmask.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the blade consisting of only basis vector `i` (zero-indexed).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 64`.
    pub const fn basis(i: u8) -> Self {
        assert!(i < Signature::MAX_NDIM, "basis vector index out of range");
        Self(1 << i)
    }
    /// Constructs a blade from the indices of its basis vectors.
    ///
    /// # Panics
    ///
    /// Panics if any index is `64` or greater.
    pub fn from_basis_vectors(indices: impl IntoIterator<Item = u8>) -> Self {
        indices
            .into_iter()
            .fold(Self::SCALAR, |acc, i| acc | Self::basis(i))
    }
    /// Returns the blade containing the first `ndim` basis vectors.
    pub const fn pseudoscalar(ndim: u8) -> Self {
        Self(BasisMask::create_mask(ndim as u32, 0).bits())
    }

    /// Returns the number of basis vectors in the blade.
    pub const fn grade(self) -> u8 {
        self.0.count_ones() as u8
    }
    /// Returns whether the blade is the scalar blade.
    pub const fn is_scalar(self) -> bool {
        self.0 == 0
    }
    /// Returns whether every basis vector of `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        other.0 & !self.0 == 0
    }
    /// Returns whether `self` and `other` have no basis vectors in common.
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }
    /// Returns the blade with exactly the basis vectors absent from `self`, in
    /// an algebra with `ndim` basis vectors.
    #[must_use]
    pub const fn complement(self, ndim: u8) -> Self {
        Self(self.0 ^ Self::pseudoscalar(ndim).0)
    }

    /// Returns the indices of the basis vectors in the blade, in increasing
    /// order.
    pub fn basis_vectors(self) -> impl Iterator<Item = u8> + Clone {
        self.to_mask().iter_ones().map(|i| i as u8)
    }

    /// Returns the sign of the reverse of the blade.
    pub fn sign_of_reverse(self) -> Sign {
        // The number of swaps required to reverse a sequence of length n is
        // n*(n-1)/2, which is odd exactly when n is 2 or 3 mod 4.
        match self.grade() % 4 {
            0 | 1 => Sign::Pos,
            _ => Sign::Neg,
        }
    }
    /// Returns the sign of the grade involution of the blade.
    pub fn sign_of_grade_involution(self) -> Sign {
        Sign::from_negative(self.grade() % 2 == 1)
    }
    /// Returns the sign of the Clifford conjugate of the blade, which is the
    /// reverse of the grade involution.
    pub fn sign_of_conjugate(self) -> Sign {
        self.sign_of_reverse() * self.sign_of_grade_involution()
    }
}

impl BitXor for Blade {
    type Output = Blade;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Blade(self.0 ^ rhs.0)
    }
}
impl BitAnd for Blade {
    type Output = Blade;

    fn bitand(self, rhs: Self) -> Self::Output {
        Blade(self.0 & rhs.0)
    }
}
impl BitOr for Blade {
    type Output = Blade;

    fn bitor(self, rhs: Self) -> Self::Output {
        Blade(self.0 | rhs.0)
    }
}

/// Ordering of every basis blade in an algebra.
///
/// Coefficients are stored by blade bitmask, but people (and most other
/// geometric algebra libraries) list blades grouped by grade. This maps
/// between the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BladeOrder {
    ndim: u8,
    blades: Box<[Blade]>,
    /// Position of each blade, indexed by bitmask.
    positions: Box<[usize]>,
}

impl BladeOrder {
    /// Constructs the natural ordering for a signature: blades are grouped by
    /// grade, and ordered lexicographically by basis vector within each grade.
    ///
    /// For three basis vectors this is `1, e₁, e₂, e₃, e₁₂, e₁₃, e₂₃, e₁₂₃`.
    pub fn natural(signature: Signature) -> Result<Self, TableError> {
        crate::table::dense_blade_count(signature)?;
        let ndim = signature.ndim();
        let blades = (0..=ndim)
            .flat_map(|grade| (0..ndim).combinations(grade as usize))
            .map(Blade::from_basis_vectors)
            .collect_vec();
        Ok(Self::from_permutation_unchecked(ndim, blades))
    }

    /// Constructs a custom ordering from a list of every blade in the algebra.
    pub fn from_blades(
        signature: Signature,
        blades: impl IntoIterator<Item = Blade>,
    ) -> Result<Self, BladeOrderError> {
        let expected = crate::table::dense_blade_count(signature)?;
        let ndim = signature.ndim();
        let blades = blades.into_iter().collect_vec();
        if blades.len() != expected {
            return Err(BladeOrderError::WrongLength {
                expected,
                got: blades.len(),
            });
        }
        let mut seen = vec![false; expected];
        for &blade in &blades {
            if !signature.contains(blade) {
                return Err(BladeOrderError::OutOfRange { blade, ndim });
            }
            if std::mem::replace(&mut seen[blade.index()], true) {
                return Err(BladeOrderError::Duplicate(blade));
            }
        }
        Ok(Self::from_permutation_unchecked(ndim, blades))
    }

    fn from_permutation_unchecked(ndim: u8, blades: Vec<Blade>) -> Self {
        let mut positions = vec![0; blades.len()];
        for (i, blade) in blades.iter().enumerate() {
            positions[blade.index()] = i;
        }
        Self {
            ndim,
            blades: blades.into_boxed_slice(),
            positions: positions.into_boxed_slice(),
        }
    }

    /// Returns the number of basis vectors.
    pub fn ndim(&self) -> u8 {
        self.ndim
    }
    /// Returns the number of blades.
    pub fn blade_count(&self) -> usize {
        self.blades.len()
    }
    /// Returns the blade at `position`, or `None` if it is out of range.
    pub fn blade_at(&self, position: usize) -> Option<Blade> {
        self.blades.get(position).copied()
    }
    /// Returns the position of `blade`, or `None` if it is not in the algebra.
    pub fn position_of(&self, blade: Blade) -> Option<usize> {
        self.positions.get(blade.index()).copied()
    }
    /// Returns every blade in order.
    pub fn as_slice(&self) -> &[Blade] {
        &self.blades
    }
    /// Returns an iterator over every blade in order.
    pub fn iter(&self) -> impl '_ + ExactSizeIterator<Item = Blade> + Clone {
        self.blades.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blade_display() {
        assert_eq!(Blade::SCALAR.to_string(), "1");
        assert_eq!(Blade::basis(0).to_string(), "e₁");
        assert_eq!(Blade::from_bits(0b101).to_string(), "e₁₃");
        assert_eq!(Blade::pseudoscalar(4).to_string(), "e₁₂₃₄");
        assert_eq!(
            Blade::from_basis_vectors([1, 9, 11]).to_string(),
            "e₂,₁₀,₁₂",
        );
        assert_eq!(format!("{:?}", Blade::basis(2)), "Blade(e₃)");
    }

    #[test]
    fn test_blade_properties() {
        let e12 = Blade::from_basis_vectors([0, 1]);
        let e123 = Blade::pseudoscalar(3);
        assert_eq!(e12.bits(), 0b011);
        assert_eq!(e12.grade(), 2);
        assert_eq!(e123.grade(), 3);
        assert!(e123.contains(e12));
        assert!(!e12.contains(e123));
        assert!(e12.is_disjoint(Blade::basis(2)));
        assert_eq!(e12.complement(3), Blade::basis(2));
        assert_eq!(Blade::SCALAR.complement(3), e123);
        assert_eq!(e123.basis_vectors().collect_vec(), vec![0, 1, 2]);
        assert_eq!(Blade::pseudoscalar(64).bits(), u64::MAX);
        assert_eq!(Blade::pseudoscalar(0), Blade::SCALAR);
    }

    #[test]
    fn test_blade_signs() {
        let signs = |f: fn(Blade) -> Sign| {
            (0..=5)
                .map(|grade| f(Blade::pseudoscalar(grade)).to_i8())
                .collect_vec()
        };
        assert_eq!(signs(Blade::sign_of_reverse), [1, 1, -1, -1, 1, 1]);
        assert_eq!(signs(Blade::sign_of_grade_involution), [1, -1, 1, -1, 1, -1]);
        assert_eq!(signs(Blade::sign_of_conjugate), [1, -1, -1, 1, 1, -1]);
    }

    #[test]
    fn test_natural_order() {
        let order = BladeOrder::natural(Signature::VGA3D).unwrap();
        let names = order.iter().map(|b| b.to_string()).collect_vec();
        assert_eq!(names, ["1", "e₁", "e₂", "e₃", "e₁₂", "e₁₃", "e₂₃", "e₁₂₃"]);
        for (i, blade) in order.iter().enumerate() {
            assert_eq!(order.position_of(blade), Some(i));
            assert_eq!(order.blade_at(i), Some(blade));
        }
        assert_eq!(order.blade_at(8), None);
        assert_eq!(order.position_of(Blade::basis(3)), None);

        let order = BladeOrder::natural(Signature::REAL).unwrap();
        assert_eq!(order.as_slice(), [Blade::SCALAR]);

        let order = BladeOrder::natural(Signature::PGA3D).unwrap();
        let grades = order.iter().map(Blade::grade).collect_vec();
        assert_eq!(grades, [0, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 4]);

        assert!(BladeOrder::natural(Signature::new_const(11, 0, 0)).is_err());
    }

    #[test]
    fn test_custom_order() {
        let sig = Signature::VGA2D;
        let blades = [0b11, 0b00, 0b10, 0b01].map(Blade::from_bits);
        let order = BladeOrder::from_blades(sig, blades).unwrap();
        assert_eq!(order.position_of(Blade::SCALAR), Some(1));

        assert_eq!(
            BladeOrder::from_blades(sig, blades[..3].iter().copied()),
            Err(BladeOrderError::WrongLength {
                expected: 4,
                got: 3
            }),
        );
        let duplicated = [0b11, 0b00, 0b10, 0b10].map(Blade::from_bits);
        assert_eq!(
            BladeOrder::from_blades(sig, duplicated),
            Err(BladeOrderError::Duplicate(Blade::from_bits(0b10))),
        );
        let outside = [0b11, 0b00, 0b10, 0b100].map(Blade::from_bits);
        assert_eq!(
            BladeOrder::from_blades(sig, outside),
            Err(BladeOrderError::OutOfRange {
                blade: Blade::from_bits(0b100),
                ndim: 2
            }),
        );
    }
}
