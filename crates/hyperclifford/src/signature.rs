//! Quadratic-form signatures.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseSignatureError, SignatureError};
use crate::{BitSet, Blade, StructureConstant};

/// Bitmask wide enough for any supported signature.
pub type BasisMask = BitSet<{ Signature::MAX_NDIM as u32 }>;

/// Numbers of basis vectors that square to `+1`, `-1`, and `0`.
///
/// Basis vectors are numbered with the positive ones first, then the negative
/// ones, then the null ones. Bit `i` of a [`Blade`] refers to basis vector `i`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Signature {
    positive: u8,
    negative: u8,
    zero: u8,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cl({},{},{})", self.positive, self.negative, self.zero)
    }
}

impl Signature {
    /// Maximum total number of basis vectors, bounded by the width of a blade
    /// bitmask.
    pub const MAX_NDIM: u8 = 64;

    /// Real numbers.
    pub const REAL: Self = Self::new_const(0, 0, 0);
    /// Split-complex (hyperbolic) numbers.
    pub const SPLIT_COMPLEX: Self = Self::new_const(1, 0, 0);
    /// Complex numbers.
    pub const COMPLEX: Self = Self::new_const(0, 1, 0);
    /// Dual numbers.
    pub const DUAL_NUMBERS: Self = Self::new_const(0, 0, 1);
    /// Quaternions, as the algebra generated by two anticommuting imaginary
    /// units.
    pub const QUATERNIONS: Self = Self::new_const(0, 2, 0);
    /// 2D vanilla (Euclidean) geometric algebra.
    pub const VGA2D: Self = Self::vga_const(2);
    /// 3D vanilla (Euclidean) geometric algebra.
    pub const VGA3D: Self = Self::vga_const(3);
    /// 2D projective geometric algebra.
    pub const PGA2D: Self = Self::pga_const(2);
    /// 3D projective geometric algebra.
    pub const PGA3D: Self = Self::pga_const(3);
    /// 2D conformal geometric algebra.
    pub const CGA2D: Self = Self::cga_const(2);
    /// 3D conformal geometric algebra.
    pub const CGA3D: Self = Self::cga_const(3);
    /// Spacetime algebra, with the timelike vector squaring to `+1`.
    pub const STA: Self = Self::new_const(1, 3, 0);

    /// Named signatures accepted when parsing a [`Signature`], along with their
    /// canonical names.
    pub const NAMED: &'static [(&'static str, Signature)] = &[
        ("real", Self::REAL),
        ("split-complex", Self::SPLIT_COMPLEX),
        ("complex", Self::COMPLEX),
        ("dual", Self::DUAL_NUMBERS),
        ("quaternion", Self::QUATERNIONS),
        ("vga2d", Self::VGA2D),
        ("vga3d", Self::VGA3D),
        ("pga2d", Self::PGA2D),
        ("pga3d", Self::PGA3D),
        ("cga2d", Self::CGA2D),
        ("cga3d", Self::CGA3D),
        ("sta", Self::STA),
    ];

    /// Constructs a signature with `positive`, `negative`, and `zero` basis
    /// vectors.
    pub const fn new(positive: u8, negative: u8, zero: u8) -> Result<Self, SignatureError> {
        let ndim = positive as u16 + negative as u16 + zero as u16;
        if ndim > Self::MAX_NDIM as u16 {
            return Err(SignatureError::TooManyBasisVectors {
                ndim,
                max: Self::MAX_NDIM,
            });
        }
        Ok(Self {
            positive,
            negative,
            zero,
        })
    }
    /// Constructs a signature, panicking if it is invalid. In a `const` item
    /// this turns an invalid signature into a compile error.
    ///
    /// # Panics
    ///
    /// Panics if there are more than [`Signature::MAX_NDIM`] basis vectors.
    pub const fn new_const(positive: u8, negative: u8, zero: u8) -> Self {
        match Self::new(positive, negative, zero) {
            Ok(signature) => signature,
            Err(_) => panic!("too many basis vectors in signature"),
        }
    }

    /// Constructs the signature of the `ndim`-dimensional vanilla geometric
    /// algebra.
    pub const fn vga(ndim: u8) -> Result<Self, SignatureError> {
        Self::new(ndim, 0, 0)
    }
    /// Constructs the signature of the `ndim`-dimensional projective geometric
    /// algebra, which has one extra null basis vector.
    pub const fn pga(ndim: u8) -> Result<Self, SignatureError> {
        Self::new(ndim, 0, 1)
    }
    /// Constructs the signature of the `ndim`-dimensional conformal geometric
    /// algebra, which has an extra positive and an extra negative basis vector.
    pub const fn cga(ndim: u8) -> Result<Self, SignatureError> {
        match ndim.checked_add(1) {
            Some(positive) => Self::new(positive, 1, 0),
            None => Err(SignatureError::TooManyBasisVectors {
                ndim: ndim as u16 + 2,
                max: Self::MAX_NDIM,
            }),
        }
    }
    const fn vga_const(ndim: u8) -> Self {
        Self::new_const(ndim, 0, 0)
    }
    const fn pga_const(ndim: u8) -> Self {
        Self::new_const(ndim, 0, 1)
    }
    const fn cga_const(ndim: u8) -> Self {
        Self::new_const(ndim + 1, 1, 0)
    }

    /// Returns the number of basis vectors that square to `+1`.
    pub const fn positive(self) -> u8 {
        self.positive
    }
    /// Returns the number of basis vectors that square to `-1`.
    pub const fn negative(self) -> u8 {
        self.negative
    }
    /// Returns the number of basis vectors that square to `0`.
    pub const fn zero(self) -> u8 {
        self.zero
    }
    /// Returns the total number of basis vectors.
    pub const fn ndim(self) -> u8 {
        self.positive + self.negative + self.zero
    }
    /// Returns whether any basis vector squares to zero.
    pub const fn is_degenerate(self) -> bool {
        self.zero > 0
    }

    /// Returns the number of basis blades, or `None` if it does not fit in a
    /// `u64`.
    pub const fn blade_count(self) -> Option<u64> {
        1_u64.checked_shl(self.ndim() as u32)
    }
    /// Returns the blade containing every basis vector.
    pub const fn pseudoscalar(self) -> Blade {
        Blade::pseudoscalar(self.ndim())
    }
    /// Returns whether `blade` only uses basis vectors from this signature.
    pub const fn contains(self, blade: Blade) -> bool {
        blade.bits() & !self.pseudoscalar().bits() == 0
    }

    /// Returns the mask of basis vectors that square to `+1`.
    pub const fn positive_mask(self) -> BasisMask {
        BasisMask::create_mask(self.positive as u32, 0)
    }
    /// Returns the mask of basis vectors that square to `-1`.
    pub const fn negative_mask(self) -> BasisMask {
        BasisMask::create_mask(self.negative as u32, self.positive as u32)
    }
    /// Returns the mask of basis vectors that square to `0`.
    pub const fn zero_mask(self) -> BasisMask {
        BasisMask::create_mask(
            self.zero as u32,
            self.positive as u32 + self.negative as u32,
        )
    }

    /// Returns the square of basis vector `i`, or `None` if there is no such
    /// basis vector.
    pub const fn square_of(self, i: u8) -> Option<StructureConstant> {
        if i < self.positive {
            Some(StructureConstant::Pos)
        } else if i < self.positive + self.negative {
            Some(StructureConstant::Neg)
        } else if i < self.ndim() {
            Some(StructureConstant::Zero)
        } else {
            None
        }
    }
}

impl FromStr for Signature {
    type Err = ParseSignatureError;

    /// Parses a signature written as `Cl(p,n,z)`, `Cl(p,n)`, `p,n,z`, `p,n`,
    /// or one of the names in [`Signature::NAMED`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseSignatureError::Empty);
        }

        let counts = s
            .get(..3)
            .filter(|prefix| prefix.eq_ignore_ascii_case("cl("))
            .and_then(|_| s[3..].strip_suffix(')'))
            .unwrap_or(s)
            .trim();

        if counts.starts_with(|c: char| c.is_ascii_digit()) {
            let counts: Vec<u8> = counts
                .split(',')
                .map(|n| n.trim().parse())
                .collect::<Result<_, _>>()?;
            return match counts[..] {
                [p, n] => Ok(Self::new(p, n, 0)?),
                [p, n, z] => Ok(Self::new(p, n, z)?),
                _ => Err(ParseSignatureError::WrongArity(counts.len())),
            };
        }

        let normalized: String = s
            .chars()
            .filter(|&c| c != '-' && c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::NAMED
            .iter()
            .find(|(name, _)| name.replace('-', "") == normalized)
            .map(|&(_, signature)| signature)
            .ok_or_else(|| ParseSignatureError::UnknownName(s.to_owned()))
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.to_string()
    }
}
impl TryFrom<String> for Signature {
    type Error = ParseSignatureError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_limits() {
        assert!(Signature::new(64, 0, 0).is_ok());
        assert!(Signature::new(30, 30, 4).is_ok());
        assert_eq!(
            Signature::new(40, 20, 5),
            Err(SignatureError::TooManyBasisVectors { ndim: 65, max: 64 }),
        );
        assert_eq!(
            Signature::new(255, 255, 255),
            Err(SignatureError::TooManyBasisVectors { ndim: 765, max: 64 }),
        );
        assert!(Signature::cga(62).is_ok());
        assert!(Signature::cga(63).is_err());
        assert!(Signature::cga(255).is_err());

        assert_eq!(Signature::new_const(64, 0, 0).blade_count(), None);
        assert_eq!(Signature::new_const(63, 0, 0).blade_count(), Some(1 << 63));
        assert_eq!(Signature::REAL.blade_count(), Some(1));
    }

    #[test]
    fn test_signature_masks() {
        let sig = Signature::new_const(2, 3, 1);
        assert_eq!(sig.ndim(), 6);
        assert_eq!(sig.positive_mask().bits(), 0b000_011);
        assert_eq!(sig.negative_mask().bits(), 0b011_100);
        assert_eq!(sig.zero_mask().bits(), 0b100_000);
        assert_eq!(sig.pseudoscalar().bits(), 0b111_111);

        assert_eq!(sig.square_of(1), Some(StructureConstant::Pos));
        assert_eq!(sig.square_of(2), Some(StructureConstant::Neg));
        assert_eq!(sig.square_of(5), Some(StructureConstant::Zero));
        assert_eq!(sig.square_of(6), None);

        let wide = Signature::new_const(0, 0, 64);
        assert_eq!(wide.zero_mask().bits(), u64::MAX);
        assert!(wide.positive_mask().is_zero());
        assert!(wide.contains(Blade::from_bits(u64::MAX)));
        assert!(!Signature::VGA3D.contains(Blade::from_bits(0b1000)));
    }

    #[test]
    fn test_parse_signature() {
        for (s, expected) in [
            ("Cl(3,0,1)", Signature::PGA3D),
            ("cl( 4, 1 )", Signature::CGA3D),
            ("CL(2,0,1)", Signature::PGA2D),
            ("3,0,0", Signature::VGA3D),
            ("0,1", Signature::COMPLEX),
            ("PGA2D", Signature::PGA2D),
            ("split_complex", Signature::SPLIT_COMPLEX),
            ("Split-Complex", Signature::SPLIT_COMPLEX),
            ("dual", Signature::DUAL_NUMBERS),
            ("  sta ", Signature::STA),
        ] {
            assert_eq!(s.parse::<Signature>(), Ok(expected), "parsing {s:?}");
        }

        assert_eq!("".parse::<Signature>(), Err(ParseSignatureError::Empty));
        assert_eq!(
            "1,2,3,4".parse::<Signature>(),
            Err(ParseSignatureError::WrongArity(4)),
        );
        assert_eq!(
            "octonion".parse::<Signature>(),
            Err(ParseSignatureError::UnknownName("octonion".to_owned())),
        );
        assert!(matches!(
            "3,x,1".parse::<Signature>(),
            Err(ParseSignatureError::InvalidCount(_)),
        ));
        assert!(matches!(
            "60,5,0".parse::<Signature>(),
            Err(ParseSignatureError::Invalid(_)),
        ));
    }

    #[test]
    fn test_signature_display_roundtrip() {
        for &(_, signature) in Signature::NAMED {
            assert_eq!(signature.to_string().parse::<Signature>(), Ok(signature));
        }
        assert_eq!(Signature::PGA3D.to_string(), "Cl(3,0,1)");
    }
}
