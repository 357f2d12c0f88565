//! Structure constants of basis blade products.

use crate::signature::BasisMask;
use crate::{Blade, Signature, StructureConstant, TableEntry};

/// Calculator for the product of two basis blades in a fixed signature.
///
/// Every method is a `const fn`, so whole tables can be computed during
/// constant evaluation (see [`crate::const_table()`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StructureConstants {
    signature: Signature,
    positive_bases: BasisMask,
    negative_bases: BasisMask,
    zero_bases: BasisMask,
}

impl StructureConstants {
    /// Constructs the calculator for a signature.
    pub const fn new(signature: Signature) -> Self {
        Self {
            signature,
            positive_bases: signature.positive_mask(),
            negative_bases: signature.negative_mask(),
            zero_bases: signature.zero_mask(),
        }
    }

    /// Returns the signature.
    pub const fn signature(&self) -> Signature {
        self.signature
    }
    /// Returns the mask of basis vectors that square to `+1`.
    pub const fn positive_bases(&self) -> BasisMask {
        self.positive_bases
    }
    /// Returns the mask of basis vectors that square to `-1`.
    pub const fn negative_bases(&self) -> BasisMask {
        self.negative_bases
    }
    /// Returns the mask of basis vectors that square to `0`.
    pub const fn zero_bases(&self) -> BasisMask {
        self.zero_bases
    }

    /// Returns the blade produced by multiplying `lhs` by `rhs`.
    ///
    /// Shared basis vectors square away and the rest remain, so this is always
    /// the symmetric difference of the two bitmasks.
    pub const fn compute_result_component(&self, lhs: Blade, rhs: Blade) -> Blade {
        Blade::from_bits(lhs.bits() ^ rhs.bits())
    }

    /// Returns the scalar accompanying the product of `lhs` and `rhs`.
    ///
    /// Both blades must only use basis vectors from the signature.
    pub const fn compute_structure_constant(&self, lhs: Blade, rhs: Blade) -> StructureConstant {
        debug_assert!(
            self.signature.contains(lhs) && self.signature.contains(rhs),
            "blade is not in the signature",
        );

        let lhs = lhs.to_mask();
        let rhs = rhs.to_mask();

        let shared = lhs.intersection(rhs);
        if !shared.intersection(self.zero_bases).is_zero() {
            return StructureConstant::Zero;
        }

        // Each shared negative basis vector contributes a factor of -1.
        let mut negative = shared.intersection(self.negative_bases).count() % 2 == 1;

        // Count the transpositions needed to move every basis vector of `rhs`
        // past the basis vectors of `lhs` with a higher index.
        let mut k = self.signature.ndim() as u32;
        while k > 1 {
            k -= 1;
            if matches!(lhs.test(k), Ok(true)) {
                let below = rhs.intersection(BasisMask::create_mask(k, 0)).count();
                if below % 2 == 1 {
                    negative = !negative;
                }
            }
        }

        if negative {
            StructureConstant::Neg
        } else {
            StructureConstant::Pos
        }
    }

    /// Returns the table entry for the product of `lhs` and `rhs`.
    pub const fn calculate_entry(&self, lhs: Blade, rhs: Blade) -> TableEntry {
        TableEntry {
            result_blade: self.compute_result_component(lhs, rhs),
            structure_constant: self.compute_structure_constant(lhs, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(signature: Signature, lhs: u64, rhs: u64) -> i8 {
        StructureConstants::new(signature)
            .compute_structure_constant(Blade::from_bits(lhs), Blade::from_bits(rhs))
            .to_i8()
    }

    #[test]
    fn test_closed_forms() {
        assert_eq!(constant(Signature::SPLIT_COMPLEX, 1, 1), 1);
        assert_eq!(constant(Signature::COMPLEX, 1, 1), -1);
        assert_eq!(constant(Signature::DUAL_NUMBERS, 1, 1), 0);
        assert_eq!(constant(Signature::REAL, 0, 0), 1);
    }

    #[test]
    fn test_vga3d() {
        let sig = Signature::VGA3D;
        assert_eq!(constant(sig, 0b111, 0b111), -1);
        assert_eq!(constant(sig, 0b011, 0b001), -1);
        assert_eq!(constant(sig, 0b001, 0b001), 1);
        assert_eq!(constant(sig, 0b001, 0b010), 1);
        assert_eq!(constant(sig, 0b010, 0b001), -1);
        assert_eq!(constant(sig, 0b001, 0b011), 1);
        // e₁₃ e₂ = -e₁₂₃
        assert_eq!(constant(sig, 0b101, 0b010), -1);
        // e₂ e₁₃ = -e₁₂₃
        assert_eq!(constant(sig, 0b010, 0b101), -1);
    }

    #[test]
    fn test_mixed_signature() {
        // e₁ squares to +1, e₂ to -1, e₃ to 0
        let sig = Signature::new_const(1, 1, 1);
        assert_eq!(constant(sig, 0b010, 0b010), -1);
        assert_eq!(constant(sig, 0b100, 0b100), 0);
        assert_eq!(constant(sig, 0b110, 0b010), 1);
        assert_eq!(constant(sig, 0b011, 0b011), 1);
        assert_eq!(constant(sig, 0b101, 0b001), -1);
        assert_eq!(constant(sig, 0b101, 0b100), 0);
        assert_eq!(constant(sig, 0b101, 0b010), -1);

        let calc = StructureConstants::new(sig);
        assert_eq!(calc.positive_bases().bits(), 0b001);
        assert_eq!(calc.negative_bases().bits(), 0b010);
        assert_eq!(calc.zero_bases().bits(), 0b100);
    }

    #[test]
    fn test_calculate_entry() {
        let calc = StructureConstants::new(Signature::VGA3D);
        let entry = calc.calculate_entry(Blade::from_bits(0b111), Blade::from_bits(0b111));
        assert_eq!(entry.result_blade, Blade::SCALAR);
        assert_eq!(entry.structure_constant, StructureConstant::Neg);

        let entry = calc.calculate_entry(Blade::from_bits(0b011), Blade::from_bits(0b110));
        assert_eq!(entry.result_blade, Blade::from_bits(0b101));
        assert_eq!(entry.structure_constant, StructureConstant::Pos);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic = "blade is not in the signature"]
    fn test_blade_outside_signature() {
        let calc = StructureConstants::new(Signature::VGA2D);
        calc.calculate_entry(Blade::from_bits(0b001), Blade::from_bits(0b100));
    }
}
