//! Sign corrections for the Poincaré dual.

use itertools::Itertools;

use crate::{Blade, BladeOrder, CayleyTable, Sign, StructureConstant};

/// Signs applied by the Poincaré dual and its inverse.
///
/// The dual maps each basis blade `e_c` to `s(c) e_c̄`, where `c̄` is the
/// complement of `c` and `s(c)` is chosen so that `e_c ∧ s(c) e_c̄` is the
/// pseudoscalar. Every sign is read off the Cayley table, so it always agrees
/// with the products.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DualSigns {
    ndim: u8,
    /// `s(c)`, indexed by bitmask.
    complement_signs: Box<[Sign]>,
    /// Dual signs in natural order.
    natural: Box<[Sign]>,
}

impl DualSigns {
    /// Derives the dual signs from a Cayley table.
    ///
    /// `order` determines the order of [`DualSigns::natural_signs()`].
    ///
    /// # Panics
    ///
    /// Panics if `order` has a different number of basis vectors than the
    /// table.
    #[track_caller]
    pub fn new(table: &CayleyTable, order: &BladeOrder) -> Self {
        let ndim = table.signature().ndim();
        assert_eq!(
            order.ndim(),
            ndim,
            "blade order does not match table of {}",
            table.signature(),
        );
        let complement_signs = (0..table.blade_count() as u64)
            .map(|bits| {
                let blade = Blade::from_bits(bits);
                // Disjoint blades never share a null basis vector, so this is
                // never zero.
                let entry = table.entry(blade, blade.complement(ndim));
                Sign::from_negative(entry.structure_constant == StructureConstant::Neg)
            })
            .collect_vec()
            .into_boxed_slice();

        let mut ret = Self {
            ndim,
            complement_signs,
            natural: Box::new([]),
        };
        ret.natural = order.iter().map(|blade| ret.dual_sign(blade)).collect();
        ret
    }

    /// Returns `s(blade)`, the sign of the dual of `blade`.
    ///
    /// # Panics
    ///
    /// Panics if `blade` is not in the algebra.
    #[track_caller]
    pub fn complement_sign(&self, blade: Blade) -> Sign {
        self.complement_signs[blade.index()]
    }
    /// Returns the sign applied to the coefficient of `blade` in the output of
    /// the dual, whose input is the coefficient of the complement of `blade`.
    #[track_caller]
    pub fn dual_sign(&self, blade: Blade) -> Sign {
        self.complement_sign(blade.complement(self.ndim))
    }
    /// Returns the sign applied to the coefficient of `blade` in the output of
    /// the inverse of the dual.
    #[track_caller]
    pub fn undual_sign(&self, blade: Blade) -> Sign {
        self.complement_sign(blade)
    }
    /// Returns the dual sign for each blade in natural order.
    pub fn natural_signs(&self) -> &[Sign] {
        &self.natural
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Signature;

    fn natural_signs(signature: Signature) -> Vec<i8> {
        let table = CayleyTable::new(signature).unwrap();
        let order = BladeOrder::natural(signature).unwrap();
        let signs = DualSigns::new(&table, &order);
        signs.natural_signs().iter().map(|s| s.to_i8()).collect()
    }

    #[test]
    fn test_natural_dual_signs() {
        assert_eq!(natural_signs(Signature::REAL), [1]);
        assert_eq!(natural_signs(Signature::VGA2D), [1, -1, 1, 1]);
        assert_eq!(natural_signs(Signature::VGA3D), [1, 1, -1, 1, 1, -1, 1, 1]);
        // The dual does not depend on how basis vectors square.
        assert_eq!(natural_signs(Signature::PGA2D), natural_signs(Signature::VGA3D));
        assert_eq!(natural_signs(Signature::COMPLEX), natural_signs(Signature::SPLIT_COMPLEX));
    }

    #[test]
    fn test_dual_complements() {
        for signature in [Signature::VGA3D, Signature::PGA3D, Signature::CGA2D] {
            let table = CayleyTable::new(signature).unwrap();
            let order = BladeOrder::natural(signature).unwrap();
            let signs = DualSigns::new(&table, &order);
            let ndim = signature.ndim();
            let pseudoscalar = signature.pseudoscalar();
            for blade in order.iter() {
                let complement = blade.complement(ndim);
                // e_c ∧ s(c) e_c̄ = I
                let entry = table.entry(blade, complement);
                assert_eq!(entry.result_blade, pseudoscalar);
                assert_eq!(
                    entry.structure_constant * signs.complement_sign(blade),
                    StructureConstant::Pos,
                );
                assert_eq!(signs.dual_sign(complement), signs.complement_sign(blade));
                assert_eq!(signs.undual_sign(blade), signs.complement_sign(blade));
                // Swapping the order of the wedge gives (-1)^(g(n-g)).
                let swaps = blade.grade() as u32 * complement.grade() as u32;
                assert_eq!(
                    signs.complement_sign(blade) * signs.complement_sign(complement),
                    Sign::from_negative(swaps % 2 == 1),
                );
            }
        }
    }

    #[test]
    #[should_panic = "blade order does not match table of Cl(3,0,0)"]
    fn test_mismatched_blade_order() {
        let table = CayleyTable::new(Signature::VGA3D).unwrap();
        let order = BladeOrder::natural(Signature::VGA2D).unwrap();
        DualSigns::new(&table, &order);
    }
}
