//! Algebras and product selection.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::Mutex;

use crate::error::TableError;
use crate::{Blade, BladeOrder, CayleyTable, DualSigns, Signature, StructureConstants, TableEntry};

lazy_static! {
    static ref ALGEBRA_CACHE: Mutex<HashMap<Signature, Arc<Algebra>>> = Mutex::new(HashMap::new());
}

/// Bilinear product of multivectors, expressed as a filter on the geometric
/// product of basis blades.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProductKind {
    /// Geometric product `a * b`
    Geometric,
    /// Outer (wedge) product `a ^ b`
    Outer,
    /// Symmetric inner product `a | b`, which keeps the grade `|gₐ - gᵦ|`
    /// part of the product of each pair of blades
    Inner,
    /// Left contraction `a << b`
    LeftContraction,
    /// Right contraction `a >> b`
    RightContraction,
    /// Scalar product, which keeps only the grade-0 part
    Scalar,
    /// Regressive (vee) product `a & b`, the dual of the outer product of the
    /// duals
    Regressive,
}

impl ProductKind {
    /// Every kind of product.
    pub const ALL: [Self; 7] = [
        Self::Geometric,
        Self::Outer,
        Self::Inner,
        Self::LeftContraction,
        Self::RightContraction,
        Self::Scalar,
        Self::Regressive,
    ];
}

/// Everything needed to multiply multivectors of one signature.
pub struct Algebra {
    signature: Signature,
    constants: StructureConstants,
    table: CayleyTable,
    natural_order: BladeOrder,
    dual_signs: DualSigns,
}

impl fmt::Debug for Algebra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Algebra").field(&self.signature).finish()
    }
}

impl Algebra {
    /// Builds the algebra for `signature`.
    pub fn new(signature: Signature) -> Result<Self, TableError> {
        let table = CayleyTable::new(signature)?;
        let natural_order = BladeOrder::natural(signature)?;
        let dual_signs = DualSigns::new(&table, &natural_order);
        Ok(Self {
            signature,
            constants: StructureConstants::new(signature),
            table,
            natural_order,
            dual_signs,
        })
    }

    /// Returns the shared algebra for `signature`, building it if this is the
    /// first time it has been requested.
    pub fn cached(signature: Signature) -> Result<Arc<Self>, TableError> {
        if let Some(algebra) = ALGEBRA_CACHE.lock().get(&signature) {
            log::trace!("using cached algebra for {signature}");
            return Ok(Arc::clone(algebra));
        }

        // Build without holding the lock. If another thread finishes first,
        // keep its algebra and drop this one.
        let algebra = Arc::new(Self::new(signature)?);
        log::debug!(
            "built algebra for {signature} with {} blades",
            algebra.blade_count(),
        );
        let mut cache = ALGEBRA_CACHE.lock();
        Ok(Arc::clone(cache.entry(signature).or_insert(algebra)))
    }

    /// Returns the signature.
    pub fn signature(&self) -> Signature {
        self.signature
    }
    /// Returns the number of basis vectors.
    pub fn ndim(&self) -> u8 {
        self.signature.ndim()
    }
    /// Returns the number of basis blades.
    pub fn blade_count(&self) -> usize {
        self.table.blade_count()
    }
    /// Returns the calculator used to build the table.
    pub fn structure_constants(&self) -> &StructureConstants {
        &self.constants
    }
    /// Returns the Cayley table.
    pub fn table(&self) -> &CayleyTable {
        &self.table
    }
    /// Returns the natural blade ordering.
    pub fn natural_order(&self) -> &BladeOrder {
        &self.natural_order
    }
    /// Returns the dual signs.
    pub fn dual_signs(&self) -> &DualSigns {
        &self.dual_signs
    }
    /// Returns an iterator over every blade, in bitmask order.
    pub fn blades(&self) -> impl Iterator<Item = Blade> + Clone {
        (0..self.blade_count() as u64).map(Blade::from_bits)
    }

    /// Returns the contribution of `lhs` and `rhs` to a product of kind
    /// `kind`.
    ///
    /// The entry is zero when the pair does not contribute.
    ///
    /// # Panics
    ///
    /// Panics if either blade is not in the algebra.
    #[track_caller]
    pub fn product_entry(&self, kind: ProductKind, lhs: Blade, rhs: Blade) -> TableEntry {
        let entry = self.table.entry(lhs, rhs);
        let keep = match kind {
            ProductKind::Geometric => true,
            ProductKind::Outer => lhs.is_disjoint(rhs),
            ProductKind::Inner => entry.result_blade.grade() == lhs.grade().abs_diff(rhs.grade()),
            ProductKind::LeftContraction => rhs.contains(lhs),
            ProductKind::RightContraction => lhs.contains(rhs),
            ProductKind::Scalar => lhs == rhs,
            ProductKind::Regressive => return self.regressive_entry(lhs, rhs),
        };
        if keep {
            entry
        } else {
            TableEntry::zero(entry.result_blade)
        }
    }

    /// Returns `dual(dual(lhs) ∧ dual(rhs))` for basis blades.
    #[track_caller]
    fn regressive_entry(&self, lhs: Blade, rhs: Blade) -> TableEntry {
        let ndim = self.ndim();
        let result_blade = lhs & rhs;
        let (lhs_dual, rhs_dual) = (lhs.complement(ndim), rhs.complement(ndim));
        if !lhs_dual.is_disjoint(rhs_dual) {
            return TableEntry::zero(result_blade);
        }
        let wedge = self.table.entry(lhs_dual, rhs_dual);
        let signs = &self.dual_signs;
        TableEntry {
            result_blade,
            structure_constant: wedge.structure_constant
                * signs.complement_sign(lhs)
                * signs.complement_sign(rhs)
                * signs.complement_sign(wedge.result_blade),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StructureConstant;

    fn blade(bits: u64) -> Blade {
        Blade::from_bits(bits)
    }

    #[test]
    fn test_product_filters() {
        let algebra = Algebra::new(Signature::VGA3D).unwrap();
        let nonzero = |kind, l, r| !algebra.product_entry(kind, blade(l), blade(r)).is_zero();

        assert!(nonzero(ProductKind::Geometric, 0b011, 0b011));
        assert!(nonzero(ProductKind::Outer, 0b001, 0b010));
        assert!(!nonzero(ProductKind::Outer, 0b011, 0b010));

        // e₁ · e₁₂ = e₂ but e₁ · e₂₃ has grade 3
        assert!(nonzero(ProductKind::Inner, 0b001, 0b011));
        assert!(nonzero(ProductKind::Inner, 0b011, 0b001));
        assert!(!nonzero(ProductKind::Inner, 0b001, 0b110));
        assert!(nonzero(ProductKind::Inner, 0b000, 0b110));

        assert!(nonzero(ProductKind::LeftContraction, 0b001, 0b011));
        assert!(!nonzero(ProductKind::LeftContraction, 0b011, 0b001));
        assert!(nonzero(ProductKind::RightContraction, 0b011, 0b001));
        assert!(!nonzero(ProductKind::RightContraction, 0b001, 0b011));

        assert!(nonzero(ProductKind::Scalar, 0b101, 0b101));
        assert!(!nonzero(ProductKind::Scalar, 0b101, 0b100));
    }

    #[test]
    fn test_regressive_entries() {
        let algebra = Algebra::new(Signature::VGA3D).unwrap();
        let regressive = |l, r| algebra.product_entry(ProductKind::Regressive, blade(l), blade(r));

        // I ∨ x = x
        for x in 0..8 {
            let entry = regressive(0b111, x);
            assert_eq!(entry.result_blade, blade(x));
            assert_eq!(entry.structure_constant, StructureConstant::Pos);
        }
        // Two planes meet in a line.
        let entry = regressive(0b011, 0b110);
        assert_eq!(entry.result_blade, blade(0b010));
        assert!(!entry.is_zero());
        // Two lines do not meet in a point unless they span the space.
        assert!(regressive(0b001, 0b010).is_zero());
        // Zero-square basis vectors do not annihilate the regressive product.
        let pga = Algebra::new(Signature::PGA2D).unwrap();
        let entry = pga.product_entry(ProductKind::Regressive, blade(0b101), blade(0b110));
        assert_eq!(entry.result_blade, blade(0b100));
        assert!(!entry.is_zero());
    }

    #[test]
    fn test_cached_algebra() {
        let a = Algebra::cached(Signature::CGA2D).unwrap();
        let b = Algebra::cached(Signature::CGA2D).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.signature(), Signature::CGA2D);
        assert_eq!(a.blade_count(), 16);
        assert!(Algebra::cached(Signature::vga(11).unwrap()).is_err());
    }

    #[test]
    fn test_cached_algebra_concurrent() {
        let signature = Signature::new_const(2, 2, 1);
        let algebras = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| Algebra::cached(signature).unwrap()))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        });
        for algebra in &algebras {
            assert!(Arc::ptr_eq(algebra, &algebras[0]));
            assert_eq!(algebra.blade_count(), 32);
        }
    }
}
