//! Cayley tables.

use std::fmt;
use std::ops::{Index, Neg};

use itertools::Itertools;

use crate::error::TableError;
use crate::{Blade, BladeOrder, Signature, StructureConstant, StructureConstants};

/// Maximum number of basis vectors for which a dense [`CayleyTable`] is built.
///
/// The table has `4^n` entries, so this is already over a million.
pub const MAX_TABLE_NDIM: u8 = 10;

/// Returns the number of blades in a dense table for `signature`.
pub(crate) fn dense_blade_count(signature: Signature) -> Result<usize, TableError> {
    if signature.ndim() > MAX_TABLE_NDIM {
        return Err(TableError::TooLarge {
            signature,
            max_ndim: MAX_TABLE_NDIM,
        });
    }
    Ok(1 << signature.ndim())
}

/// Product of two basis blades.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TableEntry {
    /// Blade produced by the product.
    pub result_blade: Blade,
    /// Scalar multiplying `result_blade`.
    pub structure_constant: StructureConstant,
}

impl fmt::Display for TableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.structure_constant {
            StructureConstant::Zero => write!(f, "0"),
            StructureConstant::Pos => write!(f, "{}", self.result_blade),
            StructureConstant::Neg => write!(f, "-{}", self.result_blade),
        }
    }
}

impl TableEntry {
    /// Product that is zero.
    pub const ZERO: Self = Self::zero(Blade::SCALAR);

    /// Returns an entry for a product that vanishes but would otherwise have
    /// produced `result_blade`.
    pub const fn zero(result_blade: Blade) -> Self {
        Self {
            result_blade,
            structure_constant: StructureConstant::Zero,
        }
    }
    /// Returns whether the product vanishes.
    pub const fn is_zero(self) -> bool {
        self.structure_constant.is_zero()
    }
}

impl Neg for TableEntry {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            result_blade: self.result_blade,
            structure_constant: -self.structure_constant,
        }
    }
}

/// Computes the full Cayley table for `signature` during constant evaluation.
///
/// Rows are indexed by the left blade and columns by the right blade, both by
/// bitmask.
///
/// ```
/// # use hyperclifford::*;
/// const VGA3D: [[TableEntry; 8]; 8] = const_table(Signature::VGA3D);
/// assert_eq!(VGA3D[7][7].structure_constant, StructureConstant::Neg);
/// ```
///
/// # Panics
///
/// Panics (or fails to compile, in a `const` context) if `BLADES` is not
/// `2^n` where `n` is the number of basis vectors in `signature`.
pub const fn const_table<const BLADES: usize>(
    signature: Signature,
) -> [[TableEntry; BLADES]; BLADES] {
    let ndim = signature.ndim() as u32;
    assert!(
        ndim < usize::BITS && BLADES == 1 << ndim,
        "table size does not match signature",
    );

    let constants = StructureConstants::new(signature);
    let mut table = [[TableEntry::ZERO; BLADES]; BLADES];
    let mut lhs = 0;
    while lhs < BLADES {
        let mut rhs = 0;
        while rhs < BLADES {
            table[lhs][rhs] =
                constants.calculate_entry(Blade::from_bits(lhs as u64), Blade::from_bits(rhs as u64));
            rhs += 1;
        }
        lhs += 1;
    }
    table
}

/// Dense table of every basis blade product in an algebra.
#[derive(Clone, PartialEq, Eq)]
pub struct CayleyTable {
    signature: Signature,
    blade_count: usize,
    /// Row-major entries indexed by `(lhs, rhs)` bitmask.
    entries: Box<[TableEntry]>,
}

impl fmt::Debug for CayleyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CayleyTable")
            .field("signature", &self.signature)
            .field("blade_count", &self.blade_count)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CayleyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blades = (0..self.blade_count as u64).map(Blade::from_bits).collect_vec();
        self.write_grid(f, &blades)
    }
}

impl Index<(Blade, Blade)> for CayleyTable {
    type Output = TableEntry;

    #[track_caller]
    fn index(&self, (lhs, rhs): (Blade, Blade)) -> &Self::Output {
        match self.entry_index(lhs, rhs) {
            Some(i) => &self.entries[i],
            None => self.out_of_range(lhs, rhs),
        }
    }
}

impl CayleyTable {
    /// Builds the table for `signature`.
    pub fn new(signature: Signature) -> Result<Self, TableError> {
        let blade_count = dense_blade_count(signature)?;
        let constants = StructureConstants::new(signature);
        let entries = itertools::iproduct!(0..blade_count as u64, 0..blade_count as u64)
            .map(|(lhs, rhs)| {
                constants.calculate_entry(Blade::from_bits(lhs), Blade::from_bits(rhs))
            })
            .collect();
        Ok(Self {
            signature,
            blade_count,
            entries,
        })
    }

    /// Returns the signature.
    pub fn signature(&self) -> Signature {
        self.signature
    }
    /// Returns the number of blades, which is the number of rows and the number
    /// of columns.
    pub fn blade_count(&self) -> usize {
        self.blade_count
    }

    fn entry_index(&self, lhs: Blade, rhs: Blade) -> Option<usize> {
        let (lhs, rhs) = (lhs.index(), rhs.index());
        (lhs < self.blade_count && rhs < self.blade_count).then(|| lhs * self.blade_count + rhs)
    }
    #[track_caller]
    fn out_of_range(&self, lhs: Blade, rhs: Blade) -> ! {
        panic!(
            "blade pair ({lhs}, {rhs}) out of range for {}",
            self.signature,
        )
    }

    /// Returns the product of `lhs` and `rhs`.
    ///
    /// # Panics
    ///
    /// Panics if either blade is not in the algebra.
    #[track_caller]
    pub fn entry(&self, lhs: Blade, rhs: Blade) -> TableEntry {
        self[(lhs, rhs)]
    }
    /// Returns the product of `lhs` and `rhs`, or `None` if either blade is not
    /// in the algebra.
    pub fn get(&self, lhs: Blade, rhs: Blade) -> Option<TableEntry> {
        Some(self.entries[self.entry_index(lhs, rhs)?])
    }
    /// Returns the products of `lhs` with every blade, in bitmask order.
    pub fn row(&self, lhs: Blade) -> Option<&[TableEntry]> {
        let start = self.entry_index(lhs, Blade::SCALAR)?;
        Some(&self.entries[start..start + self.blade_count])
    }
    /// Returns every entry along with its operands, in row-major bitmask order.
    pub fn iter(&self) -> impl '_ + Iterator<Item = (Blade, Blade, TableEntry)> {
        let n = self.blade_count as u64;
        itertools::iproduct!(0..n, 0..n)
            .zip(self.entries.iter())
            .map(|((lhs, rhs), &entry)| (Blade::from_bits(lhs), Blade::from_bits(rhs), entry))
    }

    /// Returns a value that displays the table with rows and columns in the
    /// given order.
    pub fn display_ordered<'a>(&'a self, order: &'a BladeOrder) -> impl 'a + fmt::Display {
        OrderedTable { table: self, order }
    }

    fn write_grid(&self, f: &mut fmt::Formatter<'_>, blades: &[Blade]) -> fmt::Result {
        let cells = blades
            .iter()
            .map(|&lhs| blades.iter().map(|&rhs| self.entry(lhs, rhs).to_string()).collect_vec())
            .collect_vec();
        let headers = blades.iter().map(|b| b.to_string()).collect_vec();
        let width = cells
            .iter()
            .flatten()
            .chain(&headers)
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);

        write!(f, "{:>width$} |", "")?;
        for header in &headers {
            write!(f, " {header:>width$}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}-+{}", "-".repeat(width), "-".repeat((width + 1) * blades.len()))?;
        for (header, row) in std::iter::zip(&headers, &cells) {
            write!(f, "{header:>width$} |")?;
            for cell in row {
                write!(f, " {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct OrderedTable<'a> {
    table: &'a CayleyTable,
    order: &'a BladeOrder,
}
impl fmt::Display for OrderedTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.table.write_grid(f, self.order.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_vga3d_table() {
        let table = CayleyTable::new(Signature::VGA3D).unwrap();
        assert_eq!(table.blade_count(), 8);

        let e123 = Blade::pseudoscalar(3);
        let entry = table.entry(e123, e123);
        assert_eq!(entry.result_blade, Blade::SCALAR);
        assert_eq!(entry.structure_constant, StructureConstant::Neg);

        for (lhs, rhs, entry) in table.iter() {
            assert_eq!(entry.result_blade, lhs ^ rhs);
            assert!(!entry.is_zero());
        }

        assert_eq!(table.get(Blade::from_bits(8), Blade::SCALAR), None);
        assert_eq!(table.row(Blade::from_bits(8)), None);
        let row = table.row(Blade::basis(0)).unwrap();
        assert_eq!(row.len(), 8);
        assert_eq!(row[2], table[(Blade::basis(0), Blade::basis(1))]);
    }

    #[test]
    #[should_panic = "out of range"]
    fn test_entry_out_of_range() {
        let table = CayleyTable::new(Signature::COMPLEX).unwrap();
        table.entry(Blade::basis(1), Blade::SCALAR);
    }

    #[test]
    fn test_table_size_limit() {
        assert!(CayleyTable::new(Signature::vga(MAX_TABLE_NDIM).unwrap()).is_ok());
        let too_big = Signature::new_const(6, 4, 1);
        assert_eq!(
            CayleyTable::new(too_big),
            Err(TableError::TooLarge {
                signature: too_big,
                max_ndim: MAX_TABLE_NDIM
            }),
        );
    }

    #[test]
    fn test_const_table_matches_runtime_table() {
        const PGA2D: [[TableEntry; 8]; 8] = const_table(Signature::PGA2D);
        const STA: [[TableEntry; 16]; 16] = const_table(Signature::STA);
        const REAL: [[TableEntry; 1]; 1] = const_table(Signature::REAL);

        fn check<const N: usize>(signature: Signature, expected: &[[TableEntry; N]; N]) {
            let table = CayleyTable::new(signature).unwrap();
            for (lhs, rhs, entry) in table.iter() {
                assert_eq!(entry, expected[lhs.index()][rhs.index()]);
            }
        }
        check(Signature::PGA2D, &PGA2D);
        check(Signature::STA, &STA);
        check(Signature::REAL, &REAL);
        assert_eq!(REAL[0][0].structure_constant, StructureConstant::Pos);
    }

    #[test]
    #[should_panic = "table size does not match signature"]
    fn test_const_table_wrong_size() {
        const_table::<4>(Signature::VGA3D);
    }

    #[test]
    fn test_display() {
        let table = CayleyTable::new(Signature::COMPLEX).unwrap();
        let expected = "   |  1 e₁\n\
                        ---+------\n\
                        \x201 |  1 e₁\n\
                        e₁ | e₁ -1\n";
        assert_eq!(table.to_string(), expected);
    }
}
