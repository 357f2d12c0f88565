//! Fixed-width bit vector backed by a single `u64`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
    ShrAssign,
};

use crate::error::BitIndexOutOfRange;

/// Number of bits in the underlying storage.
pub const STORAGE_BITS: u32 = u64::BITS;

/// Set of up to `N` bits, where `N <= 64`.
///
/// Only the low `N` bits are meaningful. Every operation keeps the bits above
/// `N` clear, so equality, hashing, and population count only ever see the
/// logical width.
#[derive(Default, Copy, Clone, Eq)]
pub struct BitSet<const N: u32> {
    bits: u64,
}

impl<const N: u32> BitSet<N> {
    /// Logical width of the set.
    pub const WIDTH: u32 = N;
    /// Mask of the low `N` bits.
    pub const MASK: u64 = if N >= STORAGE_BITS {
        u64::MAX
    } else {
        (1 << N) - 1
    };

    /// Constructs an empty set.
    pub const fn new() -> Self {
        const { assert!(N <= STORAGE_BITS, "bit set is wider than its storage") };
        Self { bits: 0 }
    }
    /// Constructs a set containing every bit in `[0, N)`.
    pub const fn full() -> Self {
        Self::from_bits(u64::MAX)
    }
    /// Constructs a set from raw bits, discarding bits at or above `N`.
    pub const fn from_bits(bits: u64) -> Self {
        const { assert!(N <= STORAGE_BITS, "bit set is wider than its storage") };
        Self {
            bits: bits & Self::MASK,
        }
    }
    /// Constructs a set with `width` contiguous one-bits starting at bit
    /// `left_shift`.
    ///
    /// Bits that would land at or above `N` are dropped, so an oversized
    /// `width` saturates to every bit from `left_shift` upward.
    pub const fn create_mask(width: u32, left_shift: u32) -> Self {
        let ones = if width >= STORAGE_BITS {
            u64::MAX
        } else {
            (1 << width) - 1
        };
        Self::from_bits(ones).shifted_left(left_shift)
    }

    /// Returns the masked value as an integer.
    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Returns whether `bit` is set.
    pub const fn test(self, bit: u32) -> Result<bool, BitIndexOutOfRange> {
        if bit >= N {
            return Err(BitIndexOutOfRange { bit, width: N });
        }
        Ok((self.bits >> bit) & 1 != 0)
    }
    /// Sets `bit`.
    pub const fn set(&mut self, bit: u32) -> Result<(), BitIndexOutOfRange> {
        if bit >= N {
            return Err(BitIndexOutOfRange { bit, width: N });
        }
        self.bits |= 1 << bit;
        Ok(())
    }
    /// Clears `bit`.
    pub const fn reset(&mut self, bit: u32) -> Result<(), BitIndexOutOfRange> {
        if bit >= N {
            return Err(BitIndexOutOfRange { bit, width: N });
        }
        self.bits &= !(1 << bit);
        Ok(())
    }

    /// Returns the number of set bits.
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }
    /// Returns whether no bit is set.
    pub const fn is_zero(self) -> bool {
        self.bits == 0
    }

    /// Flips every bit in `[0, N)`.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self::from_bits(!self.bits)
    }
    /// Returns the bits set in either operand.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::from_bits(self.bits | other.bits)
    }
    /// Returns the bits set in both operands.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self::from_bits(self.bits & other.bits)
    }
    /// Returns the bits set in exactly one operand.
    #[must_use]
    pub const fn symmetric_difference(self, other: Self) -> Self {
        Self::from_bits(self.bits ^ other.bits)
    }
    /// Shifts every bit toward the high end, dropping bits shifted past `N`.
    #[must_use]
    pub const fn shifted_left(self, amount: u32) -> Self {
        if amount >= STORAGE_BITS {
            Self::from_bits(0)
        } else {
            Self::from_bits(self.bits << amount)
        }
    }
    /// Shifts every bit toward the low end.
    #[must_use]
    pub const fn shifted_right(self, amount: u32) -> Self {
        if amount >= STORAGE_BITS {
            Self::from_bits(0)
        } else {
            Self::from_bits(self.bits >> amount)
        }
    }

    /// Returns an iterator over the indices of set bits, from lowest to
    /// highest.
    pub fn iter_ones(self) -> impl Iterator<Item = u32> + Clone {
        let mut remaining = self.bits;
        std::iter::from_fn(move || {
            (remaining != 0).then(|| {
                let i = remaining.trailing_zeros();
                remaining &= remaining - 1;
                i
            })
        })
    }
}

impl<const N: u32> PartialEq for BitSet<N> {
    fn eq(&self, other: &Self) -> bool {
        self.bits & Self::MASK == other.bits & Self::MASK
    }
}
impl<const N: u32> Hash for BitSet<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.bits & Self::MASK).hash(state);
    }
}

impl<const N: u32> fmt::Debug for BitSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSet<{N}>({self})")
    }
}
impl<const N: u32> fmt::Display for BitSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if N == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.bits, width = N as usize)
    }
}
impl<const N: u32> fmt::Binary for BitSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.bits, f)
    }
}

impl<const N: u32> From<u64> for BitSet<N> {
    fn from(bits: u64) -> Self {
        Self::from_bits(bits)
    }
}
impl<const N: u32> From<BitSet<N>> for u64 {
    fn from(set: BitSet<N>) -> Self {
        set.bits()
    }
}

impl<const N: u32> Not for BitSet<N> {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.complement()
    }
}

macro_rules! impl_bitset_bin_op {
    ($trait:ident::$func:ident, $assign_trait:ident::$assign_func:ident => $method:ident) => {
        impl<const N: u32> $trait for BitSet<N> {
            type Output = Self;

            fn $func(self, rhs: Self) -> Self::Output {
                self.$method(rhs)
            }
        }
        impl<const N: u32> $assign_trait for BitSet<N> {
            fn $assign_func(&mut self, rhs: Self) {
                *self = self.$method(rhs);
            }
        }
    };
}
impl_bitset_bin_op!(BitOr::bitor, BitOrAssign::bitor_assign => union);
impl_bitset_bin_op!(BitAnd::bitand, BitAndAssign::bitand_assign => intersection);
impl_bitset_bin_op!(BitXor::bitxor, BitXorAssign::bitxor_assign => symmetric_difference);

impl<const N: u32> Shl<u32> for BitSet<N> {
    type Output = Self;

    fn shl(self, rhs: u32) -> Self::Output {
        self.shifted_left(rhs)
    }
}
impl<const N: u32> ShlAssign<u32> for BitSet<N> {
    fn shl_assign(&mut self, rhs: u32) {
        *self = self.shifted_left(rhs);
    }
}
impl<const N: u32> Shr<u32> for BitSet<N> {
    type Output = Self;

    fn shr(self, rhs: u32) -> Self::Output {
        self.shifted_right(rhs)
    }
}
impl<const N: u32> ShrAssign<u32> for BitSet<N> {
    fn shr_assign(&mut self, rhs: u32) {
        *self = self.shifted_right(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mask() {
        assert_eq!(BitSet::<8>::create_mask(3, 0).bits(), 0b0000_0111);
        assert_eq!(BitSet::<8>::create_mask(3, 2).bits(), 0b0001_1100);
        assert_eq!(BitSet::<8>::create_mask(0, 5).bits(), 0);

        // Saturates at the logical width.
        assert_eq!(BitSet::<8>::create_mask(6, 4).bits(), 0b1111_0000);
        assert_eq!(BitSet::<8>::create_mask(100, 3).bits(), 0b1111_1000);
        assert_eq!(BitSet::<8>::create_mask(2, 8).bits(), 0);
        assert_eq!(BitSet::<64>::create_mask(64, 0).bits(), u64::MAX);
        assert_eq!(BitSet::<64>::create_mask(70, 60).bits(), 0xF << 60);
        assert_eq!(BitSet::<64>::create_mask(1, 64).bits(), 0);
    }

    #[test]
    fn test_bit_access() {
        let mut set = BitSet::<5>::new();
        set.set(0).unwrap();
        set.set(4).unwrap();
        assert_eq!(set.test(0), Ok(true));
        assert_eq!(set.test(1), Ok(false));
        assert_eq!(set.test(4), Ok(true));
        assert_eq!(set.count(), 2);

        set.reset(0).unwrap();
        assert_eq!(set.test(0), Ok(false));
        assert_eq!(set.bits(), 0b10000);

        // Access beyond the logical width fails even though storage has room.
        let err = BitIndexOutOfRange { bit: 5, width: 5 };
        assert_eq!(set.test(5), Err(err));
        assert_eq!(set.set(5), Err(err));
        assert_eq!(set.reset(5), Err(err));
        assert_eq!(set.test(64), Err(BitIndexOutOfRange { bit: 64, width: 5 }));
        assert_eq!(set.bits(), 0b10000);

        let mut wide = BitSet::<64>::new();
        wide.set(63).unwrap();
        assert_eq!(wide.test(63), Ok(true));
        assert!(wide.set(64).is_err());
    }

    #[test]
    fn test_masked_semantics() {
        let set = BitSet::<4>::from_bits(0xFF);
        assert_eq!(set.bits(), 0xF);
        assert_eq!(set.count(), 4);
        assert_eq!(set, BitSet::<4>::from_bits(0x0F));
        assert_eq!(set, BitSet::<4>::full());

        assert!(BitSet::<4>::from_bits(0xF0).is_zero());
        assert_eq!((!BitSet::<4>::from_bits(0b0101)).bits(), 0b1010);

        // Left shift drops bits past the width, so a right shift cannot bring
        // them back.
        let shifted = BitSet::<4>::from_bits(0b1100) << 2;
        assert_eq!(shifted.bits(), 0);
        assert_eq!((shifted >> 2).bits(), 0);
        assert_eq!((BitSet::<4>::from_bits(0b1100) >> 2).bits(), 0b0011);
        assert_eq!((BitSet::<4>::from_bits(0b1100) >> 64).bits(), 0);
        assert_eq!((BitSet::<4>::from_bits(0b1100) << 64).bits(), 0);
    }

    #[test]
    fn test_bitwise_ops() {
        let a = BitSet::<6>::from_bits(0b110_010);
        let b = BitSet::<6>::from_bits(0b011_011);
        assert_eq!((a | b).bits(), 0b111_011);
        assert_eq!((a & b).bits(), 0b010_010);
        assert_eq!((a ^ b).bits(), 0b101_001);

        let mut c = a;
        c ^= b;
        c |= BitSet::from_bits(0b000_100);
        c &= BitSet::from_bits(0b111_110);
        assert_eq!(c.bits(), 0b101_100);
        c <<= 1;
        assert_eq!(c.bits(), 0b011_000);
        c >>= 3;
        assert_eq!(c.bits(), 0b000_011);
    }

    #[test]
    fn test_zero_width() {
        let set = BitSet::<0>::full();
        assert!(set.is_zero());
        assert_eq!(set.count(), 0);
        assert!(set.test(0).is_err());
        assert_eq!(set.to_string(), "");
    }

    #[test]
    fn test_iter_ones_and_display() {
        let set = BitSet::<8>::from_bits(0b1010_0110);
        assert_eq!(set.iter_ones().collect::<Vec<_>>(), vec![1, 2, 5, 7]);
        assert_eq!(set.to_string(), "10100110");
        assert_eq!(BitSet::<3>::from_bits(1).to_string(), "001");
    }
}
