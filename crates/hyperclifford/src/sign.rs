//! Signs and structure constants.

use std::fmt;
use std::ops::{Mul, MulAssign, Neg};

use num_traits::{Num, Signed};

/// Positive or negative.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative
    Neg = -1,
    /// Positive
    #[default]
    Pos = 1,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Pos => write!(f, "+"),
            Sign::Neg => write!(f, "-"),
        }
    }
}

impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.flip()
    }
}

impl Mul for Sign {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match rhs {
            Sign::Pos => self,
            Sign::Neg => -self,
        }
    }
}
impl MulAssign for Sign {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Sign {
    /// Returns the opposite sign.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }
    /// Returns `Sign::Neg` if `negative` is true and `Sign::Pos` otherwise.
    pub const fn from_negative(negative: bool) -> Self {
        if negative { Sign::Neg } else { Sign::Pos }
    }
    /// Returns `+1` or `-1`.
    pub const fn to_i8(self) -> i8 {
        self as i8
    }
    /// Returns `+1` or `-1` as any signed number.
    pub fn to_num<T: Signed>(self) -> T {
        match self {
            Sign::Pos => T::one(),
            Sign::Neg => -T::one(),
        }
    }
    /// Returns `x` or `-x`.
    pub fn apply<T: Neg<Output = T>>(self, x: T) -> T {
        match self {
            Sign::Pos => x,
            Sign::Neg => -x,
        }
    }
}

/// Scalar accompanying the product of two basis blades: `-1`, `0`, or `+1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum StructureConstant {
    /// The product is negated.
    Neg = -1,
    /// The product is annihilated by a null basis vector.
    Zero = 0,
    /// The product is unchanged.
    Pos = 1,
}

impl fmt::Display for StructureConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i8())
    }
}

impl From<Sign> for StructureConstant {
    fn from(sign: Sign) -> Self {
        Self::from_sign(sign)
    }
}

impl TryFrom<i8> for StructureConstant {
    type Error = i8;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Neg),
            0 => Ok(Self::Zero),
            1 => Ok(Self::Pos),
            other => Err(other),
        }
    }
}

impl Neg for StructureConstant {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Neg => Self::Pos,
            Self::Zero => Self::Zero,
            Self::Pos => Self::Neg,
        }
    }
}

impl Mul for StructureConstant {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Zero, _) | (_, Self::Zero) => Self::Zero,
            (Self::Pos, other) | (other, Self::Pos) => other,
            (Self::Neg, Self::Neg) => Self::Pos,
        }
    }
}
impl Mul<Sign> for StructureConstant {
    type Output = Self;

    fn mul(self, rhs: Sign) -> Self::Output {
        self * Self::from(rhs)
    }
}
impl MulAssign for StructureConstant {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
impl MulAssign<Sign> for StructureConstant {
    fn mul_assign(&mut self, rhs: Sign) {
        *self = *self * rhs;
    }
}

impl StructureConstant {
    /// Returns the structure constant equal to `sign`.
    pub const fn from_sign(sign: Sign) -> Self {
        match sign {
            Sign::Pos => Self::Pos,
            Sign::Neg => Self::Neg,
        }
    }
    /// Returns the sign, or `None` if the constant is zero.
    pub const fn sign(self) -> Option<Sign> {
        match self {
            Self::Neg => Some(Sign::Neg),
            Self::Zero => None,
            Self::Pos => Some(Sign::Pos),
        }
    }
    /// Returns whether the constant is zero.
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Zero)
    }
    /// Returns `-1`, `0`, or `+1`.
    pub const fn to_i8(self) -> i8 {
        self as i8
    }
    /// Returns `x`, `-x`, or zero.
    pub fn apply<T: Num + Neg<Output = T>>(self, x: T) -> T {
        match self {
            Self::Neg => -x,
            Self::Zero => T::zero(),
            Self::Pos => x,
        }
    }
}
