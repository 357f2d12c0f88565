//! Multivectors in an arbitrary algebra.

use std::fmt;
use std::ops::{
    Add, AddAssign, BitAnd, BitOr, BitXor, BitXorAssign, Div, DivAssign, Index, IndexMut, Mul,
    MulAssign, Neg, Not, Shl, Shr, Sub, SubAssign,
};
use std::sync::Arc;

use approx::AbsDiffEq;
use itertools::Itertools;
use num_traits::Num;

use crate::error::AlgebraError;
use crate::{Algebra, Blade, Float, ProductKind, Sign, Signature};

/// Number type usable as a multivector coefficient.
///
/// Integer types work for everything except norms and inverses, which makes
/// them handy for exact tests.
pub trait Scalar: Copy + fmt::Debug + Num + Neg<Output = Self> {}
impl<T: Copy + fmt::Debug + Num + Neg<Output = T>> Scalar for T {}

/// Linear combination of every basis blade in an algebra.
///
/// Coefficients are stored densely and indexed by blade bitmask. All
/// operations between two multivectors require them to have the same
/// signature; the operators panic otherwise, and the `try_` methods return an
/// error.
#[derive(Clone)]
pub struct Multivector<T = Float> {
    algebra: Arc<Algebra>,
    coefficients: Box<[T]>,
}

impl<T: Scalar> PartialEq for Multivector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.signature() == other.signature() && self.coefficients == other.coefficients
    }
}

impl<T: Scalar> fmt::Debug for Multivector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ret = f.debug_struct("Multivector");
        ret.field("signature", &self.signature());
        for (blade, coef) in self.nonzero_terms() {
            ret.field(&blade.to_string(), &coef);
        }
        ret.finish()
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for Multivector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = self
            .algebra
            .natural_order()
            .iter()
            .map(|blade| (blade, self.coefficients[blade.index()]))
            .filter(|(_, coef)| !coef.is_zero());

        let write_term = |f: &mut fmt::Formatter<'_>, (blade, coef): (Blade, T)| -> fmt::Result {
            fmt::Display::fmt(&coef, f)?;
            if !blade.is_scalar() {
                write!(f, "{blade}")?;
            }
            Ok(())
        };

        match terms.next() {
            Some(term) => {
                write_term(f, term)?;
                for term in terms {
                    write!(f, " + ")?;
                    write_term(f, term)?;
                }
                Ok(())
            }
            None => fmt::Display::fmt(&T::zero(), f),
        }
    }
}

impl<T: Scalar + AbsDiffEq> AbsDiffEq for Multivector<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.signature() == other.signature()
            && std::iter::zip(&*self.coefficients, &*other.coefficients)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Scalar> Index<Blade> for Multivector<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, blade: Blade) -> &Self::Output {
        let signature = self.signature();
        match self.coefficients.get(blade.index()) {
            Some(coef) => coef,
            None => panic!("blade {blade} does not exist in {signature}"),
        }
    }
}
impl<T: Scalar> IndexMut<Blade> for Multivector<T> {
    #[track_caller]
    fn index_mut(&mut self, blade: Blade) -> &mut Self::Output {
        let signature = self.signature();
        match self.coefficients.get_mut(blade.index()) {
            Some(coef) => coef,
            None => panic!("blade {blade} does not exist in {signature}"),
        }
    }
}

impl<T: Scalar> Multivector<T> {
    /// Returns the zero multivector.
    pub fn zero(algebra: &Arc<Algebra>) -> Self {
        Self {
            algebra: Arc::clone(algebra),
            coefficients: vec![T::zero(); algebra.blade_count()].into_boxed_slice(),
        }
    }
    /// Returns a multivector with only a scalar component.
    pub fn scalar(algebra: &Arc<Algebra>, x: T) -> Self {
        let mut ret = Self::zero(algebra);
        ret.coefficients[0] = x;
        ret
    }
    /// Returns `coef` times a single basis blade.
    pub fn from_blade(algebra: &Arc<Algebra>, blade: Blade, coef: T) -> Result<Self, AlgebraError> {
        let mut ret = Self::zero(algebra);
        *ret.get_mut(blade).ok_or(AlgebraError::BladeOutOfRange {
            blade,
            signature: algebra.signature(),
        })? = coef;
        Ok(ret)
    }
    /// Returns basis vector `i` (zero-indexed), or `None` if it does not exist.
    pub fn basis_vector(algebra: &Arc<Algebra>, i: u8) -> Option<Self> {
        (i < algebra.ndim()).then(|| {
            let mut ret = Self::zero(algebra);
            ret[Blade::basis(i)] = T::one();
            ret
        })
    }
    /// Constructs a multivector from coefficients indexed by blade bitmask.
    pub fn from_coefficients(
        algebra: &Arc<Algebra>,
        coefficients: impl IntoIterator<Item = T>,
    ) -> Result<Self, AlgebraError> {
        let coefficients = coefficients.into_iter().collect_vec();
        let expected = algebra.blade_count();
        if coefficients.len() != expected {
            return Err(AlgebraError::WrongCoefficientCount {
                expected,
                got: coefficients.len(),
            });
        }
        Ok(Self {
            algebra: Arc::clone(algebra),
            coefficients: coefficients.into_boxed_slice(),
        })
    }
    /// Constructs a multivector from coefficients listed in the natural blade
    /// order.
    pub fn from_natural_coefficients(
        algebra: &Arc<Algebra>,
        coefficients: impl IntoIterator<Item = T>,
    ) -> Result<Self, AlgebraError> {
        let natural = Self::from_coefficients(algebra, coefficients)?;
        let mut ret = Self::zero(algebra);
        for (blade, &coef) in algebra.natural_order().iter().zip(&*natural.coefficients) {
            ret[blade] = coef;
        }
        Ok(ret)
    }

    /// Returns the algebra.
    pub fn algebra(&self) -> &Arc<Algebra> {
        &self.algebra
    }
    /// Returns the signature of the algebra.
    pub fn signature(&self) -> Signature {
        self.algebra.signature()
    }

    /// Returns the coefficient of `blade`, or `None` if it is not in the
    /// algebra.
    pub fn get(&self, blade: Blade) -> Option<T> {
        self.coefficients.get(blade.index()).copied()
    }
    /// Returns a mutable reference to the coefficient of `blade`, or `None` if
    /// it is not in the algebra.
    pub fn get_mut(&mut self, blade: Blade) -> Option<&mut T> {
        self.coefficients.get_mut(blade.index())
    }
    /// Returns the coefficients indexed by blade bitmask.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }
    /// Returns the coefficients in the natural blade order.
    pub fn natural_coefficients(&self) -> Vec<T> {
        self.algebra
            .natural_order()
            .iter()
            .map(|blade| self.coefficients[blade.index()])
            .collect()
    }
    /// Returns every blade along with its coefficient, in bitmask order.
    pub fn terms(&self) -> impl '_ + Iterator<Item = (Blade, T)> {
        self.coefficients
            .iter()
            .enumerate()
            .map(|(i, &coef)| (Blade::from_bits(i as u64), coef))
    }
    /// Returns every blade with a nonzero coefficient along with its
    /// coefficient, in bitmask order.
    pub fn nonzero_terms(&self) -> impl '_ + Iterator<Item = (Blade, T)> {
        self.terms().filter(|(_, coef)| !coef.is_zero())
    }
    /// Returns whether every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|coef| coef.is_zero())
    }

    /// Returns the grade-`grade` part.
    #[must_use]
    pub fn grade_part(&self, grade: u8) -> Self {
        self.map_terms(|blade, coef| if blade.grade() == grade { coef } else { T::zero() })
    }
    /// Returns the scalar coefficient.
    pub fn scalar_part(&self) -> T {
        self.coefficients[0]
    }

    /// Applies `f` to every coefficient.
    #[must_use]
    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        self.map_terms(|_, coef| f(coef))
    }
    fn map_terms(&self, f: impl Fn(Blade, T) -> T) -> Self {
        Self {
            algebra: Arc::clone(&self.algebra),
            coefficients: self.terms().map(|(blade, coef)| f(blade, coef)).collect(),
        }
    }
    fn map_signs(&self, sign: impl Fn(Blade) -> Sign) -> Self {
        self.map_terms(|blade, coef| sign(blade).apply(coef))
    }
    /// Multiplies every coefficient by `x`.
    #[must_use]
    pub fn scale(&self, x: T) -> Self {
        self.map(|coef| coef * x)
    }
    /// Adds `x` to the scalar coefficient.
    #[must_use]
    pub fn add_scalar(&self, x: T) -> Self {
        let mut ret = self.clone();
        ret.coefficients[0] = ret.coefficients[0] + x;
        ret
    }

    /// Returns the reverse, which reverses the order of basis vectors in every
    /// blade.
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.map_signs(Blade::sign_of_reverse)
    }
    /// Returns the grade involution, which negates every basis vector.
    #[must_use]
    pub fn grade_involution(&self) -> Self {
        self.map_signs(Blade::sign_of_grade_involution)
    }
    /// Returns the Clifford conjugate.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        self.map_signs(Blade::sign_of_conjugate)
    }
    /// Returns the Poincaré dual.
    #[must_use]
    pub fn dual(&self) -> Self {
        let ndim = self.algebra.ndim();
        let signs = self.algebra.dual_signs();
        self.map_terms(|blade, _| {
            signs
                .dual_sign(blade)
                .apply(self.coefficients[blade.complement(ndim).index()])
        })
    }
    /// Returns the inverse of [`Multivector::dual()`].
    #[must_use]
    pub fn undual(&self) -> Self {
        let ndim = self.algebra.ndim();
        let signs = self.algebra.dual_signs();
        self.map_terms(|blade, _| {
            signs
                .undual_sign(blade)
                .apply(self.coefficients[blade.complement(ndim).index()])
        })
    }

    fn check_same_algebra(&self, rhs: &Self) -> Result<(), AlgebraError> {
        if Arc::ptr_eq(&self.algebra, &rhs.algebra) || self.signature() == rhs.signature() {
            Ok(())
        } else {
            Err(AlgebraError::MismatchedAlgebra {
                lhs: self.signature(),
                rhs: rhs.signature(),
            })
        }
    }
    fn try_zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self, AlgebraError> {
        self.check_same_algebra(rhs)?;
        Ok(Self {
            algebra: Arc::clone(&self.algebra),
            coefficients: std::iter::zip(&*self.coefficients, &*rhs.coefficients)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
    /// Returns the sum of two multivectors.
    pub fn try_add(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.try_zip_with(rhs, |a, b| a + b)
    }
    /// Returns the difference of two multivectors.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.try_zip_with(rhs, |a, b| a - b)
    }

    /// Returns a product of two multivectors.
    pub fn try_product(&self, kind: ProductKind, rhs: &Self) -> Result<Self, AlgebraError> {
        self.check_same_algebra(rhs)?;
        let mut ret = Self::zero(&self.algebra);
        for (lhs_blade, lhs_coef) in self.nonzero_terms() {
            for (rhs_blade, rhs_coef) in rhs.nonzero_terms() {
                let entry = self.algebra.product_entry(kind, lhs_blade, rhs_blade);
                if entry.is_zero() {
                    continue;
                }
                let out = &mut ret.coefficients[entry.result_blade.index()];
                *out = *out + entry.structure_constant.apply(lhs_coef * rhs_coef);
            }
        }
        Ok(ret)
    }
    /// Returns a product of two multivectors.
    ///
    /// # Panics
    ///
    /// Panics if the multivectors have different signatures.
    #[track_caller]
    pub fn product(&self, kind: ProductKind, rhs: &Self) -> Self {
        unwrap_same_algebra(self.try_product(kind, rhs))
    }

    /// Returns the scalar part of `self * reverse(self)`.
    pub fn norm_squared(&self) -> T {
        let table = self.algebra.table();
        self.nonzero_terms()
            .map(|(blade, coef)| {
                let constant = table.entry(blade, blade).structure_constant;
                (constant * blade.sign_of_reverse()).apply(coef * coef)
            })
            .fold(T::zero(), |a, b| a + b)
    }
    /// Returns `self * x * reverse(self)`.
    ///
    /// # Panics
    ///
    /// Panics if the multivectors have different signatures.
    #[track_caller]
    #[must_use]
    pub fn sandwich(&self, x: &Self) -> Self {
        &(self * x) * &self.reverse()
    }
}

impl<T: Scalar + num_traits::Float> Multivector<T> {
    /// Returns the square root of the absolute value of
    /// [`Multivector::norm_squared()`].
    pub fn norm(&self) -> T {
        self.norm_squared().abs().sqrt()
    }
    /// Returns the inverse of a versor, or `None` if `self * reverse(self)` is
    /// not a nonzero scalar.
    pub fn try_inverse(&self) -> Option<Self> {
        let reverse = self.reverse();
        let n = self * &reverse;
        let s = n.scalar_part();
        let tolerance = T::epsilon().sqrt();
        if s.abs() <= tolerance
            || n.coefficients[1..]
                .iter()
                .any(|coef| coef.abs() > tolerance * s.abs())
        {
            return None;
        }
        Some(reverse.map(|coef| coef / s))
    }
}

#[track_caller]
fn unwrap_same_algebra<T>(result: Result<T, AlgebraError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}

impl<T: Scalar> Neg for &Multivector<T> {
    type Output = Multivector<T>;

    fn neg(self) -> Self::Output {
        self.map(|coef| -coef)
    }
}
impl<T: Scalar> Neg for Multivector<T> {
    type Output = Multivector<T>;

    fn neg(self) -> Self::Output {
        -&self
    }
}

/// Poincaré dual.
impl<T: Scalar> Not for &Multivector<T> {
    type Output = Multivector<T>;

    fn not(self) -> Self::Output {
        self.dual()
    }
}
impl<T: Scalar> Not for Multivector<T> {
    type Output = Multivector<T>;

    fn not(self) -> Self::Output {
        self.dual()
    }
}

impl<T: Scalar> Add for &Multivector<T> {
    type Output = Multivector<T>;

    #[track_caller]
    fn add(self, rhs: Self) -> Self::Output {
        unwrap_same_algebra(self.try_add(rhs))
    }
}
impl<T: Scalar> Sub for &Multivector<T> {
    type Output = Multivector<T>;

    #[track_caller]
    fn sub(self, rhs: Self) -> Self::Output {
        unwrap_same_algebra(self.try_sub(rhs))
    }
}

macro_rules! impl_product_op {
    ($($trait:ident::$func:ident => $kind:ident),* $(,)?) => {
        $(
            impl<T: Scalar> $trait for &Multivector<T> {
                type Output = Multivector<T>;

                #[track_caller]
                fn $func(self, rhs: Self) -> Self::Output {
                    self.product(ProductKind::$kind, rhs)
                }
            }
        )*
    };
}
impl_product_op!(
    Mul::mul => Geometric,
    BitXor::bitxor => Outer,
    BitOr::bitor => Inner,
    BitAnd::bitand => Regressive,
    Shl::shl => LeftContraction,
    Shr::shr => RightContraction,
);

impl_forward_bin_ops_to_ref! {
    impl<T: Scalar> Add for Multivector<T> { fn add() }
    impl<T: Scalar> Sub for Multivector<T> { fn sub() }
    impl<T: Scalar> Mul for Multivector<T> { fn mul() }
    impl<T: Scalar> BitXor for Multivector<T> { fn bitxor() }
    impl<T: Scalar> BitOr for Multivector<T> { fn bitor() }
    impl<T: Scalar> BitAnd for Multivector<T> { fn bitand() }
    impl<T: Scalar> Shl for Multivector<T> { fn shl() }
    impl<T: Scalar> Shr for Multivector<T> { fn shr() }
}
impl_forward_assign_ops_to_ref! {
    impl<T: Scalar> AddAssign for Multivector<T> { fn add_assign() { + } }
    impl<T: Scalar> SubAssign for Multivector<T> { fn sub_assign() { - } }
    impl<T: Scalar> MulAssign for Multivector<T> { fn mul_assign() { * } }
    impl<T: Scalar> BitXorAssign for Multivector<T> { fn bitxor_assign() { ^ } }
}

impl_scalar_ops!(f32, f64);
