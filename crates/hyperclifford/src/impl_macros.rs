/// Implements `T op T`, `&T op T`, and `T op &T` for a generic type in terms
/// of `&T op &T`.
macro_rules! impl_forward_bin_ops_to_ref {
    () => {};

    (
        impl<$generic:ident: $bound:path> $trait:ident for $type:ty { fn $func:ident() }
        $($remainder:tt)*
    ) => {
        impl<$generic: $bound> $trait<$type> for $type {
            type Output = $type;

            fn $func(self, rhs: $type) -> $type {
                $trait::$func(&self, &rhs)
            }
        }
        impl<'a, $generic: $bound> $trait<$type> for &'a $type {
            type Output = $type;

            fn $func(self, rhs: $type) -> $type {
                $trait::$func(self, &rhs)
            }
        }
        impl<'a, $generic: $bound> $trait<&'a $type> for $type {
            type Output = $type;

            fn $func(self, rhs: &'a $type) -> $type {
                $trait::$func(&self, rhs)
            }
        }
        impl_forward_bin_ops_to_ref! { $($remainder)* }
    };
}

/// Implements `T op= T` and `T op= &T` for a generic type in terms of
/// `&T op &T`.
macro_rules! impl_forward_assign_ops_to_ref {
    () => {};

    (
        impl<$generic:ident: $bound:path> $trait:ident for $type:ty { fn $func:ident() { $op:tt } }
        $($remainder:tt)*
    ) => {
        impl<$generic: $bound> $trait<$type> for $type {
            fn $func(&mut self, rhs: $type) {
                *self = &*self $op &rhs;
            }
        }
        impl<'a, $generic: $bound> $trait<&'a $type> for $type {
            fn $func(&mut self, rhs: &'a $type) {
                *self = &*self $op rhs;
            }
        }
        impl_forward_assign_ops_to_ref! { $($remainder)* }
    };
}

/// Implements arithmetic between multivectors and a concrete scalar type, in
/// both operand orders where it makes sense.
macro_rules! impl_scalar_ops {
    ($($scalar:ty),* $(,)?) => {
        $(
            impl Mul<$scalar> for &Multivector<$scalar> {
                type Output = Multivector<$scalar>;

                fn mul(self, rhs: $scalar) -> Self::Output {
                    self.scale(rhs)
                }
            }
            impl Mul<$scalar> for Multivector<$scalar> {
                type Output = Multivector<$scalar>;

                fn mul(self, rhs: $scalar) -> Self::Output {
                    self.scale(rhs)
                }
            }
            impl Mul<&Multivector<$scalar>> for $scalar {
                type Output = Multivector<$scalar>;

                fn mul(self, rhs: &Multivector<$scalar>) -> Self::Output {
                    rhs.scale(self)
                }
            }
            impl Mul<Multivector<$scalar>> for $scalar {
                type Output = Multivector<$scalar>;

                fn mul(self, rhs: Multivector<$scalar>) -> Self::Output {
                    rhs.scale(self)
                }
            }
            impl Div<$scalar> for &Multivector<$scalar> {
                type Output = Multivector<$scalar>;

                fn div(self, rhs: $scalar) -> Self::Output {
                    self.map(|x| x / rhs)
                }
            }
            impl Div<$scalar> for Multivector<$scalar> {
                type Output = Multivector<$scalar>;

                fn div(self, rhs: $scalar) -> Self::Output {
                    self.map(|x| x / rhs)
                }
            }
            impl Add<$scalar> for &Multivector<$scalar> {
                type Output = Multivector<$scalar>;

                fn add(self, rhs: $scalar) -> Self::Output {
                    self.add_scalar(rhs)
                }
            }
            impl Add<$scalar> for Multivector<$scalar> {
                type Output = Multivector<$scalar>;

                fn add(self, rhs: $scalar) -> Self::Output {
                    self.add_scalar(rhs)
                }
            }
            impl Sub<$scalar> for &Multivector<$scalar> {
                type Output = Multivector<$scalar>;

                fn sub(self, rhs: $scalar) -> Self::Output {
                    self.add_scalar(-rhs)
                }
            }
            impl Sub<$scalar> for Multivector<$scalar> {
                type Output = Multivector<$scalar>;

                fn sub(self, rhs: $scalar) -> Self::Output {
                    self.add_scalar(-rhs)
                }
            }
            impl Add<Multivector<$scalar>> for $scalar {
                type Output = Multivector<$scalar>;

                fn add(self, rhs: Multivector<$scalar>) -> Self::Output {
                    rhs.add_scalar(self)
                }
            }
            impl Sub<Multivector<$scalar>> for $scalar {
                type Output = Multivector<$scalar>;

                fn sub(self, rhs: Multivector<$scalar>) -> Self::Output {
                    (-rhs).add_scalar(self)
                }
            }
            impl MulAssign<$scalar> for Multivector<$scalar> {
                fn mul_assign(&mut self, rhs: $scalar) {
                    *self = self.scale(rhs);
                }
            }
            impl DivAssign<$scalar> for Multivector<$scalar> {
                fn div_assign(&mut self, rhs: $scalar) {
                    *self = self.map(|x| x / rhs);
                }
            }
        )*
    };
}
