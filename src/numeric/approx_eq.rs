// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::marker::PhantomData;

use num_complex::Complex;
use num_traits::{AsPrimitive, Float};

use super::Promoted;

/// Tolerance-based equality between `Self` and `Rhs`.
///
/// Two reals `a` and `b` are approximately equal when the relative
/// differences `|a - b| / |a|` and `|a - b| / |b|` are both within the
/// tolerance. The divisions saturate instead of overflowing, and `0 / x`
/// is zero. Complex numbers compare their real and imaginary parts
/// independently.
///
/// Implemented between any two reals and between complex numbers. Two
/// integers compare as `f64`, with an `f64` tolerance.
pub trait ApproxEq<Rhs = Self> {
    /// Tolerance type, the promoted real type of the operands
    type Tolerance: Float;

    /// Return `true` if `self` and `rhs` are equal within `tolerance`.
    fn approx_eq(self, rhs: Rhs, tolerance: Self::Tolerance) -> bool;
}

/// Divide without overflow or underflow: saturates at the largest value,
/// and flushes to zero.
#[inline]
fn safe_divide<P: Float>(a: P, b: P) -> P {
    if b < P::one() && a > b * P::max_value() {
        return P::max_value();
    }
    if a == P::zero() || (b > P::one() && a < b * P::min_positive_value()) {
        return P::zero();
    }
    a / b
}

#[inline]
fn approx_eq_real<P: Float>(a: P, b: P, tolerance: P) -> bool {
    let diff = (a - b).abs();
    let da = safe_divide(diff, a.abs());
    let db = safe_divide(diff, b.abs());
    db <= tolerance && da <= tolerance
}

macro_rules! impl_approx_eq_real {
    ($all:tt; $($a:ty),+) => {
        $(
            impl_approx_eq_real!(@row $a; $all);
        )+
    };
    (@row $a:ty; [$($b:ty),+]) => {
        $(
            impl ApproxEq<$b> for $a {
                type Tolerance = Promoted<$a, $b>;

                #[inline]
                fn approx_eq(self, rhs: $b, tolerance: Self::Tolerance) -> bool {
                    approx_eq_real::<Promoted<$a, $b>>(self.as_(), rhs.as_(), tolerance.abs())
                }
            }
        )+
    };
}

impl_approx_eq_real!(
    [i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64];
    f32, f64
);
impl_approx_eq_real!(
    [f32, f64];
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize
);

macro_rules! impl_approx_eq_integer {
    ($all:tt; $($a:ty),+) => {
        $(
            impl_approx_eq_integer!(@row $a; $all);
        )+
    };
    (@row $a:ty; [$($b:ty),+]) => {
        $(
            impl ApproxEq<$b> for $a {
                type Tolerance = f64;

                #[inline]
                fn approx_eq(self, rhs: $b, tolerance: f64) -> bool {
                    approx_eq_real::<f64>(self.as_(), rhs.as_(), tolerance.abs())
                }
            }
        )+
    };
}

impl_approx_eq_integer!(
    [i8, i16, i32, i64, isize, u8, u16, u32, u64, usize];
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize
);

impl<U1, U2> ApproxEq<Complex<U2>> for Complex<U1>
where
    U1: ApproxEq<U2>,
{
    type Tolerance = U1::Tolerance;

    #[inline]
    fn approx_eq(self, rhs: Complex<U2>, tolerance: Self::Tolerance) -> bool {
        self.re.approx_eq(rhs.re, tolerance) && self.im.approx_eq(rhs.im, tolerance)
    }
}

/// Binary predicate for approximate equality with a fixed tolerance.
///
/// The tolerance is stored as its absolute value.
///
/// ```
/// use ndview::numeric::ApproximatelyEqual;
///
/// let eq = ApproximatelyEqual::<f64, i32>::new(1e-3);
/// assert!(eq.call(1000.5, 1000));
/// assert!(!eq.call(1010.0, 1000));
///
/// let eq = ApproximatelyEqual::<f32>::new(-1e-6);
/// assert_eq!(eq.tolerance(), 1e-6);
/// assert!(eq.call(0.0, 0.0));
/// ```
pub struct ApproximatelyEqual<T1, T2 = T1>
where
    T1: ApproxEq<T2>,
{
    tolerance: T1::Tolerance,
    marker: PhantomData<fn(T1, T2)>,
}

impl<T1, T2> ApproximatelyEqual<T1, T2>
where
    T1: ApproxEq<T2>,
{
    /// Create a new predicate; the sign of `tolerance` is ignored.
    pub fn new(tolerance: T1::Tolerance) -> Self {
        ApproximatelyEqual {
            tolerance: tolerance.abs(),
            marker: PhantomData,
        }
    }

    /// The (non-negative) tolerance
    pub fn tolerance(&self) -> T1::Tolerance {
        self.tolerance
    }

    /// Return `true` if `a` and `b` are equal within the tolerance.
    #[inline]
    pub fn call(&self, a: T1, b: T2) -> bool {
        a.approx_eq(b, self.tolerance)
    }
}

impl<T1, T2> Clone for ApproximatelyEqual<T1, T2>
where
    T1: ApproxEq<T2>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T1, T2> Copy for ApproximatelyEqual<T1, T2> where T1: ApproxEq<T2> {}

impl<T1, T2> fmt::Debug for ApproximatelyEqual<T1, T2>
where
    T1: ApproxEq<T2>,
    T1::Tolerance: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApproximatelyEqual")
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_division() {
        assert_eq!(safe_divide(1.0f64, 0.0), f64::MAX);
        assert_eq!(safe_divide(0.0f64, 0.0), 0.0);
        assert_eq!(safe_divide(f64::MIN_POSITIVE, 4.0), 0.0);
        assert_eq!(safe_divide(3.0f32, 2.0), 1.5);
    }

    #[test]
    fn relative() {
        let eq = ApproximatelyEqual::<f64>::new(1e-6);
        assert!(eq.call(1.0, 1.0 + 1e-9));
        assert!(!eq.call(1.0, 1.0 + 1e-3));
        assert!(eq.call(1e12, 1e12 + 1.0));
        assert!(!eq.call(0.0, 1e-300));
        assert!(!eq.call(f64::NAN, f64::NAN));
    }

    #[test]
    fn mixed_types() {
        let eq = ApproximatelyEqual::<i32, f32>::new(0.01);
        assert!(eq.call(100, 100.5));
        assert!(!eq.call(100, 102.0));
        assert!(ApproximatelyEqual::<f32, u8>::new(0.0).call(7.0, 7));
    }

    #[test]
    fn integer_pairs() {
        let eq = ApproximatelyEqual::<i32, u64>::new(0.01);
        assert!(eq.call(1000, 1005));
        assert!(!eq.call(-1000, 1000));
        assert!(eq.call(0, 0));
        assert!(!eq.call(0, 1));
        assert!(ApproximatelyEqual::<u8>::new(0.0).call(255, 255));
        assert!(3i16.approx_eq(4i16, 0.5));
        let eq = ApproximatelyEqual::<Complex<i64>>::new(1e-9);
        assert!(eq.call(Complex::new(7, -3), Complex::new(7, -3)));
    }

    #[test]
    fn complex_parts() {
        let eq = ApproximatelyEqual::<Complex<f64>, Complex<f32>>::new(1e-6);
        assert!(eq.call(Complex::new(1.0, -2.0), Complex::new(1.0, -2.0)));
        assert!(!eq.call(Complex::new(1.0, -2.0), Complex::new(1.0, 2.0)));
        assert!(!eq.call(Complex::new(1.0, 0.0), Complex::new(1.1, 0.0)));
    }
}
