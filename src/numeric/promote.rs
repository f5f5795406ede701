// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use num_complex::Complex;

use super::NumericTraits;

/// The result type of a binary numeric operation on `Self` and `B`.
///
/// The operand with the higher [`PRIORITY`](NumericTraits::PRIORITY) wins;
/// on a tie the right operand wins. If either operand is complex, the
/// result is the complex form of the winner.
///
/// ```
/// use ndview::numeric::Promoted;
/// use num_complex::Complex;
///
/// let x: Promoted<i32, f64> = 1.5f64;
/// let z: Promoted<Complex<f32>, f32> = Complex::new(1.0f32, 2.0);
/// let w: Promoted<f64, Complex<f32>> = Complex::new(1.0f64, 2.0);
/// let u: Promoted<u32, i32> = -1i32;
/// # let _ = (x, z, w, u);
/// ```
pub trait Promote<B> {
    /// The promoted type
    type Output: NumericTraits;
}

/// Shorthand for `<A as Promote<B>>::Output`.
pub type Promoted<A, B> = <A as Promote<B>>::Output;

/// Compile-time selection of a promotion result.
///
/// `LEFT_WINS` is whether the left operand has the higher priority, `REAL`
/// whether both operands are real.
#[derive(Copy, Clone, Debug)]
pub struct Select<const LEFT_WINS: bool, const REAL: bool>;

/// Pick the promoted type of `A` and `B` for one [`Select`] outcome.
pub trait Choose<A, B> {
    /// The chosen type
    type Output: NumericTraits;
}

impl<A: NumericTraits, B: NumericTraits> Choose<A, B> for Select<true, true> {
    type Output = A;
}

impl<A: NumericTraits, B: NumericTraits> Choose<A, B> for Select<false, true> {
    type Output = B;
}

impl<A, B> Choose<A, B> for Select<true, false>
where
    A: NumericTraits,
    A::Complex: NumericTraits,
    B: NumericTraits,
{
    type Output = A::Complex;
}

impl<A, B> Choose<A, B> for Select<false, false>
where
    A: NumericTraits,
    B: NumericTraits,
    B::Complex: NumericTraits,
{
    type Output = B::Complex;
}

macro_rules! impl_promote {
    ($all:tt; $($a:ty),+) => {
        $(
            impl_promote!(@row $a; $all);
        )+
    };
    (@row $a:ty; [$($b:ty),+]) => {
        $(
            impl Promote<$b> for $a {
                type Output = <Select<
                    { <$a as NumericTraits>::PRIORITY > <$b as NumericTraits>::PRIORITY },
                    { <$a as NumericTraits>::IS_REAL && <$b as NumericTraits>::IS_REAL },
                > as Choose<$a, $b>>::Output;
            }
        )+
    };
}

impl_promote!(
    [i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, Complex<f32>, Complex<f64>];
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, Complex<f32>, Complex<f64>
);
