// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Numeric type traits: promotion and approximate equality.

mod approx_eq;
mod promote;

use std::mem::size_of;

use num_complex::Complex;

pub use self::approx_eq::{ApproxEq, ApproximatelyEqual};
pub use self::promote::{Choose, Promote, Promoted, Select};

/// Real and complex forms of a numeric element type, and its promotion
/// priority.
///
/// Implemented for the primitive integers up to 64 bits, `f32`, `f64`,
/// `Complex<f32>` and `Complex<f64>`.
pub trait NumericTraits: Copy + PartialEq + 'static {
    /// The real type: `Self` for reals, the component type for complex
    /// numbers
    type Real: NumericTraits;

    /// The complex type with this real type
    type Complex: Copy + PartialEq + 'static;

    /// `true` unless the type is complex
    const IS_REAL: bool;

    /// Promotion priority.
    ///
    /// The size of the type, plus the size of an `i64` for non-integer
    /// types. Complex types have the priority of their real type.
    const PRIORITY: usize;
}

macro_rules! impl_numeric_real {
    ($integer:expr; $($t:ty),+) => {
        $(
            impl NumericTraits for $t {
                type Real = $t;
                type Complex = Complex<$t>;
                const IS_REAL: bool = true;
                const PRIORITY: usize = size_of::<$t>() + size_of::<i64>() * (!$integer) as usize;
            }
        )+
    };
}

impl_numeric_real!(true; i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_numeric_real!(false; f32, f64);

impl<T> NumericTraits for Complex<T>
where
    T: NumericTraits<Real = T>,
{
    type Real = T;
    type Complex = Complex<T>;
    const IS_REAL: bool = false;
    const PRIORITY: usize = T::PRIORITY;
}
