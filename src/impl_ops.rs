// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use num_complex::Complex;

/// Elements that can be used as direct operands in arithmetic with arrays.
///
/// For example, `f64` is a `ScalarOperand` which means that for an array
/// reference `r`, `r += 3.` and `r *= 2.` are allowed.
///
/// `ScalarOperand` determines for which scalars `S` the compound assignment
/// operators `r @= S` are defined on an [`ArrayRef`](crate::ArrayRef).
///
/// This trait ***does not*** limit which elements can be stored in an array
/// in general. Non-`ScalarOperand` types can still participate in
/// array-array assignment operators as elements.
pub trait ScalarOperand: 'static + Copy {}
impl ScalarOperand for bool {}
impl ScalarOperand for i8 {}
impl ScalarOperand for u8 {}
impl ScalarOperand for i16 {}
impl ScalarOperand for u16 {}
impl ScalarOperand for i32 {}
impl ScalarOperand for u32 {}
impl ScalarOperand for i64 {}
impl ScalarOperand for u64 {}
impl ScalarOperand for i128 {}
impl ScalarOperand for u128 {}
impl ScalarOperand for isize {}
impl ScalarOperand for usize {}
impl ScalarOperand for f32 {}
impl ScalarOperand for f64 {}
impl ScalarOperand for Complex<f32> {}
impl ScalarOperand for Complex<f64> {}

mod assign_ops {
    use super::ScalarOperand;
    use crate::arraybase::{ArrayBase, ArrayRef};
    use crate::arraytraits::ArrayTraits;
    use crate::rank::Rank;

    macro_rules! impl_assign_op {
        ($trt:ident, $method:ident, $doc:expr) => {
            use std::ops::$trt;

            #[doc=$doc]
            /// The shapes of `self` and `rhs` must agree.
            ///
            /// **Panics** if the shapes differ; no element is written in that
            /// case.
            impl<'a, K2, T, U, N, C, C2> $trt<&'a ArrayBase<K2, U, N, C2>> for ArrayRef<T, N, C>
            where
                T: Copy + $trt<U>,
                U: Copy,
                N: Rank,
                C: ArrayTraits<N>,
                C2: ArrayTraits<N>,
            {
                fn $method(&mut self, rhs: &ArrayBase<K2, U, N, C2>) {
                    ndassert!(
                        self.shape() == rhs.shape(),
                        concat!(stringify!($method), ": shape mismatch, {:?} and {:?}"),
                        self.shape(),
                        rhs.shape()
                    );
                    for (x, y) in self.elements().zip(rhs.elements()) {
                        let mut v = x.get();
                        v.$method(y.get());
                        x.set(v);
                    }
                }
            }

            #[doc=$doc]
            impl<T, S, N, C> $trt<S> for ArrayRef<T, N, C>
            where
                T: Copy + $trt<S>,
                S: ScalarOperand,
                N: Rank,
                C: ArrayTraits<N>,
            {
                fn $method(&mut self, rhs: S) {
                    self.map_inplace(move |mut elt| {
                        elt.$method(rhs);
                        elt
                    });
                }
            }
        };
    }

    impl_assign_op!(
        AddAssign,
        add_assign,
        "Perform `self += rhs` as elementwise addition (in place).\n"
    );
    impl_assign_op!(
        SubAssign,
        sub_assign,
        "Perform `self -= rhs` as elementwise subtraction (in place).\n"
    );
    impl_assign_op!(
        MulAssign,
        mul_assign,
        "Perform `self *= rhs` as elementwise multiplication (in place).\n"
    );
    impl_assign_op!(
        DivAssign,
        div_assign,
        "Perform `self /= rhs` as elementwise division (in place).\n"
    );
    impl_assign_op!(
        RemAssign,
        rem_assign,
        "Perform `self %= rhs` as elementwise remainder (in place).\n"
    );
    impl_assign_op!(
        BitAndAssign,
        bitand_assign,
        "Perform `self &= rhs` as elementwise bit and (in place).\n"
    );
    impl_assign_op!(
        BitOrAssign,
        bitor_assign,
        "Perform `self |= rhs` as elementwise bit or (in place).\n"
    );
    impl_assign_op!(
        BitXorAssign,
        bitxor_assign,
        "Perform `self ^= rhs` as elementwise bit xor (in place).\n"
    );
    impl_assign_op!(
        ShlAssign,
        shl_assign,
        "Perform `self <<= rhs` as elementwise left shift (in place).\n"
    );
    impl_assign_op!(
        ShrAssign,
        shr_assign,
        "Perform `self >>= rhs` as elementwise right shift (in place).\n"
    );
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn scalar_ops() {
        let a: Array<i32, R2, R2> = Array::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let mut r = a.deep();
        r += 1;
        r *= 3;
        r -= 2;
        assert_eq!(a.to_vec(), vec![4, 7, 10, 13]);
        r %= 5;
        assert_eq!(a.to_vec(), vec![4, 2, 0, 3]);
        r <<= 2u32;
        r >>= 1u32;
        r ^= 1;
        assert_eq!(a.to_vec(), vec![9, 5, 1, 7]);
    }

    #[test]
    fn array_ops_on_rows() {
        let a: Array<f64, R2, R2> = Array::zeros([2, 3]);
        let b: Array<f64, R1, R1> = Array::from(vec![1., 2., 3.]);
        let mut row = a.at(1);
        row += &b;
        row += &b;
        row /= &b;
        assert_eq!(a.to_vec(), vec![0., 0., 0., 2., 2., 2.]);
        let mut col: ArrayRef<f64, R1> = a.view(view![.., 0]);
        col -= 1.0;
        assert_eq!(a.to_vec(), vec![-1., 0., 0., 1., 2., 2.]);
    }

    #[test]
    fn bit_ops() {
        let a: Array<u8, R1, R1> = Array::from(vec![0b1100, 0b1010]);
        let m: Array<u8, R1> = Array::from_vec_strided([2], [0], vec![0b0110]).unwrap();
        let mut r = a.deep();
        r &= &m;
        assert_eq!(a.to_vec(), vec![0b0100, 0b0010]);
        r |= 0b0001u8;
        assert_eq!(a.to_vec(), vec![0b0101, 0b0011]);
    }

    #[test]
    #[should_panic]
    fn shape_mismatch() {
        let a: Array<i32, R1, R1> = Array::zeros([3]);
        let b: Array<i32, R1, R1> = Array::zeros([2]);
        let mut r = a.deep();
        r += &b;
    }
}
