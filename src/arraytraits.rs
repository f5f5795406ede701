// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::ops::Index;
use std::ptr::NonNull;
use std::slice;

use crate::arraybase::{Array, ArrayBase, ArrayRef};
use crate::core::Core;
use crate::element::ElemCell;
use crate::iterators::{NestedIter, StridedIter};
use crate::rank::{ConstRank, Rank, R0, R1};

#[cold]
#[inline(never)]
pub(crate) fn array_out_of_bounds() -> ! {
    panic!("ndview: index out of bounds");
}

/// Per-rank behaviour of arrays: what indexing and iteration produce.
///
/// `ArrayTraits<N>` is implemented by the RMC rank `C` of an array of rank
/// `N`, for all `1 ≤ N ≤ 6` and `0 ≤ C ≤ N`:
///
/// | `N` | `C` | `Reference` | `Value` | `Iter` |
/// |-----|-----|-------------|---------|--------|
/// | > 1 | any | `ArrayRef<T, N - 1, NestedRmc>` | `Array<T, N - 1, NestedRmc>` | [`NestedIter`] |
/// | 1 | 0 | `&ElemCell<T>` | `T` | [`StridedIter`] |
/// | 1 | 1 | `&ElemCell<T>` | `T` | `slice::Iter<ElemCell<T>>` |
///
/// `NestedRmc` is `N - 1` when the whole array is contiguous (`C == N`) and
/// `C` otherwise.
///
/// This trait is not meant to be implemented outside the crate.
pub trait ArrayTraits<N: Rank>: Rank {
    /// RMC guarantee of the sub-views along axis 0
    type NestedRmc: Rank;

    /// What `at` and iteration produce
    type Reference<'a, T: 'a>;

    /// What `value` produces
    type Value<T>;

    /// Iterator over axis 0
    type Iter<'a, T: 'a>: Iterator<Item = Self::Reference<'a, T>>
        + DoubleEndedIterator
        + ExactSizeIterator
        + Clone;

    /// Make the reference to the sub-view (or element) starting at `ptr`,
    /// where `core` describes the parent array.
    ///
    /// ## Safety
    ///
    /// `ptr` must be the start of a valid sub-view of the parent.
    #[doc(hidden)]
    unsafe fn make_reference<'a, T: 'a>(ptr: NonNull<T>, core: &'a Core<N>) -> Self::Reference<'a, T>;

    /// Make the iterator over axis 0 of the array `(ptr, core)`.
    ///
    /// ## Safety
    ///
    /// `ptr` and `core` must describe a valid array with this RMC guarantee.
    #[doc(hidden)]
    unsafe fn make_iter<'a, T: 'a>(ptr: NonNull<T>, core: &'a Core<N>) -> Self::Iter<'a, T>;

    /// Turn a reference into a value.
    #[doc(hidden)]
    fn make_value<'r, T: Copy + 'r>(reference: Self::Reference<'r, T>) -> Self::Value<T>;
}

impl ArrayTraits<R1> for R0 {
    type NestedRmc = R0;
    type Reference<'a, T: 'a> = &'a ElemCell<T>;
    type Value<T> = T;
    type Iter<'a, T: 'a> = StridedIter<'a, T>;

    #[inline(always)]
    unsafe fn make_reference<'a, T: 'a>(ptr: NonNull<T>, _core: &'a Core<R1>) -> &'a ElemCell<T> {
        ElemCell::from_ptr(ptr.as_ptr())
    }

    #[inline]
    unsafe fn make_iter<'a, T: 'a>(ptr: NonNull<T>, core: &'a Core<R1>) -> StridedIter<'a, T> {
        StridedIter::new(ptr, core.size(0), core.stride(0))
    }

    #[inline(always)]
    fn make_value<'r, T: Copy + 'r>(reference: &'r ElemCell<T>) -> T {
        reference.get()
    }
}

impl ArrayTraits<R1> for R1 {
    type NestedRmc = R0;
    type Reference<'a, T: 'a> = &'a ElemCell<T>;
    type Value<T> = T;
    type Iter<'a, T: 'a> = slice::Iter<'a, ElemCell<T>>;

    #[inline(always)]
    unsafe fn make_reference<'a, T: 'a>(ptr: NonNull<T>, _core: &'a Core<R1>) -> &'a ElemCell<T> {
        ElemCell::from_ptr(ptr.as_ptr())
    }

    #[inline]
    unsafe fn make_iter<'a, T: 'a>(ptr: NonNull<T>, core: &'a Core<R1>) -> slice::Iter<'a, ElemCell<T>> {
        debug_assert_eq!(core.stride(0), 1);
        slice::from_raw_parts(ptr.as_ptr() as *const ElemCell<T>, core.size(0)).iter()
    }

    #[inline(always)]
    fn make_value<'r, T: Copy + 'r>(reference: &'r ElemCell<T>) -> T {
        reference.get()
    }
}

macro_rules! impl_nested_traits {
    ($($n:literal: [$($c:literal),+];)+) => {
        $(
            $(
                impl_nested_traits!(@one $n, $c);
            )+
        )+
    };
    (@one $n:literal, $c:literal) => {
        impl ArrayTraits<ConstRank<$n>> for ConstRank<$c> {
            type NestedRmc = ConstRank<{ if $n == $c { $n - 1 } else { $c } }>;
            type Reference<'a, T: 'a> =
                ArrayRef<T, <ConstRank<$n> as Rank>::Smaller, Self::NestedRmc>;
            type Value<T> = Array<T, <ConstRank<$n> as Rank>::Smaller, Self::NestedRmc>;
            type Iter<'a, T: 'a> =
                NestedIter<'a, T, <ConstRank<$n> as Rank>::Smaller, Self::NestedRmc>;

            #[inline]
            unsafe fn make_reference<'a, T: 'a>(
                ptr: NonNull<T>,
                core: &'a Core<ConstRank<$n>>,
            ) -> Self::Reference<'a, T> {
                ArrayRef::from_parts(ptr, core.reduced())
            }

            #[inline]
            unsafe fn make_iter<'a, T: 'a>(
                ptr: NonNull<T>,
                core: &'a Core<ConstRank<$n>>,
            ) -> Self::Iter<'a, T> {
                NestedIter::new(ptr, core)
            }

            #[inline]
            fn make_value<'r, T: Copy + 'r>(reference: Self::Reference<'r, T>) -> Self::Value<T> {
                reference.shallow()
            }
        }
    };
}

impl_nested_traits! {
    2: [0, 1, 2];
    3: [0, 1, 2, 3];
    4: [0, 1, 2, 3, 4];
    5: [0, 1, 2, 3, 4, 5];
    6: [0, 1, 2, 3, 4, 5, 6];
}

impl<K, T, N, C> Index<N::Index> for ArrayBase<K, T, N, C>
where
    N: Rank,
    C: ArrayTraits<N>,
{
    type Output = ElemCell<T>;

    /// Access the element at **index**.
    ///
    /// **Panics** if index is out of bounds.
    #[inline]
    fn index(&self, index: N::Index) -> &ElemCell<T> {
        self.get_elem(index).unwrap_or_else(|| array_out_of_bounds())
    }
}

/// Return `true` if the array shapes and all elements of `self` and
/// `rhs` are equal. Return `false` otherwise.
impl<K, K2, T, U, N, C, C2> PartialEq<ArrayBase<K2, U, N, C2>> for ArrayBase<K, T, N, C>
where
    N: Rank,
    C: ArrayTraits<N>,
    C2: ArrayTraits<N>,
    T: Copy + PartialEq<U>,
    U: Copy,
{
    fn eq(&self, rhs: &ArrayBase<K2, U, N, C2>) -> bool {
        self.shape() == rhs.shape()
            && self
                .elements()
                .zip(rhs.elements())
                .all(|(a, b)| a.get() == b.get())
    }
}

impl<K, T, N, C> Eq for ArrayBase<K, T, N, C>
where
    N: Rank,
    C: ArrayTraits<N>,
    T: Copy + Eq,
{
}

impl<'a, K, T, N, C> IntoIterator for &'a ArrayBase<K, T, N, C>
where
    T: 'a,
    N: Rank,
    C: ArrayTraits<N>,
{
    type Item = C::Reference<'a, T>;
    type IntoIter = C::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
