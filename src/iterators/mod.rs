// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Iterators over the axes and elements of arrays.
//!
//! [`.iter()`](crate::ArrayBase::iter) picks the iterator from the rank and
//! row-major contiguity of the array:
//!
//! - [`NestedIter`] for arrays of two or more dimensions, yielding
//!   `ArrayRef` sub-views,
//! - [`StridedIter`] for one-dimensional arrays with `C = R0`, yielding
//!   element cells at a run-time stride,
//! - `std::slice::Iter` for contiguous one-dimensional arrays.
//!
//! [`Elements`] visits every element of an array of any rank.

mod elements;

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use rawpointer::PointerExt;

use crate::arraybase::{offset_ptr, ArrayRef};
use crate::core::{stride_offset, Core};
use crate::element::ElemCell;
use crate::rank::{Positive, Rank};
use crate::{Ix, Ixs};

pub use self::elements::Elements;

/// An iterator over the sub-views of an array along its first axis.
///
/// Iterator element type is `ArrayRef<T, M, C>`, where `M` is one less than
/// the rank of the array. All sub-views share one [`Core`].
///
/// See [`.iter()`](crate::ArrayBase::iter) for more information.
pub struct NestedIter<'a, T, M, C> {
    ptr: NonNull<T>,
    core: Core<M>,
    stride: Ixs,
    index: Ix,
    end: Ix,
    life: PhantomData<&'a ElemCell<T>>,
    rmc: PhantomData<C>,
}

impl<'a, T, M: Rank, C> NestedIter<'a, T, M, C> {
    /// Create an iterator over axis 0 of the array described by `ptr` and
    /// `core`.
    ///
    /// ## Safety
    ///
    /// `ptr` and `core` must describe a valid array whose sub-views have at
    /// least `C` row-major contiguous axes.
    pub(crate) unsafe fn new<N>(ptr: NonNull<T>, core: &Core<N>) -> Self
    where
        N: Positive<Smaller = M>,
    {
        NestedIter {
            ptr,
            core: core.reduced(),
            stride: core.stride(0),
            index: 0,
            end: core.size(0),
            life: PhantomData,
            rmc: PhantomData,
        }
    }

    #[inline]
    fn make(&self, index: Ix) -> ArrayRef<T, M, C> {
        unsafe {
            let ptr = offset_ptr(self.ptr, stride_offset(index, self.stride));
            ArrayRef::from_parts(ptr, self.core.clone())
        }
    }
}

clone_bounds!(
    ['a, T, M, C]
    NestedIter['a, T, M, C] {
        @copy {
            ptr,
            stride,
            index,
            end,
            life,
            rmc,
        }
        core,
    }
);

impl<'a, T, M: Rank, C> Iterator for NestedIter<'a, T, M, C> {
    type Item = ArrayRef<T, M, C>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            return None;
        }
        let elt = self.make(self.index);
        self.index += 1;
        Some(elt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index = self.index.saturating_add(n).min(self.end);
        self.next()
    }
}

impl<'a, T, M: Rank, C> DoubleEndedIterator for NestedIter<'a, T, M, C> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            return None;
        }
        self.end -= 1;
        Some(self.make(self.end))
    }
}

impl<'a, T, M: Rank, C> ExactSizeIterator for NestedIter<'a, T, M, C> {
    fn len(&self) -> usize {
        self.end - self.index
    }
}

impl<'a, T, M: Rank, C> FusedIterator for NestedIter<'a, T, M, C> {}

/// Two nested iterators are equal when they are at the same position of the
/// same array.
impl<'a, T, M, C> PartialEq for NestedIter<'a, T, M, C> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
            && self.stride == other.stride
            && self.index == other.index
            && self.end == other.end
    }
}

impl<'a, T, M, C> Eq for NestedIter<'a, T, M, C> {}

impl<'a, T, M: Rank, C> fmt::Debug for NestedIter<'a, T, M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedIter")
            .field("ptr", &self.ptr)
            .field("stride", &self.stride)
            .field("index", &self.index)
            .field("end", &self.end)
            .field("shape", &self.core.shape())
            .finish()
    }
}

/// An iterator over the elements of a one-dimensional array with a run-time
/// stride.
///
/// Iterator element type is `&'a ElemCell<T>`.
///
/// See [`.iter()`](crate::ArrayBase::iter) for more information.
pub struct StridedIter<'a, T> {
    ptr: NonNull<T>,
    stride: Ixs,
    index: Ix,
    end: Ix,
    life: PhantomData<&'a ElemCell<T>>,
}

impl<'a, T> StridedIter<'a, T> {
    /// ## Safety
    ///
    /// `ptr + i * stride` must be a valid element for every `i < len`, alive
    /// for `'a`.
    pub(crate) unsafe fn new(ptr: NonNull<T>, len: Ix, stride: Ixs) -> Self {
        StridedIter {
            ptr,
            stride,
            index: 0,
            end: len,
            life: PhantomData,
        }
    }

    #[inline(always)]
    fn elem(&self, index: Ix) -> &'a ElemCell<T> {
        unsafe { ElemCell::from_ptr(self.ptr.as_ptr().stride_offset(self.stride, index)) }
    }
}

clone_bounds!(
    ['a, T]
    StridedIter['a, T] {
        @copy {
            ptr,
            stride,
            index,
            end,
            life,
        }
    }
);

impl<'a, T> Iterator for StridedIter<'a, T> {
    type Item = &'a ElemCell<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            return None;
        }
        let elt = self.elem(self.index);
        self.index += 1;
        Some(elt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index = self.index.saturating_add(n).min(self.end);
        self.next()
    }

    fn fold<Acc, G>(self, init: Acc, mut g: G) -> Acc
    where
        G: FnMut(Acc, Self::Item) -> Acc,
    {
        let mut accum = init;
        for i in self.index..self.end {
            accum = g(accum, self.elem(i));
        }
        accum
    }
}

impl<'a, T> DoubleEndedIterator for StridedIter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            return None;
        }
        self.end -= 1;
        Some(self.elem(self.end))
    }
}

impl<'a, T> ExactSizeIterator for StridedIter<'a, T> {
    fn len(&self) -> usize {
        self.end - self.index
    }
}

impl<'a, T> FusedIterator for StridedIter<'a, T> {}

impl<'a, T> PartialEq for StridedIter<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
            && self.stride == other.stride
            && self.index == other.index
            && self.end == other.end
    }
}

impl<'a, T> Eq for StridedIter<'a, T> {}

impl<'a, T> fmt::Debug for StridedIter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedIter")
            .field("ptr", &self.ptr)
            .field("stride", &self.stride)
            .field("index", &self.index)
            .field("end", &self.end)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::Manager;
    use crate::rank::{R1, R2};

    #[test]
    fn strided_both_ends() {
        let mut data = [0, 1, 2, 3, 4, 5, 6];
        let ptr = NonNull::new(data.as_mut_ptr()).unwrap();
        let it = unsafe { StridedIter::new(ptr, 4, 2) };
        assert_eq!(it.len(), 4);
        itertools::assert_equal(it.clone().map(|c| c.get()), vec![0, 2, 4, 6]);
        itertools::assert_equal(it.rev().map(|c| c.get()), vec![6, 4, 2, 0]);
    }

    #[test]
    fn strided_equality() {
        let mut data = [0u8; 6];
        let ptr = NonNull::new(data.as_mut_ptr()).unwrap();
        let mut a = unsafe { StridedIter::new(ptr, 3, 2) };
        let b = a.clone();
        assert_eq!(a, b);
        a.next();
        assert_ne!(a, b);
        let mut b2 = b.clone();
        b2.next();
        assert_eq!(a, b2);
    }

    #[test]
    fn nested_rows() {
        let mut data: Vec<i32> = (0..6).collect();
        let ptr = NonNull::new(data.as_mut_ptr()).unwrap();
        let core = Core::<R2>::contiguous([2, 3], Manager::unmanaged());
        let mut it: NestedIter<'_, i32, R1, R1> = unsafe { NestedIter::new(ptr, &core) };
        assert_eq!(it.len(), 2);
        let last = it.next_back().unwrap();
        assert_eq!(last.to_vec(), vec![3, 4, 5]);
        let first = it.next().unwrap();
        assert_eq!(first.to_vec(), vec![0, 1, 2]);
        assert!(it.next().is_none());
        assert_eq!(it.len(), 0);
    }
}
