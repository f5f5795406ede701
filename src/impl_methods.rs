// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::slice;

use crate::arraybase::{offset_ptr, Array, ArrayBase, ArrayRef, Deep, Shallow};
use crate::arraytraits::{array_out_of_bounds, ArrayTraits};
use crate::core::{stride_offset, Core};
use crate::element::ElemCell;
use crate::iterators::Elements;
use crate::manager::Manager;
use crate::rank::{NotAbove, Rank, R0};
use crate::views::{View, ViewTraits};
use crate::{Ix, Ixs};

/// # Methods For All Arrays
impl<K, T, N, C> ArrayBase<K, T, N, C>
where
    N: Rank,
    C: ArrayTraits<N>,
{
    /// Return the number of dimensions (axes) in the array.
    #[inline]
    pub fn ndim(&self) -> usize {
        N::N
    }

    /// Return the total number of elements in the array.
    pub fn num_elements(&self) -> usize {
        self.core.num_elements()
    }

    /// Return whether the array has any elements
    pub fn is_empty(&self) -> bool {
        self.num_elements() == 0
    }

    /// Return the shape of the array.
    #[inline]
    pub fn shape(&self) -> N::Index {
        self.core.shape()
    }

    /// Return the strides of the array, in elements.
    #[inline]
    pub fn strides(&self) -> N::Strides {
        self.core.strides()
    }

    /// Return the length of `axis`.
    ///
    /// **Panics** if the axis is out of bounds.
    #[inline]
    pub fn size(&self, axis: usize) -> Ix {
        self.core.size(axis)
    }

    /// Return the stride of `axis`.
    ///
    /// **Panics** if the axis is out of bounds.
    #[inline]
    pub fn stride(&self, axis: usize) -> Ixs {
        self.core.stride(axis)
    }

    /// Return a pointer to the first element in the array.
    ///
    /// Raw access to array elements needs to follow the strided indexing
    /// scheme: an element at multi-index *I* in an array with strides *S* is
    /// located at offset
    ///
    /// *Σ<sub>0 ≤ k < d</sub> I<sub>k</sub> × S<sub>k</sub>*
    ///
    /// where *d* is `self.ndim()`.
    #[inline(always)]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Return the ownership handle of the elements.
    #[inline]
    pub fn manager(&self) -> &Manager {
        self.core.manager()
    }

    /// Return the dimension metadata of the array.
    #[inline]
    pub fn core(&self) -> &Core<N> {
        &self.core
    }

    /// Return the sub-view (or element, for one-dimensional arrays) at index
    /// `n` along the first axis.
    ///
    /// **Panics** if `n` is out of bounds.
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// let a: Array<i32, R2, R2> = Array::from_shape_fn([2, 3], |[i, j]| (3 * i + j) as i32);
    /// let row: ArrayRef<i32, R1, R1> = a.at(1);
    /// assert_eq!(row.to_vec(), vec![3, 4, 5]);
    /// assert_eq!(row.at(2).get(), 5);
    /// ```
    #[inline]
    pub fn at(&self, n: Ix) -> C::Reference<'_, T> {
        self.get(n).unwrap_or_else(|| array_out_of_bounds())
    }

    /// Return the sub-view (or element) at index `n` along the first axis,
    /// or `None` if the index is out of bounds.
    #[inline]
    pub fn get(&self, n: Ix) -> Option<C::Reference<'_, T>> {
        if n < self.size(0) {
            unsafe { Some(self.at_unchecked(n)) }
        } else {
            None
        }
    }

    /// Return the first sub-view (or element) along the first axis.
    ///
    /// **Panics** if the first axis is empty.
    #[inline]
    pub fn front(&self) -> C::Reference<'_, T> {
        self.at(0)
    }

    /// Return the last sub-view (or element) along the first axis.
    ///
    /// **Panics** if the first axis is empty.
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// let a: Array<i32, R2, R2> = Array::from_vec([3, 2], vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(a.front().to_vec(), vec![1, 2]);
    /// assert_eq!(a.back().to_vec(), vec![5, 6]);
    /// assert_eq!(a.back().back().get(), 6);
    /// ```
    #[inline]
    pub fn back(&self) -> C::Reference<'_, T> {
        self.at(self.size(0).wrapping_sub(1))
    }

    /// Return the sub-view (or element) at index `n` along the first axis,
    /// without bounds checking.
    ///
    /// ## Safety
    ///
    /// `n` must be less than `self.size(0)`; this is only checked with a
    /// debug assertion.
    #[inline]
    pub unsafe fn at_unchecked(&self, n: Ix) -> C::Reference<'_, T> {
        debug_bounds_check!(self, n);
        let ptr = offset_ptr(self.ptr, stride_offset(n, self.stride(0)));
        C::make_reference(ptr, &self.core)
    }

    /// Return the value at index `n` along the first axis: a shallow
    /// [`Array`] for multidimensional arrays, a copy of the element for
    /// one-dimensional arrays.
    ///
    /// **Panics** if `n` is out of bounds.
    #[inline]
    pub fn value(&self, n: Ix) -> C::Value<T>
    where
        T: Copy,
    {
        C::make_value::<T>(self.at(n))
    }

    /// Return a reference to the element at `index`.
    ///
    /// **Panics** if `index` is out of bounds.
    #[inline]
    pub fn elem(&self, index: N::Index) -> &ElemCell<T> {
        self.get_elem(index).unwrap_or_else(|| array_out_of_bounds())
    }

    /// Return a reference to the element at `index`, or `None` if the index
    /// is out of bounds.
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// let a: Array<f64, R2, R2> = Array::zeros([2, 2]);
    /// assert!(a.get_elem([1, 1]).is_some());
    /// assert!(a.get_elem([2, 0]).is_none());
    /// ```
    #[inline]
    pub fn get_elem(&self, index: N::Index) -> Option<&ElemCell<T>> {
        if self.core.contains(&index) {
            unsafe { Some(self.elem_unchecked(index)) }
        } else {
            None
        }
    }

    /// Return a reference to the element at `index`, without bounds
    /// checking.
    ///
    /// ## Safety
    ///
    /// `index` must be in bounds; this is only checked with a debug
    /// assertion.
    #[inline]
    pub unsafe fn elem_unchecked(&self, index: N::Index) -> &ElemCell<T> {
        debug_bounds_check_elem!(self, index);
        let ptr = offset_ptr(self.ptr, self.core.offset_of(&index));
        ElemCell::from_ptr(ptr.as_ptr())
    }

    /// Return an iterator over the first axis.
    ///
    /// Multidimensional arrays yield [`ArrayRef`] sub-views, one-dimensional
    /// arrays yield element references. The iterator is double-ended and
    /// exact-size, and a fresh one can be made at any time.
    #[inline]
    pub fn iter(&self) -> C::Iter<'_, T> {
        unsafe { C::make_iter(self.ptr, &self.core) }
    }

    /// Return an iterator over references to all elements, in row-major
    /// order.
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// let a: Array<i32, R2, R2> = Array::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// let t = a.transpose();
    /// let v: Vec<i32> = t.elements().map(|x| x.get()).collect();
    /// assert_eq!(v, vec![1, 3, 2, 4]);
    /// ```
    #[inline]
    pub fn elements(&self) -> Elements<'_, T, N> {
        unsafe { Elements::new(self.ptr, &self.core, C::N == N::N) }
    }

    /// Copy the elements, in row-major order, into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Copy,
    {
        self.elements().map(|x| x.get()).collect()
    }

    /// Return a view with the order of the axes reversed.
    ///
    /// No element is copied. The result makes no contiguity guarantee.
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// let a: Array<i32, R2, R2> = Array::from_shape_fn([3, 4], |[i, j]| (4 * i + j) as i32);
    /// let t = a.transpose();
    /// assert_eq!(t.shape(), [4, 3]);
    /// assert_eq!(t.strides(), [1, 4]);
    /// assert_eq!(t[[3, 1]], a[[1, 3]]);
    /// ```
    pub fn transpose(&self) -> ArrayRef<T, N, R0>
    where
        R0: ArrayTraits<N>,
    {
        let mut order = N::Index::default();
        for (i, o) in order.as_mut().iter_mut().enumerate() {
            *o = N::N - 1 - i;
        }
        self.transpose_axes(order)
    }

    /// Return a view whose axis `i` is axis `order[i]` of this array.
    ///
    /// **Panics** if `order` is not a permutation of the axes.
    pub fn transpose_axes(&self, order: N::Index) -> ArrayRef<T, N, R0>
    where
        R0: ArrayTraits<N>,
    {
        let mut seen = N::Index::default();
        for &axis in order.as_ref() {
            ndassert!(
                axis < N::N && seen.as_ref()[axis] == 0,
                "transpose: {:?} is not a permutation of the axes",
                order
            );
            seen.as_mut()[axis] = 1;
        }
        unsafe { ArrayRef::from_parts(self.ptr, self.core.permuted(order.as_ref())) }
    }

    /// Return a shallow [`Array`] handle to the same elements.
    #[inline]
    pub fn shallow(&self) -> Array<T, N, C> {
        self.retype::<Shallow, C>()
    }

    /// Return a deep [`ArrayRef`] handle to the same elements.
    #[inline]
    pub fn deep(&self) -> ArrayRef<T, N, C> {
        self.retype::<Deep, C>()
    }

    /// Return a handle with a weaker row-major contiguity guarantee.
    ///
    /// Widening the guarantee does not compile:
    ///
    /// ```compile_fail
    /// use ndview::prelude::*;
    ///
    /// let a: Array<i32, R2, R1> = Array::zeros([2, 2]);
    /// let b = a.relaxed::<R2>();
    /// ```
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// let a: Array<i32, R2, R2> = Array::zeros([2, 2]);
    /// let b: Array<i32, R2, R1> = a.relaxed();
    /// let c: Array<i32, R2> = b.relaxed();
    /// assert_eq!(a, c);
    /// ```
    #[inline]
    pub fn relaxed<C2>(&self) -> ArrayBase<K, T, N, C2>
    where
        C2: ArrayTraits<N> + NotAbove<C>,
    {
        self.retype::<K, C2>()
    }

    /// Copy the elements into a new, row-major contiguous array.
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// let a: Array<i32, R2, R2> = Array::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
    /// let t = a.transpose().copy();
    /// assert_eq!(t.to_vec(), vec![1, 3, 2, 4]);
    /// t[[0, 0]].set(10);
    /// assert_eq!(a[[0, 0]], 1);
    /// ```
    pub fn copy(&self) -> Array<T, N, N>
    where
        T: Copy + Send + Sync + 'static,
        N: ArrayTraits<N>,
    {
        let v = self.to_vec();
        let (manager, ptr) = Manager::from_vec(v);
        unsafe { Array::from_parts(ptr, Core::contiguous(self.shape(), manager)) }
    }

    /// Return a sub-view selected by `view`.
    ///
    /// See the [`views`](crate::views) module for the selectors and the
    /// result types.
    ///
    /// **Panics** if a selector does not fit its axis.
    pub fn view<S>(&self, view: View<S>) -> ArrayRef<T, S::Nd, S::Rmc>
    where
        S: ViewTraits<N, C, N>,
        S::Rmc: ArrayTraits<S::Nd>,
    {
        let (offset, extents) = view.resolve::<N, C>(&self.core);
        unsafe {
            ArrayRef::from_parts(offset_ptr(self.ptr, offset), self.core.with_extents(extents))
        }
    }
}

/// # Methods For Contiguous Arrays
impl<K, T, N> ArrayBase<K, T, N, N>
where
    N: ArrayTraits<N>,
{
    /// Return the elements as a slice of cells, in row-major order.
    ///
    /// Only available when the whole array is known to be contiguous.
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// let a: Array<u8, R2, R2> = Array::from_elem([2, 3], 7);
    /// let s = a.as_slice();
    /// assert_eq!(s.len(), 6);
    /// s[4].set(0);
    /// assert_eq!(a[[1, 1]], 0);
    /// ```
    pub fn as_slice(&self) -> &[ElemCell<T>] {
        unsafe {
            slice::from_raw_parts(self.ptr.as_ptr() as *const ElemCell<T>, self.num_elements())
        }
    }
}

/// # Methods For Deep References
impl<T, N, C> ArrayRef<T, N, C>
where
    N: Rank,
    C: ArrayTraits<N>,
{
    /// Copy all elements of `rhs` into the elements of `self`.
    ///
    /// **Panics** if the shapes differ; nothing is written in that case.
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// let a: Array<i32, R2, R2> = Array::zeros([2, 3]);
    /// let b: Array<i32, R1, R1> = Array::from_vec([3], vec![1, 2, 3]).unwrap();
    /// a.at(1).assign(&b);
    /// assert_eq!(a.to_vec(), vec![0, 0, 0, 1, 2, 3]);
    /// ```
    pub fn assign<K2, C2>(&self, rhs: &ArrayBase<K2, T, N, C2>)
    where
        T: Copy,
        C2: ArrayTraits<N>,
    {
        ndassert!(
            self.shape() == rhs.shape(),
            "assign: shape mismatch, {:?} and {:?}",
            self.shape(),
            rhs.shape()
        );
        for (a, b) in self.elements().zip(rhs.elements()) {
            a.set(b.get());
        }
    }

    /// Set every element to `value`.
    pub fn fill(&self, value: T)
    where
        T: Copy,
    {
        for a in self.elements() {
            a.set(value);
        }
    }

    /// Apply `f` to every element in place.
    pub fn map_inplace<F>(&self, mut f: F)
    where
        T: Copy,
        F: FnMut(T) -> T,
    {
        for a in self.elements() {
            a.set(f(a.get()));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use defmac::defmac;

    #[test]
    fn at_and_value() {
        let a: Array<i32, R3, R3> = Array::from_shape_fn([2, 3, 4], |[i, j, k]| (100 * i + 10 * j + k) as i32);
        let plane: ArrayRef<i32, R2, R2> = a.at(1);
        assert_eq!(plane.shape(), [3, 4]);
        let row: ArrayRef<i32, R1, R1> = plane.at(2);
        assert_eq!(row.at(3).get(), 123);
        let v: Array<i32, R2, R2> = a.value(0);
        assert_eq!(v[[2, 1]], 21);
        assert_eq!(row.value(0), 120);
        assert!(a.get(2).is_none());
    }

    #[test]
    fn front_and_back() {
        let a: Array<i32, R2, R2> = Array::from_shape_fn([3, 2], |[i, j]| (10 * i + j) as i32);
        assert_eq!(a.front(), a.at(0));
        assert_eq!(a.back(), a.at(2));
        let t = a.transpose();
        let last: ArrayRef<i32, R1> = t.back();
        assert_eq!(last.front().get(), 1);
        assert_eq!(last.back().get(), 21);
    }

    #[test]
    #[should_panic]
    fn back_of_empty() {
        let a: Array<u8, R1, R1> = Array::zeros([0]);
        a.back();
    }

    #[test]
    fn nested_rmc_of_partial() {
        let a: Array<i32, R3, R3> = Array::zeros([2, 3, 4]);
        let b: Array<i32, R3, R2> = a.relaxed();
        let sub: ArrayRef<i32, R2, R2> = b.at(0);
        assert_eq!(sub.core().row_major_contiguous(), 2);
        let c: Array<i32, R3, R1> = a.relaxed();
        let sub: ArrayRef<i32, R2, R1> = c.at(0);
        let row: ArrayRef<i32, R1, R1> = sub.at(0);
        assert_eq!(row.to_vec(), vec![0; 4]);
    }

    #[test]
    fn transpose_axes_roundtrip() {
        let a: Array<i32, R3, R3> = Array::from_shape_fn([2, 3, 4], |[i, j, k]| (100 * i + 10 * j + k) as i32);
        let t = a.transpose_axes([2, 0, 1]);
        assert_eq!(t.shape(), [4, 2, 3]);
        assert_eq!(t[[3, 1, 2]], a[[1, 2, 3]]);
        let back = t.transpose_axes([1, 2, 0]);
        assert_eq!(back.shape(), a.shape());
        assert_eq!(back.strides(), a.strides());
        assert_eq!(back, a);
    }

    #[test]
    #[should_panic]
    fn transpose_axes_not_permutation() {
        let a: Array<i32, R2, R2> = Array::zeros([2, 2]);
        a.transpose_axes([0, 0]);
    }

    #[test]
    fn metadata() {
        let a: Array<f32, R2, R2> = Array::zeros([3, 0]);
        assert_eq!(a.ndim(), 2);
        assert!(a.is_empty());
        assert_eq!(a.num_elements(), 0);
        assert_eq!(a.size(0), 3);
        assert_eq!(a.stride(0), 0);
        assert_eq!(a.iter().len(), 3);
        assert_eq!(a.elements().len(), 0);
        assert!(a.manager().is_managed());
    }

    #[test]
    fn shared_handles() {
        let a: Array<i32, R1, R1> = Array::zeros([4]);
        let b = a.clone();
        let r = a.deep();
        defmac!(values arr => arr.to_vec());
        r.fill(2);
        assert_eq!(values!(&b), vec![2; 4]);
        r.map_inplace(|x| x * x);
        assert_eq!(values!(&b), vec![4; 4]);
        assert_eq!(values!(&a), values!(&r));
        assert_eq!(b.manager().use_count(), a.manager().use_count());
        assert_eq!(a.as_ptr(), r.shallow().as_ptr());
    }

    #[test]
    fn copy_detaches() {
        let a: Array<i32, R2, R2> = Array::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let c = a.copy();
        assert!(!c.manager().ptr_eq(a.manager()));
        c.deep().fill(0);
        assert_eq!(a.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    #[should_panic]
    fn assign_shape_mismatch() {
        let a: Array<i32, R1, R1> = Array::zeros([3]);
        let a = a.deep();
        let b: Array<i32, R1, R1> = Array::zeros([4]);
        a.assign(&b);
    }
}
