// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for arrays
//!

use std::ptr::NonNull;

use num_traits::Zero;

use crate::arraybase::{offset_ptr, Array, ArrayBase};
use crate::arraytraits::ArrayTraits;
use crate::core::{size_of_shape_checked, Core};
use crate::error::{from_kind, ErrorKind, ShapeError};
use crate::manager::Manager;
use crate::rank::{IndexVector, Rank, R0};
use crate::{Ix, Ixs};

macro_rules! size_checked_unwrap {
    ($shape:expr) => {
        match size_of_shape_checked($shape.as_ref()) {
            Some(sz) => sz,
            None => panic!("ndview: Shape too large, number of elements overflows isize"),
        }
    };
}

/// Constructor methods for arrays that own a new buffer.
///
/// The buffer is kept alive by the array's [`Manager`]; it is freed when the
/// last handle to it is dropped. All these arrays are row-major contiguous,
/// so any RMC guarantee `C` can be requested.
impl<T, N, C> Array<T, N, C>
where
    T: Send + Sync + 'static,
    N: Rank,
    C: ArrayTraits<N>,
{
    /// Create an array with shape `shape` from a vector of elements in
    /// row-major order (no copying needed).
    ///
    /// **Errors** if the length of `v` is not the number of elements of
    /// `shape`, or the number of elements overflows `isize`.
    ///
    /// ```
    /// use ndview::prelude::*;
    /// use ndview::ErrorKind;
    ///
    /// let a: Array<i32, R2, R2> = Array::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(a[[1, 0]], 4);
    ///
    /// let e = Array::<i32, R2, R2>::from_vec([2, 2], vec![1, 2, 3]).unwrap_err();
    /// assert_eq!(e.kind(), ErrorKind::IncompatibleShape);
    /// ```
    pub fn from_vec(shape: N::Index, v: Vec<T>) -> Result<Self, ShapeError> {
        let size = size_of_shape_checked(shape.as_ref()).ok_or_else(|| from_kind(ErrorKind::Overflow))?;
        if size != v.len() {
            return Err(from_kind(ErrorKind::IncompatibleShape));
        }
        let (manager, ptr) = Manager::from_vec(v);
        unsafe { Ok(Array::from_parts(ptr, Core::contiguous(shape, manager))) }
    }

    /// Create an array with copies of `elem`.
    ///
    /// **Panics** if the number of elements overflows `isize`.
    pub fn from_elem(shape: N::Index, elem: T) -> Self
    where
        T: Clone,
    {
        let size = size_checked_unwrap!(shape);
        let v = vec![elem; size];
        unsafe { Self::from_vec_unchecked(shape, v) }
    }

    /// Create an array with zeros.
    ///
    /// **Panics** if the number of elements overflows `isize`.
    pub fn zeros(shape: N::Index) -> Self
    where
        T: Clone + Zero,
    {
        Self::from_elem(shape, T::zero())
    }

    /// Create an array with default values.
    ///
    /// **Panics** if the number of elements overflows `isize`.
    pub fn allocate(shape: N::Index) -> Self
    where
        T: Default,
    {
        let size = size_checked_unwrap!(shape);
        let v = (0..size).map(|_| T::default()).collect();
        unsafe { Self::from_vec_unchecked(shape, v) }
    }

    /// Create an array with values created by the function `f`.
    ///
    /// `f` is called with the index of each element, in row-major order.
    /// The index has the type of `shape`, so closures can destructure it.
    ///
    /// **Panics** if the number of elements overflows `isize`.
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// let a: Array<usize, R2, R2> = Array::from_shape_fn([2, 2], |[i, j]| i * 10 + j);
    /// assert_eq!(a.to_vec(), vec![0, 1, 10, 11]);
    /// ```
    pub fn from_shape_fn<I, F>(shape: I, mut f: F) -> Self
    where
        I: IndexVector<Ix>,
        N: Rank<Index = I>,
        F: FnMut(I) -> T,
    {
        let size = size_checked_unwrap!(shape);
        let mut v = Vec::with_capacity(size);
        let mut index = I::default();
        for _ in 0..size {
            v.push(f(index));
            next_index(index.as_mut(), shape.as_ref());
        }
        unsafe { Self::from_vec_unchecked(shape, v) }
    }

    unsafe fn from_vec_unchecked(shape: N::Index, v: Vec<T>) -> Self {
        debug_assert_eq!(size_of_shape_checked(shape.as_ref()), Some(v.len()));
        let (manager, ptr) = Manager::from_vec(v);
        Array::from_parts(ptr, Core::contiguous(shape, manager))
    }
}

impl<T, N> Array<T, N, R0>
where
    T: Send + Sync + 'static,
    N: Rank,
    R0: ArrayTraits<N>,
{
    /// Create an array with custom strides over the elements of `v`.
    ///
    /// Strides are in elements and may be negative or zero; the array
    /// starts at whichever element of `v` makes every index land inside it.
    ///
    /// **Errors** if an index reaches outside `v`, or on overflow.
    ///
    /// ```
    /// use ndview::prelude::*;
    ///
    /// // column-major 2 x 3
    /// let a = Array::<i32, R2>::from_vec_strided([2, 3], [1, 2], vec![1, 4, 2, 5, 3, 6]).unwrap();
    /// assert_eq!(a.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    ///
    /// let r = Array::<i32, R1>::from_vec_strided([3], [-1], vec![1, 2, 3]).unwrap();
    /// assert_eq!(r.to_vec(), vec![3, 2, 1]);
    /// ```
    pub fn from_vec_strided(shape: N::Index, strides: N::Strides, v: Vec<T>) -> Result<Self, ShapeError> {
        size_of_shape_checked(shape.as_ref()).ok_or_else(|| from_kind(ErrorKind::Overflow))?;
        let (low, high) = offset_bounds(shape.as_ref(), strides.as_ref())?;
        if let Some(high) = high {
            // offsets of the elements span low..=high, which has to fit in v
            let span = high.checked_sub(low).ok_or_else(|| from_kind(ErrorKind::Overflow))?;
            if span as usize >= v.len() {
                return Err(from_kind(ErrorKind::OutOfBounds));
            }
        }
        let (manager, ptr) = Manager::from_vec(v);
        unsafe {
            let ptr = offset_ptr(ptr, -low);
            Ok(Array::from_parts(ptr, Core::new(shape, strides, manager)))
        }
    }
}

impl<K, T, N, C> ArrayBase<K, T, N, C>
where
    N: Rank,
    C: ArrayTraits<N>,
{
    /// Create an array from a data pointer and a core.
    ///
    /// ## Safety
    ///
    /// - `ptr` must be non-null and, for every index within the shape of
    ///   `core`, `ptr` offset by `core.offset_of(index)` must point to a
    ///   valid element.
    /// - The elements must stay valid for as long as any handle to the
    ///   array (or any handle sharing its manager) lives. Use
    ///   [`Manager::new`] or [`Manager::with_release`] to tie the lifetime of
    ///   the memory to the array.
    /// - The elements must not be accessed through `&mut` references while
    ///   the array exists.
    /// - The last `C` axes must be row-major contiguous; this is checked with
    ///   a debug assertion.
    ///
    /// ```
    /// use ndview::prelude::*;
    /// use ndview::{Core, Manager};
    ///
    /// let mut data = vec![1.0f64, 2.0, 3.0, 4.0];
    /// let ptr = data.as_mut_ptr();
    /// let core = Core::<R2>::contiguous([2, 2], Manager::new(data));
    /// let a: Array<f64, R2, R2> = unsafe { Array::from_raw_parts(ptr, core) };
    /// assert_eq!(a[[1, 0]], 3.0);
    /// ```
    pub unsafe fn from_raw_parts(ptr: *mut T, core: Core<N>) -> Self {
        debug_assert!(!ptr.is_null());
        debug_assert!(
            C::N <= core.row_major_contiguous(),
            "declared RMC {} exceeds the contiguity of {:?}",
            C::N,
            core
        );
        ArrayBase::from_parts(NonNull::new_unchecked(ptr), core)
    }
}

/// Lowest offset and, for non-empty shapes, highest offset of any element.
fn offset_bounds(shape: &[Ix], strides: &[Ixs]) -> Result<(Ixs, Option<Ixs>), ShapeError> {
    if shape.iter().any(|&s| s == 0) {
        return Ok((0, None));
    }
    let mut low: Ixs = 0;
    let mut high: Ixs = 0;
    for (&size, &stride) in shape.iter().zip(strides) {
        let last = (size - 1) as Ixs;
        let extent = last.checked_mul(stride).ok_or_else(|| from_kind(ErrorKind::Overflow))?;
        let bound = if extent < 0 { &mut low } else { &mut high };
        *bound = bound.checked_add(extent).ok_or_else(|| from_kind(ErrorKind::Overflow))?;
    }
    Ok((low, Some(high)))
}

/// Step `index` to the next index in row-major order within `shape`.
fn next_index(index: &mut [Ix], shape: &[Ix]) {
    for (i, &size) in index.iter_mut().zip(shape).rev() {
        *i += 1;
        if *i < size {
            return;
        }
        *i = 0;
    }
}
