// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::core::Core;
use crate::rank::R0;
use crate::Ixs;

/// An *N*-dimensional view into a strided block of memory.
///
/// The array is a general container of elements of type `T`, addressed
/// through a data pointer and a [`Core`] (shape, strides and a
/// [`Manager`](crate::Manager) that keeps the memory alive).
/// It is *always* a view: it never owns its elements directly, and cloning it
/// never copies data.
///
/// Type parameters:
///
/// - `K`: the handle kind, [`Shallow`] for [`Array`] or [`Deep`] for
///   [`ArrayRef`]
/// - `T`: the element type
/// - `N`: the number of axes, a [`Rank`](crate::rank::Rank) from `R1` to `R6`
/// - `C`: the number of trailing axes guaranteed to be row-major contiguous
///   (RMC), from `R0` to `N`
///
/// Every method is available for every valid `(N, C)` pair. Rank zero and
/// `C > N` do not implement [`ArrayTraits`](crate::ArrayTraits), so no
/// method of such a type can be called.
///
/// ## Contents
///
/// + [Array and ArrayRef](#array-and-arrayref)
/// + [Indexing and Dimension](#indexing-and-dimension)
/// + [Row-major contiguity](#row-major-contiguity)
/// + [Element access](#element-access)
/// + [Ownership](#ownership)
///
/// ## Array and ArrayRef
///
/// `Array` and `ArrayRef` are the same data structure and convert freely
/// into each other without copying. They differ in what assignment means:
///
/// - `Array` is a shallow handle. Assigning one `Array` to another
///   (`clone`) makes both refer to the same elements.
/// - `ArrayRef` is a deep reference. Its [`assign`](ArrayBase::assign),
///   [`fill`](ArrayBase::fill) and compound assignment operators (`+=` and
///   friends) write elements into the memory it refers to.
///
/// Indexing and iterating an array of more than one dimension produces
/// `ArrayRef` sub-views, so `a.at(1).fill(0)` writes into `a`.
///
/// ## Indexing and Dimension
///
/// `a.at(i)` selects index `i` along the first axis and returns an
/// `N - 1`-dimensional `ArrayRef`, or a reference to the element for a
/// one-dimensional array. A full index `[i, j, k]` reaches an element
/// directly with `a[[i, j, k]]` or [`.elem()`](ArrayBase::elem).
///
/// Sub-views of any shape are made with [`.view()`](ArrayBase::view) and the
/// [`view!`](crate::view!) macro.
///
/// ## Row-major contiguity
///
/// The `C` parameter is a compile-time promise that the last `C` axes are
/// laid out as in a row-major (C order) array. One-dimensional arrays with
/// `C = R1` iterate by plain pointer increments; view operations that may
/// break contiguity lower `C` in their result type. A promise can be
/// weakened with [`.relaxed()`](ArrayBase::relaxed), never strengthened.
///
/// ## Element access
///
/// Views can alias each other freely, so elements are reached through
/// [`ElemCell`](crate::ElemCell), a transparent wrapper of
/// `Cell<T>`: `a[[1, 2]].get()` reads and `a[[1, 2]].set(x)` writes.
/// Element views are therefore neither `Send` nor `Sync`.
///
/// ## Ownership
///
/// The data pointer stays valid for as long as the manager in the core is
/// alive. Arrays built by the safe constructors own their buffer through the
/// manager. [`from_raw_parts`](ArrayBase::from_raw_parts) attaches any
/// manager to external memory, and the caller upholds the contract.
pub struct ArrayBase<K, T, N, C> {
    /// Pointer to the element at index zero
    pub(crate) ptr: NonNull<T>,
    pub(crate) core: Core<N>,
    pub(crate) kind: PhantomData<(K, C)>,
}

/// Shallow array handle: copying it shares the elements.
///
/// See [`ArrayBase`] for the methods.
pub type Array<T, N, C = R0> = ArrayBase<Shallow, T, N, C>;

/// Deep array reference: assignment writes elements.
///
/// See [`ArrayBase`] for the methods.
pub type ArrayRef<T, N, C = R0> = ArrayBase<Deep, T, N, C>;

/// Kind marker of [`Array`]
#[derive(Copy, Clone, Debug)]
pub enum Shallow {}

/// Kind marker of [`ArrayRef`]
#[derive(Copy, Clone, Debug)]
pub enum Deep {}

/// The handle kind of an [`ArrayBase`], [`Shallow`] or [`Deep`].
///
/// This trait is sealed.
pub trait Kind: private::Sealed + 'static {
    #[doc(hidden)]
    const IS_DEEP: bool;
}

impl Kind for Shallow {
    const IS_DEEP: bool = false;
}

impl Kind for Deep {
    const IS_DEEP: bool = true;
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Shallow {}
    impl Sealed for super::Deep {}
}

impl<K, T, N, C> ArrayBase<K, T, N, C> {
    /// Assemble an array from its parts.
    ///
    /// ## Safety
    ///
    /// `ptr` and `core` must describe valid elements kept alive by the
    /// core's manager, and the last `C` axes must be row-major contiguous.
    #[inline(always)]
    pub(crate) unsafe fn from_parts(ptr: NonNull<T>, core: Core<N>) -> Self {
        ArrayBase {
            ptr,
            core,
            kind: PhantomData,
        }
    }

    /// Reinterpret the handle with another kind and RMC guarantee.
    ///
    /// The caller checks that the new guarantee is not stronger.
    #[inline(always)]
    pub(crate) fn retype<K2, C2>(&self) -> ArrayBase<K2, T, N, C2> {
        ArrayBase {
            ptr: self.ptr,
            core: self.core.clone(),
            kind: PhantomData,
        }
    }
}

impl<K, T, N, C> Clone for ArrayBase<K, T, N, C> {
    /// Return a new handle to the same elements.
    ///
    /// No element is copied; see [`.copy()`](ArrayBase::copy) for a deep
    /// copy.
    fn clone(&self) -> Self {
        self.retype()
    }
}

/// Offset `ptr` by `offset` elements.
///
/// Empty views may point past their allocation, so the offset wraps; the
/// result is only dereferenced for in-bounds indices.
///
/// ## Safety
///
/// The result must not be null.
#[inline(always)]
pub(crate) unsafe fn offset_ptr<T>(ptr: NonNull<T>, offset: Ixs) -> NonNull<T> {
    NonNull::new_unchecked(ptr.as_ptr().wrapping_offset(offset))
}
