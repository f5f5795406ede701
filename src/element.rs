// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cell::Cell;
use std::fmt;
use std::ops::Deref;

/// A reference target for one array element.
///
/// Views are shallow handles: any number of them may alias the same memory,
/// so element access goes through a transparent wrapper of
/// [`Cell<T>`](std::cell::Cell). `ElemCell` derefs to `Cell`, so `get`,
/// `set`, `replace` and the other cell methods are available.
///
/// ```
/// use ndview::{Array, R1};
///
/// let a: Array<i32, R1, R1> = Array::from_vec([3], vec![1, 2, 3]).unwrap();
/// let b = a.clone();
/// a[[1]].set(20);
/// assert_eq!(b[[1]].get(), 20);
/// assert_eq!(b[[1]], 20);
/// ```
#[repr(transparent)]
#[derive(Default)]
pub struct ElemCell<T>(Cell<T>);

impl<T> ElemCell<T> {
    /// Create a new cell with the given value
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        ElemCell(Cell::new(value))
    }

    /// Return the inner value
    pub fn into_inner(self) -> T {
        Cell::into_inner(self.0)
    }

    /// Reinterpret an element pointer as a cell reference.
    ///
    /// ## Safety
    ///
    /// `ptr` must point to a live, initialized element that stays valid for
    /// `'a`, and the element must only be accessed through cells or raw
    /// pointers while the reference is alive.
    #[inline(always)]
    pub(crate) unsafe fn from_ptr<'a>(ptr: *mut T) -> &'a ElemCell<T> {
        &*(ptr as *const ElemCell<T>)
    }
}

impl<T> Deref for ElemCell<T> {
    type Target = Cell<T>;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> PartialEq for ElemCell<T>
where
    T: Copy + PartialEq,
{
    fn eq(&self, rhs: &Self) -> bool {
        self.get() == rhs.get()
    }
}

impl<T> PartialEq<T> for ElemCell<T>
where
    T: Copy + PartialEq,
{
    fn eq(&self, rhs: &T) -> bool {
        self.get() == *rhs
    }
}

impl<T> fmt::Debug for ElemCell<T>
where
    T: Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.get().fmt(f)
    }
}

impl<T> fmt::Display for ElemCell<T>
where
    T: Copy + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.get().fmt(f)
    }
}
