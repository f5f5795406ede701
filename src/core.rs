// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Dimension metadata shared between views.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::manager::Manager;
use crate::rank::{Positive, Rank};
use crate::{Ix, Ixs};

/// Size and stride of one axis.
///
/// Strides are measured in elements, not bytes, and may be negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Number of elements along the axis
    pub size: Ix,
    /// Distance in elements between consecutive indices along the axis
    pub stride: Ixs,
}

impl Extent {
    /// Create a new extent
    #[inline]
    pub const fn new(size: Ix, stride: Ixs) -> Self {
        Extent { size, stride }
    }
}

struct CoreRepr {
    extents: Box<[Extent]>,
    manager: Manager,
}

/// Shape, strides and ownership handle of an `N`-dimensional view.
///
/// A `Core` is a cheap, `Arc`-shared record; cloning it never copies the
/// extents. A `Core<N>` reads the trailing `N` extents of its record, which
/// lets [`.reduced()`](Core::reduced) produce the metadata of the
/// `N - 1`-dimensional sub-views without allocating.
///
/// ```
/// use ndview::{Core, Manager, R2};
///
/// let core = Core::<R2>::contiguous([3, 4], Manager::unmanaged());
/// assert_eq!(core.strides(), [4, 1]);
/// assert_eq!(core.num_elements(), 12);
/// assert_eq!(core.offset_of(&[2, 1]), 9);
/// assert_eq!(core.reduced().shape(), [4]);
/// ```
pub struct Core<N> {
    repr: Arc<CoreRepr>,
    rank: PhantomData<N>,
}

impl<N> Clone for Core<N> {
    fn clone(&self) -> Self {
        Core {
            repr: Arc::clone(&self.repr),
            rank: PhantomData,
        }
    }
}

impl<N: Rank> Core<N> {
    /// Create a core from explicit sizes and strides.
    ///
    /// No validation is done: sizes are non-negative by type, and strides
    /// may be anything.
    pub fn new(shape: N::Index, strides: N::Strides, manager: Manager) -> Self {
        let extents = shape
            .as_ref()
            .iter()
            .zip(strides.as_ref())
            .map(|(&size, &stride)| Extent { size, stride })
            .collect();
        Core::from_extents(extents, manager)
    }

    /// Create a core with row-major contiguous strides for `shape`.
    pub fn contiguous(shape: N::Index, manager: Manager) -> Self {
        Core::new(shape, default_strides::<N>(&shape), manager)
    }

    pub(crate) fn from_extents(extents: Vec<Extent>, manager: Manager) -> Self {
        debug_assert_eq!(extents.len(), N::N);
        Core {
            repr: Arc::new(CoreRepr {
                extents: extents.into_boxed_slice(),
                manager,
            }),
            rank: PhantomData,
        }
    }

    /// The extents of all `N` axes, outermost first.
    #[inline]
    pub fn extents(&self) -> &[Extent] {
        let all = &self.repr.extents;
        &all[all.len() - N::N..]
    }

    /// The extent of `axis`.
    ///
    /// **Panics** if `axis` is out of bounds.
    #[inline]
    pub fn extent(&self, axis: usize) -> Extent {
        self.extents()[axis]
    }

    /// Number of elements along `axis`.
    ///
    /// **Panics** if `axis` is out of bounds.
    #[inline]
    pub fn size(&self, axis: usize) -> Ix {
        self.extent(axis).size
    }

    /// Stride of `axis`, in elements.
    ///
    /// **Panics** if `axis` is out of bounds.
    #[inline]
    pub fn stride(&self, axis: usize) -> Ixs {
        self.extent(axis).stride
    }

    /// The sizes of all axes.
    pub fn shape(&self) -> N::Index {
        let mut shape = N::Index::default();
        for (s, e) in shape.as_mut().iter_mut().zip(self.extents()) {
            *s = e.size;
        }
        shape
    }

    /// The strides of all axes.
    pub fn strides(&self) -> N::Strides {
        let mut strides = N::Strides::default();
        for (s, e) in strides.as_mut().iter_mut().zip(self.extents()) {
            *s = e.stride;
        }
        strides
    }

    /// Total number of elements, the product of all sizes.
    pub fn num_elements(&self) -> usize {
        self.extents().iter().map(|e| e.size).product()
    }

    /// Linear offset (in elements) of the element at `index`.
    ///
    /// The index is not bounds checked.
    #[inline]
    pub fn offset_of(&self, index: &N::Index) -> Ixs {
        self.extents()
            .iter()
            .zip(index.as_ref())
            .fold(0, |offset, (e, &i)| offset + stride_offset(i, e.stride))
    }

    /// Return `true` if `index` lies within the shape.
    #[inline]
    pub fn contains(&self, index: &N::Index) -> bool {
        self.extents()
            .iter()
            .zip(index.as_ref())
            .all(|(e, &i)| i < e.size)
    }

    /// Count the trailing axes whose strides are those of a row-major
    /// contiguous array.
    ///
    /// This is the run-time counterpart of the RMC parameter of an array;
    /// the compile-time guarantee never exceeds it.
    pub fn row_major_contiguous(&self) -> usize {
        let mut expected: Ixs = 1;
        let mut count = 0;
        for e in self.extents().iter().rev() {
            if e.stride != expected {
                break;
            }
            count += 1;
            expected = expected.wrapping_mul(e.size as Ixs);
        }
        count
    }

    /// The ownership handle of the memory this core describes.
    #[inline]
    pub fn manager(&self) -> &Manager {
        &self.repr.manager
    }

    /// Number of live handles sharing this core record.
    pub fn use_count(&self) -> usize {
        Arc::strong_count(&self.repr)
    }

    /// Build a new core with the same manager and the given extents.
    pub(crate) fn with_extents<M: Rank>(&self, extents: Vec<Extent>) -> Core<M> {
        Core::from_extents(extents, self.manager().clone())
    }

    /// Build a new core whose axis `i` is axis `order[i]` of this one.
    pub(crate) fn permuted(&self, order: &[usize]) -> Core<N> {
        let extents = order.iter().map(|&axis| self.extent(axis)).collect();
        self.with_extents(extents)
    }
}

impl<N: Positive> Core<N> {
    /// The core of the sub-views along axis 0.
    ///
    /// The reduced core shares this core's record.
    #[inline]
    pub fn reduced(&self) -> Core<N::Smaller> {
        Core {
            repr: Arc::clone(&self.repr),
            rank: PhantomData,
        }
    }
}

impl<N: Rank> fmt::Debug for Core<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("shape", &self.shape())
            .field("strides", &self.strides())
            .field("manager", self.manager())
            .finish()
    }
}

/// Return the row-major strides for `shape`.
pub(crate) fn default_strides<N: Rank>(shape: &N::Index) -> N::Strides {
    let mut strides = N::Strides::default();
    let mut cum: Ixs = 1;
    for (s, &size) in strides
        .as_mut()
        .iter_mut()
        .rev()
        .zip(shape.as_ref().iter().rev())
    {
        *s = cum;
        cum = cum.wrapping_mul(size as Ixs);
    }
    strides
}

/// Compute the product of all sizes, or `None` if it overflows `isize`.
pub(crate) fn size_of_shape_checked(shape: &[Ix]) -> Option<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &size| acc.checked_mul(size))
        .filter(|&n| n <= isize::MAX as usize)
}

/// Offset of index `n` along an axis with stride `stride`.
#[inline(always)]
pub(crate) fn stride_offset(n: Ix, stride: Ixs) -> Ixs {
    (n as Ixs).wrapping_mul(stride)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::{R1, R3};

    #[test]
    fn contiguous_strides() {
        let core = Core::<R3>::contiguous([2, 3, 4], Manager::unmanaged());
        assert_eq!(core.shape(), [2, 3, 4]);
        assert_eq!(core.strides(), [12, 4, 1]);
        assert_eq!(core.row_major_contiguous(), 3);
        assert_eq!(core.offset_of(&[1, 2, 3]), 23);
        assert!(core.contains(&[1, 2, 3]));
        assert!(!core.contains(&[2, 0, 0]));
    }

    #[test]
    fn reduced_shares_record() {
        let core = Core::<R3>::new([2, 3, 4], [1, 2, 6], Manager::unmanaged());
        let r = core.reduced();
        assert_eq!(core.use_count(), 2);
        assert_eq!(r.shape(), [3, 4]);
        assert_eq!(r.strides(), [2, 6]);
        let rr = r.reduced();
        assert_eq!(rr.shape(), [4]);
        assert_eq!(rr.extent(0), Extent::new(4, 6));
        assert_eq!(core.use_count(), 3);
        assert_eq!(core.row_major_contiguous(), 0);
    }

    #[test]
    fn partial_contiguity() {
        // inner two axes canonical, outer axis skips every other block
        let core = Core::<R3>::new([2, 3, 4], [24, 4, 1], Manager::unmanaged());
        assert_eq!(core.row_major_contiguous(), 2);
        let core = Core::<R1>::new([5], [-1], Manager::unmanaged());
        assert_eq!(core.row_major_contiguous(), 0);
        assert_eq!(core.offset_of(&[4]), -4);
    }

    #[test]
    fn checked_size() {
        assert_eq!(size_of_shape_checked(&[2, 3, 4]), Some(24));
        assert_eq!(size_of_shape_checked(&[]), Some(1));
        assert_eq!(size_of_shape_checked(&[usize::MAX, 2]), None);
        assert_eq!(size_of_shape_checked(&[usize::MAX / 2 + 1]), None);
    }
}
