// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice::{self, Iter as SliceIter};

use crate::core::{stride_offset, Core};
use crate::element::ElemCell;
use crate::rank::Rank;
use crate::{Ix, Ixs};

/// An iterator over all elements of an array, in row-major order.
///
/// Iterator element type is `&'a ElemCell<T>`.
///
/// See [`.elements()`](crate::ArrayBase::elements) for more information.
pub struct Elements<'a, T, N: Rank> {
    inner: ElementsRepr<SliceIter<'a, ElemCell<T>>, ElementsBase<'a, T, N>>,
}

#[derive(Clone)]
enum ElementsRepr<S, C> {
    Slice(S),
    Counted(C),
}

/// Counted iterator walking a multi-index from both ends.
struct ElementsBase<'a, T, N: Rank> {
    ptr: NonNull<T>,
    shape: N::Index,
    strides: N::Strides,
    front: N::Index,
    back: N::Index,
    len: usize,
    life: PhantomData<&'a ElemCell<T>>,
}

clone_bounds!(
    ['a, T, N: Rank]
    ElementsBase['a, T, N] {
        @copy {
            ptr,
            shape,
            strides,
            front,
            back,
            len,
            life,
        }
    }
);

clone_bounds!(
    ['a, T, N: Rank]
    Elements['a, T, N] {
        @copy {
        }
        inner,
    }
);

impl<'a, T, N: Rank> Elements<'a, T, N> {
    /// ## Safety
    ///
    /// `ptr` and `core` must describe valid elements alive for `'a`; if
    /// `contiguous` is true, they must form one row-major block.
    pub(crate) unsafe fn new(ptr: NonNull<T>, core: &Core<N>, contiguous: bool) -> Self {
        let len = core.num_elements();
        let inner = if contiguous {
            let cells = ptr.as_ptr() as *const ElemCell<T>;
            ElementsRepr::Slice(slice::from_raw_parts(cells, len).iter())
        } else {
            let shape = core.shape();
            let mut back = shape;
            for b in back.as_mut() {
                *b = b.saturating_sub(1);
            }
            ElementsRepr::Counted(ElementsBase {
                ptr,
                shape,
                strides: core.strides(),
                front: N::Index::default(),
                back,
                len,
                life: PhantomData,
            })
        };
        Elements { inner }
    }
}

impl<'a, T, N: Rank> ElementsBase<'a, T, N> {
    #[inline]
    fn elem(&self, index: &N::Index) -> &'a ElemCell<T> {
        let offset = index
            .as_ref()
            .iter()
            .zip(self.strides.as_ref())
            .fold(0, |acc: Ixs, (&i, &s)| acc + stride_offset(i, s));
        unsafe { ElemCell::from_ptr(self.ptr.as_ptr().offset(offset)) }
    }
}

/// Step `index` to the next index in row-major order.
#[inline]
fn increment(index: &mut [Ix], shape: &[Ix]) {
    for (i, &size) in index.iter_mut().zip(shape).rev() {
        *i += 1;
        if *i < size {
            return;
        }
        *i = 0;
    }
}

/// Step `index` to the previous index in row-major order.
#[inline]
fn decrement(index: &mut [Ix], shape: &[Ix]) {
    for (i, &size) in index.iter_mut().zip(shape).rev() {
        if *i > 0 {
            *i -= 1;
            return;
        }
        *i = size.saturating_sub(1);
    }
}

impl<'a, T, N: Rank> Iterator for ElementsBase<'a, T, N> {
    type Item = &'a ElemCell<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let elt = self.elem(&self.front);
        self.len -= 1;
        increment(self.front.as_mut(), self.shape.as_ref());
        Some(elt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T, N: Rank> DoubleEndedIterator for ElementsBase<'a, T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let elt = self.elem(&self.back);
        self.len -= 1;
        decrement(self.back.as_mut(), self.shape.as_ref());
        Some(elt)
    }
}

macro_rules! either {
    ($value:expr, $inner:pat => $result:expr) => {
        match $value {
            ElementsRepr::Slice($inner) => $result,
            ElementsRepr::Counted($inner) => $result,
        }
    };
}

macro_rules! either_mut {
    ($value:expr, $inner:ident => $result:expr) => {
        match $value {
            ElementsRepr::Slice(ref mut $inner) => $result,
            ElementsRepr::Counted(ref mut $inner) => $result,
        }
    };
}

impl<'a, T, N: Rank> Iterator for Elements<'a, T, N> {
    type Item = &'a ElemCell<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        either_mut!(self.inner, iter => iter.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        either!(self.inner, ref iter => iter.size_hint())
    }

    fn fold<Acc, G>(self, init: Acc, g: G) -> Acc
    where
        G: FnMut(Acc, Self::Item) -> Acc,
    {
        either!(self.inner, iter => iter.fold(init, g))
    }
}

impl<'a, T, N: Rank> DoubleEndedIterator for Elements<'a, T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        either_mut!(self.inner, iter => iter.next_back())
    }
}

impl<'a, T, N: Rank> ExactSizeIterator for Elements<'a, T, N> {}

impl<'a, T, N: Rank> FusedIterator for Elements<'a, T, N> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::Manager;
    use crate::rank::R3;

    #[test]
    fn odometer() {
        let shape = [2, 1, 3];
        let mut ix = [0, 0, 0];
        let mut seen = vec![ix];
        for _ in 0..5 {
            increment(&mut ix, &shape);
            seen.push(ix);
        }
        assert_eq!(seen[3], [1, 0, 0]);
        assert_eq!(seen[5], [1, 0, 2]);
        for _ in 0..5 {
            decrement(&mut ix, &shape);
        }
        assert_eq!(ix, [0, 0, 0]);
    }

    #[test]
    fn counted_matches_slice() {
        let mut data: Vec<u32> = (0..24).collect();
        let ptr = NonNull::new(data.as_mut_ptr()).unwrap();
        let core = Core::<R3>::contiguous([2, 3, 4], Manager::unmanaged());
        let fast = unsafe { Elements::new(ptr, &core, true) };
        let slow = unsafe { Elements::new(ptr, &core, false) };
        assert_eq!(slow.len(), 24);
        itertools::assert_equal(fast.map(|c| c.get()), slow.clone().map(|c| c.get()));
        itertools::assert_equal(slow.rev().map(|c| c.get()), (0..24).rev());
    }

    #[test]
    fn meet_in_the_middle() {
        let mut data: Vec<u32> = (0..6).collect();
        let ptr = NonNull::new(data.as_mut_ptr()).unwrap();
        // transposed 2x3
        let core = Core::<crate::rank::R2>::new([3, 2], [1, 3], Manager::unmanaged());
        let mut it = unsafe { Elements::new(ptr, &core, false) };
        assert_eq!(it.next().map(|c| c.get()), Some(0));
        assert_eq!(it.next_back().map(|c| c.get()), Some(5));
        assert_eq!(it.next().map(|c| c.get()), Some(3));
        assert_eq!(it.next_back().map(|c| c.get()), Some(2));
        assert_eq!(it.len(), 2);
        itertools::assert_equal(it.map(|c| c.get()), vec![1, 4]);
    }
}
