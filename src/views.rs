// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sub-view construction.
//!
//! A [`View`] is a sequence of selectors, one per leading axis of the array
//! it is applied to:
//!
//! | selector | effect on its axis | axes kept |
//! |----------|--------------------|-----------|
//! | [`Full`] | whole axis | 1 |
//! | [`Range`] | `start..stop` | 1 |
//! | [`Slice`] | `start..stop` with a step | 1 |
//! | [`Scalar`] | a single index | 0 |
//!
//! Axes past the end of the sequence are kept whole. Applying a sequence
//! longer than the rank of the array does not compile.
//!
//! The result type of [`.view()`](crate::ArrayBase::view) is computed at
//! compile time, including its row-major contiguity: selecting a range of
//! an axis keeps the contiguity of that axis and the ones after it, a
//! strided slice or a single index only that of the axes after it.
//!
//! ```
//! use ndview::prelude::*;
//!
//! let a: Array<i32, R2, R2> = Array::from_shape_fn([3, 4], |[i, j]| (10 * i + j) as i32);
//!
//! // rows 1.., every second column
//! let v: ArrayRef<i32, R2, R0> = a.view(view![1.., ..;2]);
//! assert_eq!(v.shape(), [2, 2]);
//! assert_eq!(v.to_vec(), vec![10, 12, 20, 22]);
//!
//! // the same, built with methods
//! let w = a.view(view().range(1, 3).slice(0, 4, 2));
//! assert_eq!(v, w);
//!
//! // row 2, contiguous
//! let row: ArrayRef<i32, R1, R1> = a.view(view![2]);
//! assert_eq!(row.to_vec(), vec![20, 21, 22, 23]);
//! ```

use std::fmt;
use std::ops::{Range as StdRange, RangeFrom, RangeFull, RangeInclusive, RangeTo};

use num_integer::Integer;

use crate::core::{stride_offset, Core, Extent};
use crate::rank::{Positive, RMin, Rank};
use crate::{Ix, Ixs};

/// Select a whole axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Full;

/// Select the indices `start..stop` of an axis.
///
/// `stop: None` extends the range to the end of the axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Ix,
    pub stop: Option<Ix>,
}

/// Select every `step`th index of `start..stop`.
///
/// `stop: None` extends the slice to the end of the axis. The step is
/// unsigned: slices never reverse an axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: Ix,
    pub stop: Option<Ix>,
    pub step: Ix,
}

/// Select a single index, removing the axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scalar(pub Ix);

impl Range {
    /// Create a new `Range`
    #[inline]
    pub fn new(start: Ix, stop: Ix) -> Self {
        Range {
            start,
            stop: Some(stop),
        }
    }
}

impl Slice {
    /// Create a new `Slice`.
    ///
    /// `step` must be at least one; this is checked when the slice is
    /// applied.
    #[inline]
    pub fn new(start: Ix, stop: Ix, step: Ix) -> Self {
        Slice {
            start,
            stop: Some(stop),
            step,
        }
    }

    /// Create a `Slice` from a range and a step; used by [`view!`](crate::view!).
    #[inline]
    pub fn from_range<R: SliceBounds>(range: R, step: Ix) -> Self {
        let (start, stop) = range.bounds();
        Slice { start, stop, step }
    }
}

/// Accumulates the new data offset and extents while a view is applied.
#[doc(hidden)]
#[derive(Debug)]
pub struct CoreTransformer {
    offset: Ixs,
    extents: Vec<Extent>,
}

impl CoreTransformer {
    fn new(ndim: usize) -> Self {
        CoreTransformer {
            offset: 0,
            extents: Vec::with_capacity(ndim),
        }
    }

    #[inline]
    fn advance(&mut self, n: Ix, stride: Ixs) {
        self.offset += stride_offset(n, stride);
    }

    #[inline]
    fn push(&mut self, extent: Extent) {
        self.extents.push(extent);
    }
}

/// A single-axis selector: [`Full`], [`Range`], [`Slice`] or [`Scalar`].
pub trait Selector: Copy + fmt::Debug {
    /// Consume the `input` axis, advance the data offset and emit zero or
    /// one output axes.
    ///
    /// **Panics** if the selector does not fit the axis.
    #[doc(hidden)]
    fn transform(&self, t: &mut CoreTransformer, input: Extent);
}

impl Selector for Full {
    #[inline]
    fn transform(&self, t: &mut CoreTransformer, input: Extent) {
        t.push(input);
    }
}

impl Selector for Range {
    fn transform(&self, t: &mut CoreTransformer, input: Extent) {
        let stop = self.stop.unwrap_or(input.size);
        ndassert!(
            self.start <= stop && stop <= input.size,
            "Range {}..{} out of bounds for axis of length {}",
            self.start,
            stop,
            input.size
        );
        t.advance(self.start, input.stride);
        t.push(Extent::new(stop - self.start, input.stride));
    }
}

impl Selector for Slice {
    fn transform(&self, t: &mut CoreTransformer, input: Extent) {
        let stop = self.stop.unwrap_or(input.size);
        ndassert!(self.step >= 1, "Slice step must be at least one");
        ndassert!(
            self.start <= stop && stop <= input.size,
            "Slice {}..{} out of bounds for axis of length {}",
            self.start,
            stop,
            input.size
        );
        let size = Integer::div_ceil(&(stop - self.start), &self.step);
        // a step past the end selects at most one index
        let stride = if size > 1 {
            input.stride * self.step as Ixs
        } else {
            input.stride
        };
        t.advance(self.start, input.stride);
        t.push(Extent::new(size, stride));
    }
}

impl Selector for Scalar {
    fn transform(&self, t: &mut CoreTransformer, input: Extent) {
        ndassert!(
            self.0 < input.size,
            "index {} out of bounds for axis of length {}",
            self.0,
            input.size
        );
        t.advance(self.0, input.stride);
    }
}

/// Result rank and RMC of applying one selector.
///
/// `Nd` and `Rmc` are the rank and RMC of the view so far, `I` the number of
/// input axes left, including the one this selector consumes.
pub trait Dimensions<Nd, Rmc, I> {
    /// Rank after this selector
    type Nd: Rank;
    /// RMC after this selector
    type Rmc: Rank;
}

impl<Nd: Rank, Rmc: Rank, I> Dimensions<Nd, Rmc, I> for Full {
    type Nd = Nd;
    type Rmc = Rmc;
}

impl<Nd: Rank, Rmc, I> Dimensions<Nd, Rmc, I> for Range
where
    Rmc: RMin<I>,
{
    type Nd = Nd;
    type Rmc = <Rmc as RMin<I>>::Output;
}

impl<Nd: Rank, Rmc, I: Rank> Dimensions<Nd, Rmc, I> for Slice
where
    Rmc: RMin<I::Smaller>,
{
    type Nd = Nd;
    type Rmc = <Rmc as RMin<I::Smaller>>::Output;
}

impl<Nd: Rank, Rmc, I: Rank> Dimensions<Nd, Rmc, I> for Scalar
where
    Rmc: RMin<I::Smaller>,
{
    type Nd = Nd::Smaller;
    type Rmc = <Rmc as RMin<I::Smaller>>::Output;
}

/// Result rank and RMC of a whole selector sequence.
///
/// Implemented for `()` (the end of a sequence, keeping the remaining axes
/// whole) and for `(H, T)` with a selector `H` followed by the sequence `T`.
pub trait ViewTraits<Nd, Rmc, I> {
    /// Rank of the resulting view
    type Nd: Rank;
    /// RMC of the resulting view
    type Rmc: Rank;

    /// Apply the sequence to the `input` axes.
    #[doc(hidden)]
    fn apply(&self, t: &mut CoreTransformer, input: &[Extent]);
}

impl<Nd: Rank, Rmc: Rank, I> ViewTraits<Nd, Rmc, I> for () {
    type Nd = Nd;
    type Rmc = Rmc;

    fn apply(&self, t: &mut CoreTransformer, input: &[Extent]) {
        for &extent in input {
            Full.transform(t, extent);
        }
    }
}

impl<Nd, Rmc, I, H, T> ViewTraits<Nd, Rmc, I> for (H, T)
where
    I: Positive,
    H: Selector + Dimensions<Nd, Rmc, I>,
    T: ViewTraits<H::Nd, H::Rmc, I::Smaller>,
{
    type Nd = T::Nd;
    type Rmc = T::Rmc;

    fn apply(&self, t: &mut CoreTransformer, input: &[Extent]) {
        if let Some((&first, rest)) = input.split_first() {
            self.0.transform(t, first);
            self.1.apply(t, rest);
        }
    }
}

/// Append a selector to the end of a sequence.
pub trait Push<X> {
    /// The longer sequence
    type Output;

    fn push(self, x: X) -> Self::Output;
}

impl<X> Push<X> for () {
    type Output = (X, ());

    #[inline]
    fn push(self, x: X) -> Self::Output {
        (x, ())
    }
}

impl<X, H, T> Push<X> for (H, T)
where
    T: Push<X>,
{
    type Output = (H, T::Output);

    #[inline]
    fn push(self, x: X) -> Self::Output {
        (self.0, self.1.push(x))
    }
}

/// A sequence of selectors, applied with
/// [`.view()`](crate::ArrayBase::view).
///
/// Start one with [`view()`] or the [`view!`](crate::view!) macro.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct View<S> {
    seq: S,
}

/// Start an empty selector sequence.
///
/// An empty sequence selects the whole array.
#[inline]
pub fn view() -> View<()> {
    View { seq: () }
}

impl<S> View<S> {
    /// Append any selector.
    #[inline]
    pub fn push<X: Selector>(self, x: X) -> View<S::Output>
    where
        S: Push<X>,
    {
        View {
            seq: self.seq.push(x),
        }
    }

    /// Append [`Full`].
    #[inline]
    pub fn full(self) -> View<S::Output>
    where
        S: Push<Full>,
    {
        self.push(Full)
    }

    /// Append [`Range`] `start..stop`.
    #[inline]
    pub fn range(self, start: Ix, stop: Ix) -> View<S::Output>
    where
        S: Push<Range>,
    {
        self.push(Range::new(start, stop))
    }

    /// Append [`Slice`] `start..stop` with step `step`.
    #[inline]
    pub fn slice(self, start: Ix, stop: Ix, step: Ix) -> View<S::Output>
    where
        S: Push<Slice>,
    {
        self.push(Slice::new(start, stop, step))
    }

    /// Append [`Scalar`] `n`.
    #[inline]
    pub fn scalar(self, n: Ix) -> View<S::Output>
    where
        S: Push<Scalar>,
    {
        self.push(Scalar(n))
    }

    /// Compute the data offset and extents of this view of `core`.
    pub(crate) fn resolve<N, C>(&self, core: &Core<N>) -> (Ixs, Vec<Extent>)
    where
        N: Rank,
        S: ViewTraits<N, C, N>,
    {
        let mut t = CoreTransformer::new(N::N);
        self.seq.apply(&mut t, core.extents());
        (t.offset, t.extents)
    }
}

impl<S: fmt::Debug> fmt::Debug for View<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("View").field(&self.seq).finish()
    }
}

/// Start and optional stop of a range expression.
pub trait SliceBounds {
    fn bounds(self) -> (Ix, Option<Ix>);
}

impl SliceBounds for RangeFull {
    #[inline]
    fn bounds(self) -> (Ix, Option<Ix>) {
        (0, None)
    }
}

impl SliceBounds for StdRange<Ix> {
    #[inline]
    fn bounds(self) -> (Ix, Option<Ix>) {
        (self.start, Some(self.end))
    }
}

impl SliceBounds for RangeFrom<Ix> {
    #[inline]
    fn bounds(self) -> (Ix, Option<Ix>) {
        (self.start, None)
    }
}

impl SliceBounds for RangeTo<Ix> {
    #[inline]
    fn bounds(self) -> (Ix, Option<Ix>) {
        (0, Some(self.end))
    }
}

impl SliceBounds for RangeInclusive<Ix> {
    #[inline]
    fn bounds(self) -> (Ix, Option<Ix>) {
        (*self.start(), Some(*self.end() + 1))
    }
}

/// Conversion of range expressions and indices into selectors, used by
/// [`view!`](crate::view!).
pub trait IntoSelector {
    type Selector: Selector;

    fn into_selector(self) -> Self::Selector;
}

impl IntoSelector for RangeFull {
    type Selector = Full;

    #[inline]
    fn into_selector(self) -> Full {
        Full
    }
}

macro_rules! impl_range_into_selector {
    ($($range:ty),*) => {
        $(
            impl IntoSelector for $range {
                type Selector = Range;

                #[inline]
                fn into_selector(self) -> Range {
                    let (start, stop) = self.bounds();
                    Range { start, stop }
                }
            }
        )*
    };
}

impl_range_into_selector!(StdRange<Ix>, RangeFrom<Ix>, RangeTo<Ix>, RangeInclusive<Ix>);

impl IntoSelector for Ix {
    type Selector = Scalar;

    #[inline]
    fn into_selector(self) -> Scalar {
        Scalar(self)
    }
}

macro_rules! impl_signed_into_selector {
    ($($index:ty),*) => {
        $(
            impl IntoSelector for $index {
                type Selector = Scalar;

                /// **Panics** if the index is negative.
                #[inline]
                fn into_selector(self) -> Scalar {
                    ndassert!(self >= 0, "negative index {} in view", self);
                    Scalar(self as Ix)
                }
            }
        )*
    };
}

impl_signed_into_selector!(isize, i32);

macro_rules! impl_selector_into_selector {
    ($($sel:ty),*) => {
        $(
            impl IntoSelector for $sel {
                type Selector = $sel;

                #[inline]
                fn into_selector(self) -> $sel {
                    self
                }
            }
        )*
    };
}

impl_selector_into_selector!(Full, Range, Slice, Scalar);

/// Build a [`View`] from range and index expressions.
///
/// `view![]` takes a list of selectors, separated by comma, with an optional
/// trailing comma; each applies to one leading axis of the array.
///
/// + `..` selects the whole axis ([`Full`](crate::views::Full))
/// + `a..b`, `a..`, `..b`, `a..=b` select a range
///   ([`Range`](crate::views::Range))
/// + `r;s` selects every `s`th index of the range `r`
///   ([`Slice`](crate::views::Slice))
/// + `i` selects a single index and removes the axis
///   ([`Scalar`](crate::views::Scalar))
/// + a selector value is used as is
///
/// Indices and steps are unsigned; negative indices panic.
///
/// ```
/// use ndview::prelude::*;
///
/// let a: Array<i32, R1, R1> = Array::from_vec([10], (0..10).collect()).unwrap();
///
/// let r: ArrayRef<i32, R1, R1> = a.view(view![2..7]);
/// assert_eq!(r.to_vec(), vec![2, 3, 4, 5, 6]);
///
/// let s: ArrayRef<i32, R1, R0> = a.view(view![2..7;2]);
/// assert_eq!(s.to_vec(), vec![2, 4, 6]);
/// ```
#[macro_export]
macro_rules! view {
    // end of list, or trailing comma
    (@parse $acc:expr ;) => {
        $acc
    };
    // convert a..b;c into Slice, final item
    (@parse $acc:expr ; $r:expr;$s:expr) => {
        $acc.push($crate::view!(@convert $r, $s))
    };
    // convert a..b into a selector, final item
    (@parse $acc:expr ; $r:expr) => {
        $acc.push($crate::view!(@convert $r))
    };
    // convert a..b;c into Slice
    (@parse $acc:expr ; $r:expr;$s:expr, $($t:tt)*) => {
        $crate::view!(@parse $acc.push($crate::view!(@convert $r, $s)) ; $($t)*)
    };
    // convert a..b into a selector
    (@parse $acc:expr ; $r:expr, $($t:tt)*) => {
        $crate::view!(@parse $acc.push($crate::view!(@convert $r)) ; $($t)*)
    };
    (@convert $r:expr) => {
        $crate::views::IntoSelector::into_selector($r)
    };
    (@convert $r:expr, $s:expr) => {
        $crate::views::Slice::from_range($r, $s)
    };
    ($($t:tt)*) => {
        $crate::view!(@parse $crate::view() ; $($t)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::Manager;
    use crate::rank::{R0, R1, R2, R3};
    use std::any::TypeId;

    fn same<A: 'static, B: 'static>() -> bool {
        TypeId::of::<A>() == TypeId::of::<B>()
    }

    fn result<S, N, C>(_: &View<S>) -> (TypeId, TypeId)
    where
        N: Rank,
        S: ViewTraits<N, C, N>,
    {
        (TypeId::of::<S::Nd>(), TypeId::of::<S::Rmc>())
    }

    #[test]
    fn type_level_dims() {
        let v = view().range(0, 1);
        assert_eq!(result::<_, R3, R3>(&v), (TypeId::of::<R3>(), TypeId::of::<R3>()));
        let v = view().slice(0, 4, 2);
        assert_eq!(result::<_, R3, R3>(&v), (TypeId::of::<R3>(), TypeId::of::<R2>()));
        let v = view().full().scalar(1);
        assert_eq!(result::<_, R3, R3>(&v), (TypeId::of::<R2>(), TypeId::of::<R1>()));
        let v = view().full().range(0, 2);
        assert_eq!(result::<_, R3, R3>(&v), (TypeId::of::<R3>(), TypeId::of::<R2>()));
        let v = view().full().full().scalar(0);
        assert_eq!(result::<_, R3, R3>(&v), (TypeId::of::<R2>(), TypeId::of::<R0>()));
        let v = view();
        assert_eq!(result::<_, R2, R1>(&v), (TypeId::of::<R2>(), TypeId::of::<R1>()));
        assert!(same::<<Scalar as Dimensions<R1, R1, R1>>::Nd, R0>());
    }

    #[test]
    fn resolve_offsets() {
        let core = Core::<R2>::contiguous([3, 4], Manager::unmanaged());
        let (offset, extents) = view![1.., 1..4;2].resolve::<R2, R2>(&core);
        assert_eq!(offset, 5);
        assert_eq!(extents, vec![Extent::new(2, 4), Extent::new(2, 2)]);
        let (offset, extents) = view![2].resolve::<R2, R2>(&core);
        assert_eq!(offset, 8);
        assert_eq!(extents, vec![Extent::new(4, 1)]);
        let (offset, extents) = view![.., 3].resolve::<R2, R2>(&core);
        assert_eq!(offset, 3);
        assert_eq!(extents, vec![Extent::new(3, 4)]);
    }

    #[test]
    fn slice_sizes() {
        let core = Core::<R1>::contiguous([10], Manager::unmanaged());
        for &(start, stop, step, size) in &[
            (0, 10, 1, 10),
            (0, 10, 3, 4),
            (2, 7, 2, 3),
            (1, 9, 4, 2),
            (5, 5, 3, 0),
            (0, 10, 20, 1),
        ] {
            let (_, e) = view().slice(start, stop, step).resolve::<R1, R1>(&core);
            assert_eq!(e[0].size, size, "slice {}..{};{}", start, stop, step);
        }
    }

    #[test]
    fn step_past_the_end() {
        let core = Core::<R2>::contiguous([3, 4], Manager::unmanaged());
        let (offset, extents) = view![..;1usize << 62].resolve::<R2, R2>(&core);
        assert_eq!(offset, 0);
        assert_eq!(extents, vec![Extent::new(1, 4), Extent::new(4, 1)]);
        let (offset, extents) = view![.., 1..;usize::MAX].resolve::<R2, R2>(&core);
        assert_eq!(offset, 1);
        assert_eq!(extents, vec![Extent::new(3, 4), Extent::new(1, 1)]);
    }

    #[test]
    fn macro_forms() {
        assert_eq!(view![], view());
        assert_eq!(view![..], view().full());
        assert_eq!(view![1..3, 2], view().range(1, 3).scalar(2));
        assert_eq!(view![1..3;2,], view().slice(1, 3, 2));
        assert_eq!(view![..;2], view().push(Slice { start: 0, stop: None, step: 2 }));
        assert_eq!(view![4.., ..2], view().push(Range { start: 4, stop: None }).range(0, 2));
        assert_eq!(view![0..=2], view().range(0, 3));
        assert_eq!(view![Full, Scalar(1)], view().full().scalar(1));
    }

    #[test]
    #[should_panic]
    fn range_past_end() {
        let core = Core::<R1>::contiguous([4], Manager::unmanaged());
        view![2..5].resolve::<R1, R1>(&core);
    }

    #[test]
    #[should_panic]
    fn zero_step() {
        let core = Core::<R1>::contiguous([4], Manager::unmanaged());
        view![..;0].resolve::<R1, R1>(&core);
    }

    #[test]
    #[should_panic]
    fn negative_index() {
        view![-1];
    }
}
