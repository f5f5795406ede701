// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Type-level ranks.
//!
//! Both the dimensionality of a view and its row-major-contiguous (RMC)
//! guarantee are carried in the type system as [`ConstRank`] values. The
//! traits in this module do the small amount of arithmetic the view algebra
//! needs: stepping down one rank ([`Rank::Smaller`]), taking a minimum
//! ([`RMin`]) and comparing ([`NotAbove`]).
//!
//! Compile-time ranks are supported from 0 to 6, inclusive. Arrays
//! themselves require a rank of at least one.

use std::fmt::Debug;
use std::hash::Hash;

use crate::{Ix, Ixs};

/// A fixed-length vector of sizes, strides or indices, one entry per axis.
///
/// Implemented for `[E; 0]` to `[E; 6]`.
pub trait IndexVector<E>:
    Copy + Debug + Default + Eq + Hash + AsRef<[E]> + AsMut<[E]> + Send + Sync + 'static
{
}

/// A compile-time rank, i.e. an unsigned integer known at compile time.
///
/// Arrays use one rank for their number of axes and a second one for the
/// number of trailing axes that are guaranteed to be row-major contiguous.
pub trait Rank: Copy + Eq + Debug + Default + Send + Sync + 'static {
    /// The rank as a constant `usize`.
    const N: usize;

    /// The next-smaller rank.
    ///
    /// `R0` has no smaller rank; its `Smaller` refers back to itself.
    type Smaller: Rank;

    /// Index (and shape) vector for this many axes.
    type Index: IndexVector<Ix>;

    /// Stride vector for this many axes.
    type Strides: IndexVector<Ixs>;
}

/// Marker for ranks of at least one.
pub trait Positive: Rank {}

/// Takes the minimum of two ranks at compile time.
///
/// ```
/// use ndview::rank::*;
/// use core::any::TypeId;
///
/// type Min = <R4 as RMin<R2>>::Output;
/// assert_eq!(TypeId::of::<Min>(), TypeId::of::<R2>());
/// ```
pub trait RMin<B> {
    /// The smaller of the two ranks.
    type Output: Rank;
}

/// Holds when `Self ≤ B`.
///
/// This is what allows relaxing an RMC guarantee `C` to a weaker `C2`
/// (`C2: NotAbove<C>`), and rejects widening it.
pub trait NotAbove<B> {}

impl<A, B> NotAbove<B> for A where A: Rank + RMin<B, Output = A> {}

/// A rank known at compile time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstRank<const N: usize>;

macro_rules! def_r_aliases {
    ($(($alias:ident, $N:literal)),*) => {
        $(
            /// The rank
            #[doc = stringify!($N)]
            /// known at compile time.
            ///
            /// See [`Rank`] and [`ConstRank`] for more information.
            pub type $alias = ConstRank<$N>;
        )*
    };
}

def_r_aliases!((R0, 0), (R1, 1), (R2, 2), (R3, 3), (R4, 4), (R5, 5), (R6, 6));

macro_rules! impl_rank {
    ($($n:literal),+) => {
        $(
            impl IndexVector<Ix> for [Ix; $n] {}
            impl IndexVector<Ixs> for [Ixs; $n] {}

            impl Rank for ConstRank<$n> {
                const N: usize = $n;

                type Smaller = ConstRank<{ $n - ($n > 0) as usize }>;

                type Index = [Ix; $n];

                type Strides = [Ixs; $n];
            }
        )+
    };
}

impl_rank!(0, 1, 2, 3, 4, 5, 6);

impl Positive for R1 {}
impl Positive for R2 {}
impl Positive for R3 {}
impl Positive for R4 {}
impl Positive for R5 {}
impl Positive for R6 {}

macro_rules! impl_rmin {
    ($all:tt; $($a:literal),+) => {
        $(
            impl_rmin!(@row $a; $all);
        )+
    };
    (@row $a:literal; [$($b:literal),+]) => {
        $(
            impl RMin<ConstRank<$b>> for ConstRank<$a> {
                type Output = ConstRank<{ if $a < $b { $a } else { $b } }>;
            }
        )+
    };
}

impl_rmin!([0, 1, 2, 3, 4, 5, 6]; 0, 1, 2, 3, 4, 5, 6);

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    fn same<A: 'static, B: 'static>() -> bool {
        TypeId::of::<A>() == TypeId::of::<B>()
    }

    fn not_above<A: NotAbove<B>, B>() {}

    #[test]
    fn smaller_steps_down() {
        assert!(same::<<R3 as Rank>::Smaller, R2>());
        assert!(same::<<R1 as Rank>::Smaller, R0>());
        assert!(same::<<R0 as Rank>::Smaller, R0>());
        assert_eq!(<R5 as Rank>::N, 5);
    }

    #[test]
    fn min_is_symmetric() {
        assert!(same::<<R2 as RMin<R5>>::Output, R2>());
        assert!(same::<<R5 as RMin<R2>>::Output, R2>());
        assert!(same::<<R3 as RMin<R3>>::Output, R3>());
        assert!(same::<<R0 as RMin<R6>>::Output, R0>());
    }

    #[test]
    fn ordering() {
        not_above::<R0, R0>();
        not_above::<R1, R3>();
        not_above::<R6, R6>();
    }

    #[test]
    fn index_vectors() {
        let ix: <R3 as Rank>::Index = Default::default();
        assert_eq!(ix.as_ref(), &[0, 0, 0]);
        let st: <R2 as Rank>::Strides = [4, -1];
        assert_eq!(st.as_ref().len(), 2);
    }
}
