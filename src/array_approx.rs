// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::arraybase::ArrayBase;
use crate::arraytraits::ArrayTraits;
use crate::rank::Rank;

/// Element-wise approximate comparisons.
impl<K, T, N, C> ArrayBase<K, T, N, C>
where
    T: Copy,
    N: Rank,
    C: ArrayTraits<N>,
{
    /// A test for equality that uses the elementwise absolute difference to
    /// compute the approximate equality of two arrays.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn abs_diff_eq<K2, U, C2>(&self, other: &ArrayBase<K2, U, N, C2>, epsilon: T::Epsilon) -> bool
    where
        T: AbsDiffEq<U>,
        T::Epsilon: Clone,
        U: Copy,
        C2: ArrayTraits<N>,
    {
        <Self as AbsDiffEq<_>>::abs_diff_eq(self, other, epsilon)
    }

    /// A test for equality that uses an elementwise relative comparison if
    /// the values are far apart; and the absolute difference otherwise.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn relative_eq<K2, U, C2>(
        &self,
        other: &ArrayBase<K2, U, N, C2>,
        epsilon: T::Epsilon,
        max_relative: T::Epsilon,
    ) -> bool
    where
        T: RelativeEq<U>,
        T::Epsilon: Clone,
        U: Copy,
        C2: ArrayTraits<N>,
    {
        <Self as RelativeEq<_>>::relative_eq(self, other, epsilon, max_relative)
    }
}

/// **Requires crate feature `"approx"`.**
impl<K, K2, T, U, N, C, C2> AbsDiffEq<ArrayBase<K2, U, N, C2>> for ArrayBase<K, T, N, C>
where
    T: Copy + AbsDiffEq<U>,
    T::Epsilon: Clone,
    U: Copy,
    N: Rank,
    C: ArrayTraits<N>,
    C2: ArrayTraits<N>,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &ArrayBase<K2, U, N, C2>, epsilon: T::Epsilon) -> bool {
        if self.shape() != other.shape() {
            return false;
        }

        self.elements()
            .zip(other.elements())
            .all(move |(a, b)| T::abs_diff_eq(&a.get(), &b.get(), epsilon.clone()))
    }
}

/// **Requires crate feature `"approx"`.**
impl<K, K2, T, U, N, C, C2> RelativeEq<ArrayBase<K2, U, N, C2>> for ArrayBase<K, T, N, C>
where
    T: Copy + RelativeEq<U>,
    T::Epsilon: Clone,
    U: Copy,
    N: Rank,
    C: ArrayTraits<N>,
    C2: ArrayTraits<N>,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &ArrayBase<K2, U, N, C2>,
        epsilon: T::Epsilon,
        max_relative: T::Epsilon,
    ) -> bool {
        if self.shape() != other.shape() {
            return false;
        }

        self.elements().zip(other.elements()).all(move |(a, b)| {
            T::relative_eq(&a.get(), &b.get(), epsilon.clone(), max_relative.clone())
        })
    }
}

/// **Requires crate feature `"approx"`.**
impl<K, K2, T, U, N, C, C2> UlpsEq<ArrayBase<K2, U, N, C2>> for ArrayBase<K, T, N, C>
where
    T: Copy + UlpsEq<U>,
    T::Epsilon: Clone,
    U: Copy,
    N: Rank,
    C: ArrayTraits<N>,
    C2: ArrayTraits<N>,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &ArrayBase<K2, U, N, C2>, epsilon: T::Epsilon, max_ulps: u32) -> bool {
        if self.shape() != other.shape() {
            return false;
        }

        self.elements()
            .zip(other.elements())
            .all(move |(a, b)| T::ulps_eq(&a.get(), &b.get(), epsilon.clone(), max_ulps))
    }
}
