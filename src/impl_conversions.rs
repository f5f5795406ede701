// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::hash;
use std::iter::FromIterator;

use crate::arraybase::{Array, ArrayRef};
use crate::arraytraits::ArrayTraits;
use crate::rank::{NotAbove, Rank, R1};

/// Reinterpret a deep reference as a shallow handle to the same elements.
///
/// The RMC guarantee may be kept or weakened, never strengthened.
impl<T, N, C, C2> From<ArrayRef<T, N, C>> for Array<T, N, C2>
where
    N: Rank,
    C: ArrayTraits<N>,
    C2: ArrayTraits<N> + NotAbove<C>,
{
    #[inline]
    fn from(r: ArrayRef<T, N, C>) -> Self {
        r.retype()
    }
}

impl<'a, T, N, C, C2> From<&'a ArrayRef<T, N, C>> for Array<T, N, C2>
where
    N: Rank,
    C: ArrayTraits<N>,
    C2: ArrayTraits<N> + NotAbove<C>,
{
    #[inline]
    fn from(r: &'a ArrayRef<T, N, C>) -> Self {
        r.retype()
    }
}

/// Reinterpret a shallow handle as a deep reference to the same elements.
///
/// The RMC guarantee may be kept or weakened, never strengthened.
///
/// ```
/// use ndview::prelude::*;
///
/// let a: Array<i32, R2, R2> = Array::zeros([2, 3]);
/// let r: ArrayRef<i32, R2, R1> = ArrayRef::from(&a);
/// r.fill(1);
/// assert_eq!(a.to_vec(), vec![1; 6]);
/// ```
impl<T, N, C, C2> From<Array<T, N, C>> for ArrayRef<T, N, C2>
where
    N: Rank,
    C: ArrayTraits<N>,
    C2: ArrayTraits<N> + NotAbove<C>,
{
    #[inline]
    fn from(a: Array<T, N, C>) -> Self {
        a.retype()
    }
}

impl<'a, T, N, C, C2> From<&'a Array<T, N, C>> for ArrayRef<T, N, C2>
where
    N: Rank,
    C: ArrayTraits<N>,
    C2: ArrayTraits<N> + NotAbove<C>,
{
    #[inline]
    fn from(a: &'a Array<T, N, C>) -> Self {
        a.retype()
    }
}

/// Create a one-dimensional array from a vector (no copying needed).
///
/// ```
/// use ndview::prelude::*;
///
/// let a = Array::from(vec![1., 2., 3.]);
/// assert_eq!(a.shape(), [3]);
/// ```
impl<T> From<Vec<T>> for Array<T, R1, R1>
where
    T: Send + Sync + 'static,
{
    fn from(v: Vec<T>) -> Self {
        let len = v.len();
        match Array::from_vec([len], v) {
            Ok(a) => a,
            Err(e) => panic!("ndview: {}", e),
        }
    }
}

/// Create a one-dimensional array from the items of an iterator.
///
/// ```
/// use ndview::prelude::*;
///
/// let a: Array<u32, R1, R1> = (0..5).map(|x| x * x).collect();
/// assert_eq!(a.to_vec(), vec![0, 1, 4, 9, 16]);
/// ```
impl<T> FromIterator<T> for Array<T, R1, R1>
where
    T: Send + Sync + 'static,
{
    fn from_iter<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Array::from(iterable.into_iter().collect::<Vec<T>>())
    }
}

impl<K, T, N, C> hash::Hash for crate::ArrayBase<K, T, N, C>
where
    N: Rank,
    C: ArrayTraits<N>,
    T: Copy + hash::Hash,
{
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.shape().hash(state);
        for elt in self.elements() {
            elt.get().hash(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<X: Hash>(x: &X) -> u64 {
        let mut h = DefaultHasher::new();
        x.hash(&mut h);
        h.finish()
    }

    #[test]
    fn shallow_deep_roundtrip() {
        let a: Array<i32, R2, R2> = Array::zeros([2, 2]);
        let r: ArrayRef<i32, R2, R2> = ArrayRef::from(a.clone());
        r.at(0).fill(5);
        let b: Array<i32, R2, R2> = Array::from(r);
        assert_eq!(b.to_vec(), vec![5, 5, 0, 0]);
        assert_eq!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn conversions_weaken_rmc() {
        let a: Array<i32, R3, R3> = Array::zeros([2, 2, 2]);
        let r: ArrayRef<i32, R3, R1> = (&a).into();
        let row: ArrayRef<i32, R1, R1> = r.at(1).at(0);
        row.fill(3);
        let b: Array<i32, R3> = Array::from(&r);
        assert_eq!(b.to_vec(), vec![0, 0, 0, 0, 3, 3, 0, 0]);
        let c: Array<i32, R3, R1> = r.into();
        assert_eq!(c.as_ptr(), a.as_ptr());
        let d: ArrayRef<i32, R3> = ArrayRef::from(c);
        assert_eq!(d, a);
    }

    #[test]
    fn hash_follows_elements() {
        let a: Array<i32, R2, R2> = Array::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let t = a.transpose().copy();
        let tt = t.transpose();
        assert_eq!(hash_of(&a), hash_of(&tt));
        assert_ne!(hash_of(&a), hash_of(&t));
    }

    #[test]
    fn collect() {
        let a: Array<i64, R1, R1> = (1..=4).collect();
        assert_eq!(a.shape(), [4]);
        assert_eq!(a.as_slice()[3].get(), 4);
        let e: Array<i64, R1, R1> = std::iter::empty().collect();
        assert!(e.is_empty());
    }
}
