// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::arraybase::{ArrayBase, Kind};
use crate::arraytraits::ArrayTraits;
use crate::core::{stride_offset, Extent};
use crate::element::ElemCell;
use crate::rank::Rank;

fn format_array<K, T, N, C, F>(view: &ArrayBase<K, T, N, C>, f: &mut fmt::Formatter<'_>, mut format: F) -> fmt::Result
where
    T: Copy,
    N: Rank,
    C: ArrayTraits<N>,
    F: FnMut(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    format_extents(view.as_ptr(), view.core().extents(), 0, f, &mut format)
}

/// Write the elements under `ptr` for the remaining `extents`, one pair of
/// brackets per axis; rows of the last axis go on one line.
fn format_extents<T, F>(
    ptr: *mut T,
    extents: &[Extent],
    depth: usize,
    f: &mut fmt::Formatter<'_>,
    format: &mut F,
) -> fmt::Result
where
    T: Copy,
    F: FnMut(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    let (outer, inner) = match extents.split_first() {
        Some(split) => split,
        None => {
            // the pointer is in bounds: it was reached through valid indices
            let elt = unsafe { ElemCell::from_ptr(ptr) }.get();
            return format(&elt, f);
        }
    };
    write!(f, "[")?;
    for i in 0..outer.size {
        if i > 0 {
            if inner.is_empty() {
                write!(f, ", ")?;
            } else {
                write!(f, ",")?;
                for _ in 0..inner.len() {
                    writeln!(f)?;
                }
                for _ in 0..=depth {
                    write!(f, " ")?;
                }
            }
        }
        let elt_ptr = ptr.wrapping_offset(stride_offset(i, outer.stride));
        format_extents(elt_ptr, inner, depth + 1, f, format)?;
    }
    write!(f, "]")
}

/// Format the array using `Display` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
///
/// ```
/// use ndview::prelude::*;
///
/// let a: Array<i32, R2, R2> = Array::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(format!("{}", a), "[[1, 2],\n [3, 4]]");
/// ```
impl<K, T, N, C> fmt::Display for ArrayBase<K, T, N, C>
where
    T: Copy + fmt::Display,
    N: Rank,
    C: ArrayTraits<N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <_>::fmt)
    }
}

/// Format the array using `Debug` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style, followed by its shape, strides,
/// contiguity guarantee and kind.
impl<K, T, N, C> fmt::Debug for ArrayBase<K, T, N, C>
where
    K: Kind,
    T: Copy + fmt::Debug,
    N: Rank,
    C: ArrayTraits<N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Add extra information for Debug
        format_array(self, f, <_>::fmt)?;
        write!(
            f,
            " shape={:?}, strides={:?}, rmc={}, kind={}",
            self.shape(),
            self.strides(),
            C::N,
            if K::IS_DEEP { "ArrayRef" } else { "Array" }
        )
    }
}

/// Format the array using `LowerExp` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
impl<K, T, N, C> fmt::LowerExp for ArrayBase<K, T, N, C>
where
    T: Copy + fmt::LowerExp,
    N: Rank,
    C: ArrayTraits<N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <_>::fmt)
    }
}

/// Format the array using `UpperExp` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
impl<K, T, N, C> fmt::UpperExp for ArrayBase<K, T, N, C>
where
    T: Copy + fmt::UpperExp,
    N: Rank,
    C: ArrayTraits<N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <_>::fmt)
    }
}

/// Format the array using `LowerHex` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
impl<K, T, N, C> fmt::LowerHex for ArrayBase<K, T, N, C>
where
    T: Copy + fmt::LowerHex,
    N: Rank,
    C: ArrayTraits<N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <_>::fmt)
    }
}

/// Format the array using `Binary` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
impl<K, T, N, C> fmt::Binary for ArrayBase<K, T, N, C>
where
    T: Copy + fmt::Binary,
    N: Rank,
    C: ArrayTraits<N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <_>::fmt)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn one_dimensional() {
        let a: Array<f64, R1, R1> = Array::from(vec![1.5, 2., -3.]);
        assert_eq!(format!("{}", a), "[1.5, 2, -3]");
        assert_eq!(format!("{:.2}", a), "[1.50, 2.00, -3.00]");
        assert_eq!(format!("{:e}", a), "[1.5e0, 2e0, -3e0]");
        let e: Array<f64, R1, R1> = Array::zeros([0]);
        assert_eq!(format!("{}", e), "[]");
    }

    #[test]
    fn three_dimensional() {
        let a: Array<u8, R3, R3> = Array::from_shape_fn([2, 2, 2], |[i, j, k]| (4 * i + 2 * j + k) as u8);
        assert_eq!(
            format!("{:x}", a),
            "[[[0, 1],\n  [2, 3]],\n\n [[4, 5],\n  [6, 7]]]"
        );
    }

    #[test]
    fn debug_details() {
        let a: Array<i32, R2, R2> = Array::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let t = a.transpose();
        assert_eq!(
            format!("{:?}", t),
            "[[1, 3],\n [2, 4]] shape=[2, 2], strides=[1, 2], rmc=0, kind=ArrayRef"
        );
        let row = a.value(1);
        assert_eq!(
            format!("{:?}", row),
            "[3, 4] shape=[2], strides=[1], rmc=1, kind=Array"
        );
    }
}
