// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "ndview"]
#![doc(html_root_url = "https://docs.rs/ndview/0.1/")]
#![allow(
    clippy::many_single_char_names,
    clippy::deref_addrof,
    clippy::unreadable_literal,
    clippy::manual_map, // is not an error
    clippy::while_let_on_iterator, // is not an error
    clippy::from_iter_instead_of_collect, // using from_iter is good style
)]
#![doc(test(attr(allow(unused_variables))))]

//! The `ndview` crate provides lightweight, strided *n*-dimensional views
//! into existing memory.
//!
//! - [`ArrayBase`]: The *n*-dimensional view type, used through the aliases
//!   [`Array`] (a shallow handle) and [`ArrayRef`] (a deep reference that
//!   assigns through to the elements).
//! - Views never copy elements: indexing, iteration, transposition and
//!   sub-viewing all produce new views of the same memory. The memory is
//!   kept alive by a reference-counted [`Manager`].
//!
//! ## Highlights
//!
//! - The number of axes `N` and the number of trailing axes guaranteed to be
//!   row-major contiguous `C` are part of the type, as [`R0`] to [`R6`].
//!   Operations that may break contiguity lower `C` in their result type,
//!   and contiguous arrays get a faster iteration path.
//! - Indexing an `N`-dimensional array with a single index gives an
//!   `N - 1`-dimensional [`ArrayRef`]; indexing a one-dimensional array gives
//!   an element.
//! - Sub-views of any shape through [`view!`] and the
//!   [`views`] module.
//! - Type promotion and approximate comparison of numeric element types in
//!   [`numeric`].
//!
//! ## Crate Feature Flags
//!
//! - `approx`
//!   - Implementations of the `approx` crate's `AbsDiffEq`, `RelativeEq`
//!     and `UlpsEq` traits for arrays.
//!
//! ## Example
//!
//! ```
//! use ndview::prelude::*;
//!
//! let a: Array<i32, R2, R2> = Array::from_shape_fn([3, 4], |[i, j]| (10 * i + j) as i32);
//!
//! // a row is a contiguous one-dimensional reference into `a`
//! let row: ArrayRef<i32, R1, R1> = a.at(1);
//! assert_eq!(row.to_vec(), vec![10, 11, 12, 13]);
//!
//! // writing through the reference writes into `a`
//! row.fill(0);
//! assert_eq!(a[[1, 2]], 0);
//!
//! // the transpose makes no contiguity guarantee
//! let t: ArrayRef<i32, R2> = a.transpose();
//! assert_eq!(t.shape(), [4, 3]);
//! assert_eq!(t[[3, 2]], 23);
//! ```

#[macro_use]
mod macro_utils;

mod arraybase;
mod arrayformat;
mod arraytraits;
mod core;
mod element;
mod error;
mod impl_constructors;
mod impl_conversions;
mod impl_methods;
mod impl_ops;
mod manager;

#[cfg(feature = "approx")]
mod array_approx;

pub mod iterators;
pub mod numeric;
pub mod prelude;
pub mod rank;
pub mod views;

pub use crate::arraybase::{Array, ArrayBase, ArrayRef, Deep, Kind, Shallow};
pub use crate::arraytraits::ArrayTraits;
pub use crate::core::{Core, Extent};
pub use crate::element::ElemCell;
pub use crate::error::{ErrorKind, ShapeError};
pub use crate::impl_ops::ScalarOperand;
pub use crate::manager::Manager;
pub use crate::rank::{ConstRank, R0, R1, R2, R3, R4, R5, R6};
pub use crate::views::view;

/// Array index type
pub type Ix = usize;
/// Array index type (signed)
pub type Ixs = isize;
