// Copyright 2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ndview prelude.
//!
//! This module contains the most used types, type aliases, traits, functions,
//! and macros that you can import easily as a group.
//!
//! ```
//! use ndview::prelude::*;
//!
//! let a: Array<f64, R2, R2> = Array::zeros([2, 3]);
//! let row: ArrayRef<f64, R1, R1> = a.view(view![1]);
//! # let _ = row;
//! ```

#[doc(no_inline)]
pub use crate::{Array, ArrayBase, ArrayRef};

#[doc(no_inline)]
pub use crate::{ElemCell, Manager};

#[doc(no_inline)]
pub use crate::rank::{Rank, R0, R1, R2, R3, R4, R5, R6};

/// The `view()` builder and the `view!` macro
#[doc(no_inline)]
pub use crate::view;
