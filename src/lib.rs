// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `dimarray` crate provides labeled n-dimensional arrays on top of
//! [`ndarray`]: every axis of a [`DimArray`] carries a named coordinate
//! [`Dim`], so selection, reduction and reshaping can be expressed with
//! dimension names instead of positional axis numbers.
//!
//! ## Highlights
//!
//! - [`Dim`]: a named, uniquely-valued 1-D coordinate axis with free-form
//!   attributes (`unit`, and so on).
//! - [`DimArray`]: an `ArrayD` paired with one `Dim` per axis plus an
//!   open-ended attribute bag; all derived arrays keep labels and
//!   attributes consistent with the underlying `ndarray` operation.
//! - Predicate-string indexing: `arr.index(&["time>0.5".into()])` selects
//!   along the `time` axis by coordinate comparison; predicates can be
//!   given in any order and are redirected to their named axis.
//! - Name-aware reductions (`sum_axis("time")`), concatenation
//!   ([`DimArray::extend`]) and axis binning ([`DimArray::make_bins`]).
//! - Operations that cannot keep per-axis labels correct degrade to an
//!   unlabeled [`AttrArray`] instead of guessing; see [`Indexed`].
//!
//! ## Example
//!
//! ```
//! use dimarray::{coords, Dim, DimArray, Indexed, Ix};
//! use ndarray::array;
//!
//! let time = Dim::new(coords![0.0, 0.5, 1.0], "time").unwrap();
//! let chan = Dim::new(coords!["c1", "c2"], "channel").unwrap();
//! let arr = DimArray::new(array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]].into_dyn(),
//!                         vec![time, chan]).unwrap();
//!
//! let late = arr.index(&[Ix::from("time>0.2")]).unwrap();
//! match late {
//!     Indexed::Labeled(a) => {
//!         assert_eq!(a.shape(), &[2, 2]);
//!         assert_eq!(a.dim_names(), vec!["time", "channel"]);
//!     }
//!     _ => unreachable!(),
//! }
//!
//! let per_channel = arr.mean_axis("time").unwrap();
//! assert_eq!(per_channel.dim_names(), vec!["channel"]);
//! ```

#[macro_use]
mod macros;

mod attr_array;
mod attrs;
mod binning;
mod coord;
mod dimarray;
mod dimension;
mod error;
mod impl_methods;
mod impl_numeric;
mod impl_ops;
mod predicate;
mod slicing;

pub use crate::attr_array::AttrArray;
pub use crate::attrs::{AttrValue, Attrs, PropagateRule};
pub use crate::binning::{BinLabels, BinRange, BinSpec, Reduction};
pub use crate::coord::Coord;
pub use crate::dimarray::{DimArray, Filter};
pub use crate::dimension::Dim;
pub use crate::error::{DimArrayError, Result};
pub use crate::predicate::{Cmp, Predicate};
pub use crate::slicing::{AxisId, Indexed, Ix};

// The numeric engine types that appear in this crate's public API.
pub use ndarray::{ArrayD, Axis, IxDyn, Slice};
