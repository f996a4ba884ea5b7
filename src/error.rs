// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = DimArrayError> = ::std::result::Result<T, E>;

/// An error produced by a labeled-array operation.
///
/// Every variant carries the offending name, axis or shape so callers can
/// react programmatically. Errors surface synchronously to the immediate
/// caller; no operation retries internally or leaves partial state.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DimArrayError {
    // -- construction ------------------------------------------------------
    /// A required attribute was absent at construction.
    #[error("required attribute `{name}` is missing")]
    MissingAttribute { name: String },

    /// A dimension was constructed without a (non-blank) name.
    #[error("dimension name is missing or blank")]
    MissingName,

    /// Coordinate values could not be coerced to exactly one dimension.
    #[error("coordinate values are not one-dimensional (shape {shape:?})")]
    NotOneDimensional { shape: Vec<usize> },

    /// Coordinate values contain a duplicate.
    #[error("coordinate values are not unique (duplicate {value})")]
    NotUnique { value: String },

    /// The number of dimensions does not match the rank of the data.
    #[error("data has {ndim} axes but {dims} dimensions were supplied")]
    DimCountMismatch { ndim: usize, dims: usize },

    /// A dimension's length does not match its axis extent.
    #[error("dimension `{name}` has length {dim_len} but axis {axis} has length {axis_len}")]
    DimLengthMismatch {
        name: String,
        axis: usize,
        dim_len: usize,
        axis_len: usize,
    },

    /// Two dimensions of the same array share a name.
    #[error("duplicate dimension name `{name}`")]
    DuplicateDimName { name: String },

    /// A dimension name is not a valid identifier.
    #[error("dimension name `{name}` is not a valid identifier")]
    InvalidDimName { name: String },

    // -- attribute mutation ------------------------------------------------
    /// An attempt was made to clear or remove a required attribute.
    #[error("attribute `{name}` is required and cannot be removed or replaced through the attribute bag")]
    ImmutableAttribute { name: String },

    // -- axis resolution ---------------------------------------------------
    /// An axis name did not match any dimension of the array.
    #[error("unknown dimension `{name}`")]
    UnknownDimension { name: String },

    /// An axis position was out of range.
    #[error("axis {axis} is out of bounds for an array with {ndim} axes")]
    AxisOutOfBounds { axis: usize, ndim: usize },

    /// An index was out of bounds along an axis.
    #[error("index {index} is out of bounds for axis {axis} with length {len}")]
    IndexOutOfBounds { axis: usize, index: isize, len: usize },

    /// The same axis was constrained twice in one index expression.
    #[error("dimension `{name}` is indexed more than once")]
    ConflictingIndex { name: String },

    // -- predicate parsing -------------------------------------------------
    /// A string index component could not be parsed as `<name><op><value>`.
    #[error("cannot parse `{expr}` as a dimension predicate")]
    PredicateSyntax { expr: String },

    // -- shape mismatches --------------------------------------------------
    /// Two shapes that must agree do not.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A non-concatenation-axis dimension differs between two arrays.
    #[error("dimension `{name}` differs between the two arrays")]
    DimensionMismatch { name: String },

    /// A boolean mask does not match the length of its axis.
    #[error("mask of length {mask_len} does not fit axis {axis} with length {axis_len}")]
    MaskLengthMismatch {
        axis: usize,
        mask_len: usize,
        axis_len: usize,
    },

    /// A bin count does not evenly divide the axis length.
    #[error("axis of length {len} cannot be split into {count} equal bins")]
    UnevenBins { len: usize, count: usize },

    /// A bin index range selects no elements.
    #[error("bin {index} is empty")]
    EmptyBin { index: usize },

    /// The number of explicit bin labels does not match the bin count.
    #[error("{actual} bin labels were supplied for {expected} bins")]
    BinLabelCount { expected: usize, actual: usize },

    /// A reduction was applied over an empty axis.
    #[error("cannot reduce over an empty axis")]
    EmptyReduction,

    // -- unsupported -------------------------------------------------------
    /// The operation has no label-preserving definition and no fallback.
    #[error("`{op}` is not supported on labeled arrays")]
    Unsupported { op: &'static str },
}
