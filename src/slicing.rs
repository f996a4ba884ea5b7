// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::ops::Range;

use ndarray::{ArrayD, Axis, Slice};

use crate::attr_array::AttrArray;
use crate::dimarray::DimArray;
use crate::dimension::Dim;
use crate::error::{DimArrayError, Result};
use crate::predicate::{is_valid_name, Predicate};

/// An axis identifier: a position or a dimension name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AxisId<'a> {
    Pos(usize),
    Name(&'a str),
}

impl From<usize> for AxisId<'static> {
    fn from(axis: usize) -> Self {
        AxisId::Pos(axis)
    }
}

impl<'a> From<&'a str> for AxisId<'a> {
    fn from(name: &'a str) -> Self {
        AxisId::Name(name)
    }
}

/// One component of an index expression, covering the positional forms
/// of the engine plus the predicate-string language.
#[derive(Clone, Debug, PartialEq)]
pub enum Ix {
    /// A single position; drops the axis and its dimension. Negative
    /// values count from the end of the axis.
    Single(isize),
    /// A range with step; keeps the axis. Follows the engine's `Slice`
    /// conventions (negative bounds from the end, out-of-range bounds
    /// clamped, negative step reverses).
    Slice(Slice),
    /// The full axis, unchanged.
    Full,
    /// Insert a new axis of length 1 at this point; the synthesized
    /// dimension is named `newaxis_<position>` after its position in the
    /// result.
    NewAxis,
    /// A per-axis boolean mask; keeps the axis, index-reduced.
    Mask(Vec<bool>),
    /// Explicit positions along the axis ("fancy" indexing, outer
    /// semantics); keeps the axis.
    Pick(Vec<usize>),
    /// A predicate string (`"time>0.5"`), redirected to its named axis
    /// wherever it appears — or, as the sole component, a bare dimension
    /// name returning that axis's [`Dim`].
    Str(String),
}

impl From<isize> for Ix {
    fn from(i: isize) -> Ix {
        Ix::Single(i)
    }
}

impl From<i32> for Ix {
    fn from(i: i32) -> Ix {
        Ix::Single(i as isize)
    }
}

impl From<usize> for Ix {
    fn from(i: usize) -> Ix {
        Ix::Single(i as isize)
    }
}

impl From<&str> for Ix {
    fn from(s: &str) -> Ix {
        Ix::Str(s.to_owned())
    }
}

impl From<String> for Ix {
    fn from(s: String) -> Ix {
        Ix::Str(s)
    }
}

impl From<Slice> for Ix {
    fn from(s: Slice) -> Ix {
        Ix::Slice(s)
    }
}

impl From<Range<isize>> for Ix {
    fn from(r: Range<isize>) -> Ix {
        Ix::Slice(Slice::new(r.start, Some(r.end), 1))
    }
}

impl From<Range<i32>> for Ix {
    fn from(r: Range<i32>) -> Ix {
        Ix::Slice(Slice::new(r.start as isize, Some(r.end as isize), 1))
    }
}

impl From<::std::ops::RangeFull> for Ix {
    fn from(_: ::std::ops::RangeFull) -> Ix {
        Ix::Full
    }
}

impl From<Vec<bool>> for Ix {
    fn from(mask: Vec<bool>) -> Ix {
        Ix::Mask(mask)
    }
}

impl From<Vec<usize>> for Ix {
    fn from(indices: Vec<usize>) -> Ix {
        Ix::Pick(indices)
    }
}

/// The result of indexing a labeled array.
#[derive(Clone, Debug, PartialEq)]
pub enum Indexed<A> {
    /// Labels survived: a labeled array with consistently sliced dims.
    Labeled(DimArray<A>),
    /// Labels could not be reconstructed; data and attributes survive.
    Unlabeled(AttrArray<A>),
    /// The index was a bare dimension name: the dimension itself.
    Axis(Dim),
}

impl<A> Indexed<A> {
    pub fn into_labeled(self) -> Option<DimArray<A>> {
        match self {
            Indexed::Labeled(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_unlabeled(self) -> Option<AttrArray<A>> {
        match self {
            Indexed::Unlabeled(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_axis(self) -> Option<Dim> {
        match self {
            Indexed::Axis(d) => Some(d),
            _ => None,
        }
    }
}

/// A per-axis operation after normalization. Every source form (slice,
/// mask, fancy list, predicate) lowers to `Select`, so data and labels
/// go through one path.
#[derive(Clone, Debug)]
pub(crate) enum AxisOp {
    Full,
    At(usize),
    Select(Vec<usize>),
}

pub(crate) enum ResolvedIndex {
    /// A bare dimension name: the axis at this position.
    Axis(usize),
    /// Per-axis operations plus new-axis anchors (input-axis positions,
    /// in component order).
    Ops {
        ops: Vec<AxisOp>,
        inserts: Vec<usize>,
    },
}

/// Normalize an index expression against the given dims and shape.
pub(crate) fn resolve(parts: &[Ix], dims: &[Dim], shape: &[usize]) -> Result<ResolvedIndex> {
    let ndim = shape.len();

    // a sole bare dimension name selects the Dim itself
    if let [Ix::Str(s)] = parts {
        if let Some(axis) = dims.iter().position(|d| d.name() == s.as_str()) {
            return Ok(ResolvedIndex::Axis(axis));
        }
    }

    let mut slots: Vec<Option<AxisOp>> = vec![None; ndim];

    // first pass: named predicates claim their axes
    for part in parts {
        if let Ix::Str(s) = part {
            let pred: Predicate = match s.parse() {
                Ok(p) => p,
                Err(err) => {
                    // a bare name only selects a dim as the sole component;
                    // among other components it is a syntax error, and an
                    // unknown bare name is an unknown dimension
                    if is_valid_name(s) && !dims.iter().any(|d| d.name() == s.as_str()) {
                        return Err(DimArrayError::UnknownDimension { name: s.clone() });
                    }
                    return Err(err);
                }
            };
            let axis = dims
                .iter()
                .position(|d| d.name() == pred.dim)
                .ok_or_else(|| DimArrayError::UnknownDimension {
                    name: pred.dim.clone(),
                })?;
            if slots[axis].is_some() {
                return Err(DimArrayError::ConflictingIndex {
                    name: pred.dim.clone(),
                });
            }
            let mask = pred.mask(&dims[axis]);
            slots[axis] = Some(AxisOp::Select(mask_to_indices(&mask)));
        }
    }

    // second pass: positional components fill the remaining axes in
    // order; new axes record where they were written
    let mut inserts = Vec::new();
    let mut cursor = 0usize;
    for part in parts {
        if matches!(part, Ix::Str(_)) {
            continue;
        }
        while cursor < ndim && slots[cursor].is_some() {
            cursor += 1;
        }
        if let Ix::NewAxis = part {
            inserts.push(cursor);
            continue;
        }
        if cursor >= ndim {
            return Err(DimArrayError::AxisOutOfBounds { axis: cursor, ndim });
        }
        let len = shape[cursor];
        let op = match part {
            Ix::Single(i) => AxisOp::At(normalize_index(*i, cursor, len)?),
            Ix::Slice(s) => AxisOp::Select(slice_to_indices(len, *s)?),
            Ix::Full => AxisOp::Full,
            Ix::Mask(mask) => {
                if mask.len() != len {
                    return Err(DimArrayError::MaskLengthMismatch {
                        axis: cursor,
                        mask_len: mask.len(),
                        axis_len: len,
                    });
                }
                AxisOp::Select(mask_to_indices(mask))
            }
            Ix::Pick(indices) => {
                for &i in indices {
                    if i >= len {
                        return Err(DimArrayError::IndexOutOfBounds {
                            axis: cursor,
                            index: i as isize,
                            len,
                        });
                    }
                }
                AxisOp::Select(indices.clone())
            }
            Ix::NewAxis | Ix::Str(_) => unreachable!(),
        };
        slots[cursor] = Some(op);
        cursor += 1;
    }

    let ops = slots
        .into_iter()
        .map(|slot| slot.unwrap_or(AxisOp::Full))
        .collect();
    Ok(ResolvedIndex::Ops { ops, inserts })
}

/// Apply normalized per-axis operations to the data.
pub(crate) fn apply_ops<A: Clone>(data: &ArrayD<A>, ops: &[AxisOp]) -> ArrayD<A> {
    let mut out = data.clone();
    let mut axis = 0;
    for op in ops {
        match op {
            AxisOp::Full => axis += 1,
            AxisOp::At(i) => {
                out = out.index_axis(Axis(axis), *i).to_owned();
            }
            AxisOp::Select(indices) => {
                out = out.select(Axis(axis), indices);
                axis += 1;
            }
        }
    }
    out
}

/// Apply normalized per-axis operations to the dims: axes selected by a
/// single position are dropped, the rest are index-reduced consistently
/// with the data.
pub(crate) fn apply_ops_dims(dims: &[Dim], ops: &[AxisOp]) -> Result<Vec<Dim>> {
    let mut out = Vec::with_capacity(dims.len());
    for (dim, op) in dims.iter().zip(ops) {
        match op {
            AxisOp::Full => out.push(dim.clone()),
            AxisOp::At(_) => {}
            AxisOp::Select(indices) => out.push(dim.slice_at(indices)?),
        }
    }
    Ok(out)
}

/// Positions (in the result's axis order) at which new axes land.
///
/// Each anchor is an input-axis position; the result position of the
/// `i`-th new axis is the number of input axes before its anchor that
/// survive, plus the `i` new axes already inserted before it.
pub(crate) fn insert_positions(ops: &[AxisOp], inserts: &[usize]) -> Vec<usize> {
    let mut surviving_before = Vec::with_capacity(ops.len() + 1);
    let mut count = 0;
    for op in ops {
        surviving_before.push(count);
        if !matches!(op, AxisOp::At(_)) {
            count += 1;
        }
    }
    surviving_before.push(count);
    inserts
        .iter()
        .enumerate()
        .map(|(i, &anchor)| surviving_before[anchor] + i)
        .collect()
}

pub(crate) fn mask_to_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter(|(_, &m)| m)
        .map(|(i, _)| i)
        .collect()
}

pub(crate) fn normalize_index(index: isize, axis: usize, len: usize) -> Result<usize> {
    let i = if index < 0 { index + len as isize } else { index };
    if i < 0 || i as usize >= len {
        return Err(DimArrayError::IndexOutOfBounds { axis, index, len });
    }
    Ok(i as usize)
}

/// Expand a `Slice` into explicit positions with Python's clamped slice
/// semantics (numpy basic slicing, which the engine mirrors for labels).
pub(crate) fn slice_to_indices(len: usize, slice: Slice) -> Result<Vec<usize>> {
    let n = len as isize;
    let step = slice.step;
    if step == 0 {
        return Err(DimArrayError::Unsupported { op: "zero-step slice" });
    }
    let (lower, upper) = if step > 0 { (0, n) } else { (-1, n - 1) };
    let clamp = |i: isize| {
        if i < 0 {
            (i + n).max(lower)
        } else {
            i.min(upper)
        }
    };
    let start = clamp(slice.start);
    let end = match slice.end {
        Some(e) => clamp(e),
        None => {
            if step > 0 {
                n
            } else {
                lower
            }
        }
    };
    let mut out = Vec::new();
    let mut i = start;
    while (step > 0 && i < end) || (step < 0 && i > end) {
        out.push(i as usize);
        i += step;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::slice_to_indices;
    use ndarray::Slice;

    #[test]
    fn slice_expansion_matches_python_semantics() {
        let s = |a, b: Option<isize>, c| slice_to_indices(5, Slice::new(a, b, c)).unwrap();
        assert_eq!(s(0, None, 1), vec![0, 1, 2, 3, 4]);
        assert_eq!(s(1, Some(3), 1), vec![1, 2]);
        assert_eq!(s(0, Some(100), 1), vec![0, 1, 2, 3, 4]);
        assert_eq!(s(-2, None, 1), vec![3, 4]);
        assert_eq!(s(0, None, 2), vec![0, 2, 4]);
        assert_eq!(s(4, None, -1), vec![4, 3, 2, 1, 0]);
        assert_eq!(s(-1, Some(1), -2), vec![4, 2]);
        assert_eq!(s(3, Some(3), 1), Vec::<usize>::new());
    }
}
