// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Binning an axis into contiguous position ranges, reducing each bin
//! to one element.

use ndarray::{concatenate, ArrayD, Axis};
use num_traits::{Float, FromPrimitive, One, Zero};

use crate::attrs::Attrs;
use crate::coord::Coord;
use crate::dimarray::DimArray;
use crate::dimension::Dim;
use crate::error::{DimArrayError, Result};
use crate::slicing::AxisId;

/// How to partition an axis into bins. Bounds are positions along the
/// axis, not coordinate values.
#[derive(Clone, Debug, PartialEq)]
pub enum BinSpec {
    /// Split into this many contiguous bins. When the axis length is not
    /// a multiple, the leading `len % count` bins get one extra element
    /// (or the split is refused, see `error_on_nonexact`).
    Count(usize),
    /// Explicit half-open `[start, end)` position ranges, optionally
    /// labeled per bin.
    Ranges(Vec<BinRange>),
}

/// One explicit bin: a half-open position range and an optional label
/// overriding the [`BinLabels`] policy for this bin.
#[derive(Clone, Debug, PartialEq)]
pub struct BinRange {
    pub start: usize,
    pub end: usize,
    pub label: Option<Coord>,
}

impl BinRange {
    pub fn new(start: usize, end: usize) -> BinRange {
        BinRange {
            start,
            end,
            label: None,
        }
    }

    pub fn labeled(start: usize, end: usize, label: impl Into<Coord>) -> BinRange {
        BinRange {
            start,
            end,
            label: Some(label.into()),
        }
    }
}

/// How the binned axis's new coordinates are derived.
#[derive(Clone, Debug, PartialEq)]
pub enum BinLabels {
    /// Bin positions `0, 1, 2, …` as integer coordinates.
    Sequential,
    /// Apply the bin reduction to each bin's coordinate values; requires
    /// numeric coordinates.
    Function,
    /// One coordinate per bin, given up front.
    Explicit(Vec<Coord>),
}

/// The reduction applied within each bin (and, for
/// [`BinLabels::Function`], to each bin's coordinates).
///
/// `Std` and `Var` are the population forms (zero delta degrees of
/// freedom).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reduction {
    Sum,
    Mean,
    Min,
    Max,
    Prod,
    Std,
    Var,
}

impl Reduction {
    /// Reduce `data` along `axis`, dropping the axis. The axis must be
    /// non-empty.
    fn apply<A>(&self, data: &ArrayD<A>, axis: Axis) -> Result<ArrayD<A>>
    where
        A: Float + FromPrimitive,
    {
        let out = match self {
            Reduction::Sum => data.sum_axis(axis),
            Reduction::Mean => data.mean_axis(axis).ok_or(DimArrayError::EmptyReduction)?,
            Reduction::Min => data.map_axis(axis, |lane| {
                lane.iter().fold(A::infinity(), |a, &b| a.min(b))
            }),
            Reduction::Max => data.map_axis(axis, |lane| {
                lane.iter().fold(A::neg_infinity(), |a, &b| a.max(b))
            }),
            Reduction::Prod => data.fold_axis(axis, A::one(), |&acc, &x| acc * x),
            Reduction::Std => data.std_axis(axis, A::zero()),
            Reduction::Var => data.var_axis(axis, A::zero()),
        };
        Ok(out)
    }

    /// Reduce a non-empty slice of coordinate values to one number.
    fn apply_scalar(&self, values: &[f64]) -> f64 {
        let n = values.len() as f64;
        match self {
            Reduction::Sum => values.iter().sum(),
            Reduction::Mean => values.iter().sum::<f64>() / n,
            Reduction::Min => values.iter().fold(f64::INFINITY, |a, &b| a.min(b)),
            Reduction::Max => values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)),
            Reduction::Prod => values.iter().product(),
            Reduction::Std => self.variance(values).sqrt(),
            Reduction::Var => self.variance(values),
        }
    }

    fn variance(&self, values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
    }
}

impl<A> DimArray<A>
where
    A: Float + FromPrimitive,
{
    /// Bin an axis into contiguous position ranges, reducing each bin to
    /// one element with `reduce` and giving the binned axis new
    /// coordinates per `labels`.
    ///
    /// With [`BinSpec::Count`] and an axis length that is not a multiple
    /// of the count, `error_on_nonexact` decides between refusing
    /// (`UnevenBins`) and uneven bins with the leading remainder bins one
    /// element longer. `error_on_nonexact` is ignored for explicit
    /// ranges, which need not cover the axis or be disjoint.
    ///
    /// The new dim keeps the old name and attributes and is fully
    /// validated, so duplicate labels **error** with `NotUnique`.
    pub fn make_bins<'a>(
        &self,
        axis: impl Into<AxisId<'a>>,
        spec: BinSpec,
        reduce: Reduction,
        labels: BinLabels,
        error_on_nonexact: bool,
    ) -> Result<DimArray<A>> {
        let axis = self.get_axis(axis)?;
        let len = self.shape()[axis];
        let bins = match &spec {
            BinSpec::Count(count) => split_count(len, *count, error_on_nonexact)?,
            BinSpec::Ranges(ranges) => {
                let mut bins = Vec::with_capacity(ranges.len());
                for (i, r) in ranges.iter().enumerate() {
                    if r.start >= r.end {
                        return Err(DimArrayError::EmptyBin { index: i });
                    }
                    if r.end > len {
                        return Err(DimArrayError::IndexOutOfBounds {
                            axis,
                            index: r.end as isize,
                            len,
                        });
                    }
                    bins.push(r.start..r.end);
                }
                bins
            }
        };

        if let BinLabels::Explicit(coords) = &labels {
            if coords.len() != bins.len() {
                return Err(DimArrayError::BinLabelCount {
                    expected: bins.len(),
                    actual: coords.len(),
                });
            }
        }

        let dim = &self.dims[axis];
        let mut pieces = Vec::with_capacity(bins.len());
        let mut coords = Vec::with_capacity(bins.len());
        for (i, bin) in bins.iter().enumerate() {
            let indices: Vec<usize> = bin.clone().collect();
            let chunk = self.data.select(Axis(axis), &indices);
            pieces.push(reduce.apply(&chunk, Axis(axis))?.insert_axis(Axis(axis)));

            let explicit = match &spec {
                BinSpec::Ranges(ranges) => ranges[i].label.clone(),
                BinSpec::Count(_) => None,
            };
            let coord = match (explicit, &labels) {
                (Some(c), _) => c,
                (None, BinLabels::Sequential) => Coord::Int(i as i64),
                (None, BinLabels::Explicit(coords)) => coords[i].clone(),
                (None, BinLabels::Function) => {
                    let mut values = Vec::with_capacity(indices.len());
                    for &j in &indices {
                        match dim.values()[j].as_f64() {
                            Some(v) => values.push(v),
                            None => {
                                return Err(DimArrayError::Unsupported {
                                    op: "function bin labels over non-numeric coordinates",
                                })
                            }
                        }
                    }
                    Coord::Float(reduce.apply_scalar(&values))
                }
            };
            coords.push(coord);
        }

        let views: Vec<_> = pieces.iter().map(|p| p.view()).collect();
        let data = concatenate(Axis(axis), &views).map_err(|_| DimArrayError::ShapeMismatch {
            expected: self.shape().to_vec(),
            actual: vec![bins.len()],
        })?;
        let new_dim = Dim::with_attrs(
            coords,
            dim.name().to_owned(),
            Attrs::propagate(&[dim.attrs()]),
        )?;
        let mut dims = self.dims.clone();
        dims[axis] = new_dim;
        Ok(DimArray::from_parts(
            data,
            dims,
            Attrs::propagate(&[&self.attrs]),
        ))
    }
}

/// Split `0..len` into `count` contiguous ranges. When `len` is not a
/// multiple of `count`, the leading `len % count` ranges get one extra
/// element; with `error_on_nonexact` the split is refused instead. Every
/// range must come out non-empty.
fn split_count(
    len: usize,
    count: usize,
    error_on_nonexact: bool,
) -> Result<Vec<std::ops::Range<usize>>> {
    if count == 0 || (error_on_nonexact && len % count != 0) {
        return Err(DimArrayError::UnevenBins { len, count });
    }
    let base = len / count;
    let extra = len % count;
    let mut bins = Vec::with_capacity(count);
    let mut start = 0;
    for i in 0..count {
        let size = base + usize::from(i < extra);
        if size == 0 {
            return Err(DimArrayError::EmptyBin { index: i });
        }
        bins.push(start..start + size);
        start += size;
    }
    Ok(bins)
}
