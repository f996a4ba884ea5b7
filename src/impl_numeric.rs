// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Sub};

use ndarray::{ArrayD, Axis, Zip};
use num_traits::{Float, FromPrimitive, One, Zero};

use crate::attr_array::AttrArray;
use crate::attrs::Attrs;
use crate::dimarray::DimArray;
use crate::dimension::Dim;
use crate::error::{DimArrayError, Result};
use crate::impl_methods::flat_array;
use crate::slicing::{mask_to_indices, AxisId};

fn reduced<B>(data: ArrayD<B>, dims: &[Dim], axis: usize, attrs: &Attrs) -> DimArray<B> {
    let dims = dims
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != axis)
        .map(|(_, d)| d.clone())
        .collect();
    DimArray::from_parts(data, dims, Attrs::propagate(&[attrs]))
}

fn same_shape<B>(data: ArrayD<B>, dims: &[Dim], attrs: &Attrs) -> DimArray<B> {
    DimArray::from_parts(data, dims.to_vec(), Attrs::propagate(&[attrs]))
}

/// Reductions along one axis and over the whole array.
///
/// The `*_axis` form reduces along a named or positioned axis, dropping
/// that axis and its dim and keeping every other dim; the plain form
/// reduces over all elements to a scalar. Extra attributes propagate to
/// every labeled result.
impl<A> DimArray<A> {
    /// Sum along an axis.
    pub fn sum_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<A>>
    where
        A: Clone + Zero + Add<Output = A>,
    {
        let axis = self.get_axis(axis)?;
        Ok(reduced(
            self.data.sum_axis(Axis(axis)),
            &self.dims,
            axis,
            &self.attrs,
        ))
    }

    /// Sum of all elements (zero for an empty array).
    pub fn sum(&self) -> A
    where
        A: Clone + Zero + Add<Output = A>,
    {
        self.data.sum()
    }

    /// Arithmetic mean along an axis.
    ///
    /// **Errors** with `EmptyReduction` when the axis has length 0.
    pub fn mean_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<A>>
    where
        A: Clone + Zero + FromPrimitive + Add<Output = A> + Div<Output = A>,
    {
        let axis = self.get_axis(axis)?;
        let data = self
            .data
            .mean_axis(Axis(axis))
            .ok_or(DimArrayError::EmptyReduction)?;
        Ok(reduced(data, &self.dims, axis, &self.attrs))
    }

    /// Arithmetic mean of all elements.
    ///
    /// **Errors** with `EmptyReduction` for an empty array.
    pub fn mean(&self) -> Result<A>
    where
        A: Clone + Zero + FromPrimitive + Add<Output = A> + Div<Output = A>,
    {
        self.data.mean().ok_or(DimArrayError::EmptyReduction)
    }

    /// Minimum along an axis.
    ///
    /// **Errors** with `EmptyReduction` when the axis has length 0.
    pub fn min_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<A>>
    where
        A: Clone + PartialOrd,
    {
        let axis = self.get_axis(axis)?;
        if self.shape()[axis] == 0 {
            return Err(DimArrayError::EmptyReduction);
        }
        let data = self.data.map_axis(Axis(axis), |lane| {
            let mut best = lane[0].clone();
            for v in lane.iter().skip(1) {
                if *v < best {
                    best = v.clone();
                }
            }
            best
        });
        Ok(reduced(data, &self.dims, axis, &self.attrs))
    }

    /// Maximum along an axis.
    ///
    /// **Errors** with `EmptyReduction` when the axis has length 0.
    pub fn max_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<A>>
    where
        A: Clone + PartialOrd,
    {
        let axis = self.get_axis(axis)?;
        if self.shape()[axis] == 0 {
            return Err(DimArrayError::EmptyReduction);
        }
        let data = self.data.map_axis(Axis(axis), |lane| {
            let mut best = lane[0].clone();
            for v in lane.iter().skip(1) {
                if *v > best {
                    best = v.clone();
                }
            }
            best
        });
        Ok(reduced(data, &self.dims, axis, &self.attrs))
    }

    /// Minimum of all elements. **Errors** with `EmptyReduction` for an
    /// empty array.
    pub fn min(&self) -> Result<A>
    where
        A: Clone + PartialOrd,
    {
        fold_flat(&self.data, |v, best| *v < *best)
    }

    /// Maximum of all elements. **Errors** with `EmptyReduction` for an
    /// empty array.
    pub fn max(&self) -> Result<A>
    where
        A: Clone + PartialOrd,
    {
        fold_flat(&self.data, |v, best| *v > *best)
    }

    /// Product along an axis.
    pub fn prod_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<A>>
    where
        A: Clone + One + Mul<Output = A>,
    {
        let axis = self.get_axis(axis)?;
        let data = self
            .data
            .fold_axis(Axis(axis), A::one(), |acc, x| acc.clone() * x.clone());
        Ok(reduced(data, &self.dims, axis, &self.attrs))
    }

    /// Product of all elements (one for an empty array).
    pub fn prod(&self) -> A
    where
        A: Clone + One + Mul<Output = A>,
    {
        self.data.product()
    }

    /// Variance along an axis with `ddof` delta degrees of freedom
    /// (0 for the population variance, 1 for the sample variance).
    ///
    /// **Errors** with `EmptyReduction` when the axis has length 0.
    pub fn var_axis<'a>(&self, axis: impl Into<AxisId<'a>>, ddof: A) -> Result<DimArray<A>>
    where
        A: Float + FromPrimitive,
    {
        let axis = self.get_axis(axis)?;
        if self.shape()[axis] == 0 {
            return Err(DimArrayError::EmptyReduction);
        }
        Ok(reduced(
            self.data.var_axis(Axis(axis), ddof),
            &self.dims,
            axis,
            &self.attrs,
        ))
    }

    /// Standard deviation along an axis with `ddof` delta degrees of
    /// freedom.
    ///
    /// **Errors** with `EmptyReduction` when the axis has length 0.
    pub fn std_axis<'a>(&self, axis: impl Into<AxisId<'a>>, ddof: A) -> Result<DimArray<A>>
    where
        A: Float + FromPrimitive,
    {
        let axis = self.get_axis(axis)?;
        if self.shape()[axis] == 0 {
            return Err(DimArrayError::EmptyReduction);
        }
        Ok(reduced(
            self.data.std_axis(Axis(axis), ddof),
            &self.dims,
            axis,
            &self.attrs,
        ))
    }

    /// Variance of all elements. **Errors** with `EmptyReduction` for an
    /// empty array.
    pub fn var(&self, ddof: A) -> Result<A>
    where
        A: Float + FromPrimitive,
    {
        if self.is_empty() {
            return Err(DimArrayError::EmptyReduction);
        }
        Ok(self.data.var(ddof))
    }

    /// Standard deviation of all elements. **Errors** with
    /// `EmptyReduction` for an empty array.
    pub fn std(&self, ddof: A) -> Result<A>
    where
        A: Float + FromPrimitive,
    {
        if self.is_empty() {
            return Err(DimArrayError::EmptyReduction);
        }
        Ok(self.data.std(ddof))
    }

    /// Peak-to-peak (maximum minus minimum) along an axis.
    ///
    /// **Errors** with `EmptyReduction` when the axis has length 0.
    pub fn ptp_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<A>>
    where
        A: Clone + PartialOrd + Sub<Output = A>,
    {
        let axis = self.get_axis(axis)?;
        if self.shape()[axis] == 0 {
            return Err(DimArrayError::EmptyReduction);
        }
        let data = self.data.map_axis(Axis(axis), |lane| {
            let mut min = lane[0].clone();
            let mut max = lane[0].clone();
            for v in lane.iter().skip(1) {
                if *v < min {
                    min = v.clone();
                }
                if *v > max {
                    max = v.clone();
                }
            }
            max - min
        });
        Ok(reduced(data, &self.dims, axis, &self.attrs))
    }

    /// Peak-to-peak of all elements. **Errors** with `EmptyReduction`
    /// for an empty array.
    pub fn ptp(&self) -> Result<A>
    where
        A: Clone + PartialOrd + Sub<Output = A>,
    {
        Ok(self.max()? - self.min()?)
    }

    /// Whether every element along an axis is non-zero (true for an
    /// empty axis).
    pub fn all_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<bool>>
    where
        A: Clone + Zero + PartialEq,
    {
        let axis = self.get_axis(axis)?;
        let data = self
            .data
            .map_axis(Axis(axis), |lane| lane.iter().all(|v| *v != A::zero()));
        Ok(reduced(data, &self.dims, axis, &self.attrs))
    }

    /// Whether any element along an axis is non-zero (false for an
    /// empty axis).
    pub fn any_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<bool>>
    where
        A: Clone + Zero + PartialEq,
    {
        let axis = self.get_axis(axis)?;
        let data = self
            .data
            .map_axis(Axis(axis), |lane| lane.iter().any(|v| *v != A::zero()));
        Ok(reduced(data, &self.dims, axis, &self.attrs))
    }

    /// Whether every element is non-zero.
    pub fn all(&self) -> bool
    where
        A: Zero + PartialEq,
    {
        self.data.iter().all(|v| *v != A::zero())
    }

    /// Whether any element is non-zero.
    pub fn any(&self) -> bool
    where
        A: Zero + PartialEq,
    {
        self.data.iter().any(|v| *v != A::zero())
    }

    /// Position of the first minimum along an axis.
    ///
    /// **Errors** with `EmptyReduction` when the axis has length 0.
    pub fn argmin_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<usize>>
    where
        A: Clone + PartialOrd,
    {
        let axis = self.get_axis(axis)?;
        if self.shape()[axis] == 0 {
            return Err(DimArrayError::EmptyReduction);
        }
        let data = self
            .data
            .map_axis(Axis(axis), |lane| arg_best(lane.iter(), |v, best| v < best));
        Ok(reduced(data, &self.dims, axis, &self.attrs))
    }

    /// Position of the first maximum along an axis.
    ///
    /// **Errors** with `EmptyReduction` when the axis has length 0.
    pub fn argmax_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<usize>>
    where
        A: Clone + PartialOrd,
    {
        let axis = self.get_axis(axis)?;
        if self.shape()[axis] == 0 {
            return Err(DimArrayError::EmptyReduction);
        }
        let data = self
            .data
            .map_axis(Axis(axis), |lane| arg_best(lane.iter(), |v, best| v > best));
        Ok(reduced(data, &self.dims, axis, &self.attrs))
    }

    /// Flat position (row-major) of the first minimum. **Errors** with
    /// `EmptyReduction` for an empty array.
    pub fn argmin(&self) -> Result<usize>
    where
        A: PartialOrd,
    {
        if self.is_empty() {
            return Err(DimArrayError::EmptyReduction);
        }
        Ok(arg_best(self.data.iter(), |v, best| v < best))
    }

    /// Flat position (row-major) of the first maximum. **Errors** with
    /// `EmptyReduction` for an empty array.
    pub fn argmax(&self) -> Result<usize>
    where
        A: PartialOrd,
    {
        if self.is_empty() {
            return Err(DimArrayError::EmptyReduction);
        }
        Ok(arg_best(self.data.iter(), |v, best| v > best))
    }

    /// Per-lane sort order along an axis: element `i` of each result
    /// lane is the position of the `i`-th smallest value in the source
    /// lane. The shape and all dims are kept.
    ///
    /// Incomparable values (NaN) are left where the sort finds them.
    pub fn argsort_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<usize>>
    where
        A: Clone + PartialOrd,
    {
        let axis = self.get_axis(axis)?;
        let mut out = ArrayD::<usize>::zeros(self.data.raw_dim());
        Zip::from(out.lanes_mut(Axis(axis)))
            .and(self.data.lanes(Axis(axis)))
            .for_each(|mut order, lane| {
                let mut idx: Vec<usize> = (0..lane.len()).collect();
                idx.sort_by(|&i, &j| lane[i].partial_cmp(&lane[j]).unwrap_or(Ordering::Equal));
                for (k, &i) in idx.iter().enumerate() {
                    order[k] = i;
                }
            });
        Ok(same_shape(out, &self.dims, &self.attrs))
    }

    /// Sort order of the flattened array (row-major); unlabeled since
    /// the flat axis has no per-element labels.
    pub fn argsort(&self) -> AttrArray<usize>
    where
        A: Clone + PartialOrd,
    {
        let flat: Vec<A> = self.data.iter().cloned().collect();
        let mut idx: Vec<usize> = (0..flat.len()).collect();
        idx.sort_by(|&i, &j| flat[i].partial_cmp(&flat[j]).unwrap_or(Ordering::Equal));
        AttrArray::from_parts(flat_array(idx), Attrs::propagate(&[&self.attrs]))
    }

    /// Cumulative sum along an axis; the shape and all dims are kept.
    pub fn cumsum_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<A>>
    where
        A: Clone + Add<Output = A>,
    {
        let axis = self.get_axis(axis)?;
        let mut data = self.data.clone();
        data.accumulate_axis_inplace(Axis(axis), |prev, cur| *cur = prev.clone() + cur.clone());
        Ok(same_shape(data, &self.dims, &self.attrs))
    }

    /// Cumulative product along an axis; the shape and all dims are kept.
    pub fn cumprod_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<DimArray<A>>
    where
        A: Clone + Mul<Output = A>,
    {
        let axis = self.get_axis(axis)?;
        let mut data = self.data.clone();
        data.accumulate_axis_inplace(Axis(axis), |prev, cur| *cur = prev.clone() * cur.clone());
        Ok(same_shape(data, &self.dims, &self.attrs))
    }

    /// Cumulative sum of the flattened array (row-major); unlabeled.
    pub fn cumsum(&self) -> AttrArray<A>
    where
        A: Clone + Add<Output = A>,
    {
        let mut flat: Vec<A> = self.data.iter().cloned().collect();
        for i in 1..flat.len() {
            flat[i] = flat[i - 1].clone() + flat[i].clone();
        }
        AttrArray::from_parts(flat_array(flat), Attrs::propagate(&[&self.attrs]))
    }

    /// Cumulative product of the flattened array (row-major); unlabeled.
    pub fn cumprod(&self) -> AttrArray<A>
    where
        A: Clone + Mul<Output = A>,
    {
        let mut flat: Vec<A> = self.data.iter().cloned().collect();
        for i in 1..flat.len() {
            flat[i] = flat[i - 1].clone() * flat[i].clone();
        }
        AttrArray::from_parts(flat_array(flat), Attrs::propagate(&[&self.attrs]))
    }

    /// Keep the positions along an axis where `mask` is true.
    ///
    /// The mask may be shorter than the axis; positions past its end are
    /// dropped. The axis keeps a consistently reduced dim.
    ///
    /// **Errors** with `MaskLengthMismatch` if the mask is longer than
    /// the axis.
    pub fn compress<'a>(&self, mask: &[bool], axis: impl Into<AxisId<'a>>) -> Result<DimArray<A>>
    where
        A: Clone,
    {
        let axis = self.get_axis(axis)?;
        if mask.len() > self.shape()[axis] {
            return Err(DimArrayError::MaskLengthMismatch {
                axis,
                mask_len: mask.len(),
                axis_len: self.shape()[axis],
            });
        }
        let indices = mask_to_indices(mask);
        let data = self.data.select(Axis(axis), &indices);
        let mut dims = self.dims.clone();
        dims[axis] = dims[axis].slice_at(&indices)?;
        Ok(DimArray::from_parts(
            data,
            dims,
            Attrs::propagate(&[&self.attrs]),
        ))
    }

    /// Keep the flat (row-major) positions where `mask` is true;
    /// unlabeled. The mask may be shorter than the element count.
    ///
    /// **Errors** with `MaskLengthMismatch` if the mask is longer than
    /// the element count.
    pub fn compress_flat(&self, mask: &[bool]) -> Result<AttrArray<A>>
    where
        A: Clone,
    {
        if mask.len() > self.len() {
            return Err(DimArrayError::MaskLengthMismatch {
                axis: 0,
                mask_len: mask.len(),
                axis_len: self.len(),
            });
        }
        let values: Vec<A> = self
            .data
            .iter()
            .zip(mask)
            .filter(|(_, &m)| m)
            .map(|(v, _)| v.clone())
            .collect();
        Ok(AttrArray::from_parts(
            flat_array(values),
            Attrs::propagate(&[&self.attrs]),
        ))
    }

    /// Take the given positions along an axis, in order and with
    /// repetition allowed. Repetition breaks coordinate uniqueness, so
    /// the result is unlabeled.
    ///
    /// **Errors** with `IndexOutOfBounds` for a position past the axis
    /// end.
    pub fn take<'a>(&self, indices: &[usize], axis: impl Into<AxisId<'a>>) -> Result<AttrArray<A>>
    where
        A: Clone,
    {
        let axis = self.get_axis(axis)?;
        let len = self.shape()[axis];
        for &i in indices {
            if i >= len {
                return Err(DimArrayError::IndexOutOfBounds {
                    axis,
                    index: i as isize,
                    len,
                });
            }
        }
        Ok(AttrArray::from_parts(
            self.data.select(Axis(axis), indices),
            Attrs::propagate(&[&self.attrs]),
        ))
    }

    /// Take the given flat (row-major) positions; unlabeled.
    ///
    /// **Errors** with `IndexOutOfBounds` for a position past the
    /// element count.
    pub fn take_flat(&self, indices: &[usize]) -> Result<AttrArray<A>>
    where
        A: Clone,
    {
        let flat: Vec<A> = self.data.iter().cloned().collect();
        let mut values = Vec::with_capacity(indices.len());
        for &i in indices {
            match flat.get(i) {
                Some(v) => values.push(v.clone()),
                None => {
                    return Err(DimArrayError::IndexOutOfBounds {
                        axis: 0,
                        index: i as isize,
                        len: flat.len(),
                    })
                }
            }
        }
        Ok(AttrArray::from_parts(
            flat_array(values),
            Attrs::propagate(&[&self.attrs]),
        ))
    }

    /// Repeat every element `n` times along an axis. Repetition breaks
    /// coordinate uniqueness, so the result is unlabeled.
    pub fn repeat<'a>(&self, n: usize, axis: impl Into<AxisId<'a>>) -> Result<AttrArray<A>>
    where
        A: Clone,
    {
        let axis = self.get_axis(axis)?;
        let reps = vec![n; self.shape()[axis]];
        self.repeat_by(&reps, axis)
    }

    /// Repeat each position along an axis its own number of times.
    ///
    /// **Errors** with `ShapeMismatch` if `reps` is not as long as the
    /// axis.
    pub fn repeat_by<'a>(&self, reps: &[usize], axis: impl Into<AxisId<'a>>) -> Result<AttrArray<A>>
    where
        A: Clone,
    {
        let axis = self.get_axis(axis)?;
        let len = self.shape()[axis];
        if reps.len() != len {
            return Err(DimArrayError::ShapeMismatch {
                expected: vec![len],
                actual: vec![reps.len()],
            });
        }
        let mut indices = Vec::new();
        for (i, &n) in reps.iter().enumerate() {
            indices.extend(std::iter::repeat(i).take(n));
        }
        Ok(AttrArray::from_parts(
            self.data.select(Axis(axis), &indices),
            Attrs::propagate(&[&self.attrs]),
        ))
    }

    /// Repeat every element of the flattened array `n` times; unlabeled.
    pub fn repeat_flat(&self, n: usize) -> AttrArray<A>
    where
        A: Clone,
    {
        let mut values = Vec::with_capacity(self.len() * n);
        for v in self.data.iter() {
            for _ in 0..n {
                values.push(v.clone());
            }
        }
        AttrArray::from_parts(flat_array(values), Attrs::propagate(&[&self.attrs]))
    }
}

// callers guarantee a non-empty iterator; first occurrence wins ties
fn arg_best<'a, A: 'a>(
    iter: impl Iterator<Item = &'a A>,
    better: impl Fn(&A, &A) -> bool,
) -> usize {
    let mut best = 0;
    let mut best_val: Option<&A> = None;
    for (i, v) in iter.enumerate() {
        let replace = match best_val {
            Some(b) => better(v, b),
            None => true,
        };
        if replace {
            best = i;
            best_val = Some(v);
        }
    }
    best
}

fn fold_flat<A: Clone + PartialOrd>(
    data: &ArrayD<A>,
    better: impl Fn(&A, &A) -> bool,
) -> Result<A> {
    let mut best: Option<A> = None;
    for v in data.iter() {
        let replace = match &best {
            Some(b) => better(v, b),
            None => true,
        };
        if replace {
            best = Some(v.clone());
        }
    }
    best.ok_or(DimArrayError::EmptyReduction)
}
