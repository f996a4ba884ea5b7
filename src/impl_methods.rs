// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ndarray::{concatenate, ArrayD, Axis, IxDyn};

use crate::attr_array::AttrArray;
use crate::attrs::Attrs;
use crate::coord::Coord;
use crate::dimarray::DimArray;
use crate::dimension::Dim;
use crate::error::{DimArrayError, Result};
use crate::slicing::{
    apply_ops, apply_ops_dims, insert_positions, resolve, AxisId, AxisOp, Indexed, Ix,
    ResolvedIndex,
};

/// Indexing and shape operations.
impl<A> DimArray<A>
where
    A: Clone,
{
    /// Index with a mixture of positions, slices, masks, fancy index
    /// lists, new-axis markers and predicate strings.
    ///
    /// Components resolve to one operation per axis: predicate strings
    /// go to their named axis wherever they appear, positional
    /// components fill the remaining axes left to right, and trailing
    /// axes are taken whole. A sole bare dimension name returns
    /// [`Indexed::Axis`], the dimension itself rather than a data slice.
    ///
    /// An axis indexed by a single position is dropped together with its
    /// dim; every surviving axis keeps a consistently reduced dim. A
    /// new axis gets a synthesized dim named `newaxis_<position>` with
    /// the single coordinate `0`. Extra attributes propagate to the
    /// result.
    ///
    /// For a boolean mask spanning all axes at once, see
    /// [`DimArray::masked`].
    pub fn index(&self, parts: &[Ix]) -> Result<Indexed<A>> {
        match resolve(parts, &self.dims, self.shape())? {
            ResolvedIndex::Axis(axis) => Ok(Indexed::Axis(self.dims[axis].clone())),
            ResolvedIndex::Ops { ops, inserts } => {
                let mut data = apply_ops(&self.data, &ops);
                let mut dims = apply_ops_dims(&self.dims, &ops)?;
                for pos in insert_positions(&ops, &inserts) {
                    data = data.insert_axis(Axis(pos));
                    dims.insert(
                        pos,
                        Dim::from_parts(
                            vec![Coord::Int(0)],
                            format!("newaxis_{}", pos),
                            Attrs::new(),
                        ),
                    );
                }
                Ok(Indexed::Labeled(DimArray::from_parts(
                    data,
                    dims,
                    Attrs::propagate(&[&self.attrs]),
                )))
            }
        }
    }

    /// Select the elements where a full-shape boolean mask is true.
    ///
    /// A mask spanning several axes collapses them into one flat axis in
    /// row-major order, so per-axis labels cannot be reconstructed: the
    /// result is an unlabeled [`AttrArray`] with propagated attributes.
    ///
    /// **Errors** with `ShapeMismatch` if the mask shape differs from
    /// the array shape.
    pub fn masked(&self, mask: &ArrayD<bool>) -> Result<AttrArray<A>> {
        if mask.shape() != self.shape() {
            return Err(DimArrayError::ShapeMismatch {
                expected: self.shape().to_vec(),
                actual: mask.shape().to_vec(),
            });
        }
        let values: Vec<A> = self
            .data
            .iter()
            .zip(mask.iter())
            .filter(|(_, &m)| m)
            .map(|(v, _)| v.clone())
            .collect();
        Ok(AttrArray::from_parts(
            flat_array(values),
            Attrs::propagate(&[&self.attrs]),
        ))
    }

    /// Reshape to `shape`, in row-major element order.
    ///
    /// Labels survive only when the new shape equals the old one axis
    /// for axis; any other reshape breaks the per-axis coordinate
    /// correspondence and returns [`Indexed::Unlabeled`].
    ///
    /// **Errors** with `ShapeMismatch` if the element counts differ.
    pub fn reshape(&self, shape: &[usize]) -> Result<Indexed<A>> {
        if shape.iter().product::<usize>() != self.len() {
            return Err(DimArrayError::ShapeMismatch {
                expected: self.shape().to_vec(),
                actual: shape.to_vec(),
            });
        }
        let flat: Vec<A> = self.data.iter().cloned().collect();
        let data = match ArrayD::from_shape_vec(IxDyn(shape), flat) {
            Ok(data) => data,
            Err(_) => {
                return Err(DimArrayError::ShapeMismatch {
                    expected: self.shape().to_vec(),
                    actual: shape.to_vec(),
                })
            }
        };
        if shape == self.shape() {
            Ok(Indexed::Labeled(DimArray::from_parts(
                data,
                self.dims.clone(),
                Attrs::propagate(&[&self.attrs]),
            )))
        } else {
            Ok(Indexed::Unlabeled(AttrArray::from_parts(
                data,
                Attrs::propagate(&[&self.attrs]),
            )))
        }
    }

    /// In-place resize cannot keep per-axis labels correct, so it is
    /// refused outright; always **errors** with `Unsupported`.
    pub fn resize(&mut self, _shape: &[usize]) -> Result<()> {
        Err(DimArrayError::Unsupported { op: "resize" })
    }

    /// Insert `dim` as a new leading axis, replicating the data once per
    /// coordinate along it.
    ///
    /// The result's dims are `dim` followed by the existing dims; full
    /// construction validation applies, so a name collision with an
    /// existing dimension is an error.
    pub fn add_dim(&self, dim: Dim) -> Result<DimArray<A>> {
        let mut shape = Vec::with_capacity(self.ndim() + 1);
        shape.push(dim.len());
        shape.extend_from_slice(self.shape());
        let view = self.data.view().insert_axis(Axis(0));
        let data = match view.broadcast(IxDyn(&shape)) {
            Some(b) => b.to_owned(),
            None => {
                return Err(DimArrayError::ShapeMismatch {
                    expected: self.shape().to_vec(),
                    actual: shape,
                })
            }
        };
        let mut dims = Vec::with_capacity(self.ndim() + 1);
        dims.push(dim);
        dims.extend(self.dims.iter().cloned());
        DimArray::with_attrs(data, dims, Attrs::propagate(&[&self.attrs]))
    }

    /// Concatenate `self` and `other` along the named or positioned axis.
    ///
    /// Every other axis's dim must match pointwise between the two
    /// arrays (same name, same coordinates), and the join axis must at
    /// least agree on its name; **errors** with `DimensionMismatch`
    /// naming the first that differs. The join axis's dim is the
    /// coordinate-wise concatenation of the inputs' dims; uniqueness is
    /// not re-checked on it. Attributes propagate from both sources.
    pub fn extend<'a>(
        &self,
        other: &DimArray<A>,
        axis: impl Into<AxisId<'a>>,
    ) -> Result<DimArray<A>> {
        let axis = self.get_axis(axis)?;
        if other.ndim() != self.ndim() {
            return Err(DimArrayError::DimCountMismatch {
                ndim: self.ndim(),
                dims: other.ndim(),
            });
        }
        for (i, (a, b)) in self.dims.iter().zip(other.dims()).enumerate() {
            // the join axis must agree on the name; its values may differ
            let matches = if i == axis {
                a.name() == b.name()
            } else {
                a.same_axis(b)
            };
            if !matches {
                return Err(DimArrayError::DimensionMismatch {
                    name: a.name().to_owned(),
                });
            }
        }
        let data = concatenate(Axis(axis), &[self.data.view(), other.data.view()]).map_err(
            |_| DimArrayError::ShapeMismatch {
                expected: self.shape().to_vec(),
                actual: other.shape().to_vec(),
            },
        )?;
        let mut values = self.dims[axis].values().to_vec();
        values.extend_from_slice(other.dims[axis].values());
        let join_dim = Dim::from_parts(
            values,
            self.dims[axis].name().to_owned(),
            Attrs::propagate(&[self.dims[axis].attrs(), other.dims[axis].attrs()]),
        );
        let mut dims = self.dims.clone();
        dims[axis] = join_dim;
        Ok(DimArray::from_parts(
            data,
            dims,
            Attrs::propagate(&[&self.attrs, &other.attrs]),
        ))
    }

    /// Swap two axes, each given as a position or a name.
    pub fn swapaxes<'a, 'b>(
        &self,
        a: impl Into<AxisId<'a>>,
        b: impl Into<AxisId<'b>>,
    ) -> Result<DimArray<A>> {
        let a = self.get_axis(a)?;
        let b = self.get_axis(b)?;
        let mut data = self.data.clone();
        data.swap_axes(a, b);
        let mut dims = self.dims.clone();
        dims.swap(a, b);
        Ok(DimArray::from_parts(
            data,
            dims,
            Attrs::propagate(&[&self.attrs]),
        ))
    }

    /// Reverse the axis order, and the dims with it.
    pub fn transpose(&self) -> DimArray<A> {
        let data = self.data.clone().reversed_axes();
        let mut dims = self.dims.clone();
        dims.reverse();
        DimArray::from_parts(data, dims, Attrs::propagate(&[&self.attrs]))
    }

    /// Drop every axis of length 1 together with its dim.
    pub fn squeeze(&self) -> DimArray<A> {
        let ops: Vec<AxisOp> = self
            .shape()
            .iter()
            .map(|&len| if len == 1 { AxisOp::At(0) } else { AxisOp::Full })
            .collect();
        let data = apply_ops(&self.data, &ops);
        let dims = self
            .dims
            .iter()
            .zip(self.shape())
            .filter(|(_, &len)| len != 1)
            .map(|(d, _)| d.clone())
            .collect();
        DimArray::from_parts(data, dims, Attrs::propagate(&[&self.attrs]))
    }

    /// Flatten to 1-D in row-major order. The flat axis has no
    /// meaningful per-element labels, so the result is unlabeled.
    pub fn ravel(&self) -> AttrArray<A> {
        let flat: Vec<A> = self.data.iter().cloned().collect();
        AttrArray::from_parts(flat_array(flat), Attrs::propagate(&[&self.attrs]))
    }
}

// a 1-d shape always matches its vec
pub(crate) fn flat_array<A>(values: Vec<A>) -> ArrayD<A> {
    let len = values.len();
    match ArrayD::from_shape_vec(IxDyn(&[len]), values) {
        Ok(a) => a,
        Err(_) => unreachable!(),
    }
}
