// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::attrs::{AttrValue, Attrs};
use crate::coord::Coord;
use crate::dimension::Dim;
use crate::error::{DimArrayError, Result};
use crate::predicate::{is_valid_name, Cmp, Predicate};
use crate::slicing::{AxisId, Ix};

/// An n-dimensional array with one named coordinate [`Dim`] per axis.
///
/// Axes can be addressed by name everywhere an axis is accepted, and
/// every derived array keeps its dims consistent with the data: an axis
/// reduced away loses its dim, a sliced axis gets an equally sliced dim,
/// and operations that cannot keep labels correct return an unlabeled
/// [`AttrArray`](crate::AttrArray) instead.
///
/// Invariants, checked at construction:
/// one dim per axis; each dim as long as its axis; dimension names
/// pairwise distinct and valid identifiers (so they can appear on the
/// left-hand side of a predicate string).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DimArray<A> {
    pub(crate) data: ArrayD<A>,
    pub(crate) dims: Vec<Dim>,
    pub(crate) attrs: Attrs,
}

/// A per-dimension constraint for [`DimArray::find`] and
/// [`DimArray::select`].
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// A boolean mask as long as the named axis.
    Mask(Vec<bool>),
    /// A coordinate comparison, like a predicate string without the name.
    Cmp(Cmp, Coord),
}

impl<A> DimArray<A> {
    /// Create a labeled array from data and one dimension per axis.
    pub fn new(data: ArrayD<A>, dims: Vec<Dim>) -> Result<DimArray<A>> {
        DimArray::with_attrs(data, dims, Attrs::new())
    }

    /// Create a labeled array carrying extra attributes.
    pub fn with_attrs(data: ArrayD<A>, dims: Vec<Dim>, attrs: Attrs) -> Result<DimArray<A>> {
        if dims.len() != data.ndim() {
            return Err(DimArrayError::DimCountMismatch {
                ndim: data.ndim(),
                dims: dims.len(),
            });
        }
        for (axis, (dim, &axis_len)) in dims.iter().zip(data.shape()).enumerate() {
            if dim.len() != axis_len {
                return Err(DimArrayError::DimLengthMismatch {
                    name: dim.name().to_owned(),
                    axis,
                    dim_len: dim.len(),
                    axis_len,
                });
            }
        }
        for (i, dim) in dims.iter().enumerate() {
            if !is_valid_name(dim.name()) {
                return Err(DimArrayError::InvalidDimName {
                    name: dim.name().to_owned(),
                });
            }
            if dims[..i].iter().any(|d| d.name() == dim.name()) {
                return Err(DimArrayError::DuplicateDimName {
                    name: dim.name().to_owned(),
                });
            }
        }
        Ok(DimArray::from_parts(data, dims, attrs))
    }

    /// Create a labeled array with synthesized default dimensions
    /// `dim1`, `dim2`, … carrying integer coordinates `0..len`.
    pub fn from_data(data: ArrayD<A>) -> DimArray<A> {
        let dims = data
            .shape()
            .iter()
            .enumerate()
            .map(|(i, &len)| {
                let values = (0..len as i64).map(Coord::Int).collect();
                Dim::from_parts(values, format!("dim{}", i + 1), Attrs::new())
            })
            .collect();
        DimArray::from_parts(data, dims, Attrs::new())
    }

    /// Construct without validation; callers guarantee consistency
    /// (engine-derived data always matches its derived dims).
    pub(crate) fn from_parts(data: ArrayD<A>, dims: Vec<Dim>, mut attrs: Attrs) -> DimArray<A> {
        debug_assert_eq!(dims.len(), data.ndim());
        attrs.reserve("dims");
        DimArray { data, dims, attrs }
    }

    /// The underlying data.
    pub fn data(&self) -> &ArrayD<A> {
        &self.data
    }

    /// Take the underlying data, dropping labels and attributes.
    pub fn into_data(self) -> ArrayD<A> {
        self.data
    }

    /// The dimensions, in axis order.
    pub fn dims(&self) -> &[Dim] {
        &self.dims
    }

    /// The dimension names, in axis order.
    pub fn dim_names(&self) -> Vec<&str> {
        self.dims.iter().map(|d| d.name()).collect()
    }

    /// The dimension named `name`.
    pub fn dim(&self, name: &str) -> Result<&Dim> {
        self.dims
            .iter()
            .find(|d| d.name() == name)
            .ok_or_else(|| DimArrayError::UnknownDimension {
                name: name.to_owned(),
            })
    }

    /// Shape of the underlying data.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The attribute bag.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Look up an attribute by name.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Set an attribute. Setting `dims` through the bag fails with
    /// `ImmutableAttribute`.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Result<()> {
        self.attrs.set(name, value)
    }

    /// Remove an attribute; fails with `ImmutableAttribute` for `dims`.
    pub fn remove_attr(&mut self, name: &str) -> Result<Option<AttrValue>> {
        self.attrs.remove(name)
    }

    /// Resolve an axis identifier (position or name) to a position.
    ///
    /// **Errors** with `AxisOutOfBounds` for a position `>= ndim` or
    /// `UnknownDimension` for a name that matches no dimension.
    pub fn get_axis<'a>(&self, axis: impl Into<AxisId<'a>>) -> Result<usize> {
        match axis.into() {
            AxisId::Pos(axis) => {
                if axis < self.ndim() {
                    Ok(axis)
                } else {
                    Err(DimArrayError::AxisOutOfBounds {
                        axis,
                        ndim: self.ndim(),
                    })
                }
            }
            AxisId::Name(name) => self
                .dims
                .iter()
                .position(|d| d.name() == name)
                .ok_or_else(|| DimArrayError::UnknownDimension {
                    name: name.to_owned(),
                }),
        }
    }

    /// Build a reusable multi-axis index from per-dimension constraints.
    ///
    /// Returns one [`Ix`] per axis: a boolean mask for each named
    /// dimension and [`Ix::Full`] for every axis left unconstrained. The
    /// result can be passed to [`DimArray::index`]
    /// (see `impl_methods`), which is exactly what
    /// [`DimArray::select`] does.
    pub fn find(&self, by: &[(&str, Filter)]) -> Result<Vec<Ix>> {
        let mut parts = vec![Ix::Full; self.ndim()];
        for (name, filter) in by {
            let axis = self.get_axis(*name)?;
            if !matches!(parts[axis], Ix::Full) {
                return Err(DimArrayError::ConflictingIndex {
                    name: (*name).to_owned(),
                });
            }
            let mask = match filter {
                Filter::Mask(mask) => {
                    if mask.len() != self.shape()[axis] {
                        return Err(DimArrayError::MaskLengthMismatch {
                            axis,
                            mask_len: mask.len(),
                            axis_len: self.shape()[axis],
                        });
                    }
                    mask.clone()
                }
                Filter::Cmp(cmp, value) => Predicate {
                    dim: (*name).to_owned(),
                    cmp: *cmp,
                    value: value.clone(),
                }
                .mask(&self.dims[axis]),
            };
            parts[axis] = Ix::Mask(mask);
        }
        Ok(parts)
    }

    /// Select by per-dimension constraints; axes not named are taken
    /// whole. Equivalent to `self.index(&self.find(by)?)`, and since a
    /// per-axis mask always preserves labels the result stays labeled.
    pub fn select(&self, by: &[(&str, Filter)]) -> Result<DimArray<A>>
    where
        A: Clone,
    {
        let parts = self.find(by)?;
        match self.index(&parts)? {
            crate::slicing::Indexed::Labeled(arr) => Ok(arr),
            _ => unreachable!("per-axis masks preserve labels"),
        }
    }
}

impl<A: PartialEq> PartialEq for DimArray<A> {
    /// Value equality: data, dims and attributes all equal.
    fn eq(&self, other: &DimArray<A>) -> bool {
        self.data == other.data && self.dims == other.dims && self.attrs == other.attrs
    }
}
