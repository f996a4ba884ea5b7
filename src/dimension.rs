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
use crate::error::{DimArrayError, Result};

/// A named 1-D coordinate axis.
///
/// A `Dim` labels one axis of a [`DimArray`](crate::DimArray): it holds a
/// sequence of pairwise-distinct [`Coord`] values, a required `name`, and
/// free-form attributes (`unit`, …). The name must be non-blank; whether
/// it is a valid identifier is checked when the dim is attached to an
/// array, since only attached names participate in predicate indexing.
///
/// Once attached to an array a `Dim` is value-like: derived arrays carry
/// copies, and the only sanctioned way to change an axis's labels is to
/// construct a new array with a new `Dim`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dim {
    name: String,
    values: Vec<Coord>,
    attrs: Attrs,
}

impl Dim {
    /// Create a dimension from coordinate values and a name.
    ///
    /// **Errors** with `MissingName` if the name is blank, or `NotUnique`
    /// if the values contain a duplicate.
    pub fn new(values: impl Into<Vec<Coord>>, name: impl Into<String>) -> Result<Dim> {
        Dim::with_attrs(values, name, Attrs::new())
    }

    /// Create a dimension carrying extra attributes.
    pub fn with_attrs(
        values: impl Into<Vec<Coord>>,
        name: impl Into<String>,
        mut attrs: Attrs,
    ) -> Result<Dim> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DimArrayError::MissingName);
        }
        let values = values.into();
        check_unique(&values)?;
        attrs.reserve("name");
        Ok(Dim {
            name,
            values,
            attrs,
        })
    }

    /// Create a dimension from an n-dimensional coordinate array,
    /// squeezing it to 1-D.
    ///
    /// Any number of singleton axes is allowed (a 0-d scalar expands to
    /// length 1); more than one axis of length > 1 **errors** with
    /// `NotOneDimensional`.
    pub fn from_array(values: ArrayD<Coord>, name: impl Into<String>) -> Result<Dim> {
        let long_axes = values.shape().iter().filter(|&&len| len > 1).count();
        if long_axes > 1 {
            return Err(DimArrayError::NotOneDimensional {
                shape: values.shape().to_vec(),
            });
        }
        Dim::new(values.into_iter().collect::<Vec<_>>(), name)
    }

    /// Construct without the uniqueness check. `extend` concatenates two
    /// coordinate sequences on the join axis without re-checking
    /// uniqueness, and engine-driven slicing is unique by construction.
    pub(crate) fn from_parts(values: Vec<Coord>, name: String, mut attrs: Attrs) -> Dim {
        attrs.reserve("name");
        Dim {
            name,
            values,
            attrs,
        }
    }

    /// The dimension's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the dimension. **Errors** with `MissingName` on a blank name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DimArrayError::MissingName);
        }
        self.name = name;
        Ok(())
    }

    /// The coordinate values, in axis order.
    pub fn values(&self) -> &[Coord] {
        &self.values
    }

    /// Number of coordinate values (the axis length).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coordinate at `index`.
    pub fn get(&self, index: usize) -> Option<&Coord> {
        self.values.get(index)
    }

    /// Position of the coordinate equal to `value`, if present.
    pub fn position_of(&self, value: &Coord) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// The attribute bag.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Look up an attribute by name.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Set an attribute. Setting `name` through the bag fails with
    /// `ImmutableAttribute`; use [`Dim::set_name`] instead.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Result<()> {
        self.attrs.set(name, value)
    }

    /// Remove an attribute; fails with `ImmutableAttribute` for `name`.
    pub fn remove_attr(&mut self, name: &str) -> Result<Option<AttrValue>> {
        self.attrs.remove(name)
    }

    /// A new dimension containing the coordinates at `indices`, in the
    /// given order, with the same name and attributes.
    ///
    /// **Errors** with `IndexOutOfBounds` for an invalid index.
    pub fn slice_at(&self, indices: &[usize]) -> Result<Dim> {
        let mut values = Vec::with_capacity(indices.len());
        for &i in indices {
            match self.values.get(i) {
                Some(v) => values.push(v.clone()),
                None => {
                    return Err(DimArrayError::IndexOutOfBounds {
                        axis: 0,
                        index: i as isize,
                        len: self.values.len(),
                    })
                }
            }
        }
        Ok(Dim::from_parts(values, self.name.clone(), self.attrs.clone()))
    }

    /// A new dimension keeping the coordinates where `mask` is true.
    ///
    /// **Errors** with `MaskLengthMismatch` if the mask length differs
    /// from the dimension length.
    pub fn masked(&self, mask: &[bool]) -> Result<Dim> {
        if mask.len() != self.values.len() {
            return Err(DimArrayError::MaskLengthMismatch {
                axis: 0,
                mask_len: mask.len(),
                axis_len: self.values.len(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(mask)
            .filter(|(_, &m)| m)
            .map(|(v, _)| v.clone())
            .collect();
        Ok(Dim::from_parts(values, self.name.clone(), self.attrs.clone()))
    }

    /// Whether two dims describe the same axis: same name and the same
    /// coordinate values. Attributes are not compared.
    pub fn same_axis(&self, other: &Dim) -> bool {
        self.name == other.name && self.values == other.values
    }
}

fn check_unique(values: &[Coord]) -> Result<()> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].cmp(&values[j]));
    for pair in order.windows(2) {
        if values[pair[0]] == values[pair[1]] {
            return Err(DimArrayError::NotUnique {
                value: values[pair[0]].to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Dim;
    use crate::coord::Coord;
    use crate::error::DimArrayError;

    #[test]
    fn duplicate_values_are_rejected() {
        let err = Dim::new(coords![1, 2, 2, 3], "test").unwrap_err();
        assert_eq!(err, DimArrayError::NotUnique { value: "2".into() });
        // numeric equality across variants counts as a duplicate
        let err = Dim::new(vec![Coord::Int(2), Coord::Float(2.0)], "test").unwrap_err();
        assert!(matches!(err, DimArrayError::NotUnique { .. }));
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(Dim::new(coords![1], "").unwrap_err(), DimArrayError::MissingName);
        assert_eq!(Dim::new(coords![1], "  ").unwrap_err(), DimArrayError::MissingName);
        let mut d = Dim::new(coords![1], "ok").unwrap();
        assert_eq!(d.set_name(" "), Err(DimArrayError::MissingName));
    }
}
