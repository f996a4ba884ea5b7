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
use crate::error::Result;

/// An n-dimensional array with an attribute bag but no axis labels.
///
/// This is the degradation target for operations that cannot keep
/// per-axis labels correct (flattening boolean selection, `take`,
/// `repeat`, rank-changing `reshape`): the data and the propagated
/// attributes survive, the dimensions do not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttrArray<A> {
    data: ArrayD<A>,
    attrs: Attrs,
}

impl<A> AttrArray<A> {
    /// Create an array from data and an attribute bag.
    pub fn new(data: ArrayD<A>, attrs: Attrs) -> AttrArray<A> {
        AttrArray { data, attrs }
    }

    pub(crate) fn from_parts(data: ArrayD<A>, attrs: Attrs) -> AttrArray<A> {
        AttrArray { data, attrs }
    }

    /// The underlying data.
    pub fn data(&self) -> &ArrayD<A> {
        &self.data
    }

    /// Take the underlying data, dropping the attributes.
    pub fn into_data(self) -> ArrayD<A> {
        self.data
    }

    /// The attribute bag.
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Look up an attribute by name.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Set an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Result<()> {
        self.attrs.set(name, value)
    }

    /// Remove an attribute; fails for required attributes.
    pub fn remove_attr(&mut self, name: &str) -> Result<Option<AttrValue>> {
        self.attrs.remove(name)
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
}
