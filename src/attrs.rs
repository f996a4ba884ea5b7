// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{DimArrayError, Result};

/// A free-form attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AttrValue>),
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> AttrValue {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> AttrValue {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> AttrValue {
        AttrValue::Int(v as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> AttrValue {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> AttrValue {
        AttrValue::Str(v.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> AttrValue {
        AttrValue::Str(v)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(v: Vec<AttrValue>) -> AttrValue {
        AttrValue::List(v)
    }
}

/// How `propagate_with` resolves attribute values the sources disagree on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropagateRule {
    /// Drop the attribute from the derived instance (the default rule).
    DropConflicts,
    /// Keep the first source's value.
    PreferFirst,
}

/// An open-ended attribute bag with a fixed set of required names.
///
/// Required names are fixed when the owning object is constructed and
/// cannot be removed afterwards; names that are backed by a struct field
/// of the owner (`name` on [`Dim`](crate::Dim), `dims` on
/// [`DimArray`](crate::DimArray)) are reserved and cannot be set through
/// the bag either, so the bag can never fall out of sync with the field.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Attrs {
    map: BTreeMap<String, AttrValue>,
    required: BTreeSet<String>,
}

impl Attrs {
    /// Create an empty attribute bag with no required names.
    pub fn new() -> Attrs {
        Attrs::default()
    }

    /// Create a bag from `map`, requiring every name in `required` to be
    /// present.
    ///
    /// **Errors** with `MissingAttribute` naming the first absent
    /// required attribute.
    pub fn try_with_required(
        map: BTreeMap<String, AttrValue>,
        required: BTreeSet<String>,
    ) -> Result<Attrs> {
        for name in &required {
            if !map.contains_key(name) {
                return Err(DimArrayError::MissingAttribute { name: name.clone() });
            }
        }
        Ok(Attrs { map, required })
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.map.get(name)
    }

    /// Set an attribute.
    ///
    /// **Errors** with `ImmutableAttribute` for reserved names backed by
    /// a struct field of the owner.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Result<()> {
        let name = name.into();
        if self.required.contains(&name) && !self.map.contains_key(&name) {
            // reserved: required but stored outside the bag
            return Err(DimArrayError::ImmutableAttribute { name });
        }
        self.map.insert(name, value.into());
        Ok(())
    }

    /// Remove an attribute, returning its previous value.
    ///
    /// **Errors** with `ImmutableAttribute` if `name` is required.
    pub fn remove(&mut self, name: &str) -> Result<Option<AttrValue>> {
        if self.required.contains(name) {
            return Err(DimArrayError::ImmutableAttribute {
                name: name.to_owned(),
            });
        }
        Ok(self.map.remove(name))
    }

    /// Whether `name` is a required attribute.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// The required attribute names.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    /// Iterate over all stored attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored attributes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Mark `name` as required without requiring it to be in the bag.
    /// Used by owners whose required attribute lives in a struct field.
    pub(crate) fn reserve(&mut self, name: &str) {
        self.required.insert(name.to_owned());
    }

    /// Derive the attribute bag of a new instance from its sources with
    /// the default drop-on-disagreement rule.
    ///
    /// An attribute appears in the result iff every source that defines
    /// it agrees on the value. The result has no required names; the
    /// constructor of the derived instance re-establishes them.
    pub fn propagate(sources: &[&Attrs]) -> Attrs {
        Attrs::propagate_with(sources, PropagateRule::DropConflicts)
    }

    /// Like [`Attrs::propagate`] with an explicit conflict rule.
    pub fn propagate_with(sources: &[&Attrs], rule: PropagateRule) -> Attrs {
        let mut out = Attrs::new();
        for src in sources {
            'keys: for (name, value) in src.iter() {
                if out.map.contains_key(name) {
                    continue;
                }
                for other in sources {
                    match other.get(name) {
                        Some(v) if v == value => {}
                        None => {}
                        Some(_) => match rule {
                            PropagateRule::DropConflicts => continue 'keys,
                            PropagateRule::PreferFirst => break,
                        },
                    }
                }
                out.map.insert(name.to_owned(), value.clone());
            }
        }
        out
    }
}
