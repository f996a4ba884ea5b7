// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single coordinate label on a dimension.
///
/// Coordinate axes are heterogeneous in practice: sample times are floats,
/// trial numbers are ints, bin labels are strings. Comparisons are
/// numeric across the `Int`/`Float` variants, so `Coord::Int(150)` equals
/// `Coord::Float(150.0)` — the convention coordinate lookups rely on.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Coord {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Coord {
    /// The numeric value of this coordinate, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Coord::Int(v) => Some(v as f64),
            Coord::Float(v) => Some(v),
            Coord::Str(_) => None,
        }
    }

    /// Compare two coordinates, or `None` when a string meets a number.
    ///
    /// This is the comparison the predicate language uses: ordering a
    /// string against a number selects nothing, while `!=` selects
    /// everything. Floats compare by `total_cmp`.
    pub fn compare(&self, other: &Coord) -> Option<Ordering> {
        match (self, other) {
            (Coord::Int(a), Coord::Int(b)) => Some(a.cmp(b)),
            (Coord::Str(a), Coord::Str(b)) => Some(a.cmp(b)),
            (Coord::Str(_), _) | (_, Coord::Str(_)) => None,
            (a, b) => {
                // at least one side is a float
                let (a, b) = (a.as_f64(), b.as_f64());
                match (a, b) {
                    (Some(a), Some(b)) => Some(a.total_cmp(&b)),
                    _ => None,
                }
            }
        }
    }
}

impl PartialEq for Coord {
    fn eq(&self, other: &Coord) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl Eq for Coord {}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Coord) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order over all variants, used for the uniqueness check at
/// dimension construction: numbers sort before strings; within numbers
/// the order is numeric. Consistent with `PartialEq` (a string never
/// compares equal to a number).
impl Ord for Coord {
    fn cmp(&self, other: &Coord) -> Ordering {
        match self.compare(other) {
            Some(ord) => ord,
            None => match (self, other) {
                (Coord::Str(_), _) => Ordering::Greater,
                _ => Ordering::Less,
            },
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coord::Int(v) => write!(f, "{}", v),
            Coord::Float(v) => write!(f, "{}", v),
            Coord::Str(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Coord {
    fn from(v: i64) -> Coord {
        Coord::Int(v)
    }
}

impl From<i32> for Coord {
    fn from(v: i32) -> Coord {
        Coord::Int(v as i64)
    }
}

impl From<usize> for Coord {
    fn from(v: usize) -> Coord {
        Coord::Int(v as i64)
    }
}

impl From<f64> for Coord {
    fn from(v: f64) -> Coord {
        Coord::Float(v)
    }
}

impl From<&str> for Coord {
    fn from(v: &str) -> Coord {
        Coord::Str(v.to_owned())
    }
}

impl From<String> for Coord {
    fn from(v: String) -> Coord {
        Coord::Str(v)
    }
}
