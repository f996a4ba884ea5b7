// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::coord::Coord;
use crate::dimension::Dim;
use crate::error::{DimArrayError, Result};

/// A comparison operator of the predicate-string language.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cmp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Cmp {
    /// Whether an element with the given ordering relative to the
    /// predicate value satisfies this comparator. `None` means the two
    /// values are incomparable (string against number): only `!=` holds.
    pub fn matches(&self, ord: Option<Ordering>) -> bool {
        match (self, ord) {
            (Cmp::Eq, Some(Ordering::Equal)) => true,
            (Cmp::Ne, ord) => ord != Some(Ordering::Equal),
            (Cmp::Lt, Some(Ordering::Less)) => true,
            (Cmp::Le, Some(Ordering::Less | Ordering::Equal)) => true,
            (Cmp::Gt, Some(Ordering::Greater)) => true,
            (Cmp::Ge, Some(Ordering::Greater | Ordering::Equal)) => true,
            _ => false,
        }
    }
}

/// A parsed predicate-string index component: `<dimension><op><value>`.
///
/// Parsing is kept separate from index normalization so positional,
/// slice, mask and fancy index forms share one resolution path whatever
/// their source syntax.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    pub dim: String,
    pub cmp: Cmp,
    pub value: Coord,
}

impl Predicate {
    /// Evaluate against a dimension, yielding a per-coordinate mask.
    pub fn mask(&self, dim: &Dim) -> Vec<bool> {
        dim.values()
            .iter()
            .map(|v| self.cmp.matches(v.compare(&self.value)))
            .collect()
    }
}

// two-character operators must come first
const OPERATORS: [(&str, Cmp); 6] = [
    ("==", Cmp::Eq),
    ("!=", Cmp::Ne),
    ("<=", Cmp::Le),
    (">=", Cmp::Ge),
    ("<", Cmp::Lt),
    (">", Cmp::Gt),
];

impl FromStr for Predicate {
    type Err = DimArrayError;

    fn from_str(s: &str) -> Result<Predicate> {
        let syntax_err = || DimArrayError::PredicateSyntax { expr: s.to_owned() };
        for (op, cmp) in OPERATORS {
            if let Some(pos) = s.find(op) {
                let dim = s[..pos].trim();
                if !is_valid_name(dim) {
                    return Err(syntax_err());
                }
                let value = parse_literal(s[pos + op.len()..].trim()).ok_or_else(syntax_err)?;
                return Ok(Predicate {
                    dim: dim.to_owned(),
                    cmp,
                    value,
                });
            }
        }
        Err(syntax_err())
    }
}

fn parse_literal(s: &str) -> Option<Coord> {
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(Coord::Int(v));
    }
    if let Ok(v) = s.parse::<f64>() {
        return Some(Coord::Float(v));
    }
    let quoted = (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
        || (s.starts_with('"') && s.ends_with('"') && s.len() >= 2);
    if quoted {
        Some(Coord::Str(s[1..s.len() - 1].to_owned()))
    } else {
        Some(Coord::Str(s.to_owned()))
    }
}

/// Whether `s` is a valid dimension identifier: non-empty, starting with
/// a letter or underscore, containing only letters, digits and
/// underscores. Valid identifiers are safe on the left-hand side of a
/// predicate string.
pub(crate) fn is_valid_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}
