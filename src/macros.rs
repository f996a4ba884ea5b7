// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Create a `Vec<Coord>` from a list of literals.
///
/// ```
/// use dimarray::{coords, Coord};
///
/// let c = coords![1, 2, 3];
/// assert_eq!(c[0], Coord::Int(1));
/// let c = coords!["a", "b"];
/// assert_eq!(c[1], Coord::Str("b".into()));
/// ```
#[macro_export]
macro_rules! coords {
    ($($x:expr),* $(,)?) => {
        vec![$($crate::Coord::from($x)),*]
    };
}

/// Create an [`Attrs`](crate::Attrs) bag from `name => value` pairs.
///
/// ```
/// use dimarray::{attrs, AttrValue};
///
/// let a = attrs! { "unit" => "Hz", "trials" => 12 };
/// assert_eq!(a.get("unit"), Some(&AttrValue::Str("Hz".into())));
/// ```
#[macro_export]
macro_rules! attrs {
    ($($name:expr => $value:expr),* $(,)?) => {{
        let mut bag = $crate::Attrs::new();
        $(
            // a fresh bag has no required names, so set cannot fail
            bag.set($name, $value).unwrap();
        )*
        bag
    }};
}
