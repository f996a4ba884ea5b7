// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Elementwise arithmetic between labeled arrays and with scalars.
//!
//! Array-with-array arithmetic requires the operands to describe the
//! same labeled space: equal shapes and pairwise matching dims (same
//! name, same coordinates). Following the engine's convention for shape
//! mismatches, a mismatch **panics** rather than returning an error.
//! Extra attributes propagate with the drop-on-disagreement rule, on the
//! arrays and on each dim.

use std::ops::{Add, Div, Mul, Sub};

use ndarray::Zip;

use crate::attr_array::AttrArray;
use crate::attrs::Attrs;
use crate::dimarray::DimArray;
use crate::dimension::Dim;

macro_rules! impl_binop {
    ($trt:ident, $mth:ident) => {
        impl<'a, 'b, A> $trt<&'b DimArray<A>> for &'a DimArray<A>
        where
            A: Clone + $trt<Output = A>,
        {
            type Output = DimArray<A>;

            /// **Panics** if the shapes differ or any pair of dims
            /// disagrees on name or coordinates.
            fn $mth(self, rhs: &'b DimArray<A>) -> DimArray<A> {
                let dims: Vec<Dim> = self
                    .dims
                    .iter()
                    .zip(rhs.dims())
                    .map(|(a, b)| {
                        assert!(
                            a.same_axis(b),
                            "arithmetic between arrays with mismatched dimension `{}`",
                            a.name()
                        );
                        Dim::from_parts(
                            a.values().to_vec(),
                            a.name().to_owned(),
                            Attrs::propagate(&[a.attrs(), b.attrs()]),
                        )
                    })
                    .collect();
                let data = Zip::from(&self.data)
                    .and(&rhs.data)
                    .map_collect(|x, y| x.clone().$mth(y.clone()));
                DimArray::from_parts(data, dims, Attrs::propagate(&[&self.attrs, &rhs.attrs]))
            }
        }

        impl<'a, A> $trt<A> for &'a DimArray<A>
        where
            A: Clone + $trt<Output = A>,
        {
            type Output = DimArray<A>;

            fn $mth(self, rhs: A) -> DimArray<A> {
                let data = self.data.mapv(|x| x.$mth(rhs.clone()));
                DimArray::from_parts(data, self.dims.clone(), Attrs::propagate(&[&self.attrs]))
            }
        }

        impl<'a, A> $trt<A> for &'a AttrArray<A>
        where
            A: Clone + $trt<Output = A>,
        {
            type Output = AttrArray<A>;

            fn $mth(self, rhs: A) -> AttrArray<A> {
                AttrArray::from_parts(
                    self.data().mapv(|x| x.$mth(rhs.clone())),
                    Attrs::propagate(&[self.attrs()]),
                )
            }
        }
    };
}

impl_binop!(Add, add);
impl_binop!(Sub, sub);
impl_binop!(Mul, mul);
impl_binop!(Div, div);
