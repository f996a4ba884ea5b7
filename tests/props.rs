use std::collections::BTreeSet;

use dimarray::{BinLabels, BinSpec, Coord, Dim, DimArray, DimArrayError, Predicate, Reduction};
use ndarray::{ArrayD, IxDyn};
use quickcheck::quickcheck;

quickcheck! {
    fn unique_values_always_build_a_dim(values: BTreeSet<i64>) -> bool {
        let coords: Vec<Coord> = values.iter().map(|&v| Coord::Int(v)).collect();
        match Dim::new(coords, "x") {
            Ok(d) => d.len() == values.len(),
            Err(_) => false,
        }
    }

    fn repeated_values_never_build_a_dim(values: Vec<i64>) -> bool {
        if values.is_empty() {
            return true;
        }
        let mut coords: Vec<Coord> = values.iter().map(|&v| Coord::Int(v)).collect();
        coords.push(Coord::Int(values[0]));
        matches!(Dim::new(coords, "x"), Err(DimArrayError::NotUnique { .. }))
    }

    fn predicates_round_trip_integer_values(value: i64) -> bool {
        let expr = format!("x>={}", value);
        match expr.parse::<Predicate>() {
            Ok(p) => p.dim == "x" && p.value == Coord::Int(value),
            Err(_) => false,
        }
    }

    fn count_bins_partition_the_axis(data: Vec<i32>, count: u8) -> bool {
        let count = usize::from(count % 4) + 1;
        if data.len() < count {
            return true;
        }
        let values: Vec<f64> = data.iter().map(|&v| f64::from(v)).collect();
        let total: f64 = values.iter().sum();
        let len = values.len();
        let arr = DimArray::from_data(
            ArrayD::from_shape_vec(IxDyn(&[len]), values).unwrap(),
        );
        let out = arr
            .make_bins("dim1", BinSpec::Count(count), Reduction::Sum, BinLabels::Sequential, false)
            .unwrap();
        // one element per bin, sequential labels, nothing lost
        let labels: Vec<Coord> = (0..count as i64).map(Coord::Int).collect();
        out.shape() == [count]
            && out.dim("dim1").unwrap().values() == &labels[..]
            && (out.data().sum() - total).abs() <= 1e-6 * total.abs().max(1.0)
    }

    fn extend_adds_lengths(a: BTreeSet<i16>, b: BTreeSet<i16>) -> bool {
        let build = |s: &BTreeSet<i16>, offset: i64| -> DimArray<f64> {
            let coords: Vec<Coord> =
                s.iter().map(|&v| Coord::Int(i64::from(v) + offset)).collect();
            let n = coords.len();
            let data = ArrayD::from_elem(IxDyn(&[n]), 0.0);
            DimArray::new(data, vec![Dim::new(coords, "x").unwrap()]).unwrap()
        };
        // disjoint coordinate ranges
        let left = build(&a, 0);
        let right = build(&b, 100_000);
        match left.extend(&right, "x") {
            Ok(out) => out.len() == left.len() + right.len(),
            Err(_) => false,
        }
    }
}
