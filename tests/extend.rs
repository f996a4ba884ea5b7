use dimarray::{coords, AttrValue, Coord, Dim, DimArray, DimArrayError};
use ndarray::{Array, IxDyn};

fn build(times: &[f64], freqs: &[i64]) -> DimArray<f64> {
    let len = times.len() * freqs.len();
    let data = Array::linspace(0.0, len as f64 - 1.0, len)
        .into_shape_with_order(IxDyn(&[times.len(), freqs.len()]))
        .unwrap();
    let dims = vec![
        Dim::new(
            times.iter().map(|&t| Coord::Float(t)).collect::<Vec<_>>(),
            "time",
        )
        .unwrap(),
        Dim::new(
            freqs.iter().map(|&f| Coord::Int(f)).collect::<Vec<_>>(),
            "freq",
        )
        .unwrap(),
    ];
    DimArray::new(data, dims).unwrap()
}

#[test]
fn extend_concatenates_data_and_the_join_dim() {
    let a = build(&[0.0, 0.5], &[10, 20, 30]);
    let b = build(&[1.0, 1.5], &[10, 20, 30]);
    let out = a.extend(&b, "time").unwrap();
    assert_eq!(out.shape(), &[4, 3]);
    assert_eq!(
        out.dim("time").unwrap().values(),
        &coords![0.0, 0.5, 1.0, 1.5][..]
    );
    // other dims are untouched
    assert_eq!(out.dim("freq").unwrap().values(), &coords![10, 20, 30][..]);
    // the second block follows the first
    assert_eq!(out.data()[[2, 0]], b.data()[[0, 0]]);

    // by position too
    assert_eq!(out, a.extend(&b, 0).unwrap());
}

#[test]
fn extend_requires_matching_off_axis_dims() {
    let a = build(&[0.0, 0.5], &[10, 20, 30]);
    let b = build(&[1.0, 1.5], &[10, 20, 99]);
    assert!(matches!(
        a.extend(&b, "time").unwrap_err(),
        DimArrayError::DimensionMismatch { name } if name == "freq"
    ));

    let c = DimArray::from_data(Array::zeros(IxDyn(&[2])));
    assert!(matches!(
        a.extend(&c, "time").unwrap_err(),
        DimArrayError::DimCountMismatch { .. }
    ));
}

#[test]
fn extend_requires_a_matching_join_axis_name() {
    let a = build(&[0.0, 0.5], &[10, 20, 30]);
    let mut renamed = build(&[1.0, 1.5], &[10, 20, 30]);
    let mut dims = renamed.dims().to_vec();
    dims[0].set_name("tempo").unwrap();
    renamed = DimArray::new(renamed.data().clone(), dims).unwrap();
    assert!(matches!(
        a.extend(&renamed, "time").unwrap_err(),
        DimArrayError::DimensionMismatch { name } if name == "time"
    ));
}

#[test]
fn extend_does_not_recheck_join_uniqueness() {
    // repeating coordinates on the join axis is allowed; downstream
    // lookups simply find the first occurrence
    let a = build(&[0.0, 0.5], &[10, 20, 30]);
    let out = a.extend(&a, "time").unwrap();
    assert_eq!(out.shape(), &[4, 3]);
    assert_eq!(
        out.dim("time").unwrap().values(),
        &coords![0.0, 0.5, 0.0, 0.5][..]
    );
}

#[test]
fn extend_propagates_agreeing_attrs() {
    let mut a = build(&[0.0, 0.5], &[10, 20]);
    let mut b = build(&[1.0, 1.5], &[10, 20]);
    a.set_attr("subject", "s01").unwrap();
    b.set_attr("subject", "s01").unwrap();
    a.set_attr("run", 1).unwrap();
    b.set_attr("run", 2).unwrap();
    let out = a.extend(&b, "time").unwrap();
    assert_eq!(out.attr("subject"), Some(&AttrValue::Str("s01".into())));
    // disagreement drops the attribute
    assert_eq!(out.attr("run"), None);
}
