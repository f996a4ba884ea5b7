use dimarray::{attrs, coords, AttrArray, AttrValue, Coord, Dim, DimArray, DimArrayError};
use ndarray::{Array, IxDyn};

#[test]
fn dim_round_trips_through_json() {
    let d = Dim::with_attrs(coords![0.0, 0.5, 1.0], "time", attrs! { "unit" => "s" }).unwrap();
    let json = serde_json::to_string(&d).unwrap();
    let back: Dim = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d);
    assert_eq!(back.name(), "time");
    assert_eq!(back.attr("unit"), Some(&AttrValue::Str("s".into())));

    // the restored bag still guards the required name
    let mut back = back;
    assert!(matches!(
        back.remove_attr("name"),
        Err(DimArrayError::ImmutableAttribute { .. })
    ));
}

#[test]
fn dimarray_round_trips_through_json() {
    let data = Array::linspace(0.0, 5.0, 6)
        .into_shape_with_order(IxDyn(&[2, 3]))
        .unwrap();
    let dims = vec![
        Dim::new(coords![1, 2], "trial").unwrap(),
        Dim::new(coords!["a", "b", "c"], "cond").unwrap(),
    ];
    let mut arr = DimArray::new(data, dims).unwrap();
    arr.set_attr("subject", "s01").unwrap();

    let json = serde_json::to_string(&arr).unwrap();
    let back: DimArray<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, arr);
    assert_eq!(back.dim_names(), vec!["trial", "cond"]);
    assert_eq!(back.attr("subject"), Some(&AttrValue::Str("s01".into())));

    let mut back = back;
    assert!(matches!(
        back.remove_attr("dims"),
        Err(DimArrayError::ImmutableAttribute { .. })
    ));
}

#[test]
fn attr_array_round_trips_through_json() {
    let data = Array::linspace(0.0, 3.0, 4)
        .into_shape_with_order(IxDyn(&[4]))
        .unwrap();
    let arr = AttrArray::new(data, attrs! { "kind" => "flat" });
    let json = serde_json::to_string(&arr).unwrap();
    let back: AttrArray<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, arr);
}

#[test]
fn heterogeneous_coords_survive() {
    let d = Dim::new(
        vec![Coord::Int(1), Coord::Float(2.5), Coord::Str("x".into())],
        "mixed",
    )
    .unwrap();
    let json = serde_json::to_string(&d).unwrap();
    let back: Dim = serde_json::from_str(&json).unwrap();
    assert_eq!(back.values(), d.values());
}
