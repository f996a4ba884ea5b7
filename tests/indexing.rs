use dimarray::{coords, AttrValue, Coord, Dim, DimArray, DimArrayError, Indexed, Ix, Slice};
use ndarray::{Array, ArrayD, Axis, IxDyn};

fn build() -> DimArray<f64> {
    let data = Array::linspace(0.0, 23.0, 24)
        .into_shape_with_order(IxDyn(&[2, 3, 4]))
        .unwrap();
    let dims = vec![
        Dim::new(coords![1, 2], "trial").unwrap(),
        Dim::new(coords![0.0, 0.5, 1.0], "time").unwrap(),
        Dim::new(coords![10, 20, 30, 40], "freq").unwrap(),
    ];
    let mut arr = DimArray::new(data, dims).unwrap();
    arr.set_attr("test", 33).unwrap();
    arr
}

fn labeled(ix: Result<Indexed<f64>, DimArrayError>) -> DimArray<f64> {
    ix.unwrap().into_labeled().unwrap()
}

#[test]
fn scalar_drops_the_axis_and_its_dim() {
    let arr = build();
    let a = labeled(arr.index(&[Ix::from(1)]));
    assert_eq!(a.shape(), &[3, 4]);
    assert_eq!(a.dim_names(), vec!["time", "freq"]);
    assert_eq!(a.data(), &arr.data().index_axis(Axis(0), 1).to_owned());

    // negative positions count from the end
    let b = labeled(arr.index(&[Ix::Full, Ix::Full, Ix::from(-1)]));
    assert_eq!(b.shape(), &[2, 3]);
    assert_eq!(b.dim_names(), vec!["trial", "time"]);

    // scalars on every axis leave a labeled 0-d array
    let c = labeled(arr.index(&[Ix::from(0), Ix::from(0), Ix::from(0)]));
    assert_eq!(c.ndim(), 0);
    assert!(c.dim_names().is_empty());

    assert!(matches!(
        arr.index(&[Ix::from(5)]).unwrap_err(),
        DimArrayError::IndexOutOfBounds { axis: 0, index: 5, len: 2 }
    ));
}

#[test]
fn slices_keep_the_axis_and_reduce_its_dim() {
    let arr = build();
    let a = labeled(arr.index(&[Ix::Full, Ix::from(1..3)]));
    assert_eq!(a.shape(), &[2, 2, 4]);
    assert_eq!(a.dim("time").unwrap().values(), &coords![0.5, 1.0][..]);

    // out-of-range bounds clamp instead of erroring
    let b = labeled(arr.index(&[Ix::from(0..100)]));
    assert_eq!(b.shape(), &[2, 3, 4]);

    // negative step reverses
    let c = labeled(arr.index(&[Ix::Full, Ix::Full, Ix::Slice(Slice::new(-1, None, -2))]));
    assert_eq!(c.dim("freq").unwrap().values(), &coords![40, 20][..]);
}

#[test]
fn masks_and_picks_reduce_axes_consistently() {
    let arr = build();
    let a = labeled(arr.index(&[Ix::Full, Ix::Mask(vec![true, false, true])]));
    assert_eq!(a.shape(), &[2, 2, 4]);
    assert_eq!(a.dim("time").unwrap().values(), &coords![0.0, 1.0][..]);

    let b = labeled(arr.index(&[Ix::Full, Ix::Full, Ix::Pick(vec![3, 0])]));
    assert_eq!(b.dim("freq").unwrap().values(), &coords![40, 10][..]);
    assert_eq!(b.data()[[0, 0, 0]], arr.data()[[0, 0, 3]]);

    assert!(matches!(
        arr.index(&[Ix::Mask(vec![true])]).unwrap_err(),
        DimArrayError::MaskLengthMismatch { axis: 0, mask_len: 1, axis_len: 2 }
    ));
    assert!(matches!(
        arr.index(&[Ix::Pick(vec![7])]).unwrap_err(),
        DimArrayError::IndexOutOfBounds { .. }
    ));
}

#[test]
fn predicates_go_to_their_named_axis() {
    let arr = build();
    let a = labeled(arr.index(&[Ix::from("freq>15")]));
    assert_eq!(a.shape(), &[2, 3, 3]);
    assert_eq!(a.dim("freq").unwrap().values(), &coords![20, 30, 40][..]);

    // predicate claims its axis; the positional part fills the first free one
    let b = labeled(arr.index(&[Ix::from("time==0.5"), Ix::from(0)]));
    assert_eq!(b.shape(), &[1, 4]);
    assert_eq!(b.dim_names(), vec!["time", "freq"]);
    assert_eq!(b.dim("time").unwrap().values(), &coords![0.5][..]);

    // same selection, either order
    let c = labeled(arr.index(&[Ix::from(0), Ix::from("time==0.5")]));
    assert_eq!(b, c);

    // equality keeps the axis at length 1, unlike a positional scalar
    let d = labeled(arr.index(&[Ix::from("trial==1")]));
    assert_eq!(d.shape(), &[1, 3, 4]);

    // a comparison against a string selects nothing; != selects all
    let e = labeled(arr.index(&[Ix::from("freq>'a'")]));
    assert_eq!(e.shape(), &[2, 3, 0]);
    let f = labeled(arr.index(&[Ix::from("freq!='a'")]));
    assert_eq!(f.shape(), &[2, 3, 4]);
}

#[test]
fn predicate_equality_selects_the_matching_position() {
    let arr = build();
    // same data as picking the coordinate's position, axis kept at length 1
    let by_value = labeled(arr.index(&[Ix::from("freq==20")]));
    let by_position = labeled(arr.index(&[Ix::Full, Ix::Full, Ix::Pick(vec![1])]));
    assert_eq!(by_value.data(), by_position.data());
    assert_eq!(by_value, by_position);

    // and dropping the kept axis matches a positional scalar
    let scalar = labeled(arr.index(&[Ix::Full, Ix::Full, Ix::from(1)]));
    assert_eq!(by_value.squeeze().data(), scalar.data());
}

#[test]
fn predicate_errors_are_distinguished() {
    let arr = build();
    assert!(matches!(
        arr.index(&[Ix::from("volume>3")]).unwrap_err(),
        DimArrayError::UnknownDimension { name } if name == "volume"
    ));
    // a bare unknown name is an unknown dimension, not a syntax error
    assert!(matches!(
        arr.index(&[Ix::from("volume")]).unwrap_err(),
        DimArrayError::UnknownDimension { .. }
    ));
    assert!(matches!(
        arr.index(&[Ix::from("time=0.5")]).unwrap_err(),
        DimArrayError::PredicateSyntax { .. }
    ));
    // a known bare name is only a dim lookup on its own; among other
    // components it is malformed, not unknown
    assert!(matches!(
        arr.index(&[Ix::from("time"), Ix::from(0)]).unwrap_err(),
        DimArrayError::PredicateSyntax { expr } if expr == "time"
    ));
    assert!(matches!(
        arr.index(&[Ix::from("time>0.1"), Ix::from("time<0.9")]).unwrap_err(),
        DimArrayError::ConflictingIndex { .. }
    ));
    assert!(matches!(
        arr.index(&[Ix::from(0), Ix::from(0), Ix::from(0), Ix::from(0)])
            .unwrap_err(),
        DimArrayError::AxisOutOfBounds { .. }
    ));
}

#[test]
fn bare_dimension_name_returns_the_dim() {
    let arr = build();
    let d = arr.index(&[Ix::from("time")]).unwrap().into_axis().unwrap();
    assert_eq!(d.name(), "time");
    assert_eq!(d.values(), &coords![0.0, 0.5, 1.0][..]);
}

#[test]
fn new_axes_are_named_after_their_result_position() {
    let arr = build();
    let a = labeled(arr.index(&[Ix::NewAxis]));
    assert_eq!(a.shape(), &[1, 2, 3, 4]);
    assert_eq!(a.dim_names()[0], "newaxis_0");
    assert_eq!(a.dim("newaxis_0").unwrap().values(), &[Coord::Int(0)][..]);

    let b = labeled(arr.index(&[Ix::Full, Ix::Full, Ix::Full, Ix::NewAxis]));
    assert_eq!(b.shape(), &[2, 3, 4, 1]);
    assert_eq!(b.dim_names()[3], "newaxis_3");

    // a dropped axis shifts the new axis's position
    let c = labeled(arr.index(&[Ix::from(0), Ix::Full, Ix::NewAxis]));
    assert_eq!(c.shape(), &[3, 1, 4]);
    assert_eq!(c.dim_names(), vec!["time", "newaxis_1", "freq"]);
}

#[test]
fn full_shape_masks_flatten_to_an_attr_array() {
    let arr = build();
    let mask = arr.data().mapv(|v| v > 20.0);
    let out = arr.masked(&mask).unwrap();
    assert_eq!(out.shape(), &[3]);
    assert_eq!(out.data().as_slice().unwrap(), &[21.0, 22.0, 23.0]);
    assert_eq!(out.attr("test"), Some(&AttrValue::Int(33)));

    let bad = ArrayD::from_elem(IxDyn(&[2, 3]), true);
    assert!(matches!(
        arr.masked(&bad).unwrap_err(),
        DimArrayError::ShapeMismatch { .. }
    ));
}

#[test]
fn attrs_propagate_through_indexing() {
    let arr = build();
    let a = labeled(arr.index(&[Ix::from("freq>15")]));
    assert_eq!(a.attr("test"), Some(&AttrValue::Int(33)));
}
