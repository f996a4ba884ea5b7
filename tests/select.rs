use dimarray::{coords, Cmp, Coord, Dim, DimArray, DimArrayError, Filter, Ix};
use ndarray::{Array, IxDyn};

fn build() -> DimArray<f64> {
    let data = Array::linspace(0.0, 11.0, 12)
        .into_shape_with_order(IxDyn(&[3, 4]))
        .unwrap();
    let dims = vec![
        Dim::new(coords![0.0, 0.5, 1.0], "time").unwrap(),
        Dim::new(coords![10, 20, 30, 40], "freq").unwrap(),
    ];
    DimArray::new(data, dims).unwrap()
}

#[test]
fn find_yields_one_component_per_axis() {
    let arr = build();
    let parts = arr
        .find(&[("freq", Filter::Cmp(Cmp::Gt, Coord::Int(15)))])
        .unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], Ix::Full);
    assert_eq!(parts[1], Ix::Mask(vec![false, true, true, true]));
}

#[test]
fn select_is_find_then_index() {
    let arr = build();
    let by = [
        ("time", Filter::Cmp(Cmp::Ge, Coord::Float(0.5))),
        ("freq", Filter::Mask(vec![true, false, false, true])),
    ];
    let out = arr.select(&by).unwrap();
    assert_eq!(out.shape(), &[2, 2]);
    assert_eq!(out.dim("time").unwrap().values(), &coords![0.5, 1.0][..]);
    assert_eq!(out.dim("freq").unwrap().values(), &coords![10, 40][..]);

    let via_index = arr
        .index(&arr.find(&by).unwrap())
        .unwrap()
        .into_labeled()
        .unwrap();
    assert_eq!(out, via_index);
}

#[test]
fn select_rejects_bad_constraints() {
    let arr = build();
    assert!(matches!(
        arr.select(&[("volume", Filter::Cmp(Cmp::Eq, Coord::Int(1)))])
            .unwrap_err(),
        DimArrayError::UnknownDimension { .. }
    ));
    assert!(matches!(
        arr.select(&[("freq", Filter::Mask(vec![true]))]).unwrap_err(),
        DimArrayError::MaskLengthMismatch { .. }
    ));
    assert!(matches!(
        arr.select(&[
            ("freq", Filter::Mask(vec![true, true, true, true])),
            ("freq", Filter::Cmp(Cmp::Lt, Coord::Int(30))),
        ])
        .unwrap_err(),
        DimArrayError::ConflictingIndex { .. }
    ));
}
