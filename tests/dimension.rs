use dimarray::{coords, AttrValue, Attrs, Coord, Dim, DimArrayError};
use ndarray::{ArrayD, IxDyn};

#[test]
fn construction_requires_a_name_and_unique_values() {
    let d = Dim::new(coords![0.0, 0.5, 1.0], "time").unwrap();
    assert_eq!(d.name(), "time");
    assert_eq!(d.len(), 3);

    assert_eq!(
        Dim::new(coords![1, 2], "").unwrap_err(),
        DimArrayError::MissingName
    );
    assert!(matches!(
        Dim::new(coords![1, 2, 2], "trial").unwrap_err(),
        DimArrayError::NotUnique { .. }
    ));
    // cross-variant numeric equality counts as a duplicate
    assert!(matches!(
        Dim::new(vec![Coord::Int(3), Coord::Float(3.0)], "trial").unwrap_err(),
        DimArrayError::NotUnique { .. }
    ));
}

#[test]
fn from_array_squeezes_singleton_axes() {
    let values = ArrayD::from_shape_vec(IxDyn(&[1, 4, 1]), coords![1, 2, 3, 4]).unwrap();
    let d = Dim::from_array(values, "trial").unwrap();
    assert_eq!(d.len(), 4);
    assert_eq!(d.get(2), Some(&Coord::Int(3)));

    let values = ArrayD::from_shape_vec(IxDyn(&[2, 2]), coords![1, 2, 3, 4]).unwrap();
    assert!(matches!(
        Dim::from_array(values, "trial").unwrap_err(),
        DimArrayError::NotOneDimensional { shape } if shape == vec![2, 2]
    ));
}

#[test]
fn name_is_reserved_in_the_attribute_bag() {
    let mut d = Dim::new(coords![1, 2], "trial").unwrap();
    assert!(matches!(
        d.set_attr("name", "other"),
        Err(DimArrayError::ImmutableAttribute { .. })
    ));
    assert!(matches!(
        d.remove_attr("name"),
        Err(DimArrayError::ImmutableAttribute { .. })
    ));
    // renaming goes through the field, not the bag
    d.set_name("block").unwrap();
    assert_eq!(d.name(), "block");

    d.set_attr("unit", "s").unwrap();
    assert_eq!(d.attr("unit"), Some(&AttrValue::Str("s".into())));
    assert_eq!(
        d.remove_attr("unit").unwrap(),
        Some(AttrValue::Str("s".into()))
    );
}

#[test]
fn extra_attrs_survive_construction() {
    let mut attrs = Attrs::new();
    attrs.set("unit", "ms").unwrap();
    let d = Dim::with_attrs(coords![1, 2], "time", attrs).unwrap();
    assert_eq!(d.attr("unit"), Some(&AttrValue::Str("ms".into())));
}

#[test]
fn coordinate_lookup_is_value_based() {
    let d = Dim::new(coords![100, 200, 300], "freq").unwrap();
    assert_eq!(d.position_of(&Coord::Int(200)), Some(1));
    // numeric equality across variants
    assert_eq!(d.position_of(&Coord::Float(300.0)), Some(2));
    assert_eq!(d.position_of(&Coord::Str("200".into())), None);
}

#[test]
fn slice_and_mask_keep_name_and_attrs() {
    let mut attrs = Attrs::new();
    attrs.set("unit", "Hz").unwrap();
    let d = Dim::with_attrs(coords![10, 20, 30, 40], "freq", attrs).unwrap();

    let s = d.slice_at(&[3, 1]).unwrap();
    assert_eq!(s.values(), &coords![40, 20][..]);
    assert_eq!(s.name(), "freq");
    assert_eq!(s.attr("unit"), Some(&AttrValue::Str("Hz".into())));
    assert!(matches!(
        d.slice_at(&[4]).unwrap_err(),
        DimArrayError::IndexOutOfBounds { .. }
    ));

    let m = d.masked(&[true, false, false, true]).unwrap();
    assert_eq!(m.values(), &coords![10, 40][..]);
    assert!(matches!(
        d.masked(&[true, false]).unwrap_err(),
        DimArrayError::MaskLengthMismatch { .. }
    ));
}
