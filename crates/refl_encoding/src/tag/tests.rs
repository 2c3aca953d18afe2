use super::*;

#[test]
fn discriminants_match_table_order() {
    for (idx, tag) in Tag::ALL.iter().enumerate() {
        assert_eq!(usize::from(tag.raw()), idx, "{tag:?} out of order");
    }
}

#[test]
fn from_raw_round_trips_and_saturates() {
    assert_eq!(Tag::from_raw(14), Tag::Object);
    assert_eq!(Tag::from_raw(22), Tag::FixedArray);
    assert_eq!(Tag::from_raw(23), Tag::Unknown);
    assert_eq!(Tag::from_raw(0xFF), Tag::Unknown);
}

#[test]
fn c_number_range() {
    assert!(Tag::Bool.is_c_number());
    assert!(Tag::Int32.is_c_number());
    assert!(Tag::LongDouble.is_c_number());
    assert!(!Tag::Void.is_c_number());
    assert!(!Tag::Object.is_c_number());
    assert!(!Tag::Unknown.is_c_number());
}

#[test]
fn integer_and_float_split() {
    assert!(Tag::Int8.is_integer());
    assert!(Tag::UInt64.is_integer());
    assert!(!Tag::Bool.is_integer());
    assert!(!Tag::Float.is_integer());

    assert!(Tag::Double.is_float());
    assert!(!Tag::Int64.is_float());
}

#[test]
fn object_like_and_aggregates() {
    assert!(Tag::Object.is_object_like());
    assert!(Tag::FunctionPointer.is_object_like());
    assert!(!Tag::GenericPointer.is_object_like());

    assert!(Tag::Struct.is_aggregate());
    assert!(Tag::FixedArray.is_aggregate());
    assert!(!Tag::CString.is_aggregate());
}

#[test]
fn display_uses_name() {
    assert_eq!(Tag::LongDouble.to_string(), "long double");
    assert_eq!(format!("{:?}", Tag::Object), "Tag::object");
    assert_eq!(Tag::default(), Tag::Unknown);
}
