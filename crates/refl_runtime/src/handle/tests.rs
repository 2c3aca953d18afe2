use super::*;

#[test]
fn none_sentinel() {
    assert!(ClassHandle::NONE.is_none());
    assert!(!ClassHandle::from_raw(0).is_none());
    assert!(IvarHandle::NONE.is_none());
    assert!(MethodHandle::NONE.is_none());
    assert!(PropertyHandle::NONE.is_none());
}

#[test]
fn handles_compare_by_raw_value() {
    assert_eq!(ClassHandle::from_raw(7), ClassHandle::from_raw(7));
    assert_ne!(ClassHandle::from_raw(7), ClassHandle::from_raw(8));
    assert_eq!(MethodHandle::from_raw(3).raw(), 3);
}

#[test]
fn handle_debug_output() {
    assert_eq!(format!("{:?}", ClassHandle::from_raw(4)), "Class(4)");
    assert_eq!(format!("{:?}", PropertyHandle::NONE), "Property(NONE)");
}

#[test]
fn selectors_compare_by_name() {
    let a = Selector::new("setName:");
    let b = Selector::from("setName:");
    assert_eq!(a, b);
    assert_eq!(a.name(), "setName:");
    assert_eq!(a.to_string(), "setName:");
    assert_eq!(format!("{a:?}"), "@selector(setName:)");
}

#[test]
fn selector_arity_counts_colons() {
    assert_eq!(Selector::new("name").arity(), 0);
    assert_eq!(Selector::new("setName:").arity(), 1);
    assert_eq!(Selector::new("insertObject:atIndex:").arity(), 2);
}

#[test]
fn imp_wraps_address() {
    let imp = Imp::from_addr(0x1000);
    assert_eq!(imp.addr(), 0x1000);
    assert_eq!(format!("{imp:?}"), "Imp(0x1000)");
}
