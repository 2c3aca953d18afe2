use super::*;
use refl_runtime::MemoryRuntime;

#[test]
fn reads_name_offset_and_encoding() {
    let rt = MemoryRuntime::new();
    let cls = rt.define_class("Point", None).unwrap();
    let ivar = rt.add_ivar(cls, "_origin", "{CGPoint=dd}", 8).unwrap();

    let info = IvarInfo::new(&rt, ivar).unwrap();
    assert_eq!(info.handle, ivar);
    assert_eq!(info.name, "_origin");
    assert_eq!(info.offset, 8);
    assert_eq!(info.type_encoding, "{CGPoint=dd}");
    assert_eq!(info.tag(), Tag::Struct);
}

#[test]
fn malformed_encoding_is_unknown_not_an_error() {
    let rt = MemoryRuntime::new();
    let cls = rt.define_class("Odd", None).unwrap();
    let ivar = rt.add_ivar(cls, "_odd", "%%", 0).unwrap();

    let info = IvarInfo::new(&rt, ivar).unwrap();
    assert_eq!(info.tag(), Tag::Unknown);
}

#[test]
fn null_and_unnamed_handles_are_absent() {
    let rt = MemoryRuntime::new();
    let cls = rt.define_class("Anon", None).unwrap();
    let unnamed = rt.add_ivar(cls, "", "i", 0).unwrap();

    assert_eq!(IvarInfo::new(&rt, IvarHandle::NONE), None);
    assert_eq!(IvarInfo::new(&rt, IvarHandle::from_raw(42)), None);
    assert_eq!(IvarInfo::new(&rt, unnamed), None);
}
