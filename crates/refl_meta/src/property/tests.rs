use super::*;
use pretty_assertions::assert_eq;
use refl_runtime::MemoryRuntime;

fn property(rt: &MemoryRuntime, name: &str, attributes: &str) -> PropertyInfo {
    let cls = rt
        .lookup_class("Model")
        .unwrap_or_else(|| rt.define_class("Model", None).unwrap());
    let p = rt.add_property(cls, name, attributes).unwrap();
    PropertyInfo::new(rt, p).unwrap()
}

#[test]
fn default_accessors() {
    let rt = MemoryRuntime::new();
    let info = property(&rt, "name", "T@\"NSString\",C,N,V_name");

    assert_eq!(info.getter, Selector::new("name"));
    assert_eq!(info.setter, Selector::new("setName:"));
    assert_eq!(info.ivar_name.as_deref(), Some("_name"));
    assert_eq!(info.tag(), Tag::Object);
    assert_eq!(info.attrs(), PropertyAttrs::COPY | PropertyAttrs::NONATOMIC);
    assert!(!info.is_readonly());
}

#[test]
fn custom_accessors_win() {
    let rt = MemoryRuntime::new();
    let info = property(&rt, "enabled", "TB,N,GisEnabled,SmakeEnabled:,V_enabled");

    assert_eq!(info.getter, Selector::new("isEnabled"));
    assert_eq!(info.setter, Selector::new("makeEnabled:"));
    assert_eq!(info.tag(), Tag::Bool);
    assert!(info.attrs().contains(PropertyAttrs::CUSTOM_GETTER | PropertyAttrs::CUSTOM_SETTER));
}

#[test]
fn custom_accessors_with_backing_ivar() {
    let rt = MemoryRuntime::new();
    let info = property(&rt, "value", "T@,GcustomGet,ScustomSet:,Vbacking");

    assert_eq!(info.getter.name(), "customGet");
    assert_eq!(info.setter.name(), "customSet:");
    assert_eq!(info.ivar_name.as_deref(), Some("backing"));
    assert_eq!(info.tag(), Tag::Object);
}

#[test]
fn class_and_protocols_resolve_through_runtime() {
    let rt = MemoryRuntime::new();
    let string_cls = rt.define_class("NSString", None).unwrap();
    let info = property(&rt, "title", "T@\"NSString<NSCopying>\",R,N");

    assert_eq!(info.class_name.as_deref(), Some("NSString"));
    assert_eq!(info.cls, Some(string_cls));
    assert_eq!(info.protocols, vec!["NSCopying".to_owned()]);
    assert!(info.is_readonly());

    let info = property(&rt, "other", "T@\"Unregistered\",&");
    assert_eq!(info.class_name.as_deref(), Some("Unregistered"));
    assert_eq!(info.cls, None);
}

#[test]
fn missing_attributes_still_produce_a_descriptor() {
    let rt = MemoryRuntime::new();
    let info = property(&rt, "bare", "");

    assert_eq!(info.tag(), Tag::Unknown);
    assert_eq!(info.getter.name(), "bare");
    assert_eq!(info.setter.name(), "setBare:");
    assert_eq!(info.ivar_name, None);
}

#[test]
fn setter_derivation() {
    assert_eq!(setter_selector("name").name(), "setName:");
    assert_eq!(setter_selector("URL").name(), "setURL:");
    assert_eq!(setter_selector("x").name(), "setX:");
    assert_eq!(setter_selector("_private").name(), "set_private:");
    assert_eq!(setter_selector("ärger").name(), "setÄrger:");
    assert_eq!(setter_selector("").name(), ":");
}

#[test]
fn null_handle_is_absent() {
    let rt = MemoryRuntime::new();
    assert_eq!(PropertyInfo::new(&rt, PropertyHandle::NONE), None);
}
