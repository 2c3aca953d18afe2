//! End-to-end extraction over a small model hierarchy.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use refl_encoding::{PropertyAttrs, Qualifiers, Tag};
use refl_meta::{ClassInfoCache, IMPLICIT_ARGUMENTS};
use refl_runtime::{ClassHandle, Imp, MemoryRuntime, Runtime, Selector};

struct Models {
    rt: Arc<MemoryRuntime>,
    object: ClassHandle,
    user: ClassHandle,
    admin: ClassHandle,
}

/// `Object ◄── User ◄── Admin`
fn models() -> Models {
    refl_meta::init_tracing();

    let rt = Arc::new(MemoryRuntime::new());

    let object = rt.define_class("Object", None).unwrap();
    rt.add_ivar(object, "isa", "#", 0).unwrap();
    rt.add_method(object, "init", "@16@0:8", Some(Imp::from_addr(0x1000)))
        .unwrap();
    rt.add_method(object, "description", "@16@0:8", None).unwrap();

    let user = rt.define_class("User", Some(object)).unwrap();
    rt.add_ivar(user, "_name", "@\"NSString\"", 8).unwrap();
    rt.add_ivar(user, "_age", "Q", 16).unwrap();
    rt.add_method(user, "setName:", "v24@0:8@16", None).unwrap();
    rt.add_method(user, "description", "@16@0:8", Some(Imp::from_addr(0x2000)))
        .unwrap();
    rt.add_property(user, "name", "T@\"NSString\",C,N,V_name")
        .unwrap();
    rt.add_property(user, "age", "TQ,R,N,V_age").unwrap();
    rt.add_property(user, "friend", "T@\"User<Codable>\",&,N")
        .unwrap();

    let admin = rt.define_class("Admin", Some(user)).unwrap();
    rt.add_method(admin, "grant:to:", "B32@0:8r*16^{Role=i}24", None)
        .unwrap();
    rt.add_property(admin, "enabled", "TB,N,GisEnabled").unwrap();

    let meta = rt.metaclass(user).unwrap();
    rt.add_method(meta, "userWithName:", "@24@0:8@16", None).unwrap();

    Models {
        rt,
        object,
        user,
        admin,
    }
}

#[test]
fn leaf_sees_every_inherited_member() {
    let m = models();
    let cache = ClassInfoCache::new(m.rt);
    let admin = cache.get(m.admin).unwrap();

    let mut ivars: Vec<_> = admin.ivars().keys().map(String::as_str).collect();
    ivars.sort_unstable();
    assert_eq!(ivars, vec!["_age", "_name", "isa"]);

    let mut methods: Vec<_> = admin.methods().keys().map(String::as_str).collect();
    methods.sort_unstable();
    assert_eq!(
        methods,
        vec!["description", "grant:to:", "init", "setName:"]
    );

    let mut properties: Vec<_> = admin.properties().keys().map(String::as_str).collect();
    properties.sort_unstable();
    assert_eq!(properties, vec!["age", "enabled", "friend", "name"]);
}

#[test]
fn override_wins_over_root_declaration() {
    let m = models();
    let cache = ClassInfoCache::new(m.rt);

    let admin = cache.get(m.admin).unwrap();
    assert_eq!(
        admin.method("description").unwrap().imp,
        Some(Imp::from_addr(0x2000))
    );
    let object = cache.get(m.object).unwrap();
    assert_eq!(object.method("description").unwrap().imp, None);
}

#[test]
fn method_signatures_are_classified() {
    let m = models();
    let cache = ClassInfoCache::new(m.rt);
    let admin = cache.get(m.admin).unwrap();

    let grant = admin.method("grant:to:").unwrap();
    assert_eq!(grant.selector, Selector::new("grant:to:"));
    assert_eq!(grant.return_type.tag(), Tag::Bool);
    assert_eq!(grant.argument_type_encodings, vec!["r*", "^{Role=i}"]);
    assert_eq!(grant.argument_types[0].tag(), Tag::CString);
    assert!(grant.argument_types[0].has_qualifier(Qualifiers::CONST));
    assert_eq!(grant.argument_types[1].tag(), Tag::GenericPointer);
    assert_eq!(grant.arity(), 2);
    assert_eq!(
        cache.runtime().method_argument_count(grant.handle),
        grant.arity() + IMPLICIT_ARGUMENTS
    );
}

#[test]
fn properties_resolve_types_and_accessors() {
    let m = models();
    let cache = ClassInfoCache::new(m.rt);
    let admin = cache.get(m.admin).unwrap();

    let name = admin.property("name").unwrap();
    assert_eq!(name.tag(), Tag::Object);
    assert!(name.attrs().contains(PropertyAttrs::COPY | PropertyAttrs::NONATOMIC));
    assert_eq!(name.ivar_name.as_deref(), Some("_name"));
    assert_eq!(name.class_name.as_deref(), Some("NSString"));
    assert_eq!(name.cls, None);
    assert_eq!(name.getter, Selector::new("name"));
    assert_eq!(name.setter, Selector::new("setName:"));

    let age = admin.property("age").unwrap();
    assert_eq!(age.tag(), Tag::UInt64);
    assert!(age.is_readonly());

    let friend = admin.property("friend").unwrap();
    assert_eq!(friend.class_name.as_deref(), Some("User"));
    assert_eq!(friend.cls, Some(m.user));
    assert_eq!(friend.protocols, vec!["Codable"]);
    assert!(friend.attrs().contains(PropertyAttrs::RETAIN));

    let enabled = admin.property("enabled").unwrap();
    assert_eq!(enabled.tag(), Tag::Bool);
    assert_eq!(enabled.getter, Selector::new("isEnabled"));
    assert_eq!(enabled.setter, Selector::new("setEnabled:"));
    assert!(enabled.attrs().contains(PropertyAttrs::CUSTOM_GETTER));
}

#[test]
fn meta_type_carries_class_methods() {
    let m = models();
    let cache = ClassInfoCache::new(m.rt);

    let user = cache.get(m.user).unwrap();
    assert!(!user.is_meta());
    assert!(user.method("userWithName:").is_none());

    let meta = cache.meta_info(&user).unwrap();
    assert!(meta.is_meta());
    assert_eq!(meta.name(), "User");
    assert_eq!(meta.meta_cls(), None);
    assert!(meta.method("userWithName:").is_some());
    assert!(cache.meta_info(&meta).is_none());

    // The root meta-type inherits from the root type itself.
    let root = meta.ancestors().last().unwrap();
    assert_eq!(root.cls(), m.object);
    assert!(meta.method("init").is_some());
}

#[test]
fn name_lookup_matches_handle_lookup() {
    let m = models();
    let cache = ClassInfoCache::new(m.rt);

    let by_name = cache.get_by_name("User").unwrap();
    let by_handle = cache.get(m.user).unwrap();
    assert!(Arc::ptr_eq(&by_name, &by_handle));
    assert!(by_handle.is_subclass_of(m.object));
}
