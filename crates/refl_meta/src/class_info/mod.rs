//! Merged metadata for one runtime type.
//!
//! A `ClassInfo` is the cumulative view of a type: its own declared ivars,
//! methods and properties merged over everything it inherits. It is built
//! once per cache miss and never mutated afterwards, apart from the
//! needs-update flag.
//!
//! # Design
//!
//! - Member maps are keyed by name (`FxHashMap` for O(1) lookup)
//! - Values are `Arc`-shared, so copying a parent's maps into a child is cheap
//! - The parent link is the parent's shared cache entry, not a private copy
//! - Soft invalidation: flagging marks the snapshot stale but keeps it valid

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use refl_runtime::{ClassHandle, Runtime};
use rustc_hash::FxHashMap;

use crate::{IvarInfo, MethodInfo, PropertyInfo};

/// Merged metadata for one runtime type.
#[derive(Debug)]
pub struct ClassInfo {
    cls: ClassHandle,
    super_cls: Option<ClassHandle>,
    meta_cls: Option<ClassHandle>,
    is_meta: bool,
    name: String,

    /// Parent's shared cache entry.
    super_info: Option<Arc<ClassInfo>>,
    /// Number of ancestors.
    depth: usize,

    ivars: FxHashMap<String, Arc<IvarInfo>>,
    methods: FxHashMap<String, Arc<MethodInfo>>,
    properties: FxHashMap<String, Arc<PropertyInfo>>,

    needs_update: AtomicBool,
}

impl ClassInfo {
    /// Assemble a type's metadata over its already-resolved parent.
    ///
    /// Inherited maps are copied from `super_info` first, then the type's own
    /// declared members overwrite same-named entries.
    pub(crate) fn assemble(
        runtime: &dyn Runtime,
        cls: ClassHandle,
        name: String,
        super_info: Option<Arc<ClassInfo>>,
    ) -> Self {
        let is_meta = runtime.is_metaclass(cls);
        let meta_cls = if is_meta { None } else { runtime.metaclass(cls) };

        let (mut ivars, mut methods, mut properties) = match &super_info {
            Some(parent) => (
                parent.ivars.clone(),
                parent.methods.clone(),
                parent.properties.clone(),
            ),
            None => Default::default(),
        };

        for ivar in runtime.ivars(cls) {
            if let Some(info) = IvarInfo::new(runtime, ivar) {
                ivars.insert(info.name.clone(), Arc::new(info));
            }
        }
        for method in runtime.methods(cls) {
            if let Some(info) = MethodInfo::new(runtime, method) {
                methods.insert(info.name.clone(), Arc::new(info));
            }
        }
        for property in runtime.properties(cls) {
            if let Some(info) = PropertyInfo::new(runtime, property) {
                properties.insert(info.name.clone(), Arc::new(info));
            }
        }

        Self {
            cls,
            super_cls: super_info.as_ref().map(|parent| parent.cls),
            depth: super_info.as_ref().map_or(0, |parent| parent.depth + 1),
            meta_cls,
            is_meta,
            name,
            super_info,
            ivars,
            methods,
            properties,
            needs_update: AtomicBool::new(false),
        }
    }

    /// The type this metadata describes.
    #[inline]
    pub fn cls(&self) -> ClassHandle {
        self.cls
    }

    /// The parent type.
    #[inline]
    pub fn super_cls(&self) -> Option<ClassHandle> {
        self.super_cls
    }

    /// The meta-type. `None` when this is itself a meta-type.
    #[inline]
    pub fn meta_cls(&self) -> Option<ClassHandle> {
        self.meta_cls
    }

    /// Whether this describes a meta-type.
    #[inline]
    pub fn is_meta(&self) -> bool {
        self.is_meta
    }

    /// Type name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent's metadata.
    #[inline]
    pub fn super_info(&self) -> Option<&Arc<ClassInfo>> {
        self.super_info.as_ref()
    }

    /// Number of parent hops up to the root type.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Ivars by name, inherited included.
    #[inline]
    pub fn ivars(&self) -> &FxHashMap<String, Arc<IvarInfo>> {
        &self.ivars
    }

    /// Methods by name, inherited included.
    #[inline]
    pub fn methods(&self) -> &FxHashMap<String, Arc<MethodInfo>> {
        &self.methods
    }

    /// Properties by name, inherited included.
    #[inline]
    pub fn properties(&self) -> &FxHashMap<String, Arc<PropertyInfo>> {
        &self.properties
    }

    /// Look up an ivar by name.
    pub fn ivar(&self, name: &str) -> Option<&IvarInfo> {
        self.ivars.get(name).map(|info| &**info)
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.get(name).map(|info| &**info)
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.get(name).map(|info| &**info)
    }

    /// Iterate the parent chain, nearest first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            next: self.super_info.as_deref(),
        }
    }

    /// Whether `cls` is this type or one of its ancestors.
    pub fn is_subclass_of(&self, cls: ClassHandle) -> bool {
        self.cls == cls || self.ancestors().any(|info| info.cls == cls)
    }

    /// Flag this snapshot as outdated.
    ///
    /// The snapshot stays readable. The next cache lookup for the type
    /// rebuilds it, along with any cached descendants that link to it.
    pub fn set_needs_update(&self) {
        self.needs_update.store(true, Ordering::Release);
    }

    /// Whether this snapshot, or any ancestor snapshot it links to, has been
    /// flagged. Callers holding a flagged snapshot should look the type up
    /// again.
    pub fn needs_update(&self) -> bool {
        std::iter::once(self)
            .chain(self.ancestors())
            .any(|info| info.needs_update.load(Ordering::Acquire))
    }
}

/// Content equality. The needs-update flag is not part of the content.
impl PartialEq for ClassInfo {
    fn eq(&self, other: &Self) -> bool {
        self.cls == other.cls
            && self.super_cls == other.super_cls
            && self.meta_cls == other.meta_cls
            && self.is_meta == other.is_meta
            && self.name == other.name
            && self.ivars == other.ivars
            && self.methods == other.methods
            && self.properties == other.properties
            && self.super_info == other.super_info
    }
}

impl Eq for ClassInfo {}

/// Iterator over a [`ClassInfo`]'s ancestors, nearest first.
pub struct Ancestors<'a> {
    next: Option<&'a ClassInfo>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ClassInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.super_info.as_deref();
        Some(current)
    }
}
