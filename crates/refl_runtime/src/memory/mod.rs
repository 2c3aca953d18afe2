//! In-memory host runtime.
//!
//! `MemoryRuntime` models a dynamic type system: types are defined with a
//! parent, and members can be added to a type at any time afterwards, the
//! same way a live runtime gains methods after startup. It is the test
//! double for everything built on [`Runtime`], and a reference host for
//! embedders that describe their types by hand.
//!
//! # Design
//!
//! - Flat record tables indexed by handle (`Vec`), plus a `FxHashMap` name
//!   index for type lookup
//! - One `RwLock` over all tables: reads vastly outnumber definitions
//! - Every type is created together with its meta-type. A meta-type's parent
//!   is the parent's meta-type; a root meta-type's parent is the root type

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{ClassHandle, Imp, IvarHandle, MethodHandle, PropertyHandle, Runtime, Selector};

/// Error from defining types or members in a [`MemoryRuntime`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// A type with this name already exists.
    #[error("class `{0}` is already defined")]
    DuplicateClass(String),

    /// The handle does not name a type in this runtime.
    #[error("unknown class handle {0:?}")]
    UnknownClass(ClassHandle),

    /// The type already declares a member with this name.
    #[error("class `{class}` already declares `{member}`")]
    DuplicateMember { class: String, member: String },

    /// A handle table is full.
    #[error("runtime handle space exhausted")]
    Exhausted,
}

struct ClassRecord {
    name: String,
    superclass: Option<ClassHandle>,
    metaclass: Option<ClassHandle>,
    is_meta: bool,
    ivars: Vec<IvarHandle>,
    methods: Vec<MethodHandle>,
    properties: Vec<PropertyHandle>,
}

struct IvarRecord {
    name: String,
    offset: isize,
    type_encoding: String,
}

struct MethodRecord {
    selector: Selector,
    imp: Option<Imp>,
    type_encoding: String,
}

struct PropertyRecord {
    name: String,
    attributes: String,
}

#[derive(Default)]
struct Tables {
    classes: Vec<ClassRecord>,
    classes_by_name: FxHashMap<String, ClassHandle>,
    ivars: Vec<IvarRecord>,
    methods: Vec<MethodRecord>,
    properties: Vec<PropertyRecord>,
}

/// Next handle for a table of `len` records. `u32::MAX` is reserved for `NONE`.
fn next_raw(len: usize) -> Result<u32, RuntimeError> {
    u32::try_from(len)
        .ok()
        .filter(|&raw| raw != u32::MAX)
        .ok_or(RuntimeError::Exhausted)
}

impl Tables {
    fn class(&self, class: ClassHandle) -> Option<&ClassRecord> {
        self.classes.get(class.raw() as usize)
    }

    fn class_mut(&mut self, class: ClassHandle) -> Result<&mut ClassRecord, RuntimeError> {
        self.classes
            .get_mut(class.raw() as usize)
            .ok_or(RuntimeError::UnknownClass(class))
    }

    fn push_class(&mut self, record: ClassRecord) -> Result<ClassHandle, RuntimeError> {
        let handle = ClassHandle::from_raw(next_raw(self.classes.len())?);
        self.classes.push(record);
        Ok(handle)
    }

    fn duplicate(&self, class: ClassHandle, member: &str) -> RuntimeError {
        RuntimeError::DuplicateMember {
            class: self
                .class(class)
                .map(|record| record.name.clone())
                .unwrap_or_default(),
            member: member.to_owned(),
        }
    }
}

/// Thread-safe in-memory [`Runtime`].
#[derive(Default)]
pub struct MemoryRuntime {
    tables: RwLock<Tables>,
}

impl MemoryRuntime {
    /// Create an empty runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a type and its meta-type.
    pub fn define_class(
        &self,
        name: &str,
        superclass: Option<ClassHandle>,
    ) -> Result<ClassHandle, RuntimeError> {
        let mut tables = self.tables.write();

        if tables.classes_by_name.contains_key(name) {
            return Err(RuntimeError::DuplicateClass(name.to_owned()));
        }
        let super_meta = match superclass {
            Some(parent) => {
                let record = tables
                    .class(parent)
                    .filter(|record| !record.is_meta)
                    .ok_or(RuntimeError::UnknownClass(parent))?;
                record.metaclass
            }
            None => None,
        };

        let class = tables.push_class(ClassRecord {
            name: name.to_owned(),
            superclass,
            metaclass: None,
            is_meta: false,
            ivars: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        })?;
        let meta = tables.push_class(ClassRecord {
            name: name.to_owned(),
            superclass: Some(super_meta.unwrap_or(class)),
            metaclass: None,
            is_meta: true,
            ivars: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        })?;

        tables.class_mut(class)?.metaclass = Some(meta);
        tables.classes_by_name.insert(name.to_owned(), class);

        tracing::trace!(name, ?class, ?meta, "defined class");
        Ok(class)
    }

    /// Declare an instance variable on `class`.
    pub fn add_ivar(
        &self,
        class: ClassHandle,
        name: &str,
        type_encoding: &str,
        offset: isize,
    ) -> Result<IvarHandle, RuntimeError> {
        let mut tables = self.tables.write();

        let record = tables
            .class(class)
            .ok_or(RuntimeError::UnknownClass(class))?;
        if record
            .ivars
            .iter()
            .any(|&ivar| tables.ivars[ivar.raw() as usize].name == name)
        {
            return Err(tables.duplicate(class, name));
        }

        let ivar = IvarHandle::from_raw(next_raw(tables.ivars.len())?);
        tables.ivars.push(IvarRecord {
            name: name.to_owned(),
            offset,
            type_encoding: type_encoding.to_owned(),
        });
        tables.class_mut(class)?.ivars.push(ivar);
        Ok(ivar)
    }

    /// Declare a method on `class`. Use the meta-type for class methods.
    pub fn add_method(
        &self,
        class: ClassHandle,
        selector: &str,
        type_encoding: &str,
        imp: Option<Imp>,
    ) -> Result<MethodHandle, RuntimeError> {
        let mut tables = self.tables.write();

        let record = tables
            .class(class)
            .ok_or(RuntimeError::UnknownClass(class))?;
        if record
            .methods
            .iter()
            .any(|&method| tables.methods[method.raw() as usize].selector.name() == selector)
        {
            return Err(tables.duplicate(class, selector));
        }

        let method = MethodHandle::from_raw(next_raw(tables.methods.len())?);
        tables.methods.push(MethodRecord {
            selector: Selector::new(selector),
            imp,
            type_encoding: type_encoding.to_owned(),
        });
        tables.class_mut(class)?.methods.push(method);
        Ok(method)
    }

    /// Declare a property on `class`.
    pub fn add_property(
        &self,
        class: ClassHandle,
        name: &str,
        attributes: &str,
    ) -> Result<PropertyHandle, RuntimeError> {
        let mut tables = self.tables.write();

        let record = tables
            .class(class)
            .ok_or(RuntimeError::UnknownClass(class))?;
        if record
            .properties
            .iter()
            .any(|&property| tables.properties[property.raw() as usize].name == name)
        {
            return Err(tables.duplicate(class, name));
        }

        let property = PropertyHandle::from_raw(next_raw(tables.properties.len())?);
        tables.properties.push(PropertyRecord {
            name: name.to_owned(),
            attributes: attributes.to_owned(),
        });
        tables.class_mut(class)?.properties.push(property);
        Ok(property)
    }

    /// Number of types defined, meta-types included.
    pub fn class_count(&self) -> usize {
        self.tables.read().classes.len()
    }
}

impl Runtime for MemoryRuntime {
    fn class_name(&self, class: ClassHandle) -> Option<String> {
        self.tables.read().class(class).map(|record| record.name.clone())
    }

    fn superclass(&self, class: ClassHandle) -> Option<ClassHandle> {
        self.tables.read().class(class)?.superclass
    }

    fn metaclass(&self, class: ClassHandle) -> Option<ClassHandle> {
        self.tables.read().class(class)?.metaclass
    }

    fn is_metaclass(&self, class: ClassHandle) -> bool {
        self.tables
            .read()
            .class(class)
            .is_some_and(|record| record.is_meta)
    }

    fn lookup_class(&self, name: &str) -> Option<ClassHandle> {
        self.tables.read().classes_by_name.get(name).copied()
    }

    fn ivars(&self, class: ClassHandle) -> Vec<IvarHandle> {
        self.tables
            .read()
            .class(class)
            .map(|record| record.ivars.clone())
            .unwrap_or_default()
    }

    fn methods(&self, class: ClassHandle) -> Vec<MethodHandle> {
        self.tables
            .read()
            .class(class)
            .map(|record| record.methods.clone())
            .unwrap_or_default()
    }

    fn properties(&self, class: ClassHandle) -> Vec<PropertyHandle> {
        self.tables
            .read()
            .class(class)
            .map(|record| record.properties.clone())
            .unwrap_or_default()
    }

    fn ivar_name(&self, ivar: IvarHandle) -> Option<String> {
        let tables = self.tables.read();
        tables
            .ivars
            .get(ivar.raw() as usize)
            .map(|record| record.name.clone())
    }

    fn ivar_offset(&self, ivar: IvarHandle) -> isize {
        let tables = self.tables.read();
        tables
            .ivars
            .get(ivar.raw() as usize)
            .map_or(0, |record| record.offset)
    }

    fn ivar_type_encoding(&self, ivar: IvarHandle) -> Option<String> {
        let tables = self.tables.read();
        tables
            .ivars
            .get(ivar.raw() as usize)
            .map(|record| record.type_encoding.clone())
    }

    fn method_name(&self, method: MethodHandle) -> Option<String> {
        let tables = self.tables.read();
        tables
            .methods
            .get(method.raw() as usize)
            .map(|record| record.selector.name().to_owned())
    }

    fn method_selector(&self, method: MethodHandle) -> Option<Selector> {
        let tables = self.tables.read();
        tables
            .methods
            .get(method.raw() as usize)
            .map(|record| record.selector.clone())
    }

    fn method_implementation(&self, method: MethodHandle) -> Option<Imp> {
        self.tables.read().methods.get(method.raw() as usize)?.imp
    }

    fn method_type_encoding(&self, method: MethodHandle) -> Option<String> {
        let tables = self.tables.read();
        tables
            .methods
            .get(method.raw() as usize)
            .map(|record| record.type_encoding.clone())
    }

    fn property_name(&self, property: PropertyHandle) -> Option<String> {
        let tables = self.tables.read();
        tables
            .properties
            .get(property.raw() as usize)
            .map(|record| record.name.clone())
    }

    fn property_attributes(&self, property: PropertyHandle) -> Option<String> {
        let tables = self.tables.read();
        tables
            .properties
            .get(property.raw() as usize)
            .map(|record| record.attributes.clone())
    }
}
