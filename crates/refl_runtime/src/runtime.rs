//! The host runtime capability.
//!
//! Metadata extraction never talks to a type system directly. It queries a
//! [`Runtime`]: "given a type handle, enumerate its declared members and
//! their raw encodings". Hosts implement this over their native reflection
//! primitives; tests use [`MemoryRuntime`](crate::MemoryRuntime).
//!
//! # Contract
//!
//! - Enumeration order is the host's declaration order and must be stable
//!   for the lifetime of the process.
//! - Every accessor returns `None` (or an empty list) for `NONE` and for
//!   handles the host does not recognise.
//! - Implementations must be callable from many threads at once.

use refl_encoding::signature;

use crate::{ClassHandle, Imp, IvarHandle, MethodHandle, PropertyHandle, Selector};

/// Reflection primitives supplied by the host runtime.
pub trait Runtime: Send + Sync {
    // === Types ===

    /// Name of a type, or `None` if the handle is not a real type.
    fn class_name(&self, class: ClassHandle) -> Option<String>;

    /// Parent type, or `None` for a root type.
    fn superclass(&self, class: ClassHandle) -> Option<ClassHandle>;

    /// Meta-type of a type. `None` for meta-types themselves.
    fn metaclass(&self, class: ClassHandle) -> Option<ClassHandle>;

    /// Whether the handle names a meta-type.
    fn is_metaclass(&self, class: ClassHandle) -> bool;

    /// Find a type by name.
    fn lookup_class(&self, name: &str) -> Option<ClassHandle>;

    // === Declared members (own members only, in declaration order) ===

    /// Instance variables declared directly on `class`.
    fn ivars(&self, class: ClassHandle) -> Vec<IvarHandle>;

    /// Methods declared directly on `class`.
    fn methods(&self, class: ClassHandle) -> Vec<MethodHandle>;

    /// Properties declared directly on `class`.
    fn properties(&self, class: ClassHandle) -> Vec<PropertyHandle>;

    // === Instance variables ===

    /// Ivar name.
    fn ivar_name(&self, ivar: IvarHandle) -> Option<String>;

    /// Byte offset of the ivar within an instance.
    fn ivar_offset(&self, ivar: IvarHandle) -> isize;

    /// Raw type encoding of the ivar.
    fn ivar_type_encoding(&self, ivar: IvarHandle) -> Option<String>;

    // === Methods ===

    /// Method name (the selector's name).
    fn method_name(&self, method: MethodHandle) -> Option<String>;

    /// Method selector.
    fn method_selector(&self, method: MethodHandle) -> Option<Selector>;

    /// Method implementation address, if the host exposes one.
    fn method_implementation(&self, method: MethodHandle) -> Option<Imp>;

    /// Full signature encoding: return type then every argument.
    fn method_type_encoding(&self, method: MethodHandle) -> Option<String>;

    /// Return type encoding.
    ///
    /// Defaults to splitting [`method_type_encoding`](Self::method_type_encoding).
    fn method_return_type(&self, method: MethodHandle) -> Option<String> {
        let encoding = self.method_type_encoding(method)?;
        let sig = signature::split(&encoding);
        (!sig.return_type.is_empty()).then(|| sig.return_type.to_owned())
    }

    /// Number of arguments, including the implicit receiver and selector.
    ///
    /// Defaults to splitting [`method_type_encoding`](Self::method_type_encoding).
    fn method_argument_count(&self, method: MethodHandle) -> usize {
        self.method_type_encoding(method)
            .map_or(0, |encoding| signature::split(&encoding).argument_count())
    }

    /// Encoding of the argument at `index` (0 is the receiver).
    ///
    /// Defaults to splitting [`method_type_encoding`](Self::method_type_encoding).
    fn method_argument_type(&self, method: MethodHandle, index: usize) -> Option<String> {
        let encoding = self.method_type_encoding(method)?;
        signature::split(&encoding).argument(index).map(str::to_owned)
    }

    // === Properties ===

    /// Property name.
    fn property_name(&self, property: PropertyHandle) -> Option<String>;

    /// Raw attribute string, e.g. `T@"NSString",C,N,V_name`.
    fn property_attributes(&self, property: PropertyHandle) -> Option<String>;
}
