//! Opaque handles into the host runtime.
//!
//! Handles are 32-bit indices chosen by the host. They are `Copy`, compare
//! by value, and are only meaningful to the runtime that issued them.
//! `NONE` stands for the host's null handle; every lookup that receives it
//! reports an absent result.

use std::fmt;
use std::sync::Arc;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// The null handle.
            pub const NONE: Self = Self(u32::MAX);

            /// Create a handle from a raw host index.
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw host index.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Check if this is the null handle.
            #[inline]
            pub const fn is_none(self) -> bool {
                self.0 == u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_none() {
                    write!(f, concat!($label, "(NONE)"))
                } else {
                    write!(f, concat!($label, "({})"), self.0)
                }
            }
        }
    };
}

define_handle!(
    /// A runtime type (class or meta-class).
    ClassHandle,
    "Class"
);
define_handle!(
    /// A declared instance variable.
    IvarHandle,
    "Ivar"
);
define_handle!(
    /// A declared method.
    MethodHandle,
    "Method"
);
define_handle!(
    /// A declared property.
    PropertyHandle,
    "Property"
);

/// Method selector: the name a message is dispatched by.
///
/// Selectors compare by name, so two selectors built from the same string
/// are the same selector.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Selector(Arc<str>);

impl Selector {
    /// Create a selector from its name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// The selector name, e.g. `setName:`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Number of arguments the selector takes (one per `:`).
    pub fn arity(&self) -> usize {
        self.0.bytes().filter(|&b| b == b':').count()
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@selector({})", self.0)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Address of a method implementation. Never dereferenced by this crate.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Imp(usize);

impl Imp {
    /// Wrap a host implementation address.
    #[inline]
    pub const fn from_addr(addr: usize) -> Self {
        Self(addr)
    }

    /// The wrapped address.
    #[inline]
    pub const fn addr(self) -> usize {
        self.0
    }
}

impl fmt::Debug for Imp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Imp({:#x})", self.0)
    }
}

#[cfg(test)]
mod tests;
