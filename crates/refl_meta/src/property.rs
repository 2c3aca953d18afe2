//! Property descriptors.
//!
//! Accessor selectors follow the runtime's own resolution convention: the
//! getter is the custom getter or the property name, and the setter is the
//! custom setter or `set<Name>:` with the first character upper-cased.

use refl_encoding::{parse_attributes, EncodingType, PropertyAttrs, Tag};
use refl_runtime::{ClassHandle, PropertyHandle, Runtime, Selector};

/// Snapshot of one declared property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    /// Runtime handle this snapshot was read from.
    pub handle: PropertyHandle,
    /// Property name.
    pub name: String,
    /// Classified type with attribute flags.
    pub encoding: EncodingType,
    /// Raw type encoding (the `T` attribute).
    pub type_encoding: String,
    /// Backing ivar name.
    pub ivar_name: Option<String>,
    /// Class named by an `@"Name"` type.
    pub class_name: Option<String>,
    /// `class_name` resolved in the runtime, if it exists there.
    pub cls: Option<ClassHandle>,
    /// Protocols named by an `@"Name<Proto>"` type.
    pub protocols: Vec<String>,
    /// Effective getter.
    pub getter: Selector,
    /// Effective setter.
    pub setter: Selector,
}

impl PropertyInfo {
    /// Read a property from the runtime.
    ///
    /// Returns `None` for the null handle or a property the runtime cannot
    /// name.
    pub fn new(runtime: &dyn Runtime, property: PropertyHandle) -> Option<Self> {
        if property.is_none() {
            return None;
        }
        let name = runtime
            .property_name(property)
            .filter(|name| !name.is_empty())?;
        let attributes = runtime.property_attributes(property).unwrap_or_default();
        let parsed = parse_attributes(&attributes);

        let getter = parsed
            .getter
            .map_or_else(|| Selector::new(name.as_str()), Selector::new);
        let setter = parsed
            .setter
            .map_or_else(|| setter_selector(&name), Selector::new);

        Some(Self {
            handle: property,
            encoding: parsed.encoding,
            type_encoding: parsed.type_encoding.to_owned(),
            ivar_name: parsed.ivar_name.map(str::to_owned),
            cls: parsed.class_name.and_then(|class| runtime.lookup_class(class)),
            class_name: parsed.class_name.map(str::to_owned),
            protocols: parsed.protocols.iter().map(|&p| p.to_owned()).collect(),
            getter,
            setter,
            name,
        })
    }

    /// The classified type tag.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.encoding.tag()
    }

    /// The declared attribute flags.
    #[inline]
    pub fn attrs(&self) -> PropertyAttrs {
        self.encoding.property_attrs()
    }

    /// Whether the property has no setter.
    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.encoding.has_attr(PropertyAttrs::READONLY)
    }
}

/// Default setter for a property: `name` -> `setName:`.
pub fn setter_selector(name: &str) -> Selector {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Selector::new(":");
    };
    let mut setter = String::with_capacity(name.len() + 4);
    setter.push_str("set");
    setter.extend(first.to_uppercase());
    setter.push_str(chars.as_str());
    setter.push(':');
    Selector::new(setter)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
