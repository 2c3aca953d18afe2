//! Property attribute strings.
//!
//! A declared property carries a comma-separated attribute string such as
//! `T@"NSString",C,N,V_name`. Each segment is one attribute: the first
//! character names it and the rest of the segment is its value.
//!
//! | Char | Meaning | Value |
//! |------|---------|-------|
//! | `T` | type encoding | encoding string |
//! | `V` | backing ivar | ivar name |
//! | `R` | readonly | - |
//! | `C` | copy | - |
//! | `&` | retain | - |
//! | `N` | nonatomic | - |
//! | `W` | weak | - |
//! | `D` | dynamic | - |
//! | `G` | custom getter | selector name |
//! | `S` | custom setter | selector name |
//!
//! Other segments (`P` garbage-collectable, `t` old-style type, empty
//! segments) are ignored.

use crate::{classify, EncodingType, PropertyAttrs, Tag};

/// Parsed view of a property attribute string. Borrows from the input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyAttributes<'a> {
    /// Classified `T` value with the attribute flags merged in.
    pub encoding: EncodingType,
    /// Raw `T` value (empty if absent).
    pub type_encoding: &'a str,
    /// `V` value.
    pub ivar_name: Option<&'a str>,
    /// `G` value.
    pub getter: Option<&'a str>,
    /// `S` value.
    pub setter: Option<&'a str>,
    /// Class named by an object type of the form `@"Name"`.
    pub class_name: Option<&'a str>,
    /// Protocols named by an object type of the form `@"Name<A><B>"`.
    pub protocols: Vec<&'a str>,
}

/// Parse a property attribute string. Never fails.
pub fn parse_attributes(attributes: &str) -> PropertyAttributes<'_> {
    let mut parsed = PropertyAttributes::default();
    let mut type_encoding = EncodingType::UNKNOWN;
    let mut attrs = PropertyAttrs::empty();

    for segment in attributes.split(',') {
        let mut chars = segment.chars();
        let Some(name) = chars.next() else {
            continue;
        };
        let value = chars.as_str();

        match name {
            'T' => {
                parsed.type_encoding = value;
                type_encoding = classify(value);
            }
            'V' => parsed.ivar_name = non_empty(value),
            'R' => attrs |= PropertyAttrs::READONLY,
            'C' => attrs |= PropertyAttrs::COPY,
            '&' => attrs |= PropertyAttrs::RETAIN,
            'N' => attrs |= PropertyAttrs::NONATOMIC,
            'D' => attrs |= PropertyAttrs::DYNAMIC,
            'W' => attrs |= PropertyAttrs::WEAK,
            'G' => {
                attrs |= PropertyAttrs::CUSTOM_GETTER;
                parsed.getter = non_empty(value);
            }
            'S' => {
                attrs |= PropertyAttrs::CUSTOM_SETTER;
                parsed.setter = non_empty(value);
            }
            _ => {}
        }
    }

    if type_encoding.tag() == Tag::Object {
        let (class_name, protocols) = object_class_and_protocols(parsed.type_encoding);
        parsed.class_name = class_name;
        parsed.protocols = protocols;
    }
    parsed.encoding = type_encoding.with_property_attrs(attrs);
    parsed
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Extract `Name` and `[A, B]` from `@"Name<A><B>"`.
fn object_class_and_protocols(encoding: &str) -> (Option<&str>, Vec<&str>) {
    let Some(body) = encoding.strip_prefix("@\"") else {
        return (None, Vec::new());
    };

    let name_end = body.find(['"', '<']).unwrap_or(body.len());
    let class_name = non_empty(&body[..name_end]);

    let mut protocols = Vec::new();
    let mut rest = &body[name_end..];
    while let Some(after) = rest.strip_prefix('<') {
        let end = after.find('>').unwrap_or(after.len());
        if let Some(protocol) = non_empty(&after[..end]) {
            protocols.push(protocol);
        }
        rest = after.get(end + 1..).unwrap_or_default();
    }

    (class_name, protocols)
}
