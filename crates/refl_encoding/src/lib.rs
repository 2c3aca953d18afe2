//! Type-encoding classifier for runtime type metadata.
//!
//! Runtime type systems describe field, method and property types with
//! compact encoding strings (`i`, `@"NSString"`, `{CGPoint=dd}`, ...). This
//! crate turns those strings into a closed taxonomy:
//!
//! - [`Tag`]: what kind of type an encoding names
//! - [`Qualifiers`]: parameter passing-convention prefixes
//! - [`PropertyAttrs`]: declared property attributes
//! - [`EncodingType`]: all three packed into one `u32`
//!
//! plus two small grammars built on the classifier: method signatures
//! ([`signature::split`]) and property attribute strings
//! ([`parse_attributes`]).
//!
//! Every entry point is a pure function of its input and never fails.

mod attributes;
mod classify;
mod flags;
pub mod signature;
mod tag;

pub use attributes::{parse_attributes, PropertyAttributes};
pub use classify::classify;
pub use flags::{EncodingType, PropertyAttrs, Qualifiers};
pub use signature::Signature;
pub use tag::Tag;
