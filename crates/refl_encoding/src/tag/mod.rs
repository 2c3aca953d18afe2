//! Type kind tag for encoded runtime types.
//!
//! Every type-encoding string classifies to exactly one `Tag`. The set is
//! closed: encodings the classifier does not understand map to
//! [`Tag::Unknown`] rather than failing.
//!
//! # Tag Layout
//!
//! Tags occupy the low byte (bits 0-7) of a packed [`EncodingType`]:
//! - 0: Unknown
//! - 1-13: Scalars (void, bool, integers, floating point)
//! - 14-18: Reference-like types (object, class, selector, block, pointer)
//! - 19-22: Aggregates (struct, union, C string, C array)
//!
//! [`EncodingType`]: crate::EncodingType

use std::fmt;

/// Type kind discriminant (u8, stored in the low byte of `EncodingType`).
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Tag {
    /// Unrecognized or malformed encoding.
    #[default]
    Unknown = 0,

    // === Scalars (1-13) ===
    /// `v`: void.
    Void = 1,
    /// `B`: C++ bool / C99 `_Bool`.
    Bool = 2,
    /// `c`: char.
    Int8 = 3,
    /// `C`: unsigned char.
    UInt8 = 4,
    /// `s`: short.
    Int16 = 5,
    /// `S`: unsigned short.
    UInt16 = 6,
    /// `i` or `l`: int (and 32-bit long).
    Int32 = 7,
    /// `I` or `L`: unsigned int (and 32-bit unsigned long).
    UInt32 = 8,
    /// `q`: long long.
    Int64 = 9,
    /// `Q`: unsigned long long.
    UInt64 = 10,
    /// `f`: float.
    Float = 11,
    /// `d`: double.
    Double = 12,
    /// `D`: long double.
    LongDouble = 13,

    // === Reference-like (14-18) ===
    /// `@`: object reference.
    Object = 14,
    /// `#`: class object.
    ClassReference = 15,
    /// `:`: method selector.
    MethodSelector = 16,
    /// `@?`: block (callable object).
    FunctionPointer = 17,
    /// `^`: pointer to any type.
    GenericPointer = 18,

    // === Aggregates (19-22) ===
    /// `{...}`: struct.
    Struct = 19,
    /// `(...)`: union.
    Union = 20,
    /// `*`: character string.
    CString = 21,
    /// `[...]`: fixed-size array.
    FixedArray = 22,
}

impl Tag {
    /// Every tag, in discriminant order.
    pub const ALL: [Tag; 23] = [
        Tag::Unknown,
        Tag::Void,
        Tag::Bool,
        Tag::Int8,
        Tag::UInt8,
        Tag::Int16,
        Tag::UInt16,
        Tag::Int32,
        Tag::UInt32,
        Tag::Int64,
        Tag::UInt64,
        Tag::Float,
        Tag::Double,
        Tag::LongDouble,
        Tag::Object,
        Tag::ClassReference,
        Tag::MethodSelector,
        Tag::FunctionPointer,
        Tag::GenericPointer,
        Tag::Struct,
        Tag::Union,
        Tag::CString,
        Tag::FixedArray,
    ];

    /// Decode a raw discriminant. Out-of-range values decode as `Unknown`.
    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        if (raw as usize) < Self::ALL.len() {
            Self::ALL[raw as usize]
        } else {
            Self::Unknown
        }
    }

    /// Get the raw discriminant.
    #[inline]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Check if this tag is a C number (bool, integer, or floating point).
    ///
    /// These are the types a value mapper can box into a number object.
    #[inline]
    pub const fn is_c_number(self) -> bool {
        let v = self as u8;
        v >= Self::Bool as u8 && v <= Self::LongDouble as u8
    }

    /// Check if this tag is an integer type (signed or unsigned).
    #[inline]
    pub const fn is_integer(self) -> bool {
        let v = self as u8;
        v >= Self::Int8 as u8 && v <= Self::UInt64 as u8
    }

    /// Check if this tag is a floating point type.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double | Self::LongDouble)
    }

    /// Check if values of this tag are object references.
    #[inline]
    pub const fn is_object_like(self) -> bool {
        matches!(
            self,
            Self::Object | Self::ClassReference | Self::FunctionPointer
        )
    }

    /// Check if this tag is an aggregate whose layout is not expanded.
    #[inline]
    pub const fn is_aggregate(self) -> bool {
        matches!(self, Self::Struct | Self::Union | Self::FixedArray)
    }

    /// Get the name of this tag as a static string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::LongDouble => "long double",
            Self::Object => "object",
            Self::ClassReference => "class",
            Self::MethodSelector => "selector",
            Self::FunctionPointer => "block",
            Self::GenericPointer => "pointer",
            Self::Struct => "struct",
            Self::Union => "union",
            Self::CString => "c string",
            Self::FixedArray => "c array",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag::{}", self.name())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Tag must fit the low byte of a packed EncodingType
const _: () = assert!(std::mem::size_of::<Tag>() == 1);

#[cfg(test)]
mod tests;
