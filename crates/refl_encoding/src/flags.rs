//! Qualifier and property-attribute flags, and the packed `EncodingType`.
//!
//! A classified encoding is one `u32` split into disjoint byte ranges:
//!
//! ```text
//!  bits 16-23        bits 8-15        bits 0-7
//! ┌───────────────┬────────────────┬──────────┐
//! │ PropertyAttrs │ Qualifiers     │ Tag      │
//! └───────────────┴────────────────┴──────────┘
//! ```
//!
//! The flag groups are independent `bitflags` sets, so the packed value can
//! be split apart and recombined without losing information.

use std::fmt;

use bitflags::bitflags;

use crate::Tag;

bitflags! {
    /// Method-parameter passing-convention qualifiers (bits 8-14).
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
    pub struct Qualifiers: u32 {
        /// `r`: const.
        const CONST = 1 << 8;
        /// `n`: in.
        const IN = 1 << 9;
        /// `N`: inout.
        const INOUT = 1 << 10;
        /// `o`: out.
        const OUT = 1 << 11;
        /// `O`: bycopy.
        const BYCOPY = 1 << 12;
        /// `R`: byref.
        const BYREF = 1 << 13;
        /// `V`: oneway.
        const ONEWAY = 1 << 14;
    }
}

impl Qualifiers {
    /// Map a qualifier prefix character to its flag.
    ///
    /// Returns `None` for any character that is not a qualifier, which ends
    /// the prefix scan.
    #[inline]
    pub const fn from_prefix(byte: u8) -> Option<Self> {
        match byte {
            b'r' => Some(Self::CONST),
            b'n' => Some(Self::IN),
            b'N' => Some(Self::INOUT),
            b'o' => Some(Self::OUT),
            b'O' => Some(Self::BYCOPY),
            b'R' => Some(Self::BYREF),
            b'V' => Some(Self::ONEWAY),
            _ => None,
        }
    }
}

bitflags! {
    /// Declared property attributes (bits 16-23).
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
    pub struct PropertyAttrs: u32 {
        /// `R`: readonly.
        const READONLY = 1 << 16;
        /// `C`: copy.
        const COPY = 1 << 17;
        /// `&`: retain (strong).
        const RETAIN = 1 << 18;
        /// `N`: nonatomic.
        const NONATOMIC = 1 << 19;
        /// `W`: weak.
        const WEAK = 1 << 20;
        /// `G<name>`: custom getter.
        const CUSTOM_GETTER = 1 << 21;
        /// `S<name>`: custom setter.
        const CUSTOM_SETTER = 1 << 22;
        /// `D`: dynamic (`@dynamic`).
        const DYNAMIC = 1 << 23;
    }
}

/// Tag plus qualifier and property-attribute flags, packed into one `u32`.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct EncodingType(u32);

impl EncodingType {
    /// Mask of the tag byte.
    pub const TYPE_MASK: u32 = 0xFF;
    /// Mask of the qualifier byte.
    pub const QUALIFIER_MASK: u32 = 0xFF00;
    /// Mask of the property-attribute byte.
    pub const PROPERTY_MASK: u32 = 0x00FF_0000;

    /// The unknown encoding with no flags.
    pub const UNKNOWN: Self = Self(0);

    /// Pack a tag and both flag groups.
    #[inline]
    pub const fn new(tag: Tag, qualifiers: Qualifiers, attrs: PropertyAttrs) -> Self {
        Self(tag as u32 | qualifiers.bits() | attrs.bits())
    }

    /// Pack a bare tag with no flags.
    #[inline]
    pub const fn from_tag(tag: Tag) -> Self {
        Self(tag as u32)
    }

    /// Rebuild from a raw packed value. Unused bits are dropped.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw & (Self::TYPE_MASK | Self::QUALIFIER_MASK | Self::PROPERTY_MASK))
    }

    /// Get the raw packed value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The type tag.
    #[inline]
    pub const fn tag(self) -> Tag {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "masked to the low byte"
        )]
        let raw = (self.0 & Self::TYPE_MASK) as u8;
        Tag::from_raw(raw)
    }

    /// The qualifier flags.
    #[inline]
    pub const fn qualifiers(self) -> Qualifiers {
        Qualifiers::from_bits_truncate(self.0 & Self::QUALIFIER_MASK)
    }

    /// The property-attribute flags.
    #[inline]
    pub const fn property_attrs(self) -> PropertyAttrs {
        PropertyAttrs::from_bits_truncate(self.0 & Self::PROPERTY_MASK)
    }

    /// Replace the tag, keeping both flag groups.
    #[inline]
    #[must_use]
    pub const fn with_tag(self, tag: Tag) -> Self {
        Self((self.0 & !Self::TYPE_MASK) | tag as u32)
    }

    /// Add qualifier flags.
    #[inline]
    #[must_use]
    pub const fn with_qualifiers(self, qualifiers: Qualifiers) -> Self {
        Self(self.0 | qualifiers.bits())
    }

    /// Add property-attribute flags.
    #[inline]
    #[must_use]
    pub const fn with_property_attrs(self, attrs: PropertyAttrs) -> Self {
        Self(self.0 | attrs.bits())
    }

    /// Check for a property attribute.
    #[inline]
    pub const fn has_attr(self, attr: PropertyAttrs) -> bool {
        self.property_attrs().contains(attr)
    }

    /// Check for a qualifier.
    #[inline]
    pub const fn has_qualifier(self, qualifier: Qualifiers) -> bool {
        self.qualifiers().contains(qualifier)
    }
}

impl From<Tag> for EncodingType {
    fn from(tag: Tag) -> Self {
        Self::from_tag(tag)
    }
}

impl fmt::Debug for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingType")
            .field("tag", &self.tag())
            .field("qualifiers", &self.qualifiers())
            .field("attrs", &self.property_attrs())
            .finish()
    }
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
