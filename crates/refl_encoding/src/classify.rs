//! Type-encoding classification.
//!
//! `classify` is total: every input, including empty and malformed strings,
//! yields an [`EncodingType`]. Anything unrecognized becomes [`Tag::Unknown`]
//! carrying whatever qualifiers were scanned before it.

use crate::{EncodingType, Qualifiers, Tag};

/// Classify a type-encoding string.
///
/// Leading qualifier characters (`r n N o O R V`) accumulate into the
/// qualifier set. The first remaining character picks the tag. Struct,
/// union and array bodies are not inspected.
pub fn classify(encoding: &str) -> EncodingType {
    let (qualifiers, rest) = split_qualifiers(encoding.as_bytes());
    EncodingType::from_tag(classify_body(rest)).with_qualifiers(qualifiers)
}

/// Strip the qualifier prefix, returning the accumulated set and the rest.
fn split_qualifiers(bytes: &[u8]) -> (Qualifiers, &[u8]) {
    let mut qualifiers = Qualifiers::empty();
    let mut pos = 0;
    while let Some(flag) = bytes.get(pos).copied().and_then(Qualifiers::from_prefix) {
        qualifiers |= flag;
        pos += 1;
    }
    (qualifiers, &bytes[pos..])
}

fn classify_body(body: &[u8]) -> Tag {
    let Some(&first) = body.first() else {
        return Tag::Unknown;
    };

    match first {
        b'v' => Tag::Void,
        b'B' => Tag::Bool,
        b'c' => Tag::Int8,
        b'C' => Tag::UInt8,
        b's' => Tag::Int16,
        b'S' => Tag::UInt16,
        b'i' | b'l' => Tag::Int32,
        b'I' | b'L' => Tag::UInt32,
        b'q' => Tag::Int64,
        b'Q' => Tag::UInt64,
        b'f' => Tag::Float,
        b'd' => Tag::Double,
        b'D' => Tag::LongDouble,
        b'#' => Tag::ClassReference,
        b':' => Tag::MethodSelector,
        b'*' => Tag::CString,
        b'^' => Tag::GenericPointer,
        b'[' => Tag::FixedArray,
        b'(' => Tag::Union,
        b'{' => Tag::Struct,
        // `@?` alone is a block; `@`, `@"Name"` and `@<Proto>` are objects.
        b'@' if body == b"@?" => Tag::FunctionPointer,
        b'@' => Tag::Object,
        _ => Tag::Unknown,
    }
}
