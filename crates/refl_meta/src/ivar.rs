//! Instance variable descriptors.

use refl_encoding::{classify, EncodingType, Tag};
use refl_runtime::{IvarHandle, Runtime};

/// Snapshot of one declared instance variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IvarInfo {
    /// Runtime handle this snapshot was read from.
    pub handle: IvarHandle,
    /// Ivar name.
    pub name: String,
    /// Byte offset within an instance.
    pub offset: isize,
    /// Raw type encoding.
    pub type_encoding: String,
    /// Classified type encoding.
    pub encoding: EncodingType,
}

impl IvarInfo {
    /// Read an ivar from the runtime.
    ///
    /// Returns `None` for the null handle or an ivar the runtime cannot name.
    pub fn new(runtime: &dyn Runtime, ivar: IvarHandle) -> Option<Self> {
        if ivar.is_none() {
            return None;
        }
        let name = runtime.ivar_name(ivar).filter(|name| !name.is_empty())?;
        let type_encoding = runtime.ivar_type_encoding(ivar).unwrap_or_default();

        Some(Self {
            handle: ivar,
            name,
            offset: runtime.ivar_offset(ivar),
            encoding: classify(&type_encoding),
            type_encoding,
        })
    }

    /// The classified type tag.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.encoding.tag()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
