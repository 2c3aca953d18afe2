//! Method descriptors.

use refl_encoding::{classify, EncodingType};
use refl_runtime::{Imp, MethodHandle, Runtime, Selector};
use smallvec::SmallVec;

/// Positions the calling convention reserves for the receiver and selector.
pub const IMPLICIT_ARGUMENTS: usize = 2;

/// Snapshot of one declared method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    /// Runtime handle this snapshot was read from.
    pub handle: MethodHandle,
    /// Method name.
    pub name: String,
    /// Dispatch selector.
    pub selector: Selector,
    /// Implementation address, when the host exposes one.
    pub imp: Option<Imp>,
    /// Full signature encoding.
    pub type_encoding: String,
    /// Return type encoding.
    pub return_type_encoding: String,
    /// Declared argument encodings, receiver and selector excluded.
    pub argument_type_encodings: Vec<String>,
    /// Classified return type.
    pub return_type: EncodingType,
    /// Classified declared arguments, parallel to `argument_type_encodings`.
    pub argument_types: SmallVec<[EncodingType; 4]>,
}

impl MethodInfo {
    /// Read a method from the runtime.
    ///
    /// Returns `None` for the null handle or a method the runtime cannot name.
    pub fn new(runtime: &dyn Runtime, method: MethodHandle) -> Option<Self> {
        if method.is_none() {
            return None;
        }
        let name = runtime
            .method_name(method)
            .filter(|name| !name.is_empty())?;
        let selector = runtime
            .method_selector(method)
            .unwrap_or_else(|| Selector::new(name.as_str()));

        let return_type_encoding = runtime.method_return_type(method).unwrap_or_default();
        let argument_count = runtime.method_argument_count(method);
        let argument_type_encodings: Vec<String> = (IMPLICIT_ARGUMENTS..argument_count)
            .map(|index| {
                runtime
                    .method_argument_type(method, index)
                    .unwrap_or_default()
            })
            .collect();

        Some(Self {
            handle: method,
            name,
            selector,
            imp: runtime.method_implementation(method),
            type_encoding: runtime.method_type_encoding(method).unwrap_or_default(),
            return_type: classify(&return_type_encoding),
            argument_types: argument_type_encodings
                .iter()
                .map(|encoding| classify(encoding))
                .collect(),
            return_type_encoding,
            argument_type_encodings,
        })
    }

    /// Number of declared arguments (receiver and selector excluded).
    #[inline]
    pub fn arity(&self) -> usize {
        self.argument_type_encodings.len()
    }
}
