//! Host runtime capability interface.
//!
//! Metadata extraction treats the host's reflection primitives as an opaque
//! capability. This crate defines that capability ([`Runtime`]), the opaque
//! handles it trades in, and [`MemoryRuntime`], an in-memory host used by
//! tests and by embedders that describe their types by hand.
//!
//! # Architecture
//!
//! ```text
//! Runtime (trait, implemented by the host)
//!     ├── types:   class_name / superclass / metaclass / lookup_class
//!     ├── members: ivars / methods / properties (declared, ordered)
//!     └── details: per-handle names, offsets and raw encodings
//! ```

mod handle;
mod memory;
mod runtime;

pub use handle::{ClassHandle, Imp, IvarHandle, MethodHandle, PropertyHandle, Selector};
pub use memory::{MemoryRuntime, RuntimeError};
pub use runtime::Runtime;
