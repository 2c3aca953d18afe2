//! Cached, inheritance-merged runtime type metadata.
//!
//! Given a runtime type, this crate extracts every instance variable, method
//! and property the type exposes (its own declarations merged over its
//! ancestors'), classifies their type encodings, and caches the result per
//! type for concurrent readers.
//!
//! # Architecture
//!
//! ```text
//! ClassInfoCache ──get(cls)──► Arc<ClassInfo>
//!     │                            ├── super_info: Arc<ClassInfo> (parent entry)
//!     │                            ├── ivars:      name → IvarInfo
//!     │                            ├── methods:    name → MethodInfo
//!     │                            └── properties: name → PropertyInfo
//!     └── Runtime (host reflection capability)
//! ```
//!
//! Descriptors are immutable snapshots. When the host type changes, flag it
//! with [`ClassInfoCache::mark_needs_update`]; the next lookup rebuilds it.
//!
//! # Tracing
//!
//! The cache logs through `tracing`. Call [`init_tracing`] to print those
//! events to stderr, filtered by `RUST_LOG`.

mod cache;
mod class_info;
mod config;
pub mod global;
mod ivar;
mod method;
mod property;

use std::sync::Once;

pub use cache::{ClassInfoCache, SharedClassInfoCache};
pub use class_info::{Ancestors, ClassInfo};
pub use config::{
    CacheConfig, DEFAULT_MAX_INHERITANCE_DEPTH, ENV_MAX_DEPTH, INHERITANCE_DEPTH_CEILING,
};
pub use ivar::IvarInfo;
pub use method::{MethodInfo, IMPLICIT_ARGUMENTS};
pub use property::{setter_selector, PropertyInfo};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// The library never calls this itself. Embedders without their own
/// subscriber, and test binaries, call it early to see the cache's events.
/// Controlled by `RUST_LOG` env var:
/// - `RUST_LOG=refl_meta=debug` for cache builds and invalidation
/// - `RUST_LOG=refl_meta=trace` for cache hits
///
/// Does nothing when `RUST_LOG` is unset, or when the process already has a
/// global subscriber. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .try_init();
        if installed.is_err() {
            tracing::debug!("global subscriber already set; keeping it");
        }
    });
}
