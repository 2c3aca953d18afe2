//! Process-wide cache.
//!
//! Most hosts have exactly one runtime, so they install one cache at startup
//! and reach it from anywhere. Installation happens once; the cache then
//! lives for the rest of the process.

use std::sync::{Arc, OnceLock};

use refl_runtime::Runtime;

use crate::{CacheConfig, ClassInfoCache};

static GLOBAL: OnceLock<ClassInfoCache> = OnceLock::new();

/// Error from [`install`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GlobalError {
    /// A process-wide cache is already installed.
    #[error("a global class info cache is already installed")]
    AlreadyInstalled,
}

/// Install the process-wide cache over `runtime`.
pub fn install(
    runtime: Arc<dyn Runtime>,
    config: CacheConfig,
) -> Result<&'static ClassInfoCache, GlobalError> {
    let mut installed = false;
    let cache = GLOBAL.get_or_init(|| {
        installed = true;
        ClassInfoCache::with_config(runtime, config)
    });
    if installed {
        tracing::debug!(config = ?cache.config(), "installed global class info cache");
        Ok(cache)
    } else {
        Err(GlobalError::AlreadyInstalled)
    }
}

/// The process-wide cache, if one has been installed.
pub fn global() -> Option<&'static ClassInfoCache> {
    GLOBAL.get()
}
