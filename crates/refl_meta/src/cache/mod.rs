//! Sharded, thread-safe cache of [`ClassInfo`] per runtime type.
//!
//! Lookups are O(1) after the first access to a type. A miss builds the
//! type's metadata (resolving its parent chain through the same cache) and
//! stores it; later lookups share that entry.
//!
//! # Thread Safety
//!
//! Entries live in `NUM_SHARDS` `RwLock`-guarded maps selected by handle
//! hash. Locks are held only to read or insert an entry, never while
//! building one, so two threads missing the same type may both build it.
//! Insertion double-checks under the write lock: a valid entry that landed
//! first is kept and returned to every racer, so all callers share one
//! `Arc`. A returned `ClassInfo` is always fully built.
//!
//! # Entry Lifecycle
//!
//! ```text
//! Absent ──get──► Building ──► Cached(valid) ──mark──► Cached(flagged)
//!                    ▲                                       │
//!                    └──────────────── get ──────────────────┘
//! ```
//!
//! Flagging never removes or blocks anything: holders of a flagged snapshot
//! keep a coherent, merely outdated view. The next lookup replaces the entry.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use refl_runtime::{ClassHandle, Runtime};
use rustc_hash::{FxHashMap, FxHasher};

use crate::{CacheConfig, ClassInfo};

/// Number of shards for cache entries.
const NUM_SHARDS: usize = 16;

type Shard = RwLock<FxHashMap<ClassHandle, Arc<ClassInfo>>>;

/// Thread-safe store mapping runtime types to their merged metadata.
pub struct ClassInfoCache {
    runtime: Arc<dyn Runtime>,
    config: CacheConfig,
    shards: [Shard; NUM_SHARDS],
}

/// A cache shared across threads.
pub type SharedClassInfoCache = Arc<ClassInfoCache>;

impl ClassInfoCache {
    /// Create an empty cache over `runtime` with default configuration.
    pub fn new(runtime: Arc<dyn Runtime>) -> Self {
        Self::with_config(runtime, CacheConfig::default())
    }

    /// Create an empty cache over `runtime`.
    pub fn with_config(runtime: Arc<dyn Runtime>, config: CacheConfig) -> Self {
        Self {
            runtime,
            config,
            shards: std::array::from_fn(|_| RwLock::new(FxHashMap::default())),
        }
    }

    /// The runtime this cache reads from.
    #[inline]
    pub fn runtime(&self) -> &dyn Runtime {
        &*self.runtime
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Compute shard index for a type handle.
    #[inline]
    fn shard_for(cls: ClassHandle) -> usize {
        let mut hasher = FxHasher::default();
        cls.hash(&mut hasher);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "truncation is fine for hash-based shard selection"
        )]
        let hash_usize = hasher.finish() as usize;
        hash_usize % NUM_SHARDS
    }

    #[inline]
    fn shard(&self, cls: ClassHandle) -> &Shard {
        &self.shards[Self::shard_for(cls)]
    }

    /// Get the metadata for a type, building it on first access.
    ///
    /// Returns `None` if the handle is null or does not name a runtime type,
    /// or if the type's parent chain cannot be resolved.
    pub fn get(&self, cls: ClassHandle) -> Option<Arc<ClassInfo>> {
        self.resolve(cls, 0)
    }

    /// Get the metadata for a type by name, building it on first access.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<ClassInfo>> {
        if name.is_empty() {
            return None;
        }
        let cls = self.runtime.lookup_class(name)?;
        self.get(cls)
    }

    /// Get the metadata for the meta-type of `info`.
    ///
    /// Meta-types are cached independently of the types they belong to.
    pub fn meta_info(&self, info: &ClassInfo) -> Option<Arc<ClassInfo>> {
        self.get(info.meta_cls()?)
    }

    /// Flag the cached entry for `cls` as outdated, if there is one.
    ///
    /// Call this after the runtime type changed (for example, it gained a
    /// method). Nothing is rebuilt until the next lookup.
    pub fn mark_needs_update(&self, cls: ClassHandle) {
        if let Some(info) = self.cached(cls) {
            tracing::debug!(name = info.name(), ?cls, "class info flagged for update");
            info.set_needs_update();
        }
    }

    /// Whether the cached entry for `cls` is flagged. `false` when uncached.
    pub fn needs_update(&self, cls: ClassHandle) -> bool {
        self.cached(cls).is_some_and(|info| info.needs_update())
    }

    /// The cached entry for `cls`, flagged or not, without building.
    pub fn cached(&self, cls: ClassHandle) -> Option<Arc<ClassInfo>> {
        self.shard(cls).read().get(&cls).cloned()
    }

    /// Number of cached types.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    /// Drop every cached entry. Snapshots already handed out stay valid.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.write().clear();
        }
    }

    /// Resolve `cls`, reached `depth` parent hops from the requested type.
    ///
    /// The requested type resolves only if its full chain fits the depth
    /// limit. A cache hit counts its own ancestors, so the answer is the same
    /// whether or not part of the chain is already cached.
    fn resolve(&self, cls: ClassHandle, depth: usize) -> Option<Arc<ClassInfo>> {
        if cls.is_none() {
            return None;
        }
        let limit = self.config.depth_limit();

        // Fast path: valid cached entry
        let stale = match self.cached(cls) {
            Some(info) if !info.needs_update() => {
                if depth + info.depth() > limit {
                    warn_too_deep(cls, limit);
                    return None;
                }
                tracing::trace!(name = info.name(), "class info cache hit");
                return Some(info);
            }
            Some(_) => true,
            None => false,
        };

        if depth > limit {
            warn_too_deep(cls, limit);
            return None;
        }
        if stale {
            tracing::debug!(?cls, "rebuilding outdated class info");
        }

        let built = Arc::new(self.build(cls, depth)?);

        // Slow path: insert, double-checking for a racing builder
        let mut guard = self.shard(cls).write();
        if let Some(existing) = guard.get(&cls) {
            if !existing.needs_update() {
                return Some(Arc::clone(existing));
            }
        }
        guard.insert(cls, Arc::clone(&built));
        Some(built)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn build(&self, cls: ClassHandle, depth: usize) -> Option<ClassInfo> {
        let runtime = &*self.runtime;
        let name = runtime.class_name(cls).filter(|name| !name.is_empty())?;

        let super_info = match runtime.superclass(cls) {
            Some(parent) => Some(ensure_sufficient_stack(|| self.resolve(parent, depth + 1))?),
            None => None,
        };

        let info = ClassInfo::assemble(runtime, cls, name, super_info);
        tracing::debug!(
            name = info.name(),
            ivars = info.ivars().len(),
            methods = info.methods().len(),
            properties = info.properties().len(),
            "built class info"
        );
        Some(info)
    }
}

fn warn_too_deep(cls: ClassHandle, limit: usize) {
    tracing::warn!(
        ?cls,
        limit,
        "inheritance chain too deep or cyclic; type not resolved"
    );
}

/// Minimum stack to keep free before following a parent link.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 64 * 1024;

/// Stack to allocate when growing.
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if little of it is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

impl std::fmt::Debug for ClassInfoCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassInfoCache")
            .field("config", &self.config)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
