//! Cache configuration.

/// Environment variable overriding [`CacheConfig::max_inheritance_depth`].
pub const ENV_MAX_DEPTH: &str = "REFL_MAX_INHERITANCE_DEPTH";

/// Default bound on parent-chain length.
pub const DEFAULT_MAX_INHERITANCE_DEPTH: usize = 256;

/// Hard ceiling on [`CacheConfig::max_inheritance_depth`]. Larger values are
/// clamped to it.
pub const INHERITANCE_DEPTH_CEILING: usize = 4096;

/// Tunables for a [`ClassInfoCache`](crate::ClassInfoCache).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheConfig {
    /// Most parent hops a resolvable type may have. Longer (or cyclic)
    /// chains resolve to `None` instead of recursing without bound. Capped at
    /// [`INHERITANCE_DEPTH_CEILING`].
    pub max_inheritance_depth: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_inheritance_depth: DEFAULT_MAX_INHERITANCE_DEPTH,
        }
    }
}

impl CacheConfig {
    /// Defaults, overridden by `REFL_MAX_INHERITANCE_DEPTH` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by values from `lookup`.
    ///
    /// A value that does not parse as a positive integer is ignored with a
    /// warning. A value above [`INHERITANCE_DEPTH_CEILING`] is clamped.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let config = Self::default();
        let Some(raw) = lookup(ENV_MAX_DEPTH) else {
            return config;
        };
        match raw.trim().parse::<usize>() {
            Ok(depth) if depth > 0 => {
                if depth > INHERITANCE_DEPTH_CEILING {
                    tracing::warn!(
                        var = ENV_MAX_DEPTH,
                        depth,
                        ceiling = INHERITANCE_DEPTH_CEILING,
                        "clamping inheritance depth"
                    );
                }
                config.with_max_inheritance_depth(depth)
            }
            _ => {
                tracing::warn!(
                    var = ENV_MAX_DEPTH,
                    value = %raw,
                    "ignoring invalid inheritance depth"
                );
                config
            }
        }
    }

    /// Set the inheritance depth bound, clamped to [`INHERITANCE_DEPTH_CEILING`].
    #[must_use]
    pub fn with_max_inheritance_depth(mut self, depth: usize) -> Self {
        self.max_inheritance_depth = depth.min(INHERITANCE_DEPTH_CEILING);
        self
    }

    /// The bound the cache enforces. Also clamps a directly assigned field.
    #[inline]
    pub fn depth_limit(&self) -> usize {
        self.max_inheritance_depth.min(INHERITANCE_DEPTH_CEILING)
    }
}
