//! Configuration system for the MIPS pipeline simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (memory size, cache geometry).
//! 2. **Structures:** Config for the simulation and for each cache instance.
//! 3. **Validation:** Geometry checks (power-of-two sizes) surfaced as errors.
//!
//! Configuration is supplied as JSON (`serde_json`) or via
//! [`SimConfig::default`] for the CLI.

use serde::Deserialize;

use crate::common::error::SimError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden in a JSON configuration file.
mod defaults {
    /// Default size of the flat memory store in bytes (1 MiB).
    pub const MEMORY_BYTES: usize = crate::common::constants::DEFAULT_MEMORY_BYTES;

    /// Default cache size in bytes (256 bytes).
    pub const CACHE_SIZE: u32 = 256;

    /// Default cache block size in bytes (16 bytes).
    pub const BLOCK_SIZE: u32 = 16;

    /// Default cache miss latency in cycles.
    pub const MISS_LATENCY: u32 = 4;
}

/// Cache organization: direct-mapped or two-way set-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CacheKind {
    /// One block per set.
    #[default]
    #[serde(alias = "direct_mapped")]
    DirectMapped,
    /// Two blocks per set with LRU replacement between them.
    #[serde(alias = "two_way")]
    TwoWay,
}

impl CacheKind {
    /// Returns the number of ways for this organization.
    #[inline]
    pub fn ways(self) -> u32 {
        match self {
            Self::DirectMapped => 1,
            Self::TwoWay => 2,
        }
    }
}

/// Configuration for one cache instance.
///
/// The instruction and data caches are configured independently.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheConfig {
    /// Total cache capacity in bytes (power of two).
    #[serde(default = "CacheConfig::default_cache_size")]
    pub cache_size: u32,

    /// Block (line) size in bytes (power of two).
    #[serde(default = "CacheConfig::default_block_size")]
    pub block_size: u32,

    /// Cache organization.
    #[serde(default)]
    pub kind: CacheKind,

    /// Miss penalty in cycles. Zero disables miss stalling.
    #[serde(default = "CacheConfig::default_miss_latency")]
    pub miss_latency: u32,
}

impl CacheConfig {
    /// Returns the default cache capacity in bytes.
    fn default_cache_size() -> u32 {
        defaults::CACHE_SIZE
    }

    /// Returns the default block size in bytes.
    fn default_block_size() -> u32 {
        defaults::BLOCK_SIZE
    }

    /// Returns the default miss latency in cycles.
    fn default_miss_latency() -> u32 {
        defaults::MISS_LATENCY
    }

    /// Validates the cache geometry.
    ///
    /// # Arguments
    ///
    /// * `name` - Cache name used in error messages (e.g. `"icache"`).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] when a size is zero or not a power of
    /// two, or when the capacity cannot hold one block per way.
    pub fn validate(&self, name: &str) -> Result<(), SimError> {
        if self.cache_size == 0 || !self.cache_size.is_power_of_two() {
            return Err(SimError::Config(format!(
                "{name}: cache_size {} is not a power of two",
                self.cache_size
            )));
        }
        if self.block_size == 0 || !self.block_size.is_power_of_two() {
            return Err(SimError::Config(format!(
                "{name}: block_size {} is not a power of two",
                self.block_size
            )));
        }
        if self.cache_size < self.block_size * self.kind.ways() {
            return Err(SimError::Config(format!(
                "{name}: cache_size {} cannot hold {} way(s) of {}-byte blocks",
                self.cache_size,
                self.kind.ways(),
                self.block_size
            )));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration: 256 bytes, 16-byte blocks,
    /// direct-mapped, 4-cycle miss latency.
    fn default() -> Self {
        Self {
            cache_size: defaults::CACHE_SIZE,
            block_size: defaults::BLOCK_SIZE,
            kind: CacheKind::default(),
            miss_latency: defaults::MISS_LATENCY,
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Deserializing from JSON:
///
/// ```
/// use mipsim_core::config::{CacheKind, SimConfig};
///
/// let json = r#"{
///     "trace": true,
///     "memory_bytes": 65536,
///     "icache": {
///         "cache_size": 64,
///         "block_size": 4,
///         "kind": "TwoWay",
///         "miss_latency": 3
///     },
///     "dcache": {
///         "cache_size": 64,
///         "block_size": 4,
///         "kind": "TwoWay",
///         "miss_latency": 3
///     }
/// }"#;
///
/// let config: SimConfig = serde_json::from_str(json).unwrap();
/// assert!(config.trace);
/// assert_eq!(config.icache.kind, CacheKind::TwoWay);
/// assert_eq!(config.dcache.cache_size, 64);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Enable per-stage tracing to stderr.
    #[serde(default)]
    pub trace: bool,

    /// Size of the flat memory store in bytes.
    #[serde(default = "SimConfig::default_memory_bytes")]
    pub memory_bytes: usize,

    /// Instruction cache configuration.
    #[serde(default)]
    pub icache: CacheConfig,

    /// Data cache configuration.
    #[serde(default)]
    pub dcache: CacheConfig,
}

impl SimConfig {
    /// Returns the default memory store size in bytes.
    fn default_memory_bytes() -> usize {
        defaults::MEMORY_BYTES
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trace: false,
            memory_bytes: defaults::MEMORY_BYTES,
            icache: CacheConfig::default(),
            dcache: CacheConfig::default(),
        }
    }
}
