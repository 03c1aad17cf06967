//! Engine configuration.
//!
//! This module controls how declarations are validated when they are
//! compiled and how batches of reads are evaluated.

use crate::error::{AleError, Result};
use serde::Deserialize;

/// Batch evaluation settings.
///
/// Reads in a batch are independent of each other, so larger batches can be
/// fanned out across the rayon thread pool. Small batches are cheaper to
/// evaluate on the calling thread.
///
/// # Examples
///
/// ```rust
/// use ale_engine::BatchConfig;
///
/// // Always stay on the calling thread
/// let sequential = BatchConfig {
///     enable_parallel: false,
///     ..Default::default()
/// };
///
/// // Fan out anything above 64 reads
/// let eager = BatchConfig {
///     enable_parallel: true,
///     min_batch_size_for_parallelism: 64,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Evaluate large batches on the rayon thread pool.
    ///
    /// **Default**: true
    pub enable_parallel: bool,

    /// Smallest batch that is evaluated in parallel.
    ///
    /// **Default**: 256
    pub min_batch_size_for_parallelism: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            enable_parallel: true,
            min_batch_size_for_parallelism: 256,
        }
    }
}

/// Declaration-time validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject group declarations whose patterns are not pairwise disjoint.
    ///
    /// When disabled, overlaps are logged and a read is assigned to the first
    /// group pattern that claims it.
    ///
    /// **Default**: true
    pub require_disjoint_groups: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_disjoint_groups: true,
        }
    }
}

/// Top-level engine configuration.
///
/// # Examples
///
/// ```rust
/// use ale_engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_min_parallel_batch(1024)
///     .with_disjoint_groups(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub batch: BatchConfig,
    pub validation: ValidationConfig,
}

impl EngineConfig {
    /// Evaluate every batch on the calling thread.
    pub fn sequential() -> Self {
        Self {
            batch: BatchConfig {
                enable_parallel: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Parallelise aggressively for dense read streams.
    pub fn high_throughput() -> Self {
        Self {
            batch: BatchConfig {
                enable_parallel: true,
                min_batch_size_for_parallelism: 64,
            },
            ..Default::default()
        }
    }

    /// Accept overlapping group patterns.
    pub fn lenient() -> Self {
        Self {
            validation: ValidationConfig {
                require_disjoint_groups: false,
            },
            ..Default::default()
        }
    }

    /// Enable or disable parallel batch evaluation.
    pub fn with_parallel_processing(mut self, enable: bool) -> Self {
        self.batch.enable_parallel = enable;
        self
    }

    /// Set the smallest batch evaluated in parallel.
    pub fn with_min_parallel_batch(mut self, size: usize) -> Self {
        self.batch.min_batch_size_for_parallelism = size;
        self
    }

    /// Require or waive pairwise disjoint group patterns.
    pub fn with_disjoint_groups(mut self, require: bool) -> Self {
        self.validation.require_disjoint_groups = require;
        self
    }

    /// Whether a batch of `len` reads should be evaluated in parallel.
    pub fn should_parallelize(&self, len: usize) -> bool {
        self.batch.enable_parallel && len >= self.batch.min_batch_size_for_parallelism
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch.min_batch_size_for_parallelism == 0 {
            return Err(AleError::InvalidConfig(
                "min_batch_size_for_parallelism must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
