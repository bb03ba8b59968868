use alloc::collections::TryReserveError;

/// A [`TableConfig`](crate::TableConfig) that cannot describe a working
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The base size the table starts at is zero.
    #[error("initial base size must be non-zero")]
    ZeroInitialBaseSize,
    /// The floor for downward resizes is zero.
    #[error("minimum base size must be non-zero")]
    ZeroMinBaseSize,
    /// The grow threshold would be reached only above full occupancy.
    #[error("max load {max_load}% must be below 100%")]
    MaxLoadTooHigh {
        /// Requested grow threshold, in percent.
        max_load: usize,
    },
    /// The shrink threshold is not below the grow threshold, so a resize
    /// could immediately trigger the opposite resize.
    #[error("min load {min_load}% must be below max load {max_load}%")]
    LoadThresholdsOverlap {
        /// Requested shrink threshold, in percent.
        min_load: usize,
        /// Requested grow threshold, in percent.
        max_load: usize,
    },
}

/// Failure to build a [`HashTable`](crate::HashTable) through
/// [`HashTable::try_with_config`](crate::HashTable::try_with_config).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The configuration was rejected before allocating.
    #[error("invalid table configuration: {0}")]
    Config(#[from] ConfigError),
    /// The base size needs a slot array larger than the address space.
    #[error("base size {base_size} needs more slots than fit in memory")]
    CapacityOverflow {
        /// Requested base size.
        base_size: usize,
    },
    /// The slot array could not be allocated.
    #[error("failed to allocate {slots} slots")]
    Allocation {
        /// Number of slots requested.
        slots: usize,
        /// The allocator's error.
        #[source]
        source: TryReserveError,
    },
}
