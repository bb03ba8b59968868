use crate::error::ConfigError;

/// Base size a table starts at when none is requested.
pub const DEFAULT_BASE_SIZE: usize = 53;

/// Load percentage above which an insert grows the table first.
pub const DEFAULT_MAX_LOAD: usize = 70;

/// Load percentage below which a successful delete shrinks the table.
pub const DEFAULT_MIN_LOAD: usize = 10;

/// Sizing and resize policy of a [`HashTable`](crate::HashTable).
///
/// Loads are integer percentages of occupied slots over total slots,
/// computed as `count * 100 / size`.
///
/// # Examples
///
/// ```rust
/// # use prime_probe::TableConfig;
/// #
/// let config = TableConfig::default()
///     .with_initial_base_size(200)
///     .with_max_load(60);
/// assert!(config.validate().is_ok());
///
/// let bad = TableConfig::default().with_min_load(80);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Base size of a freshly created table. The slot count is the next prime.
    pub initial_base_size: usize,
    /// Resizes to a base size below this are skipped.
    pub min_base_size: usize,
    /// Grow threshold, in percent.
    pub max_load: usize,
    /// Shrink threshold, in percent.
    pub min_load: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_base_size: DEFAULT_BASE_SIZE,
            min_base_size: DEFAULT_BASE_SIZE,
            max_load: DEFAULT_MAX_LOAD,
            min_load: DEFAULT_MIN_LOAD,
        }
    }
}

impl TableConfig {
    /// Sets the base size a new table starts at.
    pub fn with_initial_base_size(mut self, initial_base_size: usize) -> Self {
        self.initial_base_size = initial_base_size;
        self
    }

    /// Sets the smallest base size a resize may target.
    pub fn with_min_base_size(mut self, min_base_size: usize) -> Self {
        self.min_base_size = min_base_size;
        self
    }

    /// Sets the grow threshold.
    pub fn with_max_load(mut self, max_load: usize) -> Self {
        self.max_load = max_load;
        self
    }

    /// Sets the shrink threshold.
    pub fn with_min_load(mut self, min_load: usize) -> Self {
        self.min_load = min_load;
        self
    }

    /// Checks that the policy describes a table that can always make room.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_base_size == 0 {
            return Err(ConfigError::ZeroInitialBaseSize);
        }
        if self.min_base_size == 0 {
            return Err(ConfigError::ZeroMinBaseSize);
        }
        if self.max_load >= 100 {
            return Err(ConfigError::MaxLoadTooHigh {
                max_load: self.max_load,
            });
        }
        if self.min_load >= self.max_load {
            return Err(ConfigError::LoadThresholdsOverlap {
                min_load: self.min_load,
                max_load: self.max_load,
            });
        }
        Ok(())
    }
}
