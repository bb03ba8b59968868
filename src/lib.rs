#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(all(test, not(feature = "std")))]
extern crate std;

pub mod absent;

/// Sizing and resize policy.
pub mod config;

/// Error types for fallible table construction.
pub mod error;

/// The open-addressing table itself.
///
/// Keys are placed by double hashing over a prime number of slots. Deleted
/// entries become tombstones until the next rebuild.
pub mod hash_table;

mod log;

/// Prime testing and rounding for slot counts.
pub mod prime;

/// String hashing and the double-hashing probe sequence.
pub mod probe;

pub use config::TableConfig;
pub use error::ConfigError;
pub use error::TableError;
pub use hash_table::HashTable;
#[cfg(feature = "stats")]
pub use hash_table::DebugStats;
#[cfg(feature = "stats")]
pub use hash_table::ProbeHistogram;
