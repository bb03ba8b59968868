//! Table operations that tolerate a missing table.
//!
//! Each function takes the table as an `Option` and falls back to a neutral
//! result when there is none: mutations do nothing, lookups report the key
//! as absent, and the size queries describe an empty table.
//!
//! ```rust
//! # use prime_probe::HashTable;
//! # use prime_probe::absent;
//! #
//! let mut missing: Option<HashTable> = None;
//! absent::insert(missing.as_mut(), "test", "value");
//! assert_eq!(absent::search(missing.as_ref(), "test"), None);
//! assert_eq!(absent::size(missing.as_ref()), 0);
//!
//! let mut table = Some(HashTable::new());
//! absent::insert(table.as_mut(), "test", "value");
//! assert_eq!(absent::search(table.as_ref(), "test"), Some("value"));
//! ```

use alloc::string::String;

use crate::hash_table::HashTable;

/// Stores `value` under `key`. Does nothing without a table.
pub fn insert(table: Option<&mut HashTable>, key: &str, value: &str) -> Option<String> {
    table?.insert(key, value)
}

/// Looks up `key`. Always `None` without a table.
pub fn search<'a>(table: Option<&'a HashTable>, key: &str) -> Option<&'a str> {
    table?.search(key)
}

/// Removes `key`. Does nothing without a table.
pub fn delete(table: Option<&mut HashTable>, key: &str) -> Option<String> {
    table?.delete(key)
}

/// Number of entries, or 0 without a table.
pub fn size(table: Option<&HashTable>) -> usize {
    table.map_or(0, HashTable::len)
}

/// `true` if the table is empty or missing.
pub fn is_empty(table: Option<&HashTable>) -> bool {
    table.is_none_or(HashTable::is_empty)
}

/// Load percentage, or 0.0 without a table.
pub fn load_factor(table: Option<&HashTable>) -> f64 {
    table.map_or(0.0, HashTable::load_factor)
}

/// `true` if the table holds `key`; `false` without a table.
pub fn contains(table: Option<&HashTable>, key: &str) -> bool {
    table.is_some_and(|table| table.contains(key))
}

/// Releases the table and every string it owns. Does nothing without one.
pub fn destroy(table: Option<HashTable>) {
    drop(table);
}
