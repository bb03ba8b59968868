use alloc::string::String;
use alloc::vec::Vec;
use core::alloc::Layout;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::mem;

use crate::config::TableConfig;
use crate::error::TableError;
use crate::log::debug;
use crate::log::trace;
use crate::prime::next_prime;
use crate::probe::ProbeSeq;

#[derive(Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    value: String,
}

impl Entry {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: String::from(key),
            value: String::from(value),
        }
    }
}

/// One position of the slot array.
#[derive(Clone, PartialEq, Eq)]
enum Slot {
    /// Never used since the last rebuild. Ends every probe sequence.
    Empty,
    /// Held an entry that was deleted. Probing continues past it.
    Tombstone,
    Occupied(Entry),
}

impl Slot {
    #[inline(always)]
    fn entry(&self) -> Option<&Entry> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Where an insert of a key should go.
enum Lookup {
    /// The key is already stored at this index.
    Found(usize),
    /// The key is absent; this is the first reusable slot on its sequence.
    Vacant(usize),
    /// The key is absent and every slot is occupied.
    Full,
}

/// Slot count for `base_size`, or `None` if no slot array that large can be
/// laid out in memory.
fn slot_count(base_size: usize) -> Option<usize> {
    Layout::array::<Slot>(base_size).ok()?;
    next_prime(base_size)
}

fn empty_slots(size: usize) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(size);
    slots.resize(size, Slot::Empty);
    slots
}

fn try_empty_slots(size: usize) -> Result<Vec<Slot>, TableError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(size)
        .map_err(|source| TableError::Allocation {
            slots: size,
            source,
        })?;
    slots.resize(size, Slot::Empty);
    Ok(slots)
}

/// An open-addressing hash table from string keys to string values.
///
/// Slots are probed with double hashing over a prime number of slots, deleted
/// entries leave tombstones behind, and the table rebuilds itself when the
/// load crosses the thresholds of its [`TableConfig`]: an insert into a table
/// more than 70% full doubles the base size first, and a delete that leaves
/// the table less than 10% full halves it, never below the base size of 53.
///
/// Keys and values are copied in; the table owns every string it holds.
///
/// ## Example
///
/// ```rust
/// # use prime_probe::HashTable;
/// #
/// let mut table = HashTable::new();
/// table.insert("name", "John");
/// table.insert("age", "30");
///
/// assert_eq!(table.search("name"), Some("John"));
/// assert_eq!(table.delete("age"), Some("30".to_string()));
/// assert_eq!(table.search("age"), None);
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashTable {
    slots: Vec<Slot>,
    base_size: usize,
    count: usize,
    tombstones: usize,
    config: TableConfig,
}

impl Debug for HashTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("count", &self.count)
            .field("tombstones", &self.tombstones)
            .field("base_size", &self.base_size)
            .field("size", &self.slots.len())
            .field(
                "slots",
                &self
                    .slots
                    .iter()
                    .map(|slot| match slot {
                        Slot::Empty => "..",
                        Slot::Tombstone => "xx",
                        Slot::Occupied(entry) => entry.key.as_str(),
                    })
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HashTable {
    /// Creates an empty table at the default base size of 53.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use prime_probe::HashTable;
    /// #
    /// let table = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 53);
    /// ```
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates an empty table with `base_size` as its nominal capacity.
    ///
    /// The slot count is the smallest prime at or above `base_size`. The
    /// table still grows and shrinks with the default policy; in particular
    /// a table created below the base size of 53 grows straight to 53 on its
    /// first resize. A base size of zero is treated as one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use prime_probe::HashTable;
    /// #
    /// let table = HashTable::with_base_size(100);
    /// assert_eq!(table.base_size(), 100);
    /// assert_eq!(table.capacity(), 101);
    /// ```
    pub fn with_base_size(base_size: usize) -> Self {
        Self::with_config(TableConfig::default().with_initial_base_size(base_size.max(1)))
    }

    /// Creates an empty table following `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`TableConfig::validate`] or its base size
    /// needs more slots than fit in memory. Allocation failure aborts, as it
    /// does for `Vec`.
    pub fn with_config(config: TableConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("invalid table configuration: {err}");
        }

        let size = slot_count(config.initial_base_size).expect("slot count overflow");
        trace!(base_size = config.initial_base_size, size, "created table");
        Self {
            slots: empty_slots(size),
            base_size: config.initial_base_size,
            count: 0,
            tombstones: 0,
            config,
        }
    }

    /// Creates an empty table following `config`, reporting an invalid
    /// configuration, an impossible base size, or a failed allocation instead
    /// of panicking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use prime_probe::ConfigError;
    /// # use prime_probe::HashTable;
    /// # use prime_probe::TableConfig;
    /// # use prime_probe::TableError;
    /// #
    /// let table = HashTable::try_with_config(TableConfig::default()).unwrap();
    /// assert_eq!(table.capacity(), 53);
    ///
    /// let err = HashTable::try_with_config(TableConfig::default().with_max_load(100));
    /// assert!(matches!(
    ///     err,
    ///     Err(TableError::Config(ConfigError::MaxLoadTooHigh { .. }))
    /// ));
    /// ```
    pub fn try_with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;

        let size =
            slot_count(config.initial_base_size).ok_or(TableError::CapacityOverflow {
                base_size: config.initial_base_size,
            })?;
        let slots = try_empty_slots(size)?;
        trace!(base_size = config.initial_base_size, size, "created table");
        Ok(Self {
            slots,
            base_size: config.initial_base_size,
            count: 0,
            tombstones: 0,
            config,
        })
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots, always a prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the nominal capacity requested by the last resize.
    ///
    /// Resizes double or halve this value rather than the prime slot count,
    /// so repeated resizes do not drift upward.
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Returns the number of slots holding a tombstone.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the sizing policy of this table.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the percentage of slots holding an entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use prime_probe::HashTable;
    /// #
    /// let mut table = HashTable::with_base_size(53);
    /// table.insert("a", "1");
    /// assert!((table.load_factor() - 100.0 / 53.0).abs() < 1e-9);
    /// ```
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.slots.len() as f64 * 100.0
    }

    /// Returns `true` if `key` is in the table.
    pub fn contains(&self, key: &str) -> bool {
        self.find_index(key).is_some()
    }

    /// Returns an iterator over the entries as `(key, value)` pairs, in slot
    /// order. That order changes whenever the table resizes.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.count,
        }
    }

    /// Looks up the value stored for `key`.
    ///
    /// The returned string is borrowed from the table and cannot outlive the
    /// next mutation of it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use prime_probe::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert("country", "USA");
    ///
    /// assert_eq!(table.search("country"), Some("USA"));
    /// assert_eq!(table.search("city"), None);
    /// ```
    pub fn search(&self, key: &str) -> Option<&str> {
        let index = self.find_index(key)?;
        self.slots[index].entry().map(|entry| entry.value.as_str())
    }

    /// Stores `value` under `key`, returning the value it replaces.
    ///
    /// If the table is more than `max_load` percent full it is grown first,
    /// so an insert can take time proportional to the table size.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use prime_probe::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(table.insert("name", "John"), None);
    /// assert_eq!(table.insert("name", "Jane"), Some("John".to_string()));
    /// assert_eq!(table.search("name"), Some("Jane"));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(&mut self, key: &str, value: &str) -> Option<String> {
        self.maybe_grow();

        loop {
            match self.find_slot(key) {
                Lookup::Found(index) => {
                    if let Slot::Occupied(entry) = &mut self.slots[index] {
                        return Some(mem::replace(&mut entry.value, String::from(value)));
                    }
                    unreachable!("probe matched a slot that holds no entry");
                }
                Lookup::Vacant(index) => {
                    self.place(index, Entry::new(key, value));
                    return None;
                }
                Lookup::Full => self.resize_up(),
            }
        }
    }

    /// Removes `key` from the table, returning its value.
    ///
    /// The slot is left as a tombstone. Deleting a key that is not present
    /// changes nothing. A delete that drops the load below `min_load`
    /// percent shrinks the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use prime_probe::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.insert("age", "30");
    ///
    /// assert_eq!(table.delete("age"), Some("30".to_string()));
    /// assert_eq!(table.delete("age"), None);
    /// assert!(table.is_empty());
    /// ```
    pub fn delete(&mut self, key: &str) -> Option<String> {
        let index = self.find_index(key)?;
        let Slot::Occupied(entry) = mem::replace(&mut self.slots[index], Slot::Tombstone) else {
            unreachable!("probe matched a slot that holds no entry");
        };
        self.count -= 1;
        self.tombstones += 1;

        if self.load_percent(self.count) < self.config.min_load {
            self.resize_down();
        }

        Some(entry.value)
    }

    #[inline(always)]
    fn load_percent(&self, occupied: usize) -> usize {
        occupied * 100 / self.slots.len()
    }

    /// Index of the entry for `key`. Stops at the first empty slot.
    fn find_index(&self, key: &str) -> Option<usize> {
        for index in ProbeSeq::new(key, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key == key => return Some(index),
                _ => {}
            }
        }
        None
    }

    /// Like `find_index`, but also reports where a missing key should go.
    ///
    /// The search runs past tombstones so a key stored further along its
    /// sequence is still found, and a vacant result reuses the first
    /// tombstone on the way.
    fn find_slot(&self, key: &str) -> Lookup {
        let mut first_tombstone = None;
        for index in ProbeSeq::new(key, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return Lookup::Vacant(first_tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Occupied(entry) if entry.key == key => return Lookup::Found(index),
                Slot::Occupied(_) => {}
            }
        }
        first_tombstone.map_or(Lookup::Full, Lookup::Vacant)
    }

    fn place(&mut self, index: usize, entry: Entry) {
        let previous = mem::replace(&mut self.slots[index], Slot::Occupied(entry));
        debug_assert!(previous.entry().is_none());
        if previous == Slot::Tombstone {
            self.tombstones -= 1;
        }
        self.count += 1;
    }

    fn maybe_grow(&mut self) {
        if self.load_percent(self.count) > self.config.max_load {
            self.resize_up();
        } else if self.load_percent(self.count + self.tombstones) > self.config.max_load {
            debug!(
                tombstones = self.tombstones,
                count = self.count,
                size = self.slots.len(),
                "purging tombstones"
            );
            self.rebuild(self.base_size);
        }
    }

    fn resize_up(&mut self) {
        let target = self
            .base_size
            .saturating_mul(2)
            .max(self.config.min_base_size)
            .max(self.count + 1);
        self.resize(target);
    }

    fn resize_down(&mut self) {
        self.resize(self.base_size / 2);
    }

    /// Rebuilds the table at `new_base_size`, unless that is below the
    /// configured floor or could not hold the current entries.
    fn resize(&mut self, new_base_size: usize) {
        if new_base_size < self.config.min_base_size || new_base_size <= self.count {
            return;
        }
        self.rebuild(new_base_size);
    }

    /// Moves every entry into a fresh slot array sized from `base_size`.
    /// Tombstones are dropped along with the old array.
    fn rebuild(&mut self, base_size: usize) {
        let size = slot_count(base_size).expect("slot count overflow");
        let old_slots = mem::replace(&mut self.slots, empty_slots(size));
        debug!(
            old_size = old_slots.len(),
            new_size = size,
            base_size,
            count = self.count,
            "resizing table"
        );

        self.base_size = base_size;
        self.count = 0;
        self.tombstones = 0;

        for slot in old_slots {
            if let Slot::Occupied(entry) = slot {
                match self.find_slot(&entry.key) {
                    Lookup::Vacant(index) => self.place(index, entry),
                    Lookup::Found(_) => unreachable!("duplicate key {:?} in table", entry.key),
                    Lookup::Full => unreachable!("rebuilt table has a slot for every entry"),
                }
            }
        }
    }
}

impl Drop for HashTable {
    fn drop(&mut self) {
        trace!(count = self.count, size = self.slots.len(), "dropped table");
    }
}

impl<K, V> Extend<(K, V)> for HashTable
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value.as_ref());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`HashTable`], created by
/// [`HashTable::iter`].
pub struct Iter<'a> {
    slots: core::slice::Iter<'a, Slot>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.slots.by_ref().find_map(Slot::entry)?;
        self.remaining -= 1;
        Some((entry.key.as_str(), entry.value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Number of entries per probe length.
///
/// Index `n` counts the entries found on attempt `n` of their probe
/// sequence; index 0 counts entries sitting in their home slot.
#[cfg(feature = "stats")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    /// Entry counts, indexed by probe length.
    pub counts: Vec<usize>,
}

#[cfg(feature = "stats")]
impl ProbeHistogram {
    /// Total number of entries counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Longest probe length with at least one entry.
    pub fn max_probe(&self) -> Option<usize> {
        self.counts.iter().rposition(|&count| count != 0)
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("probe histogram ({} entries):", self.total());
        for (length, &count) in self.counts.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", length, "█".repeat(width), count);
        }
    }
}

/// Occupancy statistics for a [`HashTable`].
#[cfg(feature = "stats")]
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Number of entries.
    pub populated: usize,
    /// Number of tombstone slots.
    pub tombstones: usize,
    /// Number of slots.
    pub total_slots: usize,
    /// Nominal capacity the slot count was derived from.
    pub base_size: usize,
    /// Entries over slots, in percent.
    pub load_factor: f64,
    /// Longest probe length of any entry.
    pub max_probe: usize,
    /// Mean probe length over all entries.
    pub mean_probe: f64,
}

#[cfg(feature = "stats")]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated, self.total_slots, self.load_factor
        );
        println!("Base size: {}", self.base_size);
        println!("Tombstones: {}", self.tombstones);
        println!(
            "Probe length: max {}, mean {:.3}",
            self.max_probe, self.mean_probe
        );
    }
}

#[cfg(feature = "stats")]
impl HashTable {
    /// Computes a histogram of probe lengths for the current table state.
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let mut counts = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(entry) = slot.entry() else {
                continue;
            };
            let length = ProbeSeq::new(&entry.key, self.slots.len())
                .position(|probed| probed == index)
                .unwrap_or_else(|| unreachable!("entry {:?} is off its probe sequence", entry.key));
            if counts.len() <= length {
                counts.resize(length + 1, 0);
            }
            counts[length] += 1;
        }
        ProbeHistogram { counts }
    }

    /// Returns occupancy and probe-length statistics.
    pub fn debug_stats(&self) -> DebugStats {
        let histogram = self.probe_histogram();
        let probe_sum: usize = histogram
            .counts
            .iter()
            .enumerate()
            .map(|(length, &count)| length * count)
            .sum();

        DebugStats {
            populated: self.count,
            tombstones: self.tombstones,
            total_slots: self.slots.len(),
            base_size: self.base_size,
            load_factor: self.load_factor(),
            max_probe: histogram.max_probe().unwrap_or(0),
            mean_probe: if self.count == 0 {
                0.0
            } else {
                probe_sum as f64 / self.count as f64
            },
        }
    }
}
