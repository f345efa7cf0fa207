use std::mem;

use tracing::{debug, trace, warn};

use crate::{
    config::TableConfig,
    error::{HashTableError, Result},
    prime::next_prime,
};

/// Polynomial base of the hash that picks the first slot
const HASH_BASE_A: u64 = 2161;
/// Polynomial base of the hash that picks the probe step
const HASH_BASE_B: u64 = 2179;

/// An owned key-value pair
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: String,
}

/// State of a single bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Slot {
    /// Never held an entry; terminates probe sequences
    #[default]
    Empty,
    /// Tombstone left by a deletion; probe sequences continue past it
    Deleted,
    /// Holds a live entry
    Occupied(Entry),
}

impl Slot {
    /// Returns the live entry, if any
    fn entry(&self) -> Option<&Entry> {
        match self {
            Self::Occupied(entry) => Some(entry),
            Self::Empty | Self::Deleted => None,
        }
    }

    /// Returns a mutable reference to the live value, if any
    fn value_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Occupied(entry) => Some(&mut entry.value),
            Self::Empty | Self::Deleted => None,
        }
    }

    /// Consumes the slot, yielding the live entry, if any
    fn into_entry(self) -> Option<Entry> {
        match self {
            Self::Occupied(entry) => Some(entry),
            Self::Empty | Self::Deleted => None,
        }
    }
}

/// Where the probe sequence for a key ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// The key lives at this index
    Found(usize),
    /// The key is absent; a new entry belongs at this index
    Vacant(usize),
    /// The key is absent and every slot on the sequence is occupied
    Exhausted,
}

/// Hashes `key` as a base-`base` polynomial over its bytes, reduced modulo `modulus` at
/// every step.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn polynomial_hash(key: &str, base: u64, modulus: usize) -> usize {
    let modulus = modulus.max(1) as u128;
    let base = u128::from(base);
    let hash =
        key.bytes().fold(0_u128, |hash, byte| (hash * base + u128::from(byte)) % modulus);
    // hash < modulus, which came from a usize
    hash as usize
}

/// Double hashing probe sequence over a prime number of slots.
///
/// The step lies in `1..size`, so the sequence yields every slot exactly once.
#[derive(Debug, Clone)]
struct ProbeSequence {
    /// Next index to yield
    index: usize,
    /// Distance between consecutive indices
    step: usize,
    /// Number of slots in the table
    size: usize,
    /// Attempts left before the sequence would repeat
    remaining: usize,
}

impl ProbeSequence {
    /// Starts the probe sequence for `key` in a table of `size` slots
    #[allow(clippy::arithmetic_side_effects)]
    fn new(key: &str, size: usize) -> Self {
        let index = polynomial_hash(key, HASH_BASE_A, size);
        let step = polynomial_hash(key, HASH_BASE_B, size.saturating_sub(1)) + 1;
        Self { index, step, size, remaining: size }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.index;
        self.index = (self.index + self.step) % self.size;
        Some(current)
    }
}

/// Allocates `size` empty slots, reporting allocator failure instead of aborting
fn allocate_slots(size: usize) -> Result<Vec<Slot>> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(size).map_err(|source| {
        warn!(slots = size, error = %source, "bucket array allocation failed");
        HashTableError::AllocationFailure { slots: size, source }
    })?;
    slots.resize_with(size, Slot::default);
    Ok(slots)
}

/// A string-to-string hash table using open addressing with double hashing.
///
/// The bucket array length is always prime. Inserts grow the table before the load would
/// exceed the grow threshold, deletes shrink it once the load falls below the shrink
/// threshold, and both rebuild the array from scratch, which also discards tombstones.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock for shared access.
#[derive(Debug, Clone)]
pub struct HashTable {
    /// The bucket array; its length is the table size
    slots: Vec<Slot>,
    /// Number of live entries
    count: usize,
    /// Nominal capacity; the array length is the next prime at or above it
    base_size: usize,
    /// Sizing parameters
    config: TableConfig,
}

impl HashTable {
    /// Creates an empty table with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HashTableError::AllocationFailure`] if the bucket array cannot be allocated.
    pub fn new() -> Result<Self> {
        Self::with_config(TableConfig::default())
    }

    /// Creates an empty table sized from `config.initial_base_size()`.
    ///
    /// # Errors
    ///
    /// Returns [`HashTableError::AllocationFailure`] if the bucket array cannot be allocated.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_base_size(config.initial_base_size(), config)
    }

    /// Creates an empty table backed by `next_prime(base_size)` slots
    fn with_base_size(base_size: usize, config: TableConfig) -> Result<Self> {
        let size =
            next_prime(base_size).ok_or(HashTableError::CapacityOverflow { requested: base_size })?;
        Ok(Self { slots: allocate_slots(size)?, count: 0, base_size, config })
    }

    /// Walks the probe sequence of `key`, remembering the first tombstone for reuse
    fn lookup(&self, key: &str) -> Lookup {
        let mut first_tombstone = None;
        for index in ProbeSequence::new(key, self.slots.len()) {
            match self.slots.get(index) {
                Some(Slot::Empty) => return Lookup::Vacant(first_tombstone.unwrap_or(index)),
                Some(Slot::Deleted) => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(Slot::Occupied(entry)) if entry.key == key => return Lookup::Found(index),
                Some(Slot::Occupied(_)) | None => {}
            }
        }
        first_tombstone.map_or(Lookup::Exhausted, Lookup::Vacant)
    }

    /// Inserts a key-value pair, returning the previous value if the key was present.
    ///
    /// If the insert would push the load above the grow threshold, the table is first
    /// rebuilt with twice the base size.
    ///
    /// # Errors
    ///
    /// Returns [`HashTableError::AllocationFailure`] or [`HashTableError::CapacityOverflow`]
    /// when growing fails, and [`HashTableError::TableFull`] if no slot is free. The table is
    /// unchanged in every error case.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>> {
        let (key, value) = (key.into(), value.into());

        if self.load_after_insert() > self.config.grow_threshold() {
            let grown = self
                .base_size
                .checked_mul(2)
                .ok_or(HashTableError::CapacityOverflow { requested: self.base_size })?;
            self.resize(grown)?;
        }

        let size = self.slots.len();
        match self.lookup(&key) {
            Lookup::Found(index) => Ok(self
                .slots
                .get_mut(index)
                .and_then(Slot::value_mut)
                .map(|old| mem::replace(old, value))),
            Lookup::Vacant(index) => {
                let slot = self.slots.get_mut(index).ok_or(HashTableError::TableFull { size })?;
                *slot = Slot::Occupied(Entry { key, value });
                self.count = self.count.saturating_add(1);
                Ok(None)
            }
            Lookup::Exhausted => Err(HashTableError::TableFull { size }),
        }
    }

    /// Retrieves the value stored for `key`
    #[must_use]
    pub fn search(&self, key: &str) -> Option<&str> {
        match self.lookup(key) {
            Lookup::Found(index) => {
                self.slots.get(index).and_then(Slot::entry).map(|entry| entry.value.as_str())
            }
            Lookup::Vacant(_) | Lookup::Exhausted => None,
        }
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// If the load is below the shrink threshold the table is first rebuilt with half the
    /// base size, unless that would go below the initial base size. Deleting an absent key
    /// leaves every entry and the count untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HashTableError::AllocationFailure`] if shrinking fails; the table is then
    /// unchanged.
    pub fn delete(&mut self, key: &str) -> Result<Option<String>> {
        if self.load() < self.config.shrink_threshold() {
            self.resize(self.base_size / 2)?;
        }

        let Lookup::Found(index) = self.lookup(key) else {
            return Ok(None);
        };
        let Some(slot) = self.slots.get_mut(index) else {
            return Ok(None);
        };
        match mem::replace(slot, Slot::Deleted) {
            Slot::Occupied(entry) => {
                self.count = self.count.saturating_sub(1);
                Ok(Some(entry.value))
            }
            previous => {
                *slot = previous;
                Ok(None)
            }
        }
    }

    /// Rebuilds the table with `next_prime(new_base_size)` slots, reinserting live entries.
    ///
    /// Requests below the initial base size are ignored.
    fn resize(&mut self, new_base_size: usize) -> Result<()> {
        let floor = self.config.initial_base_size();
        if new_base_size < floor {
            trace!(requested = new_base_size, floor, "resize below the base size floor ignored");
            return Ok(());
        }

        let old_size = self.capacity();
        let mut resized = Self::with_base_size(new_base_size, self.config)?;
        if resized.slots.len() < self.count {
            return Err(HashTableError::TableFull { size: resized.slots.len() });
        }

        for entry in mem::take(&mut self.slots).into_iter().filter_map(Slot::into_entry) {
            resized.place(entry)?;
        }

        debug!(
            old_size,
            new_size = resized.capacity(),
            base_size = new_base_size,
            count = resized.count,
            "rebuilt bucket array"
        );
        *self = resized;
        Ok(())
    }

    /// Puts an entry into the first empty slot of its probe sequence.
    ///
    /// Only valid on a table without tombstones or an entry for the same key.
    fn place(&mut self, entry: Entry) -> Result<()> {
        let size = self.slots.len();
        let index = ProbeSequence::new(&entry.key, size)
            .find(|&index| matches!(self.slots.get(index), Some(Slot::Empty)))
            .ok_or(HashTableError::TableFull { size })?;
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::Occupied(entry);
            self.count = self.count.saturating_add(1);
        }
        Ok(())
    }

    /// Number of slots examined when looking up `key`, including the final one
    #[must_use]
    pub fn probe_count(&self, key: &str) -> usize {
        let mut probes: usize = 0;
        for index in ProbeSequence::new(key, self.slots.len()) {
            probes = probes.saturating_add(1);
            match self.slots.get(index) {
                Some(Slot::Occupied(entry)) if entry.key == key => break,
                Some(Slot::Empty) | None => break,
                Some(Slot::Occupied(_) | Slot::Deleted) => {}
            }
        }
        probes
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the length of the bucket array, always prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the nominal capacity the bucket array was sized from
    #[must_use]
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Returns the sizing configuration
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Returns the current load as an integer percentage
    #[must_use]
    pub fn load(&self) -> usize {
        self.count.saturating_mul(100) / self.slots.len().max(1)
    }

    /// Load percentage the table would have after adding one more entry
    fn load_after_insert(&self) -> usize {
        self.count.saturating_add(1).saturating_mul(100) / self.slots.len().max(1)
    }

    /// Removes every entry, keeping the current bucket array
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.count = 0;
    }

    /// Returns an iterator over the key-value pairs in no particular order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { slots: self.slots.iter() }
    }

    /// Consumes the table, yielding the owned key-value pairs in no particular order
    pub fn into_entries(self) -> impl Iterator<Item = (String, String)> {
        self.slots.into_iter().filter_map(Slot::into_entry).map(|entry| (entry.key, entry.value))
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key-value pairs of a `HashTable`
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Remaining slots of the table
    slots: std::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .find_map(Slot::entry)
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
    }
}
