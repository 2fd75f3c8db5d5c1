use crate::entry::Entry;
use crate::hash_table::{Result, TableConfig};
use crate::util::{self, DefaultHashBuilder};
use std::fmt;
use std::hash::BuildHasher;
use std::slice;
use tracing::{debug, trace};

#[derive(Clone, Debug)]
enum Slot {
    Empty,
    Occupied(Entry),
    // Left behind by a delete. Probes continue past it, but it never matches a key.
    Tombstone,
}

/// A hash table using open addressing with linear probing.
///
/// Entries live in a single slot array. A key is looked up by probing from its hashed slot,
/// stepping one slot at a time and wrapping around, until the key or an empty slot is found.
/// Deleted entries leave a tombstone so that later keys on the same probe sequence remain
/// reachable; an insert reuses the first tombstone on its probe sequence. Every probe sequence is
/// bounded by the capacity.
///
/// When `len >= load_factor * capacity` before an insert, the capacity doubles and only live
/// entries are placed into the new array, which discards every tombstone. Inserting a key that is
/// already present is ignored, so the first value written for a key is the one that is kept.
///
/// # Examples
///
/// ```
/// use keyed_collections::hash_table::ProbingHashTable;
/// use keyed_collections::Entry;
///
/// let mut table = ProbingHashTable::new(10, 0.75).unwrap();
/// table.insert(Entry::new("a", "X"));
/// table.insert(Entry::new("a", "Y"));
///
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get("a"), Some("X"));
///
/// assert!(table.delete("a"));
/// assert!(!table.search("a"));
/// ```
pub struct ProbingHashTable<S = DefaultHashBuilder> {
    slots: Vec<Slot>,
    load_factor: f64,
    len: usize,
    hash_builder: S,
}

impl ProbingHashTable {
    /// Constructs a new, empty `ProbingHashTable` with `capacity` slots that resizes once
    /// `len >= load_factor * capacity`.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero or `load_factor` is not in `(0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::hash_table::{Error, ProbingHashTable};
    ///
    /// assert!(ProbingHashTable::new(10, 0.75).is_ok());
    /// assert_eq!(
    ///     ProbingHashTable::new(10, 1.5).err(),
    ///     Some(Error::InvalidLoadFactor(1.5)),
    /// );
    /// ```
    pub fn new(capacity: usize, load_factor: f64) -> Result<Self> {
        Self::with_hasher(capacity, load_factor, DefaultHashBuilder::default())
    }

    /// Constructs a new, empty `ProbingHashTable` from a `TableConfig`.
    pub fn from_config(config: &TableConfig) -> Result<Self> {
        Self::new(config.capacity, config.load_factor)
    }
}

impl<S> ProbingHashTable<S>
where
    S: BuildHasher,
{
    /// Constructs a new, empty `ProbingHashTable` that hashes keys with `hash_builder`.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero or `load_factor` is not in `(0, 1]`.
    pub fn with_hasher(capacity: usize, load_factor: f64, hash_builder: S) -> Result<Self> {
        let config = TableConfig {
            capacity,
            load_factor,
        };
        config.validate(1.0)?;
        Ok(Self::build(config, hash_builder))
    }

    fn build(config: TableConfig, hash_builder: S) -> Self {
        ProbingHashTable {
            slots: vec![Slot::Empty; config.capacity],
            load_factor: config.load_factor,
            len: 0,
            hash_builder,
        }
    }

    // Returns the index of the slot holding `key`.
    fn find(&self, key: &str) -> Option<usize> {
        let capacity = self.slots.len();
        let mut index = util::slot_index(&self.hash_builder, key, capacity);
        for _ in 0..capacity {
            match self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(ref entry) if entry.key() == key => return Some(index),
                _ => {},
            }
            index = (index + 1) % capacity;
        }
        None
    }

    fn resize(&mut self) {
        let new_capacity = self.slots.len() * 2;
        debug!(
            from = self.slots.len(),
            to = new_capacity,
            len = self.len,
            "resizing probing hash table"
        );

        let mut new_slots = vec![Slot::Empty; new_capacity];
        for slot in self.slots.drain(..) {
            if let Slot::Occupied(entry) = slot {
                let mut index = util::slot_index(&self.hash_builder, entry.key(), new_capacity);
                while let Slot::Occupied(_) = new_slots[index] {
                    index = (index + 1) % new_capacity;
                }
                new_slots[index] = Slot::Occupied(entry);
            }
        }
        self.slots = new_slots;
    }

    /// Inserts an entry into the table. If an entry with the same key already exists, the table
    /// is left untouched. Returns `true` if the entry was added.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::hash_table::ProbingHashTable;
    /// use keyed_collections::Entry;
    ///
    /// let mut table: ProbingHashTable = ProbingHashTable::default();
    /// assert!(table.insert(Entry::new("a", "X")));
    /// assert!(!table.insert(Entry::new("a", "Y")));
    /// assert_eq!(table.get("a"), Some("X"));
    /// ```
    pub fn insert(&mut self, entry: Entry) -> bool {
        if self.len as f64 >= self.load_factor * self.slots.len() as f64 {
            self.resize();
        }

        // The whole probe sequence is checked for the key, even past a reusable tombstone.
        let capacity = self.slots.len();
        let mut index = util::slot_index(&self.hash_builder, entry.key(), capacity);
        let mut landing = None;
        for _ in 0..capacity {
            match self.slots[index] {
                Slot::Empty => {
                    landing = landing.or(Some(index));
                    break;
                },
                Slot::Tombstone => {
                    landing = landing.or(Some(index));
                },
                Slot::Occupied(ref other) => {
                    if other.key() == entry.key() {
                        trace!(key = entry.key(), "ignoring duplicate probing hash table key");
                        return false;
                    }
                },
            }
            index = (index + 1) % capacity;
        }

        match landing {
            Some(index) => {
                self.slots[index] = Slot::Occupied(entry);
                self.len += 1;
                true
            },
            // unreachable while len < load_factor * capacity <= capacity
            None => {
                self.resize();
                self.insert(entry)
            },
        }
    }

    /// Returns the value associated with a key, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.find(key).and_then(|index| match self.slots[index] {
            Slot::Occupied(ref entry) => Some(entry.value()),
            _ => None,
        })
    }

    /// Checks if a key exists in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::hash_table::ProbingHashTable;
    /// use keyed_collections::Entry;
    ///
    /// let mut table: ProbingHashTable = ProbingHashTable::default();
    /// table.insert(Entry::new("a", "X"));
    /// assert!(table.search("a"));
    /// assert!(!table.search("b"));
    /// ```
    pub fn search(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry with a particular key, leaving a tombstone in its slot. Returns `true`
    /// if the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::hash_table::ProbingHashTable;
    /// use keyed_collections::Entry;
    ///
    /// let mut table: ProbingHashTable = ProbingHashTable::default();
    /// table.insert(Entry::new("a", "X"));
    /// assert!(table.delete("a"));
    /// assert!(!table.delete("a"));
    /// ```
    pub fn delete(&mut self, key: &str) -> bool {
        match self.find(key) {
            Some(index) => {
                self.slots[index] = Slot::Tombstone;
                self.len -= 1;
                true
            },
            None => false,
        }
    }

    /// Inserts every entry of a sequence and returns how many were added.
    pub fn insert_all<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = Entry>,
    {
        entries.into_iter().map(|entry| self.insert(entry)).filter(|added| *added).count()
    }

    /// Searches for every key of a sequence and returns how many were found.
    pub fn search_all<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().filter(|key| self.search(key.as_ref())).count()
    }

    /// Removes every key of a sequence and returns how many were present.
    pub fn delete_all<I, K>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().filter(|key| self.delete(key.as_ref())).count()
    }
}

impl<S> ProbingHashTable<S> {
    /// Returns the number of live entries in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the load factor that triggers a resize.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Clears the table, removing all entries and tombstones. The capacity is kept.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.len = 0;
    }

    /// Returns an iterator over the live entries of the table in slot order.
    pub fn iter(&self) -> ProbingHashTableIter<'_> {
        ProbingHashTableIter {
            inner: self.slots.iter(),
        }
    }
}

impl<'a, S> IntoIterator for &'a ProbingHashTable<S> {
    type IntoIter = ProbingHashTableIter<'a>;
    type Item = &'a Entry;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `ProbingHashTable`.
///
/// This iterator traverses the live entries of the table in slot order.
pub struct ProbingHashTableIter<'a> {
    inner: slice::Iter<'a, Slot>,
}

impl<'a> Iterator for ProbingHashTableIter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.inner.next() {
            if let Slot::Occupied(ref entry) = slot {
                return Some(entry);
            }
        }
        None
    }
}

impl<S> Default for ProbingHashTable<S>
where
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::build(TableConfig::probing(), S::default())
    }
}

impl<S> fmt::Display for ProbingHashTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{}.", index)?,
                Slot::Occupied(entry) => writeln!(f, "{}. {}", index, entry)?,
                Slot::Tombstone => writeln!(f, "{}. <deleted>", index)?,
            }
        }
        Ok(())
    }
}
