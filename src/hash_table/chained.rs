use crate::entry::Entry;
use crate::hash_table::{Result, TableConfig};
use crate::util::{self, DefaultHashBuilder};
use std::fmt;
use std::hash::BuildHasher;
use std::iter::Flatten;
use std::slice;
use tracing::{debug, trace};

/// A hash table using separate chaining.
///
/// Every bucket is a list of entries kept in insertion order and searched linearly. When
/// `len / capacity` reaches the load factor before an insert, the number of buckets doubles and
/// every entry is rehashed into a fresh bucket array. Inserting a key that is already present is
/// ignored, so the first value written for a key is the one that is kept.
///
/// # Examples
///
/// ```
/// use keyed_collections::hash_table::ChainedHashTable;
/// use keyed_collections::Entry;
///
/// let mut table = ChainedHashTable::new(10, 1.5).unwrap();
/// table.insert(Entry::new("a", "X"));
/// table.insert(Entry::new("a", "Y"));
///
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get("a"), Some("X"));
///
/// assert!(table.delete("a"));
/// assert!(!table.search("a"));
/// ```
pub struct ChainedHashTable<S = DefaultHashBuilder> {
    buckets: Vec<Vec<Entry>>,
    load_factor: f64,
    len: usize,
    hash_builder: S,
}

impl ChainedHashTable {
    /// Constructs a new, empty `ChainedHashTable` with `capacity` buckets that resizes once
    /// `len / capacity` reaches `load_factor`.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero or `load_factor` is not a positive finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::hash_table::{ChainedHashTable, Error};
    ///
    /// assert!(ChainedHashTable::new(10, 1.5).is_ok());
    /// assert_eq!(ChainedHashTable::new(0, 1.5).err(), Some(Error::ZeroCapacity));
    /// ```
    pub fn new(capacity: usize, load_factor: f64) -> Result<Self> {
        Self::with_hasher(capacity, load_factor, DefaultHashBuilder::default())
    }

    /// Constructs a new, empty `ChainedHashTable` from a `TableConfig`.
    pub fn from_config(config: &TableConfig) -> Result<Self> {
        Self::new(config.capacity, config.load_factor)
    }
}

impl<S> ChainedHashTable<S>
where
    S: BuildHasher,
{
    /// Constructs a new, empty `ChainedHashTable` that hashes keys with `hash_builder`.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero or `load_factor` is not a positive finite number.
    pub fn with_hasher(capacity: usize, load_factor: f64, hash_builder: S) -> Result<Self> {
        let config = TableConfig {
            capacity,
            load_factor,
        };
        config.validate(f64::MAX)?;
        Ok(Self::build(config, hash_builder))
    }

    fn build(config: TableConfig, hash_builder: S) -> Self {
        ChainedHashTable {
            buckets: (0..config.capacity).map(|_| Vec::new()).collect(),
            load_factor: config.load_factor,
            len: 0,
            hash_builder,
        }
    }

    fn bucket_index(&self, key: &str) -> usize {
        util::slot_index(&self.hash_builder, key, self.buckets.len())
    }

    fn resize(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        debug!(
            from = self.buckets.len(),
            to = new_capacity,
            len = self.len,
            "resizing chained hash table"
        );

        let mut new_buckets: Vec<Vec<Entry>> = (0..new_capacity).map(|_| Vec::new()).collect();
        for entry in self.buckets.drain(..).flatten() {
            let index = util::slot_index(&self.hash_builder, entry.key(), new_capacity);
            new_buckets[index].push(entry);
        }
        self.buckets = new_buckets;
    }

    /// Inserts an entry into the table. If an entry with the same key already exists, the table
    /// is left untouched. Returns `true` if the entry was added.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::hash_table::ChainedHashTable;
    /// use keyed_collections::Entry;
    ///
    /// let mut table: ChainedHashTable = ChainedHashTable::default();
    /// assert!(table.insert(Entry::new("a", "X")));
    /// assert!(!table.insert(Entry::new("a", "Y")));
    /// assert_eq!(table.get("a"), Some("X"));
    /// ```
    pub fn insert(&mut self, entry: Entry) -> bool {
        if self.len as f64 / self.buckets.len() as f64 >= self.load_factor {
            self.resize();
        }

        let index = self.bucket_index(entry.key());
        let bucket = &mut self.buckets[index];
        if bucket.iter().any(|other| other.key() == entry.key()) {
            trace!(key = entry.key(), "ignoring duplicate chained hash table key");
            return false;
        }

        bucket.push(entry);
        self.len += 1;
        true
    }

    /// Returns the value associated with a key, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|entry| entry.key() == key)
            .map(|entry| entry.value())
    }

    /// Checks if a key exists in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::hash_table::ChainedHashTable;
    /// use keyed_collections::Entry;
    ///
    /// let mut table: ChainedHashTable = ChainedHashTable::default();
    /// table.insert(Entry::new("a", "X"));
    /// assert!(table.search("a"));
    /// assert!(!table.search("b"));
    /// ```
    pub fn search(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry with a particular key. Returns `true` if the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::hash_table::ChainedHashTable;
    /// use keyed_collections::Entry;
    ///
    /// let mut table: ChainedHashTable = ChainedHashTable::default();
    /// table.insert(Entry::new("a", "X"));
    /// assert!(table.delete("a"));
    /// assert!(!table.delete("a"));
    /// ```
    pub fn delete(&mut self, key: &str) -> bool {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        match bucket.iter().position(|entry| entry.key() == key) {
            Some(position) => {
                bucket.remove(position);
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

    /// Searches for every key of a sequence and returns how many were found. Entries can be
    /// passed directly since they expose their key through `AsRef<str>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_collections::hash_table::ChainedHashTable;
    /// use keyed_collections::Entry;
    ///
    /// let entries = vec![Entry::new("a", "X"), Entry::new("b", "Y")];
    /// let mut table: ChainedHashTable = ChainedHashTable::default();
    /// table.insert_all(entries.clone());
    ///
    /// assert_eq!(table.search_all(&entries), 2);
    /// assert_eq!(table.search_all(vec!["a", "c"]), 1);
    /// ```
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

impl<S> ChainedHashTable<S> {
    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the load factor that triggers a resize.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Clears the table, removing all entries. The capacity is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Returns an iterator over the table. The iterator yields entries bucket by bucket, and in
    /// insertion order within a bucket.
    pub fn iter(&self) -> ChainedHashTableIter<'_> {
        ChainedHashTableIter {
            inner: self.buckets.iter().flatten(),
        }
    }
}

impl<'a, S> IntoIterator for &'a ChainedHashTable<S> {
    type IntoIter = ChainedHashTableIter<'a>;
    type Item = &'a Entry;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `ChainedHashTable`.
///
/// This iterator traverses the entries of the table in bucket order.
pub struct ChainedHashTableIter<'a> {
    inner: Flatten<slice::Iter<'a, Vec<Entry>>>,
}

impl<'a> Iterator for ChainedHashTableIter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<S> Default for ChainedHashTable<S>
where
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::build(TableConfig::chained(), S::default())
    }
}

impl<S> fmt::Display for ChainedHashTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            write!(f, "{}.", index)?;
            for entry in bucket {
                write!(f, " {};", entry)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
