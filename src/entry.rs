use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable key-value pair stored in the hash tables.
///
/// Equality and hashing only consider the key, so two entries with the same key and different
/// values compare equal.
///
/// # Examples
///
/// ```
/// use keyed_collections::Entry;
///
/// let a = Entry::new("a", "X");
/// let b = Entry::new("a", "Y");
///
/// assert_eq!(a, b);
/// assert_eq!(a.key(), "a");
/// assert_eq!(a.value(), "X");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry {
    key: String,
    value: String,
}

impl Entry {
    /// Constructs a new `Entry` from a key and a value.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Entry {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the key of the entry.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value of the entry.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the entry and returns the key and value.
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Entry) -> bool {
        self.key == other.key
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl AsRef<str> for Entry {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.key, self.value)
    }
}
