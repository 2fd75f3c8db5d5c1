//! Hash tables keyed by strings: separate chaining and open addressing with linear probing.
//!
//! Both tables keep the first value written for a key; inserting an existing key again is
//! ignored. Before every insert the load factor is checked, and when it is reached the capacity
//! doubles and every live entry is placed again under the new capacity.

mod chained;
mod probing;

pub use self::chained::{ChainedHashTable, ChainedHashTableIter};
pub use self::probing::{ProbingHashTable, ProbingHashTableIter};
pub use crate::util::DefaultHashBuilder;

use serde_derive::{Deserialize, Serialize};
use std::error;
use std::fmt;
use std::result;

const DEFAULT_CAPACITY: usize = 10;
const DEFAULT_CHAINED_LOAD_FACTOR: f64 = 1.5;
const DEFAULT_PROBING_LOAD_FACTOR: f64 = 0.75;

#[derive(Debug, PartialEq)]
pub enum Error {
    ZeroCapacity,
    InvalidLoadFactor(f64),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "capacity must be at least one"),
            Error::InvalidLoadFactor(load_factor) => {
                write!(f, "load factor {} is out of range", load_factor)
            },
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Initial shape of a hash table: the starting number of buckets or slots and the load factor
/// that triggers a resize.
///
/// # Examples
///
/// ```
/// use keyed_collections::hash_table::{ChainedHashTable, TableConfig};
///
/// let config = TableConfig { capacity: 4, load_factor: 0.5 };
/// let table = ChainedHashTable::from_config(&config).unwrap();
/// assert_eq!(table.capacity(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub capacity: usize,
    pub load_factor: f64,
}

impl TableConfig {
    /// Default configuration of a `ChainedHashTable`: 10 buckets, load factor 1.5.
    pub fn chained() -> Self {
        TableConfig {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_CHAINED_LOAD_FACTOR,
        }
    }

    /// Default configuration of a `ProbingHashTable`: 10 slots, load factor 0.75.
    pub fn probing() -> Self {
        TableConfig {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_PROBING_LOAD_FACTOR,
        }
    }

    fn validate(&self, max_load_factor: f64) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if !(self.load_factor > 0.0 && self.load_factor <= max_load_factor) {
            return Err(Error::InvalidLoadFactor(self.load_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, TableConfig};
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_validate() {
        assert_eq!(TableConfig::chained().validate(f64::MAX), Ok(()));
        assert_eq!(TableConfig::probing().validate(1.0), Ok(()));
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config = TableConfig {
            capacity: 0,
            load_factor: 0.5,
        };
        assert_eq!(config.validate(1.0), Err(Error::ZeroCapacity));
    }

    #[test]
    fn test_validate_load_factor() {
        for load_factor in &[0.0, -1.0, 1.5, f64::INFINITY] {
            let config = TableConfig {
                capacity: 1,
                load_factor: *load_factor,
            };
            assert_eq!(config.validate(1.0), Err(Error::InvalidLoadFactor(*load_factor)));
        }
        let config = TableConfig {
            capacity: 1,
            load_factor: f64::NAN,
        };
        assert!(config.validate(f64::MAX).is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(Error::ZeroCapacity.to_string(), "capacity must be at least one");
        assert_eq!(Error::InvalidLoadFactor(2.0).to_string(), "load factor 2 is out of range");
    }

    #[test]
    fn test_serde_tokens() {
        assert_tokens(
            &TableConfig::probing(),
            &[
                Token::Struct {
                    name: "TableConfig",
                    len: 2,
                },
                Token::Str("capacity"),
                Token::U64(10),
                Token::Str("load_factor"),
                Token::F64(0.75),
                Token::StructEnd,
            ],
        );
    }
}
