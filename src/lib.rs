//! In-memory keyed containers.
//!
//! - [`avl_tree::AvlTree`]: height-balanced binary search tree over `i32` keys.
//! - [`splay_tree::SplayTree`]: self-adjusting binary search tree over `i32` keys.
//! - [`hash_table::ChainedHashTable`]: separate chaining hash table over [`Entry`] pairs.
//! - [`hash_table::ProbingHashTable`]: linear probing hash table over [`Entry`] pairs.
//!
//! Every container supports single and batch `insert`, `search` and `delete`. Absent keys are
//! reported through `bool` results and duplicate inserts are ignored.

mod arena;
mod entry;
mod util;

pub mod avl_tree;
pub mod hash_table;
pub mod splay_tree;

pub use self::entry::Entry;
