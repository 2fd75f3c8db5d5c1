use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

/// Hasher builder used by the hash tables unless another one is supplied. Builds
/// `DefaultHasher`s with fixed keys, so a key always hashes to the same value.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

pub fn gen_hash<S, T>(hash_builder: &S, value: &T) -> u64
where
    S: BuildHasher,
    T: Hash + ?Sized,
{
    let mut hasher = hash_builder.build_hasher();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Folds the hash of `key` into `[0, capacity)`.
pub fn slot_index<S>(hash_builder: &S, key: &str, capacity: usize) -> usize
where
    S: BuildHasher,
{
    (gen_hash(hash_builder, key) % capacity as u64) as usize
}
