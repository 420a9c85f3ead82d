//! Hash helpers shared by the kernel and backends
//!
//! Kernel hashes are 32-bit. Scalars hash their canonical byte form with
//! xxh3; containers combine element hashes.

use xxhash_rust::xxh3::xxh3_64;

/// Fold a 64-bit hash into the 32-bit kernel width
#[inline]
pub const fn fold(h: u64) -> u32 {
    (h ^ (h >> 32)) as u32
}

/// Hash a byte slice
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    fold(xxh3_64(data))
}

/// Combine hashes where position matters (lists, pairs)
pub fn combine_ordered<I>(hashes: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    hashes
        .into_iter()
        .fold(1u32, |acc, h| acc.wrapping_mul(31).wrapping_add(h))
}

/// Combine hashes where position does not matter (maps)
pub fn combine_unordered<I>(hashes: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    hashes.into_iter().fold(0u32, |acc, h| acc.wrapping_add(h))
}
