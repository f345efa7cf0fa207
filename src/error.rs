//! Error types returned by the hash table

use std::collections::TryReserveError;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T, E = HashTableError> = std::result::Result<T, E>;

/// Failures surfaced by `HashTable` operations.
///
/// A missing key is not an error: lookups and deletions report it with `None`.
#[derive(Debug, Error)]
pub enum HashTableError {
    /// The bucket array could not be allocated.
    #[error("failed to allocate a bucket array of {slots} slots")]
    AllocationFailure {
        /// Number of slots requested
        slots: usize,
        /// Allocator error
        #[source]
        source: TryReserveError,
    },

    /// The requested base size has no representable prime bucket count.
    #[error("no prime bucket count at or above {requested} fits in usize")]
    CapacityOverflow {
        /// Base size that could not be satisfied
        requested: usize,
    },

    /// Every slot on the probe sequence was occupied by another key.
    #[error("probe sequence exhausted all {size} slots")]
    TableFull {
        /// Bucket array length at the time of the insert
        size: usize,
    },
}
