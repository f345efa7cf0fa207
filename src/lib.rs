//! # Prime Hash
//!
//! A string-to-string hash table using open addressing with double hashing.
//!
//! The bucket array always has a prime length, chosen as the next prime at or above a
//! nominal base size. Collisions are resolved by probing `h_a(key) + i * step(key)` modulo
//! the table size, where both hashes are polynomial string hashes with distinct prime bases.
//! Deleted entries leave tombstones so probe sequences of other keys stay intact.
//!
//! The table grows (doubling the base size) before an insert would push the load above 70%
//! and shrinks (halving the base size, never below the initial 50) when a delete finds the
//! load below 10%. Both rebuild the array and discard tombstones.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primehash::HashTable;
//!
//! let mut table = HashTable::new()?;
//!
//! // Insert values
//! table.insert("apple", "red")?;
//! table.insert("banana", "yellow")?;
//!
//! // Retrieve values
//! assert_eq!(table.search("apple"), Some("red"));
//!
//! // Update values
//! assert_eq!(table.insert("apple", "green")?, Some("red".to_string()));
//! assert_eq!(table.search("apple"), Some("green"));
//!
//! // Remove values
//! table.delete("apple")?;
//! assert_eq!(table.search("apple"), None);
//! # Ok::<(), primehash::HashTableError>(())
//! ```
//!
//! ## Primes
//!
//! ```rust
//! use primehash::{Primality, is_prime, next_prime};
//!
//! assert_eq!(is_prime(53), Primality::Prime);
//! assert_eq!(is_prime(1), Primality::Undefined);
//! assert_eq!(next_prime(50), Some(53));
//! ```

/// Sizing and load factor configuration
mod config;
/// Error types
mod error;
/// Module implementing the double hashing table
mod hash_table;
/// Primality test and prime search
mod prime;
/// Utility functions and traits for the hash table
mod utils;

pub use config::{GROW_THRESHOLD, INITIAL_BASE_SIZE, SHRINK_THRESHOLD, TableConfig};
pub use error::{HashTableError, Result};
pub use hash_table::{HashTable, Iter};
pub use prime::{Primality, is_prime, next_prime};
pub use utils::{HashTableExtensions, try_from_iter};
