//! Utility functions and traits for `HashTable`

use crate::{HashTable, Result};

/// Extension trait providing collection-style helpers on top of the core operations
pub trait HashTableExtensions {
    /// Returns the keys of the table as a Vec, in no particular order
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the table as a Vec, in no particular order
    fn values(&self) -> Vec<String>;

    /// Returns true if the table contains the given key
    fn contains_key(&self, key: &str) -> bool;
}

impl HashTableExtensions for HashTable {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }

    fn values(&self) -> Vec<String> {
        self.iter().map(|(_, v)| v.to_string()).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.search(key).is_some()
    }
}

/// Creates a `HashTable` from an iterator of key-value pairs; later pairs win on duplicate keys.
///
/// # Errors
///
/// Returns the first error raised while creating or growing the table.
pub fn try_from_iter<K, V, I>(iter: I) -> Result<HashTable>
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = HashTable::new()?;

    for (key, value) in iter {
        table.insert(key, value)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_iter() {
        let data = vec![("a", "1"), ("b", "2"), ("c", "3"), ("a", "10")];

        let table = try_from_iter(data).unwrap();

        assert_eq!(table.search("a"), Some("10"));
        assert_eq!(table.search("b"), Some("2"));
        assert_eq!(table.search("c"), Some("3"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_keys_and_values() {
        let mut table = HashTable::new().unwrap();
        table.insert("a", "1").unwrap();
        table.insert("b", "2").unwrap();
        table.insert("c", "3").unwrap();

        let mut keys = table.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = table.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec!["1".to_string(), "2".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_contains_key() {
        let mut table = HashTable::new().unwrap();
        table.insert("a", "1").unwrap();

        assert!(table.contains_key("a"));
        assert!(!table.contains_key("b"));

        table.delete("a").unwrap();
        assert!(!table.contains_key("a"));
    }
}
