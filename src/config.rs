//! Sizing and load factor configuration for `HashTable`

/// Default nominal capacity of a fresh table, and the floor shrinking never goes below
pub const INITIAL_BASE_SIZE: usize = 50;
/// Default load percentage above which an insert grows the table
pub const GROW_THRESHOLD: usize = 70;
/// Default load percentage below which a delete shrinks the table
pub const SHRINK_THRESHOLD: usize = 10;

/// Smallest accepted base size, the first prime
const MIN_BASE_SIZE: usize = 2;
/// Upper clamp for the grow threshold so probe sequences always meet a free slot
const MAX_GROW_THRESHOLD: usize = 95;

/// Tunable sizing parameters of a `HashTable`.
///
/// Thresholds are integer percentages compared against `count * 100 / size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Base size used on creation and as the shrink floor
    initial_base_size: usize,
    /// Grow when the load after an insert would exceed this percentage
    grow_threshold: usize,
    /// Shrink when the load before a delete is below this percentage
    shrink_threshold: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_base_size: INITIAL_BASE_SIZE,
            grow_threshold: GROW_THRESHOLD,
            shrink_threshold: SHRINK_THRESHOLD,
        }
    }
}

impl TableConfig {
    /// Creates the default configuration (base size 50, grow above 70%, shrink below 10%)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial base size, which is also the floor for shrinking
    #[must_use]
    pub fn with_initial_base_size(mut self, base_size: usize) -> Self {
        self.initial_base_size = base_size.max(MIN_BASE_SIZE);
        self
    }

    /// Sets the grow threshold percentage, kept within `1..=95`
    #[must_use]
    pub fn with_grow_threshold(mut self, threshold: usize) -> Self {
        self.grow_threshold = threshold.clamp(1, MAX_GROW_THRESHOLD);
        self.shrink_threshold = self.shrink_threshold.min(self.max_shrink_threshold());
        self
    }

    /// Sets the shrink threshold percentage, kept below half of the grow threshold
    #[must_use]
    pub fn with_shrink_threshold(mut self, threshold: usize) -> Self {
        self.shrink_threshold = threshold.min(self.max_shrink_threshold());
        self
    }

    /// Largest shrink threshold that cannot bounce straight back into a grow
    fn max_shrink_threshold(&self) -> usize {
        (self.grow_threshold / 2).saturating_sub(1)
    }

    /// Returns the initial base size
    #[must_use]
    pub fn initial_base_size(&self) -> usize {
        self.initial_base_size
    }

    /// Returns the grow threshold percentage
    #[must_use]
    pub fn grow_threshold(&self) -> usize {
        self.grow_threshold
    }

    /// Returns the shrink threshold percentage
    #[must_use]
    pub fn shrink_threshold(&self) -> usize {
        self.shrink_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::new();
        assert_eq!(config.initial_base_size(), 50);
        assert_eq!(config.grow_threshold(), 70);
        assert_eq!(config.shrink_threshold(), 10);
    }

    #[test]
    fn test_clamping() {
        let config = TableConfig::new()
            .with_initial_base_size(0)
            .with_grow_threshold(150)
            .with_shrink_threshold(90);
        assert_eq!(config.initial_base_size(), 2);
        assert_eq!(config.grow_threshold(), 95);
        assert_eq!(config.shrink_threshold(), 46);
    }

    #[test]
    fn test_lowering_grow_threshold_pulls_shrink_down() {
        let config = TableConfig::new().with_grow_threshold(12);
        assert_eq!(config.grow_threshold(), 12);
        assert_eq!(config.shrink_threshold(), 5);
    }
}
