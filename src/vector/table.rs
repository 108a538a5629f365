//! Vector Table
//!
//! Immutable word -> embedding mapping built once at load time.

use hashbrown::HashMap;

use crate::error::{Error, Result};

/// A word embedding table.
///
/// Every vector has the same length ([`VectorTable::dimension`]). Once built the
/// table is never mutated, so it can be shared across threads behind an `Arc`
/// and queried concurrently without locking.
#[derive(Debug, Clone, Default)]
pub struct VectorTable {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl VectorTable {
    /// Start building a table of the given dimension
    pub fn builder(dimension: usize) -> VectorTableBuilder {
        VectorTableBuilder::new(dimension)
    }

    /// Get embedding dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get number of stored words
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Get the vector for a word
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    /// Check if word exists
    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// Iterate over all words, in no particular order
    pub fn words(&self) -> impl ExactSizeIterator<Item = &str> {
        self.vectors.keys().map(String::as_str)
    }

    /// Iterate over all (word, vector) entries, in no particular order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &[f32])> {
        self.vectors
            .iter()
            .map(|(word, vector)| (word.as_str(), vector.as_slice()))
    }
}

/// Accumulates entries for a [`VectorTable`]
#[derive(Debug)]
pub struct VectorTableBuilder {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl VectorTableBuilder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: HashMap::new(),
        }
    }

    /// Reserve room for `additional` more words
    pub fn with_capacity(mut self, additional: usize) -> Self {
        self.vectors.reserve(additional);
        self
    }

    /// Insert a vector, replacing any earlier vector for the same word.
    ///
    /// Returns `true` if an earlier entry was replaced.
    pub fn insert(&mut self, word: impl Into<String>, vector: Vec<f32>) -> Result<bool> {
        if vector.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        Ok(self.vectors.insert(word.into(), vector).is_some())
    }

    pub fn build(self) -> VectorTable {
        VectorTable {
            dimension: self.dimension,
            vectors: self.vectors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_lookup() {
        let mut builder = VectorTable::builder(2);
        builder.insert("cat", vec![0.6, 0.8]).unwrap();
        builder.insert("dog", vec![0.8, 0.6]).unwrap();
        let table = builder.build();

        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), 2);
        assert!(table.contains("cat"));
        assert_eq!(table.get("dog"), Some(&[0.8, 0.6][..]));
        assert_eq!(table.get("bird"), None);

        let mut words: Vec<&str> = table.words().collect();
        words.sort_unstable();
        assert_eq!(words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let mut builder = VectorTable::builder(1);
        assert!(!builder.insert("a", vec![1.0]).unwrap());
        assert!(builder.insert("a", vec![-1.0]).unwrap());
        let table = builder.build();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a"), Some(&[-1.0][..]));
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut builder = VectorTable::builder(3);
        let result = builder.insert("a", vec![1.0, 0.0]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_empty_table() {
        let table = VectorTable::default();
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }
}
