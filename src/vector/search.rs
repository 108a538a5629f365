//! Exact Top-K Search
//!
//! Linear scan over a [`VectorTable`] that keeps a bounded, sorted result
//! buffer instead of sorting every candidate.

use hashbrown::HashSet;

use super::similarity::dot_product;
use super::table::VectorTable;

/// A word and its similarity to the query vector
#[derive(Debug, Clone, PartialEq)]
pub struct WordDistance {
    pub word: String,
    pub score: f32,
}

impl WordDistance {
    pub fn new(word: impl Into<String>, score: f32) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Words excluded from a search's candidate pool
#[derive(Debug, Clone, Default)]
pub struct SkipSet<'a> {
    words: HashSet<&'a str>,
}

impl<'a> SkipSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &'a str) {
        self.words.insert(word);
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl<'a> FromIterator<&'a str> for SkipSet<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

/// Find the `k` entries most similar to `query`, skipping words in `skip`.
///
/// The result is sorted by descending score. A candidate is inserted before
/// any existing entries with an equal score, so among ties the entry scanned
/// last ranks first. Scores are raw dot products; they are cosine
/// similarities only when `query` is unit length.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn search(
    table: &VectorTable,
    query: &[f32],
    skip: &SkipSet<'_>,
    k: usize,
) -> Vec<WordDistance> {
    let mut results: Vec<WordDistance> = Vec::with_capacity(k.min(table.len()));
    if k == 0 {
        return results;
    }

    for (word, vector) in table.iter() {
        if skip.contains(word) {
            continue;
        }

        let score = dot_product(query, vector);

        // First slot whose score is <= the new score. NaN compares false
        // against everything, so a NaN score goes after the current entries.
        let pos = results.partition_point(|entry| !(entry.score <= score));
        if pos >= k {
            continue;
        }

        if results.len() == k {
            results.pop();
        }
        results.insert(pos, WordDistance::new(word, score));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: Vec<(&str, Vec<f32>)>) -> VectorTable {
        let dim = entries.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut builder = VectorTable::builder(dim);
        for (word, vector) in entries {
            builder.insert(word, vector).unwrap();
        }
        builder.build()
    }

    fn animals() -> VectorTable {
        table(vec![
            ("cat", vec![0.6, 0.8]),
            ("dog", vec![0.8, 0.6]),
            ("fish", vec![1.0, 0.0]),
        ])
    }

    fn assert_sorted(results: &[WordDistance]) {
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score, "{:?}", results);
        }
    }

    #[test]
    fn test_search_ranks_by_score() {
        let table = animals();
        let skip: SkipSet = ["cat"].into_iter().collect();

        let results = search(&table, &[0.6, 0.8], &skip, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word, "dog");
        assert!((results[0].score - 0.96).abs() < 1e-6);
        assert_eq!(results[1].word, "fish");
        assert!((results[1].score - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_search_zero_limit() {
        let table = animals();
        let results = search(&table, &[1.0, 0.0], &SkipSet::new(), 0);
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_limit_above_eligible() {
        let table = animals();
        let skip: SkipSet = ["fish"].into_iter().collect();
        let results = search(&table, &[1.0, 0.0], &skip, 10);
        assert_eq!(results.len(), 2);
        assert_sorted(&results);
    }

    #[test]
    fn test_search_empty_and_fully_skipped() {
        let empty = VectorTable::default();
        assert!(search(&empty, &[], &SkipSet::new(), 5).is_empty());

        let table = animals();
        let skip: SkipSet = ["cat", "dog", "fish"].into_iter().collect();
        assert!(search(&table, &[1.0, 0.0], &skip, 5).is_empty());
    }

    #[test]
    fn test_search_keeps_top_k_of_many() {
        let mut builder = VectorTable::builder(2);
        for i in 0..100 {
            let angle = i as f32 * 0.01;
            builder
                .insert(format!("w{i}"), vec![angle.cos(), angle.sin()])
                .unwrap();
        }
        let table = builder.build();

        let results = search(&table, &[1.0, 0.0], &SkipSet::new(), 5);
        let words: Vec<&str> = results.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["w0", "w1", "w2", "w3", "w4"]);
        assert_sorted(&results);
    }

    #[test]
    fn test_search_ties_keep_all_equal_scores() {
        let table = table(vec![("a", vec![1.0]), ("b", vec![1.0]), ("c", vec![1.0])]);
        let results = search(&table, &[1.0], &SkipSet::new(), 2);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.score == 1.0));
    }

    #[test]
    fn test_search_tie_inserts_before_equal() {
        // Iteration order is unspecified, so replay the insertion rule on the
        // order the table actually yields: the last equal entry ranks first.
        let table = table(vec![("a", vec![1.0]), ("b", vec![1.0]), ("c", vec![1.0])]);
        let scanned: Vec<&str> = table.words().collect();

        let results = search(&table, &[1.0], &SkipSet::new(), 3);
        let ranked: Vec<&str> = results.iter().map(|r| r.word.as_str()).collect();
        let expected: Vec<&str> = scanned.into_iter().rev().collect();
        assert_eq!(ranked, expected);
    }

    #[test]
    fn test_search_nan_scores_do_not_panic() {
        let table = table(vec![("ok", vec![1.0]), ("bad", vec![f32::NAN])]);
        let results = search(&table, &[1.0], &SkipSet::new(), 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().filter(|r| r.score.is_nan()).count(), 1);
        assert!(results.iter().any(|r| r.word == "ok"));
    }

    #[test]
    fn test_skip_set() {
        let mut skip = SkipSet::new();
        assert!(!skip.contains("a"));
        skip.insert("a");
        skip.insert("a");
        assert!(skip.contains("a"));
        assert!(!skip.contains("b"));
    }
}
