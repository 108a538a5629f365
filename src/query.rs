//! Word Queries
//!
//! Resolve words to vectors and run them through [`crate::vector::search`].

use crate::error::{Error, Result};
use crate::vector::{add, search, sub, SkipSet, VectorTable, WordDistance};

/// Nearest neighbours of `word`, excluding `word` itself.
pub fn distance(table: &VectorTable, word: &str, limit: usize) -> Result<Vec<WordDistance>> {
    let vector = lookup(table, word)?;
    let skip: SkipSet = [word].into_iter().collect();
    Ok(search(table, vector, &skip, limit))
}

/// Nearest neighbours of `word2 - word1 + word3`, excluding all three words.
///
/// "man is to king as woman is to ?" is `analogy(table, "man", "king", "woman", k)`.
/// The combined vector is not re-normalized, so scores are cosine similarities
/// scaled by its magnitude: comparable within one call, not across calls.
pub fn analogy(
    table: &VectorTable,
    word1: &str,
    word2: &str,
    word3: &str,
    limit: usize,
) -> Result<Vec<WordDistance>> {
    let v1 = lookup(table, word1)?;
    let v2 = lookup(table, word2)?;
    let v3 = lookup(table, word3)?;

    let query = add(&sub(v2, v1), v3);
    let skip: SkipSet = [word1, word2, word3].into_iter().collect();
    Ok(search(table, &query, &skip, limit))
}

fn lookup<'t>(table: &'t VectorTable, word: &str) -> Result<&'t [f32]> {
    table.get(word).ok_or_else(|| Error::unknown_word(word))
}
