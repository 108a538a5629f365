//! wordvec - Word Embedding Similarity Queries
//!
//! Loads a binary table of word vectors, normalizes each vector once, and
//! answers exact nearest-neighbour ("distance") and analogy
//! (`word2 - word1 + word3`) queries with a bounded top-k scan.

pub mod error;
pub mod format;
pub mod metrics;
pub mod query;
pub mod server;
pub mod vector;

pub use error::{Error, Result};
pub use format::{decode, encode, encode_table, load, Decoder, DecoderConfig};
pub use metrics::Metrics;
pub use query::{analogy, distance};
pub use server::{Config, Server};
pub use vector::{search, SkipSet, VectorTable, WordDistance};
