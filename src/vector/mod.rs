//! Vector Module
//!
//! Embedding table, vector arithmetic and exact top-k search.

mod search;
mod similarity;
mod table;

pub use search::{search, SkipSet, WordDistance};
pub use similarity::{add, dot_product, magnitude, normalize, sub, VectorOps};
pub use table::{VectorTable, VectorTableBuilder};
