//! Binary Vector Encoder
//!
//! Writes tables in the layout read by [`super::decode`], with a newline
//! after each vector as conventional files have.

use bytes::{BufMut, BytesMut};
use std::io::Write;
use tracing::debug;

use crate::error::{Error, Result};
use crate::vector::VectorTable;

/// Write `entries` as a binary vector file of the given dimension.
///
/// Words must be non-empty and free of whitespace, since a space terminates
/// the word on read. Every entry is checked before anything is written, so
/// on error `writer` is left untouched.
pub fn encode<'a, W, I>(writer: &mut W, dimension: usize, entries: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a [f32])>,
{
    let entries: Vec<(&str, &[f32])> = entries.into_iter().collect();
    for &(word, vector) in &entries {
        check_entry(word, vector, dimension)?;
    }

    writer.write_all(format!("{} {}\n", entries.len(), dimension).as_bytes())?;

    let mut buf = BytesMut::with_capacity(dimension * 4 + 64);
    for (word, vector) in &entries {
        buf.clear();
        buf.put_slice(word.as_bytes());
        buf.put_u8(b' ');
        for &x in vector.iter() {
            buf.put_f32_le(x);
        }
        buf.put_u8(b'\n');
        writer.write_all(&buf)?;
    }

    debug!(words = entries.len(), dimension, "Encoded vector table");
    Ok(())
}

fn check_entry(word: &str, vector: &[f32], dimension: usize) -> Result<()> {
    if word.is_empty() || word.chars().any(char::is_whitespace) {
        return Err(Error::format(format!("word {:?} cannot be encoded", word)));
    }
    if vector.len() != dimension {
        return Err(Error::DimensionMismatch {
            expected: dimension,
            actual: vector.len(),
        });
    }
    Ok(())
}

/// Write a whole table
pub fn encode_table<W: Write>(writer: &mut W, table: &VectorTable) -> Result<()> {
    encode(writer, table.dimension(), table.iter())
}
