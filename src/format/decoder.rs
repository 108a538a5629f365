//! Binary Vector Decoder
//!
//! Reads the word2vec-style binary layout:
//!
//! ```text
//! <nWords:ascii-decimal> <vSize:ascii-decimal>
//! repeated nWords times:
//!   <word-bytes><single ascii space>
//!   <vSize x float32, little-endian, contiguous>
//! ```

use bytes::Buf;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::vector::{normalize, VectorTable};

/// Upper bound on the up-front table allocation; the header is untrusted.
const MAX_PREALLOCATED_WORDS: usize = 1 << 20;

/// Upper bound on the up-front payload buffer; grows only as data arrives.
const MAX_PREALLOCATED_BYTES: usize = 1 << 16;

/// Size of a single encoded component
const FLOAT_SIZE: usize = 4;

/// Decoder configuration
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// Fail with [`Error::DegenerateVector`] instead of storing NaN components
    /// when a vector has zero norm.
    pub reject_degenerate: bool,
}

impl DecoderConfig {
    /// Set whether zero-norm vectors are rejected
    pub fn with_reject_degenerate(mut self, reject: bool) -> Self {
        self.reject_degenerate = reject;
        self
    }
}

/// Decodes a binary vector stream into a [`VectorTable`]
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Decode an entire stream.
    ///
    /// Every vector is normalized to unit length before it is stored. Later
    /// occurrences of a word replace earlier ones.
    pub fn decode<R: BufRead>(&self, mut reader: R) -> Result<VectorTable> {
        let n_words = to_usize(read_header_int(&mut reader, "word count")?, "word count")?;
        let dimension = to_usize(read_header_int(&mut reader, "vector size")?, "vector size")?;
        skip_header_terminator(&mut reader)?;
        debug!(words = n_words, dimension, "Decoding vector table");

        let byte_len = dimension
            .checked_mul(FLOAT_SIZE)
            .ok_or_else(|| Error::format(format!("vector size {} is too large", dimension)))?;

        let mut builder =
            VectorTable::builder(dimension).with_capacity(n_words.min(MAX_PREALLOCATED_WORDS));
        let mut word_buf = Vec::new();
        let mut raw = Vec::with_capacity(byte_len.min(MAX_PREALLOCATED_BYTES));

        for index in 0..n_words {
            let word = read_word(&mut reader, &mut word_buf, index)?;

            raw.clear();
            (&mut reader).take(byte_len as u64).read_to_end(&mut raw)?;
            if raw.len() != byte_len {
                return Err(Error::format(format!(
                    "unexpected end of file in vector {} of {} ({:?})",
                    index + 1,
                    n_words,
                    word
                )));
            }

            let mut payload = &raw[..];
            let mut vector: Vec<f32> = (0..dimension).map(|_| payload.get_f32_le()).collect();

            let norm = normalize(&mut vector);
            if norm == 0.0 || !norm.is_finite() {
                if self.config.reject_degenerate {
                    return Err(Error::DegenerateVector(word));
                }
                warn!(word = %word, norm, "Vector has degenerate norm");
            }

            if builder.insert(word.as_str(), vector)? {
                warn!(word = %word, "Duplicate word, keeping last occurrence");
            }
        }

        let table = builder.build();
        debug!(words = table.len(), dimension, "Decoded vector table");
        Ok(table)
    }
}

/// Decode a stream with the default configuration
pub fn decode<R: BufRead>(reader: R) -> Result<VectorTable> {
    Decoder::default().decode(reader)
}

/// Open and decode a vector file
pub fn load(path: impl AsRef<Path>) -> Result<VectorTable> {
    load_with(path, DecoderConfig::default())
}

/// Open and decode a vector file with a custom configuration
pub fn load_with(path: impl AsRef<Path>, config: DecoderConfig) -> Result<VectorTable> {
    let path = path.as_ref();
    let start = Instant::now();

    let file = File::open(path)?;
    let table = Decoder::new(config).decode(BufReader::with_capacity(1 << 16, file))?;

    info!(
        path = %path.display(),
        words = table.len(),
        dimension = table.dimension(),
        elapsed = ?start.elapsed(),
        "Loaded vector table"
    );
    Ok(table)
}

/// Skip leading whitespace, then read an unsigned decimal integer.
fn read_header_int<R: BufRead>(reader: &mut R, name: &str) -> Result<u64> {
    skip_whitespace(reader)?;

    let mut digits = String::new();
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        let n = buf.iter().take_while(|b| b.is_ascii_digit()).count();
        digits.extend(buf[..n].iter().map(|&b| b as char));
        let stopped = n < buf.len();
        reader.consume(n);
        if stopped {
            break;
        }
    }

    if digits.is_empty() {
        return Err(Error::format(format!("missing {} in header", name)));
    }
    digits
        .parse::<u64>()
        .map_err(|e| Error::format(format!("invalid {} {:?}: {}", name, digits, e)))
}

fn skip_whitespace<R: BufRead>(reader: &mut R) -> Result<()> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(());
        }
        let n = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
        let stopped = n < buf.len();
        reader.consume(n);
        if stopped {
            return Ok(());
        }
    }
}

/// Consume the single whitespace byte that ends the header, if present.
fn skip_header_terminator<R: BufRead>(reader: &mut R) -> Result<()> {
    let buf = reader.fill_buf()?;
    if buf.first().is_some_and(u8::is_ascii_whitespace) {
        reader.consume(1);
    }
    Ok(())
}

/// Read bytes up to the next space; the word is that span with surrounding
/// whitespace trimmed.
fn read_word<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, index: usize) -> Result<String> {
    buf.clear();
    reader.read_until(b' ', buf)?;
    if buf.pop() != Some(b' ') {
        return Err(Error::format(format!(
            "unexpected end of file in word {}",
            index + 1
        )));
    }
    Ok(String::from_utf8_lossy(buf).trim().to_string())
}

fn to_usize(value: u64, name: &str) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::format(format!("{} {} is too large", name, value)))
}
