//! Vector File Format
//!
//! Decoder and encoder for the binary embedding layout: an ASCII header with
//! the word count and dimension, then each word followed by its
//! little-endian `f32` components.

mod decoder;
mod encoder;

pub use decoder::{decode, load, load_with, Decoder, DecoderConfig};
pub use encoder::{encode, encode_table};
