//! Packing: zlib-compress a cart and spell the compressed bytes with the
//! literal alphabet, producing a token that can sit inside a source string.

pub mod base_n;

pub use base_n::BaseN;

use cp_core::Result;
use flate2::read::{ZlibDecoder, ZlibEncoder};
use flate2::Compression;
use std::io::Read;

/// zlib stream at maximum compression.
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(data, Compression::best());
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed)?;
    Ok(compressed)
}

pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackResult {
    /// Alphabet-only encoding of the compressed data.
    pub token: Vec<u8>,
    pub original_len: usize,
    pub compressed_len: usize,
}

impl PackResult {
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            return 1.0;
        }
        self.token.len() as f64 / self.original_len as f64
    }
}

pub fn pack(data: &[u8], alphabet: &[u8]) -> Result<PackResult> {
    let codec = BaseN::new(alphabet)?;
    let compressed = deflate(data)?;
    let token = codec.encode(&compressed);
    tracing::debug!(
        original = data.len(),
        compressed = compressed.len(),
        token = token.len(),
        base = codec.base(),
        "packed"
    );
    Ok(PackResult {
        token,
        original_len: data.len(),
        compressed_len: compressed.len(),
    })
}

pub fn unpack(token: &[u8], alphabet: &[u8]) -> Result<Vec<u8>> {
    let codec = BaseN::new(alphabet)?;
    inflate(&codec.decode(token)?)
}

#[cfg(test)]
mod tests;
