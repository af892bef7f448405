//! Compression and decompression of text.
//!
//! A [`Compression`] is self-contained: the encoded tree, the packed bytes,
//! and the count of meaningful bits are everything needed to recover the
//! text.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bits::{BitWriter, Bits};
use crate::error::{Error, Result};
use crate::tree::{self, EncodedTree, Node, Tree};

/// A Huffman-compressed body of text.
///
/// Serializes as `{"tree": [...], "data": [...], "data_len": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compression {
    tree: EncodedTree,
    data: Vec<u8>,
    data_len: usize,
}

impl Compression {
    /// Compress `text`.
    ///
    /// When `text` holds a single distinct symbol its code is empty; one `0`
    /// bit is written per occurrence instead, so `data_len` records the
    /// repetition count.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `text` is empty, or `Error::Io` if the
    /// bit writer fails.
    pub fn compress(text: &str) -> Result<Self> {
        let freqs = tree::frequencies(text);
        let tree = Tree::from_frequencies(freqs.iter().map(|(&symbol, &count)| (symbol, count)))?;
        let codes = tree.codes();

        let mut writer = BitWriter::with_capacity(codes.encoded_len(&freqs));
        for symbol in text.chars() {
            let code = &codes[symbol];
            if code.is_empty() {
                writer.push_bit(0)?;
            } else {
                writer.push_code(code)?;
            }
        }
        let (data, data_len) = writer.finish()?;

        debug!(
            symbols = freqs.values().sum::<usize>(),
            distinct = codes.len(),
            data_len,
            bytes = data.len(),
            "compressed"
        );

        Ok(Self {
            tree: tree.encode(),
            data,
            data_len,
        })
    }

    /// Recover the text this compression was built from.
    ///
    /// # Errors
    /// Returns `Error::MalformedTree` if the encoded tree is invalid,
    /// `Error::TruncatedStream` if the meaningful bits end in the middle of a
    /// code or exceed the packed bytes, and `Error::UnexpectedBit` if a bit
    /// leads off the tree.
    pub fn decompress(&self) -> Result<String> {
        let tree = Tree::decode(&self.tree)?;

        let available = self.data.len().saturating_mul(8);
        if self.data_len > available {
            return Err(Error::TruncatedStream { bits: available });
        }

        let root = tree.root();
        let mut out = String::with_capacity(self.data_len / 2);

        if let Node::Leaf { symbol, .. } = root {
            for (offset, bit) in self.bits().enumerate() {
                if bit != 0 {
                    return Err(Error::UnexpectedBit { offset });
                }
                out.push(*symbol);
            }
        } else {
            let mut location = root;
            for (offset, bit) in self.bits().enumerate() {
                location = location
                    .child(bit)
                    .ok_or(Error::UnexpectedBit { offset })?;

                if let Some(symbol) = location.symbol() {
                    out.push(symbol);
                    location = root;
                }
            }

            if !std::ptr::eq(location, root) {
                return Err(Error::TruncatedStream {
                    bits: self.data_len,
                });
            }
        }

        debug!(
            data_len = self.data_len,
            distinct = tree.leaf_count(),
            bytes = out.len(),
            "decompressed"
        );

        Ok(out)
    }

    /// Assemble a compression from its wire fields.
    pub fn from_parts(tree: EncodedTree, data: Vec<u8>, data_len: usize) -> Self {
        Self {
            tree,
            data,
            data_len,
        }
    }

    /// Split into `(tree, data, data_len)`.
    pub fn into_parts(self) -> (EncodedTree, Vec<u8>, usize) {
        (self.tree, self.data, self.data_len)
    }

    /// The encoded tree.
    pub fn tree(&self) -> &EncodedTree {
        &self.tree
    }

    /// The packed bytes, including any padding in the last byte.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of meaningful bits in [`Compression::data`].
    pub fn data_len(&self) -> usize {
        self.data_len
    }

    /// The meaningful bits, most-significant bit first within each byte.
    pub fn bits(&self) -> Bits<'_> {
        Bits::new(&self.data, self.data_len)
    }

    /// Source bits per meaningful compressed bit, for a source of
    /// `source_bytes` bytes. `None` when there are no meaningful bits.
    pub fn ratio(&self, source_bytes: usize) -> Option<f64> {
        (self.data_len > 0).then(|| source_bytes as f64 * 8.0 / self.data_len as f64)
    }

    /// Serialize to JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON text.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Write the JSON form to `writer` and flush it.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read the JSON form from `reader`.
    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
