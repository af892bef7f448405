//! Error types for Huffman compression.

use thiserror::Error;

/// Error variants for compression and decompression.
#[derive(Debug, Error)]
pub enum Error {
    /// Compression was asked to encode zero symbols; no tree can be formed.
    #[error("cannot compress empty input")]
    EmptyInput,

    /// The encoded tree is empty, truncated, or structurally invalid.
    #[error("malformed tree at entry {position}: {reason}")]
    MalformedTree {
        /// Index of the offending entry in the encoded tree.
        position: usize,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The meaningful bits ran out before the walk reached a leaf.
    #[error("bit stream truncated after {bits} bits")]
    TruncatedStream {
        /// Number of bits available when the stream ended.
        bits: usize,
    },

    /// A bit steered the decoder off the tree.
    #[error("unexpected bit at offset {offset}")]
    UnexpectedBit {
        /// Offset of the bit within the stream.
        offset: usize,
    },

    /// The wire form could not be serialized or parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred while reading or writing the wire form.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
