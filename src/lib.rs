//! # Static Huffman Coding
//!
//! *Optimal prefix codes from symbol counts.*
//!
//! ## Intuition First
//!
//! Morse code gives the most common letters the shortest signals. Huffman coding
//! does the same thing, but derives the signal lengths from the text itself and
//! guarantees that no signal is the start of another, so a stream of bits can be
//! split back into symbols without separators.
//!
//! The codes come from a binary tree. Each symbol is a leaf; its code is the
//! path from the root, `0` for a left turn and `1` for a right turn. Rare
//! symbols sit deep in the tree, common ones near the root.
//!
//! ## The Problem
//!
//! Fixed-width encodings spend the same number of bits on `e` as on `q`.
//! Given the symbol frequencies, we want the prefix code with the smallest
//! total encoded length.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Fano        Shannon-Fano coding: top-down, not always optimal
//! 1952  Huffman     Bottom-up greedy merge: provably optimal prefix codes
//! 1989  Deflate     Huffman over LZ77 tokens (zip, gzip, png)
//! ```
//!
//! ## Algorithm
//!
//! Start with one leaf per distinct symbol, weighted by its count. Repeatedly
//! take the two lightest nodes from a priority queue and merge them under a
//! new node whose weight is their sum. The last node standing is the root.
//! Ties are broken by queue arrival, so the same input always yields the same
//! tree.
//!
//! ## Complexity Analysis
//!
//! - **Tree construction**: $O(k \log k)$ for $k$ distinct symbols.
//! - **Encode / decode**: $O(n \cdot \bar{\ell})$ for $n$ symbols with average
//!   code length $\bar{\ell}$.
//!
//! ## Failure Modes
//!
//! 1. **Single symbol**: the tree is a lone leaf and its natural code is empty.
//!    The encoder spends one `0` bit per occurrence so the bit count records
//!    how many times to repeat it.
//! 2. **Static model**: the whole input is counted up front; streaming and
//!    adaptive coding are out of scope.
//!
//! ## Errors
//!
//! - [`Error::EmptyInput`]: there is nothing to compress.
//! - [`Error::MalformedTree`]: the encoded tree is empty, truncated, or holds
//!   a marker that does not fit where it sits.
//! - [`Error::TruncatedStream`]: the meaningful bits end in the middle of a
//!   code, or claim more bits than the packed bytes hold.
//! - [`Error::UnexpectedBit`]: the tree is well formed and the stream is long
//!   enough, but a bit names a branch that does not exist. This only happens
//!   with a single-leaf tree, whose symbol is always written as a `0` bit; a
//!   `1` bit there means the data was altered.
//!
//! ## Usage
//!
//! ```rust
//! let compressed = huffman::compress("aaabbc")?;
//! assert_eq!(compressed.data_len(), 9);
//! assert_eq!(huffman::decompress(&compressed)?, "aaabbc");
//!
//! // The wire form is plain JSON.
//! let json = compressed.to_json()?;
//! let restored = huffman::Compression::from_json(&json)?;
//! assert_eq!(restored.decompress()?, "aaabbc");
//! # Ok::<(), huffman::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bits;
pub mod codes;
pub mod compression;
pub mod error;
pub mod tree;

pub use codes::{Code, CodeTable};
pub use compression::Compression;
pub use error::{Error, Result};
pub use tree::{EncodedTree, Entry, Node, Tree, MAX_TREE_DEPTH};

/// Compress `text`. See [`Compression::compress`].
pub fn compress(text: &str) -> Result<Compression> {
    Compression::compress(text)
}

/// Decompress `compressed`. See [`Compression::decompress`].
pub fn decompress(compressed: &Compression) -> Result<String> {
    compressed.decompress()
}
