//! Prefix-code trees.
//!
//! A Huffman tree is grown bottom-up: every distinct symbol starts as a leaf
//! weighted by its count, and the two lightest nodes are repeatedly merged
//! under a new internal node until a single root remains. The first node
//! taken from the queue becomes the left (`0`) child.
//!
//! Trees travel on the wire as a pre-order sequence of [`Entry`] values. A leaf
//! is written as its symbol followed by two absent markers; an internal node is
//! written as a `0` marker followed by its left and right subtrees.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

use crate::codes::{self, CodeTable};
use crate::error::{Error, Result};

/// Deepest internal node accepted when decoding an encoded tree.
///
/// Subtree frequencies along the deepest path of a Huffman tree grow at least
/// like the Fibonacci numbers, so inputs counted in `usize` stay below ~92
/// levels.
pub const MAX_TREE_DEPTH: usize = 128;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A node carrying one symbol.
    Leaf {
        /// The symbol.
        symbol: char,
        /// Occurrences of the symbol. Zero for decoded trees.
        freq: usize,
    },
    /// A node carrying two children and their combined frequency.
    Internal {
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
        /// Sum of the children's frequencies. Zero for decoded trees.
        freq: usize,
    },
}

impl Node {
    /// Frequency of this node.
    pub fn freq(&self) -> usize {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    /// Symbol carried by a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<char> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Left and right children of an internal node.
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }

    /// Child selected by `bit` (`0` is left, anything else is right).
    pub fn child(&self, bit: u8) -> Option<&Node> {
        self.children()
            .map(|(left, right)| if bit == 0 { left } else { right })
    }

    fn merge(left: Node, right: Node) -> Self {
        let freq = left.freq().saturating_add(right.freq());
        Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
            freq,
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Queue slot ordered by frequency, then by arrival.
struct Pending {
    freq: usize,
    arrival: usize,
    node: Node,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-priority queue
        (other.freq, other.arrival).cmp(&(self.freq, self.arrival))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.arrival == other.arrival
    }
}

impl Eq for Pending {}

/// Count the occurrences of every distinct symbol in `text`.
pub fn frequencies(text: &str) -> BTreeMap<char, usize> {
    text.chars().fold(BTreeMap::new(), |mut acc, symbol| {
        *acc.entry(symbol).or_insert(0) += 1;
        acc
    })
}

/// A prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// Build the tree for the symbols of `text`.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `text` is empty.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_frequencies(frequencies(text))
    }

    /// Build a tree from `(symbol, count)` pairs.
    ///
    /// Repeated symbols have their counts summed and zero counts are skipped.
    /// Leaves are queued in ascending symbol order and equal frequencies are
    /// resolved by queue arrival, so the result is deterministic.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if no symbol has a non-zero count.
    pub fn from_frequencies<I>(freqs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, usize)>,
    {
        let counts = freqs
            .into_iter()
            .filter(|&(_, freq)| freq > 0)
            .fold(BTreeMap::new(), |mut acc, (symbol, freq)| {
                let count: &mut usize = acc.entry(symbol).or_insert(0);
                *count = count.saturating_add(freq);
                acc
            });

        let mut pq = BinaryHeap::with_capacity(counts.len());
        let mut arrival = 0;
        for (symbol, freq) in counts {
            pq.push(Pending {
                freq,
                arrival,
                node: Node::Leaf { symbol, freq },
            });
            arrival += 1;
        }

        let mut merges = 0usize;
        loop {
            let Some(left) = pq.pop() else {
                return Err(Error::EmptyInput);
            };
            let Some(right) = pq.pop() else {
                let root = left.node;
                trace!(merges, depth = root.depth(), "built huffman tree");
                return Ok(Self { root });
            };

            let node = Node::merge(left.node, right.node);
            pq.push(Pending {
                freq: node.freq(),
                arrival,
                node,
            });
            arrival += 1;
            merges += 1;
        }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Code table for this tree.
    pub fn codes(&self) -> CodeTable {
        codes::build_codes(&self.root)
    }

    /// Pre-order encoding of this tree.
    pub fn encode(&self) -> EncodedTree {
        let mut entries = Vec::new();
        write_node(&self.root, &mut entries);
        EncodedTree(entries)
    }

    /// Rebuild a tree from its pre-order encoding.
    ///
    /// Decoded nodes carry frequency zero; only the shape and the symbol
    /// placement survive the round trip.
    ///
    /// # Errors
    /// Returns `Error::MalformedTree` if the encoding is empty, truncated,
    /// carries a marker of the wrong kind, repeats a symbol, nests deeper
    /// than [`MAX_TREE_DEPTH`], or has entries left over after the root.
    pub fn decode(encoded: &EncodedTree) -> Result<Self> {
        if encoded.is_empty() {
            return Err(malformed(0, "empty tree"));
        }

        let entries = encoded.entries();
        let mut reader = Reader {
            entries,
            pos: 0,
            seen: BTreeSet::new(),
        };
        let root = reader.read_node(0)?;
        if reader.pos != encoded.len() {
            return Err(malformed(reader.pos, "trailing entries after root"));
        }

        Ok(Self { root })
    }
}

fn write_node(node: &Node, entries: &mut Vec<Entry>) {
    match node {
        Node::Leaf { symbol, .. } => {
            entries.extend([Entry::Leaf(*symbol), Entry::Absent, Entry::Absent]);
        }
        Node::Internal { left, right, .. } => {
            entries.push(Entry::Internal);
            write_node(left, entries);
            write_node(right, entries);
        }
    }
}

fn malformed(position: usize, reason: &'static str) -> Error {
    Error::MalformedTree { position, reason }
}

struct Reader<'a> {
    entries: &'a [Entry],
    pos: usize,
    seen: BTreeSet<char>,
}

impl<'a> Reader<'a> {
    fn next(&mut self) -> Result<(usize, &'a Entry)> {
        let pos = self.pos;
        let entry = self
            .entries
            .get(pos)
            .ok_or_else(|| malformed(pos, "truncated tree"))?;
        self.pos += 1;
        Ok((pos, entry))
    }

    fn read_node(&mut self, depth: usize) -> Result<Node> {
        let (pos, entry) = self.next()?;
        match *entry {
            Entry::Unknown(_) => Err(malformed(pos, "unknown marker")),
            Entry::Absent => Err(malformed(pos, "missing node")),
            Entry::Leaf(symbol) => {
                if !self.seen.insert(symbol) {
                    return Err(malformed(pos, "duplicate symbol"));
                }
                self.read_absent()?;
                self.read_absent()?;
                Ok(Node::Leaf { symbol, freq: 0 })
            }
            Entry::Internal => {
                if depth >= MAX_TREE_DEPTH {
                    return Err(malformed(pos, "tree too deep"));
                }
                let left = self.read_node(depth + 1)?;
                let right = self.read_node(depth + 1)?;
                Ok(Node::Internal {
                    left: Box::new(left),
                    right: Box::new(right),
                    freq: 0,
                })
            }
        }
    }

    fn read_absent(&mut self) -> Result<()> {
        match self.next()? {
            (_, Entry::Absent) => Ok(()),
            (pos, Entry::Unknown(_)) => Err(malformed(pos, "unknown marker")),
            (pos, _) => Err(malformed(pos, "leaf with a child")),
        }
    }
}

/// One marker of an encoded tree.
///
/// On the wire a leaf is its symbol as a one-character string, an internal
/// node is the number `0`, and an absent child is `null`. A symbol such as
/// `"0"` stays a string and never collides with the internal marker. Any
/// other value parses as [`Entry::Unknown`] and is rejected by
/// [`Tree::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A leaf carrying a symbol.
    Leaf(char),
    /// An internal node.
    Internal,
    /// A missing child.
    Absent,
    /// A value that is none of the above.
    Unknown(Value),
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Entry::Absent,
            Value::Number(ref n) if n.as_u64() == Some(0) => Entry::Internal,
            Value::String(ref s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Entry::Leaf(symbol),
                    _ => Entry::Unknown(value),
                }
            }
            other => Entry::Unknown(other),
        }
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Entry::Leaf(symbol) => serializer.serialize_char(*symbol),
            Entry::Internal => serializer.serialize_u8(0),
            Entry::Absent => serializer.serialize_none(),
            Entry::Unknown(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Entry::from)
    }
}

/// Pre-order sequence of entries describing a tree.
///
/// Displays as JSON text and parses back from it. A JSON value that is not
/// an array parses as a single unknown entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodedTree(Vec<Entry>);

impl<'de> Deserialize<'de> for EncodedTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = match Value::deserialize(deserializer)? {
            Value::Array(values) => values.into_iter().map(Entry::from).collect(),
            other => vec![Entry::Unknown(other)],
        };
        Ok(Self(entries))
    }
}

impl EncodedTree {
    /// The entries in pre-order.
    pub fn entries(&self) -> &[Entry] {
        &self.0
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Entry>> for EncodedTree {
    fn from(entries: Vec<Entry>) -> Self {
        Self(entries)
    }
}

impl fmt::Display for EncodedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl FromStr for EncodedTree {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
