//! Code tables.
//!
//! A symbol's code is the path from the root to its leaf, `0` for every left
//! edge and `1` for every right edge. Every symbol sits at its own leaf, so no
//! code is a prefix of another.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use crate::tree::Node;

/// A bit string identifying one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<u8>,
}

impl Code {
    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the code has no bits (the sole symbol of a single-leaf tree).
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, each `0` or `1`, first edge first.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Whether `other` starts with this code.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit == 0 { "0" } else { "1" })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    /// Code for `symbol`, if the tree has a leaf for it.
    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table has no symbols.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Symbols and their codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Whether no code is a prefix of a different symbol's code.
    pub fn is_prefix_free(&self) -> bool {
        self.iter().all(|(a, code_a)| {
            self.iter()
                .all(|(b, code_b)| a == b || !code_a.is_prefix_of(code_b))
        })
    }

    /// Total bits the codes occupy for the given symbol counts.
    ///
    /// Symbols missing from the table contribute nothing.
    pub fn encoded_len(&self, freqs: &BTreeMap<char, usize>) -> usize {
        freqs
            .iter()
            .filter_map(|(&symbol, &count)| self.get(symbol).map(|code| code.len() * count))
            .sum()
    }
}

impl Index<char> for CodeTable {
    type Output = Code;

    fn index(&self, symbol: char) -> &Code {
        &self.codes[&symbol]
    }
}

/// Build the code table for the tree rooted at `root`.
///
/// A single-leaf tree maps its symbol to the empty code.
pub fn build_codes(root: &Node) -> CodeTable {
    let mut codes = BTreeMap::new();
    let mut prefix = Vec::new();
    walk(root, &mut prefix, &mut codes);
    CodeTable { codes }
}

fn walk(node: &Node, prefix: &mut Vec<u8>, codes: &mut BTreeMap<char, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(
                *symbol,
                Code {
                    bits: prefix.clone(),
                },
            );
        }
        Node::Internal { left, right, .. } => {
            prefix.push(0);
            walk(left, prefix, codes);
            prefix.pop();

            prefix.push(1);
            walk(right, prefix, codes);
            prefix.pop();
        }
    }
}
