use std::{collections::BTreeMap, path::Path};

use super::{BitSequence, DecodeTrie, HuffmanTree, Node};
use crate::error::{CodecError, Result};

/// Symbol to code mapping, kept sorted by symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Codebook {
    pub(super) codes: BTreeMap<u8, BitSequence>,
}

impl Codebook {
    /// Walks the tree, `0` for every left turn and `1` for every right turn.
    /// A tree that is a single leaf gives that symbol the code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();

        if let Node::Leaf { symbol, .. } = tree.root() {
            codes.insert(*symbol, BitSequence::from(vec![false]));
            return Self { codes };
        }

        let mut pending = vec![(tree.root(), BitSequence::new())];
        while let Some((node, path)) = pending.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes.insert(*symbol, path);
                }
                Node::Internal { left, right, .. } => {
                    pending.push((right.as_ref(), path.pushed(true)));
                    pending.push((left.as_ref(), path.pushed(false)));
                }
            }
        }

        Self { codes }
    }

    /// Builds a codebook from explicit entries, rejecting empty codes,
    /// duplicate symbols and codes that are not prefix-free.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, BitSequence)>,
    {
        let mut codes = BTreeMap::new();
        for (symbol, code) in entries {
            if code.is_empty() {
                return Err(CodecError::MalformedCodebook(format!(
                    "symbol {symbol} has an empty code"
                )));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(CodecError::MalformedCodebook(format!(
                    "symbol {symbol} appears more than once"
                )));
            }
        }

        let codebook = Self { codes };
        DecodeTrie::from_codebook(&codebook)?;
        Ok(codebook)
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSequence> {
        self.codes.get(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSequence)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_prefix_free(&self) -> bool {
        // After sorting, a code that prefixes any other code also prefixes
        // its immediate successor.
        let mut codes = self.codes.values().collect::<Vec<_>>();
        codes.sort();
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// One `<symbol> <code>` line per entry, ascending by symbol.
    pub fn to_text(&self) -> String {
        self.iter()
            .map(|(symbol, code)| format!("{symbol} {code}\n"))
            .collect()
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let mut fields = line.split_whitespace();
            let (symbol, code) = match (fields.next(), fields.next(), fields.next()) {
                (None, _, _) => continue,
                (Some(symbol), Some(code), None) => (symbol, code),
                _ => {
                    return Err(CodecError::MalformedCodebook(format!(
                        "line {line_number}: expected `<symbol> <code>`"
                    )))
                }
            };

            let symbol = symbol.parse::<u8>().map_err(|_| {
                CodecError::MalformedCodebook(format!(
                    "line {line_number}: `{symbol}` is not a byte value"
                ))
            })?;
            let code = code.parse::<BitSequence>().map_err(|c| {
                CodecError::MalformedCodebook(format!(
                    "line {line_number}: invalid bit character `{c}`"
                ))
            })?;
            entries.push((symbol, code));
        }

        Self::from_entries(entries)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_text()).map_err(|e| CodecError::io(path, e))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CodecError::io(path, e))?;
        Self::parse(&text)
    }
}
