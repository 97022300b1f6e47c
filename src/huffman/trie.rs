use super::Codebook;
use crate::error::{CodecError, Result};

const ROOT: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrieNode {
    Branch([Option<usize>; 2]),
    Leaf(u8),
}

/// Decode trie rebuilt from codes alone. Nodes live in one arena and refer
/// to their children by index; the root is always at index 0.
#[derive(Debug)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
}

/// Where a single decoding step landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Branch(usize),
    Symbol(u8),
}

impl DecodeTrie {
    pub fn from_codebook(codebook: &Codebook) -> Result<Self> {
        let mut nodes = vec![TrieNode::Branch([None, None])];

        for (symbol, code) in codebook.iter() {
            if code.is_empty() {
                return Err(CodecError::MalformedCodebook(format!(
                    "symbol {symbol} has an empty code"
                )));
            }

            let mut current = ROOT;
            for (depth, bit) in code.iter().enumerate() {
                let is_last = depth + 1 == code.len();
                let child = match nodes[current] {
                    TrieNode::Branch(children) => children[bit as usize],
                    TrieNode::Leaf(other) => {
                        return Err(CodecError::MalformedCodebook(format!(
                            "code {code} of symbol {symbol} extends the code of symbol {other}"
                        )))
                    }
                };

                current = match child {
                    Some(_) if is_last => {
                        return Err(CodecError::MalformedCodebook(format!(
                            "code {code} of symbol {symbol} collides with another code"
                        )))
                    }
                    Some(next) => next,
                    None => {
                        let next = nodes.len();
                        nodes.push(match is_last {
                            true => TrieNode::Leaf(symbol),
                            false => TrieNode::Branch([None, None]),
                        });
                        if let TrieNode::Branch(children) = &mut nodes[current] {
                            children[bit as usize] = Some(next);
                        }
                        next
                    }
                };
            }
        }

        Ok(Self { nodes })
    }

    pub fn root(&self) -> usize {
        ROOT
    }

    /// Follows one bit from `node`, which must be a branch. Returns `None`
    /// when the trie has no child in that direction.
    pub fn step(&self, node: usize, bit: bool) -> Option<Step> {
        let next = match self.nodes.get(node)? {
            TrieNode::Branch(children) => children[bit as usize]?,
            TrieNode::Leaf(_) => return None,
        };
        match self.nodes[next] {
            TrieNode::Branch(_) => Some(Step::Branch(next)),
            TrieNode::Leaf(symbol) => Some(Step::Symbol(symbol)),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, TrieNode::Leaf(_)))
            .count()
    }
}
