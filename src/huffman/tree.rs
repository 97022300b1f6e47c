use std::{cmp::Ordering, collections::BinaryHeap};

use log::debug;

use super::FrequencyTable;
use crate::error::{CodecError, Result};

#[derive(Debug)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    fn merge(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the lightest node first,
/// and among equal weights the one queued earliest.
struct Queued {
    sequence: usize,
    node: Node,
}

impl Queued {
    fn key(&self) -> (u64, usize) {
        (self.node.weight(), self.sequence)
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

#[derive(Debug)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let mut heap = BinaryHeap::with_capacity(frequencies.distinct());
        let mut sequence = 0;
        for (symbol, weight) in frequencies.symbols() {
            heap.push(Queued {
                sequence,
                node: Node::Leaf { symbol, weight },
            });
            sequence += 1;
        }

        let root = loop {
            let first = heap.pop().ok_or(CodecError::EmptyInput)?;
            match heap.pop() {
                Some(second) => {
                    heap.push(Queued {
                        sequence,
                        node: Node::merge(first.node, second.node),
                    });
                    sequence += 1;
                }
                None => break first.node,
            }
        };

        debug!(
            "built huffman tree: {} leaves, root weight {}",
            frequencies.distinct(),
            root.weight()
        );
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![&self.root];
        while let Some(node) = pending.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    pending.push(right);
                    pending.push(left);
                }
            }
        }
        count
    }
}
