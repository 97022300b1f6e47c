mod bits;
mod bitstream;
mod codebook;
mod frequency;
mod tree;
mod trie;

pub use bits::BitSequence;
pub use bitstream::{decode, encode, CompressedArtifact};
pub use codebook::Codebook;
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node};
pub use trie::{DecodeTrie, Step};
