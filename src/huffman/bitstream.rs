use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use super::{Codebook, DecodeTrie, Step};
use crate::error::{CodecError, Result};

/// Packed bits plus the number of bits that carry data. The final byte may
/// hold zero padding in its low bits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompressedArtifact {
    bit_len: u64,
    bytes: Vec<u8>,
}

impl CompressedArtifact {
    pub fn new(bit_len: u64, bytes: Vec<u8>) -> Result<Self> {
        let expected = Self::packed_len(bit_len);
        let actual = bytes.len() as u64;
        if actual < expected {
            return Err(CodecError::TruncatedStream(format!(
                "{bit_len} bits need {expected} bytes, only {actual} present"
            )));
        }
        if actual > expected {
            return Err(CodecError::MalformedContainer(format!(
                "{bit_len} bits need {expected} bytes, found {actual}"
            )));
        }
        Ok(Self { bit_len, bytes })
    }

    pub fn packed_len(bit_len: u64) -> u64 {
        bit_len / 8 + u64::from(bit_len % 8 != 0)
    }

    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Concatenates the code of every input byte, most significant bit first.
pub fn encode(input: &[u8], codebook: &Codebook) -> Result<CompressedArtifact> {
    let mut bytes = Vec::with_capacity(input.len());
    let mut bit_len = 0u64;
    {
        let mut writer = BitWriter::endian(&mut bytes, BigEndian);
        for &byte in input {
            let code = codebook.get(byte).ok_or(CodecError::UnknownSymbol(byte))?;
            for bit in code.iter() {
                writer.write_bit(bit)?;
            }
            bit_len += code.len() as u64;
        }
        writer.byte_align()?;
    }

    Ok(CompressedArtifact { bit_len, bytes })
}

/// Walks the trie for exactly `bit_len` bits. Padding is never read.
pub fn decode(artifact: &CompressedArtifact, trie: &DecodeTrie) -> Result<Vec<u8>> {
    let mut reader = BitReader::endian(Cursor::new(artifact.bytes()), BigEndian);
    let mut output = Vec::new();
    let mut node = trie.root();

    for position in 0..artifact.bit_len() {
        let bit = reader.read_bit()?;
        match trie.step(node, bit) {
            Some(Step::Branch(next)) => node = next,
            Some(Step::Symbol(symbol)) => {
                output.push(symbol);
                node = trie.root();
            }
            None => return Err(CodecError::InvalidCode { position }),
        }
    }

    if node != trie.root() {
        return Err(CodecError::TruncatedStream(format!(
            "stream ends inside a code after {} bits",
            artifact.bit_len()
        )));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::{FrequencyTable, HuffmanTree};

    fn codebook(input: &[u8]) -> Codebook {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::analyze(input)).unwrap();
        Codebook::from_tree(&tree)
    }

    fn roundtrip(input: &[u8], codebook: &Codebook) -> Vec<u8> {
        let artifact = encode(input, codebook).unwrap();
        let trie = DecodeTrie::from_codebook(codebook).unwrap();
        decode(&artifact, &trie).unwrap()
    }

    #[test]
    fn test_msb_first_packing() {
        // c = 0, a = 10, b = 11
        let codebook = codebook(b"abcc");
        let artifact = encode(b"abcc", &codebook).unwrap();
        assert_eq!(artifact.bit_len(), 6);
        assert_eq!(artifact.bytes(), &[0b1011_0000]);
    }

    #[test]
    fn test_exact_byte_has_no_padding() {
        let codebook = codebook(b"abcc");
        let artifact = encode(b"abab", &codebook).unwrap();
        assert_eq!(artifact.bit_len(), 8);
        assert_eq!(artifact.bytes(), &[0b1011_1011]);
    }

    #[test]
    fn test_single_symbol() {
        let input = vec![b'a'; 1000];
        let codebook = codebook(&input);
        let artifact = encode(&input, &codebook).unwrap();
        assert_eq!(artifact.bit_len(), 1000);
        assert_eq!(artifact.bytes().len(), 125);
        assert_eq!(roundtrip(&input, &codebook), input);
    }

    #[test]
    fn test_empty() {
        let artifact = encode(&[], &Codebook::default()).unwrap();
        assert_eq!(artifact.bit_len(), 0);
        assert!(artifact.bytes().is_empty());
        let trie = DecodeTrie::from_codebook(&Codebook::default()).unwrap();
        assert_eq!(decode(&artifact, &trie).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_unknown_symbol() {
        let codebook = codebook(b"abc");
        let result = encode(b"abcd", &codebook);
        assert!(matches!(result, Err(CodecError::UnknownSymbol(b'd'))));
    }

    #[test]
    fn test_padding_is_ignored() {
        let codebook = codebook(b"abcc");
        let trie = DecodeTrie::from_codebook(&codebook).unwrap();
        // Low padding bits set to one would decode as more symbols if read.
        let artifact = CompressedArtifact::new(6, vec![0b1011_0011]).unwrap();
        assert_eq!(decode(&artifact, &trie).unwrap(), b"abcc");
    }

    #[test]
    fn test_stream_ending_inside_code() {
        let codebook = codebook(b"abcc");
        let trie = DecodeTrie::from_codebook(&codebook).unwrap();
        // "10" "1" : the last code is cut short.
        let artifact = CompressedArtifact::new(3, vec![0b1010_0000]).unwrap();
        assert!(matches!(
            decode(&artifact, &trie),
            Err(CodecError::TruncatedStream(_))
        ));
    }

    #[test]
    fn test_invalid_code() {
        let codebook = codebook(&[b'a'; 4]);
        let trie = DecodeTrie::from_codebook(&codebook).unwrap();
        let artifact = CompressedArtifact::new(3, vec![0b0010_0000]).unwrap();
        assert!(matches!(
            decode(&artifact, &trie),
            Err(CodecError::InvalidCode { position: 2 })
        ));
    }

    #[test]
    fn test_artifact_length_checked() {
        assert!(matches!(
            CompressedArtifact::new(9, vec![0]),
            Err(CodecError::TruncatedStream(_))
        ));
        assert!(matches!(
            CompressedArtifact::new(8, vec![0, 0]),
            Err(CodecError::MalformedContainer(_))
        ));
        assert!(CompressedArtifact::new(0, vec![]).is_ok());
    }

    #[test]
    fn test_packed_len_at_bit_count_limit() {
        assert_eq!(CompressedArtifact::packed_len(0), 0);
        assert_eq!(CompressedArtifact::packed_len(1), 1);
        assert_eq!(CompressedArtifact::packed_len(8), 1);
        assert_eq!(CompressedArtifact::packed_len(9), 2);
        assert_eq!(CompressedArtifact::packed_len(u64::MAX), u64::MAX / 8 + 1);
        assert!(matches!(
            CompressedArtifact::new(u64::MAX, vec![]),
            Err(CodecError::TruncatedStream(_))
        ));
    }

    quickcheck::quickcheck! {
        fn encode_decode_roundtrip(input: Vec<u8>) -> bool {
            let codebook = match input.is_empty() {
                true => Codebook::default(),
                false => codebook(&input),
            };
            roundtrip(&input, &codebook) == input
        }

        fn bit_len_matches_codes(input: Vec<u8>) -> bool {
            if input.is_empty() {
                return true;
            }
            let codebook = codebook(&input);
            let expected = input
                .iter()
                .map(|&b| codebook.get(b).unwrap().len() as u64)
                .sum::<u64>();
            let artifact = encode(&input, &codebook).unwrap();
            artifact.bit_len() == expected
                && artifact.bytes().len() as u64 == CompressedArtifact::packed_len(expected)
        }
    }
}
