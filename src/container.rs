use std::io::{self, Cursor};

use bitstream_io::{BigEndian, ByteRead, ByteReader};

use crate::{
    error::CodecError,
    huffman::{Codebook, CompressedArtifact},
};

pub const MAGIC: [u8; 4] = *b"HUFP";
pub const VERSION: u8 = 1;

pub trait ToVec {
    fn to_vec(&self) -> Vec<u8>;
}

/// One compressed file: the codebook travels with the packed bits, so no
/// side file is needed to decode it.
///
/// ```text
/// magic "HUFP" | version u8 | original length u64 | codebook length u32
/// | codebook text | bit count u64 | packed bytes
/// ```
///
/// All integers are big-endian.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub original_len: u64,
    pub codebook: Codebook,
    pub artifact: CompressedArtifact,
}

fn header_error(error: io::Error) -> CodecError {
    match error.kind() {
        io::ErrorKind::UnexpectedEof => {
            CodecError::TruncatedStream("container header is cut short".into())
        }
        _ => CodecError::BitIo(error),
    }
}

impl ToVec for CompressedArtifact {
    fn to_vec(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(8 + self.bytes().len());
        output.extend(self.bit_len().to_be_bytes());
        output.extend(self.bytes());
        output
    }
}

impl TryFrom<&[u8]> for CompressedArtifact {
    type Error = CodecError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        let mut cursor = Cursor::new(data);
        let bit_len = ByteReader::endian(&mut cursor, BigEndian)
            .read::<u64>()
            .map_err(|_| CodecError::TruncatedStream("missing bit count".into()))?;
        let packed = &data[cursor.position() as usize..];
        CompressedArtifact::new(bit_len, packed.to_vec())
    }
}

impl ToVec for Container {
    fn to_vec(&self) -> Vec<u8> {
        let codebook = self.codebook.to_text();
        let mut output = Vec::new();
        output.extend(MAGIC);
        output.push(VERSION);
        output.extend(self.original_len.to_be_bytes());
        output.extend((codebook.len() as u32).to_be_bytes());
        output.extend(codebook.as_bytes());
        output.extend(self.artifact.to_vec());
        output
    }
}

impl TryFrom<&[u8]> for Container {
    type Error = CodecError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        let mut cursor = Cursor::new(data);
        let (original_len, codebook_len) = {
            let mut reader = ByteReader::endian(&mut cursor, BigEndian);

            let mut magic = [0u8; 4];
            reader.read_bytes(&mut magic).map_err(header_error)?;
            if magic != MAGIC {
                return Err(CodecError::MalformedContainer(format!(
                    "bad magic {magic:02X?}"
                )));
            }

            let version = reader.read::<u8>().map_err(header_error)?;
            if version != VERSION {
                return Err(CodecError::MalformedContainer(format!(
                    "unsupported version {version}"
                )));
            }

            let original_len = reader.read::<u64>().map_err(header_error)?;
            let codebook_len = reader.read::<u32>().map_err(header_error)?;
            (original_len, codebook_len)
        };

        let start = cursor.position() as usize;
        let end = start + codebook_len as usize;
        if end > data.len() {
            return Err(CodecError::TruncatedStream(format!(
                "codebook needs {codebook_len} bytes, only {} present",
                data.len() - start
            )));
        }

        let text = std::str::from_utf8(&data[start..end])
            .map_err(|e| CodecError::MalformedCodebook(e.to_string()))?;
        let codebook = Codebook::parse(text)?;
        let artifact = CompressedArtifact::try_from(&data[end..])?;

        Ok(Self {
            original_len,
            codebook,
            artifact,
        })
    }
}
