use std::{fmt, path::Path};

use log::{debug, info};

use crate::{
    container::{Container, ToVec},
    error::{CodecError, Result},
    huffman::{self, Codebook, CompressedArtifact, DecodeTrie, FrequencyTable, HuffmanTree},
};

pub struct Compressed {
    pub codebook: Codebook,
    pub artifact: CompressedArtifact,
}

/// Runs the whole pipeline over an in-memory buffer. Empty input is
/// rejected rather than producing an artifact that decodes to nothing.
pub fn compress(input: &[u8]) -> Result<Compressed> {
    if input.is_empty() {
        return Err(CodecError::EmptyInput);
    }

    let frequencies = FrequencyTable::analyze(input);
    debug!(
        "{} distinct symbols over {} bytes",
        frequencies.distinct(),
        frequencies.total()
    );
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let codebook = Codebook::from_tree(&tree);
    debug_assert_eq!(codebook.len(), tree.leaf_count());
    debug_assert!(codebook.is_prefix_free());

    let artifact = huffman::encode(input, &codebook)?;
    Ok(Compressed { codebook, artifact })
}

pub fn decompress(artifact: &CompressedArtifact, codebook: &Codebook) -> Result<Vec<u8>> {
    let trie = DecodeTrie::from_codebook(codebook)?;
    debug!(
        "decoding {} bits with a {}-leaf trie",
        artifact.bit_len(),
        trie.leaf_count()
    );
    huffman::decode(artifact, &trie)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressionStats {
    pub original_size: u64,
    pub compressed_size: u64,
}

impl CompressionStats {
    /// Space saved as a percentage, `None` when the original was empty.
    pub fn ratio(&self) -> Option<f64> {
        match self.original_size {
            0 => None,
            original => Some((1.0 - self.compressed_size as f64 / original as f64) * 100.0),
        }
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Original size     : {} bytes", self.original_size)?;
        writeln!(f, "Compressed size   : {} bytes", self.compressed_size)?;
        match self.ratio() {
            Some(ratio) => write!(f, "Compression ratio : {ratio:.2}%"),
            None => write!(f, "Compression ratio : undefined (empty input)"),
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| CodecError::io(path, e))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|e| CodecError::io(path, e))
}

/// Compresses `input` into a self-contained container at `output`. When
/// `codebook_path` is given the codebook is also written there as text,
/// once the container itself is on disk.
pub fn compress_file<P, Q>(
    input: P,
    output: Q,
    codebook_path: Option<&Path>,
) -> Result<CompressionStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    let data = read_file(input)?;
    info!("compressing {} ({} bytes)", input.display(), data.len());

    let Compressed { codebook, artifact } = compress(&data)?;
    let container = Container {
        original_len: data.len() as u64,
        codebook,
        artifact,
    };
    let bytes = container.to_vec();
    write_file(output, &bytes)?;

    if let Some(path) = codebook_path {
        container.codebook.save(path)?;
    }

    Ok(CompressionStats {
        original_size: data.len() as u64,
        compressed_size: bytes.len() as u64,
    })
}

/// Restores the file compressed into `input`. A codebook at
/// `codebook_path` takes the place of the embedded one. Nothing is written
/// to `output` unless decoding succeeds.
pub fn decompress_file<P, Q>(input: P, output: Q, codebook_path: Option<&Path>) -> Result<u64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    let data = read_file(input)?;
    info!("decompressing {} ({} bytes)", input.display(), data.len());

    let container = Container::try_from(&data[..])?;
    let codebook = match codebook_path {
        Some(path) => Codebook::load(path)?,
        None => container.codebook,
    };

    let decoded = decompress(&container.artifact, &codebook)?;
    if decoded.len() as u64 != container.original_len {
        return Err(CodecError::LengthMismatch {
            expected: container.original_len,
            actual: decoded.len() as u64,
        });
    }

    write_file(output, &decoded)?;
    Ok(decoded.len() as u64)
}
