use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = CodecError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CodecError {
    /// A file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The in-memory bit reader or writer failed.
    #[error("bit stream error: {0}")]
    BitIo(#[from] io::Error),

    #[error("input is empty, nothing to compress")]
    EmptyInput,

    #[error("malformed codebook: {0}")]
    MalformedCodebook(String),

    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// The recorded bits ran out before a code was completed, or fewer
    /// packed bytes are present than the header promises.
    #[error("truncated stream: {0}")]
    TruncatedStream(String),

    #[error("invalid code at bit {position}")]
    InvalidCode { position: u64 },

    #[error("symbol {0} has no code in the codebook")]
    UnknownSymbol(u8),

    #[error("decoded {actual} bytes, expected {expected}")]
    LengthMismatch { expected: u64, actual: u64 },
}

impl CodecError {
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
