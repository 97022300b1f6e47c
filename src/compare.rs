use std::{
    fmt,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::error::{CodecError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Identical,
    /// First differing byte, zero-based, and the one-based line it sits on.
    Mismatch { offset: u64, line: u64 },
    /// One input is a strict prefix of the other.
    LengthMismatch { left: u64, right: u64 },
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Comparison::Identical => write!(f, "files are identical"),
            Comparison::Mismatch { offset, line } => {
                write!(f, "mismatch at byte offset {offset} (line {line})")
            }
            Comparison::LengthMismatch { left, right } => {
                write!(f, "contents agree but lengths differ: {left} vs {right} bytes")
            }
        }
    }
}

/// Walks both byte streams until they disagree or both end.
fn compare_bytes<L, R>(mut left: L, mut right: R) -> Result<Comparison>
where
    L: Iterator<Item = Result<u8>>,
    R: Iterator<Item = Result<u8>>,
{
    let mut offset = 0u64;
    let mut line = 1u64;

    loop {
        match (left.next().transpose()?, right.next().transpose()?) {
            (None, None) => return Ok(Comparison::Identical),
            (Some(a), Some(b)) if a != b => return Ok(Comparison::Mismatch { offset, line }),
            (Some(a), Some(_)) => {
                if a == b'\n' {
                    line += 1;
                }
                offset += 1;
            }
            (Some(_), None) => {
                let rest = left.try_fold(0u64, |n, b| b.map(|_| n + 1))?;
                return Ok(Comparison::LengthMismatch {
                    left: offset + 1 + rest,
                    right: offset,
                });
            }
            (None, Some(_)) => {
                let rest = right.try_fold(0u64, |n, b| b.map(|_| n + 1))?;
                return Ok(Comparison::LengthMismatch {
                    left: offset,
                    right: offset + 1 + rest,
                });
            }
        }
    }
}

fn bytes<'a, R: Read + 'a>(reader: R, path: &'a Path) -> impl Iterator<Item = Result<u8>> + 'a {
    reader.bytes().map(move |b| b.map_err(|e| CodecError::io(path, e)))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| CodecError::io(path, e))
}

/// Compares two files byte by byte, reporting the first difference.
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(left: P, right: Q) -> Result<Comparison> {
    let (left, right) = (left.as_ref(), right.as_ref());
    compare_bytes(bytes(open(left)?, left), bytes(open(right)?, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(left: &[u8], right: &[u8]) -> Comparison {
        let (left_path, right_path) = (Path::new("left"), Path::new("right"));
        compare_bytes(bytes(left, left_path), bytes(right, right_path)).unwrap()
    }

    #[test]
    fn test_identical() {
        assert_eq!(compare(b"", b""), Comparison::Identical);
        assert_eq!(compare(b"same\nbytes", b"same\nbytes"), Comparison::Identical);
    }

    #[test]
    fn test_mismatch() {
        assert_eq!(
            compare(b"abc", b"abd"),
            Comparison::Mismatch { offset: 2, line: 1 }
        );
        assert_eq!(
            compare(b"one\ntwo\nthree", b"one\ntwo\nthrEe"),
            Comparison::Mismatch { offset: 11, line: 3 }
        );
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            compare(b"abc", b"abcdef"),
            Comparison::LengthMismatch { left: 3, right: 6 }
        );
        assert_eq!(
            compare(b"abcd", b"ab"),
            Comparison::LengthMismatch { left: 4, right: 2 }
        );
    }

    #[test]
    fn test_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, b"hello\nworld").unwrap();
        std::fs::write(&b, b"hello\nworld").unwrap();
        assert_eq!(compare_files(&a, &b).unwrap(), Comparison::Identical);

        std::fs::write(&b, b"hello\nwordl").unwrap();
        assert_eq!(
            compare_files(&a, &b).unwrap(),
            Comparison::Mismatch { offset: 9, line: 2 }
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        std::fs::write(&a, b"x").unwrap();
        let result = compare_files(&a, dir.path().join("missing.txt"));
        assert!(matches!(result, Err(CodecError::Io { .. })));
    }
}
