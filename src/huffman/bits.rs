use std::{fmt, str::FromStr};

/// An explicit-length run of bits, first bit first. Used for the code of a
/// single symbol.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitSequence {
    bits: Vec<bool>,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn pushed(&self, bit: bool) -> Self {
        let mut bits = self.clone();
        bits.push(bit);
        bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn is_prefix_of(&self, other: &BitSequence) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<Vec<bool>> for BitSequence {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromStr for BitSequence {
    type Err = char;

    /// Parses a string of `0` and `1` characters, returning the first
    /// offending character on failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(c),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from)
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitSequence {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(bits("0110").to_string(), "0110");
        assert_eq!(bits("").len(), 0);
        assert_eq!("01x1".parse::<BitSequence>(), Err('x'));
    }

    #[test]
    fn test_prefix() {
        assert!(bits("01").is_prefix_of(&bits("011")));
        assert!(bits("01").is_prefix_of(&bits("01")));
        assert!(!bits("011").is_prefix_of(&bits("01")));
        assert!(!bits("10").is_prefix_of(&bits("011")));
    }

    #[test]
    fn test_ordering_places_prefix_first() {
        let mut codes = vec![bits("1"), bits("01"), bits("0")];
        codes.sort();
        assert_eq!(codes, vec![bits("0"), bits("01"), bits("1")]);
    }
}
