/// Occurrence count for every byte value of one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl FrequencyTable {
    pub fn analyze(input: &[u8]) -> Self {
        let mut table = Self::default();
        for &byte in input {
            table.counts[byte as usize] += 1;
        }
        table
    }

    #[allow(dead_code)]
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Symbols that occur at least once, ascending by value.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    pub fn distinct(&self) -> usize {
        self.symbols().count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
