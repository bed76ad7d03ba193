/// Hands out internal ids for sequences and restriction enzymes.
///
/// Ids start at 1 and increase monotonically for the lifetime of the registry.
/// Whoever owns the sequences and enzymes owns the registry and passes it into
/// their constructors.
#[derive(Clone, Debug, Default)]
pub struct IdRegistry {
    sequences: u64,
    enzymes: u64,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_sequence_id(&mut self) -> u64 {
        self.sequences += 1;
        self.sequences
    }

    pub fn next_enzyme_id(&mut self) -> u64 {
        self.enzymes += 1;
        self.enzymes
    }

    /// Number of sequences created through this registry so far
    pub fn total_sequences(&self) -> u64 {
        self.sequences
    }

    pub fn total_enzymes(&self) -> u64 {
        self.enzymes
    }
}
