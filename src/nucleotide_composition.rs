use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nucleotide {
    Adenine,
    Cytosine,
    Guanine,
    Thymine,
    Others,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 5] = [
        Nucleotide::Adenine,
        Nucleotide::Cytosine,
        Nucleotide::Guanine,
        Nucleotide::Thymine,
        Nucleotide::Others,
    ];

    #[inline(always)]
    fn from_base(base: u8) -> Self {
        match base {
            b'A' => Self::Adenine,
            b'C' => Self::Cytosine,
            b'G' => Self::Guanine,
            b'T' => Self::Thymine,
            _ => Self::Others,
        }
    }

    #[inline(always)]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Adenine => "Adenine",
            Self::Cytosine => "Cytosine",
            Self::Guanine => "Guanine",
            Self::Thymine => "Thymine",
            Self::Others => "Others",
        };
        write!(f, "{name}")
    }
}

/// Per-nucleotide share of a sequence, in percent of its length
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NucleotideComposition {
    counts: [usize; 5],
    length: usize,
}

impl NucleotideComposition {
    pub fn new_from_sequence(sequence: &[u8]) -> Self {
        let mut counts = [0; 5];
        for &base in sequence {
            counts[Nucleotide::from_base(base).index()] += 1;
        }
        Self {
            counts,
            length: sequence.len(),
        }
    }

    #[inline(always)]
    pub fn count(&self, nucleotide: Nucleotide) -> usize {
        self.counts[nucleotide.index()]
    }

    /// Percentage of `nucleotide`; 0 for an empty sequence
    pub fn percentage(&self, nucleotide: Nucleotide) -> f64 {
        if self.length == 0 {
            return 0.0;
        }
        self.count(nucleotide) as f64 / self.length as f64 * 100.0
    }

    pub fn percentages(&self) -> Vec<(Nucleotide, f64)> {
        Nucleotide::ALL
            .iter()
            .map(|&n| (n, self.percentage(n)))
            .collect()
    }

    pub fn gc_content(&self) -> f64 {
        self.percentage(Nucleotide::Guanine) + self.percentage(Nucleotide::Cytosine)
    }
}
