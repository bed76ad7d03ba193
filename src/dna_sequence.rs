use crate::{
    id_registry::IdRegistry,
    nucleotide_composition::{Nucleotide, NucleotideComposition},
};
use anyhow::Result;
use bio::io::fasta;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{fmt, fs::File, io::Read, path::Path};

const DEFAULT_LABEL: &str = "No information provided";
const MAX_DISPLAY_BASES: usize = 90;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    #[default]
    Linear,
    Circular,
}

impl Topology {
    pub fn from_circular(is_circular: bool) -> Self {
        match is_circular {
            true => Topology::Circular,
            false => Topology::Linear,
        }
    }

    pub fn is_circular(self) -> bool {
        self == Topology::Circular
    }
}

/// An immutable nucleotide sequence together with its composition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DNAsequence {
    id: u64,
    label: String,
    bases: String,
    composition: NucleotideComposition,
}

impl DNAsequence {
    pub fn new(registry: &mut IdRegistry, label: &str, bases: &str) -> Self {
        Self {
            id: registry.next_sequence_id(),
            label: label.to_string(),
            bases: bases.to_string(),
            composition: NucleotideComposition::new_from_sequence(bases.as_bytes()),
        }
    }

    pub fn from_sequence(registry: &mut IdRegistry, bases: &str) -> Self {
        Self::new(registry, DEFAULT_LABEL, bases)
    }

    pub fn from_fasta_file<P: AsRef<Path>>(
        registry: &mut IdRegistry,
        path: P,
    ) -> Result<Vec<DNAsequence>> {
        let file = File::open(path)?;
        Ok(Self::from_fasta_reader(registry, file))
    }

    pub fn from_fasta_text(registry: &mut IdRegistry, text: &str) -> Vec<DNAsequence> {
        Self::from_fasta_reader(registry, text.as_bytes())
    }

    fn from_fasta_reader<R: Read>(registry: &mut IdRegistry, reader: R) -> Vec<DNAsequence> {
        fasta::Reader::new(reader)
            .records()
            .filter_map(|record| match record {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping unreadable FASTA record: {e}");
                    None
                }
            })
            .map(|record| Self::from_fasta_record(registry, &record))
            .collect()
    }

    pub fn from_fasta_record(registry: &mut IdRegistry, record: &fasta::Record) -> Self {
        let label = match record.desc() {
            Some(desc) => format!("{} {desc}", record.id()),
            None => record.id().to_string(),
        };
        let bases = String::from_utf8_lossy(record.seq()).to_ascii_uppercase();
        Self::new(registry, &label, &bases)
    }

    #[inline(always)]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline(always)]
    pub fn bases(&self) -> &str {
        &self.bases
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn composition(&self) -> &NucleotideComposition {
        &self.composition
    }
}

impl fmt::Display for DNAsequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "FASTA SEQUENCE")?;
        writeln!(f, "--------------")?;
        writeln!(f, "Internal program id: {}", self.id)?;
        writeln!(f, "Information: {}", self.label)?;
        writeln!(f, "Sequence length: {} bp", self.len())?;
        writeln!(f, "DNA sequence (showing {MAX_DISPLAY_BASES} bp max):")?;
        if self.len() > MAX_DISPLAY_BASES {
            let shown: String = self.bases.chars().take(MAX_DISPLAY_BASES).collect();
            writeln!(f, "5' {shown}... 3'")?;
        } else {
            writeln!(f, "5' {} 3'", self.bases)?;
        }
        for nucleotide in Nucleotide::ALL {
            writeln!(
                f,
                "{nucleotide}: {:.2}%",
                self.composition.percentage(nucleotide)
            )?;
        }
        writeln!(f, "GC content: {:.2}%", self.composition.gc_content())
    }
}
