use crate::{dna_sequence::DNAsequence, restriction_enzyme::RestrictionEnzyme};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    Sense,
    Antisense,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strand::Sense => write!(f, "sense"),
            Strand::Antisense => write!(f, "antisense"),
        }
    }
}

/// One cleavage event of an enzyme on a sequence.
///
/// `position` is the cut on the sense strand, counted 5'->3' from the first
/// base, whichever strand the enzyme recognised.
#[derive(Clone, Debug, PartialEq)]
pub struct RestrictionSite<'a> {
    id: u64,
    enzyme: &'a RestrictionEnzyme,
    sequence: &'a DNAsequence,
    strand: Strand,
    position: usize,
    upstream_length: usize,
    downstream_length: usize,
}

impl<'a> RestrictionSite<'a> {
    pub(crate) fn new(
        id: u64,
        enzyme: &'a RestrictionEnzyme,
        sequence: &'a DNAsequence,
        strand: Strand,
        position: usize,
    ) -> Self {
        Self {
            id,
            enzyme,
            sequence,
            strand,
            position,
            upstream_length: position,
            downstream_length: sequence.len().saturating_sub(position),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn enzyme(&self) -> &'a RestrictionEnzyme {
        self.enzyme
    }

    pub fn enzyme_name(&self) -> &'a str {
        self.enzyme.name()
    }

    pub fn sequence(&self) -> &'a DNAsequence {
        self.sequence
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Bases 5' of the cut
    pub fn upstream_length(&self) -> usize {
        self.upstream_length
    }

    /// Bases 3' of the cut
    pub fn downstream_length(&self) -> usize {
        self.downstream_length
    }
}

impl fmt::Display for RestrictionSite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.enzyme.name(),
            self.position,
            self.strand
        )
    }
}

/// Orders sites by cleavage position, keeping detection order for ties
pub fn sort_by_position(sites: &mut [RestrictionSite]) {
    sites.sort_by_key(|site| site.position);
}
