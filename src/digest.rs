//! Restriction analysis: scans a sequence with a list of enzymes and reports
//! every cleavage site.

use crate::{
    dna_sequence::{DNAsequence, Topology},
    fragmenter,
    restriction_enzyme::RestrictionEnzyme,
    restriction_site::{RestrictionSite, Strand},
};
use log::{debug, info};

/// Owns the site counter of one analysis; ids restart at 1 on every run.
#[derive(Clone, Debug, Default)]
pub struct RestrictionAnalysis {
    total_sites: u64,
}

impl RestrictionAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.total_sites = 0;
    }

    /// Number of sites found by the last run
    pub fn total_sites(&self) -> u64 {
        self.total_sites
    }

    /// Sites in detection order: enzymes in the given order, and per enzyme
    /// the sense pass, the origin-spanning windows (circular only), then the
    /// antisense pass for non-palindromic enzymes.
    pub fn run<'a>(
        &mut self,
        sequence: &'a DNAsequence,
        enzymes: &'a [RestrictionEnzyme],
        topology: Topology,
    ) -> Vec<RestrictionSite<'a>> {
        self.reset();
        let mut sites = vec![];
        for enzyme in enzymes {
            let before = sites.len();
            self.scan(sequence, enzyme, topology, &mut sites);
            debug!(
                "{}: {} site(s) on '{}'",
                enzyme.name(),
                sites.len() - before,
                sequence.label()
            );
        }
        info!(
            "{} cleavage site(s) for {} enzyme(s) on {} bp {:?} sequence",
            sites.len(),
            enzymes.len(),
            sequence.len(),
            topology
        );
        sites
    }

    fn scan<'a>(
        &mut self,
        sequence: &'a DNAsequence,
        enzyme: &'a RestrictionEnzyme,
        topology: Topology,
        sites: &mut Vec<RestrictionSite<'a>>,
    ) {
        let bases = sequence.bases().as_bytes();
        let len = bases.len();
        let k = enzyme.len();

        let windows = fragmenter::windows(bases, k);
        for (offset, window) in windows.iter().enumerate() {
            if enzyme.matches(window) {
                let position = offset + enzyme.sense_cut();
                self.accept(sequence, enzyme, topology, Strand::Sense, position, sites);
            }
        }

        if topology.is_circular() && !windows.is_empty() {
            self.scan_joint(sequence, enzyme, sites);
        }

        if !enzyme.is_palindromic() {
            for (offset, window) in fragmenter::anti_windows(bases, k).iter().enumerate() {
                if enzyme.matches(window) {
                    let position = len - (offset + enzyme.antisense_cut());
                    self.accept(sequence, enzyme, topology, Strand::Antisense, position, sites);
                }
            }
        }
    }

    /// Recognition sites that run across the origin of a circular sequence
    fn scan_joint<'a>(
        &mut self,
        sequence: &'a DNAsequence,
        enzyme: &'a RestrictionEnzyme,
        sites: &mut Vec<RestrictionSite<'a>>,
    ) {
        let bases = sequence.bases().as_bytes();
        let k = enzyme.len();
        let Some(joint) = fragmenter::joint_window(bases, k) else {
            return;
        };
        let first_start = bases.len() - k + 1;

        for (offset, window) in fragmenter::windows(&joint, k).iter().enumerate() {
            if enzyme.matches(window) {
                let position = first_start + offset + enzyme.sense_cut();
                self.accept(sequence, enzyme, Topology::Circular, Strand::Sense, position, sites);
            }
        }

        if !enzyme.is_palindromic() {
            for (offset, window) in fragmenter::anti_windows(&joint, k).iter().enumerate() {
                if enzyme.matches(window) {
                    let start = first_start + (joint.len() - offset - k);
                    let position = start + k - enzyme.antisense_cut();
                    self.accept(
                        sequence,
                        enzyme,
                        Topology::Circular,
                        Strand::Antisense,
                        position,
                        sites,
                    );
                }
            }
        }
    }

    /// Applies the topology rule to a raw cut position and records the site.
    /// Linear sequences drop cuts at or beyond the sequence end, and antisense
    /// cuts at the origin; circular positions are folded back onto `0..len`.
    fn accept<'a>(
        &mut self,
        sequence: &'a DNAsequence,
        enzyme: &'a RestrictionEnzyme,
        topology: Topology,
        strand: Strand,
        position: usize,
        sites: &mut Vec<RestrictionSite<'a>>,
    ) {
        let len = sequence.len();
        let position = match topology {
            Topology::Linear if position >= len => return,
            Topology::Linear if position == 0 && strand == Strand::Antisense => return,
            Topology::Linear => position,
            Topology::Circular => position % len,
        };
        self.total_sites += 1;
        sites.push(RestrictionSite::new(
            self.total_sites,
            enzyme,
            sequence,
            strand,
            position,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        id_registry::IdRegistry, iupac_code::IupacCode, restriction_enzyme::EnzymeRecord,
    };

    fn enzyme(
        registry: &mut IdRegistry,
        name: &str,
        sense: &str,
        antisense: &str,
    ) -> RestrictionEnzyme {
        let record = EnzymeRecord::from_marked_target(name, None, sense, antisense);
        RestrictionEnzyme::new(registry, &record).unwrap()
    }

    fn summary(sites: &[RestrictionSite]) -> Vec<(String, usize, Strand)> {
        sites
            .iter()
            .map(|s| (s.enzyme_name().to_string(), s.position(), s.strand()))
            .collect()
    }

    #[test]
    fn test_palindromic_exact_linear() {
        let mut registry = IdRegistry::new();
        let seq = DNAsequence::from_sequence(&mut registry, "GGAATTCC");
        let record = EnzymeRecord {
            name: "EcoRI".to_string(),
            origin: None,
            target: "GAATTC".to_string(),
            sense_target: "G^AATTC".to_string(),
            antisense_target: "C^TTAAG".to_string(),
            palindromic: true,
            ambiguous: false,
        };
        let enzymes = vec![RestrictionEnzyme::new(&mut registry, &record).unwrap()];
        assert!(enzymes[0].overhang().is_blunt());

        let mut analysis = RestrictionAnalysis::new();
        let sites = analysis.run(&seq, &enzymes, Topology::Linear);
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].id(), 1);
        assert_eq!(sites[0].position(), 2);
        assert_eq!(sites[0].strand(), Strand::Sense);
        assert_eq!(sites[0].upstream_length(), 2);
        assert_eq!(sites[0].downstream_length(), 6);
        assert_eq!(analysis.total_sites(), 1);
    }

    #[test]
    fn test_multiple_sites_in_detection_order() {
        let mut registry = IdRegistry::new();
        let seq = DNAsequence::from_sequence(&mut registry, "AAGGATCCAAGAATTCAAGGATCCAA");
        let enzymes = vec![
            enzyme(&mut registry, "EcoRI", "G^AATTC", "CTTAA^G"),
            enzyme(&mut registry, "BamHI", "G^GATCC", "CCTAG^G"),
        ];
        let sites = RestrictionAnalysis::new().run(&seq, &enzymes, Topology::Linear);
        assert_eq!(
            summary(&sites),
            vec![
                ("EcoRI".to_string(), 11, Strand::Sense),
                ("BamHI".to_string(), 3, Strand::Sense),
                ("BamHI".to_string(), 19, Strand::Sense),
            ]
        );
        let ids: Vec<u64> = sites.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_circular_site_across_origin() {
        let mut registry = IdRegistry::new();
        let seq = DNAsequence::from_sequence(&mut registry, "TTCAAAAAAGAA");
        let enzymes = vec![enzyme(&mut registry, "EcoRI", "G^AATTC", "CTTAA^G")];
        let mut analysis = RestrictionAnalysis::new();
        assert!(analysis.run(&seq, &enzymes, Topology::Linear).is_empty());
        let sites = analysis.run(&seq, &enzymes, Topology::Circular);
        assert_eq!(summary(&sites), vec![("EcoRI".to_string(), 10, Strand::Sense)]);
    }

    #[test]
    fn test_circular_wrap_at_every_offset() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![enzyme(&mut registry, "EcoRI", "G^AATTC", "CTTAA^G")];
        let base = "GAATTCAAAAAAAA";
        let len = base.len();
        for r in 0..6 {
            let rotated = format!("{}{}", &base[r..], &base[..r]);
            let seq = DNAsequence::from_sequence(&mut registry, &rotated);
            let start = (len - r) % len;
            let mut analysis = RestrictionAnalysis::new();
            let circular = analysis.run(&seq, &enzymes, Topology::Circular);
            assert_eq!(
                summary(&circular),
                vec![("EcoRI".to_string(), (start + 1) % len, Strand::Sense)],
                "rotation {r}"
            );
            let linear = analysis.run(&seq, &enzymes, Topology::Linear);
            assert_eq!(linear.len(), usize::from(r == 0), "rotation {r}");
        }
    }

    #[test]
    fn test_cut_past_origin_folds_back() {
        let mut registry = IdRegistry::new();
        // Cut after the last recognition base; the site starts at 9 of 12
        let enzymes = vec![enzyme(&mut registry, "Late", "GAATTC^", "^CTTAAG")];
        let seq = DNAsequence::from_sequence(&mut registry, "TTCAAAAAAGAA");
        let sites = RestrictionAnalysis::new().run(&seq, &enzymes, Topology::Circular);
        assert_eq!(summary(&sites), vec![("Late".to_string(), 3, Strand::Sense)]);
    }

    #[test]
    fn test_linear_cut_at_sequence_end_is_discarded() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![enzyme(&mut registry, "Late", "GAATTC^", "^CTTAAG")];
        let seq = DNAsequence::from_sequence(&mut registry, "AAGAATTC");
        let mut analysis = RestrictionAnalysis::new();
        assert!(analysis.run(&seq, &enzymes, Topology::Linear).is_empty());
        let sites = analysis.run(&seq, &enzymes, Topology::Circular);
        assert_eq!(summary(&sites), vec![("Late".to_string(), 0, Strand::Sense)]);
    }

    #[test]
    fn test_linear_sense_cut_at_origin_is_kept() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![enzyme(&mut registry, "MboI", "^GATC", "CTAG^")];
        let seq = DNAsequence::from_sequence(&mut registry, "GATCAAAAAA");
        let mut analysis = RestrictionAnalysis::new();
        let sites = analysis.run(&seq, &enzymes, Topology::Linear);
        assert_eq!(summary(&sites), vec![("MboI".to_string(), 0, Strand::Sense)]);
        assert_eq!(sites[0].upstream_length(), 0);
        assert_eq!(sites[0].downstream_length(), 10);
        let sites = analysis.run(&seq, &enzymes, Topology::Circular);
        assert_eq!(summary(&sites), vec![("MboI".to_string(), 0, Strand::Sense)]);
    }

    #[test]
    fn test_non_palindromic_antisense_only() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![enzyme(&mut registry, "GgtI", "G^GTCTC", "CCAGA^G")];
        assert!(!enzymes[0].is_palindromic());
        let seq = DNAsequence::from_sequence(&mut registry, "AAGAGACCAA");
        let sites = RestrictionAnalysis::new().run(&seq, &enzymes, Topology::Linear);
        assert_eq!(summary(&sites), vec![("GgtI".to_string(), 3, Strand::Antisense)]);
    }

    #[test]
    fn test_non_palindromic_both_strands() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![enzyme(&mut registry, "GgtI", "G^GTCTC", "CCAGA^G")];
        let seq = DNAsequence::from_sequence(&mut registry, "AGGTCTCAAGAGACCAA");
        let sites = RestrictionAnalysis::new().run(&seq, &enzymes, Topology::Linear);
        assert_eq!(
            summary(&sites),
            vec![
                ("GgtI".to_string(), 2, Strand::Sense),
                ("GgtI".to_string(), 10, Strand::Antisense),
            ]
        );
    }

    #[test]
    fn test_linear_antisense_cut_at_origin_is_discarded() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![enzyme(&mut registry, "GgtI", "G^GTCTC", "CCAGAG^")];
        let seq = DNAsequence::from_sequence(&mut registry, "GAGACCAAAA");
        let mut analysis = RestrictionAnalysis::new();
        assert!(analysis.run(&seq, &enzymes, Topology::Linear).is_empty());
        let sites = analysis.run(&seq, &enzymes, Topology::Circular);
        assert_eq!(summary(&sites), vec![("GgtI".to_string(), 0, Strand::Antisense)]);
    }

    #[test]
    fn test_circular_antisense_across_origin() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![enzyme(&mut registry, "GgtI", "G^GTCTC", "CCAGA^G")];
        let seq = DNAsequence::from_sequence(&mut registry, "ACCAAAAAAAAGAG");
        let mut analysis = RestrictionAnalysis::new();
        assert!(analysis.run(&seq, &enzymes, Topology::Linear).is_empty());
        let sites = analysis.run(&seq, &enzymes, Topology::Circular);
        assert_eq!(summary(&sites), vec![("GgtI".to_string(), 12, Strand::Antisense)]);
    }

    #[test]
    fn test_ambiguous_enzymes() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![
            enzyme(&mut registry, "HinfI", "G^ANTC", "CTNA^G"),
            enzyme(&mut registry, "AmbI", "G^GTNAC", "CCANT^G"),
        ];
        assert!(enzymes[0].is_palindromic());
        assert!(!enzymes[1].is_palindromic());
        let seq = DNAsequence::from_sequence(&mut registry, "TTGTAACCTTGACTCTT");
        let sites = RestrictionAnalysis::new().run(&seq, &enzymes, Topology::Linear);
        assert_eq!(
            summary(&sites),
            vec![
                ("HinfI".to_string(), 11, Strand::Sense),
                ("AmbI".to_string(), 3, Strand::Antisense),
            ]
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![
            enzyme(&mut registry, "EcoRI", "G^AATTC", "CTTAA^G"),
            enzyme(&mut registry, "GgtI", "G^GTCTC", "CCAGA^G"),
        ];
        let seq = DNAsequence::from_sequence(&mut registry, "TTCGGTCTCAGAATTCGAGACCGAA");
        let mut analysis = RestrictionAnalysis::new();
        let first: Vec<_> = analysis
            .run(&seq, &enzymes, Topology::Circular)
            .iter()
            .map(|s| (s.id(), s.position(), s.strand()))
            .collect();
        let second: Vec<_> = analysis
            .run(&seq, &enzymes, Topology::Circular)
            .iter()
            .map(|s| (s.id(), s.position(), s.strand()))
            .collect();
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(first[0].0, 1);
    }

    #[test]
    fn test_short_and_empty_sequences() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![enzyme(&mut registry, "EcoRI", "G^AATTC", "CTTAA^G")];
        let mut analysis = RestrictionAnalysis::new();
        for bases in ["", "GAAT", "GAATT"] {
            let seq = DNAsequence::from_sequence(&mut registry, bases);
            assert!(analysis.run(&seq, &enzymes, Topology::Linear).is_empty());
            assert!(analysis.run(&seq, &enzymes, Topology::Circular).is_empty());
        }
        let seq = DNAsequence::from_sequence(&mut registry, "GAATTC");
        assert!(analysis.run(&seq, &[], Topology::Circular).is_empty());
    }

    /// Straightforward reference: test every start position directly, wrapping
    /// around the origin when circular.
    fn naive_sites(
        bases: &str,
        enzyme: &RestrictionEnzyme,
        topology: Topology,
    ) -> Vec<(usize, Strand)> {
        let len = bases.len();
        let k = enzyme.len();
        let mut ret = vec![];
        if len < k {
            return ret;
        }
        let starts = match topology {
            Topology::Linear => len - k + 1,
            Topology::Circular => len,
        };
        let doubled = format!("{bases}{bases}");
        for start in 0..starts {
            let window = &doubled[start..start + k];
            let mut candidates = vec![];
            if enzyme.matches(window.as_bytes()) {
                candidates.push((start + enzyme.sense_cut(), Strand::Sense));
            }
            if !enzyme.is_palindromic()
                && enzyme.matches(IupacCode::reverse_complement(window).as_bytes())
            {
                candidates.push((start + k - enzyme.antisense_cut(), Strand::Antisense));
            }
            for (position, strand) in candidates {
                match topology {
                    Topology::Linear if position >= len => {}
                    Topology::Linear if position == 0 && strand == Strand::Antisense => {}
                    Topology::Linear => ret.push((position, strand)),
                    Topology::Circular => ret.push((position % len, strand)),
                }
            }
        }
        ret.sort_by_key(|&(p, s)| (p, s == Strand::Antisense));
        ret
    }

    #[test]
    fn test_matches_naive_scan() {
        let mut registry = IdRegistry::new();
        let enzymes = vec![
            enzyme(&mut registry, "EcoRI", "G^AATTC", "CTTAA^G"),
            enzyme(&mut registry, "GgtI", "G^GTCTC", "CCAGA^G"),
            enzyme(&mut registry, "HinfI", "G^ANTC", "CTNA^G"),
            enzyme(&mut registry, "AmbI", "GGTNAC^", "^CCANTG"),
            enzyme(&mut registry, "TaqI", "T^CGA", "AGC^T"),
            enzyme(&mut registry, "MboI", "^GATC", "CTAG^"),
            enzyme(&mut registry, "GgtII", "G^GTCTC", "CCAGAG^"),
        ];
        // Deterministic pseudo-random sequences over a small alphabet
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        for round in 0..40 {
            let len = 8 + round * 3;
            let bases: String = (0..len)
                .map(|_| {
                    state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                    b"ACGT"[(state >> 33) as usize % 4] as char
                })
                .collect();
            let seq = DNAsequence::from_sequence(&mut registry, &bases);
            for topology in [Topology::Linear, Topology::Circular] {
                for re in &enzymes {
                    let found =
                        RestrictionAnalysis::new().run(&seq, std::slice::from_ref(re), topology);
                    let mut found: Vec<(usize, Strand)> =
                        found.iter().map(|s| (s.position(), s.strand())).collect();
                    found.sort_by_key(|&(p, s)| (p, s == Strand::Antisense));
                    assert_eq!(
                        found,
                        naive_sites(&bases, re, topology),
                        "{} on {bases} ({topology:?})",
                        re.name()
                    );
                }
            }
        }
    }
}
