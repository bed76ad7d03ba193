use crate::{
    error::{CutsiteError, Result},
    id_registry::IdRegistry,
    iupac_code::IupacCode,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CUT_MARKER: char = '^';
pub const DEFAULT_ORIGIN: &str = "No origin info provided";

/// The persisted shape of an endonuclease definition.
///
/// `target` is the recognition sequence without cut marker. `sense_target` and
/// `antisense_target` carry one `^` each; the antisense strand is written
/// 3'->5', base-aligned with the sense strand (EcoRI: `G^AATTC` / `CTTAA^G`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnzymeRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub target: String,
    pub sense_target: String,
    pub antisense_target: String,
    pub palindromic: bool,
    pub ambiguous: bool,
}

impl EnzymeRecord {
    /// Builds a record from the two marked strands, deriving the canonical
    /// target and both flags.
    pub fn from_marked_target(
        name: &str,
        origin: Option<&str>,
        sense_target: &str,
        antisense_target: &str,
    ) -> Self {
        let sense_target = sense_target.trim().to_ascii_uppercase();
        let antisense_target = antisense_target.trim().to_ascii_uppercase();
        let target = strip_cut_marker(&sense_target);
        let ambiguous = target.bytes().any(IupacCode::is_ambiguity_letter);
        let palindromic = target == IupacCode::reverse_complement(&target);
        Self {
            name: name.to_string(),
            origin: origin.filter(|o| !o.is_empty()).map(|o| o.to_string()),
            target,
            sense_target,
            antisense_target,
            palindromic,
            ambiguous,
        }
    }
}

/// How a window of the sequence is tested against the recognition site
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognitionPattern {
    Exact(String),
    Ambiguous(Vec<IupacCode>),
}

impl RecognitionPattern {
    fn compile(name: &str, target: &str, ambiguous: bool) -> Result<Self> {
        if !ambiguous {
            return Ok(Self::Exact(target.to_string()));
        }
        target
            .bytes()
            .map(|letter| {
                IupacCode::try_from_letter(letter).ok_or_else(|| CutsiteError::UnknownIupacCode {
                    target: name.to_string(),
                    letter: letter as char,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::Ambiguous)
    }

    #[inline(always)]
    pub fn matches(&self, window: &[u8]) -> bool {
        match self {
            Self::Exact(target) => window.eq_ignore_ascii_case(target.as_bytes()),
            Self::Ambiguous(codes) => {
                window.len() == codes.len()
                    && codes
                        .iter()
                        .zip(window)
                        .all(|(code, &base)| code.matches_base(base))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Overhang {
    Blunt,
    /// Single-stranded 3' extension, bases in sense order
    ThreePrime(String),
    /// Single-stranded 5' extension, bases read 5'->3' on the antisense strand
    FivePrime(String),
}

impl Overhang {
    fn from_cuts(target: &str, antisense: &str, sense_cut: usize, antisense_cut: usize) -> Self {
        if sense_cut == antisense_cut {
            Overhang::Blunt
        } else if sense_cut > antisense_cut {
            Overhang::ThreePrime(target[antisense_cut..sense_cut].to_string())
        } else {
            Overhang::FivePrime(antisense[sense_cut..antisense_cut].chars().rev().collect())
        }
    }

    pub fn is_blunt(&self) -> bool {
        *self == Overhang::Blunt
    }
}

impl fmt::Display for Overhang {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Overhang::Blunt => write!(f, "Blunt"),
            Overhang::ThreePrime(bases) => write!(f, "{bases}-3'"),
            Overhang::FivePrime(bases) => write!(f, "5'-{bases}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RestrictionEnzyme {
    id: u64,
    name: String,
    origin: String,
    target: String,
    antitarget: String,
    sense_target: String,
    antisense_target: String,
    sense_cut: usize,
    antisense_cut: usize,
    palindromic: bool,
    pattern: RecognitionPattern,
    overhang: Overhang,
}

impl RestrictionEnzyme {
    pub fn new(registry: &mut IdRegistry, record: &EnzymeRecord) -> Result<Self> {
        let name = record.name.as_str();
        if record.target.is_empty() {
            return Err(CutsiteError::EmptyTarget {
                target: name.to_string(),
            });
        }
        let strands = [&record.target, &record.sense_target, &record.antisense_target];
        if let Some(letter) = strands.iter().flat_map(|s| s.chars()).find(|c| !c.is_ascii()) {
            return Err(CutsiteError::UnknownIupacCode {
                target: name.to_string(),
                letter,
            });
        }
        let sense_cut = cut_position(name, &record.sense_target, record.target.len())?;
        let antisense_cut = cut_position(name, &record.antisense_target, record.target.len())?;
        let pattern = RecognitionPattern::compile(name, &record.target, record.ambiguous)?;
        let overhang = Overhang::from_cuts(
            &record.target,
            &strip_cut_marker(&record.antisense_target),
            sense_cut,
            antisense_cut,
        );

        Ok(Self {
            id: registry.next_enzyme_id(),
            name: name.to_string(),
            origin: record
                .origin
                .clone()
                .unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
            target: record.target.clone(),
            antitarget: IupacCode::complement(&record.target),
            sense_target: record.sense_target.clone(),
            antisense_target: record.antisense_target.clone(),
            sense_cut,
            antisense_cut,
            palindromic: record.palindromic,
            pattern,
            overhang,
        })
    }

    #[inline(always)]
    pub fn matches(&self, window: &[u8]) -> bool {
        self.pattern.matches(window)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Recognition sequence without cut marker
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Base-wise complement of the recognition sequence, read 3'->5'
    pub fn antitarget(&self) -> &str {
        &self.antitarget
    }

    pub fn sense_target(&self) -> &str {
        &self.sense_target
    }

    pub fn antisense_target(&self) -> &str {
        &self.antisense_target
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    #[inline(always)]
    pub fn sense_cut(&self) -> usize {
        self.sense_cut
    }

    #[inline(always)]
    pub fn antisense_cut(&self) -> usize {
        self.antisense_cut
    }

    #[inline(always)]
    pub fn is_palindromic(&self) -> bool {
        self.palindromic
    }

    #[inline(always)]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self.pattern, RecognitionPattern::Ambiguous(_))
    }

    pub fn pattern(&self) -> &RecognitionPattern {
        &self.pattern
    }

    pub fn overhang(&self) -> &Overhang {
        &self.overhang
    }

    pub fn visual_target(&self) -> String {
        visual_sense(&self.target)
    }

    pub fn visual_antitarget(&self) -> String {
        visual_antisense(&self.antitarget)
    }

    pub fn cleavage_representation(&self) -> String {
        visual_sense(&self.sense_target)
    }

    pub fn anti_cleavage_representation(&self) -> String {
        visual_antisense(&self.antisense_target)
    }

    pub fn to_record(&self) -> EnzymeRecord {
        EnzymeRecord {
            name: self.name.clone(),
            origin: (self.origin != DEFAULT_ORIGIN).then(|| self.origin.clone()),
            target: self.target.clone(),
            sense_target: self.sense_target.clone(),
            antisense_target: self.antisense_target.clone(),
            palindromic: self.palindromic,
            ambiguous: self.is_ambiguous(),
        }
    }
}

impl fmt::Display for RestrictionEnzyme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Origin: {}", self.origin)?;
        writeln!(f, "Target sequence: {}", self.visual_target())?;
        writeln!(f, "Target sequence length: {}", self.len())?;
        writeln!(f, "Antitarget sequence: {}", self.visual_antitarget())?;
        writeln!(f, "Cleavage site: {}", self.cleavage_representation())?;
        writeln!(f, "Cutting bp position: {}", self.sense_cut)?;
        write!(f, "Overhang: {}", self.overhang)
    }
}

pub fn strip_cut_marker(marked: &str) -> String {
    marked.chars().filter(|&c| c != CUT_MARKER).collect()
}

fn cut_position(name: &str, marked: &str, expected: usize) -> Result<usize> {
    let found = marked.matches(CUT_MARKER).count();
    let position = match (found, marked.find(CUT_MARKER)) {
        (1, Some(position)) => position,
        _ => {
            return Err(CutsiteError::CutMarker {
                target: name.to_string(),
                marked: marked.to_string(),
                found,
            });
        }
    };
    if marked.len() - 1 != expected {
        return Err(CutsiteError::LengthMismatch {
            target: name.to_string(),
            marked: marked.to_string(),
            expected,
        });
    }
    Ok(position)
}

fn visual_sense(sequence: &str) -> String {
    format!("5'-{sequence}-3'")
}

fn visual_antisense(sequence: &str) -> String {
    format!("3'-{sequence}-5'")
}
