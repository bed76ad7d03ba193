use crate::{
    error::CutsiteError,
    id_registry::IdRegistry,
    restriction_enzyme::{EnzymeRecord, RestrictionEnzyme},
};
use anyhow::{Result, anyhow};
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use std::{fs, path::Path};

const BUILTIN_ENZYMES_JSON: &str = include_str!("../assets/enzymes.json");

lazy_static! {
    // name::origin::target::sense::antisense::palindromic::ambiguous, origin optional
    static ref LEGACY_LINE: Regex = Regex::new(concat!(
        r"^([^:]*)::(?:([^:]*)::)?([ACGTNRYWVBKMDHS]+)::([ACGTNRYWVBKMDHS^]+)::",
        r"([ACGTNRYWVBKMDHS^]+)::(true|false)::(true|false)$"
    ))
    .expect("legacy enzyme line pattern");
}

/// An editable list of enzyme definitions, as kept in an enzyme store file
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Enzymes {
    records: Vec<EnzymeRecord>,
}

impl Enzymes {
    pub fn new(records: Vec<EnzymeRecord>) -> Self {
        Self { records }
    }

    pub fn from_json_text(json_text: &str) -> Result<Self> {
        let res: serde_json::Value = serde_json::from_str(json_text)?;
        let arr = res
            .as_array()
            .ok_or(anyhow!("Enzymes file is not a JSON array"))?;
        let mut ret = Self::default();
        for row in arr {
            let record: EnzymeRecord = match serde_json::from_value(row.to_owned()) {
                Ok(record) => record,
                Err(e) => return Err(anyhow!("Bad restriction enzyme {row}: {e}")),
            };
            match ret.add(record) {
                Ok(()) => {}
                Err(e @ CutsiteError::DuplicateEnzyme(_)) => return Err(e.into()),
                Err(e) => warn!("Skipping restriction enzyme: {e}"),
            }
        }
        Ok(ret)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_text(&text)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Reads the old one-definition-per-line text format. Repeated names keep
    /// the first definition.
    pub fn from_legacy_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut ret = Self::default();
        for record in parse_legacy_text(&text) {
            if let Err(e) = ret.add(record) {
                warn!("Skipping enzyme definition: {e}");
            }
        }
        Ok(ret)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json_text(BUILTIN_ENZYMES_JSON)
    }

    pub fn records(&self) -> &[EnzymeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_name(&self, name: &str) -> Option<&EnzymeRecord> {
        self.records.iter().find(|re| re.name == name)
    }

    /// Records in the order of `names`; unknown names are left out
    pub fn by_names(&self, names: &[&str]) -> Vec<EnzymeRecord> {
        names
            .iter()
            .filter_map(|name| self.by_name(name))
            .cloned()
            .collect()
    }

    /// Appends a definition that builds into a valid enzyme
    pub fn add(&mut self, record: EnzymeRecord) -> Result<(), CutsiteError> {
        if self.by_name(&record.name).is_some() {
            return Err(CutsiteError::DuplicateEnzyme(record.name));
        }
        validate(&record)?;
        self.records.push(record);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<EnzymeRecord> {
        let index = self.records.iter().position(|re| re.name == name)?;
        Some(self.records.remove(index))
    }

    /// Constructs the enzymes, in list order
    pub fn build(&self, registry: &mut IdRegistry) -> Result<Vec<RestrictionEnzyme>, CutsiteError> {
        self.records
            .iter()
            .map(|record| RestrictionEnzyme::new(registry, record))
            .collect()
    }
}

fn validate(record: &EnzymeRecord) -> Result<(), CutsiteError> {
    RestrictionEnzyme::new(&mut IdRegistry::new(), record).map(|_| ())
}

/// Parses legacy definition lines. Lines that do not match the format, or
/// that do not make a valid enzyme, are skipped with a warning; blank lines
/// are ignored.
pub fn parse_legacy_text(text: &str) -> Vec<EnzymeRecord> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(number, line)| match parse_legacy_line(number + 1, line.trim()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping enzyme definition: {e}");
                None
            }
        })
        .collect()
}

fn parse_legacy_line(number: usize, line: &str) -> Result<EnzymeRecord, CutsiteError> {
    let caps = LEGACY_LINE
        .captures(line)
        .ok_or_else(|| CutsiteError::InvalidRecord {
            line: number,
            reason: format!("'{line}' is not a valid enzyme definition"),
        })?;
    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    let record = EnzymeRecord {
        name: field(1).to_string(),
        origin: caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|o| !o.is_empty())
            .map(|o| o.to_string()),
        target: field(3).to_string(),
        sense_target: field(4).to_string(),
        antisense_target: field(5).to_string(),
        palindromic: field(6) == "true",
        ambiguous: field(7) == "true",
    };
    validate(&record).map_err(|e| CutsiteError::InvalidRecord {
        line: number,
        reason: e.to_string(),
    })?;
    Ok(record)
}
