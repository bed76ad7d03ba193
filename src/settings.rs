use crate::{dna_sequence::Topology, enzymes::Enzymes};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
}

/// Settings of a digest run, read from a JSON file and then overridden by
/// command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub circular: bool,
    /// Enzyme store; the builtin catalog when unset
    pub enzymes_path: Option<String>,
    /// Subset of the store to digest with; empty means all
    pub enzyme_names: Vec<String>,
    pub sort_by_position: bool,
    pub output: OutputFormat,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            circular: false,
            enzymes_path: None,
            enzyme_names: vec![],
            sort_by_position: true,
            output: OutputFormat::Text,
        }
    }
}

impl AnalysisSettings {
    pub fn load_from_path(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings file '{path}'"))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Could not parse settings JSON '{path}'"))
    }

    pub fn topology(&self) -> Topology {
        Topology::from_circular(self.circular)
    }

    /// The enzyme store these settings point at, narrowed to `enzyme_names`
    pub fn enzymes(&self) -> Result<Enzymes> {
        let store = match &self.enzymes_path {
            Some(path) => Enzymes::load_from_path(path)
                .with_context(|| format!("Could not load enzymes from '{path}'"))?,
            None => Enzymes::builtin()?,
        };
        if self.enzyme_names.is_empty() {
            return Ok(store);
        }
        if let Some(missing) = self
            .enzyme_names
            .iter()
            .find(|name| store.by_name(name).is_none())
        {
            return Err(anyhow!("Unknown restriction enzyme '{missing}'"));
        }
        let names: Vec<&str> = self.enzyme_names.iter().map(|n| n.as_str()).collect();
        Ok(Enzymes::new(store.by_names(&names)))
    }
}
