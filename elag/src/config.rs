use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::automaton::IntersectionMode;

/// Settings shared by the automaton pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElagConfig {
    /// Passed to minimization. Above 0, explicit transitions that go where
    /// the default goes are dropped before minimizing.
    pub minimize_level: usize,
    /// Trim after intersection and concatenation.
    pub trim: bool,
    /// How [`elag_intersection`](crate::automaton::elag_intersection) matches labels.
    pub intersection_mode: IntersectionMode,
}

impl ElagConfig {
    /// Minimization level 0, trimming on, grammar against grammar.
    pub const fn default() -> ElagConfig {
        ElagConfig {
            minimize_level: 0,
            trim: true,
            intersection_mode: IntersectionMode::GrammarGrammar,
        }
    }

    /// Reads a configuration from JSON text.
    pub fn from_json(input: &str) -> Result<ElagConfig, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ElagConfig, std::io::Error> {
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }
}

impl Default for ElagConfig {
    fn default() -> ElagConfig {
        ElagConfig::default()
    }
}
