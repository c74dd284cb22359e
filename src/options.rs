use std::fs;
use std::path::Path;

use log::info;

use crate::session::SessionError;

/// Canonical morphology classes, in menu order.
pub const MORPHOLOGIES: [&str; 11] = [
    "Star",
    "Non-stellar-compact",
    "Elliptical",
    "S0",
    "Sa",
    "Sb",
    "Sc",
    "Sd",
    "Sm",
    "Irr",
    "Unclassifiable",
];

/// Canonical feature flags, in menu order. A flag's code is its 1-based position.
pub const FLAGS: [&str; 8] = [
    "SODISK", "BAR", "EDGEON", "SMALL", "LSB", "DEFECT", "DUST", "DISTURBED",
];

/// The recognized morphology and flag choices for a session.
///
/// Catalogs are loaded from option-table files (one label per line) at session
/// start, or fall back to the builtin sets above when no tables are configured.
#[derive(Debug, Clone)]
pub struct OptionCatalog {
    morphologies: Vec<String>,
    flags: Vec<String>,
}

impl OptionCatalog {
    /// Returns the builtin catalog with the canonical morphology and flag sets.
    pub fn builtin() -> Self {
        Self {
            morphologies: MORPHOLOGIES.iter().map(|s| s.to_string()).collect(),
            flags: FLAGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Loads a catalog from two option-table files.
    ///
    /// Each table holds one label per line; surrounding whitespace is trimmed and
    /// blank lines are ignored. A missing table is fatal, and so is an empty one.
    pub fn load(morph_table: &Path, flag_table: &Path) -> Result<Self, SessionError> {
        let morphologies = Self::load_table(morph_table, "morphology table")?;
        let flags = Self::load_table(flag_table, "flag table")?;
        info!(
            "Loaded option tables: {} morphologies, {} flags",
            morphologies.len(),
            flags.len()
        );
        Ok(Self { morphologies, flags })
    }

    fn load_table(path: &Path, what: &'static str) -> Result<Vec<String>, SessionError> {
        if !path.exists() {
            return Err(SessionError::NotFound {
                what,
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(|e| SessionError::Io(e.to_string()))?;
        let labels: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if labels.is_empty() {
            return Err(SessionError::Catalog(format!(
                "{} {} has no entries",
                what,
                path.display()
            )));
        }
        Ok(labels)
    }

    pub fn morphologies(&self) -> &[String] {
        &self.morphologies
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// The persisted code for the flag at `index`: its 1-based position in decimal.
    pub fn flag_code(index: usize) -> String {
        (index + 1).to_string()
    }
}
