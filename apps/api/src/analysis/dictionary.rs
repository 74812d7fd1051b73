//! Skill Dictionary — canonical skill names and the alias patterns that signal them.
//!
//! Loaded once at startup (embedded default or `SKILLS_PATH`), validated, and never
//! mutated afterwards. Adding a skill is a data change: append a `{canonical, aliases}`
//! object to the JSON file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The dictionary shipped with the binary.
const BUILTIN_SKILLS_JSON: &str = include_str!("../../data/skills.json");

/// Marker prefix for aliases that are already explicit token-bounded patterns.
pub const EXPLICIT_PATTERN_PREFIX: &str = r"\b";

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read skill dictionary: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid skill dictionary JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate canonical skill name '{0}'")]
    DuplicateCanonical(String),

    #[error("skill entry #{0} has an empty canonical name")]
    EmptyCanonical(usize),

    #[error("skill '{0}' has no aliases")]
    NoAliases(String),

    #[error("skill '{0}' has an empty alias")]
    EmptyAlias(String),
}

/// One dictionary row: a canonical name and the ordered aliases that map to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub canonical: String,
    pub aliases: Vec<String>,
}

impl SkillEntry {
    #[cfg(test)]
    pub fn new(canonical: &str, aliases: &[&str]) -> Self {
        Self {
            canonical: canonical.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Validated, ordered collection of skill entries.
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    entries: Vec<SkillEntry>,
}

impl SkillDictionary {
    /// Validates and wraps a list of entries.
    pub fn new(entries: Vec<SkillEntry>) -> Result<Self, DictionaryError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if entry.canonical.trim().is_empty() {
                return Err(DictionaryError::EmptyCanonical(idx));
            }
            if !seen.insert(entry.canonical.as_str()) {
                return Err(DictionaryError::DuplicateCanonical(entry.canonical.clone()));
            }
            if entry.aliases.is_empty() {
                return Err(DictionaryError::NoAliases(entry.canonical.clone()));
            }
            if entry.aliases.iter().any(|a| a.trim().is_empty()) {
                return Err(DictionaryError::EmptyAlias(entry.canonical.clone()));
            }
        }

        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let entries: Vec<SkillEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self, DictionaryError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// The embedded default dictionary.
    pub fn builtin() -> Result<Self, DictionaryError> {
        Self::from_json(BUILTIN_SKILLS_JSON)
    }

    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry whose canonical name matches `name`, ignoring ASCII case and surrounding space.
    pub fn get(&self, name: &str) -> Option<&SkillEntry> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|e| e.canonical.eq_ignore_ascii_case(name))
    }

    /// Canonical names in dictionary order.
    pub fn canonical_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.canonical.as_str()).collect()
    }
}
