//! Skill Extractor — turns free text into a sorted set of canonical skill names.
//!
//! Each dictionary entry compiles to one case-insensitive matcher: plain aliases are
//! escaped and wrapped in token boundaries, aliases starting with `\b` are used verbatim.
//! A fragment that fails to compile degrades to substring containment for that fragment
//! only. Presence is binary; match counts are not scored here.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::analysis::dictionary::{SkillDictionary, EXPLICIT_PATTERN_PREFIX};

/// Process-wide extractor over the embedded dictionary. Compiled on first use, read-only after.
static BUILTIN_EXTRACTOR: LazyLock<SkillExtractor> = LazyLock::new(|| {
    let dictionary = SkillDictionary::builtin().expect("embedded skill dictionary is valid");
    SkillExtractor::new(&dictionary)
});

/// Extracts canonical skills from `text` using the embedded dictionary.
pub fn extract_skills(text: &str) -> Vec<String> {
    BUILTIN_EXTRACTOR.extract(text)
}

pub fn builtin_extractor() -> &'static SkillExtractor {
    &BUILTIN_EXTRACTOR
}

/// Matcher for a single canonical skill.
#[derive(Debug)]
struct CompiledSkill {
    canonical: String,
    /// Disjunction of every alias fragment that compiled. `None` when none did.
    matcher: Option<Regex>,
    /// Lowercased literals for fragments that failed to compile.
    substring_fallbacks: Vec<String>,
}

impl CompiledSkill {
    fn is_present(&self, text: &str, text_lower: &str) -> bool {
        if self.matcher.as_ref().is_some_and(|re| re.is_match(text)) {
            return true;
        }
        self.substring_fallbacks
            .iter()
            .any(|literal| text_lower.contains(literal.as_str()))
    }
}

/// Compiled, immutable matcher set. Safe to share across threads.
#[derive(Debug)]
pub struct SkillExtractor {
    skills: Vec<CompiledSkill>,
    degraded: Vec<(String, String)>,
}

impl SkillExtractor {
    pub fn new(dictionary: &SkillDictionary) -> Self {
        let mut skills = Vec::with_capacity(dictionary.len());
        let mut degraded = Vec::new();

        for entry in dictionary.entries() {
            let mut fragments = Vec::with_capacity(entry.aliases.len());
            let mut substring_fallbacks = Vec::new();

            for alias in &entry.aliases {
                let fragment = alias_fragment(alias);
                match compile(&fragment) {
                    Ok(_) => fragments.push(fragment),
                    Err(e) => {
                        warn!(
                            "Alias '{}' for skill '{}' is not a valid pattern ({}); using substring match",
                            alias, entry.canonical, e
                        );
                        substring_fallbacks.push(fallback_literal(alias));
                        degraded.push((entry.canonical.clone(), alias.clone()));
                    }
                }
            }

            // Every fragment compiled on its own, so the disjunction compiles too.
            let matcher = if fragments.is_empty() {
                None
            } else {
                compile(&fragments.join("|")).ok()
            };

            skills.push(CompiledSkill {
                canonical: entry.canonical.clone(),
                matcher,
                substring_fallbacks,
            });
        }

        Self { skills, degraded }
    }

    /// Returns the canonical skills present in `text`, sorted ascending with no duplicates.
    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let text_lower = text.to_lowercase();
        let found: BTreeSet<&str> = self
            .skills
            .iter()
            .filter(|skill| skill.is_present(text, &text_lower))
            .map(|skill| skill.canonical.as_str())
            .collect();

        found.into_iter().map(str::to_string).collect()
    }

    /// `(canonical, alias)` pairs that fell back to substring matching.
    pub fn degraded_fragments(&self) -> &[(String, String)] {
        &self.degraded
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

/// Builds the pattern for one alias. Explicit `\b…` patterns pass through untouched.
fn alias_fragment(alias: &str) -> String {
    if alias.starts_with(EXPLICIT_PATTERN_PREFIX) {
        format!("(?:{alias})")
    } else {
        format!(r"(?:^|\W)(?:{})(?:\W|$)", regex::escape(alias.trim()))
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Literal used when a fragment does not compile; word-boundary markers are dropped.
fn fallback_literal(alias: &str) -> String {
    let trimmed = alias.strip_prefix(EXPLICIT_PATTERN_PREFIX).unwrap_or(alias);
    let trimmed = trimmed.strip_suffix(EXPLICIT_PATTERN_PREFIX).unwrap_or(trimmed);
    trimmed.to_lowercase()
}
