//! Resume bullet suggestions with a pluggable generator and a deterministic rule-based fallback.
//!
//! `AppState` holds an optional `Arc<dyn SuggestionGenerator>`. When it is absent, or when
//! it fails in any way (timeout, API error, malformed or unverifiable output), the
//! rule-based generator runs instead. There is no retry here.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::gaps::stable_hash;
use crate::analysis::prompts::{
    JD_PROMPT_CHARS, MISSING_SKILLS_IN_PROMPT, RESUME_PROMPT_CHARS, SUGGESTION_PROMPT_TEMPLATE,
    SUGGESTION_SYSTEM,
};
use crate::analysis::quantify::split_bullets;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, VERBATIM_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};

pub const MAX_SUGGESTIONS: usize = 3;

/// Bullets considered by the rule-based path.
const MAX_CANDIDATE_BULLETS: usize = 6;
/// Fragments this short are headings or contact lines, not bullets.
const MIN_BULLET_CHARS: usize = 40;
/// Suggestions that get a missing skill appended.
const MAX_SKILL_INJECTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub original: String,
    pub suggested: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Generative,
    RuleBased,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionOutcome {
    pub suggestions: Vec<Suggestion>,
    pub source: SuggestionSource,
}

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("generator timed out after {0:?}")]
    Timeout(Duration),

    #[error("generator returned no suggestions")]
    Empty,

    #[error("suggestion original is not present in the resume: {0:?}")]
    Unverifiable(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A suggestion backend. Implement this to swap backends without touching handlers.
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    /// Short label reported in logs.
    fn backend(&self) -> &'static str;

    async fn generate(
        &self,
        resume_text: &str,
        jd_text: &str,
        missing_skills: &[String],
    ) -> Result<Vec<Suggestion>, SuggestionError>;
}

/// Deterministic weak-verb and quantification rewrites. Never fails.
pub struct RuleBasedSuggester;

#[async_trait]
impl SuggestionGenerator for RuleBasedSuggester {
    fn backend(&self) -> &'static str {
        "rule_based"
    }

    async fn generate(
        &self,
        resume_text: &str,
        _jd_text: &str,
        missing_skills: &[String],
    ) -> Result<Vec<Suggestion>, SuggestionError> {
        Ok(rule_based_suggestions(resume_text, missing_skills))
    }
}

/// Generative suggestions via Claude.
pub struct LlmSuggester(pub LlmClient);

#[async_trait]
impl SuggestionGenerator for LlmSuggester {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn generate(
        &self,
        resume_text: &str,
        jd_text: &str,
        missing_skills: &[String],
    ) -> Result<Vec<Suggestion>, SuggestionError> {
        let prompt = build_suggestion_prompt(resume_text, jd_text, missing_skills);
        let system = format!("{SUGGESTION_SYSTEM} {VERBATIM_INSTRUCTION} {JSON_ONLY_SYSTEM}");
        let suggestions = self.0.call_json::<Vec<Suggestion>>(&prompt, &system).await?;
        Ok(suggestions)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback orchestration
// ────────────────────────────────────────────────────────────────────────────

/// Runs `generator` under `timeout` and validates its output; on any failure, or when no
/// generator is configured, returns the rule-based suggestions.
pub async fn suggest_with_fallback(
    generator: Option<&dyn SuggestionGenerator>,
    resume_text: &str,
    jd_text: &str,
    missing_skills: &[String],
    timeout: Duration,
) -> SuggestionOutcome {
    if let Some(generator) = generator {
        let attempt = tokio::time::timeout(
            timeout,
            generator.generate(resume_text, jd_text, missing_skills),
        )
        .await
        .unwrap_or(Err(SuggestionError::Timeout(timeout)))
        .and_then(|suggestions| validate_generated(suggestions, resume_text));

        match attempt {
            Ok(suggestions) => {
                info!(
                    "Generated {} suggestions via {} backend",
                    suggestions.len(),
                    generator.backend()
                );
                return SuggestionOutcome {
                    suggestions,
                    source: SuggestionSource::Generative,
                };
            }
            Err(e) => {
                warn!(
                    "Suggestion backend '{}' failed, using rule-based fallback: {e}",
                    generator.backend()
                );
            }
        }
    }

    let suggestions = RuleBasedSuggester
        .generate(resume_text, jd_text, missing_skills)
        .await
        .unwrap_or_default();

    SuggestionOutcome {
        suggestions,
        source: SuggestionSource::RuleBased,
    }
}

/// Caps output and rejects anything whose `original` is not verbatim resume text.
fn validate_generated(
    mut suggestions: Vec<Suggestion>,
    resume_text: &str,
) -> Result<Vec<Suggestion>, SuggestionError> {
    suggestions.truncate(MAX_SUGGESTIONS);
    if suggestions.is_empty() {
        return Err(SuggestionError::Empty);
    }
    for s in &suggestions {
        let original = s.original.trim();
        if original.is_empty() || !resume_text.contains(original) {
            return Err(SuggestionError::Unverifiable(s.original.clone()));
        }
    }
    Ok(suggestions)
}

fn build_suggestion_prompt(resume_text: &str, jd_text: &str, missing_skills: &[String]) -> String {
    let missing: Vec<&str> = missing_skills
        .iter()
        .take(MISSING_SKILLS_IN_PROMPT)
        .map(String::as_str)
        .collect();
    let missing = if missing.is_empty() {
        "none".to_string()
    } else {
        missing.join(", ")
    };

    SUGGESTION_PROMPT_TEMPLATE
        .replace("{resume_text}", truncate_chars(resume_text, RESUME_PROMPT_CHARS))
        .replace("{jd_text}", truncate_chars(jd_text, JD_PROMPT_CHARS))
        .replace("{missing_skills}", &missing)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rule-based rewrites
// ────────────────────────────────────────────────────────────────────────────

/// Weak phrase → stronger verb. First match wins; at most one substitution per bullet.
static WEAK_VERBS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\bworked on\b", "engineered"),
        (r"(?i)\bhelped\b", "collaborated to"),
        (r"(?i)\bassisted\b", "supported"),
        (r"(?i)\bresponsible for\b", "owned"),
        (r"(?i)\bwas involved in\b", "contributed to"),
        (r"(?i)\bparticipated in\b", "contributed to"),
        (r"(?i)\bdid\b", "executed"),
        (r"(?i)\bwrote\b", "developed"),
        (r"(?i)\bmade\b", "built"),
        (r"(?i)\bused\b", "leveraged"),
        (r"(?i)\bran\b", "executed"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("weak-verb pattern is valid"),
            replacement,
        )
    })
    .collect()
});

/// Impact placeholders appended to bullets with no numerals. `X` is for the user to fill.
const IMPACT_TEMPLATES: [&str; 4] = [
    "reducing processing time by X%",
    "improving model accuracy by X%",
    "supporting a team of X engineers",
    "handling X+ records per day",
];

/// Rewrites up to three weak resume bullets. `original` is always the trimmed fragment
/// exactly as it appears in `resume_text`.
pub fn rule_based_suggestions(resume_text: &str, missing_skills: &[String]) -> Vec<Suggestion> {
    let bullets = split_bullets(resume_text)
        .map(str::trim)
        .filter(|b| b.chars().count() > MIN_BULLET_CHARS)
        .take(MAX_CANDIDATE_BULLETS);

    let mut results: Vec<Suggestion> = Vec::new();

    for bullet in bullets {
        let mut improved = bullet.to_string();
        let mut reasons: Vec<String> = Vec::new();

        if let Some((rewritten, verb)) = replace_weak_verb(&improved) {
            improved = rewritten;
            reasons.push(format!(
                "Replaced weak phrasing with the stronger action verb '{verb}'."
            ));
        }

        if !improved.chars().any(|c| c.is_ascii_digit()) {
            let template = IMPACT_TEMPLATES[(stable_hash(bullet) % IMPACT_TEMPLATES.len() as u64) as usize];
            improved = format!("{}, {template}", improved.trim_end_matches('.'));
            reasons.push("Added a quantification placeholder to demonstrate impact.".to_string());
        }

        if !missing_skills.is_empty() && results.len() < MAX_SKILL_INJECTIONS {
            let skill = &missing_skills[results.len() % missing_skills.len()];
            improved = format!("{} (using {skill})", improved.trim_end());
            reasons.push(format!(
                "Mentioned missing skill '{skill}' to improve job description alignment."
            ));
        }

        if improved != bullet {
            results.push(Suggestion {
                original: bullet.to_string(),
                suggested: improved.trim().to_string(),
                reason: Some(reasons.join(" ")),
            });
        }

        if results.len() >= MAX_SUGGESTIONS {
            break;
        }
    }

    results
}

/// Applies the first matching weak-verb rule once, keeping a leading capital.
fn replace_weak_verb(text: &str) -> Option<(String, &'static str)> {
    WEAK_VERBS.iter().find_map(|(pattern, replacement)| {
        let m = pattern.find(text)?;
        let starts_upper = m.as_str().chars().next().is_some_and(char::is_uppercase);
        let verb = if starts_upper {
            capitalize(replacement)
        } else {
            replacement.to_string()
        };
        let rewritten = format!("{}{}{}", &text[..m.start()], verb, &text[m.end()..]);
        Some((rewritten, *replacement))
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
