//! Requirement Classifier — partitions JD skills into required and preferred tiers.
//!
//! Heuristic, in priority order per skill:
//! 1. mentioned only in sentences carrying preferred signals → preferred
//! 2. mentioned 2+ times, or in a sentence with a required signal, or the whole JD
//!    carries required signals and no preferred ones → required
//! 3. otherwise → preferred
//!
//! If nothing lands in the required tier, the first ceil(60%) of the skills (extraction
//! order) become required so coverage always has a denominator.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Share of skills promoted to required when the heuristic finds none.
pub const FALLBACK_REQUIRED_SHARE: f64 = 0.6;

static REQUIRED_SIGNALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(required|must have|must-have|minimum|essential|proficiency in|experience with)\b",
    )
    .expect("required-signal pattern is valid")
});

static PREFERRED_SIGNALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(preferred|nice to have|nice-to-have|plus|bonus|familiarity with|exposure to|ideally)\b",
    )
    .expect("preferred-signal pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSplit {
    pub required: Vec<String>,
    pub preferred: Vec<String>,
}

/// Splits `jd_skills` into required/preferred. Every input skill lands in exactly one tier,
/// and relative order within each tier follows the input order.
pub fn split_required_preferred(jd_text: &str, jd_skills: &[String]) -> TierSplit {
    let doc_has_required = REQUIRED_SIGNALS.is_match(jd_text);
    let doc_has_preferred = PREFERRED_SIGNALS.is_match(jd_text);

    let jd_lower = jd_text.to_lowercase();
    let segments: Vec<String> = split_segments(jd_text)
        .map(str::to_lowercase)
        .collect();

    let mut split = TierSplit::default();

    for skill in jd_skills {
        let skill_lower = skill.to_lowercase();
        let mentions: Vec<&String> = segments
            .iter()
            .filter(|s| s.contains(&skill_lower))
            .collect();

        let in_required_sentence = mentions.iter().any(|s| REQUIRED_SIGNALS.is_match(s));
        let in_preferred_sentence = mentions.iter().any(|s| PREFERRED_SIGNALS.is_match(s));
        let occurrences = count_occurrences(&jd_lower, &skill_lower);

        let is_required = if in_preferred_sentence && !in_required_sentence {
            false
        } else {
            occurrences >= 2 || in_required_sentence || (doc_has_required && !doc_has_preferred)
        };

        if is_required {
            split.required.push(skill.clone());
        } else {
            split.preferred.push(skill.clone());
        }
    }

    if split.required.is_empty() && !jd_skills.is_empty() {
        let cut = fallback_required_count(jd_skills.len());
        split.required = jd_skills[..cut].to_vec();
        split.preferred = jd_skills[cut..].to_vec();
    }

    split
}

/// ceil(0.6 × n), and at least one for a non-empty list.
pub fn fallback_required_count(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    ((n as f64 * FALLBACK_REQUIRED_SHARE).ceil() as usize).clamp(1, n)
}

/// Sentence-like segments: split on terminators and newlines.
fn split_segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?', '\n', '\r'])
        .filter(|s| !s.trim().is_empty())
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn assert_partition(input: &[String], split: &TierSplit) {
        let all: HashSet<&String> = input.iter().collect();
        let req: HashSet<&String> = split.required.iter().collect();
        let pref: HashSet<&String> = split.preferred.iter().collect();
        assert!(req.is_disjoint(&pref), "tiers overlap: {split:?}");
        let union: HashSet<&String> = req.union(&pref).copied().collect();
        assert_eq!(union, all);
        assert_eq!(split.required.len() + split.preferred.len(), input.len());
    }

    #[test]
    fn test_explicit_required_and_preferred_sections() {
        let jd = "Required: Python, SQL. Preferred: Spark.";
        let input = skills(&["Python", "SQL", "Spark"]);
        let split = split_required_preferred(jd, &input);
        assert_eq!(split.required, skills(&["Python", "SQL"]));
        assert_eq!(split.preferred, skills(&["Spark"]));
        assert_partition(&input, &split);
    }

    #[test]
    fn test_preferred_only_sentence_wins_over_repeat_mentions() {
        let jd = "Docker is a plus\nDocker experience is a bonus";
        let input = skills(&["Docker"]);
        let split = split_required_preferred(jd, &input);
        // Docker is only in preferred sentences, so naive classification finds no required
        // skill and the fallback promotes it.
        assert_eq!(split.required, skills(&["Docker"]));
        assert!(split.preferred.is_empty());
    }

    #[test]
    fn test_repeat_mentions_make_skill_required() {
        let jd = "We use Kafka daily. Our platform runs on Kafka and Airflow. Airflow is a plus.";
        let input = skills(&["Airflow", "Kafka"]);
        let split = split_required_preferred(jd, &input);
        assert!(split.required.contains(&"Kafka".to_string()));
        // Airflow appears twice but one of its sentences is preferred-only and none is required.
        assert!(split.preferred.contains(&"Airflow".to_string()));
        assert_partition(&input, &split);
    }

    #[test]
    fn test_document_required_flag_without_preferred_flag() {
        let jd = "Minimum qualifications listed below\nTableau dashboards\nLooker reports";
        let input = skills(&["Looker", "Tableau"]);
        let split = split_required_preferred(jd, &input);
        assert_eq!(split.required, skills(&["Looker", "Tableau"]));
        assert!(split.preferred.is_empty());
    }

    #[test]
    fn test_mixed_sentence_counts_as_required() {
        let jd = "Experience with Terraform required, Helm charts a plus.";
        let input = skills(&["Terraform"]);
        let split = split_required_preferred(jd, &input);
        assert_eq!(split.required, skills(&["Terraform"]));
    }

    #[test]
    fn test_fallback_split_uses_ceil_of_sixty_percent() {
        // No signal words at all, each skill mentioned once.
        let jd = "Our stack: Go; Redis; Grafana; Snowflake; Looker";
        let input = skills(&["Go", "Redis", "Grafana", "Snowflake", "Looker"]);
        let split = split_required_preferred(jd, &input);
        assert_eq!(split.required.len(), 3);
        assert_eq!(split.required, skills(&["Go", "Redis", "Grafana"]));
        assert_eq!(split.preferred, skills(&["Snowflake", "Looker"]));
        assert_partition(&input, &split);
    }

    #[test]
    fn test_fallback_single_skill_becomes_required() {
        let split = split_required_preferred("Bonus: Rust", &skills(&["Rust"]));
        assert_eq!(split.required, skills(&["Rust"]));
        assert!(split.preferred.is_empty());
    }

    #[test]
    fn test_fallback_required_count_values() {
        assert_eq!(fallback_required_count(0), 0);
        assert_eq!(fallback_required_count(1), 1);
        assert_eq!(fallback_required_count(2), 2);
        assert_eq!(fallback_required_count(3), 2);
        assert_eq!(fallback_required_count(4), 3);
        assert_eq!(fallback_required_count(5), 3);
        assert_eq!(fallback_required_count(10), 6);
    }

    #[test]
    fn test_empty_skill_list_yields_empty_tiers() {
        let split = split_required_preferred("Required: nothing we know about.", &[]);
        assert!(split.required.is_empty());
        assert!(split.preferred.is_empty());
    }

    #[test]
    fn test_signal_words_match_whole_words_only() {
        // "surplus" must not trigger the "plus" preferred signal.
        let jd = "Budget surplus reports built with Excel\nExcel macros";
        let split = split_required_preferred(jd, &skills(&["Excel"]));
        assert_eq!(split.required, skills(&["Excel"]));
    }

    #[test]
    fn test_partition_holds_across_varied_inputs() {
        let cases = [
            ("Must have Python. Nice to have: Docker, Kubernetes.", vec!["Docker", "Kubernetes", "Python"]),
            ("Ideally Scala. Essential: Spark and Spark streaming.", vec!["Scala", "Spark"]),
            ("", vec!["SQL"]),
            ("SQL SQL SQL", vec!["SQL", "Git"]),
        ];
        for (jd, names) in cases {
            let input = skills(&names);
            let split = split_required_preferred(jd, &input);
            assert_partition(&input, &split);
            assert!(!split.required.is_empty(), "required empty for {jd:?}");
        }
    }
}
