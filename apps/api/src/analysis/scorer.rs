//! Match Scorer — weighted coverage score of a resume against a job description.
//!
//! Algorithm:
//! 1. Extract skills from resume and JD text.
//! 2. Split JD skills into required/preferred tiers (`classifier`).
//! 3. required_coverage  = |resume ∩ required| / |required|   (0 when required is empty)
//!    preferred_coverage = |resume ∩ preferred| / max(|preferred|, 1)
//!    quantified_impact  = min(quantified_bullets / 5, 1)
//! 4. match_score = 100 × (0.55·required + 0.25·preferred + 0.20·quantified), 1 decimal.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::split_required_preferred;
use crate::analysis::extractor::{builtin_extractor, SkillExtractor};
use crate::analysis::quantify::count_quantified_bullets;

pub const REQUIRED_WEIGHT: f64 = 0.55;
pub const PREFERRED_WEIGHT: f64 = 0.25;
pub const QUANTIFIED_WEIGHT: f64 = 0.20;

/// Quantified bullets needed for full quantified-impact credit.
pub const QUANTIFIED_SATURATION: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub present: bool,
}

/// Immutable result of one analysis. All numeric fields are percentages (0–100, 1 decimal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub match_score: f64,
    pub required_coverage: f64,
    pub preferred_coverage: f64,
    pub quantified_impact: f64,
    /// Resume skills, sorted.
    pub extracted_skills: Vec<String>,
    /// JD skills, sorted.
    pub jd_skills: Vec<String>,
    /// Required tier, classifier order, with resume presence.
    pub required_skills: Vec<SkillMatch>,
    pub preferred_skills: Vec<String>,
    /// Required skills absent from the resume, classifier order.
    pub missing_skills: Vec<String>,
}

/// Raw ratios (0.0–1.0) before scaling to percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
    pub required: f64,
    pub preferred: f64,
    pub quantified: f64,
}

impl Coverage {
    /// Weighted score on the 0–100 scale, rounded to one decimal.
    pub fn weighted_score(&self) -> f64 {
        let raw = REQUIRED_WEIGHT * self.required
            + PREFERRED_WEIGHT * self.preferred
            + QUANTIFIED_WEIGHT * self.quantified;
        round1((raw * 100.0).clamp(0.0, 100.0))
    }
}

/// Scores `resume_text` against `jd_text` using the embedded dictionary.
pub fn compute_match(resume_text: &str, jd_text: &str) -> ScoreResult {
    compute_match_with(builtin_extractor(), resume_text, jd_text)
}

/// Scores with an explicit extractor (e.g. one built from `SKILLS_PATH`).
pub fn compute_match_with(
    extractor: &SkillExtractor,
    resume_text: &str,
    jd_text: &str,
) -> ScoreResult {
    let resume_skills = extractor.extract(resume_text);
    let jd_skills = extractor.extract(jd_text);

    let tiers = split_required_preferred(jd_text, &jd_skills);
    let resume_set: HashSet<&str> = resume_skills.iter().map(String::as_str).collect();

    let required_hits = tiers
        .required
        .iter()
        .filter(|s| resume_set.contains(s.as_str()))
        .count();
    let preferred_hits = tiers
        .preferred
        .iter()
        .filter(|s| resume_set.contains(s.as_str()))
        .count();

    let coverage = Coverage {
        required: if tiers.required.is_empty() {
            0.0
        } else {
            required_hits as f64 / tiers.required.len() as f64
        },
        preferred: preferred_hits as f64 / tiers.preferred.len().max(1) as f64,
        quantified: quantified_ratio(count_quantified_bullets(resume_text)),
    };

    let required_skills: Vec<SkillMatch> = tiers
        .required
        .iter()
        .map(|s| SkillMatch {
            skill: s.clone(),
            present: resume_set.contains(s.as_str()),
        })
        .collect();

    let missing_skills = required_skills
        .iter()
        .filter(|m| !m.present)
        .map(|m| m.skill.clone())
        .collect();

    ScoreResult {
        match_score: coverage.weighted_score(),
        required_coverage: as_percent(coverage.required),
        preferred_coverage: as_percent(coverage.preferred),
        quantified_impact: as_percent(coverage.quantified),
        extracted_skills: resume_skills,
        jd_skills,
        required_skills,
        preferred_skills: tiers.preferred,
        missing_skills,
    }
}

pub fn quantified_ratio(quantified_bullets: usize) -> f64 {
    (quantified_bullets as f64 / QUANTIFIED_SATURATION as f64).min(1.0)
}

fn as_percent(ratio: f64) -> f64 {
    round1((ratio * 100.0).clamp(0.0, 100.0))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_example() {
        let result = compute_match(
            "Built an ETL pipeline in Python, increased throughput by 30%.",
            "Required: Python, SQL. Preferred: Spark.",
        );
        assert_eq!(result.extracted_skills, vec!["ETL", "Python"]);
        assert_eq!(result.jd_skills, vec!["Python", "SQL", "Spark"]);
        assert_eq!(
            result.required_skills,
            vec![
                SkillMatch { skill: "Python".into(), present: true },
                SkillMatch { skill: "SQL".into(), present: false },
            ]
        );
        assert_eq!(result.preferred_skills, vec!["Spark"]);
        assert_eq!(result.missing_skills, vec!["SQL"]);
        assert_eq!(result.required_coverage, 50.0);
        assert_eq!(result.preferred_coverage, 0.0);
        assert_eq!(result.quantified_impact, 20.0);
        assert_eq!(result.match_score, 31.5);
    }

    #[test]
    fn test_weighted_formula_required_only() {
        let c = Coverage { required: 1.0, preferred: 0.0, quantified: 0.0 };
        assert_eq!(c.weighted_score(), 55.0);
    }

    #[test]
    fn test_weighted_formula_all_full() {
        let c = Coverage { required: 1.0, preferred: 1.0, quantified: 1.0 };
        assert_eq!(c.weighted_score(), 100.0);
    }

    #[test]
    fn test_weighted_formula_zero() {
        let c = Coverage { required: 0.0, preferred: 0.0, quantified: 0.0 };
        assert_eq!(c.weighted_score(), 0.0);
    }

    #[test]
    fn test_quantified_impact_saturates() {
        assert_eq!(quantified_ratio(0), 0.0);
        assert_eq!(quantified_ratio(1), 0.2);
        assert_eq!(quantified_ratio(5), 1.0);
        assert_eq!(quantified_ratio(12), 1.0);

        let resume = "- Grew signups 10%\n- Served 200 users\n- Ran 30 queries\n- Cut costs 2x\n- Saved 4 hours\n- Processed 9000 records";
        let result = compute_match(resume, "Required: Python.");
        assert_eq!(result.quantified_impact, 100.0);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        for (resume, jd) in [("", ""), ("   ", "\n\t"), ("Python developer", ""), ("", "Python required")] {
            let result = compute_match(resume, jd);
            assert_eq!(result.match_score, 0.0, "resume={resume:?} jd={jd:?}");
            assert_eq!(result.required_coverage, 0.0);
            assert_eq!(result.preferred_coverage, 0.0);
            assert_eq!(result.quantified_impact, 0.0);
        }
    }

    #[test]
    fn test_full_match_scores_high() {
        let result = compute_match(
            "• Built Python services on AWS with Docker, cutting latency 40%\n\
             • Automated 12 pipelines\n• Served 1M users\n• Tuned 300 queries\n• Shipped 5x faster",
            "Must have Python and AWS. Nice to have: Docker.",
        );
        assert_eq!(result.required_coverage, 100.0);
        assert_eq!(result.preferred_coverage, 100.0);
        assert_eq!(result.quantified_impact, 100.0);
        assert_eq!(result.match_score, 100.0);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        let inputs = [
            ("Python SQL Spark Docker Kubernetes 50% 3x 100 users", "Python SQL Spark Docker Kubernetes"),
            ("nothing relevant", "Required: Rust, Go, Kafka. Bonus: Redis."),
            ("R R R", "R is required. R again."),
        ];
        for (resume, jd) in inputs {
            let r = compute_match(resume, jd);
            for value in [r.match_score, r.required_coverage, r.preferred_coverage, r.quantified_impact] {
                assert!((0.0..=100.0).contains(&value), "{value} out of bounds for {resume:?}/{jd:?}");
            }
        }
    }

    #[test]
    fn test_missing_skills_follow_required_order() {
        let result = compute_match(
            "Python only",
            "Required: Terraform, Python, Airflow, Kafka.",
        );
        let required: Vec<&str> = result.required_skills.iter().map(|m| m.skill.as_str()).collect();
        let expected_missing: Vec<String> = required
            .iter()
            .filter(|s| **s != "Python")
            .map(|s| s.to_string())
            .collect();
        assert_eq!(result.missing_skills, expected_missing);
    }

    #[test]
    fn test_compute_match_is_idempotent() {
        let resume = "Worked on Spark jobs; helped with SQL reports; 20% faster";
        let jd = "Essential: SQL, Spark. Familiarity with Airflow is a plus.";
        let a = compute_match(resume, jd);
        let b = compute_match(resume, jd);
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn test_custom_extractor_is_used() {
        use crate::analysis::dictionary::{SkillDictionary, SkillEntry};

        let dict = SkillDictionary::new(vec![SkillEntry::new("Zig", &["zig"])]).unwrap();
        let extractor = SkillExtractor::new(&dict);
        let result = compute_match_with(&extractor, "I write Zig", "Required: Zig and Python");
        assert_eq!(result.jd_skills, vec!["Zig"]);
        assert_eq!(result.required_coverage, 100.0);
        assert!(result.preferred_skills.is_empty());
        assert_eq!(result.match_score, 55.0);
    }
}
