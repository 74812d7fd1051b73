//! Missing JD skills ranked by impact, plus the display panels built on them.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::analysis::metadata::{score_impact, skill_meta, SkillMeta};

pub const DEFAULT_MAX_GAPS: usize = 6;

/// JD skills shown in the coverage chart.
const COVERAGE_CHART_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBreakdown {
    pub skill: String,
    #[serde(flatten)]
    pub meta: SkillMeta,
}

/// One bar in the coverage chart. Display only; not part of the match score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCoverage {
    pub skill: String,
    pub present: bool,
    pub coverage: u8,
}

/// JD skills absent from the resume (case-insensitive), highest impact first.
/// Equal-impact skills keep their JD order.
pub fn build_skill_gaps(
    resume_skills: &[String],
    jd_skills: &[String],
    max_gaps: usize,
) -> Vec<SkillGap> {
    let resume_lower: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();

    let mut missing: Vec<&String> = jd_skills
        .iter()
        .filter(|s| !resume_lower.contains(&s.to_lowercase()))
        .collect();

    missing.sort_by_key(|s| std::cmp::Reverse(score_impact(s)));

    missing
        .into_iter()
        .take(max_gaps)
        .map(|skill| SkillGap {
            skill: skill.clone(),
            rationale: skill_meta(skill).gap_why,
        })
        .collect()
}

/// Detail panel per gap, keyed by skill name.
pub fn build_skill_breakdowns(gaps: &[SkillGap]) -> BTreeMap<String, SkillBreakdown> {
    gaps.iter()
        .map(|gap| {
            (
                gap.skill.clone(),
                SkillBreakdown {
                    skill: gap.skill.clone(),
                    meta: skill_meta(&gap.skill),
                },
            )
        })
        .collect()
}

/// Chart rows for the first JD skills. Values are stable per skill name:
/// 80–94 when present, 15–39 when missing.
pub fn build_skill_coverage(resume_skills: &[String], jd_skills: &[String]) -> Vec<SkillCoverage> {
    let resume_lower: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();

    jd_skills
        .iter()
        .take(COVERAGE_CHART_LIMIT)
        .map(|skill| {
            let present = resume_lower.contains(&skill.to_lowercase());
            let h = stable_hash(skill);
            let coverage = if present {
                80 + (h % 15) as u8
            } else {
                15 + (h % 25) as u8
            };
            SkillCoverage {
                skill: skill.clone(),
                present,
                coverage,
            }
        })
        .collect()
}

/// First 8 bytes of SHA-256, big-endian. Stable across processes and platforms.
pub(crate) fn stable_hash(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
