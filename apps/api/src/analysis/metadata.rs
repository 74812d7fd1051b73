//! Per-skill metadata used for gap rationales and breakdown panels.
//!
//! A plain key → record table. Unknown skills get the default record with the skill
//! name interpolated into its description and rationale.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Course,
    Docs,
    Project,
    Book,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    pub label: String,
    pub kind: ResourceKind,
}

/// Metadata for one skill, owned so the default record can carry the skill name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMeta {
    pub category: String,
    /// Share of postings (0–100) that ask for the skill.
    pub market_demand: u8,
    /// Ranking weight for gap ordering; higher first.
    pub score_impact: u8,
    pub estimated_hours: u16,
    pub description: String,
    pub gap_why: String,
    pub roles: Vec<String>,
    pub related_skills: Vec<String>,
    pub resources: Vec<LearningResource>,
}

struct MetaRecord {
    category: &'static str,
    market_demand: u8,
    score_impact: u8,
    estimated_hours: u16,
    description: &'static str,
    gap_why: &'static str,
    roles: &'static [&'static str],
    related_skills: &'static [&'static str],
    resources: &'static [(&'static str, ResourceKind)],
}

impl MetaRecord {
    fn to_meta(&self) -> SkillMeta {
        SkillMeta {
            category: self.category.to_string(),
            market_demand: self.market_demand,
            score_impact: self.score_impact,
            estimated_hours: self.estimated_hours,
            description: self.description.to_string(),
            gap_why: self.gap_why.to_string(),
            roles: self.roles.iter().map(|s| s.to_string()).collect(),
            related_skills: self.related_skills.iter().map(|s| s.to_string()).collect(),
            resources: self
                .resources
                .iter()
                .map(|(label, kind)| LearningResource {
                    label: label.to_string(),
                    kind: *kind,
                })
                .collect(),
        }
    }
}

pub const DEFAULT_SCORE_IMPACT: u8 = 3;

const DEFAULT_CATEGORY: &str = "Technical Skill";
const DEFAULT_MARKET_DEMAND: u8 = 50;
const DEFAULT_ESTIMATED_HOURS: u16 = 20;

use ResourceKind::{Book, Course, Docs, Project};

static SKILL_META: LazyLock<HashMap<&'static str, MetaRecord>> = LazyLock::new(|| {
    HashMap::from([
        (
            "SQL",
            MetaRecord {
                category: "Data & Databases",
                market_demand: 92,
                score_impact: 10,
                estimated_hours: 25,
                description: "SQL is the common language for querying relational databases and shows up in \
                    nearly every data-facing posting. Window functions, CTEs and query tuning set \
                    strong candidates apart.",
                gap_why: "SQL is the most widely required data skill, listed in about 92% of data postings.",
                roles: &["Data Analyst", "Data Scientist", "Data Engineer", "BI Developer"],
                related_skills: &["PostgreSQL", "BigQuery", "dbt", "Snowflake", "Python"],
                resources: &[
                    ("Mode SQL tutorial", Course),
                    ("PostgreSQL documentation", Docs),
                    ("Solve 50 SQL practice problems", Project),
                    ("Learning SQL (Beaulieu)", Book),
                ],
            },
        ),
        (
            "AWS",
            MetaRecord {
                category: "Cloud Computing",
                market_demand: 78,
                score_impact: 9,
                estimated_hours: 40,
                description: "Amazon Web Services is the most common cloud platform in industry. Core services \
                    such as S3, EC2, Lambda and IAM signal production readiness across data, ML and \
                    backend roles.",
                gap_why: "Cloud experience is requested in about 78% of data postings; S3, EC2 and Lambda come up most.",
                roles: &["Data Scientist", "ML Engineer", "Backend Engineer", "Data Engineer"],
                related_skills: &["GCP", "Azure", "Terraform", "Docker"],
                resources: &[
                    ("AWS Cloud Practitioner", Course),
                    ("AWS documentation", Docs),
                    ("Serverless pipeline with Lambda and S3", Project),
                ],
            },
        ),
        (
            "PyTorch",
            MetaRecord {
                category: "Machine Learning",
                market_demand: 68,
                score_impact: 8,
                estimated_hours: 35,
                description: "PyTorch is the dominant deep learning framework in research and increasingly in \
                    production ML systems.",
                gap_why: "PyTorch is expected for most ML engineering and research roles.",
                roles: &["ML Engineer", "Research Scientist", "NLP Engineer"],
                related_skills: &["TensorFlow", "Python", "Hugging Face"],
                resources: &[
                    ("fast.ai Practical Deep Learning", Course),
                    ("PyTorch tutorials", Docs),
                    ("Reproduce a paper from scratch", Project),
                ],
            },
        ),
        (
            "TensorFlow",
            MetaRecord {
                category: "Machine Learning",
                market_demand: 62,
                score_impact: 7,
                estimated_hours: 30,
                description: "TensorFlow and its Keras API power many production ML systems at large companies.",
                gap_why: "Deep learning frameworks such as TensorFlow appear in about 62% of ML postings.",
                roles: &["ML Engineer", "Data Scientist", "Research Scientist"],
                related_skills: &["PyTorch", "Keras", "Scikit-learn", "Python"],
                resources: &[
                    ("TensorFlow Developer course", Course),
                    ("TensorFlow documentation", Docs),
                    ("Image classifier with Keras", Project),
                ],
            },
        ),
        (
            "Tableau",
            MetaRecord {
                category: "Data Visualization",
                market_demand: 65,
                score_impact: 6,
                estimated_hours: 20,
                description: "Tableau is the most requested BI tool for building interactive dashboards that \
                    communicate KPIs to non-technical stakeholders.",
                gap_why: "Visualization tools appear in about 65% of analyst postings, Tableau most often.",
                roles: &["Data Analyst", "BI Developer", "Marketing Analyst"],
                related_skills: &["PowerBI", "Looker", "SQL", "Excel"],
                resources: &[
                    ("Tableau Public", Course),
                    ("Tableau training videos", Docs),
                    ("Rebuild a real company dashboard", Project),
                    ("Storytelling with Data (Knaflic)", Book),
                ],
            },
        ),
        (
            "Spark",
            MetaRecord {
                category: "Big Data",
                market_demand: 54,
                score_impact: 5,
                estimated_hours: 35,
                description: "Apache Spark is the standard engine for distributed data processing, used for \
                    large-scale ETL and ML pipelines.",
                gap_why: "Spark underpins large-scale ML pipelines and is a frequent interview topic.",
                roles: &["Data Engineer", "ML Engineer", "Analytics Engineer"],
                related_skills: &["Kafka", "Airflow", "Hadoop", "Python", "dbt"],
                resources: &[
                    ("Databricks Community Edition", Course),
                    ("Apache Spark documentation", Docs),
                    ("Batch ETL pipeline with PySpark", Project),
                    ("Learning Spark (O'Reilly)", Book),
                ],
            },
        ),
        (
            "dbt",
            MetaRecord {
                category: "Data Engineering",
                market_demand: 55,
                score_impact: 5,
                estimated_hours: 20,
                description: "dbt is the standard tool for SQL-based transformation in analytics engineering.",
                gap_why: "dbt shows up in about 55% of data engineering postings.",
                roles: &["Analytics Engineer", "Data Engineer", "BI Developer"],
                related_skills: &["SQL", "Snowflake", "Airflow"],
                resources: &[
                    ("dbt Learn", Course),
                    ("dbt documentation", Docs),
                    ("dbt project on a public dataset", Project),
                ],
            },
        ),
        (
            "Docker",
            MetaRecord {
                category: "DevOps / MLOps",
                market_demand: 60,
                score_impact: 4,
                estimated_hours: 15,
                description: "Docker containers are the usual way to package and ship reproducible services.",
                gap_why: "Containerization signals production readiness and is expected even at junior level.",
                roles: &["ML Engineer", "Backend Engineer", "Data Engineer", "Platform Engineer"],
                related_skills: &["Kubernetes", "CI/CD", "Terraform"],
                resources: &[
                    ("Play with Docker", Course),
                    ("Docker documentation", Docs),
                    ("Containerize and deploy a Python model", Project),
                ],
            },
        ),
        (
            "Kubernetes",
            MetaRecord {
                category: "DevOps / MLOps",
                market_demand: 48,
                score_impact: 4,
                estimated_hours: 40,
                description: "Kubernetes orchestrates containerized workloads at scale, including distributed \
                    training jobs.",
                gap_why: "Container orchestration is increasingly listed for platform and ML engineering roles.",
                roles: &["Platform Engineer", "ML Engineer", "SRE"],
                related_skills: &["Docker", "Terraform", "CI/CD"],
                resources: &[
                    ("Kubernetes for Beginners", Course),
                    ("Kubernetes documentation", Docs),
                    ("Deploy a microservice on a local cluster", Project),
                    ("Kubernetes in Action", Book),
                ],
            },
        ),
    ])
});

/// Metadata for `skill`, or the default record when the table has no entry.
pub fn skill_meta(skill: &str) -> SkillMeta {
    match SKILL_META.get(skill) {
        Some(record) => record.to_meta(),
        None => default_meta(skill),
    }
}

/// Gap-ordering weight for `skill`.
pub fn score_impact(skill: &str) -> u8 {
    SKILL_META
        .get(skill)
        .map(|r| r.score_impact)
        .unwrap_or(DEFAULT_SCORE_IMPACT)
}

fn default_meta(skill: &str) -> SkillMeta {
    SkillMeta {
        category: DEFAULT_CATEGORY.to_string(),
        market_demand: DEFAULT_MARKET_DEMAND,
        score_impact: DEFAULT_SCORE_IMPACT,
        estimated_hours: DEFAULT_ESTIMATED_HOURS,
        description: format!("{skill} is a commonly requested skill in technical job postings."),
        gap_why: format!("{skill} is listed in this job description but not found in your resume."),
        roles: vec![
            "Software Engineer".to_string(),
            "Data Scientist".to_string(),
            "ML Engineer".to_string(),
        ],
        related_skills: Vec::new(),
        resources: vec![
            LearningResource {
                label: format!("{skill} official documentation"),
                kind: Docs,
            },
            LearningResource {
                label: format!("Build a small project using {skill}"),
                kind: Project,
            },
        ],
    }
}
