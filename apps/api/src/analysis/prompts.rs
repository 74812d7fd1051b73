// Prompt constants for resume suggestion generation.

/// Persona and output contract for suggestion generation.
pub const SUGGESTION_SYSTEM: &str = "You are an expert resume coach for technical roles. \
    Given a resume and the skills it is missing for a job description, \
    return EXACTLY 3 resume bullet improvements as a JSON array.";

/// Replace `{resume_text}`, `{jd_text}` and `{missing_skills}` before sending.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"RESUME:
{resume_text}

JOB DESCRIPTION:
{jd_text}

MISSING SKILLS: {missing_skills}

Return a JSON array where each item has:
  "original"  - the original bullet, copied verbatim from the resume
  "suggested" - the improved bullet (strong action verb, quantified impact, relevant skill)
  "reason"    - one sentence explaining the improvement

Rules:
- Use strong action verbs (Engineered, Built, Optimized, Automated)
- Add realistic quantification where missing (%, x-fold, throughput)
- Work in 1-2 of the missing skills only where it reads naturally
- Keep each suggested bullet under 25 words"#;

/// Input caps keep the prompt small.
pub const RESUME_PROMPT_CHARS: usize = 2000;
pub const JD_PROMPT_CHARS: usize = 1000;
pub const MISSING_SKILLS_IN_PROMPT: usize = 8;
