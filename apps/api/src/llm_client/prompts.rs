// Shared prompt fragments. Each feature that calls the LLM keeps its own prompts.rs
// alongside it; this file holds the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps rewritten bullets tied to the source document.
pub const VERBATIM_INSTRUCTION: &str = "\
    CRITICAL: The \"original\" field must be copied character-for-character from the resume text. \
    Never paraphrase, merge, or invent an original bullet.";
