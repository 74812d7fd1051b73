//! Quantified-impact detection and ASCII cleanup for extracted resume text.

use std::sync::LazyLock;

use regex::Regex;

/// A number next to a unit, percent, multiplier, or countable-impact noun.
static QUANTIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d+(?:[.,]\d+)?\s*(?:%|x\b|times\b|ms\b|seconds?\b|minutes?\b|hours?\b|days?\b|users\b|customers\b|records\b|queries\b|requests\b|models\b|pipelines\b|thousand\b|million\b|billion\b|k\b|m\b)",
    )
    .expect("quantified-bullet pattern is valid")
});

static INLINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x0B\x0C]+").expect("whitespace pattern is valid"));

/// Bullet glyphs PDF extraction leaves inline; each starts a new line.
static BULLET_GLYPHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[•●▪◦‣■►▸◆❖]").expect("bullet glyph pattern is valid"));

static NON_ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").expect("non-ascii pattern is valid"));

/// Characters that start a new bullet fragment.
pub const BULLET_DELIMITERS: [char; 4] = ['\n', '•', '-', '*'];

/// Splits resume text into bullet-like fragments.
pub fn split_bullets(text: &str) -> impl Iterator<Item = &str> {
    text.split(BULLET_DELIMITERS)
}

pub fn is_quantified(bullet: &str) -> bool {
    QUANTIFIED.is_match(bullet)
}

/// Number of bullet fragments carrying a quantified metric.
pub fn count_quantified_bullets(text: &str) -> usize {
    split_bullets(text).filter(|b| is_quantified(b)).count()
}

/// ASCII cleanup for extracted PDF text that keeps one bullet per line.
///
/// Bullet glyphs become line breaks, other non-ASCII runs become a space, then spaces are
/// collapsed and blank lines dropped.
pub fn clean_extracted_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let broken = BULLET_GLYPHS.replace_all(&unified, "\n");
    let ascii = NON_ASCII.replace_all(&broken, " ");

    ascii
        .lines()
        .map(|line| INLINE_WHITESPACE.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_bullet_is_quantified() {
        assert!(is_quantified("increased throughput by 30%"));
        assert!(is_quantified("cut latency by 12.5 %"));
    }

    #[test]
    fn test_multiplier_and_count_nouns() {
        assert!(is_quantified("achieved a 3x speedup"));
        assert!(is_quantified("served 10,000 users"));
        assert!(is_quantified("processed 500 records per run"));
        assert!(is_quantified("tuned 40 queries"));
        assert!(is_quantified("reduced build time from 4 hours"));
        assert!(is_quantified("2 times faster"));
    }

    #[test]
    fn test_bare_number_is_not_quantified() {
        assert!(!is_quantified("Graduated in 2021"));
        assert!(!is_quantified("Led a team of engineers"));
        assert!(!is_quantified("version 3 xylophone"));
    }

    #[test]
    fn test_count_splits_on_bullet_markers() {
        let resume = "• Increased revenue by 20%\n• Built dashboards\n- Served 5000 users\n* Cut costs 2x";
        assert_eq!(count_quantified_bullets(resume), 3);
    }

    #[test]
    fn test_end_to_end_resume_line_counts_once() {
        assert_eq!(
            count_quantified_bullets("Built an ETL pipeline in Python, increased throughput by 30%."),
            1
        );
    }

    #[test]
    fn test_empty_text_counts_zero() {
        assert_eq!(count_quantified_bullets(""), 0);
        assert_eq!(count_quantified_bullets("   "), 0);
    }

    #[test]
    fn test_multiplier_words_count() {
        assert!(is_quantified("served 2 million users"));
        assert!(is_quantified("indexed 40 thousand documents"));
        assert!(is_quantified("managed a 1.5 billion dollar book"));
        assert!(!is_quantified("2 millionaires met"));
    }

    #[test]
    fn test_clean_text_collapses_whitespace_and_non_ascii() {
        assert_eq!(clean_extracted_text("  Data\u{00a0}Engineer \n\n Résumé\t"), "Data Engineer\nR sum");
        assert_eq!(clean_extracted_text("a   b\r\n\r\nc"), "a b\nc");
        assert_eq!(clean_extracted_text("caf\u{00e9} \u{2014} bar"), "caf bar");
        assert_eq!(clean_extracted_text(" \u{00a0}\n\t"), "");
    }

    #[test]
    fn test_clean_text_keeps_one_bullet_per_line() {
        let raw = "Experience • Grew signups 10% • Served 200 users\n• Ran 30 queries";
        assert_eq!(
            clean_extracted_text(raw),
            "Experience\nGrew signups 10%\nServed 200 users\nRan 30 queries"
        );
    }

    #[test]
    fn test_cleaned_pdf_text_keeps_quantified_bullets() {
        let raw = "Jane Doe\u{00a0}\u{2013} Data Engineer\n\
            • Grew signups 10%\n• Served 200 users\n• Ran 30 queries\n\
            • Cut costs 2x\n• Saved 4 hours per week";
        let cleaned = clean_extracted_text(raw);
        assert_eq!(count_quantified_bullets(raw), 5);
        assert_eq!(count_quantified_bullets(&cleaned), 5);

        let raw_score = crate::analysis::scorer::compute_match(raw, "Required: Python.");
        let cleaned_score = crate::analysis::scorer::compute_match(&cleaned, "Required: Python.");
        assert_eq!(cleaned_score.quantified_impact, 100.0);
        assert_eq!(cleaned_score.match_score, raw_score.match_score);
    }
}
