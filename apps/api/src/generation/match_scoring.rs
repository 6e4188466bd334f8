//! Match scoring: how much of a job description's vocabulary already appears in a resume.
//!
//! Algorithm:
//! 1. Keywords = whitespace tokens of the job description made only of letters
//!    (Unicode category L), lowercased. Duplicates are kept and each counts on its own.
//! 2. A keyword is found when it is a substring of the lowercased resume text.
//!    Matches inside longer words count ("java" matches "javascript").
//! 3. score = found / keywords × 100, rounded to two decimals, ties to even.
//!
//! A job description without a single alphabetic token cannot be scored.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;

use crate::errors::AppError;

/// Result of scoring one resume against one job description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub score: f64, // 0 – 100
    pub keyword_count: usize,
    pub matched_count: usize,
    /// Keywords absent from the resume, first occurrence order, no duplicates.
    pub missing_keywords: Vec<String>,
}

/// Extracts the scoring keywords from a job description.
pub fn job_keywords(job_description: &str) -> Vec<String> {
    job_description
        .split_whitespace()
        .filter(|token| token.chars().all(is_letter))
        .map(str::to_lowercase)
        .collect()
}

/// Scores `resume_text` against `job_description`.
///
/// Returns `AppError::InvalidInput` when the job description yields no keywords.
pub fn score_match(resume_text: &str, job_description: &str) -> Result<MatchReport, AppError> {
    let keywords = job_keywords(job_description);
    if keywords.is_empty() {
        return Err(AppError::InvalidInput(
            "The job description must contain at least one word to match against.".to_string(),
        ));
    }

    let resume_lower = resume_text.to_lowercase();
    let mut matched_count = 0;
    let mut missing_keywords: Vec<String> = Vec::new();

    for keyword in &keywords {
        if resume_lower.contains(keyword.as_str()) {
            matched_count += 1;
        } else if !missing_keywords.contains(keyword) {
            missing_keywords.push(keyword.clone());
        }
    }

    Ok(MatchReport {
        score: round_to_hundredths(matched_count as f64 / keywords.len() as f64 * 100.0),
        keyword_count: keywords.len(),
        matched_count,
        missing_keywords,
    })
}

/// `char::is_alphabetic` also admits combining marks, letter numerals (Ⅻ) and
/// enclosed letters (Ⓐ); none of those are letters.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric() && !is_combining_mark(c) && !is_enclosed_letter(c)
}

fn is_enclosed_letter(c: char) -> bool {
    matches!(
        c,
        '\u{24B6}'..='\u{24E9}'
            | '\u{1F130}'..='\u{1F149}'
            | '\u{1F150}'..='\u{1F169}'
            | '\u{1F170}'..='\u{1F189}'
    )
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Looking for a Python Developer with SQL skills";
    const RESUME: &str = "Experienced Python developer with strong SQL and Java background";

    #[test]
    fn test_keywords_are_lowercased_alphabetic_tokens() {
        assert_eq!(
            job_keywords(JD),
            vec!["looking", "for", "a", "python", "developer", "with", "sql", "skills"]
        );
    }

    #[test]
    fn test_keywords_drop_tokens_with_punctuation_or_digits() {
        assert_eq!(
            job_keywords("Rust, Go and 5+ years of C++ (required) Kubernetes"),
            vec!["go", "and", "years", "of", "kubernetes"]
        );
    }

    #[test]
    fn test_keywords_keep_duplicates() {
        assert_eq!(job_keywords("rust Rust RUST"), vec!["rust", "rust", "rust"]);
    }

    #[test]
    fn test_keywords_accept_non_ascii_letters() {
        assert_eq!(job_keywords("Ingénieur Zürich 3D"), vec!["ingénieur", "zürich"]);
    }

    #[test]
    fn test_keywords_reject_combining_marks_and_letter_symbols() {
        // vowel signs in हिंदी are marks; the precomposed "café" is all letters
        assert_eq!(
            job_keywords("cafe\u{301} café हिंदी Ⅻ Ⓐpi"),
            vec!["café"]
        );
    }

    #[test]
    fn test_python_developer_scenario() {
        // found: a (in "java"), python, developer, with, sql → 5 of 8
        let report = score_match(RESUME, JD).unwrap();
        assert_eq!(report.keyword_count, 8);
        assert_eq!(report.matched_count, 5);
        assert_eq!(report.score, 62.5);
        assert_eq!(report.missing_keywords, vec!["looking", "for", "skills"]);
    }

    #[test]
    fn test_hundredths_tie_rounds_to_even() {
        let jd: Vec<String> = (0..32).map(|i| format!("kw{}", letters(i))).collect();
        let jd = jd.join(" ");

        let one = score_match("kwaa", &jd).unwrap();
        assert_eq!((one.keyword_count, one.matched_count), (32, 1));
        assert_eq!(one.score, 3.12);

        let five = score_match("kwaa kwab kwac kwad kwae", &jd).unwrap();
        assert_eq!(five.matched_count, 5);
        assert_eq!(five.score, 15.62);

        let three = score_match("kwaa kwab kwac", &jd).unwrap();
        assert_eq!(three.score, 9.38);
    }

    /// Two-letter suffix for index `i`: aa, ab, … so no keyword contains another.
    fn letters(i: u8) -> String {
        let a = b'a';
        format!("{}{}", (a + i / 26) as char, (a + i % 26) as char)
    }

    #[test]
    fn test_substring_inside_word_counts() {
        let report = score_match("Senior JavaScript engineer", "java").unwrap();
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_duplicates_weigh_score() {
        // rust ×3 found, go ×1 missing → 75%
        let report = score_match("rust", "rust rust rust go").unwrap();
        assert_eq!(report.score, 75.0);
        assert_eq!(report.missing_keywords, vec!["go"]);
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        let report = score_match("alpha", "alpha beta gamma").unwrap();
        assert_eq!(report.score, 33.33);
    }

    #[test]
    fn test_empty_job_description_is_invalid_input() {
        assert!(matches!(
            score_match(RESUME, ""),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_alphabetic_job_description_is_invalid_input() {
        assert!(matches!(
            score_match(RESUME, "C++ 10+ $$$"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let cases = [
            ("", "rust"),
            ("rust", "rust"),
            ("anything at all", "Looking for a Python Developer"),
            (RESUME, JD),
            ("ÅNGSTRÖM", "ångström ÅNGSTRÖM Kelvin"),
        ];
        for (resume, jd) in cases {
            let score = score_match(resume, jd).unwrap().score;
            assert!((0.0..=100.0).contains(&score), "{resume:?} / {jd:?} → {score}");
        }
    }

    #[test]
    fn test_score_monotonic_in_matching_keywords() {
        let jd = "rust tokio axum sqlx redis";
        let mut resume = String::new();
        let mut previous = score_match(&resume, jd).unwrap().score;
        for word in ["rust", "tokio", "axum", "sqlx", "redis"] {
            resume.push_str(word);
            resume.push(' ');
            let score = score_match(&resume, jd).unwrap().score;
            assert!(score >= previous, "score dropped from {previous} to {score}");
            previous = score;
        }
        assert_eq!(previous, 100.0);
    }
}
