//! ATS Scoring — pluggable, trait-based scorer that measures a resume against a
//! job description's keywords.
//!
//! Default: `KeywordAtsScorer` (pure-Rust, deterministic, no LLM call).
//! `AppState` holds an `Arc<dyn AtsScorer>`.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::ResumeData;

/// Keywords kept from a job description, most frequent first.
const MAX_KEYWORDS: usize = 25;

const STOP_WORDS: &[&str] = &[
    "about", "above", "across", "after", "all", "also", "and", "any", "are", "able", "based",
    "been", "being", "both", "but", "can", "candidate", "company", "could", "day", "each",
    "etc", "experience", "for", "from", "has", "have", "help", "how", "including", "into",
    "its", "job", "join", "just", "looking", "more", "most", "must", "new", "not", "our",
    "out", "over", "own", "plus", "preferred", "required", "requirements", "responsibilities",
    "role", "should", "such", "team", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "through", "using", "very", "want", "well", "what", "when",
    "where", "which", "while", "who", "will", "with", "within", "work", "working", "would",
    "year", "years", "you", "your",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub ats_score: u32, // 0 – 100
    pub keyword_matches: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub recommendation: String,
    pub scorer_backend: String,
}

/// Implement this to swap scoring backends without touching the handler.
#[async_trait]
pub trait AtsScorer: Send + Sync {
    async fn score(&self, resume: &ResumeData, job_description: &str)
        -> Result<AtsReport, AppError>;
}

/// Keyword-overlap scorer.
///
/// Algorithm:
/// 1. Tokenize the job description, drop stop words and short tokens, keep the
///    `MAX_KEYWORDS` most frequent (ties broken alphabetically).
/// 2. A keyword matches when it appears as a token of the resume text.
/// 3. ats_score = Σ(frequency of matched) / Σ(frequency) × 100
pub struct KeywordAtsScorer;

#[async_trait]
impl AtsScorer for KeywordAtsScorer {
    async fn score(
        &self,
        resume: &ResumeData,
        job_description: &str,
    ) -> Result<AtsReport, AppError> {
        Ok(compute_keyword_score(resume, job_description))
    }
}

fn compute_keyword_score(resume: &ResumeData, job_description: &str) -> AtsReport {
    let keywords = extract_keywords(job_description);

    if keywords.is_empty() {
        return AtsReport {
            ats_score: 0,
            keyword_matches: vec![],
            missing_keywords: vec![],
            recommendation: "No keywords found in the job description — cannot score."
                .to_string(),
            scorer_backend: "keyword".to_string(),
        };
    }

    let resume_tokens: HashSet<String> = tokenize(&resume.searchable_text()).collect();

    let mut keyword_matches = Vec::new();
    let mut missing_keywords = Vec::new();
    let mut total = 0_u32;
    let mut matched = 0_u32;

    for (keyword, frequency) in keywords {
        total += frequency;
        if resume_tokens.contains(&keyword) {
            matched += frequency;
            keyword_matches.push(keyword);
        } else {
            missing_keywords.push(keyword);
        }
    }

    let ats_score = ((matched as f32 / total as f32) * 100.0).round() as u32;
    let recommendation = build_recommendation(ats_score, &missing_keywords);

    AtsReport {
        ats_score,
        keyword_matches,
        missing_keywords,
        recommendation,
        scorer_backend: "keyword".to_string(),
    }
}

/// Lower-cased tokens. `+`, `#` and inner dots survive so "c++", "c#" and
/// "node.js" stay whole.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|t| t.trim_matches('.').to_lowercase())
        .filter(|t| !t.is_empty())
}

/// Returns `(keyword, frequency)` pairs, most frequent first.
pub fn extract_keywords(job_description: &str) -> Vec<(String, u32)> {
    let mut counts: HashMap<String, u32> = HashMap::new();

    for token in tokenize(job_description) {
        let symbolic = token.contains('+') || token.contains('#');
        let too_short = token.chars().count() < 3 && !symbolic;
        let numeric = token.chars().all(|c| c.is_ascii_digit() || c == '.');
        if too_short || numeric || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        *counts.entry(token).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(MAX_KEYWORDS);
    ranked
}

fn build_recommendation(score: u32, missing: &[String]) -> String {
    let top_missing: Vec<&str> = missing.iter().take(5).map(String::as_str).collect();

    if score >= 80 {
        "Strong match. Your resume covers the key terms in this job description.".to_string()
    } else if score >= 50 {
        format!(
            "Moderate match ({score}/100). Consider working in: {}.",
            top_missing.join(", ")
        )
    } else {
        format!(
            "Low match ({score}/100). Missing key terms: {}. Tailor your resume before applying.",
            top_missing.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, Skills};

    fn rust_resume() -> ResumeData {
        ResumeData {
            experience: vec![Experience {
                id: 1,
                position: "Backend Engineer".into(),
                description: "Built payment services in Rust on PostgreSQL.".into(),
                ..Default::default()
            }],
            skills: Skills::Names(vec!["Kafka".into(), "C++".into()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_keywords_ranks_by_frequency() {
        let keywords = extract_keywords("Rust rust RUST postgresql kafka kafka and the team");
        assert_eq!(keywords[0], ("rust".to_string(), 3));
        assert_eq!(keywords[1], ("kafka".to_string(), 2));
        assert_eq!(keywords[2], ("postgresql".to_string(), 1));
        assert_eq!(keywords.len(), 3);
    }

    #[test]
    fn test_extract_keywords_keeps_symbolic_tokens() {
        let keywords = extract_keywords("Experience with C++, C# and Node.js required.");
        let names: Vec<&str> = keywords.iter().map(|(k, _)| k.as_str()).collect();
        assert!(names.contains(&"c++"));
        assert!(names.contains(&"c#"));
        assert!(names.contains(&"node.js"));
        assert!(!names.contains(&"required"));
    }

    #[test]
    fn test_extract_keywords_caps_list() {
        let jd: String = (0..40).map(|i| format!("skill{i:02} ")).collect();
        assert_eq!(extract_keywords(&jd).len(), MAX_KEYWORDS);
    }

    #[tokio::test]
    async fn test_full_match_scores_100() {
        let report = KeywordAtsScorer
            .score(&rust_resume(), "Rust PostgreSQL Kafka")
            .await
            .unwrap();
        assert_eq!(report.ats_score, 100);
        assert!(report.missing_keywords.is_empty());
        assert!(report.recommendation.starts_with("Strong match"));
    }

    #[tokio::test]
    async fn test_partial_match_weights_by_frequency() {
        // rust ×3 matched, kubernetes ×1 missing → 75
        let report = KeywordAtsScorer
            .score(&rust_resume(), "Rust Rust Rust Kubernetes")
            .await
            .unwrap();
        assert_eq!(report.ats_score, 75);
        assert_eq!(report.keyword_matches, vec!["rust"]);
        assert_eq!(report.missing_keywords, vec!["kubernetes"]);
        assert!(report.recommendation.contains("kubernetes"));
    }

    #[tokio::test]
    async fn test_empty_keyword_set_scores_zero() {
        let report = KeywordAtsScorer
            .score(&rust_resume(), "and the with")
            .await
            .unwrap();
        assert_eq!(report.ats_score, 0);
        assert!(report.recommendation.contains("No keywords"));
    }
}
