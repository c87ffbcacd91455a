//! AI suggestions via Gemini, with a fixed fallback.
//!
//! Callers always receive a well-shaped report: if the upstream call fails, or
//! its answer is not JSON matching the report schema, the fallback report is
//! returned instead and the failure is logged.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai::prompts::{GENERAL_REVIEW, SUGGESTIONS_PROMPT_TEMPLATE, SUGGESTIONS_ROLE};
use crate::llm_client::json::parse_json;
use crate::llm_client::prompts::{system_prompt, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::CompletionProvider;
use crate::models::resume::ResumeData;

pub const FALLBACK_ATS_SCORE: u8 = 75;
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(default)]
    pub id: String,
    pub section: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub original: String,
    pub suggested: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    FALLBACK_CONFIDENCE
}

/// Response body of the Gemini optimize endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionReport {
    pub suggestions: Vec<Suggestion>,
    pub ats_score: u8,
    pub keyword_matches: Vec<String>,
    pub missing_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Shape the model is asked to produce. Scores arrive as arbitrary numbers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReport {
    suggestions: Vec<Suggestion>,
    ats_score: f64,
    #[serde(default)]
    keyword_matches: Vec<String>,
    #[serde(default)]
    missing_keywords: Vec<String>,
}

impl SuggestionReport {
    /// The fixed report returned when no usable model answer is available.
    pub fn fallback(resume: &ResumeData) -> Self {
        Self {
            suggestions: vec![Suggestion {
                id: "fallback-1".to_string(),
                section: "summary".to_string(),
                field: "summary".to_string(),
                original: resume.personal_info.summary.clone(),
                suggested: "Open with a concise professional summary that states your role, \
                    years of experience and the two or three achievements most relevant \
                    to the position."
                    .to_string(),
                reason: "A focused summary helps both recruiters and applicant tracking \
                    systems identify your fit quickly."
                    .to_string(),
                confidence: FALLBACK_CONFIDENCE,
            }],
            ats_score: FALLBACK_ATS_SCORE,
            keyword_matches: Vec::new(),
            missing_keywords: Vec::new(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    fn from_model(model: ModelReport) -> Self {
        let suggestions = model
            .suggestions
            .into_iter()
            .filter(|s| !s.suggested.trim().is_empty())
            .enumerate()
            .map(|(i, mut s)| {
                if s.id.trim().is_empty() {
                    s.id = (i + 1).to_string();
                }
                s.confidence = if s.confidence.is_finite() {
                    s.confidence.clamp(0.0, 1.0)
                } else {
                    FALLBACK_CONFIDENCE
                };
                s
            })
            .collect();

        let ats_score = if model.ats_score.is_finite() {
            model.ats_score.round().clamp(0.0, 100.0) as u8
        } else {
            FALLBACK_ATS_SCORE
        };

        Self {
            suggestions,
            ats_score,
            keyword_matches: model.keyword_matches,
            missing_keywords: model.missing_keywords,
            error: None,
        }
    }
}

pub fn build_prompt(resume: &ResumeData, job_description: Option<&str>) -> String {
    let resume_json = serde_json::to_string_pretty(resume).unwrap_or_else(|_| "{}".to_string());
    let job_description = job_description
        .map(str::trim)
        .filter(|jd| !jd.is_empty())
        .unwrap_or(GENERAL_REVIEW);

    format!(
        "{}\n\n{NO_FABRICATION_INSTRUCTION}",
        SUGGESTIONS_PROMPT_TEMPLATE
            .replace("{resume_json}", &resume_json)
            .replace("{job_description}", job_description)
    )
}

/// Asks the model for edit suggestions. Never fails; see module docs.
pub async fn generate_suggestions(
    llm: &dyn CompletionProvider,
    resume: &ResumeData,
    job_description: Option<&str>,
) -> SuggestionReport {
    let prompt = build_prompt(resume, job_description);

    let text = match llm.complete(&prompt, &system_prompt(SUGGESTIONS_ROLE)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("{} suggestion call failed, using fallback: {e}", llm.name());
            return SuggestionReport::fallback(resume);
        }
    };

    match parse_json::<ModelReport>(&text) {
        Ok(model) => {
            let report = SuggestionReport::from_model(model);
            info!(
                "Generated {} suggestion(s), ATS score {}",
                report.suggestions.len(),
                report.ats_score
            );
            report
        }
        Err(e) => {
            warn!("{} suggestion answer unusable, using fallback: {e}", llm.name());
            SuggestionReport::fallback(resume)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubProvider;

    #[tokio::test]
    async fn test_non_json_answer_yields_fallback() {
        let llm = StubProvider::text("Your resume looks great overall!");
        let report = generate_suggestions(&llm, &ResumeData::default(), None).await;
        assert_eq!(report, SuggestionReport::fallback(&ResumeData::default()));
        assert_eq!(report.ats_score, 75);
        assert!(report.keyword_matches.is_empty());
        assert!(report.missing_keywords.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_yields_fallback() {
        let llm = StubProvider::status(500, "Internal Server Error");
        let report = generate_suggestions(&llm, &ResumeData::default(), Some("Rust dev")).await;
        assert_eq!(report.ats_score, FALLBACK_ATS_SCORE);
        assert_eq!(report.suggestions[0].confidence, FALLBACK_CONFIDENCE);
        assert!(report.error.is_none());
    }

    #[tokio::test]
    async fn test_json_with_wrong_schema_yields_fallback() {
        let llm = StubProvider::text(r#"{"advice": "add more keywords"}"#);
        let report = generate_suggestions(&llm, &ResumeData::default(), None).await;
        assert_eq!(report.ats_score, FALLBACK_ATS_SCORE);
    }

    #[tokio::test]
    async fn test_valid_answer_is_normalized() {
        let llm = StubProvider::text(
            r#"Here you go:
            {
              "suggestions": [
                {"section": "skills", "suggested": "Add Kubernetes", "confidence": 1.7},
                {"section": "summary", "suggested": "   "},
                {"id": "x", "section": "experience", "suggested": "Quantify impact"}
              ],
              "atsScore": 82.6,
              "keywordMatches": ["Rust"],
              "missingKeywords": ["Kubernetes"]
            }"#,
        );
        let report = generate_suggestions(&llm, &ResumeData::default(), Some("k8s")).await;

        assert_eq!(report.ats_score, 83);
        assert_eq!(report.suggestions.len(), 2);
        assert_eq!(report.suggestions[0].id, "1");
        assert_eq!(report.suggestions[0].confidence, 1.0);
        assert_eq!(report.suggestions[1].id, "x");
        assert_eq!(report.suggestions[1].confidence, FALLBACK_CONFIDENCE);
        assert_eq!(report.keyword_matches, vec!["Rust"]);
        assert_eq!(report.missing_keywords, vec!["Kubernetes"]);
    }

    #[test]
    fn test_prompt_without_job_description_uses_general_review() {
        let prompt = build_prompt(&ResumeData::default(), Some("   "));
        assert!(prompt.contains(GENERAL_REVIEW));
    }

    #[test]
    fn test_fallback_serializes_camel_case_without_error() {
        let value = serde_json::to_value(SuggestionReport::fallback(&ResumeData::default())).unwrap();
        assert_eq!(value["atsScore"], 75);
        assert_eq!(value["keywordMatches"], serde_json::json!([]));
        assert!(value.get("error").is_none());
    }
}
