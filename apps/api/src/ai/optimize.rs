//! Resume optimization — one OpenAI call, model JSON returned as-is.

use serde_json::Value;
use tracing::info;

use crate::ai::prompts::{OPTIMIZE_PROMPT_TEMPLATE, OPTIMIZE_ROLE};
use crate::errors::AppError;
use crate::llm_client::json::extract_json;
use crate::llm_client::prompts::{system_prompt, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::CompletionProvider;
use crate::models::resume::ResumeData;

pub fn build_prompt(resume: &ResumeData) -> Result<String, AppError> {
    let resume_json = serde_json::to_string_pretty(resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))?;
    Ok(format!(
        "{}\n\n{NO_FABRICATION_INSTRUCTION}",
        OPTIMIZE_PROMPT_TEMPLATE.replace("{resume_json}", &resume_json)
    ))
}

/// Sends the resume to the model and returns its JSON answer.
/// An answer that cannot be parsed as JSON fails the request.
pub async fn optimize_resume(
    llm: &dyn CompletionProvider,
    resume: &ResumeData,
) -> Result<Value, AppError> {
    let prompt = build_prompt(resume)?;
    let text = llm.complete(&prompt, &system_prompt(OPTIMIZE_ROLE)).await?;
    let value = extract_json(&text)?;
    info!("Resume optimization returned via {}", llm.name());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalInfo;
    use crate::testing::StubProvider;
    use serde_json::json;

    fn resume() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_embeds_resume_json() {
        let prompt = build_prompt(&resume()).unwrap();
        assert!(prompt.contains("\"fullName\": \"Ada Lovelace\""));
        assert!(!prompt.contains("{resume_json}"));
    }

    #[tokio::test]
    async fn test_returns_model_json() {
        let llm = StubProvider::text(r#"{"summary": "Sharper summary"}"#);
        let value = optimize_resume(&llm, &resume()).await.unwrap();
        assert_eq!(value, json!({ "summary": "Sharper summary" }));
    }

    #[tokio::test]
    async fn test_unparseable_answer_fails() {
        let llm = StubProvider::text("Here are some thoughts about your resume.");
        let err = optimize_resume(&llm, &resume()).await.unwrap_err();
        assert!(matches!(err, AppError::UnparseableResponse(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let llm = StubProvider::status(503, "Service Unavailable");
        let err = optimize_resume(&llm, &resume()).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(msg) if msg.contains("Service Unavailable")));
    }
}
