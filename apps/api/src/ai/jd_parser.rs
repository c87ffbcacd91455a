//! JD Parser — extracts skills, requirements, a summary and ATS keywords from a
//! raw job description.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::prompts::{JD_PARSE_PROMPT_TEMPLATE, JD_PARSE_ROLE};
use crate::errors::AppError;
use crate::llm_client::json::parse_json;
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::CompletionProvider;

pub const JOB_DESCRIPTION_REQUIRED: &str = "Job description is required";

/// Structured output of job-description parsing. Sections the model leaves out
/// come back empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedJobDescription {
    pub skills: Vec<String>,
    pub requirements: Vec<String>,
    pub summary: String,
    pub keywords: Vec<String>,
}

/// Parses a job description using the LLM.
pub async fn parse_job_description(
    llm: &dyn CompletionProvider,
    job_description: &str,
) -> Result<ParsedJobDescription, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::MissingField(JOB_DESCRIPTION_REQUIRED.to_string()));
    }

    let prompt = JD_PARSE_PROMPT_TEMPLATE.replace("{job_description}", job_description.trim());
    let text = llm.complete(&prompt, &system_prompt(JD_PARSE_ROLE)).await?;
    let parsed: ParsedJobDescription = parse_json(&text)?;

    info!(
        "Parsed job description: {} skills, {} requirements, {} keywords",
        parsed.skills.len(),
        parsed.requirements.len(),
        parsed.keywords.len()
    );
    Ok(parsed)
}
