// Prompt templates for the AI operations. Placeholders in `{braces}` are
// replaced before sending.

pub const OPTIMIZE_ROLE: &str = "You are an expert resume writer and career coach.";

/// Replace `{resume_json}` before sending.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Optimize the following resume for clarity, impact and ATS compatibility.

Resume (JSON):
{resume_json}

Return a JSON object with this schema:
{
  "summary": "an improved professional summary",
  "experience": [
    { "id": 0, "description": "improved description", "achievements": ["stronger bullet"] }
  ],
  "skills": ["skill"],
  "improvements": ["short note describing each change"]
}

Keep every experience "id" exactly as given so changes can be merged back."#;

pub const SUGGESTIONS_ROLE: &str =
    "You are an applicant tracking system expert who reviews resumes against job descriptions.";

/// Replace `{resume_json}` and `{job_description}` before sending.
pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"Review this resume and suggest concrete edits.

Resume (JSON):
{resume_json}

Target job description:
{job_description}

Return a JSON object with this EXACT schema:
{
  "suggestions": [
    {
      "id": "1",
      "section": "experience | education | skills | summary | projects",
      "field": "the field being changed",
      "original": "current text",
      "suggested": "replacement text",
      "reason": "why this helps",
      "confidence": 0.85
    }
  ],
  "atsScore": 0,
  "keywordMatches": ["keyword present in the resume"],
  "missingKeywords": ["important keyword absent from the resume"]
}

"confidence" is between 0 and 1. "atsScore" is an integer from 0 to 100."#;

/// Used in place of a job description when none was supplied.
pub const GENERAL_REVIEW: &str =
    "None provided. Judge the resume against general best practices for its stated title.";

pub const JD_PARSE_ROLE: &str = "You are an expert job description analyst.";

/// Replace `{job_description}` before sending.
pub const JD_PARSE_PROMPT_TEMPLATE: &str = r#"Extract structured information from this job description:

{job_description}

Return a JSON object with this EXACT schema:
{
  "skills": ["technical and soft skills asked for"],
  "requirements": ["each explicit requirement, one per entry"],
  "summary": "two sentence summary of the role",
  "keywords": ["terms an applicant tracking system would match on"]
}"#;
