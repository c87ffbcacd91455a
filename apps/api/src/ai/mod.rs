// AI-assisted resume features.
// Optimize, suggestion and JD parsing calls go through llm_client; ATS scoring is local.

pub mod ats;
pub mod handlers;
pub mod jd_parser;
pub mod optimize;
pub mod prompts;
pub mod suggestions;
