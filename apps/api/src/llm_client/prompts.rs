// Shared prompt fragments. Each AI operation keeps its own templates in ai::prompts.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every prompt that rewrites resume content.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Only rephrase, reorder or tighten what the candidate already provided. \
    Do NOT invent employers, dates, degrees, certifications or metrics.";

/// Joins a role description with the JSON-only fragment.
pub fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}
