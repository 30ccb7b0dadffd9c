use crate::catalog::normalize::truncate_chars;
use crate::retrieval::Candidate;

use super::config::RerankerConfig;

const SYSTEM_PROMPT: &str = "You are an expert HR assessment recommender. \
You select assessments from a fixed candidate list and answer with JSON only.";

/// The two messages sent on the single model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RerankPrompt {
    pub system: String,
    pub user: String,
}

/// One compact line per candidate: id, name, test types and a description preview.
pub fn candidate_line(candidate: &Candidate, preview_chars: usize) -> String {
    let record = &candidate.record;
    format!(
        "ID {}: {} | Types: {} | Desc: {}...",
        candidate.local_id,
        record.name,
        record.test_types.join(", "),
        truncate_chars(&record.description, preview_chars)
    )
}

pub fn build_prompt(query: &str, candidates: &[Candidate], config: &RerankerConfig) -> RerankPrompt {
    let lines = candidates
        .iter()
        .map(|c| candidate_line(c, config.preview_chars))
        .collect::<Vec<_>>()
        .join("\n");

    let user = format!(
        r#"USER QUERY: "{query}"

TASK:
Select the {min} to {max} most relevant assessments from the candidates below, most relevant first.

RULES:
1. Relevance: only choose assessments that match the query's requirements.
2. Balance: if the query asks for BOTH technical skills (coding, tools, domain knowledge) AND behavioral traits (leadership, personality, teamwork), the selection MUST include "Knowledge & Skills" AND "Personality & Behavior" assessments.
   If the query is purely technical, focus on "Knowledge & Skills". If it is purely behavioral, focus on "Personality & Behavior" or "Situational Judgement".
3. Only use IDs listed below.

CANDIDATES:
{lines}

OUTPUT FORMAT:
Return ONLY a JSON array of the integer IDs of the selected assessments, in order of relevance.
Example: [12, 5, 3, 8, 1]"#,
        query = query.trim(),
        min = config.min_selection,
        max = config.max_selection,
    );

    RerankPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
