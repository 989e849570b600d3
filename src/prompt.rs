//! Prompt templates for each route

/// Maximum number of characters of user text embedded in a prompt
pub const MAX_TEXT_CHARS: usize = 30_000;

/// Return the first `max` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub(crate) fn summary_prompt(text: &str) -> String {
    format!(
        "Analyze the following research paper text and provide a structured summary. \
         Return JSON only with keys abstract (string), findings (string[]), \
         methodology (string), limitations (string). \
         Do not hallucinate. Use an academic tone.\n\nText: {}",
        truncate_chars(text, MAX_TEXT_CHARS)
    )
}

pub(crate) fn insight_prompt(text: &str) -> String {
    format!(
        "Extract deep technical insights from this research paper. \
         Focus on specific objectives, key concepts, results, and ultimate conclusions. \
         Return JSON only with keys keyConcepts (string[]), objectives (string[]), \
         results (string[]), conclusions (string[]).\n\nText: {}",
        truncate_chars(text, MAX_TEXT_CHARS)
    )
}

pub(crate) fn search_prompt(query: &str) -> String {
    format!(
        "Based on the user query \"{}\", generate a simulated search response \
         that looks like it came from a semantic search of research papers. \
         Provide a direct answer based on general knowledge about the potential topic.",
        truncate_chars(query, MAX_TEXT_CHARS)
    )
}

pub(crate) fn readiness_prompt(text: &str) -> String {
    format!(
        "Act as an experienced peer reviewer and evaluate whether the following research paper \
         is ready for publication. Return JSON only with keys novelty_score, technical_depth_score, \
         experimental_rigor_score, literature_coverage_score, publication_readiness_score \
         (integers from 0 to 100), strengths (string[]), weaknesses (string[]), \
         suggestions (string[]), suitable_venues (string[]) and final_verdict (string). \
         Be critical and specific.\n\nText: {}",
        truncate_chars(text, MAX_TEXT_CHARS)
    )
}
