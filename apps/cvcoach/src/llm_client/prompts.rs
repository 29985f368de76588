// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// Gemini ignores response schemas when the search tool is enabled, so JSON
/// output has to be requested in the prompt itself.
pub const FENCED_JSON_INSTRUCTION: &str = "\
    Your entire response MUST be a single JSON object string that starts with ```json \
    and ends with ```. Do not add any text before or after the JSON block.";

/// Directs the model to ground factual claims in live search results.
pub const SEARCH_GROUNDING_INSTRUCTION: &str = "\
    Use Google Search to find the latest information before you answer. \
    Base every claim about the current market on what your search returns.";
