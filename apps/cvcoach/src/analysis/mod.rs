//! Analysis client: turns CV text and an industry into a structured critique.
//!
//! The [`Analyzer`] trait is the seam the session controller depends on.
//! [`GeminiAnalyzer`] is the production backend; tests swap in a fake.
//!
//! `AppState` holds the controller, which holds an `Arc<dyn Analyzer>`.

pub mod prompts;

use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::llm_client::prompts::{FENCED_JSON_INSTRUCTION, SEARCH_GROUNDING_INSTRUCTION};
use crate::llm_client::{parse_fenced_json, GenerateContentResponse, LlmClient, LlmError};
use crate::models::analysis::{Analysis, AnalysisResult, GroundingSource};

use prompts::CV_ANALYSIS_PROMPT;

pub const CALL_FAILURE_MESSAGE: &str =
    "We couldn't analyze your CV. Please check your network or try again later.";
pub const STRUCTURED_FAILURE_MESSAGE: &str =
    "We couldn't get a structured analysis from the AI. Please try again.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Network, service or envelope failure, including an empty reply.
    #[error("analysis call failed: {0}")]
    Call(#[from] LlmError),

    /// The model answered, but not with a contract-conforming JSON object.
    #[error("could not get structured analysis: {0}")]
    Structured(String),
}

impl AnalysisError {
    /// The banner text for this failure. Internal detail stays in the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::Call(_) => CALL_FAILURE_MESSAGE,
            AnalysisError::Structured(_) => STRUCTURED_FAILURE_MESSAGE,
        }
    }
}

/// Produces a critique for one CV. Implementations must not cache: identical
/// inputs are expected to yield fresh (and possibly different) results.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, cv_text: &str, industry: &str) -> Result<Analysis, AnalysisError>;
}

/// Gemini-backed analyzer with Google Search grounding.
pub struct GeminiAnalyzer {
    llm: LlmClient,
}

impl GeminiAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, cv_text: &str, industry: &str) -> Result<Analysis, AnalysisError> {
        let prompt = build_analysis_prompt(industry, cv_text);

        let span = info_span!("analysis", industry = %industry, cv_chars = cv_text.len());
        async move {
            let response = self.llm.generate(&prompt).await?;
            if let Some(reason) = response.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
                debug!(finish_reason = reason, "model finished");
            }

            let text = response.text().ok_or(LlmError::EmptyContent)?;
            let result = parse_analysis(&text)?;
            let sources = collect_sources(&response);

            let analysis = Analysis::new(result, sources);
            info!(
                analysis_id = %analysis.id,
                overall_score = analysis.result.overall_score,
                sources = analysis.sources.len(),
                "CV analysis complete"
            );
            Ok(analysis)
        }
        .instrument(span)
        .await
    }
}

pub fn build_analysis_prompt(industry: &str, cv_text: &str) -> String {
    // CV text goes in last so nothing inside it is treated as a placeholder.
    CV_ANALYSIS_PROMPT
        .replace("{search_instruction}", SEARCH_GROUNDING_INSTRUCTION)
        .replace("{json_instruction}", FENCED_JSON_INSTRUCTION)
        .replace("{industry}", industry)
        .replace("{cv_text}", cv_text)
}

/// Parses the model's reply. Any deviation from the contract fails the whole
/// analysis; there is no field-by-field recovery.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let parsed: AnalysisResult = parse_fenced_json(text).map_err(|e| {
        warn!(raw_response = %text, "Failed to parse JSON from response: {e}");
        AnalysisError::Structured(e.to_string())
    })?;

    let result = parsed.validated().map_err(|e| {
        warn!(raw_response = %text, "Response JSON breaks the analysis contract: {e}");
        AnalysisError::Structured(e.to_string())
    })?;

    if !result.has_expected_trend_count() {
        warn!(trends = result.trends.len(), "model returned an unexpected number of trends");
    }

    Ok(result)
}

/// Web citations from the search tool. No metadata simply means no sources.
/// Only `http`/`https` links are kept since they end up as page links.
pub fn collect_sources(response: &GenerateContentResponse) -> Vec<GroundingSource> {
    response
        .grounding_chunks()
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.as_deref()?.trim();
            match Url::parse(uri) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => {
                    debug!(uri, "skipping grounding source with unsupported link");
                    return None;
                }
            }
            Some(GroundingSource {
                uri: uri.to_string(),
                title: web.title.clone(),
            })
        })
        .collect()
}
