use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_SCORE: u8 = 100;
pub const MIN_TRENDS: usize = 3;
pub const MAX_TRENDS: usize = 5;

/// The three fixed categories of the score breakdown, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreArea {
    #[serde(rename = "Clarity & Formatting")]
    ClarityFormatting,
    #[serde(rename = "Impact & Keywords")]
    ImpactKeywords,
    #[serde(rename = "Experience Relevancy")]
    ExperienceRelevancy,
}

impl ScoreArea {
    pub const ALL: [ScoreArea; 3] = [
        ScoreArea::ClarityFormatting,
        ScoreArea::ImpactKeywords,
        ScoreArea::ExperienceRelevancy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScoreArea::ClarityFormatting => "Clarity & Formatting",
            ScoreArea::ImpactKeywords => "Impact & Keywords",
            ScoreArea::ExperienceRelevancy => "Experience Relevancy",
        }
    }
}

impl fmt::Display for ScoreArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub area: ScoreArea,
    pub score: u8,
    pub feedback: String,
}

/// The structured critique returned by the model. Keys match the JSON
/// contract given to the model exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub score_breakdown: Vec<ScoreBreakdown>,
    pub summary: String,
    pub key_improvement: String,
    pub trends: Vec<String>,
}

/// A parsed response that is valid JSON but breaks the contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("{field} score {score} is outside 0-{MAX_SCORE}")]
    ScoreOutOfRange { field: String, score: u8 },

    #[error("expected exactly 3 score breakdown entries, got {0}")]
    BreakdownCount(usize),

    #[error("score breakdown has no entry for {0}")]
    MissingArea(ScoreArea),
}

impl AnalysisResult {
    /// Checks the invariants serde cannot express and puts the breakdown
    /// into canonical [`ScoreArea::ALL`] order.
    pub fn validated(mut self) -> Result<Self, SchemaViolation> {
        if self.overall_score > MAX_SCORE {
            return Err(SchemaViolation::ScoreOutOfRange {
                field: "overallScore".to_string(),
                score: self.overall_score,
            });
        }

        if self.score_breakdown.len() != ScoreArea::ALL.len() {
            return Err(SchemaViolation::BreakdownCount(self.score_breakdown.len()));
        }
        if let Some(missing) = ScoreArea::ALL
            .into_iter()
            .find(|area| !self.score_breakdown.iter().any(|b| b.area == *area))
        {
            return Err(SchemaViolation::MissingArea(missing));
        }
        if let Some(entry) = self.score_breakdown.iter().find(|b| b.score > MAX_SCORE) {
            return Err(SchemaViolation::ScoreOutOfRange {
                field: entry.area.to_string(),
                score: entry.score,
            });
        }

        self.score_breakdown.sort_by_key(|b| b.area);
        Ok(self)
    }

    pub fn has_expected_trend_count(&self) -> bool {
        (MIN_TRENDS..=MAX_TRENDS).contains(&self.trends.len())
    }
}

/// A web page the model cited while searching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: Option<String>,
}

impl GroundingSource {
    /// The link text: the page title when the search tool supplied one.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.uri,
        }
    }
}

/// One completed analysis: the critique plus the sources it cites.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub id: Uuid,
    pub result: AnalysisResult,
    pub sources: Vec<GroundingSource>,
    pub analyzed_at: DateTime<Utc>,
}

impl Analysis {
    pub fn new(result: AnalysisResult, sources: Vec<GroundingSource>) -> Self {
        Self {
            id: Uuid::new_v4(),
            result,
            sources,
            analyzed_at: Utc::now(),
        }
    }
}
