//! View model for the page. Built from a session snapshot by a pure
//! function; the template only reads from it.

use std::f32::consts::PI;

use crate::models::analysis::Analysis;
use crate::session::Session;

pub const GREEN: &str = "#008751";
pub const AMBER: &str = "#F59E0B";
pub const RED: &str = "#EF4444";

const GAUGE_RADIUS: f32 = 52.0;

pub fn score_color(score: u8) -> &'static str {
    if score >= 80 {
        GREEN
    } else if score >= 50 {
        AMBER
    } else {
        RED
    }
}

/// The three faces of the upload control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadControl {
    Empty,
    Parsing(String),
    Ready(String),
}

#[derive(Debug, Clone)]
pub struct PageView {
    pub industry: String,
    pub upload: UploadControl,
    pub has_file: bool,
    /// Server-side disable state of the analyze button. A blank industry is
    /// left to the script and the controller guard, so the page works
    /// without JavaScript.
    pub analyze_disabled: bool,
    pub loading: bool,
    /// Reload the page periodically until pending work finishes.
    pub auto_refresh: bool,
    pub error: Option<String>,
    pub results: Option<ResultsView>,
    pub year: i32,
}

#[derive(Debug, Clone)]
pub struct ResultsView {
    pub overall_score: u8,
    pub overall_color: &'static str,
    pub gauge: Gauge,
    pub bars: Vec<ScoreBarView>,
    pub summary: String,
    pub key_improvement: String,
    pub trends: Vec<String>,
    pub sources: Vec<SourceLink>,
    pub analyzed_at: String,
}

#[derive(Debug, Clone)]
pub struct ScoreBarView {
    pub label: &'static str,
    pub score: u8,
    pub feedback: String,
    pub color: &'static str,
}

#[derive(Debug, Clone)]
pub struct SourceLink {
    pub href: String,
    pub text: String,
}

/// SVG stroke geometry for the circular score indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub radius: f32,
    pub circumference: f32,
    pub offset: f32,
}

impl Gauge {
    pub fn for_score(score: u8) -> Self {
        let circumference = 2.0 * PI * GAUGE_RADIUS;
        let filled = f32::from(score.min(100)) / 100.0;
        Self {
            radius: GAUGE_RADIUS,
            circumference,
            offset: circumference * (1.0 - filled),
        }
    }

    pub fn dasharray(&self) -> String {
        format!("{:.2}", self.circumference)
    }

    pub fn dashoffset(&self) -> String {
        format!("{:.2}", self.offset)
    }
}

impl PageView {
    pub fn from_session(session: &Session, year: i32) -> Self {
        let upload = match (&session.parsing_file, &session.file_name) {
            (Some(parsing), _) => UploadControl::Parsing(parsing.clone()),
            (None, Some(name)) if session.has_file() => UploadControl::Ready(name.clone()),
            _ => UploadControl::Empty,
        };

        let results = match &session.analysis {
            Some(analysis) if !session.loading => Some(ResultsView::from_analysis(analysis)),
            _ => None,
        };

        Self {
            industry: session.industry.clone(),
            upload,
            has_file: session.has_file(),
            analyze_disabled: !session.has_file() || session.loading,
            loading: session.loading,
            auto_refresh: session.is_busy(),
            error: session.error.clone(),
            results,
            year,
        }
    }
}

impl ResultsView {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let result = &analysis.result;
        Self {
            overall_score: result.overall_score,
            overall_color: score_color(result.overall_score),
            gauge: Gauge::for_score(result.overall_score),
            bars: result
                .score_breakdown
                .iter()
                .map(|b| ScoreBarView {
                    label: b.area.label(),
                    score: b.score,
                    feedback: b.feedback.clone(),
                    color: score_color(b.score),
                })
                .collect(),
            summary: result.summary.clone(),
            key_improvement: result.key_improvement.clone(),
            trends: result.trends.clone(),
            sources: analysis
                .sources
                .iter()
                .map(|s| SourceLink {
                    href: s.uri.clone(),
                    text: s.display_title().to_string(),
                })
                .collect(),
            analyzed_at: analysis.analyzed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::{sample_result, sample_sources};

    fn session_with_analysis() -> Session {
        Session {
            cv_text: "cv".to_string(),
            file_name: Some("cv.pdf".to_string()),
            industry: "Law".to_string(),
            analysis: Some(Analysis::new(sample_result(), sample_sources())),
            ..Default::default()
        }
    }

    #[test]
    fn test_score_color_thresholds() {
        assert_eq!(score_color(100), GREEN);
        assert_eq!(score_color(80), GREEN);
        assert_eq!(score_color(79), AMBER);
        assert_eq!(score_color(50), AMBER);
        assert_eq!(score_color(49), RED);
        assert_eq!(score_color(0), RED);
    }

    #[test]
    fn test_gauge_geometry() {
        let full = Gauge::for_score(100);
        assert!(full.offset.abs() < 0.01);

        let empty = Gauge::for_score(0);
        assert!((empty.offset - empty.circumference).abs() < 0.01);

        let half = Gauge::for_score(50);
        assert!((half.offset - half.circumference / 2.0).abs() < 0.01);
        assert_eq!(half.dasharray(), "326.73");
    }

    #[test]
    fn test_upload_control_states() {
        let mut session = Session::default();
        assert_eq!(PageView::from_session(&session, 2026).upload, UploadControl::Empty);

        session.parsing_file = Some("cv.pdf".to_string());
        assert_eq!(
            PageView::from_session(&session, 2026).upload,
            UploadControl::Parsing("cv.pdf".to_string())
        );

        session.parsing_file = None;
        session.cv_text = "text".to_string();
        session.file_name = Some("cv.pdf".to_string());
        assert_eq!(
            PageView::from_session(&session, 2026).upload,
            UploadControl::Ready("cv.pdf".to_string())
        );
    }

    #[test]
    fn test_results_hidden_while_loading() {
        let mut session = session_with_analysis();
        assert!(PageView::from_session(&session, 2026).results.is_some());

        session.loading = true;
        let view = PageView::from_session(&session, 2026);
        assert!(view.results.is_none());
        assert!(view.auto_refresh);
        assert!(view.analyze_disabled);
    }

    #[test]
    fn test_analyze_button_enabled_with_file_and_blank_industry() {
        let session = Session {
            cv_text: "cv".to_string(),
            file_name: Some("cv.txt".to_string()),
            ..Default::default()
        };
        assert!(!session.can_analyze());
        assert!(!PageView::from_session(&session, 2026).analyze_disabled);

        assert!(PageView::from_session(&Session::default(), 2026).analyze_disabled);
    }

    #[test]
    fn test_results_view_maps_analysis() {
        let view = PageView::from_session(&session_with_analysis(), 2026);
        let results = view.results.unwrap();

        assert_eq!(results.overall_score, 78);
        assert_eq!(results.overall_color, AMBER);
        let labels: Vec<&str> = results.bars.iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            ["Clarity & Formatting", "Impact & Keywords", "Experience Relevancy"]
        );
        assert_eq!(results.bars[2].color, GREEN);
        assert_eq!(results.sources[0].text, "Hiring Report");
        assert_eq!(results.sources[1].text, "https://example.org/salary-survey");
        assert!(results.analyzed_at.ends_with("UTC"));
    }
}
