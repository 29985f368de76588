//! Askama template structs. Each one maps to a file under `templates/`.

use askama::Template;

use super::view::{PageView, UploadControl};
use crate::session::Session;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub view: &'a PageView,
}

/// Renders the whole page for one session snapshot.
pub fn render_page(session: &Session, year: i32) -> Result<String, askama::Error> {
    let view = PageView::from_session(session, year);
    IndexTemplate { view: &view }.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::{sample_result, sample_sources};
    use crate::models::analysis::Analysis;

    fn position(html: &str, needle: &str) -> usize {
        html.find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?} in page"))
    }

    #[test]
    fn test_idle_page() {
        let html = render_page(&Session::default(), 2026).unwrap();

        assert!(html.contains("How it works"));
        assert!(html.contains("name=\"cv\""));
        assert!(html.contains("2026"));
        assert!(!html.contains("id=\"results\""));
        assert!(!html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("id=\"analyze-button\" disabled"));
    }

    #[test]
    fn test_empty_upload_control_is_a_dropzone() {
        let session = Session {
            industry: "Banking".to_string(),
            ..Default::default()
        };
        let html = render_page(&session, 2026).unwrap();
        assert!(html.contains("id=\"dropzone\""));
        assert!(html.contains("Drop your CV here"));
        assert!(html.contains("addEventListener(\"drop\""));
        assert!(html.contains("name=\"industry\" id=\"upload-industry\" value=\"Banking\""));
    }

    #[test]
    fn test_analyze_button_enabled_once_file_is_ready() {
        let session = Session {
            cv_text: "cv".to_string(),
            file_name: Some("cv.txt".to_string()),
            ..Default::default()
        };
        let html = render_page(&session, 2026).unwrap();
        assert!(!html.contains("id=\"analyze-button\" disabled"));
        assert!(!html.contains("id=\"dropzone\""));
    }

    #[test]
    fn test_error_banner() {
        let session = Session {
            error: Some("Please upload your CV and enter your field of work.".to_string()),
            ..Default::default()
        };
        let html = render_page(&session, 2026).unwrap();
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("Please upload your CV and enter your field of work."));
    }

    #[test]
    fn test_parsing_page_refreshes() {
        let session = Session {
            parsing_file: Some("resume.pdf".to_string()),
            ..Default::default()
        };
        let html = render_page(&session, 2026).unwrap();
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("Reading resume.pdf"));
    }

    #[test]
    fn test_loading_page_hides_results() {
        let session = Session {
            cv_text: "cv".to_string(),
            file_name: Some("cv.txt".to_string()),
            industry: "Banking".to_string(),
            loading: true,
            ..Default::default()
        };
        let html = render_page(&session, 2026).unwrap();
        assert!(html.contains("Analyzing your CV"));
        assert!(!html.contains("id=\"results\""));
    }

    #[test]
    fn test_results_render_in_order() {
        let session = Session {
            cv_text: "cv".to_string(),
            file_name: Some("cv.txt".to_string()),
            industry: "Banking".to_string(),
            analysis: Some(Analysis::new(sample_result(), sample_sources())),
            ..Default::default()
        };
        let html = render_page(&session, 2026).unwrap();

        let score = position(&html, "id=\"overall-score\"");
        let bars = position(&html, "id=\"score-breakdown\"");
        let summary = position(&html, "id=\"summary\"");
        let key = position(&html, "id=\"key-improvement\"");
        let trends = position(&html, "id=\"trends\"");
        let sources = position(&html, "id=\"sources\"");
        assert!(score < bars && bars < summary && summary < key && key < trends && trends < sources);

        assert!(html.contains(">78<"));
        assert!(html.contains("Quantify your achievements with numbers."));
        assert!(html.contains("Hiring Report"));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
    }

    #[test]
    fn test_sources_section_omitted_when_empty() {
        let session = Session {
            cv_text: "cv".to_string(),
            file_name: Some("cv.txt".to_string()),
            industry: "Banking".to_string(),
            analysis: Some(Analysis::new(sample_result(), vec![])),
            ..Default::default()
        };
        let html = render_page(&session, 2026).unwrap();
        assert!(html.contains("id=\"trends\""));
        assert!(!html.contains("id=\"sources\""));
    }
}
