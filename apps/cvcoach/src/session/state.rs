use crate::models::analysis::Analysis;

/// Where the session currently stands. Derived from [`Session`], never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Parsing,
    FileReady,
    Loading,
    Success,
    Failed,
}

/// Everything the page shows. Owned by the controller; renderers only ever
/// see a snapshot.
///
/// Invariant: `analysis` is only `Some` while `loading` is false and `error`
/// is `None`. All mutation goes through the controller, which keeps it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub cv_text: String,
    pub file_name: Option<String>,
    pub industry: String,
    pub loading: bool,
    pub error: Option<String>,
    pub analysis: Option<Analysis>,
    /// Name of the upload whose text is being extracted right now.
    pub parsing_file: Option<String>,
    pub(crate) upload_generation: u64,
    pub(crate) analysis_generation: u64,
}

impl Session {
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.parsing_file.is_some() {
            SessionPhase::Parsing
        } else if self.error.is_some() {
            SessionPhase::Failed
        } else if self.analysis.is_some() {
            SessionPhase::Success
        } else if self.has_file() {
            SessionPhase::FileReady
        } else {
            SessionPhase::Idle
        }
    }

    pub fn has_file(&self) -> bool {
        !self.cv_text.is_empty()
    }

    /// The analyze guard: text present, industry present, nothing pending.
    pub fn can_analyze(&self) -> bool {
        self.has_file() && !self.industry.trim().is_empty() && !self.loading
    }

    /// True while a parse or an analysis is in flight.
    pub fn is_busy(&self) -> bool {
        self.loading || self.parsing_file.is_some()
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.analysis = None;
    }

    pub(crate) fn clear_file(&mut self) {
        self.cv_text.clear();
        self.file_name = None;
    }
}
