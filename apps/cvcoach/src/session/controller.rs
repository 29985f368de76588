//! Application Controller — the only writer of the session.
//!
//! Work that suspends (text extraction, the analysis call) is split in two:
//! a `begin_*` step that checks guards and updates the session synchronously,
//! and a `run_*` step that does the slow part and applies the outcome. Each
//! `begin_*` bumps a generation counter; a `run_*` whose generation is no
//! longer current drops its result. That gives "latest upload wins" and lets
//! "start over" discard in-flight work.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::analysis::Analyzer;
use crate::extract::{self, DocumentKind, ExtractError};
use crate::session::state::Session;

pub const MISSING_INPUT_MESSAGE: &str = "Please upload your CV and enter your field of work.";

/// An accepted upload waiting for text extraction.
#[derive(Debug)]
pub struct UploadJob {
    generation: u64,
    file_name: String,
    kind: DocumentKind,
    bytes: Bytes,
}

/// The inputs of one analysis call, captured when it was triggered.
#[derive(Debug)]
pub struct AnalysisJob {
    generation: u64,
    cv_text: String,
    industry: String,
}

#[derive(Clone)]
pub struct Controller {
    session: Arc<RwLock<Session>>,
    analyzer: Arc<dyn Analyzer>,
}

impl Controller {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::default())),
            analyzer,
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Stores the industry field. Ignored while an analysis is pending.
    pub async fn set_industry(&self, industry: &str) {
        let mut session = self.session.write().await;
        if session.loading {
            debug!("analysis pending; keeping current industry");
            return;
        }
        session.industry = industry.to_string();
    }

    /// Classifies an upload and, if supported, marks the upload control busy.
    /// An unsupported file is rejected here and leaves the current file alone.
    /// Uploads are ignored while an analysis is pending.
    pub async fn begin_upload(
        &self,
        file_name: String,
        declared_mime: Option<&str>,
        bytes: Bytes,
    ) -> Option<UploadJob> {
        let mut session = self.session.write().await;

        if session.loading {
            debug!(file_name = %file_name, "analysis pending; ignoring upload");
            return None;
        }

        let Some(kind) = DocumentKind::detect(declared_mime, &file_name) else {
            warn!(file_name = %file_name, mime = ?declared_mime, "rejected unsupported upload");
            session.fail(ExtractError::UnsupportedType.to_string());
            return None;
        };

        if let Some(pending) = &session.parsing_file {
            debug!(superseded = %pending, "new upload replaces pending extraction");
        }

        session.upload_generation += 1;
        session.clear_file();
        session.error = None;
        session.parsing_file = Some(file_name.clone());

        Some(UploadJob {
            generation: session.upload_generation,
            file_name,
            kind,
            bytes,
        })
    }

    /// Reports an upload that never got as far as classification.
    pub async fn reject_upload(&self, err: ExtractError) {
        let mut session = self.session.write().await;
        if session.loading {
            debug!("analysis pending; ignoring rejected upload: {err}");
            return;
        }
        warn!("upload rejected: {err}");
        session.fail(err.to_string());
    }

    /// Extracts the text on the blocking pool and stores the outcome.
    pub async fn run_upload(&self, job: UploadJob) {
        let UploadJob {
            generation,
            file_name,
            kind,
            bytes,
        } = job;

        let outcome = tokio::task::spawn_blocking(move || extract::extract_text(kind, &bytes))
            .await
            .unwrap_or_else(|e| {
                error!("extraction task failed: {e}");
                Err(ExtractError::corrupted(kind))
            });

        let mut session = self.session.write().await;
        if session.upload_generation != generation {
            debug!(file_name = %file_name, "discarding superseded extraction result");
            return;
        }
        session.parsing_file = None;

        match outcome {
            Ok(text) => {
                info!(file_name = %file_name, kind = kind.label(), chars = text.chars().count(), "CV text extracted");
                session.cv_text = text;
                session.file_name = Some(file_name);
                session.error = None;
            }
            Err(e) => {
                warn!(file_name = %file_name, kind = kind.label(), "File parsing error: {e}");
                session.fail(e.to_string());
                session.clear_file();
            }
        }
    }

    pub fn spawn_upload(&self, job: UploadJob) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move { controller.run_upload(job).await })
    }

    /// Clears the uploaded file and cancels a pending extraction. A computed
    /// analysis stays on screen.
    pub async fn remove_file(&self) {
        let mut session = self.session.write().await;
        if session.loading {
            debug!("analysis pending; ignoring file removal");
            return;
        }
        if session.parsing_file.take().is_some() {
            session.upload_generation += 1;
        }
        session.clear_file();
    }

    /// Stores the industry and applies the analyze guard under one lock.
    /// Returns the job to run, or `None` when no call should be made.
    pub async fn begin_analysis(&self, industry: &str) -> Option<AnalysisJob> {
        let mut session = self.session.write().await;

        if session.loading {
            debug!("analysis already pending; ignoring trigger");
            return None;
        }
        session.industry = industry.to_string();
        if !session.can_analyze() {
            session.fail(MISSING_INPUT_MESSAGE);
            return None;
        }

        session.analysis_generation += 1;
        session.error = None;
        session.analysis = None;
        session.loading = true;

        Some(AnalysisJob {
            generation: session.analysis_generation,
            cv_text: session.cv_text.clone(),
            industry: session.industry.trim().to_string(),
        })
    }

    /// Performs the remote call and stores the result or the failure message.
    pub async fn run_analysis(&self, job: AnalysisJob) {
        let outcome = self.analyzer.analyze(&job.cv_text, &job.industry).await;

        let mut session = self.session.write().await;
        if session.analysis_generation != job.generation {
            debug!("discarding superseded analysis result");
            return;
        }
        session.loading = false;

        match outcome {
            Ok(analysis) => {
                session.error = None;
                session.analysis = Some(analysis);
            }
            Err(e) => {
                error!("CV analysis failed: {e}");
                session.fail(e.user_message());
            }
        }
    }

    pub fn spawn_analysis(&self, job: AnalysisJob) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move { controller.run_analysis(job).await })
    }

    /// Starts a fresh flow. In-flight results arriving later are discarded.
    pub async fn reset(&self) {
        let mut session = self.session.write().await;
        let upload_generation = session.upload_generation + 1;
        let analysis_generation = session.analysis_generation + 1;
        *session = Session {
            upload_generation,
            analysis_generation,
            ..Session::default()
        };
        info!("session reset");
    }
}
