use crate::config::Config;
use crate::session::Controller;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Owner of the single session. Handlers only talk to it, never to the
    /// extractor or the analysis client directly.
    pub controller: Controller,
}
