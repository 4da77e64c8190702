use std::sync::Arc;

use crate::extraction::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; owns the annotator and keyword vocabulary.
    pub extractor: Arc<SkillExtractor>,
}
