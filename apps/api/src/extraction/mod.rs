// Skill extraction core.
// Turns a job description (HTML or plain text) into a normalized skillset and a
// coarse job level. Linguistic annotation comes from an injected `Annotator`;
// everything in here apart from the orchestrator is synchronous and pure.

pub mod handlers;
pub mod html_lists;
pub mod job_level;
pub mod keywords;
pub mod list_items;
pub mod pipeline;
pub mod tokens;

use thiserror::Error;

pub use html_lists::{ListCandidate, ListKind, SiblingScan, DEFAULT_SIBLINGS_EXAMINED};
pub use job_level::{JobLevel, JobLevelMatch};
pub use keywords::KeywordMatcher;
pub use pipeline::{ExtractionError, ExtractionResult, SkillExtractor, Skillset};
pub use tokens::{AnnotatedToken, Dependency, PartOfSpeech};

/// Behavior switches for the two places where the extractor can either keep the
/// historical behavior or use the corrected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionOptions {
    pub sibling_scan: SiblingScan,
    /// Number of non-blank siblings examined by `SiblingScan::Corrected`.
    pub siblings_examined: usize,
    pub job_level_match: JobLevelMatch,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            sibling_scan: SiblingScan::default(),
            siblings_examined: DEFAULT_SIBLINGS_EXAMINED,
            job_level_match: JobLevelMatch::default(),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl ParseOptionError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
