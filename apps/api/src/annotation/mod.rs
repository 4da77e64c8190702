//! Linguistic annotation client.
//!
//! The extractor never tokenizes or tags text itself. It asks an `Annotator`
//! and works on the returned `AnnotatedToken`s. `HttpAnnotator` talks to an
//! annotation server; tests plug in hand-built token sequences.

use async_trait::async_trait;
use thiserror::Error;

use crate::extraction::tokens::AnnotatedToken;

pub mod http;

#[cfg(test)]
pub(crate) mod fixture;

pub use http::HttpAnnotator;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Annotation API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Annotation service unavailable after {attempts} attempts")]
    Unavailable { attempts: u32 },
}

/// Source of annotated tokens. Carried by the extractor as `Arc<dyn Annotator>`.
///
/// Implementations must be deterministic for a fixed model version.
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn annotate(&self, text: &str) -> Result<Vec<AnnotatedToken>, AnnotationError>;
}
