//! Pipeline orchestrator: description in, `ExtractionResult` out.

use std::collections::{btree_set, BTreeSet};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::annotation::{AnnotationError, Annotator};
use crate::extraction::html_lists::{scan_description, DescriptionScan};
use crate::extraction::job_level::{classify_job_level, JobLevel};
use crate::extraction::keywords::KeywordMatcher;
use crate::extraction::list_items::extract_item_skills;
use crate::extraction::ExtractionOptions;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Annotation failed: {0}")]
    Annotation(#[from] AnnotationError),
}

/// Lowercase, deduplicated skill names. Blank names are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Skillset(BTreeSet<String>);

impl Skillset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes and inserts `skill`. Returns `false` if it was blank or already present.
    pub fn insert(&mut self, skill: &str) -> bool {
        let skill = skill.trim().to_lowercase();
        if skill.is_empty() {
            return false;
        }
        self.0.insert(skill)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(&skill.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Skillset {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut skillset = Skillset::new();
        skillset.extend(iter);
        skillset
    }
}

impl<S: AsRef<str>> Extend<S> for Skillset {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for skill in iter {
            self.insert(skill.as_ref());
        }
    }
}

impl<'a> IntoIterator for &'a Skillset {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Final record for one description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub skillset: Skillset,
    pub job_level: JobLevel,
}

/// Runs the extraction pipeline. Holds the annotator and keyword vocabulary,
/// both read-only, so one instance can serve concurrent callers.
pub struct SkillExtractor {
    annotator: Arc<dyn Annotator>,
    keywords: KeywordMatcher,
    options: ExtractionOptions,
}

impl SkillExtractor {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self {
            annotator,
            keywords: KeywordMatcher::default(),
            options: ExtractionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExtractionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_keywords(mut self, keywords: KeywordMatcher) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Parse → locate lists → per-item extraction (or keyword fallback) →
    /// normalize → classify job level.
    pub async fn extract(&self, description: &str) -> Result<ExtractionResult, ExtractionError> {
        let scan = scan_description(
            description,
            self.options.sibling_scan,
            self.options.siblings_examined,
        );

        let skillset: Skillset = match scan {
            DescriptionScan::Lists(candidates) => {
                let mut skillset = Skillset::new();
                for candidate in &candidates {
                    for item in &candidate.items {
                        skillset.extend(self.extract_item(item).await?);
                    }
                }
                debug!(lists = candidates.len(), "Extracted skills from HTML lists");
                skillset
            }
            DescriptionScan::FlatText(text) => {
                warn!("No skill list found, falling back to keyword matching");
                self.keywords.find_keywords(&text).into_iter().collect()
            }
        };

        let job_level = classify_job_level(description, self.options.job_level_match);

        info!(skills = skillset.len(), %job_level, "Extraction complete");

        Ok(ExtractionResult {
            skillset,
            job_level,
        })
    }

    /// Raw skill strings of one list item. Blank items never reach the annotator.
    pub async fn extract_item(&self, item_text: &str) -> Result<BTreeSet<String>, ExtractionError> {
        if item_text.trim().is_empty() {
            return Ok(BTreeSet::new());
        }
        let tokens = self.annotator.annotate(item_text).await?;
        Ok(extract_item_skills(&tokens))
    }
}
