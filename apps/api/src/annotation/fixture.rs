//! In-memory annotators for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::annotation::{AnnotationError, Annotator};
use crate::extraction::tokens::{AnnotatedToken, PartOfSpeech};

/// Returns registered token sequences for known texts and a naive
/// tokenization for everything else.
#[derive(Default)]
pub(crate) struct FixtureAnnotator {
    fixtures: HashMap<String, Vec<AnnotatedToken>>,
    calls: AtomicUsize,
}

impl FixtureAnnotator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, text: &str, tokens: Vec<AnnotatedToken>) -> Self {
        self.fixtures.insert(text.to_string(), tokens);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Annotator for FixtureAnnotator {
    async fn annotate(&self, text: &str) -> Result<Vec<AnnotatedToken>, AnnotationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .fixtures
            .get(text)
            .cloned()
            .unwrap_or_else(|| naive_tokens(text)))
    }
}

/// Always fails as if the service were down.
pub(crate) struct FailingAnnotator;

#[async_trait]
impl Annotator for FailingAnnotator {
    async fn annotate(&self, _text: &str) -> Result<Vec<AnnotatedToken>, AnnotationError> {
        Err(AnnotationError::Api {
            status: 503,
            message: "model not loaded".to_string(),
        })
    }
}

/// Words are runs of alphanumerics, `+` and `#`; any other non-space character
/// is a symbol token. Capitalized words are proper nouns, the rest nouns. No
/// dependency relations.
pub(crate) fn naive_tokens(text: &str) -> Vec<AnnotatedToken> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_alphanumeric() || c == '+' || c == '#' {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            push_word(&mut tokens, text, start, i);
        }
        if !c.is_whitespace() {
            let head = tokens.len();
            tokens.push(AnnotatedToken::new(c.to_string(), i, PartOfSpeech::Symbol, head));
        }
    }
    if let Some(start) = word_start {
        push_word(&mut tokens, text, start, text.len());
    }

    tokens
}

fn push_word(tokens: &mut Vec<AnnotatedToken>, text: &str, start: usize, end: usize) {
    let word = &text[start..end];
    let pos = if word.chars().next().is_some_and(char::is_uppercase) {
        PartOfSpeech::ProperNoun
    } else {
        PartOfSpeech::Noun
    };
    let head = tokens.len();
    tokens.push(AnnotatedToken::new(word, start, pos, head));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_tokens_split_words_and_symbols() {
        let tokens = naive_tokens("Go, docker!");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Go", ",", "docker", "!"]);
        assert_eq!(tokens[0].pos, PartOfSpeech::ProperNoun);
        assert_eq!(tokens[1].pos, PartOfSpeech::Symbol);
        assert_eq!(tokens[2].pos, PartOfSpeech::Noun);
        assert_eq!(tokens[2].idx, 4);
    }
}
