//! List-item skill extraction over annotated tokens.
//!
//! Short items ("Docker", "REST API") are usually a bare skill name, so every
//! non-symbol token is kept. Longer items are sentences, and only proper nouns
//! (expanded with their compound modifier) are taken as skills.

use std::collections::BTreeSet;

use tracing::debug;

use crate::extraction::tokens::AnnotatedToken;

/// Items with at most this many tokens use the simple strategy.
pub const SIMPLE_ITEM_MAX_TOKENS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStrategy {
    Simple,
    Complex,
}

pub fn choose_strategy(tokens: &[AnnotatedToken]) -> ItemStrategy {
    if tokens.len() <= SIMPLE_ITEM_MAX_TOKENS {
        ItemStrategy::Simple
    } else {
        ItemStrategy::Complex
    }
}

/// Extracts raw (not yet normalized) skill strings from one annotated list item.
pub fn extract_item_skills(tokens: &[AnnotatedToken]) -> BTreeSet<String> {
    let strategy = choose_strategy(tokens);
    debug!(tokens = tokens.len(), ?strategy, "Extracting skills from list item");

    match strategy {
        ItemStrategy::Simple => simple_extraction(tokens),
        ItemStrategy::Complex => complex_extraction(tokens),
    }
}

/// Every non-symbol token is a skill.
pub fn simple_extraction(tokens: &[AnnotatedToken]) -> BTreeSet<String> {
    tokens
        .iter()
        .filter(|token| !token.is_symbol())
        .filter(|token| !token.text.trim().is_empty())
        .map(|token| token.text.clone())
        .collect()
}

/// Every proper noun, expanded with its compound partner, is a skill.
pub fn complex_extraction(tokens: &[AnnotatedToken]) -> BTreeSet<String> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.is_proper_noun())
        .map(|(index, _)| expand_collocation(tokens, index))
        .collect()
}

/// Returns the skill phrase covering `tokens[index]`.
///
/// A compound modifier is joined with its head in surface order. Only one edge
/// is followed, so phrases never exceed two tokens.
pub fn expand_collocation(tokens: &[AnnotatedToken], index: usize) -> String {
    let token = &tokens[index];
    match find_collocation(tokens, index) {
        Some(head) => {
            let (first, second) = if token.idx <= head.idx {
                (token, head)
            } else {
                (head, token)
            };
            format!("{} {}", first.text, second.text)
        }
        None => token.text.clone(),
    }
}

fn find_collocation(tokens: &[AnnotatedToken], index: usize) -> Option<&AnnotatedToken> {
    let token = &tokens[index];
    if !token.is_compound_modifier() || token.head == index {
        return None;
    }
    tokens.get(token.head)
}
