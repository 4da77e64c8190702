//! Token model handed back by the annotation service.

/// Coarse part-of-speech class. Only the classes the extractor branches on are
/// distinguished; everything else collapses into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    /// Symbol or punctuation.
    Symbol,
    Other,
}

impl PartOfSpeech {
    /// Maps a Universal POS tag (`NOUN`, `PROPN`, ...) onto the coarse class.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "NOUN" => PartOfSpeech::Noun,
            "PROPN" => PartOfSpeech::ProperNoun,
            "VERB" => PartOfSpeech::Verb,
            "SYM" | "PUNCT" => PartOfSpeech::Symbol,
            _ => PartOfSpeech::Other,
        }
    }
}

/// Dependency role of a token relative to its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// The token modifies its head as part of a compound noun ("Google" in "Google Cloud").
    Compound,
    Other,
}

impl Dependency {
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("compound") {
            Dependency::Compound
        } else {
            Dependency::Other
        }
    }
}

/// A single annotated token.
///
/// `head` indexes into the token slice the token was delivered in. A root token
/// heads itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedToken {
    pub text: String,
    /// Character offset of the token within the annotated text.
    pub idx: usize,
    pub pos: PartOfSpeech,
    pub lemma: String,
    pub dep: Dependency,
    pub head: usize,
}

impl AnnotatedToken {
    /// Builds a token with no dependency relation; the lemma defaults to the surface text.
    pub fn new(text: impl Into<String>, idx: usize, pos: PartOfSpeech, head: usize) -> Self {
        let text = text.into();
        Self {
            lemma: text.clone(),
            text,
            idx,
            pos,
            dep: Dependency::Other,
            head,
        }
    }

    pub fn with_dep(mut self, dep: Dependency) -> Self {
        self.dep = dep;
        self
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    pub fn is_proper_noun(&self) -> bool {
        self.pos == PartOfSpeech::ProperNoun
    }

    pub fn is_symbol(&self) -> bool {
        self.pos == PartOfSpeech::Symbol
    }

    pub fn is_compound_modifier(&self) -> bool {
        self.dep == Dependency::Compound
    }
}
