//! Keyword fallback used when a description has no skill-bearing list.

use std::collections::{BTreeSet, HashMap};

use regex::Regex;

/// Built-in technology vocabulary. Entries are literal; casing here is the
/// casing reported for a match.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "Python",
    "C",
    "C++",
    "C#",
    ".Net",
    "Go",
    "PHP",
    "HTML",
    "CSS",
    "Java",
    "Scala",
    "Ruby",
    "JavaScript",
    "JS",
    "TypeScript",
    "TS",
    "Node.js",
    "NodeJs",
    "Vue",
    "React",
    "gRPC",
    "Docker",
    "Kubernetes",
    "SQL",
    "MySQL",
    "CI/CD",
    "Rest API",
    "Restful API",
    "Google Cloud",
    "Azure",
    "AWS",
];

/// Characters that must surround a keyword on both sides.
const BOUNDARY: &str = r"[\s,.!?:;]";

/// Case-insensitive matcher over a fixed keyword vocabulary.
///
/// Constructed once and shared read-only; matching never mutates it.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    pattern: Regex,
    canonical: HashMap<String, String>,
}

impl KeywordMatcher {
    pub fn new<I, S>(vocabulary: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical = HashMap::new();
        let mut alternatives = Vec::new();
        for keyword in vocabulary {
            let keyword = keyword.as_ref();
            if keyword.is_empty() {
                continue;
            }
            alternatives.push(regex::escape(keyword));
            canonical
                .entry(keyword.to_lowercase())
                .or_insert_with(|| keyword.to_string());
        }

        let pattern = Regex::new(&format!(
            "(?i){BOUNDARY}({}){BOUNDARY}",
            alternatives.join("|")
        ))?;

        Ok(Self { pattern, canonical })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.canonical.len()
    }

    /// Returns every vocabulary keyword found in `text`, in vocabulary casing.
    ///
    /// A keyword at the very start or end of `text` has no boundary on that side
    /// and is not reported. Matches do not overlap: a boundary consumed by one
    /// match is not available to the next.
    pub fn find_keywords(&self, text: &str) -> BTreeSet<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| self.canonical.get(&m.as_str().to_lowercase()))
            .cloned()
            .collect()
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_VOCABULARY).expect("Built-in keyword vocabulary must compile")
    }
}
