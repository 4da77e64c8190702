use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::extraction::ParseOptionError;

/// Coarse seniority of a posting. No other levels are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobLevel {
    Senior,
    Junior,
}

impl fmt::Display for JobLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobLevel::Senior => f.write_str("senior"),
            JobLevel::Junior => f.write_str("junior"),
        }
    }
}

/// How strictly the "senior" marker is matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobLevelMatch {
    /// Only the literal substrings "senior" and "Senior".
    #[default]
    CaseSensitive,
    /// Any casing, including "SENIOR".
    CaseInsensitive,
}

impl FromStr for JobLevelMatch {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "case_sensitive" | "sensitive" => Ok(JobLevelMatch::CaseSensitive),
            "case_insensitive" | "insensitive" => Ok(JobLevelMatch::CaseInsensitive),
            other => Err(ParseOptionError::new("job level match", other)),
        }
    }
}

/// Classifies the raw description text.
pub fn classify_job_level(description: &str, mode: JobLevelMatch) -> JobLevel {
    let is_senior = match mode {
        JobLevelMatch::CaseSensitive => {
            description.contains("senior") || description.contains("Senior")
        }
        JobLevelMatch::CaseInsensitive => description.to_lowercase().contains("senior"),
    };

    if is_senior {
        JobLevel::Senior
    } else {
        JobLevel::Junior
    }
}
