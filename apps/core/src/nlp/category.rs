//! Category classification.
//!
//! Counts, per category, how many keywords loosely match one of its
//! association terms. The strictly greatest count wins; ties keep the category
//! declared first in the knowledge base.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::keywords::overlaps;
use super::knowledge::KnowledgeBase;
use super::recommendation::SymptomAnalysis;

/// Keywords kept in the analysis output
pub const MAX_KEYWORDS: usize = 10;

/// A winning count above this is reported as moderate
pub const MODERATE_THRESHOLD: usize = 3;

/// Coarse health grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mental,
    Digestive,
    Respiratory,
    Inflammatory,
    Immunity,
    /// Nothing matched
    General,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Mental => "mental",
            Category::Digestive => "digestive",
            Category::Respiratory => "respiratory",
            Category::Inflammatory => "inflammatory",
            Category::Immunity => "immunity",
            Category::General => "general",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Mild => write!(f, "mild"),
            Severity::Moderate => write!(f, "moderate"),
        }
    }
}

impl Severity {
    fn from_match_count(count: usize) -> Self {
        if count > MODERATE_THRESHOLD {
            Severity::Moderate
        } else {
            Severity::Mild
        }
    }
}

/// Keyword-to-category classifier over the knowledge base term lists
pub struct CategoryClassifier {
    knowledge: Arc<KnowledgeBase>,
}

impl CategoryClassifier {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// Number of keywords matching each category, in declaration order
    pub fn match_counts(&self, keywords: &[String]) -> Vec<(Category, usize)> {
        self.knowledge
            .categories
            .iter()
            .map(|entry| {
                let count = keywords
                    .iter()
                    .filter(|keyword| entry.terms.iter().any(|term| overlaps(keyword, term)))
                    .count();
                (entry.category, count)
            })
            .collect()
    }

    pub fn classify(&self, keywords: &[String]) -> SymptomAnalysis {
        let mut category = Category::General;
        let mut best = 0;

        for (candidate, count) in self.match_counts(keywords) {
            if count > best {
                best = count;
                category = candidate;
            }
        }

        SymptomAnalysis {
            category,
            severity: Severity::from_match_count(best),
            keywords: keywords.iter().take(MAX_KEYWORDS).cloned().collect(),
        }
    }
}
