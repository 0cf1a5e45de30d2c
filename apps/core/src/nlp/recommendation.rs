//! Recommendation - Output structures for symptom analysis.
//!
//! Field names serialize in camelCase so the web client can consume the
//! payload as-is.

use serde::{Deserialize, Serialize};

use super::category::{Category, Severity};

/// Coarse classification of the symptom text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomAnalysis {
    /// Winning health category (or `general`)
    pub category: Category,
    /// `moderate` when the winning category matched more than 3 keywords
    pub severity: Severity,
    /// First 10 extracted keywords, in first-occurrence order
    pub keywords: Vec<String>,
}

/// A single herb suggestion tied to the symptom key that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HerbRecommendation {
    pub herb_id: i64,
    pub herb_name: String,
    pub scientific_name: String,
    pub reason: String,
    pub dosage: String,
    pub benefits: Vec<String>,
}

impl HerbRecommendation {
    pub fn new(
        herb_id: i64,
        herb_name: &str,
        scientific_name: &str,
        reason: &str,
        dosage: &str,
        benefits: &[&str],
    ) -> Self {
        Self {
            herb_id,
            herb_name: herb_name.to_string(),
            scientific_name: scientific_name.to_string(),
            reason: reason.to_string(),
            dosage: dosage.to_string(),
            benefits: benefits.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// Complete result of a symptom analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub analysis: SymptomAnalysis,
    /// 1 to 3 herbs, unique by id
    pub recommendations: Vec<HerbRecommendation>,
    pub disclaimer: String,
    pub lifestyle: Vec<String>,
}

impl Recommendation {
    /// Ids of the recommended herbs, in ranking order
    pub fn herb_ids(&self) -> Vec<i64> {
        self.recommendations.iter().map(|r| r.herb_id).collect()
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Category: {} ({}), Keywords: {}, Herbs: {:?}",
            self.analysis.category,
            self.analysis.severity,
            self.analysis.keywords.len(),
            self.herb_ids()
        )
    }
}
