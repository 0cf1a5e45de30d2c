//! Herb matching.
//!
//! Scans keywords in order against symptom keys in table order. The first
//! occurrence of a herb wins, so its `reason` and `dosage` come from the first
//! symptom key that produced it.

use std::collections::HashSet;
use std::sync::Arc;

use super::keywords::overlaps;
use super::knowledge::KnowledgeBase;
use super::recommendation::HerbRecommendation;

/// Upper bound on recommended herbs
pub const MAX_RECOMMENDATIONS: usize = 3;

pub struct HerbMatcher {
    knowledge: Arc<KnowledgeBase>,
}

impl HerbMatcher {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// Return 1 to 3 herbs unique by id, or the fallback pair when nothing matches
    pub fn matches(&self, keywords: &[String]) -> Vec<HerbRecommendation> {
        let mut seen = HashSet::new();
        let mut picked = Vec::with_capacity(MAX_RECOMMENDATIONS);

        'scan: for keyword in keywords {
            for entry in &self.knowledge.symptom_herbs {
                if !overlaps(keyword, &entry.key) {
                    continue;
                }
                for herb in &entry.herbs {
                    if seen.insert(herb.herb_id) {
                        picked.push(herb.clone());
                        if picked.len() == MAX_RECOMMENDATIONS {
                            break 'scan;
                        }
                    }
                }
            }
        }

        if picked.is_empty() {
            return self
                .knowledge
                .fallback
                .iter()
                .take(MAX_RECOMMENDATIONS)
                .cloned()
                .collect();
        }

        picked
    }
}
