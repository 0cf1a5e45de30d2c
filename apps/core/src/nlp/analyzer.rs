//! Symptom Analyzer - Main orchestrator for the NLP module.
//!
//! Runs keyword extraction, then classification and herb matching on the same
//! keywords, then lifestyle lookup on the winning category. Pure and total:
//! every input string, including the empty one, yields a recommendation.

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::category::CategoryClassifier;
use super::keywords::KeywordExtractor;
use super::knowledge::KnowledgeBase;
use super::lifestyle::LifestyleAdvisor;
use super::matcher::HerbMatcher;
use super::recommendation::Recommendation;

/// Main analyzer that orchestrates all analysis components
pub struct SymptomAnalyzer {
    knowledge: Arc<KnowledgeBase>,
    keyword_extractor: KeywordExtractor,
    classifier: CategoryClassifier,
    matcher: HerbMatcher,
    advisor: LifestyleAdvisor,
}

impl Default for SymptomAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(KnowledgeBase::ayurvedic()))
    }
}

impl SymptomAnalyzer {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            keyword_extractor: KeywordExtractor::new(),
            classifier: CategoryClassifier::new(Arc::clone(&knowledge)),
            matcher: HerbMatcher::new(Arc::clone(&knowledge)),
            advisor: LifestyleAdvisor::new(Arc::clone(&knowledge)),
            knowledge,
        }
    }

    /// Analyze free-text symptoms and produce a recommendation
    pub fn analyze(&self, symptoms: &str) -> Recommendation {
        let start = Instant::now();

        let keywords = self.keyword_extractor.extract(symptoms);
        let analysis = self.classifier.classify(&keywords);
        let recommendations = self.matcher.matches(&keywords);
        let lifestyle = self.advisor.advise(analysis.category);

        let recommendation = Recommendation {
            analysis,
            recommendations,
            disclaimer: self.knowledge.disclaimer.clone(),
            lifestyle,
        };

        debug!(
            elapsed_us = start.elapsed().as_micros() as u64,
            "Symptom analysis: {}",
            recommendation.summary()
        );

        recommendation
    }
}
