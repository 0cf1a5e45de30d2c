//! # NLP Module
//!
//! Deterministic symptom analysis: no model, no I/O, only lookups over
//! read-only reference tables.
//!
//! ## Components
//! - `keywords`: tokenizer producing distinct lowercase keywords
//! - `category`: keyword-to-category classifier with severity
//! - `matcher`: symptom-key to herb matching with dedupe and fallback
//! - `lifestyle`: category to lifestyle advice
//! - `knowledge`: the reference tables shared by all of the above
//! - `recommendation`: output data structures
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod category;
pub mod keywords;
pub mod knowledge;
pub mod lifestyle;
pub mod matcher;
pub mod recommendation;

pub use analyzer::SymptomAnalyzer;
pub use category::{Category, CategoryClassifier, Severity};
pub use keywords::KeywordExtractor;
pub use knowledge::KnowledgeBase;
pub use lifestyle::LifestyleAdvisor;
pub use matcher::HerbMatcher;
pub use recommendation::{HerbRecommendation, Recommendation, SymptomAnalysis};
