//! Lifestyle advice lookup by category, falling back to the general list.

use std::sync::Arc;

use super::category::Category;
use super::knowledge::KnowledgeBase;

pub struct LifestyleAdvisor {
    knowledge: Arc<KnowledgeBase>,
}

impl LifestyleAdvisor {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    pub fn advise(&self, category: Category) -> Vec<String> {
        self.knowledge
            .lifestyle_for(category)
            .or_else(|| self.knowledge.lifestyle_for(Category::General))
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }
}
