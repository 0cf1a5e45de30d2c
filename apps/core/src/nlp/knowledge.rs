//! Knowledge Base - Read-only reference tables for symptom analysis.
//!
//! Every table is an ordered list: category priority and symptom-key scan
//! order are part of the matching behaviour. Built once at startup, wrapped in
//! an `Arc` and shared by every request.

use std::collections::{HashMap, HashSet};

use super::category::Category;
use super::matcher::MAX_RECOMMENDATIONS;
use super::recommendation::HerbRecommendation;
use crate::error::AppError;

const BRAHMI: i64 = 1;
const ASHWAGANDHA: i64 = 2;
const TURMERIC: i64 = 3;
const NEEM: i64 = 4;
const TULSI: i64 = 5;
const GINGER: i64 = 6;

const DISCLAIMER: &str = "These recommendations are based on traditional Ayurvedic principles \
and are for educational purposes only. Please consult with qualified healthcare professionals \
before starting any herbal regimen, especially if you have existing health conditions or are \
taking medications.";

/// Association terms for one classifier category
#[derive(Debug, Clone)]
pub struct CategoryTerms {
    pub category: Category,
    pub terms: Vec<String>,
}

/// Herbs suggested for one symptom key
#[derive(Debug, Clone)]
pub struct SymptomHerbs {
    pub key: String,
    pub herbs: Vec<HerbRecommendation>,
}

/// Lifestyle tips for one category
#[derive(Debug, Clone)]
pub struct LifestyleAdvice {
    pub category: Category,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    /// Classifier categories, highest tie-break priority first
    pub categories: Vec<CategoryTerms>,
    /// Symptom keys in scan order
    pub symptom_herbs: Vec<SymptomHerbs>,
    /// Must contain a `General` entry
    pub lifestyle: Vec<LifestyleAdvice>,
    /// Substituted when no symptom key matches
    pub fallback: Vec<HerbRecommendation>,
    pub disclaimer: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl KnowledgeBase {
    /// Built-in tables grounded in traditional Ayurvedic practice
    pub fn ayurvedic() -> Self {
        Self {
            categories: vec![
                CategoryTerms {
                    category: Category::Mental,
                    terms: strings(&[
                        "stress", "anxiety", "headache", "sleep", "insomnia", "depression",
                        "worry", "tired", "fatigue",
                    ]),
                },
                CategoryTerms {
                    category: Category::Digestive,
                    terms: strings(&[
                        "stomach", "digest", "nausea", "bloating", "constipation", "diarrhea",
                        "gas", "appetite",
                    ]),
                },
                CategoryTerms {
                    category: Category::Respiratory,
                    terms: strings(&[
                        "cough", "cold", "breathing", "asthma", "congestion", "throat", "lung",
                    ]),
                },
                CategoryTerms {
                    category: Category::Inflammatory,
                    terms: strings(&[
                        "pain", "inflammation", "joint", "arthritis", "swelling", "ache",
                    ]),
                },
                CategoryTerms {
                    category: Category::Immunity,
                    terms: strings(&["immune", "sick", "infection", "fever", "weak", "energy"]),
                },
            ],
            symptom_herbs: vec![
                SymptomHerbs {
                    key: "headache".to_string(),
                    herbs: vec![
                        HerbRecommendation::new(
                            BRAHMI,
                            "Brahmi",
                            "Bacopa monnieri",
                            "Calms Vata dosha and reduces mental stress",
                            "1-2 teaspoons with warm milk before bed",
                            &["Reduces tension headaches", "Improves mental clarity", "Calms nervous system"],
                        ),
                        HerbRecommendation::new(
                            ASHWAGANDHA,
                            "Ashwagandha",
                            "Withania somnifera",
                            "Adaptogenic properties help manage stress-induced headaches",
                            "500mg twice daily with meals",
                            &["Reduces stress", "Balances cortisol", "Improves sleep quality"],
                        ),
                    ],
                },
                SymptomHerbs {
                    key: "stress".to_string(),
                    herbs: vec![
                        HerbRecommendation::new(
                            ASHWAGANDHA,
                            "Ashwagandha",
                            "Withania somnifera",
                            "Premier adaptogenic herb for stress management",
                            "500mg twice daily with meals",
                            &["Reduces cortisol levels", "Improves stress resilience", "Enhances energy"],
                        ),
                        HerbRecommendation::new(
                            BRAHMI,
                            "Brahmi",
                            "Bacopa monnieri",
                            "Supports nervous system and mental clarity",
                            "1-2 teaspoons with warm milk",
                            &["Calms mind", "Improves concentration", "Reduces anxiety"],
                        ),
                    ],
                },
                SymptomHerbs {
                    key: "sleep".to_string(),
                    herbs: vec![
                        HerbRecommendation::new(
                            BRAHMI,
                            "Brahmi",
                            "Bacopa monnieri",
                            "Calming properties promote restful sleep",
                            "1 teaspoon with warm milk before bed",
                            &["Improves sleep quality", "Calms nervous system", "Reduces mental fatigue"],
                        ),
                        HerbRecommendation::new(
                            ASHWAGANDHA,
                            "Ashwagandha",
                            "Withania somnifera",
                            "Helps regulate sleep-wake cycle",
                            "500mg 1 hour before bedtime",
                            &["Promotes deep sleep", "Reduces sleep anxiety", "Balances stress hormones"],
                        ),
                    ],
                },
                SymptomHerbs {
                    key: "digestive".to_string(),
                    herbs: vec![
                        HerbRecommendation::new(
                            GINGER,
                            "Ginger",
                            "Zingiber officinale",
                            "Stimulates digestive fire (Agni) and improves gut health",
                            "1-2 slices fresh ginger with warm water before meals",
                            &["Improves digestion", "Reduces nausea", "Stimulates appetite"],
                        ),
                        HerbRecommendation::new(
                            TURMERIC,
                            "Turmeric",
                            "Curcuma longa",
                            "Anti-inflammatory properties support digestive health",
                            "1 teaspoon with warm milk or water",
                            &["Reduces inflammation", "Supports liver function", "Aids digestion"],
                        ),
                    ],
                },
                SymptomHerbs {
                    key: "inflammation".to_string(),
                    herbs: vec![
                        HerbRecommendation::new(
                            TURMERIC,
                            "Turmeric",
                            "Curcuma longa",
                            "Curcumin provides powerful anti-inflammatory effects",
                            "1-2 teaspoons daily with black pepper",
                            &["Reduces inflammation", "Supports joint health", "Antioxidant properties"],
                        ),
                        HerbRecommendation::new(
                            NEEM,
                            "Neem",
                            "Azadirachta indica",
                            "Natural anti-inflammatory and purifying properties",
                            "2-3 fresh leaves or 500mg extract daily",
                            &["Purifies blood", "Reduces inflammation", "Supports immune system"],
                        ),
                    ],
                },
                SymptomHerbs {
                    key: "immunity".to_string(),
                    herbs: vec![
                        HerbRecommendation::new(
                            TULSI,
                            "Tulsi",
                            "Ocimum sanctum",
                            "Rasayana herb that strengthens overall immunity",
                            "5-10 fresh leaves or 2 cups tea daily",
                            &["Boosts immunity", "Respiratory support", "Adaptogenic properties"],
                        ),
                        HerbRecommendation::new(
                            TURMERIC,
                            "Turmeric",
                            "Curcuma longa",
                            "Immune-modulating and antioxidant properties",
                            "1 teaspoon with warm milk daily",
                            &["Strengthens immunity", "Antioxidant support", "Anti-viral properties"],
                        ),
                    ],
                },
            ],
            lifestyle: vec![
                LifestyleAdvice {
                    category: Category::Mental,
                    tips: strings(&[
                        "Practice daily meditation or pranayama (breathing exercises)",
                        "Maintain regular sleep schedule (10pm-6am)",
                        "Avoid excessive screen time before bed",
                        "Include gentle yoga or walking in daily routine",
                    ]),
                },
                LifestyleAdvice {
                    category: Category::Digestive,
                    tips: strings(&[
                        "Eat meals at regular times",
                        "Avoid cold drinks with meals",
                        "Chew food thoroughly and eat mindfully",
                        "Include warm, cooked foods in diet",
                    ]),
                },
                LifestyleAdvice {
                    category: Category::Respiratory,
                    tips: strings(&[
                        "Practice deep breathing exercises",
                        "Stay hydrated with warm liquids",
                        "Avoid cold and dry foods",
                        "Use steam inhalation with eucalyptus",
                    ]),
                },
                LifestyleAdvice {
                    category: Category::Inflammatory,
                    tips: strings(&[
                        "Follow anti-inflammatory diet",
                        "Apply warm oil massage regularly",
                        "Include gentle movement and stretching",
                        "Reduce processed and fried foods",
                    ]),
                },
                LifestyleAdvice {
                    category: Category::Immunity,
                    tips: strings(&[
                        "Maintain regular sleep and wake times",
                        "Include fresh fruits and vegetables",
                        "Practice stress-reduction techniques",
                        "Expose yourself to morning sunlight",
                    ]),
                },
                LifestyleAdvice {
                    category: Category::General,
                    tips: strings(&[
                        "Follow daily routine (Dinacharya)",
                        "Eat according to your constitution",
                        "Practice regular exercise",
                        "Maintain work-life balance",
                    ]),
                },
            ],
            fallback: vec![
                HerbRecommendation::new(
                    TURMERIC,
                    "Turmeric",
                    "Curcuma longa",
                    "General wellness and anti-inflammatory support",
                    "1 teaspoon with warm milk daily",
                    &["General wellness", "Anti-inflammatory", "Immune support"],
                ),
                HerbRecommendation::new(
                    TULSI,
                    "Tulsi",
                    "Ocimum sanctum",
                    "Adaptogenic support for overall health",
                    "2 cups tea daily or 5-10 fresh leaves",
                    &["Adaptogenic support", "Respiratory health", "Stress relief"],
                ),
            ],
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Lifestyle tips registered for a category, if any
    pub fn lifestyle_for(&self, category: Category) -> Option<&[String]> {
        self.lifestyle
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.tips.as_slice())
    }

    /// Startup consistency check. A broken table is a deployment defect and
    /// must stop the process before any request is served.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut seen_categories = HashSet::new();
        for entry in &self.categories {
            if entry.category == Category::General {
                return Err(AppError::Config(
                    "`general` is the no-match outcome and cannot have terms".to_string(),
                ));
            }
            if !seen_categories.insert(entry.category) {
                return Err(AppError::Config(format!(
                    "Category `{}` is declared twice",
                    entry.category
                )));
            }
            if entry.terms.is_empty() || entry.terms.iter().any(|t| t.is_empty()) {
                return Err(AppError::Config(format!(
                    "Category `{}` has an empty term list or an empty term",
                    entry.category
                )));
            }
        }

        let mut identities: HashMap<i64, (&str, &str)> = HashMap::new();
        let all_herbs = self
            .symptom_herbs
            .iter()
            .flat_map(|entry| entry.herbs.iter())
            .chain(self.fallback.iter());
        for herb in all_herbs {
            let identity = (herb.herb_name.as_str(), herb.scientific_name.as_str());
            if let Some(known) = identities.insert(herb.herb_id, identity) {
                if known != identity {
                    return Err(AppError::Config(format!(
                        "Herb id {} is used for both {} and {}",
                        herb.herb_id, known.0, identity.0
                    )));
                }
            }
        }

        for entry in &self.symptom_herbs {
            if entry.key.is_empty() {
                return Err(AppError::Config("Empty symptom key".to_string()));
            }
            if entry.herbs.is_empty() || entry.herbs.len() > 2 {
                return Err(AppError::Config(format!(
                    "Symptom `{}` must list one or two herbs, found {}",
                    entry.key,
                    entry.herbs.len()
                )));
            }
        }

        let fallback_ids: HashSet<i64> = self.fallback.iter().map(|h| h.herb_id).collect();
        if self.fallback.is_empty()
            || self.fallback.len() > MAX_RECOMMENDATIONS
            || fallback_ids.len() != self.fallback.len()
        {
            return Err(AppError::Config(format!(
                "Fallback must hold 1 to {} distinct herbs",
                MAX_RECOMMENDATIONS
            )));
        }

        let required = self
            .categories
            .iter()
            .map(|entry| entry.category)
            .chain(std::iter::once(Category::General));
        for category in required {
            match self.lifestyle_for(category) {
                Some(tips) if !tips.is_empty() => {}
                _ => {
                    return Err(AppError::Config(format!(
                        "No lifestyle advice for category `{}`",
                        category
                    )))
                }
            }
        }

        if self.disclaimer.trim().is_empty() {
            return Err(AppError::Config("Disclaimer text is empty".to_string()));
        }

        Ok(())
    }
}
