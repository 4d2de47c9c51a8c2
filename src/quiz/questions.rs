//! Question definitions and the built-in questionnaire.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Question ids and choice strings referenced by the recommendation rules.
pub mod ids {
    pub const AVAILABILITY: &str = "availability";
    pub const CAUSES: &str = "causes";
    pub const SKILLS: &str = "skills";
    pub const INVOLVEMENT: &str = "involvement";
    pub const EXPERIENCE: &str = "experience";
    pub const COMMUNITY: &str = "community";

    /// Shortest availability bucket.
    pub const SHORTEST_AVAILABILITY: &str = "1-2 hours";
    pub const FOOD_SECURITY: &str = "Food Security";
    pub const COMMUNITY_ORGANIZING: &str = "Community Organizing";
    pub const TECH_SKILLS: &str = "Tech/Digital Skills";
}

/// Inclusive integer range for a scalar question, with end labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarRange {
    pub min: i64,
    pub max: i64,
    pub min_label: String,
    pub max_label: String,
}

impl ScalarRange {
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// What shape of answer a question accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Exactly one of the choices.
    SingleChoice { choices: Vec<String> },
    /// Any non-empty subset of the choices.
    MultiChoice { choices: Vec<String> },
    /// An integer within the range.
    ScalarRange { range: ScalarRange },
}

impl QuestionKind {
    /// Declared choices, empty for scalar questions.
    pub fn choices(&self) -> &[String] {
        match self {
            Self::SingleChoice { choices } | Self::MultiChoice { choices } => choices,
            Self::ScalarRange { .. } => &[],
        }
    }
}

/// A static question definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn single(id: &str, prompt: &str, choices: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: QuestionKind::SingleChoice {
                choices: choices.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    pub fn multi(id: &str, prompt: &str, choices: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: QuestionKind::MultiChoice {
                choices: choices.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    pub fn scalar(id: &str, prompt: &str, min: i64, max: i64, labels: (&str, &str)) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind: QuestionKind::ScalarRange {
                range: ScalarRange {
                    min,
                    max,
                    min_label: labels.0.to_string(),
                    max_label: labels.1.to_string(),
                },
            },
        }
    }

    /// Whether `choice` is one of this question's declared choices.
    pub fn has_choice(&self, choice: &str) -> bool {
        self.kind.choices().iter().any(|c| c == choice)
    }
}

/// A fixed, ordered, non-empty question sequence with unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog, rejecting an empty list or duplicate ids.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(CatalogError::DuplicateId(q.id.clone()));
            }
        }
        Ok(Self { questions })
    }

    /// The six-question volunteer matching questionnaire.
    pub fn builtin() -> Self {
        Self {
            questions: vec![
                Question::single(
                    ids::AVAILABILITY,
                    "How much time can you commit per week?",
                    &[
                        ids::SHORTEST_AVAILABILITY,
                        "3-5 hours",
                        "6-10 hours",
                        "10+ hours",
                        "Flexible/Variable",
                    ],
                ),
                Question::multi(
                    ids::CAUSES,
                    "Which causes are you most passionate about? (Select all that apply)",
                    &[
                        ids::FOOD_SECURITY,
                        "Housing Support",
                        "Emergency Relief",
                        ids::COMMUNITY_ORGANIZING,
                        "Education & Mentoring",
                        "Healthcare Access",
                    ],
                ),
                Question::multi(
                    ids::SKILLS,
                    "What skills can you contribute?",
                    &[
                        "Cooking/Food Prep",
                        "Transportation/Driving",
                        "Teaching/Mentoring",
                        ids::TECH_SKILLS,
                        "Event Planning",
                        "Legal/Administrative",
                        "Handiwork/Repairs",
                        "Language Translation",
                    ],
                ),
                Question::single(
                    ids::INVOLVEMENT,
                    "How do you prefer to help?",
                    &[
                        "Direct service (hands-on help)",
                        "Behind-the-scenes support",
                        "Leadership/Coordination",
                        "Resource donation",
                        "Skills sharing/Teaching",
                    ],
                ),
                Question::scalar(
                    ids::EXPERIENCE,
                    "Previous volunteer experience?",
                    0,
                    10,
                    ("None", "Extensive"),
                ),
                Question::single(
                    ids::COMMUNITY,
                    "What matters most to you in community work?",
                    &[
                        "Making immediate impact",
                        "Building long-term relationships",
                        "Learning new skills",
                        "Supporting specific causes",
                        "Meeting diverse people",
                    ],
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Never true for a catalog built through `new` or `builtin`.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&Question> {
        self.questions.get(step)
    }

    pub fn by_id(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = QuestionCatalog::builtin();
        assert_eq!(builtin.len(), 6);
        // Re-validate through the checked constructor.
        QuestionCatalog::new(builtin.questions().to_vec()).unwrap();
    }

    #[test]
    fn builtin_order_is_fixed() {
        let catalog = QuestionCatalog::builtin();
        let order: Vec<&str> = catalog.questions().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(
            order,
            vec!["availability", "causes", "skills", "involvement", "experience", "community"]
        );
    }

    #[test]
    fn empty_catalog_rejected() {
        assert_eq!(QuestionCatalog::new(vec![]), Err(CatalogError::Empty));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = QuestionCatalog::new(vec![
            Question::single("a", "A?", &["x"]),
            Question::multi("a", "A again?", &["y"]),
        ]);
        assert_eq!(result, Err(CatalogError::DuplicateId("a".to_string())));
    }

    #[test]
    fn rule_choices_exist_in_catalog() {
        let catalog = QuestionCatalog::builtin();
        let availability = catalog.by_id(ids::AVAILABILITY).unwrap();
        assert_eq!(availability.kind.choices()[0], ids::SHORTEST_AVAILABILITY);
        assert!(catalog.by_id(ids::CAUSES).unwrap().has_choice(ids::FOOD_SECURITY));
        assert!(catalog.by_id(ids::CAUSES).unwrap().has_choice(ids::COMMUNITY_ORGANIZING));
        assert!(catalog.by_id(ids::SKILLS).unwrap().has_choice(ids::TECH_SKILLS));
    }

    #[test]
    fn question_serializes_with_kind_tag() {
        let q = Question::scalar("experience", "Experience?", 0, 10, ("None", "Extensive"));
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "scalar_range");
        assert_eq!(json["range"]["max"], 10);
        assert_eq!(json["range"]["min_label"], "None");
    }

    #[test]
    fn scalar_range_bounds_are_inclusive() {
        let range = ScalarRange {
            min: 0,
            max: 10,
            min_label: String::new(),
            max_label: String::new(),
        };
        assert!(range.contains(0));
        assert!(range.contains(10));
        assert!(!range.contains(-1));
        assert!(!range.contains(11));
    }
}
