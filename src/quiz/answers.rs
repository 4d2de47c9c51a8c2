//! Answer values and the per-flow answer set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One recorded answer. The shape follows the question kind.
///
/// Serialized untagged so the stored record reads
/// `string | string[] | number` per question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multi(Vec<String>),
    Scalar(i64),
}

impl AnswerValue {
    /// Whether this answer selected `choice`. Scalars never match.
    pub fn includes(&self, choice: &str) -> bool {
        match self {
            Self::Single(s) => s == choice,
            Self::Multi(items) => items.iter().any(|i| i == choice),
            Self::Scalar(_) => false,
        }
    }

    /// Whether the answer counts as given for `can_proceed`.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Multi(items) => !items.is_empty(),
            Self::Single(_) | Self::Scalar(_) => true,
        }
    }
}

/// Mapping from question id to its answer. At most one entry per id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Replace any existing answer for `question_id`.
    pub fn set(&mut self, question_id: &str, value: AnswerValue) {
        self.answers.insert(question_id.to_string(), value);
    }

    /// Toggle `choice` in the multi-choice answer for `question_id`.
    ///
    /// Selection order is kept. Returns true if the choice is now selected.
    /// An existing non-multi answer is replaced by a fresh selection.
    /// Deselecting the last choice removes the answer entirely.
    pub fn toggle(&mut self, question_id: &str, choice: &str) -> bool {
        let mut items = match self.answers.remove(question_id) {
            Some(AnswerValue::Multi(items)) => items,
            _ => Vec::new(),
        };
        let selected = match items.iter().position(|i| i == choice) {
            Some(pos) => {
                items.remove(pos);
                false
            }
            None => {
                items.push(choice.to_string());
                true
            }
        };
        if !items.is_empty() {
            self.answers
                .insert(question_id.to_string(), AnswerValue::Multi(items));
        }
        selected
    }

    /// Whether the answer for `question_id` selected `choice`.
    /// Absent answers never match.
    pub fn includes(&self, question_id: &str, choice: &str) -> bool {
        self.get(question_id).is_some_and(|a| a.includes(choice))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut answers = AnswerSet::new();
        assert!(answers.toggle("causes", "Food Security"));
        assert!(answers.includes("causes", "Food Security"));
        assert!(!answers.toggle("causes", "Food Security"));
        assert!(!answers.includes("causes", "Food Security"));
        assert_eq!(answers.get("causes"), None);
        assert!(answers.is_empty());
    }

    #[test]
    fn toggle_keeps_selection_order() {
        let mut answers = AnswerSet::new();
        answers.toggle("skills", "b");
        answers.toggle("skills", "a");
        answers.toggle("skills", "c");
        answers.toggle("skills", "a");
        assert_eq!(
            answers.get("skills"),
            Some(&AnswerValue::Multi(vec!["b".into(), "c".into()]))
        );
    }

    #[test]
    fn set_replaces() {
        let mut answers = AnswerSet::new();
        answers.set("availability", AnswerValue::Single("3-5 hours".into()));
        answers.set("availability", AnswerValue::Single("1-2 hours".into()));
        assert_eq!(answers.len(), 1);
        assert!(answers.includes("availability", "1-2 hours"));
        assert!(!answers.includes("availability", "3-5 hours"));
    }

    #[test]
    fn presence_rules() {
        assert!(AnswerValue::Single("x".into()).is_present());
        assert!(AnswerValue::Scalar(0).is_present());
        assert!(!AnswerValue::Multi(vec![]).is_present());
        assert!(AnswerValue::Multi(vec!["x".into()]).is_present());
    }

    #[test]
    fn scalars_never_include_choices() {
        assert!(!AnswerValue::Scalar(3).includes("3"));
    }

    #[test]
    fn wire_shape_is_untagged() {
        let mut answers = AnswerSet::new();
        answers.set("availability", AnswerValue::Single("1-2 hours".into()));
        answers.toggle("causes", "Food Security");
        answers.set("experience", AnswerValue::Scalar(4));

        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "availability": "1-2 hours",
                "causes": ["Food Security"],
                "experience": 4
            })
        );

        let parsed: AnswerSet = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, answers);
    }
}
