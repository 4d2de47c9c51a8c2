//! The finished quiz record and its stored form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::AnswerSet;

/// Store key under which the single submission record lives.
pub const QUIZ_RESULTS_KEY: &str = "quizResults";

/// Immutable record produced when the quiz is submitted.
///
/// Serialized as `{ answers, email, timestamp }`, the shape the results
/// surface reads back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub answers: AnswerSet,
    #[serde(rename = "email")]
    pub contact: String,
    #[serde(rename = "timestamp")]
    pub submitted_at: DateTime<Utc>,
}

impl QuizSubmission {
    pub(crate) fn new(answers: AnswerSet, contact: &str, submitted_at: DateTime<Utc>) -> Self {
        Self {
            answers,
            contact: contact.to_string(),
            submitted_at,
        }
    }
}
