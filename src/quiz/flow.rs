//! Quiz flow state machine.
//!
//! Walks the question sequence one step at a time:
//! InProgress(0) → … → InProgress(N-1) → AwaitingContact → Submitted.
//! Every rejected transition leaves the flow untouched.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answers::{AnswerSet, AnswerValue};
use super::questions::{Question, QuestionCatalog, QuestionKind};
use super::submission::QuizSubmission;
use crate::error::QuizError;

/// Where the flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuizStep {
    InProgress { step: usize },
    AwaitingContact,
    Submitted,
}

impl QuizStep {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

impl std::fmt::Display for QuizStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress { step } => write!(f, "in_progress({step})"),
            Self::AwaitingContact => write!(f, "awaiting_contact"),
            Self::Submitted => write!(f, "submitted"),
        }
    }
}

/// A user's selection for the current question.
///
/// For multi-choice questions a `Choice` toggles membership; for
/// single-choice it replaces the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Choice(String),
    Scalar(i64),
}

/// Progress-bar data for the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// 1-based question number.
    pub question_number: usize,
    pub total: usize,
    /// Rounded percentage of the questionnaire reached.
    pub percent: u8,
    /// Whether advancing from here leads to the contact step.
    pub is_last: bool,
}

/// The quiz flow controller.
#[derive(Debug, Clone)]
pub struct QuizFlow {
    catalog: Arc<QuestionCatalog>,
    step: QuizStep,
    answers: AnswerSet,
}

impl QuizFlow {
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self {
            catalog,
            step: QuizStep::InProgress { step: 0 },
            answers: AnswerSet::new(),
        }
    }

    pub fn step(&self) -> QuizStep {
        self.step
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// The question being asked, if the flow is still collecting answers.
    pub fn current_question(&self) -> Option<&Question> {
        match self.step {
            QuizStep::InProgress { step } => self.catalog.get(step),
            _ => None,
        }
    }

    /// Whether the current question has an answer that allows advancing.
    pub fn can_proceed(&self) -> bool {
        self.current_question()
            .and_then(|q| self.answers.get(&q.id))
            .is_some_and(AnswerValue::is_present)
    }

    /// Record a selection for the current question.
    pub fn answer(&mut self, question_id: &str, selection: Selection) -> Result<(), QuizError> {
        let question = self.require_in_progress()?.clone();
        if question.id != question_id {
            return Err(QuizError::WrongQuestion {
                expected: question.id.clone(),
                got: question_id.to_string(),
            });
        }

        let invalid = |reason: String| QuizError::InvalidAnswer {
            question_id: question_id.to_string(),
            reason,
        };

        match (&question.kind, selection) {
            (QuestionKind::SingleChoice { .. }, Selection::Choice(choice)) => {
                if !question.has_choice(&choice) {
                    return Err(invalid(format!("unknown choice {choice:?}")));
                }
                self.answers.set(question_id, AnswerValue::Single(choice));
            }
            (QuestionKind::MultiChoice { .. }, Selection::Choice(choice)) => {
                if !question.has_choice(&choice) {
                    return Err(invalid(format!("unknown choice {choice:?}")));
                }
                self.answers.toggle(question_id, &choice);
            }
            (QuestionKind::ScalarRange { range }, Selection::Scalar(value)) => {
                if !range.contains(value) {
                    return Err(invalid(format!(
                        "{value} outside {}..={}",
                        range.min, range.max
                    )));
                }
                self.answers.set(question_id, AnswerValue::Scalar(value));
            }
            (QuestionKind::ScalarRange { .. }, Selection::Choice(_)) => {
                return Err(invalid("expected a number".to_string()));
            }
            (_, Selection::Scalar(_)) => {
                return Err(invalid("expected a choice".to_string()));
            }
        }
        Ok(())
    }

    /// Move to the next question, or to the contact step after the last one.
    pub fn advance(&mut self) -> Result<QuizStep, QuizError> {
        let question = self.require_in_progress()?;
        if !self.can_proceed() {
            return Err(QuizError::CannotProceed {
                question_id: question.id.clone(),
            });
        }
        let QuizStep::InProgress { step } = self.step else {
            return Err(QuizError::NotInProgress);
        };
        self.step = if step + 1 < self.catalog.len() {
            QuizStep::InProgress { step: step + 1 }
        } else {
            QuizStep::AwaitingContact
        };
        Ok(self.step)
    }

    /// Go back one question. Answers are kept.
    pub fn retreat(&mut self) -> Result<QuizStep, QuizError> {
        self.require_in_progress()?;
        match self.step {
            QuizStep::InProgress { step: 0 } => Err(QuizError::AtFirstStep),
            QuizStep::InProgress { step } => {
                self.step = QuizStep::InProgress { step: step - 1 };
                Ok(self.step)
            }
            _ => Err(QuizError::NotInProgress),
        }
    }

    /// Finish the flow with a contact string. The contact must contain `@`.
    pub fn submit(
        &mut self,
        contact: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<QuizSubmission, QuizError> {
        match self.step {
            QuizStep::Submitted => return Err(QuizError::AlreadySubmitted),
            QuizStep::InProgress { .. } => return Err(QuizError::NotAwaitingContact),
            QuizStep::AwaitingContact => {}
        }
        if !contact.contains('@') {
            return Err(QuizError::InvalidContact(contact.to_string()));
        }
        let submission = QuizSubmission::new(self.answers.clone(), contact, submitted_at);
        self.step = QuizStep::Submitted;
        Ok(submission)
    }

    pub fn progress(&self) -> Progress {
        let total = self.catalog.len();
        let question_number = match self.step {
            QuizStep::InProgress { step } => step + 1,
            QuizStep::AwaitingContact | QuizStep::Submitted => total,
        };
        let percent = ((question_number as f64 / total as f64) * 100.0).round() as u8;
        Progress {
            question_number,
            total,
            percent,
            is_last: question_number == total,
        }
    }

    fn require_in_progress(&self) -> Result<&Question, QuizError> {
        match self.step {
            QuizStep::Submitted => Err(QuizError::AlreadySubmitted),
            QuizStep::AwaitingContact => Err(QuizError::NotInProgress),
            QuizStep::InProgress { .. } => {
                self.current_question().ok_or(QuizError::NotInProgress)
            }
        }
    }
}
