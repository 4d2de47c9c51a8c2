//! Volunteer matching quiz: questions, the step-by-step flow, and the
//! submission record it hands to the results surface.

pub mod answers;
pub mod flow;
pub mod manager;
pub mod questions;
pub mod routes;
pub mod submission;

pub use answers::{AnswerSet, AnswerValue};
pub use flow::{Progress, QuizFlow, QuizStep, Selection};
pub use manager::{QuizManager, QuizResults, QuizView};
pub use questions::{Question, QuestionCatalog, QuestionKind, ScalarRange};
pub use routes::quiz_routes;
pub use submission::{QUIZ_RESULTS_KEY, QuizSubmission};
