//! QuizManager: owns the live quiz flow and the results boundary.
//!
//! Submissions are written to the store before the flow is marked
//! submitted, so the results surface can only ever read a complete record.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::answers::AnswerValue;
use super::flow::{Progress, QuizFlow, QuizStep, Selection};
use super::questions::{Question, QuestionCatalog};
use super::submission::{QUIZ_RESULTS_KEY, QuizSubmission};
use crate::error::{Error, QuizError};
use crate::recommendations::{Recommendation, recommend};
use crate::store::KeyValueStore;

/// Snapshot of the flow for the front-end.
#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    #[serde(flatten)]
    pub step: QuizStep,
    pub progress: Progress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerValue>,
    pub can_proceed: bool,
}

/// What the results page renders.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResults {
    pub email: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub recommendations: Vec<Recommendation>,
}

/// Coordinates the single local quiz flow with the boundary store.
pub struct QuizManager {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<QuestionCatalog>,
    flow: RwLock<QuizFlow>,
}

impl QuizManager {
    pub fn new(store: Arc<dyn KeyValueStore>, catalog: Arc<QuestionCatalog>) -> Self {
        let flow = QuizFlow::new(Arc::clone(&catalog));
        Self {
            store,
            catalog,
            flow: RwLock::new(flow),
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub async fn view(&self) -> QuizView {
        let flow = self.flow.read().await;
        Self::view_of(&flow)
    }

    pub async fn answer(&self, question_id: &str, selection: Selection) -> Result<QuizView, QuizError> {
        let mut flow = self.flow.write().await;
        flow.answer(question_id, selection)?;
        Ok(Self::view_of(&flow))
    }

    pub async fn advance(&self) -> Result<QuizView, QuizError> {
        let mut flow = self.flow.write().await;
        let step = flow.advance()?;
        info!(%step, "Quiz advanced");
        Ok(Self::view_of(&flow))
    }

    pub async fn retreat(&self) -> Result<QuizView, QuizError> {
        let mut flow = self.flow.write().await;
        flow.retreat()?;
        Ok(Self::view_of(&flow))
    }

    /// Submit the flow and persist the record.
    ///
    /// The transition is applied to a copy and only committed once the
    /// store write succeeds; a failed write leaves the flow awaiting contact.
    pub async fn submit(&self, contact: &str) -> Result<QuizSubmission, Error> {
        let mut flow = self.flow.write().await;
        let mut next = flow.clone();
        let submission = next.submit(contact, Utc::now())?;

        let value = serde_json::to_value(&submission)
            .map_err(|e| crate::error::DatabaseError::Serialization(e.to_string()))?;
        self.store.set(QUIZ_RESULTS_KEY, &value).await?;

        *flow = next;
        info!(answers = submission.answers.len(), "Quiz submitted");
        Ok(submission)
    }

    /// Start over with an empty flow. The stored record is left alone.
    pub async fn reset(&self) -> QuizView {
        let mut flow = self.flow.write().await;
        *flow = QuizFlow::new(Arc::clone(&self.catalog));
        Self::view_of(&flow)
    }

    /// Read the stored submission.
    ///
    /// A record that no longer parses is logged and treated as absent.
    pub async fn stored_submission(&self) -> Result<Option<QuizSubmission>, Error> {
        let Some(value) = self.store.get(QUIZ_RESULTS_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_value::<QuizSubmission>(value) {
            Ok(submission) => Ok(Some(submission)),
            Err(e) => {
                warn!("Stored quiz results are malformed: {e}");
                Ok(None)
            }
        }
    }

    /// Recommendations for the stored submission, or `None` when the quiz
    /// has not been completed yet.
    pub async fn results(&self) -> Result<Option<QuizResults>, Error> {
        Ok(self.stored_submission().await?.map(|s| QuizResults {
            recommendations: recommend(&s.answers),
            email: s.contact,
            timestamp: s.submitted_at,
        }))
    }

    pub async fn clear_results(&self) -> Result<bool, Error> {
        Ok(self.store.clear(QUIZ_RESULTS_KEY).await?)
    }

    fn view_of(flow: &QuizFlow) -> QuizView {
        let question = flow.current_question().cloned();
        let answer = question
            .as_ref()
            .and_then(|q| flow.answers().get(&q.id))
            .cloned();
        QuizView {
            step: flow.step(),
            progress: flow.progress(),
            question,
            answer,
            can_proceed: flow.can_proceed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::DatabaseError;
    use crate::quiz::questions::ids;
    use crate::recommendations::RecommendationKind;
    use crate::store::MemoryStore;

    /// Store whose writes always fail.
    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, DatabaseError> {
            Ok(None)
        }
        async fn set(&self, _key: &str, _value: &serde_json::Value) -> Result<(), DatabaseError> {
            Err(DatabaseError::Query("disk full".to_string()))
        }
        async fn clear(&self, _key: &str) -> Result<bool, DatabaseError> {
            Ok(false)
        }
    }

    fn manager_with(store: Arc<dyn KeyValueStore>) -> QuizManager {
        QuizManager::new(store, Arc::new(QuestionCatalog::builtin()))
    }

    fn choice(s: &str) -> Selection {
        Selection::Choice(s.to_string())
    }

    /// The example scenario: short availability, food security, no tech skill.
    async fn walk_to_contact(manager: &QuizManager) {
        manager.answer(ids::AVAILABILITY, choice("1-2 hours")).await.unwrap();
        manager.advance().await.unwrap();
        manager.answer(ids::CAUSES, choice("Food Security")).await.unwrap();
        manager.advance().await.unwrap();
        manager.answer(ids::SKILLS, choice("Transportation/Driving")).await.unwrap();
        manager.advance().await.unwrap();
        manager.answer(ids::INVOLVEMENT, choice("Direct service (hands-on help)")).await.unwrap();
        manager.advance().await.unwrap();
        manager.answer(ids::EXPERIENCE, Selection::Scalar(5)).await.unwrap();
        manager.advance().await.unwrap();
        manager.answer(ids::COMMUNITY, choice("Meeting diverse people")).await.unwrap();
        let view = manager.advance().await.unwrap();
        assert_eq!(view.step, QuizStep::AwaitingContact);
    }

    #[tokio::test]
    async fn results_absent_before_submit() {
        let manager = manager_with(Arc::new(MemoryStore::new()));
        assert!(manager.results().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn submit_persists_exactly_one_record() {
        let store = Arc::new(MemoryStore::new());
        let manager = manager_with(store.clone());
        walk_to_contact(&manager).await;

        let err = manager.submit("not-an-email").await.unwrap_err();
        assert!(matches!(err, Error::Quiz(QuizError::InvalidContact(_))));
        assert!(store.get(QUIZ_RESULTS_KEY).await.unwrap().is_none());
        assert_eq!(manager.view().await.step, QuizStep::AwaitingContact);

        manager.submit("a@b.com").await.unwrap();
        assert_eq!(manager.view().await.step, QuizStep::Submitted);

        let stored = store.get(QUIZ_RESULTS_KEY).await.unwrap().unwrap();
        assert_eq!(stored["email"], "a@b.com");
        assert_eq!(stored["answers"]["availability"], "1-2 hours");

        let again = manager.submit("a@b.com").await.unwrap_err();
        assert!(matches!(again, Error::Quiz(QuizError::AlreadySubmitted)));
    }

    #[tokio::test]
    async fn example_scenario_recommendations() {
        let manager = manager_with(Arc::new(MemoryStore::new()));
        walk_to_contact(&manager).await;
        manager.submit("a@b.com").await.unwrap();

        let results = manager.results().await.unwrap().unwrap();
        let kinds: Vec<_> = results.recommendations.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::ShortCommitment,
                RecommendationKind::FoodDistribution
            ]
        );
        assert_eq!(results.email, "a@b.com");
    }

    #[tokio::test]
    async fn failed_write_keeps_awaiting_contact() {
        let manager = manager_with(Arc::new(FailingStore));
        walk_to_contact(&manager).await;

        let err = manager.submit("a@b.com").await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
        assert_eq!(manager.view().await.step, QuizStep::AwaitingContact);
    }

    #[tokio::test]
    async fn malformed_record_is_treated_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(QUIZ_RESULTS_KEY, &serde_json::json!({"unexpected": true}))
            .await
            .unwrap();
        let manager = manager_with(store);
        assert!(manager.results().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reset_starts_over_and_keeps_record() {
        let manager = manager_with(Arc::new(MemoryStore::new()));
        walk_to_contact(&manager).await;
        manager.submit("a@b.com").await.unwrap();

        let view = manager.reset().await;
        assert_eq!(view.step, QuizStep::InProgress { step: 0 });
        assert!(view.answer.is_none());
        assert!(manager.results().await.unwrap().is_some());

        assert!(manager.clear_results().await.unwrap());
        assert!(manager.results().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn view_reports_current_answer() {
        let manager = manager_with(Arc::new(MemoryStore::new()));
        let view = manager
            .answer(ids::AVAILABILITY, choice("3-5 hours"))
            .await
            .unwrap();
        assert!(view.can_proceed);
        assert_eq!(view.answer, Some(AnswerValue::Single("3-5 hours".into())));
        assert_eq!(view.question.unwrap().id, ids::AVAILABILITY);
    }
}
