//! REST endpoints for the quiz flow and the results page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{debug, error};

use super::flow::Selection;
use super::manager::QuizManager;
use crate::error::{Error, QuizError};

/// Where the results page sends visitors who have not taken the quiz.
pub const QUIZ_ENTRY_POINT: &str = "/#quiz";

#[derive(Debug, Deserialize)]
struct AnswerRequest {
    question_id: String,
    value: Selection,
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    email: String,
}

/// Build the quiz REST routes.
pub fn quiz_routes(manager: Arc<QuizManager>) -> Router {
    Router::new()
        .route("/api/quiz", get(get_view))
        .route("/api/quiz/questions", get(get_questions))
        .route("/api/quiz/answer", post(answer))
        .route("/api/quiz/advance", post(advance))
        .route("/api/quiz/retreat", post(retreat))
        .route("/api/quiz/submit", post(submit))
        .route("/api/quiz/reset", post(reset))
        .route("/api/quiz/results", get(get_results).delete(clear_results))
        .with_state(manager)
}

async fn get_view(State(manager): State<Arc<QuizManager>>) -> impl IntoResponse {
    Json(manager.view().await)
}

async fn get_questions(State(manager): State<Arc<QuizManager>>) -> impl IntoResponse {
    Json(manager.catalog().clone())
}

async fn answer(
    State(manager): State<Arc<QuizManager>>,
    Json(body): Json<AnswerRequest>,
) -> Response {
    match manager.answer(&body.question_id, body.value).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => quiz_error_response(e),
    }
}

async fn advance(State(manager): State<Arc<QuizManager>>) -> Response {
    match manager.advance().await {
        Ok(view) => Json(view).into_response(),
        Err(e) => quiz_error_response(e),
    }
}

async fn retreat(State(manager): State<Arc<QuizManager>>) -> Response {
    match manager.retreat().await {
        Ok(view) => Json(view).into_response(),
        Err(e) => quiz_error_response(e),
    }
}

async fn reset(State(manager): State<Arc<QuizManager>>) -> impl IntoResponse {
    Json(manager.reset().await)
}

async fn submit(
    State(manager): State<Arc<QuizManager>>,
    Json(body): Json<SubmitRequest>,
) -> Response {
    match manager.submit(&body.email).await {
        Ok(submission) => Json(submission).into_response(),
        Err(Error::Quiz(e)) => quiz_error_response(e),
        Err(e) => internal_error(e),
    }
}

/// GET /api/quiz/results
///
/// Recommendations for the stored submission. Without one, redirects to
/// the quiz instead of rendering.
async fn get_results(State(manager): State<Arc<QuizManager>>) -> Response {
    match manager.results().await {
        Ok(Some(results)) => Json(results).into_response(),
        Ok(None) => {
            debug!("No stored quiz results, redirecting to quiz");
            Redirect::to(QUIZ_ENTRY_POINT).into_response()
        }
        Err(e) => internal_error(e),
    }
}

async fn clear_results(State(manager): State<Arc<QuizManager>>) -> Response {
    match manager.clear_results().await {
        Ok(removed) => Json(serde_json::json!({ "removed": removed })).into_response(),
        Err(e) => internal_error(e),
    }
}

fn quiz_error_response(e: QuizError) -> Response {
    let status = match e {
        QuizError::InvalidAnswer { .. } | QuizError::InvalidContact(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        QuizError::WrongQuestion { .. }
        | QuizError::CannotProceed { .. }
        | QuizError::AtFirstStep
        | QuizError::NotInProgress
        | QuizError::NotAwaitingContact
        | QuizError::AlreadySubmitted => StatusCode::CONFLICT,
    };
    debug!(%status, "Rejected quiz transition: {e}");
    (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
}

fn internal_error(e: Error) -> Response {
    error!("Quiz request failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": e.to_string() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use super::*;
    use crate::quiz::QuestionCatalog;
    use crate::store::MemoryStore;

    fn app() -> Router {
        let manager = Arc::new(QuizManager::new(
            Arc::new(MemoryStore::new()),
            Arc::new(QuestionCatalog::builtin()),
        ));
        quiz_routes(manager)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn results_redirect_when_missing() {
        let resp = app()
            .oneshot(Request::get("/api/quiz/results").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], QUIZ_ENTRY_POINT);
    }

    #[tokio::test]
    async fn advance_without_answer_conflicts() {
        let resp = app()
            .oneshot(Request::post("/api/quiz/advance").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_choice_is_unprocessable() {
        let resp = app()
            .oneshot(post_json(
                "/api/quiz/answer",
                serde_json::json!({"question_id": "availability", "value": "forever"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn answer_returns_view() {
        let resp = app()
            .oneshot(post_json(
                "/api/quiz/answer",
                serde_json::json!({"question_id": "availability", "value": "1-2 hours"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
