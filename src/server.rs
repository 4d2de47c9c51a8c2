//! HTTP surface: merges the quiz, testimonial and dashboard routes.

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::dashboard::dashboard_routes;
use crate::error::Result;
use crate::quiz::{QuestionCatalog, QuizManager, quiz_routes};
use crate::store::KeyValueStore;
use crate::testimonials::{
    SharedRotator, TestimonialRotator, TestimonialsState, builtin_testimonials,
    testimonial_routes,
};

/// Long-lived service components shared by the routes.
#[derive(Clone)]
pub struct Services {
    pub quiz: Arc<QuizManager>,
    pub testimonials: TestimonialsState,
}

impl Services {
    /// Wire the built-in questionnaire and testimonials to `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let testimonials = builtin_testimonials();
        let rotator = TestimonialRotator::new(testimonials.len())?;
        Ok(Self {
            quiz: Arc::new(QuizManager::new(
                store,
                Arc::new(QuestionCatalog::builtin()),
            )),
            testimonials: TestimonialsState {
                testimonials: Arc::new(testimonials),
                rotator: Arc::new(SharedRotator::new(rotator)),
            },
        })
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "mutual-aid"
    }))
}

/// Build the full application router.
pub fn app_routes(services: &Services) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(quiz_routes(Arc::clone(&services.quiz)))
        .merge(testimonial_routes(services.testimonials.clone()))
        .merge(dashboard_routes())
        .layer(CorsLayer::permissive())
}
