//! REST endpoints for the testimonials carousel.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use super::model::Testimonial;
use super::rotator::{SharedRotator, TestimonialRotator};

/// Shared state for testimonial routes.
#[derive(Clone)]
pub struct TestimonialsState {
    pub testimonials: Arc<Vec<Testimonial>>,
    pub rotator: Arc<SharedRotator>,
}

#[derive(Serialize)]
struct CarouselView {
    testimonials: Vec<Testimonial>,
    #[serde(flatten)]
    rotator: TestimonialRotator,
}

/// GET /api/testimonials
async fn get_carousel(State(state): State<TestimonialsState>) -> impl IntoResponse {
    let rotator = *state.rotator.read().await;
    Json(CarouselView {
        testimonials: state.testimonials.to_vec(),
        rotator,
    })
}

/// POST /api/testimonials/{index}/select
///
/// Shows the chosen testimonial and stops auto-advance.
async fn select(State(state): State<TestimonialsState>, Path(index): Path<usize>) -> Response {
    let mut rotator = state.rotator.write().await;
    match rotator.select(index) {
        Ok(()) => {
            info!(index, "Testimonial selected manually");
            Json(*rotator).into_response()
        }
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Build the testimonial REST routes.
pub fn testimonial_routes(state: TestimonialsState) -> Router {
    Router::new()
        .route("/api/testimonials", get(get_carousel))
        .route("/api/testimonials/{index}/select", post(select))
        .with_state(state)
}
