//! Testimonials carousel: the fixed testimonial list and its rotator.

pub mod model;
pub mod rotator;
pub mod routes;

pub use model::{Testimonial, builtin_testimonials};
pub use rotator::{
    DEFAULT_ROTATION_INTERVAL, RotationTicker, SharedRotator, TestimonialRotator,
    spawn_rotation_ticker,
};
pub use routes::{TestimonialsState, testimonial_routes};
