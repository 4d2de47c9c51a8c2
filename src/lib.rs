//! Mutual Aid: volunteer matching quiz, recommendations and site content.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod quiz;
pub mod recommendations;
pub mod server;
pub mod store;
pub mod testimonials;
