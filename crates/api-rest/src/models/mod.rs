//! Request and response models

pub mod admin;
pub mod common;
pub mod kiosk;

pub use admin::{DashboardQuery, LoginRequest, LoginResponse};
pub use common::HealthResponse;
pub use kiosk::SubmitFeedbackRequest;
