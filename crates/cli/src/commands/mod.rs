//! CLI command implementations

pub mod admin;
pub mod config;
pub mod kiosk;
pub mod serve;

pub use admin::{DashboardArgs, ExportArgs};
pub use config::ConfigCommand;
pub use kiosk::{HealthCommand, SubmitArgs, SummaryCommand};
pub use serve::ServeArgs;
