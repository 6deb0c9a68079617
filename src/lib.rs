pub mod errors;
pub mod event;
pub mod gates;
pub mod github;
pub mod notify;
pub mod orchestrator;
pub mod review_config;
pub mod reviewers;
pub mod settings;
pub mod telemetry;
