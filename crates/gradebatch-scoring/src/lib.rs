//! gradebatch-scoring: Scoring service integrations.
//!
//! Implements the `ScoringService` trait over HTTP and in-process, and
//! loads the configuration that selects between them.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{create_service, load_config, load_config_from, GradebatchConfig, ServiceConfig};
pub use gradebatch_core::error::ScoringServiceError;
pub use http::HttpScoringService;
pub use mock::MockScoringService;
