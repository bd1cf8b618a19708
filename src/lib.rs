//! # Pitch Metrics
//!
//! Football analytics engine: advanced team and player metrics, team
//! comparisons and match outcome predictions.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (matches, metrics, predictions)
//! - **calculate**: Pure metric and probability computation
//! - **provider**: Match, roster and player statistics sources
//! - **storage**: Filesystem data lake operations (JSONL)
//! - **engine**: Analytics entry points wiring providers to calculators
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod engine;
pub mod models;
pub mod provider;
pub mod storage;

pub use engine::{AnalyticsEngine, EngineError};
pub use models::*;
