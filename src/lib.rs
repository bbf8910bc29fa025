//! Library root for the `fracflood` crate
//!
//! Gateway and client for fracture-flooding suitability predictions served by
//! an external machine-learning service.

// Core error handling
pub mod api_errors;
pub mod errors;

// Domain types
pub mod prediction;
pub mod presets;
pub mod reservoir;

// Configuration & CLI
pub mod cli;
pub mod config_loader;

// Web server interface
pub mod app_state;
pub mod proxyweb;
pub mod test_actions;
pub mod upstream;

// Dashboard side
pub mod form_controller;
pub mod proxy_client;
pub mod render;

pub use errors::{GatewayError, GatewayResult};
pub use prediction::{PredictionOutcome, PredictionResult};
pub use reservoir::{FieldStage, ReservoirFeatures};
