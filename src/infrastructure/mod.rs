//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Http: Image download
//! - Model: Pre-trained model artifacts
//! - Server: Inference endpoint
//! - Adapters: Platform integrations (Discord, console)

pub mod adapters;
pub mod config;
pub mod http;
pub mod model;
pub mod server;
