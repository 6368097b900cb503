//! Application layer - Use cases and orchestration
//! 
//! This layer contains:
//! - Pipeline: Trigger filtering, image acquisition, classification, timed responses
//! - Services: Stateless inference request mapping
//! - Errors: Per-stage error types

pub mod errors;
pub mod pipeline;
pub mod services;
