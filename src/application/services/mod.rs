//! Application services - Stateless request handling

pub mod battery_service;

pub use battery_service::{BatteryService, PredictRequest, PredictResponse};
