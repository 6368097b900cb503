//! Domain traits - Abstractions for infrastructure implementations

pub mod chat;
pub mod model;
pub mod source;

pub use chat::{ChatSink, SinkInfo};
pub use model::{Model, ModelOutput};
pub use source::ImageSource;
