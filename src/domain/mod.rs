//! Domain layer - Core types with no infrastructure dependencies
//! 
//! This layer contains:
//! - Entities: Message events, pixel buffers, predictions, sequence states
//! - Traits: Abstractions for infrastructure (ChatSink, ImageSource, Model)

pub mod entities;
pub mod traits;
