//! Domain entities - Core objects with no external dependencies

pub mod message;
pub mod prediction;
pub mod sequence;

pub use message::{ChannelRef, Embed, EmbedImage, MessageEvent};
pub use prediction::{PixelBuffer, Prediction};
pub use sequence::{SequenceState, TriggerDecision};
