//! Trigger pipeline - event intake through timed response

pub mod acquirer;
pub mod classifier;
pub mod filter;
pub mod hint;
pub mod listener;
pub mod scheduler;
pub mod sequence;

pub use acquirer::ImageAcquirer;
pub use classifier::ClassifierAdapter;
pub use filter::TriggerFilter;
pub use hint::mask_label;
pub use listener::{EventListener, SequenceReport};
pub use scheduler::ResponseScheduler;
pub use sequence::SequenceTracker;
