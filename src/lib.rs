//! pokeguesser - watches a chat stream for spawn images, classifies them and
//! answers with a timed catch command. Also hosts a small stateless inference
//! endpoint for battery shipping classification.

pub mod application;
pub mod domain;
pub mod infrastructure;
