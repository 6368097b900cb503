use crate::application::errors::ModelError;

/// Output of a single inference call
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    /// Best class
    pub label: String,
    /// Class probabilities, highest first
    pub probabilities: Vec<(String, f64)>,
}

impl ModelOutput {
    /// Probability of the best class
    pub fn max_probability(&self) -> f64 {
        self.probabilities.first().map(|(_, p)| *p).unwrap_or(0.0)
    }
}

/// Model trait - pre-trained, read-only inference capability.
///
/// Implementations must be deterministic and safe to call from many tasks at once.
pub trait Model: Send + Sync {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Length of the feature vector the model expects
    fn input_len(&self) -> usize;

    /// Run inference on one feature vector
    fn predict(&self, features: &[f64]) -> Result<ModelOutput, ModelError>;
}
