//! Classifier adapter - runs the pre-trained model on a pixel buffer

use std::sync::Arc;

use crate::application::errors::{ClassificationError, ModelError};
use crate::domain::entities::{PixelBuffer, Prediction};
use crate::domain::traits::Model;

/// Wraps a shared, read-only model handle
#[derive(Clone)]
pub struct ClassifierAdapter {
    model: Arc<dyn Model>,
}

impl ClassifierAdapter {
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Classify synchronously. No retries and no caching.
    pub fn classify_blocking(&self, pixels: &PixelBuffer) -> Result<Prediction, ClassificationError> {
        let expected = self.model.input_len();
        if pixels.feature_len() != expected {
            return Err(ModelError::Shape {
                expected,
                actual: pixels.feature_len(),
            }
            .into());
        }

        let output = self.model.predict(&pixels.features())?;
        let confidence = output.max_probability();
        Ok(Prediction::new(output.label, confidence).with_ranking(output.probabilities))
    }

    /// Classify on the blocking pool so the runtime keeps serving other sequences
    pub async fn classify(&self, pixels: PixelBuffer) -> Result<Prediction, ClassificationError> {
        let adapter = self.clone();
        tokio::task::spawn_blocking(move || adapter.classify_blocking(&pixels))
            .await
            .map_err(|e| ClassificationError::Worker(e.to_string()))?
    }
}
