//! Linear model artifacts
//!
//! A model file is JSON of the form
//! `{"classes": [..], "coef": [[..], ..], "intercept": [..]}` with one weight
//! row and one intercept per class.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::application::errors::ModelError;
use crate::domain::traits::{Model, ModelOutput};

/// Multi-class linear classifier with softmax probabilities
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinearModel {
    #[serde(default = "default_name")]
    pub name: String,
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

fn default_name() -> String {
    "linear".to_string()
}

impl LinearModel {
    pub fn new(classes: Vec<String>, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self, ModelError> {
        let model = Self {
            name: default_name(),
            classes,
            coef,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Read and validate a model file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ModelError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(content).map_err(|e| ModelError::Load(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("no classes".to_string()));
        }
        if self.coef.len() != self.classes.len() || self.intercept.len() != self.classes.len() {
            return Err(ModelError::Invalid(format!(
                "{} classes but {} weight rows and {} intercepts",
                self.classes.len(),
                self.coef.len(),
                self.intercept.len()
            )));
        }
        let width = self.coef[0].len();
        if width == 0 || self.coef.iter().any(|row| row.len() != width) {
            return Err(ModelError::Invalid("weight rows must be non-empty and equal length".to_string()));
        }
        Ok(())
    }

    /// Raw decision score per class
    pub fn decision_function(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        let expected = self.input_len();
        if features.len() != expected {
            return Err(ModelError::Shape {
                expected,
                actual: features.len(),
            });
        }

        Ok(self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect())
    }
}

/// Numerically stable softmax
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl Model for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_len(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    fn predict(&self, features: &[f64]) -> Result<ModelOutput, ModelError> {
        let scores = self.decision_function(features)?;
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ModelError::Invalid("non-finite decision score".to_string()));
        }

        let mut probabilities: Vec<(String, f64)> = self
            .classes
            .iter()
            .cloned()
            .zip(softmax(&scores))
            .collect();
        // Stable sort keeps the first class on ties
        probabilities.sort_by(|a, b| b.1.total_cmp(&a.1));

        let label = probabilities
            .first()
            .map(|(label, _)| label.clone())
            .ok_or_else(|| ModelError::Invalid("no classes".to_string()))?;
        Ok(ModelOutput { label, probabilities })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LinearModel {
        LinearModel::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]],
            vec![0.0, 0.0, 0.1],
        )
        .unwrap()
    }

    #[test]
    fn test_predict_argmax() {
        let output = model().predict(&[3.0, 1.0]).unwrap();
        assert_eq!(output.label, "a");
        assert_eq!(output.probabilities[0].0, "a");
        let total: f64 = output.probabilities.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_first_class() {
        let m = LinearModel::new(
            vec!["x".to_string(), "y".to_string()],
            vec![vec![1.0], vec![1.0]],
            vec![0.0, 0.0],
        )
        .unwrap();
        let output = m.predict(&[2.0]).unwrap();
        assert_eq!(output.label, "x");
        assert_eq!(output.max_probability(), 0.5);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = model().predict(&[1.0]).unwrap_err();
        assert!(matches!(err, ModelError::Shape { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_from_json() {
        let m = LinearModel::from_json(
            r#"{"name": "battery", "classes": ["ok", "no"], "coef": [[1, 0, 0], [0, 1, 0]], "intercept": [0, 0]}"#,
        )
        .unwrap();
        assert_eq!(m.name(), "battery");
        assert_eq!(m.input_len(), 3);
        assert_eq!(m.num_classes(), 2);
    }

    #[test]
    fn test_rejects_inconsistent_shapes() {
        assert!(LinearModel::from_json(r#"{"classes": ["a"], "coef": [], "intercept": [0]}"#).is_err());
        assert!(LinearModel::from_json(
            r#"{"classes": ["a", "b"], "coef": [[1], [1, 2]], "intercept": [0, 0]}"#
        )
        .is_err());
        assert!(LinearModel::from_json(r#"{"classes": [], "coef": [], "intercept": []}"#).is_err());
        assert!(LinearModel::from_json("not json").is_err());
    }

    #[test]
    fn test_unvalidated_empty_model_errors() {
        let empty: LinearModel =
            serde_json::from_str(r#"{"classes": [], "coef": [], "intercept": []}"#).unwrap();
        assert_eq!(empty.input_len(), 0);
        let err = empty.predict(&[]).unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));

        let literal = LinearModel {
            name: "empty".to_string(),
            classes: Vec::new(),
            coef: Vec::new(),
            intercept: Vec::new(),
        };
        assert!(literal.predict(&[]).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = LinearModel::load("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, ModelError::Load(_)));
    }
}
