use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::application::errors::EndpointError;
use crate::domain::traits::{Model, ModelOutput};

/// Inference request
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PredictRequest {
    pub composition: String,
    pub packaging: String,
    pub watt_hours: f64,
}

/// Inference response. Failures carry empty `Prediction` and `Probability`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PredictResponse {
    pub status: u16,
    pub message: String,
    pub prediction: String,
    #[serde(serialize_with = "probability_or_empty")]
    pub probability: Option<f64>,
}

fn probability_or_empty<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(p) => serializer.serialize_f64(*p),
        None => serializer.serialize_str(""),
    }
}

impl PredictResponse {
    pub fn success(output: &ModelOutput) -> Self {
        Self {
            status: 200,
            message: "Success".to_string(),
            prediction: output.label.clone(),
            probability: Some(output.max_probability()),
        }
    }

    pub fn failure(error: &EndpointError) -> Self {
        Self {
            status: 400,
            message: error.to_string(),
            prediction: String::new(),
            probability: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Maps categorical battery attributes onto model features and runs inference.
///
/// Holds only read-only state loaded at startup.
pub struct BatteryService {
    model: Arc<dyn Model>,
    composition: HashMap<String, i64>,
    packaging: HashMap<String, i64>,
}

impl BatteryService {
    pub fn new(
        model: Arc<dyn Model>,
        composition: HashMap<String, i64>,
        packaging: HashMap<String, i64>,
    ) -> Self {
        Self {
            model,
            composition,
            packaging,
        }
    }

    /// Handle a raw JSON body
    pub fn handle_body(&self, body: &[u8]) -> PredictResponse {
        match serde_json::from_slice::<PredictRequest>(body) {
            Ok(request) => self.handle(&request),
            Err(e) => {
                let error = EndpointError::InvalidParameter(e.to_string());
                tracing::warn!("{}", error);
                PredictResponse::failure(&error)
            }
        }
    }

    /// Handle a parsed request
    pub fn handle(&self, request: &PredictRequest) -> PredictResponse {
        match self.predict(request) {
            Ok(output) => PredictResponse::success(&output),
            Err(error) => {
                tracing::warn!("{}", error);
                PredictResponse::failure(&error)
            }
        }
    }

    pub fn predict(&self, request: &PredictRequest) -> Result<ModelOutput, EndpointError> {
        let features = self.features(request)?;
        self.model
            .predict(&features)
            .map_err(|e| EndpointError::Model(e.to_string()))
    }

    fn features(&self, request: &PredictRequest) -> Result<Vec<f64>, EndpointError> {
        let composition = lookup(&self.composition, "Composition", &request.composition)?;
        let packaging = lookup(&self.packaging, "Packaging", &request.packaging)?;
        Ok(vec![composition as f64, packaging as f64, request.watt_hours])
    }
}

fn lookup(map: &HashMap<String, i64>, field: &str, key: &str) -> Result<i64, EndpointError> {
    map.get(key)
        .copied()
        .ok_or_else(|| EndpointError::InvalidParameter(format!("unknown {} '{}'", field, key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::ModelError;

    /// Echoes the feature vector length check and labels by packaging id
    struct FixedModel;

    impl Model for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn input_len(&self) -> usize {
            3
        }

        fn predict(&self, features: &[f64]) -> Result<ModelOutput, ModelError> {
            if features[2] < 0.0 {
                return Err(ModelError::Invalid("negative watt-hours".to_string()));
            }
            let label = if features[1] == 1.0 { "Restricted" } else { "Allowed" };
            Ok(ModelOutput {
                label: label.to_string(),
                probabilities: vec![(label.to_string(), 0.8), ("Other".to_string(), 0.2)],
            })
        }
    }

    fn service() -> BatteryService {
        BatteryService::new(
            Arc::new(FixedModel),
            HashMap::from([("LiIon".to_string(), 0), ("NiMH".to_string(), 1)]),
            HashMap::from([("Cylindrical".to_string(), 0), ("Pouch".to_string(), 1)]),
        )
    }

    fn request(composition: &str, packaging: &str, watt_hours: f64) -> PredictRequest {
        PredictRequest {
            composition: composition.to_string(),
            packaging: packaging.to_string(),
            watt_hours,
        }
    }

    #[test]
    fn test_success() {
        let response = service().handle(&request("LiIon", "Pouch", 10.0));
        assert_eq!(response.status, 200);
        assert_eq!(response.message, "Success");
        assert_eq!(response.prediction, "Restricted");
        assert_eq!(response.probability, Some(0.8));
    }

    #[test]
    fn test_unknown_composition() {
        let response = service().handle(&request("Lead", "Pouch", 10.0));
        assert_eq!(response.status, 400);
        assert!(response.message.starts_with("InvalidParameterException:"));
        assert!(response.message.contains("Lead"));
        assert!(response.prediction.is_empty());
        assert_eq!(response.probability, None);
    }

    #[test]
    fn test_unknown_packaging() {
        let response = service().handle(&request("LiIon", "Prismatic", 10.0));
        assert!(response.message.starts_with("InvalidParameterException:"));
    }

    #[test]
    fn test_model_failure() {
        let response = service().handle(&request("LiIon", "Pouch", -1.0));
        assert_eq!(response.status, 400);
        assert!(response.message.starts_with("ModelException:"));
    }

    #[test]
    fn test_missing_field_in_body() {
        let response = service().handle_body(br#"{"Composition": "LiIon", "Packaging": "Pouch"}"#);
        assert_eq!(response.status, 400);
        assert!(response.message.starts_with("InvalidParameterException:"));
        assert!(response.message.contains("WattHours"));
    }

    #[test]
    fn test_malformed_field_in_body() {
        let response = service()
            .handle_body(br#"{"Composition": "LiIon", "Packaging": "Pouch", "WattHours": "ten"}"#);
        assert!(response.message.starts_with("InvalidParameterException:"));
    }

    #[test]
    fn test_failure_serializes_empty_strings() {
        let response = service().handle(&request("Lead", "Pouch", 1.0));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["Status"], 400);
        assert_eq!(json["Prediction"], "");
        assert_eq!(json["Probability"], "");
    }

    #[test]
    fn test_success_serializes_number() {
        let json = serde_json::to_value(service().handle(&request("NiMH", "Cylindrical", 2.5))).unwrap();
        assert_eq!(json["Status"], 200);
        assert_eq!(json["Prediction"], "Allowed");
        assert_eq!(json["Probability"], 0.8);
    }
}
