//! HTTP image source

use async_trait::async_trait;
use reqwest::Client;

use crate::application::errors::AcquisitionError;
use crate::domain::traits::ImageSource;

/// Fetches images over a shared connection pool
#[derive(Clone, Default)]
pub struct HttpImageSource {
    client: Client,
}

impl HttpImageSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquisitionError> {
        let response = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| AcquisitionError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AcquisitionError::Status(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AcquisitionError::Network(e.to_string()))?;

        Ok(body.to_vec())
    }
}
