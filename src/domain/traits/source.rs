use async_trait::async_trait;
use crate::application::errors::AcquisitionError;

/// ImageSource trait - retrieves the raw bytes behind an image URL
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch the full response body for `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquisitionError>;
}
