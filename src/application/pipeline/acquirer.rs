//! Image acquirer - fetches a trigger image and turns it into a pixel buffer

use std::io::Cursor;
use std::sync::Arc;

use image::{imageops::FilterType, GenericImageView, ImageReader};

use crate::application::errors::AcquisitionError;
use crate::domain::entities::PixelBuffer;
use crate::domain::traits::ImageSource;

/// Side length the classifier was trained on
pub const DEFAULT_IMAGE_SIZE: u32 = 100;

/// Downloads and normalizes trigger images
pub struct ImageAcquirer {
    source: Arc<dyn ImageSource>,
    width: u32,
    height: u32,
}

impl ImageAcquirer {
    pub fn new(source: Arc<dyn ImageSource>) -> Self {
        Self {
            source,
            width: DEFAULT_IMAGE_SIZE,
            height: DEFAULT_IMAGE_SIZE,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Fetch `url` and decode it into a `width`×`height` BGR buffer
    pub async fn acquire(&self, url: &str) -> Result<PixelBuffer, AcquisitionError> {
        let bytes = self.source.fetch(url).await?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);

        let (width, height) = (self.width, self.height);
        tokio::task::spawn_blocking(move || decode_and_resize(&bytes, width, height))
            .await
            .map_err(|e| AcquisitionError::Decode(format!("decode task failed: {}", e)))?
    }
}

/// Decode any supported raster format and resize it with cubic interpolation
pub fn decode_and_resize(data: &[u8], width: u32, height: u32) -> Result<PixelBuffer, AcquisitionError> {
    if width == 0 || height == 0 {
        return Err(AcquisitionError::Resize(format!("invalid target size {}x{}", width, height)));
    }

    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| AcquisitionError::Decode(format!("failed to guess image format: {}", e)))?
        .decode()
        .map_err(|e| AcquisitionError::Decode(format!("failed to decode image: {}", e)))?;

    let (orig_width, orig_height) = img.dimensions();
    if orig_width == 0 || orig_height == 0 {
        return Err(AcquisitionError::Resize("source image is empty".to_string()));
    }

    let resized = img.resize_exact(width, height, FilterType::CatmullRom).to_rgb8();

    // The model was trained on BGR samples
    let mut data = resized.into_raw();
    for pixel in data.chunks_exact_mut(3) {
        pixel.swap(0, 2);
    }

    PixelBuffer::from_bgr(width, height, data)
        .ok_or_else(|| AcquisitionError::Resize("resized buffer has unexpected length".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::{ImageFormat, Rgb, RgbImage};

    fn png(width: u32, height: u32, colour: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb(colour));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    struct StaticSource(Result<Vec<u8>, u16>);

    #[async_trait]
    impl ImageSource for StaticSource {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, AcquisitionError> {
            self.0.clone().map_err(AcquisitionError::Status)
        }
    }

    #[test]
    fn test_resize_to_exact_size() {
        let buffer = decode_and_resize(&png(37, 250, [10, 20, 30]), 100, 100).unwrap();
        assert_eq!(buffer.width(), 100);
        assert_eq!(buffer.height(), 100);
        assert_eq!(buffer.as_bytes().len(), 100 * 100 * 3);
    }

    #[test]
    fn test_channels_are_bgr() {
        let buffer = decode_and_resize(&png(8, 8, [255, 0, 0]), 4, 4).unwrap();
        let first = &buffer.as_bytes()[..3];
        assert!(first[0] < 5, "blue {first:?}");
        assert!(first[1] < 5, "green {first:?}");
        assert!(first[2] > 250, "red {first:?}");
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = decode_and_resize(b"definitely not an image", 100, 100).unwrap_err();
        assert!(matches!(err, AcquisitionError::Decode(_)));
    }

    #[test]
    fn test_zero_target_is_resize_error() {
        let err = decode_and_resize(&png(4, 4, [0, 0, 0]), 0, 100).unwrap_err();
        assert!(matches!(err, AcquisitionError::Resize(_)));
    }

    #[tokio::test]
    async fn test_acquire_uses_configured_size() {
        let acquirer = ImageAcquirer::new(Arc::new(StaticSource(Ok(png(20, 20, [1, 2, 3])))))
            .with_size(10, 5);
        let buffer = acquirer.acquire("https://cdn.example/a.png").await.unwrap();
        assert_eq!((buffer.width(), buffer.height()), (10, 5));
    }

    #[tokio::test]
    async fn test_acquire_propagates_fetch_error() {
        let acquirer = ImageAcquirer::new(Arc::new(StaticSource(Err(503))));
        let err = acquirer.acquire("https://cdn.example/a.png").await.unwrap_err();
        assert!(matches!(err, AcquisitionError::Status(503)));
    }
}
