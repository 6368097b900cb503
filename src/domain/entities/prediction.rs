/// Number of interleaved colour channels in a pixel buffer (B, G, R)
pub const CHANNELS: usize = 3;

/// Fixed-size decoded image, row-major with interleaved BGR samples.
///
/// Fields are private so a buffer cannot change after it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw BGR samples. Returns `None` if the length does not match the dimensions.
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if width == 0 || height == 0 || data.len() != expected {
            return None;
        }
        Some(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of features produced by [`PixelBuffer::features`]
    pub fn feature_len(&self) -> usize {
        self.data.len()
    }

    /// Flatten into the classifier's feature vector (raw sample values)
    pub fn features(&self) -> Vec<f64> {
        self.data.iter().map(|&v| f64::from(v)).collect()
    }
}

/// Classifier output
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Best label
    pub label: String,
    /// Probability of the best label
    pub confidence: f64,
    /// Every class with its probability, highest first
    pub ranking: Vec<(String, f64)>,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        let label = label.into();
        Self {
            ranking: vec![(label.clone(), confidence)],
            label,
            confidence,
        }
    }

    pub fn with_ranking(mut self, ranking: Vec<(String, f64)>) -> Self {
        self.ranking = ranking;
        self
    }
}
