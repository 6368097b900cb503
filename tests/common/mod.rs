//! Shared fakes for integration tests

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use tokio::sync::Mutex;
use tokio::time::Instant;

use pokeguesser::application::errors::{AcquisitionError, BotError, ModelError};
use pokeguesser::application::pipeline::{
    ClassifierAdapter, EventListener, ImageAcquirer, ResponseScheduler, TriggerFilter,
};
use pokeguesser::domain::entities::{ChannelRef, MessageEvent};
use pokeguesser::domain::traits::{ChatSink, ImageSource, Model, ModelOutput, SinkInfo};

pub const TARGET: &str = "Pokécord#4503";
pub const SPAWN_URL: &str = "https://cdn.example/PokecordSpawn.abc123.png";

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Serves canned bodies by URL; unknown URLs answer 404
pub struct FakeSource {
    pub bodies: Vec<(String, Vec<u8>)>,
}

impl FakeSource {
    pub fn serving(url: &str, body: Vec<u8>) -> Self {
        Self {
            bodies: vec![(url.to_string(), body)],
        }
    }

    pub fn with(mut self, url: &str, body: Vec<u8>) -> Self {
        self.bodies.push((url.to_string(), body));
        self
    }
}

#[async_trait]
impl ImageSource for FakeSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquisitionError> {
        self.bodies
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, body)| body.clone())
            .ok_or(AcquisitionError::Status(404))
    }
}

/// Always predicts the same label; fails if told to
pub struct FixedModel {
    pub label: String,
    pub fail: bool,
}

impl FixedModel {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            label: String::new(),
            fail: true,
        }
    }
}

impl Model for FixedModel {
    fn name(&self) -> &str {
        "fixed"
    }

    fn input_len(&self) -> usize {
        100 * 100 * 3
    }

    fn predict(&self, _features: &[f64]) -> Result<ModelOutput, ModelError> {
        if self.fail {
            return Err(ModelError::Invalid("weights corrupted".to_string()));
        }
        Ok(ModelOutput {
            label: self.label.clone(),
            probabilities: vec![(self.label.clone(), 0.97), ("Eevee".to_string(), 0.03)],
        })
    }
}

#[derive(Debug, Clone)]
pub struct Sent {
    pub at: Instant,
    pub channel: ChannelRef,
    pub text: String,
}

/// Records every outbound message
#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<Sent>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub async fn texts(&self) -> Vec<String> {
        self.sent.lock().await.iter().map(|s| s.text.clone()).collect()
    }
}

#[async_trait]
impl ChatSink for RecordingSink {
    async fn send_message(&self, channel: &ChannelRef, text: &str) -> Result<(), BotError> {
        if self.fail {
            return Err(BotError::Network("gateway unavailable".to_string()));
        }
        self.sent.lock().await.push(Sent {
            at: Instant::now(),
            channel: channel.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn sink_info(&self) -> SinkInfo {
        SinkInfo {
            platform: "test".to_string(),
            name: "recording".to_string(),
        }
    }
}

pub fn listener(
    source: FakeSource,
    model: FixedModel,
    sink: Arc<RecordingSink>,
    hints: bool,
    delay: Duration,
) -> EventListener {
    EventListener::new(
        TriggerFilter::new(TARGET, "PokecordSpawn"),
        ImageAcquirer::new(Arc::new(source)),
        ClassifierAdapter::new(Arc::new(model)),
        ResponseScheduler::new(sink, hints, delay),
    )
}

pub fn spawn_event(channel: &str, url: &str) -> MessageEvent {
    MessageEvent::new(TARGET, ChannelRef::new(channel))
        .with_content("A wild pokémon has appeared!")
        .with_image(url)
}
