//! Outbound generative-AI bridge.
//!
//! Two vendor ports sit behind traits so handlers and tests can swap
//! implementations:
//!
//! - [`chat::TextGenerator`] for chat completions (bios, dialog), implemented
//!   by [`chat::GrokClient`] against an OpenAI-compatible endpoint.
//! - [`image::ImageGenerator`] for artwork, implemented by
//!   [`image::FluxClient`] (submit a job, then poll until it is ready).
//!
//! [`content::ContentService`] layers prompt building, JSON extraction and
//! canned fallbacks on top of the text port.

use std::sync::Arc;

pub mod chat;
pub mod config;
pub mod content;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod image;
pub mod prompts;

pub use error::AiError;

use chat::{DisabledTextGenerator, GrokClient, TextGenerator};
use config::AiConfig;
use image::{DisabledImageGenerator, FluxClient, ImageGenerator};

/// Build the text port from configuration. Without an API key every call
/// fails with [`AiError::NotConfigured`], which the content layer turns into
/// canned output.
pub fn text_generator(config: &AiConfig) -> Arc<dyn TextGenerator> {
    match &config.text {
        Some(text) => Arc::new(GrokClient::new(text)),
        None => {
            tracing::warn!("XAI_API_KEY not set; text generation will use fallbacks");
            Arc::new(DisabledTextGenerator)
        }
    }
}

/// Build the image port from configuration.
pub fn image_generator(config: &AiConfig) -> Arc<dyn ImageGenerator> {
    match &config.image {
        Some(image) => Arc::new(FluxClient::new(image)),
        None => {
            tracing::warn!("BFL_API_KEY not set; image generation is disabled");
            Arc::new(DisabledImageGenerator)
        }
    }
}
