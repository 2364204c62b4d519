/// AI collaborators
///
/// This module defines the two external services the studio talks to:
/// - image-to-text description generation (`DescriptionGenerator`)
/// - text-to-speech narration with playback (`NarrationSynthesizer`)
///
/// `gemini.rs` implements both against the Gemini REST API and
/// `audio.rs` plays the synthesized speech.

pub mod audio;
pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{GenerationError, NarrationError};

pub use gemini::GeminiClient;

/// An encoded image ready to be sent to a vision model
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// Prebuilt narration voices
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Voice {
    #[default]
    Puck,
    Kore,
    Zephyr,
}

impl Voice {
    /// Name expected by the speech API
    pub fn api_name(&self) -> &'static str {
        match self {
            Voice::Puck => "Puck",
            Voice::Kore => "Kore",
            Voice::Zephyr => "Zephyr",
        }
    }
}

/// Writes a short narrative for a proposal image
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    async fn describe(
        &self,
        image: ImageData,
        project_title: &str,
        client_name: &str,
    ) -> Result<String, GenerationError>;
}

/// Speaks a text aloud; resolves once playback has finished
#[async_trait]
pub trait NarrationSynthesizer: Send + Sync {
    async fn speak(&self, text: &str, voice: Voice) -> Result<(), NarrationError>;
}

/// The collaborators handed to the app at startup
#[derive(Clone)]
pub struct Services {
    pub describer: Arc<dyn DescriptionGenerator>,
    pub narrator: Arc<dyn NarrationSynthesizer>,
}

impl Services {
    /// Use one Gemini client for both description and narration
    pub fn gemini(client: GeminiClient) -> Self {
        let client = Arc::new(client);
        Self {
            describer: client.clone(),
            narrator: client,
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
