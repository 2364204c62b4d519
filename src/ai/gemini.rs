/// Gemini REST client
///
/// Both calls are blocking `ureq` requests moved onto tokio's blocking
/// pool so the UI thread never waits on the network.

use async_trait::async_trait;
use base64::Engine;
use serde_json::{json, Value};
use std::sync::Arc;

use super::audio::{AudioOutput, PcmClip, SPEECH_SAMPLE_RATE};
use super::{DescriptionGenerator, ImageData, NarrationSynthesizer, Voice};
use crate::error::{GenerationError, NarrationError};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Returned when the model answers without any text
pub const EMPTY_DESCRIPTION: &str = "No description generated.";

pub struct GeminiClient {
    api_key: Option<String>,
    description_model: String,
    speech_model: String,
    audio: Arc<dyn AudioOutput>,
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        description_model: impl Into<String>,
        speech_model: impl Into<String>,
        audio: Arc<dyn AudioOutput>,
    ) -> Self {
        Self {
            api_key,
            description_model: description_model.into(),
            speech_model: speech_model.into(),
            audio,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl DescriptionGenerator for GeminiClient {
    async fn describe(
        &self,
        image: ImageData,
        project_title: &str,
        client_name: &str,
    ) -> Result<String, GenerationError> {
        let api_key = self.api_key.clone().ok_or(GenerationError::MissingApiKey)?;
        let url = format!("{API_BASE}/{}:generateContent", self.description_model);
        let body = description_request(&image, project_title, client_name);

        tracing::info!(
            "✨ Requesting description for \"{}\" ({} KB image)",
            project_title,
            image.bytes.len() / 1024
        );

        let response = tokio::task::spawn_blocking(move || post_json(&url, &api_key, &body))
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?
            .map_err(GenerationError::Request)?;

        parse_description(&response)
    }
}

#[async_trait]
impl NarrationSynthesizer for GeminiClient {
    async fn speak(&self, text: &str, voice: Voice) -> Result<(), NarrationError> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            NarrationError::Synthesis("no Gemini API key configured".to_string())
        })?;
        let url = format!("{API_BASE}/{}:generateContent", self.speech_model);
        let body = speech_request(text, voice);
        let audio = self.audio.clone();

        tracing::info!("🔊 Synthesizing narration ({} chars, voice {:?})", text.len(), voice);

        tokio::task::spawn_blocking(move || -> Result<(), NarrationError> {
            let response = post_json(&url, &api_key, &body).map_err(NarrationError::Synthesis)?;
            let pcm = parse_speech(&response)?;
            let clip = PcmClip::from_le_bytes(&pcm, SPEECH_SAMPLE_RATE, 1);
            audio.play(&clip)
        })
        .await
        .map_err(|e| NarrationError::Playback(e.to_string()))?
    }
}

/// POST a JSON body and read the JSON answer
fn post_json(url: &str, api_key: &str, body: &Value) -> Result<Value, String> {
    let mut response = ureq::post(url)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .send_json(body)
        .map_err(|e| e.to_string())?;

    response
        .body_mut()
        .read_json::<Value>()
        .map_err(|e| e.to_string())
}

fn description_prompt(project_title: &str, client_name: &str) -> String {
    format!(
        "You are a high-end expert architect at Docuarq. Describe the materials, textures, \
         lighting, and spatial feeling of this architectural proposal for the project \
         \"{project_title}\" for client \"{client_name}\". Tone: Elegant, professional, \
         and evocative. Use Spanish. No markdown. Max 60 words."
    )
}

fn description_request(image: &ImageData, project_title: &str, client_name: &str) -> Value {
    let data = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
    json!({
        "contents": [{
            "parts": [
                { "text": description_prompt(project_title, client_name) },
                { "inlineData": { "mimeType": image.mime_type, "data": data } }
            ]
        }],
        "generationConfig": {
            "temperature": 0.7
        }
    })
}

fn speech_request(text: &str, voice: Voice) -> Value {
    json!({
        "contents": [{
            "parts": [{
                "text": format!("Say in a calm, warm, authoritative architect voice: \"{text}\"")
            }]
        }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": voice.api_name() }
                }
            }
        }
    })
}

/// Concatenate the text parts of the first candidate
fn parse_description(response: &Value) -> Result<String, GenerationError> {
    let parts = response["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| GenerationError::Response("no candidates in response".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect::<Vec<_>>()
        .join("");

    let text = text.trim();
    if text.is_empty() {
        Ok(EMPTY_DESCRIPTION.to_string())
    } else {
        Ok(text.to_string())
    }
}

/// Extract and decode the inline audio payload of the first candidate
fn parse_speech(response: &Value) -> Result<Vec<u8>, NarrationError> {
    let b64 = response["candidates"][0]["content"]["parts"][0]["inlineData"]["data"]
        .as_str()
        .ok_or_else(|| NarrationError::Synthesis("no audio content returned".to_string()))?;

    base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| NarrationError::Synthesis(format!("invalid audio payload: {e}")))
}
