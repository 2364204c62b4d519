/// Error types for the studio
///
/// Errors that travel inside `Message`s must be `Clone`, so collaborator
/// failures carry a rendered description instead of the source error.

use thiserror::Error;

/// Description generation failed
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerationError {
    #[error("no Gemini API key configured (set it in config.json or GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("could not prepare the image: {0}")]
    Image(String),
    #[error("request to the description model failed: {0}")]
    Request(String),
    #[error("unexpected response from the description model: {0}")]
    Response(String),
}

/// Narration failed after it was started
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NarrationError {
    /// Speech synthesis failed (network, API or payload decoding)
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
    /// Synthesized audio could not be played back
    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// A narration request was refused before anything was started
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NarrationRejected {
    #[error("there is no description to narrate")]
    EmptyText,
    #[error("a narration is already playing")]
    AlreadyPlaying,
}

/// Required proposal fields are missing on save
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("client name is required")]
    MissingClientName,
    #[error("project title is required")]
    MissingProjectTitle,
}

/// The proposal catalog could not be read or written
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("catalog database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("proposal record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Importing or decoding an image failed
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MediaError {
    #[error("file error: {0}")]
    Io(String),
    #[error("not a readable image: {0}")]
    Decode(String),
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<std::io::Error> for MediaError {
    fn from(err: std::io::Error) -> Self {
        MediaError::Io(err.to_string())
    }
}

impl From<image::ImageError> for MediaError {
    fn from(err: image::ImageError) -> Self {
        MediaError::Decode(err.to_string())
    }
}

impl From<tokio::task::JoinError> for MediaError {
    fn from(err: tokio::task::JoinError) -> Self {
        MediaError::Task(err.to_string())
    }
}
