/// Proposal image handling
///
/// This module handles:
/// - Importing picked files into the studio media directory
/// - Generating dashboard thumbnails
/// - Decoding images for the comparison slider (with placeholders)
/// - Re-encoding images for the description model

pub mod import;
pub mod loader;

pub use import::{import_image, thumbnail_path, MediaLibrary};
pub use loader::{load_image, prepare_for_analysis, ImageCache, LoadedImage, Tone};
