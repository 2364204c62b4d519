use image::imageops::FilterType;
use std::path::{Path, PathBuf};

use crate::error::MediaError;

/// Longest side of generated thumbnails
const THUMBNAIL_SIZE: u32 = 480;

/// Extensions accepted by the file picker
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "bmp"];

/// Where imported images and their thumbnails live
#[derive(Debug, Clone, PartialEq)]
pub struct MediaLibrary {
    pub media_dir: PathBuf,
    pub thumbnail_dir: PathBuf,
}

impl MediaLibrary {
    pub fn new(data_dir: &Path, cache_dir: &Path) -> Self {
        Self {
            media_dir: data_dir.join("media"),
            thumbnail_dir: cache_dir.join("thumbnails"),
        }
    }
}

/// Copy a picked image into the media directory and generate its thumbnail.
/// Returns the stored path, which becomes the image source of the proposal.
pub async fn import_image(picked: PathBuf, library: MediaLibrary) -> Result<String, MediaError> {
    // Spawn blocking because decoding and resizing are CPU-intensive
    tokio::task::spawn_blocking(move || import_image_blocking(&picked, &library)).await?
}

fn import_image_blocking(picked: &Path, library: &MediaLibrary) -> Result<String, MediaError> {
    if !picked.is_file() {
        return Err(MediaError::Io(format!("File not found: {}", picked.display())));
    }

    // Decoding first rejects anything that is not an image
    let img = image::open(picked)?;

    std::fs::create_dir_all(&library.media_dir)?;
    std::fs::create_dir_all(&library.thumbnail_dir)?;

    let extension = picked
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "jpg".to_string());
    let stored = unique_path(&library.media_dir, &extension);
    std::fs::copy(picked, &stored)?;

    let thumbnail = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);
    let thumb_path = thumbnail_path(&library.thumbnail_dir, &stored);
    // JPEG has no alpha channel
    image::DynamicImage::ImageRgb8(thumbnail.to_rgb8()).save(&thumb_path)?;

    tracing::info!(
        "📸 Imported {} as {} ({}x{})",
        picked.display(),
        stored.display(),
        img.width(),
        img.height()
    );

    Ok(stored.to_string_lossy().to_string())
}

/// Thumbnail location for a stored media file
pub fn thumbnail_path(thumbnail_dir: &Path, stored: &Path) -> PathBuf {
    let stem = stored
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    thumbnail_dir.join(format!("{stem}.jpg"))
}

/// Pick a file name that does not exist yet: `<millis>[-n].<ext>`
fn unique_path(dir: &Path, extension: &str) -> PathBuf {
    let stamp = chrono::Utc::now().timestamp_millis();
    let mut candidate = dir.join(format!("{stamp}.{extension}"));
    let mut n = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{stamp}-{n}.{extension}"));
        n += 1;
    }
    candidate
}
