/// Image decoding for display and analysis
///
/// Decoding happens on tokio's blocking pool. Sources that are empty or
/// fail to load resolve to a generated placeholder, so widgets always
/// receive a real image.

use iced::widget::image::Handle;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::path::Path;

use crate::ai::ImageData;
use crate::error::MediaError;

/// Longest side kept in memory for display
const MAX_DISPLAY_SIZE: u32 = 2400;

/// Longest side sent to the description model
const MAX_ANALYSIS_SIZE: u32 = 1600;

/// How an image is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// As captured
    Natural,
    /// Grayscale and darkened, used for the "before" side
    Muted,
}

/// A decoded image ready for the renderer
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

impl LoadedImage {
    fn from_dynamic(img: DynamicImage, tone: Tone) -> Self {
        let img = match tone {
            Tone::Natural => img,
            Tone::Muted => img.grayscale().brighten(-48),
        };
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        Self {
            handle: Handle::from_rgba(width, height, rgba.into_raw()),
            width,
            height,
        }
    }

    /// Soft architectural gradient shown when a source is missing
    pub fn placeholder(tone: Tone) -> Self {
        let (width, height) = (160, 100);
        let gradient = RgbaImage::from_fn(width, height, |x, y| {
            let t = (x + y) as f32 / (width + height) as f32;
            let shade = |from: f32, to: f32| (from + (to - from) * t) as u8;
            image::Rgba([shade(226.0, 148.0), shade(232.0, 163.0), shade(240.0, 184.0), 255])
        });
        Self::from_dynamic(DynamicImage::ImageRgba8(gradient), tone)
    }
}

/// Decode an image file for display
pub async fn load_image(source: String, tone: Tone) -> Result<LoadedImage, MediaError> {
    tokio::task::spawn_blocking(move || -> Result<LoadedImage, MediaError> {
        let img = image::open(&source)?;
        let img = fit_within(img, MAX_DISPLAY_SIZE);
        tracing::debug!("🖼️  Decoded {} ({}x{})", source, img.width(), img.height());
        Ok(LoadedImage::from_dynamic(img, tone))
    })
    .await?
}

/// Downscale and re-encode an image as JPEG for the description model
pub async fn prepare_for_analysis(source: String) -> Result<ImageData, MediaError> {
    tokio::task::spawn_blocking(move || encode_for_analysis(Path::new(&source))).await?
}

fn encode_for_analysis(source: &Path) -> Result<ImageData, MediaError> {
    let img = fit_within(image::open(source)?, MAX_ANALYSIS_SIZE);

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;

    Ok(ImageData {
        bytes,
        mime_type: "image/jpeg",
    })
}

fn fit_within(img: DynamicImage, max_side: u32) -> DynamicImage {
    if img.width().max(img.height()) > max_side {
        img.resize(max_side, max_side, FilterType::Triangle)
    } else {
        img
    }
}

type CacheKey = (String, Tone);

/// Decoded images shared by the editor preview and the presentation
#[derive(Debug)]
pub struct ImageCache {
    entries: HashMap<CacheKey, LoadedImage>,
    pending: HashSet<CacheKey>,
    failed: HashSet<CacheKey>,
    placeholder: LoadedImage,
    placeholder_muted: LoadedImage,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            pending: HashSet::new(),
            failed: HashSet::new(),
            placeholder: LoadedImage::placeholder(Tone::Natural),
            placeholder_muted: LoadedImage::placeholder(Tone::Muted),
        }
    }

    /// The decoded image for `source`, or the placeholder while it is
    /// missing, loading or broken
    pub fn resolve(&self, source: &str, tone: Tone) -> &LoadedImage {
        self.entries
            .get(&(source.to_string(), tone))
            .unwrap_or(match tone {
                Tone::Natural => &self.placeholder,
                Tone::Muted => &self.placeholder_muted,
            })
    }

    /// Drop every decoded, pending or failed image that is not in `wanted`.
    /// A decode that finishes after its key was dropped is discarded.
    pub fn retain(&mut self, wanted: &[CacheKey]) {
        let wanted: HashSet<&CacheKey> = wanted.iter().collect();
        let before = self.entries.len();

        self.entries.retain(|key, _| wanted.contains(key));
        self.pending.retain(|key| wanted.contains(key));
        self.failed.retain(|key| wanted.contains(key));

        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::debug!("🧹 Evicted {evicted} decoded images");
        }
    }

    /// Filter `requests` down to the ones that still need decoding and
    /// mark them as pending. Empty sources are never requested.
    pub fn request<I>(&mut self, requests: I) -> Vec<CacheKey>
    where
        I: IntoIterator<Item = CacheKey>,
    {
        let mut wanted = Vec::new();
        for key in requests {
            if key.0.is_empty()
                || self.entries.contains_key(&key)
                || self.pending.contains(&key)
                || self.failed.contains(&key)
            {
                continue;
            }
            self.pending.insert(key.clone());
            wanted.push(key);
        }
        wanted
    }

    /// Store the outcome of a decode started by `request`
    pub fn finish(&mut self, source: String, tone: Tone, result: Result<LoadedImage, MediaError>) {
        let key = (source, tone);
        if !self.pending.remove(&key) {
            return;
        }
        match result {
            Ok(image) => {
                self.entries.insert(key, image);
            }
            Err(e) => {
                tracing::warn!("⚠️  Could not load {}: {}", key.0, e);
                self.failed.insert(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(width: u32, height: u32) -> LoadedImage {
        LoadedImage::from_dynamic(DynamicImage::new_rgba8(width, height), Tone::Natural)
    }

    fn key(source: &str, tone: Tone) -> CacheKey {
        (source.to_string(), tone)
    }

    #[test]
    fn test_placeholder_is_never_empty() {
        let cache = ImageCache::new();
        let image = cache.resolve("", Tone::Muted);
        assert_eq!((image.width, image.height), (160, 100));
    }

    #[test]
    fn test_request_skips_empty_loaded_and_pending() {
        let mut cache = ImageCache::new();
        let first = cache.request(vec![
            ("".to_string(), Tone::Natural),
            ("/a.jpg".to_string(), Tone::Natural),
            ("/a.jpg".to_string(), Tone::Muted),
        ]);
        assert_eq!(first.len(), 2);

        // Still pending
        assert!(cache.request(vec![("/a.jpg".to_string(), Tone::Natural)]).is_empty());

        cache.finish("/a.jpg".into(), Tone::Natural, Ok(decoded(8, 8)));
        assert_eq!(cache.resolve("/a.jpg", Tone::Natural).width, 8);
        assert!(cache.request(vec![("/a.jpg".to_string(), Tone::Natural)]).is_empty());
    }

    #[test]
    fn test_failed_sources_fall_back_to_placeholder() {
        let mut cache = ImageCache::new();
        cache.request(vec![("/broken.jpg".to_string(), Tone::Natural)]);
        cache.finish(
            "/broken.jpg".into(),
            Tone::Natural,
            Err(MediaError::Decode("truncated".into())),
        );

        assert!(cache.request(vec![("/broken.jpg".to_string(), Tone::Natural)]).is_empty());
        assert_eq!(cache.resolve("/broken.jpg", Tone::Natural).width, 160);
    }

    #[test]
    fn test_retain_evicts_unwanted_images() {
        let mut cache = ImageCache::new();
        cache.request(vec![
            key("/keep.jpg", Tone::Natural),
            key("/old.jpg", Tone::Natural),
            key("/broken.jpg", Tone::Natural),
        ]);
        cache.finish("/keep.jpg".into(), Tone::Natural, Ok(decoded(8, 8)));
        cache.finish("/old.jpg".into(), Tone::Natural, Ok(decoded(12, 12)));
        cache.finish(
            "/broken.jpg".into(),
            Tone::Natural,
            Err(MediaError::Decode("truncated".into())),
        );

        cache.retain(&[key("/keep.jpg", Tone::Natural)]);

        assert_eq!(cache.resolve("/keep.jpg", Tone::Natural).width, 8);
        assert_eq!(cache.resolve("/old.jpg", Tone::Natural).width, 160);

        // Evicted keys, broken ones included, can be requested again
        let again = cache.request(vec![
            key("/keep.jpg", Tone::Natural),
            key("/old.jpg", Tone::Natural),
            key("/broken.jpg", Tone::Natural),
        ]);
        assert_eq!(
            again,
            vec![key("/old.jpg", Tone::Natural), key("/broken.jpg", Tone::Natural)]
        );
    }

    #[test]
    fn test_late_decode_after_eviction_is_discarded() {
        let mut cache = ImageCache::new();
        cache.request(vec![key("/slow.jpg", Tone::Muted)]);

        cache.retain(&[]);
        cache.finish("/slow.jpg".into(), Tone::Muted, Ok(decoded(8, 8)));

        assert_eq!(cache.resolve("/slow.jpg", Tone::Muted).width, 160);
        assert_eq!(cache.request(vec![key("/slow.jpg", Tone::Muted)]).len(), 1);
    }

    #[tokio::test]
    async fn test_load_downscales_large_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbImage::new(4800, 1200).save(&path).unwrap();

        let loaded = load_image(path.to_string_lossy().to_string(), Tone::Muted)
            .await
            .unwrap();
        assert_eq!((loaded.width, loaded.height), (2400, 600));
    }

    #[tokio::test]
    async fn test_prepare_for_analysis_encodes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.png");
        image::RgbaImage::new(64, 32).save(&path).unwrap();

        let data = prepare_for_analysis(path.to_string_lossy().to_string())
            .await
            .unwrap();
        assert_eq!(data.mime_type, "image/jpeg");
        assert_eq!(image::guess_format(&data.bytes).unwrap(), ImageFormat::Jpeg);
    }
}
