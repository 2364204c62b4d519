/// UI module
///
/// Screens and widgets of the studio:
/// - Dashboard with the proposal cards (dashboard.rs)
/// - Proposal editor (editor.rs)
/// - Client presentation (presentation.rs)
/// - Before/after comparison slider (slider.rs)
/// - Toast and lightbox overlays (overlay.rs)

pub mod dashboard;
pub mod editor;
pub mod logo;
pub mod overlay;
pub mod presentation;
pub mod slider;
pub mod style;

use iced::widget::image::Handle;
use std::path::Path;

use crate::media::{thumbnail_path, ImageCache, MediaLibrary, Tone};

/// Small preview for a stored image: its thumbnail when one was
/// generated, the full file otherwise, the placeholder when unset
pub fn thumbnail(source: &str, media: &MediaLibrary, cache: &ImageCache) -> Handle {
    if source.is_empty() {
        return cache.resolve(source, Tone::Natural).handle.clone();
    }

    let stored = Path::new(source);
    let thumb = thumbnail_path(&media.thumbnail_dir, stored);
    if thumb.is_file() {
        Handle::from_path(thumb)
    } else {
        Handle::from_path(stored)
    }
}
