/// Presentation state controller
///
/// Owns, for one open proposal:
/// - the active image (the "after" side of the comparison slider)
/// - the narration lifecycle (Idle / Playing, one narration at a time)
/// - the lightbox overlay
///
/// The three are independent of each other and of the slider, which
/// keeps its divider position to itself.

use iced::widget::scrollable::{self, RelativeOffset};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::data::ProposalDraft;
use crate::ai::{NarrationSynthesizer, Voice};
use crate::error::{NarrationError, NarrationRejected};

/// Greeting used when the proposal has no client name
const DEFAULT_GREETING_NAME: &str = "estimado cliente";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationState {
    Idle,
    Playing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open(String),
}

/// Where to scroll so the comparison section is in view
#[derive(Debug, Clone)]
pub struct ScrollAnchor {
    pub id: scrollable::Id,
    pub offset: RelativeOffset,
}

/// Keeps the narration state `Playing` for as long as it is alive
#[derive(Debug)]
pub struct PlaybackGuard {
    playing: Arc<AtomicBool>,
}

impl Drop for PlaybackGuard {
    fn drop(&mut self) {
        self.playing.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
pub struct PresentationController {
    views: Vec<String>,
    active: String,
    lightbox: LightboxState,
    playing: Arc<AtomicBool>,
    client_name: String,
    anchor: ScrollAnchor,
    slider_engaged: bool,
}

impl PresentationController {
    /// Open `draft` for presentation. The active image starts on the
    /// proposal image and the lightbox closed.
    ///
    /// `playing` is the app-wide narration flag. It outlives the
    /// controller, so a narration started before a close and reopen still
    /// blocks a second one until its playback ends.
    pub fn open(
        draft: &ProposalDraft,
        anchor: ScrollAnchor,
        playing: Arc<AtomicBool>,
    ) -> Self {
        Self {
            views: draft.view_sources(),
            active: draft.after_image.clone(),
            lightbox: LightboxState::Closed,
            playing,
            client_name: draft.client_name.clone(),
            anchor,
            slider_engaged: false,
        }
    }

    /// Every selectable view: the proposal image, then the gallery
    pub fn views(&self) -> &[String] {
        &self.views
    }

    pub fn active_image(&self) -> &str {
        &self.active
    }

    pub fn is_active(&self, source: &str) -> bool {
        self.active == source
    }

    /// Make `source` the active image if it is one of the views.
    ///
    /// Returns `true` for every valid selection (the caller then scrolls
    /// to [`Self::scroll_anchor`]); unknown sources change nothing.
    pub fn select_view(&mut self, source: &str) -> bool {
        if !self.views.iter().any(|view| view == source) {
            tracing::debug!("Ignoring selection of unknown view {source}");
            return false;
        }
        self.active = source.to_string();
        true
    }

    pub fn scroll_anchor(&self) -> &ScrollAnchor {
        &self.anchor
    }

    pub fn lightbox(&self) -> &LightboxState {
        &self.lightbox
    }

    pub fn open_lightbox(&mut self, source: impl Into<String>) {
        self.lightbox = LightboxState::Open(source.into());
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = LightboxState::Closed;
    }

    pub fn narration_state(&self) -> NarrationState {
        if self.playing.load(Ordering::Acquire) {
            NarrationState::Playing
        } else {
            NarrationState::Idle
        }
    }

    pub fn is_narrating(&self) -> bool {
        self.narration_state() == NarrationState::Playing
    }

    /// Start narrating `text`.
    ///
    /// The check and the `Idle -> Playing` transition happen right here,
    /// before anything is awaited. The returned future owns the playback
    /// guard, so the state goes back to `Idle` when it finishes, fails or
    /// is dropped.
    pub fn start_narration(
        &self,
        text: &str,
        narrator: Arc<dyn NarrationSynthesizer>,
        voice: Voice,
    ) -> Result<impl Future<Output = Result<(), NarrationError>> + Send + 'static, NarrationRejected>
    {
        let text = text.trim();
        if text.is_empty() {
            return Err(NarrationRejected::EmptyText);
        }
        if self.playing.swap(true, Ordering::AcqRel) {
            return Err(NarrationRejected::AlreadyPlaying);
        }

        let guard = PlaybackGuard {
            playing: self.playing.clone(),
        };
        let script = narration_script(&self.client_name, text);

        Ok(async move {
            let _guard = guard;
            narrator.speak(&script, voice).await
        })
    }

    pub fn slider_engaged(&self) -> bool {
        self.slider_engaged
    }

    /// Record the slider's first-interaction signal
    pub fn mark_slider_engaged(&mut self) {
        self.slider_engaged = true;
    }
}

/// The spoken text: a greeting to the client followed by the description
pub fn narration_script(client_name: &str, description: &str) -> String {
    let name = client_name.trim();
    let name = if name.is_empty() {
        DEFAULT_GREETING_NAME
    } else {
        name
    };
    format!("Hola {name}. {description}")
}
