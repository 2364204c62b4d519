/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the catalog layer and the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum number of detail images a proposal can carry
pub const MAX_GALLERY_IMAGES: usize = 4;

/// One detail image of a proposal gallery
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    /// Path of the image inside the studio media directory
    pub src: String,
    /// Free-form caption (may be empty)
    #[serde(default)]
    pub description: String,
}

impl GalleryImage {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            description: String::new(),
        }
    }
}

/// A saved before/after proposal
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Unique id (creation instant in epoch milliseconds)
    pub id: String,
    pub client_name: String,
    pub project_title: String,
    /// Narrative shown in the presentation and read by the narrator
    #[serde(default)]
    pub description: String,
    /// Current state of the space (may be empty)
    #[serde(default)]
    pub before_image: String,
    /// Digital proposal (may be empty)
    #[serde(default)]
    pub after_image: String,
    #[serde(default)]
    pub gallery_images: Vec<GalleryImage>,
    /// Optional virtual tour link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The editable form of a proposal
///
/// New proposals start empty; editing starts from a saved proposal.
/// Id and timestamps are only assigned when the draft is finalized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProposalDraft {
    pub id: Option<String>,
    pub client_name: String,
    pub project_title: String,
    pub description: String,
    pub before_image: String,
    pub after_image: String,
    pub gallery_images: Vec<GalleryImage>,
    pub video_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl ProposalDraft {
    /// Create an empty draft for a new proposal
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether another gallery image can be added
    pub fn can_add_gallery_image(&self) -> bool {
        self.gallery_images.len() < MAX_GALLERY_IMAGES
    }

    /// Append a gallery image, ignoring it once the gallery is full.
    /// Returns whether the image was added.
    pub fn push_gallery_image(&mut self, src: impl Into<String>) -> bool {
        if !self.can_add_gallery_image() {
            return false;
        }
        self.gallery_images.push(GalleryImage::new(src));
        true
    }

    /// Remove the gallery image at `index` if it exists
    pub fn remove_gallery_image(&mut self, index: usize) {
        if index < self.gallery_images.len() {
            self.gallery_images.remove(index);
        }
    }

    /// Every source that can be shown as the "after" side of the slider,
    /// in display order: the proposal image first, then the gallery.
    pub fn view_sources(&self) -> Vec<String> {
        view_sources(&self.after_image, &self.gallery_images)
    }

    /// Validate the draft and turn it into a saved proposal.
    ///
    /// Client name and project title are required. An existing id and
    /// creation time are kept; new proposals get `now` for both.
    pub fn finalize(&self, now: DateTime<Utc>) -> Result<Proposal, ValidationError> {
        if self.client_name.trim().is_empty() {
            return Err(ValidationError::MissingClientName);
        }
        if self.project_title.trim().is_empty() {
            return Err(ValidationError::MissingProjectTitle);
        }

        let video_url = self.video_url.trim();

        Ok(Proposal {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| now.timestamp_millis().to_string()),
            client_name: self.client_name.clone(),
            project_title: self.project_title.clone(),
            description: self.description.clone(),
            before_image: self.before_image.clone(),
            after_image: self.after_image.clone(),
            gallery_images: self.gallery_images.clone(),
            video_url: (!video_url.is_empty()).then(|| video_url.to_string()),
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        })
    }
}

impl From<&Proposal> for ProposalDraft {
    fn from(proposal: &Proposal) -> Self {
        Self {
            id: Some(proposal.id.clone()),
            client_name: proposal.client_name.clone(),
            project_title: proposal.project_title.clone(),
            description: proposal.description.clone(),
            before_image: proposal.before_image.clone(),
            after_image: proposal.after_image.clone(),
            gallery_images: proposal.gallery_images.clone(),
            video_url: proposal.video_url.clone().unwrap_or_default(),
            created_at: Some(proposal.created_at),
        }
    }
}

fn view_sources(after_image: &str, gallery: &[GalleryImage]) -> Vec<String> {
    std::iter::once(after_image.to_string())
        .chain(gallery.iter().map(|image| image.src.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn filled_draft() -> ProposalDraft {
        ProposalDraft {
            client_name: "Residencia Valdés".into(),
            project_title: "Minimalismo Tropical".into(),
            after_image: "/media/after.jpg".into(),
            ..ProposalDraft::new()
        }
    }

    #[test]
    fn test_finalize_requires_client_and_title() {
        let mut draft = ProposalDraft::new();
        assert_eq!(
            draft.finalize(instant(10)),
            Err(ValidationError::MissingClientName)
        );

        draft.client_name = "Cliente".into();
        draft.project_title = "   ".into();
        assert_eq!(
            draft.finalize(instant(10)),
            Err(ValidationError::MissingProjectTitle)
        );
    }

    #[test]
    fn test_finalize_new_proposal_assigns_id_and_timestamps() {
        let now = instant(1_700_000_000);
        let proposal = filled_draft().finalize(now).unwrap();

        assert_eq!(proposal.id, now.timestamp_millis().to_string());
        assert_eq!(proposal.created_at, now);
        assert_eq!(proposal.updated_at, now);
        assert_eq!(proposal.video_url, None);
    }

    #[test]
    fn test_finalize_existing_keeps_id_and_creation_time() {
        let created = instant(1_000);
        let saved = filled_draft().finalize(created).unwrap();

        let mut draft = ProposalDraft::from(&saved);
        draft.description = "Luz cálida".into();
        draft.video_url = " https://tour.example/1 ".into();

        let updated = draft.finalize(instant(2_000)).unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, instant(2_000));
        assert_eq!(updated.video_url.as_deref(), Some("https://tour.example/1"));
    }

    #[test]
    fn test_gallery_is_capped() {
        let mut draft = ProposalDraft::new();
        for i in 0..MAX_GALLERY_IMAGES {
            assert!(draft.push_gallery_image(format!("/media/{i}.jpg")));
        }
        assert!(!draft.can_add_gallery_image());
        assert!(!draft.push_gallery_image("/media/extra.jpg"));
        assert_eq!(draft.gallery_images.len(), MAX_GALLERY_IMAGES);

        draft.remove_gallery_image(1);
        draft.remove_gallery_image(42);
        assert_eq!(draft.gallery_images.len(), MAX_GALLERY_IMAGES - 1);
        assert_eq!(draft.gallery_images[1].src, "/media/2.jpg");
    }

    #[test]
    fn test_view_sources_order() {
        let mut draft = filled_draft();
        draft.push_gallery_image("/media/b.jpg");
        draft.push_gallery_image("/media/c.jpg");

        assert_eq!(
            draft.view_sources(),
            vec!["/media/after.jpg", "/media/b.jpg", "/media/c.jpg"]
        );
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let proposal = filled_draft().finalize(instant(5)).unwrap();
        let json = serde_json::to_value(&proposal).unwrap();

        assert!(json.get("clientName").is_some());
        assert!(json.get("galleryImages").is_some());
        assert!(json.get("videoUrl").is_none());
    }
}
