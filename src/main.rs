use iced::widget::{scrollable, text_editor};
use iced::{Element, Subscription, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod ai;
mod config;
mod error;
mod media;
mod state;
mod ui;

use ai::audio::SystemPlayer;
use ai::{GeminiClient, Services};
use config::Settings;
use error::{GenerationError, MediaError, NarrationError, NarrationRejected};
use media::{ImageCache, LoadedImage, MediaLibrary, Tone};
use state::data::ProposalDraft;
use state::library::Library;
use state::notice::Notifier;
use state::portfolio::{Portfolio, Upsert};
use state::presentation::{LightboxState, PresentationController, ScrollAnchor};
use state::store::{MemoryStore, PersistenceStore};

/// Id of the scrollable that holds the comparison section
const STAGE_SCROLLABLE: &str = "presentation-stage";

/// Title and client used in the description prompt when a field is empty
const UNTITLED_PROJECT: &str = "Sin Titulo";
const UNNAMED_CLIENT: &str = "Cliente";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Dashboard,
    Edit,
    Presentation,
}

/// Which image of the draft a picked file goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Before,
    After,
    Gallery,
}

/// Main application state
struct Studio {
    portfolio: Portfolio,
    /// Where the proposal sequence is written after every change
    store: Box<dyn PersistenceStore>,
    services: Services,
    settings: Settings,
    media: MediaLibrary,
    images: ImageCache,
    notifier: Notifier,
    screen: Screen,
    /// Screen to go back to when the presentation closes
    return_to: Screen,
    /// Proposal being edited or presented
    draft: ProposalDraft,
    /// Editor buffer of `draft.description`
    description: text_editor::Content,
    ai_loading: bool,
    /// Narration flag shared by every presentation opened in this session
    narration: Arc<AtomicBool>,
    presentation: Option<PresentationController>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    // Dashboard
    CreateNew,
    EditProposal(String),
    PresentProposal(String),
    DeleteProposal(String),

    // Editor
    BackToDashboard,
    PreviewDraft,
    SaveDraft,
    ClientNameChanged(String),
    ProjectTitleChanged(String),
    VideoUrlChanged(String),
    DescriptionEdited(text_editor::Action),
    PickImage(ImageSlot),
    ImageImported(ImageSlot, Result<String, MediaError>),
    RemoveGalleryImage(usize),
    GenerateDescription,
    DescriptionGenerated(Result<String, GenerationError>),

    /// Background decode finished
    ImageLoaded(String, Tone, Result<LoadedImage, MediaError>),

    // Presentation
    ClosePresentation,
    SelectView(String),
    OpenLightbox(String),
    CloseLightbox,
    Narrate,
    NarrationFinished(Result<(), NarrationError>),
    SliderEngaged,

    /// Notification clock
    Tick(Instant),
}

impl Studio {
    /// Create the application from its collaborators
    fn with_services(
        settings: Settings,
        store: Box<dyn PersistenceStore>,
        services: Services,
    ) -> Self {
        let proposals = store.load().unwrap_or_else(|e| {
            tracing::error!("❌ Could not read the catalog: {e}");
            Vec::new()
        });
        let media = MediaLibrary::new(&settings.data_dir(), &settings.cache_dir());

        Studio {
            portfolio: Portfolio::new(proposals),
            store,
            services,
            settings,
            media,
            images: ImageCache::new(),
            notifier: Notifier::new(),
            screen: Screen::Dashboard,
            return_to: Screen::Dashboard,
            draft: ProposalDraft::new(),
            description: text_editor::Content::new(),
            ai_loading: false,
            narration: Arc::new(AtomicBool::new(false)),
            presentation: None,
        }
    }

    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load_or_default();

        // A catalog that cannot be opened is not fatal: work in memory
        let store: Box<dyn PersistenceStore> = match Library::new(&settings.data_dir()) {
            Ok(library) => Box::new(library),
            Err(e) => {
                tracing::error!("❌ Catalog unavailable, changes will not be kept: {e}");
                Box::new(MemoryStore::new())
            }
        };

        let player = SystemPlayer::new(std::env::temp_dir().join(config::APP_DIR));
        let client = GeminiClient::new(
            settings.resolve_api_key(),
            settings.description_model.clone(),
            settings.speech_model.clone(),
            Arc::new(player),
        );
        if !client.has_api_key() {
            tracing::warn!("⚠️  No Gemini API key found; AI features will report errors");
        }

        let studio = Self::with_services(settings, store, Services::gemini(client));
        tracing::info!(
            "🏛️  Studio initialized with {} proposals",
            studio.portfolio.len()
        );

        (studio, Task::none())
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notifier.push(message, Instant::now());
    }

    /// Write the proposal sequence back to the store
    fn persist(&mut self) {
        if let Err(e) = self.store.save(self.portfolio.proposals()) {
            tracing::error!("❌ Could not save the catalog: {e}");
            self.notify("No se pudo guardar el catálogo");
        }
    }

    fn open_editor(&mut self, draft: ProposalDraft) -> Task<Message> {
        self.description = text_editor::Content::with_text(&draft.description);
        self.draft = draft;
        self.ai_loading = false;
        self.presentation = None;
        self.screen = Screen::Edit;
        self.load_images()
    }

    fn open_presentation(&mut self, return_to: Screen) -> Task<Message> {
        let anchor = ScrollAnchor {
            id: scrollable::Id::new(STAGE_SCROLLABLE),
            offset: scrollable::RelativeOffset::START,
        };
        self.presentation = Some(PresentationController::open(
            &self.draft,
            anchor,
            self.narration.clone(),
        ));
        self.return_to = return_to;
        self.screen = Screen::Presentation;
        self.load_images()
    }

    /// Full-size images the current screen shows. The dashboard only
    /// shows thumbnails.
    fn wanted_images(&self) -> Vec<(String, Tone)> {
        let before = (self.draft.before_image.clone(), Tone::Muted);
        match (self.screen, &self.presentation) {
            (Screen::Dashboard, _) => Vec::new(),
            (Screen::Presentation, Some(controller)) => std::iter::once(before)
                .chain(
                    controller
                        .views()
                        .iter()
                        .map(|source| (source.clone(), Tone::Natural)),
                )
                .collect(),
            _ => vec![before, (self.draft.after_image.clone(), Tone::Natural)],
        }
    }

    /// Start decoding what the current screen shows and drop every
    /// decoded image it does not
    fn load_images(&mut self) -> Task<Message> {
        let wanted = self.wanted_images();
        self.images.retain(&wanted);

        Task::batch(self.images.request(wanted).into_iter().map(|(source, tone)| {
            Task::perform(media::load_image(source.clone(), tone), move |result| {
                Message::ImageLoaded(source.clone(), tone, result)
            })
        }))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CreateNew => self.open_editor(ProposalDraft::new()),
            Message::EditProposal(id) => match self.portfolio.find(&id) {
                Some(proposal) => {
                    let draft = ProposalDraft::from(proposal);
                    self.open_editor(draft)
                }
                None => Task::none(),
            },
            Message::PresentProposal(id) => match self.portfolio.find(&id) {
                Some(proposal) => {
                    self.draft = ProposalDraft::from(proposal);
                    self.open_presentation(Screen::Dashboard)
                }
                None => Task::none(),
            },
            Message::DeleteProposal(id) => {
                let confirmed = MessageDialog::new()
                    .set_level(MessageLevel::Warning)
                    .set_title("Docuarq Studio")
                    .set_description("¿Eliminar propuesta permanentemente?")
                    .set_buttons(MessageButtons::YesNo)
                    .show();

                if matches!(confirmed, MessageDialogResult::Yes) && self.portfolio.remove(&id) {
                    tracing::info!("🗑️  Deleted proposal {id}");
                    self.persist();
                    self.notify("Eliminado");
                }
                Task::none()
            }

            Message::BackToDashboard => {
                self.screen = Screen::Dashboard;
                self.load_images()
            }
            Message::PreviewDraft => self.open_presentation(Screen::Edit),
            Message::SaveDraft => {
                match self.draft.finalize(chrono::Utc::now()) {
                    Ok(proposal) => {
                        let id = proposal.id.clone();
                        match self.portfolio.upsert(proposal) {
                            Upsert::Inserted => tracing::info!("💾 Created proposal {id}"),
                            Upsert::Replaced => tracing::info!("💾 Updated proposal {id}"),
                        }
                        self.persist();
                        self.notify("Proyecto guardado");
                        self.screen = Screen::Dashboard;
                        self.load_images()
                    }
                    Err(e) => {
                        tracing::debug!("Save refused: {e}");
                        self.notify("Completa los campos obligatorios");
                        Task::none()
                    }
                }
            }
            Message::ClientNameChanged(value) => {
                self.draft.client_name = value;
                Task::none()
            }
            Message::ProjectTitleChanged(value) => {
                self.draft.project_title = value;
                Task::none()
            }
            Message::VideoUrlChanged(value) => {
                self.draft.video_url = value;
                Task::none()
            }
            Message::DescriptionEdited(action) => {
                let is_edit = action.is_edit();
                self.description.perform(action);
                if is_edit {
                    self.draft.description = self.description.text().trim_end().to_string();
                }
                Task::none()
            }
            Message::PickImage(slot) => {
                if slot == ImageSlot::Gallery && !self.draft.can_add_gallery_image() {
                    return Task::none();
                }

                let picked = FileDialog::new()
                    .set_title("Seleccionar imagen")
                    .add_filter("Imágenes", &media::import::IMAGE_EXTENSIONS[..])
                    .pick_file();

                match picked {
                    Some(path) => Task::perform(
                        media::import_image(path, self.media.clone()),
                        move |result| Message::ImageImported(slot, result),
                    ),
                    None => Task::none(),
                }
            }
            Message::ImageImported(slot, Ok(stored)) => {
                match slot {
                    ImageSlot::Before => self.draft.before_image = stored,
                    ImageSlot::After => self.draft.after_image = stored,
                    ImageSlot::Gallery => {
                        if !self.draft.push_gallery_image(stored) {
                            self.notify("La galería admite 4 imágenes");
                        }
                    }
                }
                self.load_images()
            }
            Message::ImageImported(_, Err(e)) => {
                tracing::warn!("⚠️  Import failed: {e}");
                self.notify("No se pudo importar la imagen");
                Task::none()
            }
            Message::RemoveGalleryImage(index) => {
                self.draft.remove_gallery_image(index);
                Task::none()
            }
            Message::GenerateDescription => {
                if self.ai_loading {
                    return Task::none();
                }
                if self.draft.after_image.is_empty() {
                    self.notify("Sube una propuesta primero");
                    return Task::none();
                }

                self.ai_loading = true;
                let source = self.draft.after_image.clone();
                let title = non_empty_or(&self.draft.project_title, UNTITLED_PROJECT);
                let client = non_empty_or(&self.draft.client_name, UNNAMED_CLIENT);
                let describer = self.services.describer.clone();

                Task::perform(
                    async move {
                        let image = media::prepare_for_analysis(source)
                            .await
                            .map_err(|e| GenerationError::Image(e.to_string()))?;
                        describer.describe(image, &title, &client).await
                    },
                    Message::DescriptionGenerated,
                )
            }
            Message::DescriptionGenerated(result) => {
                self.ai_loading = false;
                match result {
                    Ok(description) => {
                        self.description = text_editor::Content::with_text(&description);
                        self.draft.description = description;
                        self.notify("Narrativa generada");
                    }
                    Err(e) => {
                        tracing::error!("❌ Description generation failed: {e}");
                        self.notify("Error de conexión IA");
                    }
                }
                Task::none()
            }

            Message::ImageLoaded(source, tone, result) => {
                self.images.finish(source, tone, result);
                Task::none()
            }

            Message::ClosePresentation => {
                self.presentation = None;
                self.screen = self.return_to;
                self.load_images()
            }
            Message::SelectView(source) => {
                let Some(controller) = &mut self.presentation else {
                    return Task::none();
                };
                if !controller.select_view(&source) {
                    return Task::none();
                }
                let anchor = controller.scroll_anchor().clone();
                Task::batch([
                    scrollable::snap_to(anchor.id, anchor.offset),
                    self.load_images(),
                ])
            }
            Message::OpenLightbox(source) => {
                if let Some(controller) = &mut self.presentation {
                    controller.open_lightbox(source);
                }
                self.load_images()
            }
            Message::CloseLightbox => {
                if let Some(controller) = &mut self.presentation {
                    controller.close_lightbox();
                }
                Task::none()
            }
            Message::Narrate => {
                let Some(controller) = &self.presentation else {
                    return Task::none();
                };
                let started = controller.start_narration(
                    &self.draft.description,
                    self.services.narrator.clone(),
                    self.settings.voice,
                );

                match started {
                    Ok(playback) => {
                        tracing::info!("🎙️  Narration started");
                        Task::perform(playback, Message::NarrationFinished)
                    }
                    Err(NarrationRejected::EmptyText) => {
                        self.notify("Sin descripción");
                        Task::none()
                    }
                    Err(NarrationRejected::AlreadyPlaying) => {
                        self.notify("La narración ya está en curso");
                        Task::none()
                    }
                }
            }
            Message::NarrationFinished(Ok(())) => {
                tracing::info!("✅ Narration finished");
                Task::none()
            }
            Message::NarrationFinished(Err(e)) => {
                tracing::error!("❌ Narration failed: {e}");
                self.notify("Error de audio");
                Task::none()
            }
            Message::SliderEngaged => {
                if let Some(controller) = &mut self.presentation {
                    controller.mark_slider_engaged();
                }
                Task::none()
            }

            Message::Tick(now) => {
                self.notifier.tick(now);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let screen = match (self.screen, &self.presentation) {
            (Screen::Presentation, Some(controller)) => ui::presentation::view(
                controller,
                &self.draft,
                &self.settings.studio,
                &self.media,
                &self.images,
            ),
            (Screen::Edit, _) => ui::editor::view(
                &self.draft,
                &self.description,
                self.ai_loading,
                &self.media,
                &self.images,
            ),
            _ => ui::dashboard::view(self.portfolio.proposals(), &self.media, &self.images),
        };

        let lightbox = self
            .presentation
            .as_ref()
            .filter(|_| self.screen == Screen::Presentation)
            .and_then(|controller| match controller.lightbox() {
                LightboxState::Open(source) => Some(self.images.resolve(source, Tone::Natural)),
                LightboxState::Closed => None,
            });

        ui::overlay::layered(screen, lightbox, self.notifier.message())
    }

    /// Tick only while a notification is on screen
    fn subscription(&self) -> Subscription<Message> {
        if self.notifier.is_active() {
            iced::time::every(Duration::from_millis(250)).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application("Docuarq Studio", Studio::update, Studio::view)
        .subscription(Studio::subscription)
        .theme(Studio::theme)
        .centered()
        .run_with(Studio::new)
}
