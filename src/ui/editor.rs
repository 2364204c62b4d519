/// Proposal editor
///
/// Four numbered sections: client and concept, before/after images,
/// narrative (with AI generation) and the detail gallery.
use iced::widget::{
    button, column, container, image, row, scrollable, text, text_editor, text_input, Column,
    Space,
};
use iced::{Alignment, ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use super::slider::{ComparisonSlider, SliderStyle};
use super::{style, thumbnail};
use crate::media::{ImageCache, MediaLibrary, Tone};
use crate::state::data::{ProposalDraft, MAX_GALLERY_IMAGES};
use crate::{ImageSlot, Message};

pub fn view<'a>(
    draft: &'a ProposalDraft,
    description: &'a text_editor::Content,
    ai_loading: bool,
    media: &'a MediaLibrary,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let title = if draft.id.is_some() {
        "Editar propuesta"
    } else {
        "Nueva propuesta"
    };

    let toolbar = row![
        button(text("← Volver").size(13))
            .style(style::quiet)
            .on_press(Message::BackToDashboard),
        text(title).size(18).font(style::bold()),
        Space::with_width(Length::Fill),
        button(text("Vista cliente").size(13))
            .padding([10, 20])
            .style(style::quiet)
            .on_press(Message::PreviewDraft),
        button(text("Guardar").size(13).font(style::bold()))
            .padding([10, 24])
            .style(style::primary)
            .on_press(Message::SaveDraft),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    let content = column![
        toolbar,
        section("01", "Cliente y concepto", details(draft)),
        section("02", "Antes y después", images(draft, media, cache)),
        section(
            "03",
            "Narrativa",
            narrative(draft, description, ai_loading)
        ),
        section("04", "Galería de detalles", gallery(draft, media, cache)),
    ]
    .spacing(32)
    .padding(48)
    .max_width(1100);

    container(scrollable(container(content).center_x(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(style::page)
        .into()
}

fn section<'a>(
    number: &'a str,
    label: &'a str,
    body: Element<'a, Message>,
) -> Element<'a, Message> {
    container(
        column![
            row![
                text(number).size(12).font(style::bold()).color(style::ACCENT),
                text(label.to_uppercase()).size(12).font(style::bold()),
            ]
            .spacing(12),
            body,
        ]
        .spacing(20),
    )
    .padding(32)
    .width(Length::Fill)
    .style(style::card)
    .into()
}

fn field<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: fn(String) -> Message,
) -> Element<'a, Message> {
    column![
        text(label).size(11).font(style::bold()).color(style::STONE),
        text_input(placeholder, value)
            .on_input(on_input)
            .padding(12)
            .size(16)
            .style(style::input),
    ]
    .spacing(6)
    .width(Length::Fill)
    .into()
}

fn details(draft: &ProposalDraft) -> Element<'_, Message> {
    column![
        row![
            field(
                "CLIENTE *",
                "Ej. Residencia Valdés",
                &draft.client_name,
                Message::ClientNameChanged
            ),
            field(
                "CONCEPTO DEL PROYECTO *",
                "Ej. Minimalismo Tropical",
                &draft.project_title,
                Message::ProjectTitleChanged
            ),
        ]
        .spacing(24),
        field(
            "RECORRIDO VIRTUAL (OPCIONAL)",
            "https://",
            &draft.video_url,
            Message::VideoUrlChanged
        ),
    ]
    .spacing(20)
    .into()
}

fn image_picker<'a>(
    label: &'a str,
    source: &'a str,
    slot: ImageSlot,
    media: &'a MediaLibrary,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let preview: Element<Message> = if source.is_empty() {
        container(text("Sin imagen").size(13).color(style::STONE))
            .center(Length::Fill)
            .height(180)
            .into()
    } else {
        image(thumbnail(source, media, cache))
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(180)
            .into()
    };

    let action = if source.is_empty() {
        "Seleccionar imagen"
    } else {
        "Cambiar imagen"
    };

    column![
        text(label).size(11).font(style::bold()).color(style::STONE),
        container(preview).style(style::card).clip(true),
        button(text(action).size(12))
            .style(style::quiet)
            .on_press(Message::PickImage(slot)),
    ]
    .spacing(8)
    .width(Length::Fill)
    .into()
}

fn images<'a>(
    draft: &'a ProposalDraft,
    media: &'a MediaLibrary,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let pickers = row![
        image_picker(
            "ESTADO ACTUAL",
            &draft.before_image,
            ImageSlot::Before,
            media,
            cache
        ),
        image_picker(
            "PROPUESTA DIGITAL",
            &draft.after_image,
            ImageSlot::After,
            media,
            cache
        ),
    ]
    .spacing(24);

    let mut body = Column::new().spacing(24).push(pickers);

    if !draft.before_image.is_empty() && !draft.after_image.is_empty() {
        body = body.push(
            container(
                ComparisonSlider::new(
                    cache.resolve(&draft.before_image, Tone::Muted),
                    cache.resolve(&draft.after_image, Tone::Natural),
                )
                .style(SliderStyle::compact()),
            )
            .style(style::card)
            .clip(true),
        );
    }

    body.into()
}

fn narrative<'a>(
    draft: &'a ProposalDraft,
    description: &'a text_editor::Content,
    ai_loading: bool,
) -> Element<'a, Message> {
    let label = if ai_loading {
        "Analizando..."
    } else if draft.description.trim().is_empty() {
        "Analizar Propuesta"
    } else {
        "Re-interpretar con IA"
    };

    let ai_button = button(text(label).size(12).font(style::bold()))
        .padding([10, 20])
        .style(style::accent)
        .on_press_maybe((!ai_loading).then_some(Message::GenerateDescription));

    column![
        row![
            text("Describe la atmósfera, los materiales y la luz de la propuesta.")
                .size(13)
                .color(style::STONE),
            Space::with_width(Length::Fill),
            ai_button,
        ]
        .align_y(Alignment::Center),
        text_editor(description)
            .placeholder("La narrativa que escuchará el cliente...")
            .on_action(Message::DescriptionEdited)
            .height(180)
            .padding(16),
    ]
    .spacing(16)
    .into()
}

fn gallery<'a>(
    draft: &'a ProposalDraft,
    media: &'a MediaLibrary,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let mut tiles: Vec<Element<Message>> = draft
        .gallery_images
        .iter()
        .enumerate()
        .map(|(index, detail)| {
            column![
                container(
                    image(thumbnail(&detail.src, media, cache))
                        .content_fit(ContentFit::Cover)
                        .width(220)
                        .height(150),
                )
                .style(style::card)
                .clip(true),
                button(text("Quitar").size(12))
                    .style(style::quiet)
                    .on_press(Message::RemoveGalleryImage(index)),
            ]
            .spacing(6)
            .into()
        })
        .collect();

    if draft.can_add_gallery_image() {
        tiles.push(
            button(
                container(text("+ Añadir detalle").size(13))
                    .center_x(220)
                    .center_y(150),
            )
            .style(style::quiet)
            .on_press(Message::PickImage(ImageSlot::Gallery))
            .into(),
        );
    }

    column![
        text(format!(
            "{} de {} imágenes",
            draft.gallery_images.len(),
            MAX_GALLERY_IMAGES
        ))
        .size(12)
        .color(style::STONE),
        Wrap::with_elements(tiles)
            .spacing(Pixels(16.0))
            .line_spacing(Pixels(16.0)),
    ]
    .spacing(16)
    .into()
}
