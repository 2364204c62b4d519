/// Client presentation
///
/// Fixed left panel with the project text and narration, and a scrollable
/// column whose first section is the comparison slider. Selecting a view
/// scrolls that column back to the slider.
use iced::widget::{button, column, container, image, row, scrollable, text, Column, Space};
use iced::{Alignment, ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use super::logo::{logo, LogoSize};
use super::slider::{ComparisonSlider, SliderStyle};
use super::{style, thumbnail};
use crate::config::StudioContact;
use crate::media::{ImageCache, MediaLibrary, Tone};
use crate::state::data::ProposalDraft;
use crate::state::presentation::PresentationController;
use crate::Message;

pub fn view<'a>(
    controller: &'a PresentationController,
    draft: &'a ProposalDraft,
    contact: &'a StudioContact,
    media: &'a MediaLibrary,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let top_bar = row![
        logo(LogoSize::Small),
        Space::with_width(Length::Fill),
        text(format!("Tel. {}", contact.phone))
            .size(12)
            .color(style::STONE),
        button(text("Cerrar sesión").size(12).font(style::bold()))
            .padding([10, 20])
            .style(style::primary)
            .on_press(Message::ClosePresentation),
    ]
    .spacing(24)
    .padding([16, 32])
    .align_y(Alignment::Center);

    let stage = scrollable(
        column![
            comparison(controller, draft, cache),
            atmospheres(controller, media, cache),
            footer(contact),
        ]
        .spacing(48)
        .padding(32),
    )
    .id(controller.scroll_anchor().id.clone())
    .width(Length::FillPortion(3))
    .height(Length::Fill);

    let body = row![story(controller, draft), stage].height(Length::Fill);

    container(column![top_bar, body])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(style::page)
        .into()
}

/// Title, client and narrative with the narration button
fn story<'a>(
    controller: &'a PresentationController,
    draft: &'a ProposalDraft,
) -> Element<'a, Message> {
    let mut panel = Column::new()
        .spacing(20)
        .padding(40)
        .push(
            text(format!("PROPUESTA PARA {}", draft.client_name.to_uppercase()))
                .size(11)
                .font(style::bold())
                .color(style::ACCENT),
        )
        .push(text(&draft.project_title).size(40).font(style::bold()));

    if !draft.description.trim().is_empty() {
        let playing = controller.is_narrating();
        let label = if playing {
            "Narrando..."
        } else {
            "Escuchar narrativa"
        };

        panel = panel.push(
            container(
                column![
                    text(&draft.description).size(16),
                    button(text(label).size(12).font(style::bold()))
                        .padding([10, 20])
                        .style(if playing { style::accent } else { style::primary })
                        .on_press_maybe((!playing).then_some(Message::Narrate)),
                ]
                .spacing(20),
            )
            .padding(24)
            .style(style::card),
        );
    }

    if !draft.video_url.trim().is_empty() {
        panel = panel.push(
            text(format!("Recorrido virtual: {}", draft.video_url.trim()))
                .size(12)
                .color(style::STONE),
        );
    }

    scrollable(panel)
        .width(Length::FillPortion(2))
        .height(Length::Fill)
        .into()
}

/// Slider with the state badges above and the hint below
fn comparison<'a>(
    controller: &'a PresentationController,
    draft: &'a ProposalDraft,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let look = SliderStyle::studio();

    let slider = ComparisonSlider::new(
        cache.resolve(&draft.before_image, Tone::Muted),
        cache.resolve(controller.active_image(), Tone::Natural),
    )
    .style(look)
    .on_first_interact(Message::SliderEngaged);

    let mut section = Column::new().spacing(12);

    if look.show_labels {
        section = section.push(row![
            badge("ESTADO ACTUAL"),
            Space::with_width(Length::Fill),
            badge("PROPUESTA DIGITAL"),
        ]);
    }

    section = section.push(container(slider).style(style::card).clip(true));

    if !controller.slider_engaged() {
        section = section.push(
            container(text("Desliza para comparar").size(12).color(style::STONE))
                .center_x(Length::Fill),
        );
    }

    section.into()
}

fn badge(label: &str) -> Element<'_, Message> {
    container(text(label).size(10).font(style::bold()))
        .padding([6, 14])
        .style(style::badge)
        .into()
}

/// Every view of the proposal; the active one is highlighted
fn atmospheres<'a>(
    controller: &'a PresentationController,
    media: &'a MediaLibrary,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let tiles = controller
        .views()
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let picture = button(
                image(thumbnail(source, media, cache))
                    .content_fit(ContentFit::Cover)
                    .width(260)
                    .height(170),
            )
            .padding(0)
            .style(style::quiet)
            .on_press(Message::SelectView(source.clone()));

            let caption = if index == 0 {
                "Propuesta".to_string()
            } else {
                format!("Detalle {index}")
            };

            column![
                container(picture)
                    .padding(4)
                    .style(style::view_frame(controller.is_active(source))),
                row![
                    text(caption).size(12).color(style::STONE),
                    Space::with_width(Length::Fill),
                    button(text("Ampliar").size(12))
                        .style(style::quiet)
                        .on_press(Message::OpenLightbox(source.clone())),
                ]
                .width(268)
                .align_y(Alignment::Center),
            ]
            .spacing(6)
            .into()
        })
        .collect();

    column![
        text("Atmósferas").size(28).font(style::bold()),
        Wrap::with_elements(tiles)
            .spacing(Pixels(20.0))
            .line_spacing(Pixels(20.0)),
    ]
    .spacing(20)
    .into()
}

fn footer(contact: &StudioContact) -> Element<'_, Message> {
    container(
        row![
            text(format!("WhatsApp: wa.me/{}", contact.whatsapp)).size(12),
            Space::with_width(Length::Fill),
            text(&contact.location).size(12).color(style::STONE),
        ]
        .align_y(Alignment::Center),
    )
    .padding([24, 0])
    .into()
}
