/// Proposal dashboard: header, empty state and the card grid
use iced::widget::{button, column, container, image, row, scrollable, text, Space};
use iced::{Alignment, ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use super::logo::{logo, LogoSize};
use super::{style, thumbnail};
use crate::media::{ImageCache, MediaLibrary};
use crate::state::data::Proposal;
use crate::Message;

const CARD_WIDTH: f32 = 320.0;

pub fn view<'a>(
    proposals: &'a [Proposal],
    media: &'a MediaLibrary,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let header = row![
        logo(LogoSize::Medium),
        Space::with_width(Length::Fill),
        button(text("NUEVA PROPUESTA").font(style::bold()).size(13))
            .padding([14, 28])
            .style(style::primary)
            .on_press(Message::CreateNew),
    ]
    .align_y(Alignment::Center);

    let body: Element<Message> = if proposals.is_empty() {
        empty_state()
    } else {
        let cards = proposals
            .iter()
            .map(|proposal| card(proposal, media, cache))
            .collect();
        Wrap::with_elements(cards)
            .spacing(Pixels(24.0))
            .line_spacing(Pixels(24.0))
            .into()
    };

    let content = column![
        header,
        text(format!("{} propuestas", proposals.len()))
            .size(12)
            .color(style::STONE),
        body,
    ]
    .spacing(32)
    .padding(48);

    container(scrollable(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(style::page)
        .into()
}

fn empty_state<'a>() -> Element<'a, Message> {
    container(
        column![
            logo(LogoSize::Large),
            text("Comienza tu próxima gran obra")
                .size(28)
                .font(style::bold()),
            text("Crea una propuesta con el estado actual y la visión digital del espacio.")
                .size(14)
                .color(style::STONE),
            button(text("Crear primera propuesta").size(13))
                .padding([12, 24])
                .style(style::accent)
                .on_press(Message::CreateNew),
        ]
        .spacing(16)
        .align_x(Alignment::Center),
    )
    .padding(80)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .style(style::card)
    .into()
}

fn card<'a>(
    proposal: &'a Proposal,
    media: &'a MediaLibrary,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let cover = image(thumbnail(&proposal.after_image, media, cache))
        .content_fit(ContentFit::Cover)
        .width(Length::Fill)
        .height(200);

    let actions = row![
        button(text("Presentar HD").size(12).font(style::bold()))
            .padding([10, 18])
            .style(style::primary)
            .on_press(Message::PresentProposal(proposal.id.clone())),
        Space::with_width(Length::Fill),
        button(text("Editar").size(12))
            .style(style::quiet)
            .on_press(Message::EditProposal(proposal.id.clone())),
        button(text("Eliminar").size(12))
            .style(style::quiet)
            .on_press(Message::DeleteProposal(proposal.id.clone())),
    ]
    .spacing(4)
    .align_y(Alignment::Center);

    let details = column![
        text(proposal.client_name.to_uppercase())
            .size(11)
            .font(style::bold())
            .color(style::ACCENT),
        text(&proposal.project_title).size(20).font(style::bold()),
        text(format!(
            "Actualizado {}",
            proposal.updated_at.format("%d/%m/%Y")
        ))
        .size(11)
        .color(style::STONE),
        actions,
    ]
    .spacing(8)
    .padding(20);

    container(column![cover, details])
        .width(CARD_WIDTH)
        .style(style::card)
        .clip(true)
        .into()
}
