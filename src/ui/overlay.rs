/// Layers drawn above the screens: the lightbox and the toast
use iced::widget::{center, container, image, mouse_area, opaque, text, Stack};
use iced::{alignment, ContentFit, Element, Length};

use super::style;
use crate::media::LoadedImage;
use crate::Message;

/// Stack the optional lightbox and toast over `content`
pub fn layered<'a>(
    content: Element<'a, Message>,
    lightbox: Option<&'a LoadedImage>,
    notice: Option<&'a str>,
) -> Element<'a, Message> {
    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(content);

    if let Some(picture) = lightbox {
        layers = layers.push(lightbox_layer(picture));
    }
    if let Some(message) = notice {
        layers = layers.push(toast(message));
    }

    layers.into()
}

/// Full-window image; a click anywhere closes it
fn lightbox_layer(picture: &LoadedImage) -> Element<'_, Message> {
    opaque(
        mouse_area(
            center(
                image(picture.handle.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .padding(40)
            .style(style::backdrop),
        )
        .on_press(Message::CloseLightbox),
    )
}

fn toast(message: &str) -> Element<'_, Message> {
    container(
        container(text(message).size(14).font(style::bold()))
            .padding([14, 28])
            .style(style::toast),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(32)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Bottom)
    .into()
}
