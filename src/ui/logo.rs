/// The docuarq wordmark
use iced::widget::{column, container, row, text};
use iced::{Alignment, Element};

use super::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoSize {
    Small,
    Medium,
    Large,
}

impl LogoSize {
    fn word(self) -> f32 {
        match self {
            LogoSize::Small => 18.0,
            LogoSize::Medium => 26.0,
            LogoSize::Large => 44.0,
        }
    }

    fn subtitle(self) -> f32 {
        match self {
            LogoSize::Small => 7.0,
            LogoSize::Medium => 9.0,
            LogoSize::Large => 12.0,
        }
    }
}

/// "docu" knocked out of a black block, "arq" in red, and the tagline
pub fn logo<'a, Message: 'a>(size: LogoSize) -> Element<'a, Message> {
    let word = size.word();

    let mark = row![
        container(text("docu").size(word).font(style::bold()))
            .padding([0.0, word * 0.2])
            .style(style::ink_block),
        text("arq")
            .size(word)
            .font(style::bold())
            .color(style::ACCENT),
    ]
    .spacing(2)
    .align_y(Alignment::Center);

    column![
        mark,
        text("DOCUMENTOS ARQUITECTÓNICOS")
            .size(size.subtitle())
            .font(style::bold())
            .color(style::STONE),
    ]
    .spacing(4)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_grow() {
        let sizes = [LogoSize::Small, LogoSize::Medium, LogoSize::Large];
        for pair in sizes.windows(2) {
            assert!(pair[0].word() < pair[1].word());
            assert!(pair[0].subtitle() < pair[1].subtitle());
        }
    }
}
