/// Studio palette and widget styles
use iced::widget::{button, container, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

pub const INK: Color = Color::from_rgb(0.04, 0.04, 0.04);
pub const ACCENT: Color = Color::from_rgb(0.86, 0.15, 0.15);
pub const PAPER: Color = Color::from_rgb(0.98, 0.98, 0.976);
pub const STONE: Color = Color::from_rgb(0.47, 0.44, 0.42);
pub const STONE_LIGHT: Color = Color::from_rgb(0.91, 0.90, 0.89);

pub fn bold() -> iced::Font {
    iced::Font {
        weight: iced::font::Weight::Bold,
        ..iced::Font::DEFAULT
    }
}

pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(PAPER)),
        text_color: Some(INK),
        ..Default::default()
    }
}

pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::WHITE)),
        border: Border {
            color: STONE_LIGHT,
            width: 1.0,
            radius: 24.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.06),
            offset: Vector::new(0.0, 8.0),
            blur_radius: 24.0,
        },
        ..Default::default()
    }
}

pub fn ink_block(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(INK)),
        text_color: Some(Color::WHITE),
        ..Default::default()
    }
}

pub fn badge(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.7))),
        text_color: Some(Color::WHITE),
        border: Border {
            radius: 999.0.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

pub fn toast(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(INK)),
        text_color: Some(Color::WHITE),
        border: Border {
            color: ACCENT,
            width: 1.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
            offset: Vector::new(0.0, 10.0),
            blur_radius: 30.0,
        },
    }
}

pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.95))),
        ..Default::default()
    }
}

/// Highlight ring around the active gallery view
pub fn view_frame(active: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        border: Border {
            color: if active { ACCENT } else { Color::TRANSPARENT },
            width: 4.0,
            radius: 20.0.into(),
        },
        ..Default::default()
    }
}

fn filled(background: Color, text: Color, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Color {
            a: background.a * 0.85,
            ..background
        },
        button::Status::Disabled => Color {
            a: background.a * 0.4,
            ..background
        },
        _ => background,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: text,
        border: Border {
            radius: 16.0.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    filled(INK, Color::WHITE, status)
}

pub fn accent(_theme: &Theme, status: button::Status) -> button::Style {
    filled(ACCENT, Color::WHITE, status)
}

pub fn quiet(_theme: &Theme, status: button::Status) -> button::Style {
    let text_color = match status {
        button::Status::Hovered => ACCENT,
        button::Status::Disabled => STONE_LIGHT,
        _ => STONE,
    };
    button::Style {
        background: None,
        text_color,
        ..Default::default()
    }
}

pub fn input(theme: &Theme, status: text_input::Status) -> text_input::Style {
    let base = text_input::default(theme, status);
    text_input::Style {
        background: Background::Color(Color::WHITE),
        border: Border {
            color: match status {
                text_input::Status::Focused => INK,
                _ => STONE_LIGHT,
            },
            width: 1.0,
            radius: 12.0.into(),
        },
        value: INK,
        ..base
    }
}
