/// Before/after comparison slider
///
/// Renders the "after" image as the base layer and the "before" image
/// clipped to the left of a divider. Moving the pointer over the widget
/// (or a finger that went down on it) moves the divider; there is no
/// press-and-drag gesture.
///
/// The divider position lives in the widget tree state and never leaves
/// the widget. The only thing reported upward is an optional message,
/// published once on the first processed move.
use iced::advanced::image::{Image, Renderer as _};
use iced::advanced::layout::{self, Layout};
use iced::advanced::renderer::{self, Quad, Renderer as _};
use iced::advanced::widget::{tree, Tree, Widget};
use iced::advanced::{Clipboard, Shell};
use iced::{
    event, mouse, touch, window, Border, Color, Element, Event, Length, Point, Rectangle, Renderer,
    Shadow, Size, Theme, Vector,
};

use crate::media::LoadedImage;

/// Divider position on mount (even split)
pub const INITIAL_POSITION: f32 = 50.0;

/// Divider position and first-interaction bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    /// Percent of the container width, always within [0, 100]
    position: f32,
    interacted: bool,
}

impl Default for SliderState {
    fn default() -> Self {
        Self {
            position: INITIAL_POSITION,
            interacted: false,
        }
    }
}

impl SliderState {
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Move the divider under a pointer at `pointer_x`, given the
    /// container's current left edge and width.
    ///
    /// Returns `true` only for the first move of this state's lifetime.
    pub fn track(&mut self, pointer_x: f32, left: f32, width: f32) -> bool {
        if width > 0.0 && pointer_x.is_finite() {
            let x = (pointer_x - left).clamp(0.0, width);
            self.position = x / width * 100.0;
        }

        let first = !self.interacted;
        self.interacted = true;
        first
    }
}

/// Visual parameters of the slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderStyle {
    pub height: f32,
    pub corner_radius: f32,
    pub divider_width: f32,
    pub divider_color: Color,
    pub handle_radius: f32,
    pub handle_border_width: f32,
    pub handle_color: Color,
    pub handle_border_color: Color,
    /// Whether the presentation shows the state badges around the slider
    pub show_labels: bool,
}

impl SliderStyle {
    /// Full-size look used on the presentation screen
    pub fn studio() -> Self {
        Self {
            height: 560.0,
            corner_radius: 32.0,
            divider_width: 1.0,
            divider_color: Color::from_rgba(1.0, 1.0, 1.0, 0.4),
            handle_radius: 28.0,
            handle_border_width: 6.0,
            handle_color: Color::WHITE,
            handle_border_color: Color::BLACK,
            show_labels: true,
        }
    }

    /// Small preview used in the editor
    pub fn compact() -> Self {
        Self {
            height: 260.0,
            corner_radius: 16.0,
            divider_width: 2.0,
            divider_color: Color::WHITE,
            handle_radius: 14.0,
            handle_border_width: 3.0,
            handle_color: Color::WHITE,
            handle_border_color: Color::from_rgb(1.0, 0.0, 0.0),
            show_labels: false,
        }
    }
}

/// Per-instance widget state
#[derive(Debug, Default)]
struct State {
    slider: SliderState,
    /// Finger that went down inside the widget and is being followed
    finger: Option<touch::Finger>,
}

pub struct ComparisonSlider<'a, Message> {
    before: &'a LoadedImage,
    after: &'a LoadedImage,
    on_first_interact: Option<Message>,
    style: SliderStyle,
    width: Length,
}

impl<'a, Message> ComparisonSlider<'a, Message> {
    pub fn new(before: &'a LoadedImage, after: &'a LoadedImage) -> Self {
        Self {
            before,
            after,
            on_first_interact: None,
            style: SliderStyle::studio(),
            width: Length::Fill,
        }
    }

    /// Message published once, on the first pointer move
    pub fn on_first_interact(mut self, message: Message) -> Self {
        self.on_first_interact = Some(message);
        self
    }

    pub fn style(mut self, style: SliderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }
}

/// Rectangle that covers `target` with an image of the given size,
/// keeping its aspect ratio and centering the overflow
pub fn cover_rect(target: Rectangle, image_width: u32, image_height: u32) -> Rectangle {
    if image_width == 0 || image_height == 0 {
        return target;
    }

    let (w, h) = (image_width as f32, image_height as f32);
    let scale = (target.width / w).max(target.height / h);
    let size = Size::new(w * scale, h * scale);

    Rectangle::new(
        Point::new(
            target.x + (target.width - size.width) / 2.0,
            target.y + (target.height - size.height) / 2.0,
        ),
        size,
    )
}

impl<'a, Message> Widget<Message, Theme, Renderer> for ComparisonSlider<'a, Message>
where
    Message: Clone,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        Size::new(self.width, Length::Fixed(self.style.height))
    }

    fn layout(
        &self,
        _tree: &mut Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::atomic(limits, self.width, Length::Fixed(self.style.height))
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) -> event::Status {
        let state = tree.state.downcast_mut::<State>();
        // Bounds are read on every event so resizes need no extra handling
        let bounds = layout.bounds();

        // Scrollables hand children a translated cursor but the raw event,
        // so positions always come from `cursor`
        let (pointer_x, status) = match event {
            Event::Mouse(mouse::Event::CursorMoved { .. }) => match cursor.position_over(bounds) {
                Some(position) => (position.x, event::Status::Ignored),
                None => return event::Status::Ignored,
            },
            Event::Touch(touch::Event::FingerPressed { id, .. }) => {
                match cursor.position_over(bounds) {
                    Some(position) => {
                        state.finger = Some(id);
                        (position.x, event::Status::Captured)
                    }
                    None => return event::Status::Ignored,
                }
            }
            Event::Touch(touch::Event::FingerMoved { id, .. }) if state.finger == Some(id) => {
                match cursor.position() {
                    Some(position) => (position.x, event::Status::Captured),
                    None => return event::Status::Captured,
                }
            }
            Event::Touch(touch::Event::FingerLifted { id, .. })
            | Event::Touch(touch::Event::FingerLost { id, .. })
                if state.finger == Some(id) =>
            {
                state.finger = None;
                return event::Status::Captured;
            }
            _ => return event::Status::Ignored,
        };

        if state.slider.track(pointer_x, bounds.x, bounds.width) {
            if let Some(message) = &self.on_first_interact {
                shell.publish(message.clone());
            }
        }
        shell.request_redraw(window::RedrawRequest::NextFrame);

        status
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_ref::<State>();
        let bounds = layout.bounds();
        let style = &self.style;

        // After image: full-bleed base layer
        renderer.with_layer(bounds, |renderer| {
            renderer.draw_image(
                Image::new(self.after.handle.clone()),
                cover_rect(bounds, self.after.width, self.after.height),
            );
        });

        // Before image: clipped to the left of the divider
        let split = bounds.x + bounds.width * state.slider.position() / 100.0;
        let revealed = Rectangle {
            width: split - bounds.x,
            ..bounds
        };
        if revealed.width > 0.0 {
            renderer.with_layer(revealed, |renderer| {
                renderer.draw_image(
                    Image::new(self.before.handle.clone()),
                    cover_rect(bounds, self.before.width, self.before.height),
                );
            });
        }

        // Divider line
        renderer.fill_quad(
            Quad {
                bounds: Rectangle {
                    x: split - style.divider_width / 2.0,
                    y: bounds.y,
                    width: style.divider_width,
                    height: bounds.height,
                },
                border: Border::default(),
                shadow: Shadow::default(),
            },
            style.divider_color,
        );

        // Handle at the vertical midpoint
        let center = Point::new(split, bounds.center_y());
        let radius = style.handle_radius;
        renderer.fill_quad(
            Quad {
                bounds: Rectangle::new(
                    center - Vector::new(radius, radius),
                    Size::new(radius * 2.0, radius * 2.0),
                ),
                border: Border {
                    color: style.handle_border_color,
                    width: style.handle_border_width,
                    radius: radius.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                    offset: Vector::ZERO,
                    blur_radius: radius * 1.4,
                },
            },
            style.handle_color,
        );

        // Grip: two short bars, one on each side of the divider
        let bar = Size::new(radius * 0.12, radius * 0.6);
        for offset in [-radius * 0.22, radius * 0.22] {
            renderer.fill_quad(
                Quad {
                    bounds: Rectangle::new(
                        Point::new(
                            center.x + offset - bar.width / 2.0,
                            center.y - bar.height / 2.0,
                        ),
                        bar,
                    ),
                    border: Border {
                        radius: (bar.width / 2.0).into(),
                        ..Border::default()
                    },
                    shadow: Shadow::default(),
                },
                style.handle_border_color,
            );
        }
    }

    fn mouse_interaction(
        &self,
        _tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        if cursor.is_over(layout.bounds()) {
            mouse::Interaction::ResizingHorizontally
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a, Message> From<ComparisonSlider<'a, Message>> for Element<'a, Message>
where
    Message: Clone + 'a,
{
    fn from(slider: ComparisonSlider<'a, Message>) -> Self {
        Element::new(slider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_at_even_split() {
        assert_eq!(SliderState::default().position(), 50.0);
    }

    #[test]
    fn test_edges_and_midpoint() {
        let mut slider = SliderState::default();

        slider.track(-30.0, 0.0, 400.0);
        assert_eq!(slider.position(), 0.0);

        slider.track(0.0, 0.0, 400.0);
        assert_eq!(slider.position(), 0.0);

        slider.track(200.0, 0.0, 400.0);
        assert_eq!(slider.position(), 50.0);

        slider.track(400.0, 0.0, 400.0);
        assert_eq!(slider.position(), 100.0);
    }

    #[test]
    fn test_pointer_scenarios_on_400px_container() {
        let mut slider = SliderState::default();

        slider.track(100.0, 0.0, 400.0);
        assert_eq!(slider.position(), 25.0);

        slider.track(500.0, 0.0, 400.0);
        assert_eq!(slider.position(), 100.0);
    }

    #[test]
    fn test_position_is_relative_to_current_bounds() {
        let mut slider = SliderState::default();

        slider.track(300.0, 200.0, 400.0);
        assert_eq!(slider.position(), 25.0);

        // Same pointer after the container moved and shrank
        slider.track(300.0, 100.0, 200.0);
        assert_eq!(slider.position(), 100.0);
    }

    #[test]
    fn test_first_interaction_fires_once() {
        let mut slider = SliderState::default();
        let fired = (0..50)
            .filter(|i| slider.track(*i as f32 * 10.0, 0.0, 400.0))
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_zero_width_keeps_position() {
        let mut slider = SliderState::default();
        assert!(slider.track(10.0, 0.0, 0.0));
        assert_eq!(slider.position(), 50.0);
    }

    #[test]
    fn test_cover_rect_fills_and_centers() {
        let target = Rectangle::new(Point::new(10.0, 20.0), Size::new(400.0, 200.0));

        // Square image: scaled to the width, overflowing vertically
        let rect = cover_rect(target, 100, 100);
        assert_eq!(rect.size(), Size::new(400.0, 400.0));
        assert_eq!(rect.position(), Point::new(10.0, -80.0));

        // Very wide image: scaled to the height, overflowing horizontally
        let rect = cover_rect(target, 400, 50);
        assert_eq!(rect.size(), Size::new(1600.0, 200.0));
        assert_eq!(rect.x, 10.0 - 600.0);

        assert_eq!(cover_rect(target, 0, 10), target);
    }

    #[test]
    fn test_styles_differ() {
        assert!(SliderStyle::studio().show_labels);
        assert!(!SliderStyle::compact().show_labels);
        assert!(SliderStyle::compact().height < SliderStyle::studio().height);
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_range(
            pointer in -10_000.0f32..10_000.0,
            left in -500.0f32..500.0,
            width in 0.0f32..5_000.0,
        ) {
            let mut slider = SliderState::default();
            slider.track(pointer, left, width);
            prop_assert!((0.0..=100.0).contains(&slider.position()));
        }
    }
}

#[cfg(test)]
mod widget_tests {
    use super::*;
    use iced::advanced::clipboard;
    use iced::widget::{column, scrollable, Space};
    use iced::Pixels;
    use iced_runtime::user_interface::{self, UserInterface};

    use crate::media::Tone;

    #[derive(Debug, Clone, PartialEq)]
    struct Engaged;

    fn images() -> (LoadedImage, LoadedImage) {
        (
            LoadedImage::placeholder(Tone::Muted),
            LoadedImage::placeholder(Tone::Natural),
        )
    }

    /// Headless renderer; the slider never draws in these tests
    fn renderer() -> Renderer {
        Renderer::Secondary(iced_tiny_skia::Renderer::new(
            iced::Font::default(),
            Pixels(16.0),
        ))
    }

    fn pointer_at(x: f32, y: f32) -> (mouse::Cursor, Event) {
        let position = Point::new(x, y);
        (
            mouse::Cursor::Available(position),
            Event::Mouse(mouse::Event::CursorMoved { position }),
        )
    }

    fn finger(
        event: fn(touch::Finger, Point) -> touch::Event,
        x: f32,
        y: f32,
    ) -> (mouse::Cursor, Event) {
        let position = Point::new(x, y);
        (
            mouse::Cursor::Available(position),
            Event::Touch(event(touch::Finger(7), position)),
        )
    }

    fn pressed(id: touch::Finger, position: Point) -> touch::Event {
        touch::Event::FingerPressed { id, position }
    }

    fn moved(id: touch::Finger, position: Point) -> touch::Event {
        touch::Event::FingerMoved { id, position }
    }

    fn lifted(id: touch::Finger, position: Point) -> touch::Event {
        touch::Event::FingerLifted { id, position }
    }

    fn wheel_down(x: f32, y: f32, pixels: f32) -> (mouse::Cursor, Event) {
        (
            mouse::Cursor::Available(Point::new(x, y)),
            Event::Mouse(mouse::Event::WheelScrolled {
                delta: mouse::ScrollDelta::Pixels { x: 0.0, y: -pixels },
            }),
        )
    }

    /// Feed `steps` one at a time and collect the statuses and messages
    fn drive(
        root: Element<'_, Engaged>,
        steps: &[(mouse::Cursor, Event)],
    ) -> (Vec<event::Status>, Vec<Engaged>) {
        let mut renderer = renderer();
        let mut ui = UserInterface::build(
            root,
            Size::new(600.0, 400.0),
            user_interface::Cache::default(),
            &mut renderer,
        );

        let mut statuses = Vec::new();
        let mut messages = Vec::new();
        for (cursor, event) in steps {
            let (_, status) = ui.update(
                std::slice::from_ref(event),
                *cursor,
                &mut renderer,
                &mut clipboard::Null,
                &mut messages,
            );
            statuses.extend(status);
        }
        (statuses, messages)
    }

    /// A compact slider 300 px down a 400 px tall scrollable column
    fn scrolled_layout<'a>(
        before: &'a LoadedImage,
        after: &'a LoadedImage,
    ) -> Element<'a, Engaged> {
        scrollable(column![
            Space::with_height(300),
            ComparisonSlider::new(before, after)
                .style(SliderStyle::compact())
                .on_first_interact(Engaged),
            Space::with_height(1000),
        ])
        .height(400)
        .into()
    }

    #[test]
    fn test_first_interaction_published_once() {
        let (before, after) = images();
        let slider = ComparisonSlider::new(&before, &after)
            .style(SliderStyle::compact())
            .on_first_interact(Engaged);

        let steps: Vec<_> = (0..20).map(|i| pointer_at(i as f32 * 25.0, 100.0)).collect();
        let (_, messages) = drive(slider.into(), &steps);

        assert_eq!(messages, vec![Engaged]);
    }

    #[test]
    fn test_moves_outside_bounds_are_ignored() {
        let (before, after) = images();
        let root = column![
            ComparisonSlider::new(&before, &after)
                .style(SliderStyle::compact())
                .on_first_interact(Engaged),
            Space::with_height(100),
        ];

        // Compact slider is 260 px tall; y = 300 is below it
        let (_, messages) = drive(
            root.into(),
            &[pointer_at(100.0, 300.0), pointer_at(500.0, 330.0)],
        );
        assert!(messages.is_empty());

        let (_, messages) = drive(
            column![ComparisonSlider::new(&before, &after)
                .style(SliderStyle::compact())
                .on_first_interact(Engaged)]
            .into(),
            &[pointer_at(100.0, 300.0), pointer_at(100.0, 100.0)],
        );
        assert_eq!(messages, vec![Engaged]);
    }

    #[test]
    fn test_finger_lifecycle() {
        let (before, after) = images();
        let slider = ComparisonSlider::new(&before, &after)
            .style(SliderStyle::compact())
            .on_first_interact(Engaged);

        let (statuses, messages) = drive(
            slider.into(),
            &[
                finger(pressed, 150.0, 100.0),
                finger(moved, 300.0, 120.0),
                finger(lifted, 300.0, 120.0),
                finger(moved, 400.0, 120.0),
            ],
        );

        assert_eq!(
            statuses,
            vec![
                event::Status::Captured,
                event::Status::Captured,
                event::Status::Captured,
                event::Status::Ignored,
            ]
        );
        assert_eq!(messages, vec![Engaged]);
    }

    #[test]
    fn test_finger_pressed_outside_is_not_followed() {
        let (before, after) = images();
        let root = column![
            ComparisonSlider::new(&before, &after)
                .style(SliderStyle::compact())
                .on_first_interact(Engaged),
            Space::with_height(100),
        ];

        let (statuses, messages) = drive(
            root.into(),
            &[finger(pressed, 100.0, 320.0), finger(moved, 100.0, 100.0)],
        );

        assert_eq!(statuses, vec![event::Status::Ignored, event::Status::Ignored]);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_touch_inside_scrolled_column() {
        let (before, after) = images();

        // After scrolling 300 px the slider occupies the top of the viewport
        let (statuses, messages) = drive(
            scrolled_layout(&before, &after),
            &[wheel_down(100.0, 100.0, 300.0), finger(pressed, 100.0, 100.0)],
        );

        assert_eq!(statuses[1], event::Status::Captured);
        assert_eq!(messages, vec![Engaged]);
    }

    #[test]
    fn test_touch_below_scrolled_slider_is_ignored() {
        let (before, after) = images();

        // The slider now spans y = 0..260 of the viewport
        let (_, messages) = drive(
            scrolled_layout(&before, &after),
            &[wheel_down(100.0, 100.0, 300.0), finger(pressed, 100.0, 330.0)],
        );

        assert!(messages.is_empty());
    }

    #[test]
    fn test_mouse_inside_scrolled_column() {
        let (before, after) = images();

        let (_, messages) = drive(
            scrolled_layout(&before, &after),
            &[wheel_down(100.0, 100.0, 300.0), pointer_at(100.0, 100.0)],
        );

        assert_eq!(messages, vec![Engaged]);
    }
}
