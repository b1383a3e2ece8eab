//! Focusable button.
//!
//! Activation is handled by the owner (see `MessageBox`), which knows what
//! the focused button means.

use marquee_core::{
    Canvas, Color, FontWeight, Frame, HelpPrompt, Point, Rect, Size, TextStyle, Transform2D,
    Widget,
};

/// Button widget with a label and a focus highlight.
#[derive(Debug, Clone)]
pub struct Button {
    frame: Frame,
    /// Button label
    label: String,
    /// Background color (normal state)
    background: Color,
    /// Background color (focused state)
    background_focused: Color,
    /// Text color
    text_color: Color,
    /// Focus state
    focused: bool,
}

impl Button {
    /// Create a new button with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            frame: Frame::new(Size::new(200.0, 40.0)),
            label: label.into(),
            background: Color::from_rgba_u32(0x7777_77FF),
            background_focused: Color::from_rgba_u32(0x5555_55FF),
            text_color: Color::WHITE,
            focused: false,
        }
    }

    /// Set background color.
    #[must_use]
    pub const fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set focused background color.
    #[must_use]
    pub const fn background_focused(mut self, color: Color) -> Self {
        self.background_focused = color;
        self
    }

    /// Get the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the button currently has focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }
}

impl Widget for Button {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        canvas.set_transform(self.frame.transform(parent));
        let bg = if self.focused {
            self.background_focused
        } else {
            self.background
        };
        canvas.fill_rect(Rect::from_size(self.frame.size), bg);
        let style = TextStyle {
            color: self.text_color,
            weight: if self.focused {
                FontWeight::Bold
            } else {
                FontWeight::Normal
            },
            ..TextStyle::default()
        };
        canvas.draw_text(&self.label, Point::ORIGIN, &style);
    }

    fn on_focus_gained(&mut self) {
        self.focused = true;
    }

    fn on_focus_lost(&mut self) {
        self.focused = false;
    }

    fn help_prompts(&self) -> Vec<HelpPrompt> {
        vec![HelpPrompt::new("a", "select")]
    }
}
