//! Text widget for displaying a single line of text.

use marquee_core::{Canvas, Color, FontWeight, Frame, Point, Size, TextStyle, Transform2D, Widget};

/// Text widget for displaying styled text.
#[derive(Debug, Clone)]
pub struct Text {
    frame: Frame,
    /// Text content
    content: String,
    /// Text style
    style: TextStyle,
}

impl Text {
    /// Create new text widget.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        let style = TextStyle::default();
        Self {
            frame: Frame::new(Size::new(0.0, style.size * 1.5)),
            content: content.into(),
            style,
        }
    }

    /// Set text color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    /// Set font size.
    #[must_use]
    pub const fn font_size(mut self, size: f32) -> Self {
        self.style.size = size;
        self
    }

    /// Set font weight.
    #[must_use]
    pub const fn font_weight(mut self, weight: FontWeight) -> Self {
        self.style.weight = weight;
        self
    }

    /// Get the text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the text content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl Widget for Text {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn render(&self, canvas: &mut dyn Canvas, parent: &Transform2D) {
        if self.content.is_empty() {
            return;
        }
        canvas.set_transform(self.frame.transform(parent));
        canvas.draw_text(&self.content, Point::ORIGIN, &self.style);
    }
}
